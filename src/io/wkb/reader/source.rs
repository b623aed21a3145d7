use std::io::{self, Read};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::error::{Result, WkxError};
use crate::io::wkb::common::Endianness;

/// A byte stream that tracks its offset and the byte order of the header being read.
pub(super) struct ByteSource<R: Read> {
    inner: R,
    position: usize,
    byte_order: Endianness,
}

impl<R: Read> ByteSource<R> {
    /// Streams start out big-endian until a header says otherwise.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            position: 0,
            byte_order: Endianness::BigEndian,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn byte_order(&self) -> Endianness {
        self.byte_order
    }

    pub fn set_byte_order(&mut self, byte_order: Endianness) {
        self.byte_order = byte_order;
    }

    fn map_err(&self, err: io::Error, what: &'static str) -> WkxError {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            WkxError::malformed(self.position, format!("unexpected end of input reading {}", what))
        } else {
            err.into()
        }
    }

    pub fn read_u8(&mut self, what: &'static str) -> Result<u8> {
        let value = self.inner.read_u8().map_err(|err| self.map_err(err, what))?;
        self.position += 1;
        Ok(value)
    }

    pub fn read_u32(&mut self, what: &'static str) -> Result<u32> {
        let value = match self.byte_order {
            Endianness::BigEndian => self.inner.read_u32::<BigEndian>(),
            Endianness::LittleEndian => self.inner.read_u32::<LittleEndian>(),
        }
        .map_err(|err| self.map_err(err, what))?;
        self.position += 4;
        Ok(value)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let value = match self.byte_order {
            Endianness::BigEndian => self.inner.read_f64::<BigEndian>(),
            Endianness::LittleEndian => self.inner.read_f64::<LittleEndian>(),
        }
        .map_err(|err| self.map_err(err, "an ordinate"))?;
        self.position += 8;
        Ok(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tracks_position_and_order() {
        let bytes = [0x01, 0x00, 0x00, 0x00, 0x02, 0x02, 0x00, 0x00, 0x00];
        let mut source = ByteSource::new(&bytes[..]);
        assert_eq!(source.read_u8("a byte").unwrap(), 1);
        assert_eq!(source.read_u32("a count").unwrap(), 2);
        source.set_byte_order(Endianness::LittleEndian);
        assert_eq!(source.read_u32("a count").unwrap(), 2);
        assert_eq!(source.position(), 9);
    }

    #[test]
    fn truncated() {
        let bytes = [0x00, 0x00];
        let mut source = ByteSource::new(&bytes[..]);
        source.read_u8("a byte").unwrap();
        let err = source.read_f64().unwrap_err();
        assert!(matches!(err, WkxError::MalformedInput { position: 1, .. }));
    }
}
