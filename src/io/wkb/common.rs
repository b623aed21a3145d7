use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WkxError};
use crate::geometry::{Dimension, GeometryType};

/// EWKB flag for a Z ordinate.
pub const Z_FLAG: u32 = 0x8000_0000;
/// EWKB flag for an M ordinate.
pub const M_FLAG: u32 = 0x4000_0000;
/// EWKB flag for an SRID following the type word.
pub const SRID_FLAG: u32 = 0x2000_0000;

const FLAG_MASK: u32 = Z_FLAG | M_FLAG | SRID_FLAG;

/// The base WKB geometry type codes.
#[derive(Clone, Copy, Debug, PartialEq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum WKBType {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
}

impl From<GeometryType> for WKBType {
    /// LinearRing has no code of its own and is encoded as a LineString.
    fn from(value: GeometryType) -> Self {
        match value {
            GeometryType::Point => WKBType::Point,
            GeometryType::LineString | GeometryType::LinearRing => WKBType::LineString,
            GeometryType::Polygon => WKBType::Polygon,
            GeometryType::MultiPoint => WKBType::MultiPoint,
            GeometryType::MultiLineString => WKBType::MultiLineString,
            GeometryType::MultiPolygon => WKBType::MultiPolygon,
            GeometryType::GeometryCollection => WKBType::GeometryCollection,
        }
    }
}

/// Byte order of a WKB header and everything it governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Endianness {
    /// XDR
    BigEndian,
    /// NDR
    #[default]
    LittleEndian,
}

impl TryFrom<u8> for Endianness {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Endianness::BigEndian),
            1 => Ok(Endianness::LittleEndian),
            other => Err(other),
        }
    }
}

impl From<Endianness> for u8 {
    fn from(value: Endianness) -> Self {
        match value {
            Endianness::BigEndian => 0,
            Endianness::LittleEndian => 1,
        }
    }
}

/// A decoded geometry type word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeWord {
    pub geometry_type: WKBType,
    pub dimension: Dimension,
    pub has_srid: bool,
}

impl TypeWord {
    /// Decode EWKB flags as well as ISO `1000`/`2000`/`3000` dimension offsets.
    pub fn decode(word: u32) -> Result<Self> {
        let code = word & !FLAG_MASK;
        let unsupported =
            || WkxError::UnsupportedGeometryType(format!("WKB type code {:#x}", word));
        let (iso_z, iso_m) = match code / 1000 {
            0 => (false, false),
            1 => (true, false),
            2 => (false, true),
            3 => (true, true),
            _ => return Err(unsupported()),
        };
        let geometry_type = WKBType::try_from_primitive(code % 1000).map_err(|_| unsupported())?;
        Ok(Self {
            geometry_type,
            dimension: Dimension::from_flags(
                iso_z || word & Z_FLAG != 0,
                iso_m || word & M_FLAG != 0,
            ),
            has_srid: word & SRID_FLAG != 0,
        })
    }

    /// Encode as an EWKB type word.
    pub fn encode(&self) -> u32 {
        let mut word: u32 = self.geometry_type.into();
        if self.dimension.has_z() {
            word |= Z_FLAG;
        }
        if self.dimension.has_m() {
            word |= M_FLAG;
        }
        if self.has_srid {
            word |= SRID_FLAG;
        }
        word
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_ewkb_flags() {
        let word = TypeWord::decode(0xA000_0002).unwrap();
        assert_eq!(word.geometry_type, WKBType::LineString);
        assert_eq!(word.dimension, Dimension::XYZ);
        assert!(word.has_srid);
        assert_eq!(word.encode(), 0xA000_0002);

        let word = TypeWord::decode(0x4000_0001).unwrap();
        assert_eq!(word.dimension, Dimension::XYM);
    }

    #[test]
    fn decode_iso_codes() {
        let word = TypeWord::decode(1003).unwrap();
        assert_eq!(word.geometry_type, WKBType::Polygon);
        assert_eq!(word.dimension, Dimension::XYZ);
        assert_eq!(TypeWord::decode(2001).unwrap().dimension, Dimension::XYM);
        assert_eq!(TypeWord::decode(3007).unwrap().dimension, Dimension::XYZM);
        assert_eq!(TypeWord::decode(3007).unwrap().encode(), 0xC000_0007);
    }

    #[test]
    fn unknown_codes() {
        for word in [0, 8, 15, 1017, 4001] {
            assert!(matches!(
                TypeWord::decode(word),
                Err(WkxError::UnsupportedGeometryType(_))
            ));
        }
    }

    #[test]
    fn linear_ring_is_a_line_string() {
        assert_eq!(WKBType::from(GeometryType::LinearRing), WKBType::LineString);
        assert_eq!(WKBType::from(GeometryType::MultiPolygon), WKBType::MultiPolygon);
    }

    #[test]
    fn byte_order_markers() {
        assert_eq!(Endianness::try_from(0), Ok(Endianness::BigEndian));
        assert_eq!(Endianness::try_from(1), Ok(Endianness::LittleEndian));
        assert_eq!(Endianness::try_from(7), Err(7));
        assert_eq!(u8::from(Endianness::LittleEndian), 1);
    }
}
