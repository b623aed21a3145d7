use std::fmt::Write;

use crate::error::{Result, WkxError};

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Decode hex text, as WKB is commonly embedded in text columns.
///
/// Fails on odd-length input or a character that is not a hex digit; the error carries the
/// character offset.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>> {
    let digits = hex.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(WkxError::malformed(
            digits.len(),
            "hex string has an odd number of digits",
        ));
    }
    digits
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| -> Result<u8> {
            let digit = |offset: usize| {
                hex_digit(pair[offset]).ok_or_else(|| {
                    WkxError::malformed(2 * i + offset, "hex string contains a non-hex character")
                })
            };
            Ok(digit(0)? << 4 | digit(1)?)
        })
        .collect()
}

/// Encode bytes as upper-case hex.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
            // Writing into a String never fails.
            let _ = write!(out, "{:02X}", b);
            out
        })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode() {
        assert_eq!(hex_to_bytes("00ff7Ab1").unwrap(), vec![0x00, 0xff, 0x7a, 0xb1]);
        assert!(hex_to_bytes("").unwrap().is_empty());
    }

    #[test]
    fn odd_length() {
        let err = hex_to_bytes("0A1").unwrap_err();
        assert_eq!(err.position(), Some(3));
    }

    #[test]
    fn bad_digit() {
        let err = hex_to_bytes("0A1G").unwrap_err();
        assert_eq!(err.position(), Some(3));
        assert!(hex_to_bytes("é0").is_err());
    }

    #[test]
    fn encode() {
        assert_eq!(bytes_to_hex(&[0x01, 0xab, 0x00]), "01AB00");
    }
}
