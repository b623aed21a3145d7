//! Decimal rendering and parsing of ordinates.
//!
//! Output is always plain decimal notation: no exponent, no trailing zeros after the decimal
//! point, and negative zero written as `0`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The largest number of digits that is meaningful for an `f64`.
const MAX_DIGITS: u8 = 17;

/// How many digits to keep when rendering a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberFormat {
    /// The shortest text that parses back to the identical value.
    #[default]
    Shortest,

    /// Round to this many significant digits.
    SignificantDigits(u8),

    /// Round to this many digits after the decimal point.
    Decimals(u8),
}

/// Render `value` as a string.
pub fn format_f64(value: f64, format: NumberFormat) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_f64(&mut out, value, format);
    out
}

/// Render `value` into a text sink.
pub fn write_f64<W: fmt::Write>(out: &mut W, value: f64, format: NumberFormat) -> fmt::Result {
    if value.is_nan() {
        return out.write_str("NaN");
    }
    if value.is_infinite() {
        return out.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        return out.write_char('0');
    }

    match format {
        // Display for f64 is shortest round-trip and never uses an exponent.
        NumberFormat::Shortest => write!(out, "{}", value),
        NumberFormat::Decimals(decimals) => {
            let text = format!("{:.*}", decimals.min(MAX_DIGITS) as usize, value);
            out.write_str(trim_fraction(&text))
        }
        NumberFormat::SignificantDigits(digits) => {
            let precision = digits.clamp(1, MAX_DIGITS) as usize - 1;
            let text = format!("{:.*e}", precision, value);
            out.write_str(&expand_exponent(&text))
        }
    }
}

/// Strip trailing zeros from the fractional part, and the point itself if nothing is left.
/// A result of `-0` becomes `0`.
fn trim_fraction(text: &str) -> &str {
    let trimmed = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    };
    if trimmed == "-0" {
        "0"
    } else {
        trimmed
    }
}

/// Rewrite `d.ddde[-]x` as a plain decimal.
fn expand_exponent(text: &str) -> String {
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text, "0"));
    let exponent: i64 = exponent.parse().unwrap_or(0);
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    // Number of digits before the decimal point.
    let point = exponent + 1;
    let mut plain = String::with_capacity(digits.len() + point.unsigned_abs() as usize + 3);
    if negative {
        plain.push('-');
    }
    if point <= 0 {
        plain.push_str("0.");
        plain.extend(std::iter::repeat('0').take(point.unsigned_abs() as usize));
        plain.push_str(&digits);
    } else if point as usize >= digits.len() {
        plain.push_str(&digits);
        plain.extend(std::iter::repeat('0').take(point as usize - digits.len()));
    } else {
        let (integral, fractional) = digits.split_at(point as usize);
        plain.push_str(integral);
        plain.push('.');
        plain.push_str(fractional);
    }
    trim_fraction(&plain).to_string()
}

/// Parse one number token, accepting the spellings produced by [`write_f64`].
pub fn parse_f64(token: &str) -> Option<f64> {
    match token {
        "NaN" | "nan" => Some(f64::NAN),
        "Infinity" | "+Infinity" | "inf" => Some(f64::INFINITY),
        "-Infinity" | "-inf" => Some(f64::NEG_INFINITY),
        _ => lexical_core::parse::<f64>(token.as_bytes()).ok(),
    }
}

/// Parse an SRID or other integer token.
pub(crate) fn parse_i32(token: &str) -> Option<i32> {
    lexical_core::parse::<i32>(token.as_bytes()).ok()
}

/// The number of decimals that a fixed precision model with this scale can represent exactly.
///
/// Only powers of ten map to a decimal count. Any other scale, and a floating model, gives
/// `None` so callers fall back to a lossless format.
pub fn decimals_for_scale(scale: f64) -> Option<u8> {
    if !(scale > 0.0 && scale.is_finite()) {
        return None;
    }
    let exponent = scale.log10().round();
    let power = 10f64.powf(exponent);
    if (power - scale).abs() > scale * 1e-9 {
        return None;
    }
    Some(exponent.clamp(0.0, MAX_DIGITS as f64) as u8)
}
