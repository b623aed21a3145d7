use serde::{Deserialize, Serialize};

/// Rounding policy applied to ordinates.
///
/// A fixed model with `scale = 1000.0` keeps three decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PrecisionModel {
    /// Full double precision; ordinates are never rounded.
    Floating,

    /// Ordinates are rounded to the nearest multiple of `1 / scale`.
    Fixed { scale: f64 },
}

impl PrecisionModel {
    /// A precision model for the given scale, where a scale of `0` (or any non-positive or
    /// non-finite value) means floating.
    pub fn from_scale(scale: f64) -> Self {
        if scale > 0.0 && scale.is_finite() {
            PrecisionModel::Fixed { scale }
        } else {
            PrecisionModel::Floating
        }
    }

    /// The scale of this model, `0` for floating.
    pub fn scale(&self) -> f64 {
        match self {
            PrecisionModel::Floating => 0.0,
            PrecisionModel::Fixed { scale } => *scale,
        }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, PrecisionModel::Floating)
    }

    /// Round a value according to this model.
    ///
    /// NaN and infinite values are returned unchanged.
    pub fn make_precise(&self, value: f64) -> f64 {
        match self {
            PrecisionModel::Floating => value,
            PrecisionModel::Fixed { scale } => {
                if value.is_finite() {
                    (value * scale).round() / scale
                } else {
                    value
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn floating_is_identity() {
        let model = PrecisionModel::from_scale(0.0);
        assert!(model.is_floating());
        assert_eq!(model.make_precise(1.234_567_891_234), 1.234_567_891_234);
    }

    #[test]
    fn fixed_rounds_to_scale() {
        let model = PrecisionModel::from_scale(1000.0);
        assert_eq!(model.make_precise(1.23456), 1.235);
        assert_eq!(model.make_precise(-0.0004), -0.0);
        assert!(model.make_precise(f64::NAN).is_nan());
        assert_eq!(model.make_precise(f64::INFINITY), f64::INFINITY);
    }
}
