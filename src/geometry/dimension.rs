use crate::geometry::coord::{M, X, Y, Z};

/// Which ordinates an encoded vertex carries.
///
/// M always lands in the fourth slot, so `XYM` data is held in four axes with NaN Z values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    XY,
    XYZ,
    XYM,
    XYZM,
}

impl Dimension {
    pub fn from_flags(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => Dimension::XY,
            (true, false) => Dimension::XYZ,
            (false, true) => Dimension::XYM,
            (true, true) => Dimension::XYZM,
        }
    }

    /// The dimension that stores every axis of a sequence with this many axes.
    pub fn from_axis_count(axis_count: usize) -> Self {
        match axis_count {
            0..=2 => Dimension::XY,
            3 => Dimension::XYZ,
            _ => Dimension::XYZM,
        }
    }

    /// The ordinate slot filled by each encoded number of a vertex.
    pub fn slots(&self) -> &'static [usize] {
        match self {
            Dimension::XY => &[X, Y],
            Dimension::XYZ => &[X, Y, Z],
            Dimension::XYM => &[X, Y, M],
            Dimension::XYZM => &[X, Y, Z, M],
        }
    }

    /// The axis count of the sequences holding this dimension.
    pub fn axis_count(&self) -> usize {
        match self {
            Dimension::XY => 2,
            Dimension::XYZ => 3,
            Dimension::XYM | Dimension::XYZM => 4,
        }
    }

    pub fn has_z(&self) -> bool {
        matches!(self, Dimension::XYZ | Dimension::XYZM)
    }

    pub fn has_m(&self) -> bool {
        matches!(self, Dimension::XYM | Dimension::XYZM)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn m_uses_the_fourth_slot() {
        let dimension = Dimension::from_flags(false, true);
        assert_eq!(dimension, Dimension::XYM);
        assert_eq!(dimension.slots(), &[X, Y, M]);
        assert_eq!(dimension.axis_count(), 4);
    }

    #[test]
    fn axis_count_round_trip() {
        for dimension in [Dimension::XY, Dimension::XYZ, Dimension::XYZM] {
            assert_eq!(Dimension::from_axis_count(dimension.axis_count()), dimension);
        }
    }
}
