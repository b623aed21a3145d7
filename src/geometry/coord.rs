use crate::error::{Result, WkxError};

/// Index of the X ordinate.
pub const X: usize = 0;
/// Index of the Y ordinate.
pub const Y: usize = 1;
/// Index of the Z ordinate.
pub const Z: usize = 2;
/// Index of the M ordinate. M always lives in the fourth slot, even when Z is absent.
pub const M: usize = 3;

/// An ordered list of vertices stored as interleaved ordinates.
///
/// Every vertex has exactly `axis_count` ordinates. Ordinates that are not present in the source
/// data are NaN. A sequence of length zero is the EMPTY representation.
#[derive(Debug, Clone)]
pub struct CoordinateSequence {
    axis_count: usize,
    coords: Vec<f64>,
}

impl CoordinateSequence {
    /// An empty sequence.
    pub fn new(axis_count: usize) -> Self {
        Self {
            axis_count,
            coords: vec![],
        }
    }

    /// An empty sequence with room for `capacity` vertices.
    pub fn with_capacity(axis_count: usize, capacity: usize) -> Self {
        Self {
            axis_count,
            coords: Vec::with_capacity(capacity * axis_count),
        }
    }

    /// A sequence of `size` vertices with every ordinate set to NaN, to be filled in place.
    pub fn filled(size: usize, axis_count: usize) -> Self {
        Self {
            axis_count,
            coords: vec![f64::NAN; size * axis_count],
        }
    }

    /// Wrap interleaved ordinates.
    ///
    /// Fails when the number of ordinates is not a multiple of `axis_count`.
    pub fn try_from_vec(axis_count: usize, coords: Vec<f64>) -> Result<Self> {
        if axis_count == 0 || coords.len() % axis_count != 0 {
            return Err(WkxError::IncorrectGeometryType(
                format!(
                    "{} ordinates cannot be split into vertices of {} axes",
                    coords.len(),
                    axis_count
                )
                .into(),
            ));
        }
        Ok(Self { axis_count, coords })
    }

    pub fn axis_count(&self) -> usize {
        self.axis_count
    }

    /// The number of vertices.
    pub fn len(&self) -> usize {
        self.coords.len() / self.axis_count
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Access one ordinate. Axes beyond the axis count read as NaN.
    ///
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize, axis: usize) -> f64 {
        if axis < self.axis_count {
            self.coords[index * self.axis_count + axis]
        } else {
            f64::NAN
        }
    }

    /// Overwrite one ordinate. Writes to axes beyond the axis count are ignored.
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, axis: usize, value: f64) {
        if axis < self.axis_count {
            self.coords[index * self.axis_count + axis] = value;
        }
    }

    pub fn x(&self, index: usize) -> f64 {
        self.get(index, X)
    }

    pub fn y(&self, index: usize) -> f64 {
        self.get(index, Y)
    }

    /// The ordinates of one vertex.
    pub fn vertex(&self, index: usize) -> &[f64] {
        let start = index * self.axis_count;
        &self.coords[start..start + self.axis_count]
    }

    /// Append a vertex, dropping surplus ordinates and filling missing ones with NaN.
    pub fn push_vertex(&mut self, ordinates: &[f64]) {
        for axis in 0..self.axis_count {
            self.coords
                .push(ordinates.get(axis).copied().unwrap_or(f64::NAN));
        }
    }

    pub fn vertices(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.coords.chunks_exact(self.axis_count)
    }

    /// The interleaved ordinates.
    pub fn as_slice(&self) -> &[f64] {
        &self.coords
    }

    pub fn first(&self) -> Option<&[f64]> {
        (!self.is_empty()).then(|| self.vertex(0))
    }

    pub fn last(&self) -> Option<&[f64]> {
        (!self.is_empty()).then(|| self.vertex(self.len() - 1))
    }

    /// Whether the first and last vertices share the same X and Y.
    ///
    /// An empty sequence is considered closed.
    pub fn is_closed(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => first[X] == last[X] && first[Y] == last[Y],
            _ => true,
        }
    }

    /// Copy this sequence into one with a different axis count.
    pub fn to_axis_count(&self, axis_count: usize) -> Self {
        if axis_count == self.axis_count {
            return self.clone();
        }
        let mut out = Self::with_capacity(axis_count, self.len());
        for vertex in self.vertices() {
            out.push_vertex(vertex);
        }
        out
    }
}

impl PartialEq for CoordinateSequence {
    /// Ordinate-wise equality where two NaN ordinates compare equal.
    fn eq(&self, other: &Self) -> bool {
        self.axis_count == other.axis_count
            && self.coords.len() == other.coords.len()
            && self
                .coords
                .iter()
                .zip(other.coords.iter())
                .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn push_pads_and_truncates() {
        let mut seq = CoordinateSequence::new(3);
        seq.push_vertex(&[1.0, 2.0]);
        seq.push_vertex(&[3.0, 4.0, 5.0, 6.0]);

        assert_eq!(seq.len(), 2);
        assert!(seq.get(0, Z).is_nan());
        assert_eq!(seq.vertex(1), &[3.0, 4.0, 5.0]);
        assert!(seq.get(1, M).is_nan());
    }

    #[test]
    fn nan_ordinates_compare_equal() {
        let a = CoordinateSequence::try_from_vec(3, vec![1.0, 2.0, f64::NAN]).unwrap();
        let b = CoordinateSequence::try_from_vec(3, vec![1.0, 2.0, f64::NAN]).unwrap();
        let c = CoordinateSequence::try_from_vec(3, vec![1.0, 2.0, 0.0]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn rejects_ragged_ordinates() {
        assert!(CoordinateSequence::try_from_vec(2, vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn closed() {
        let open = CoordinateSequence::try_from_vec(2, vec![0., 0., 1., 1.]).unwrap();
        let closed = CoordinateSequence::try_from_vec(2, vec![0., 0., 1., 1., 0., 0.]).unwrap();
        assert!(!open.is_closed());
        assert!(closed.is_closed());
        assert!(CoordinateSequence::new(2).is_closed());
    }

    #[test]
    fn change_axis_count() {
        let seq = CoordinateSequence::try_from_vec(2, vec![0., 1., 2., 3.]).unwrap();
        let seq4 = seq.to_axis_count(4);
        assert_eq!(seq4.axis_count(), 4);
        assert_eq!(seq4.x(1), 2.);
        assert!(seq4.get(1, M).is_nan());
        assert_eq!(seq4.to_axis_count(2), seq);
    }
}
