//! The two structural defects the WKB reader repairs instead of rejecting.

use crate::geometry::CoordinateSequence;

/// Whether a line string needs [`extend_line`]: exactly one vertex.
pub(super) fn is_degenerate_line(coords: &CoordinateSequence) -> bool {
    coords.len() == 1
}

/// Repeat the last vertex of a one-vertex line string.
pub(super) fn extend_line(coords: &mut CoordinateSequence) {
    if let Some(last) = coords.last().map(<[f64]>::to_vec) {
        coords.push_vertex(&last);
    }
}

/// Whether a non-empty ring is open or too short to enclose an area.
pub(super) fn is_invalid_ring(coords: &CoordinateSequence) -> bool {
    !coords.is_empty() && (coords.len() <= 3 || !coords.is_closed())
}

/// Close a ring and pad it to at least four vertices by repeating its first vertex.
///
/// Empty rings are left alone.
pub(super) fn close_ring(coords: &mut CoordinateSequence) {
    let Some(first) = coords.first().map(<[f64]>::to_vec) else {
        return;
    };
    let size = if coords.len() <= 3 {
        4
    } else if !coords.is_closed() {
        coords.len() + 1
    } else {
        coords.len()
    };
    while coords.len() < size {
        coords.push_vertex(&first);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn seq(coords: Vec<f64>) -> CoordinateSequence {
        CoordinateSequence::try_from_vec(2, coords).unwrap()
    }

    #[test]
    fn extends_single_point() {
        let mut coords = seq(vec![1., 2.]);
        assert!(is_degenerate_line(&coords));
        extend_line(&mut coords);
        assert_eq!(coords, seq(vec![1., 2., 1., 2.]));
        assert!(!is_degenerate_line(&coords));
    }

    #[test]
    fn closes_open_ring() {
        let mut coords = seq(vec![0., 0., 1., 0., 1., 1., 0., 1.]);
        assert!(is_invalid_ring(&coords));
        close_ring(&mut coords);
        assert_eq!(coords.len(), 5);
        assert!(coords.is_closed());
    }

    #[test]
    fn pads_short_ring() {
        let mut coords = seq(vec![0., 0., 1., 0., 1., 1.]);
        close_ring(&mut coords);
        assert_eq!(coords, seq(vec![0., 0., 1., 0., 1., 1., 0., 0.]));

        let mut coords = seq(vec![0., 0., 1., 1., 0., 0.]);
        assert!(is_invalid_ring(&coords));
        close_ring(&mut coords);
        assert_eq!(coords.len(), 4);
        assert!(coords.is_closed());
    }

    #[test]
    fn leaves_valid_and_empty_rings() {
        let valid = seq(vec![0., 0., 1., 0., 1., 1., 0., 0.]);
        assert!(!is_invalid_ring(&valid));
        let mut empty = CoordinateSequence::new(2);
        assert!(!is_invalid_ring(&empty));
        close_ring(&mut empty);
        assert!(empty.is_empty());
    }
}
