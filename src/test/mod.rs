//! Fixtures shared by the codec tests.

pub(crate) mod multipoint;
pub(crate) mod multipolygon;
pub(crate) mod polygon;
