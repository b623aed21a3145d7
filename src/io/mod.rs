//! Readers and writers for the well-known text and binary geometry encodings, plus
//! interoperability with the `geo` crate.

pub mod display;
pub mod geo;
pub mod wkb;
pub mod wkt;

/// The deepest collection nesting either reader accepts. Input past this is malformed rather than
/// recursed into.
pub(crate) const MAX_NESTING: usize = 256;
