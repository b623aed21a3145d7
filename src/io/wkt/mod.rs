//! Reading and writing Well-Known Text, including the `SRID=<int>;` prefix of EWKT.

pub use reader::{read_wkt, WktParser, WktReaderOptions};
pub use writer::{to_wkt, WktWriter, WktWriterOptions};

use crate::geometry::Dimension;

mod reader;
mod writer;

/// The suffix written after the type keyword.
pub(crate) fn dimension_suffix(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::XY => "",
        Dimension::XYZ => " Z",
        Dimension::XYM => " M",
        Dimension::XYZM => " ZM",
    }
}
