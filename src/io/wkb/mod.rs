//! Reading and writing Well-Known Binary, including the Z, M and SRID flags of PostGIS EWKB.

pub use common::{Endianness, TypeWord, WKBType, M_FLAG, SRID_FLAG, Z_FLAG};
pub use hex::{bytes_to_hex, hex_to_bytes};
pub use reader::{read_wkb, WkbReader, WkbReaderOptions};
pub use writer::{
    geometry_wkb_size, line_string_wkb_size, point_wkb_size, polygon_wkb_size, to_wkb, WkbWriter,
    WkbWriterOptions,
};

mod common;
mod hex;
mod reader;
mod writer;
