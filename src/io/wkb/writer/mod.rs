//! Encoding geometries as WKB and EWKB.

use std::io::Write;

use byteorder::{BigEndian, LittleEndian};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::Geometry;
use crate::io::wkb::common::Endianness;
use crate::io::wkb::hex::bytes_to_hex;

pub use geometry::{geometry_wkb_size, line_string_wkb_size, point_wkb_size, polygon_wkb_size};

use geometry::WkbEncoder;

mod geometry;

/// Options for the WKB writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WkbWriterOptions {
    pub byte_order: Endianness,

    /// Set the EWKB SRID flag and write the SRID when the geometry has a non-zero SRID.
    pub include_srid: bool,
}

impl WkbWriterOptions {
    pub fn new(byte_order: Endianness, include_srid: bool) -> Self {
        Self {
            byte_order,
            include_srid,
        }
    }
}

/// Writes [`Geometry`] values as WKB.
///
/// Three-axis geometries set the EWKB Z flag and four-axis geometries set both the Z and M
/// flags. An empty point is written with NaN ordinates.
#[derive(Debug, Clone, Default)]
pub struct WkbWriter {
    options: WkbWriterOptions,
}

impl WkbWriter {
    pub fn new(options: WkbWriterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WkbWriterOptions {
        &self.options
    }

    /// Encode into a buffer sized by [`geometry_wkb_size`].
    ///
    /// Fails only when a count does not fit in 32 bits.
    pub fn write(&self, geometry: &Geometry) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(geometry_wkb_size(geometry, self.options.include_srid));
        self.write_to(geometry, &mut buf)?;
        Ok(buf)
    }

    /// Write into any byte sink.
    pub fn write_to<W: Write>(&self, geometry: &Geometry, mut writer: W) -> Result<()> {
        let srid = (self.options.include_srid && geometry.srid() > 0).then(|| geometry.srid());
        match self.options.byte_order {
            Endianness::BigEndian => {
                WkbEncoder::<BigEndian, W>::new(&mut writer, Endianness::BigEndian)
                    .geometry(geometry, srid)
            }
            Endianness::LittleEndian => {
                WkbEncoder::<LittleEndian, W>::new(&mut writer, Endianness::LittleEndian)
                    .geometry(geometry, srid)
            }
        }
    }

    /// Write as upper-case hex.
    pub fn write_hex(&self, geometry: &Geometry) -> Result<String> {
        Ok(bytes_to_hex(&self.write(geometry)?))
    }
}

/// Write a geometry as little-endian WKB without an SRID.
pub fn to_wkb(geometry: &Geometry) -> Result<Vec<u8>> {
    WkbWriter::default().write(geometry)
}
