//! Reading and writing geometries as Well-Known Text (WKT) and Well-Known Binary (WKB),
//! including the PostGIS extensions EWKT and EWKB.
//!
//! Geometries are built by a [`GeometryFactory`](geometry::GeometryFactory), which carries the
//! SRID, the number of axes per vertex and the precision model of everything it creates.
//!
//! ```
//! use geo_wkx::geometry::GeometryFactory;
//! use geo_wkx::io::wkb::{WkbReader, WkbWriter};
//! use geo_wkx::io::wkt::{read_wkt, to_wkt};
//!
//! let factory = GeometryFactory::floating(0, 2);
//! let geometry = read_wkt("POINT Z (1 2 3)", &factory).unwrap().unwrap();
//! assert_eq!(geometry.axis_count(), 3);
//!
//! let bytes = WkbWriter::default().write(&geometry).unwrap();
//! let decoded = WkbReader::new(factory, Default::default()).read(&bytes).unwrap();
//! assert_eq!(to_wkt(&decoded), "POINT Z (1 2 3)");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use error::{Result, WkxError};
pub use geometry::{Geometry, GeometryFactory};

pub mod error;
pub mod geometry;
pub mod io;
pub mod number;
#[cfg(test)]
pub(crate) mod test;
