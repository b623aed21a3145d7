//! The in-memory geometry model shared by the WKT and WKB codecs.

pub use coord::{CoordinateSequence, M, X, Y, Z};
pub use dimension::Dimension;
pub use factory::GeometryFactory;
pub use precision::PrecisionModel;
pub use scalar::{
    Geometry, GeometryCollection, GeometryType, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};

mod coord;
mod dimension;
mod factory;
mod precision;
mod scalar;
