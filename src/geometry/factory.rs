use serde::{Deserialize, Serialize};

use crate::error::{Result, WkxError};
use crate::geometry::coord::CoordinateSequence;
use crate::geometry::precision::PrecisionModel;
use crate::geometry::scalar::*;

/// Builds geometries with a fixed axis count, SRID and precision.
///
/// Every part handed to a factory is normalised to the factory's axis count: surplus ordinates
/// are dropped and missing ones are filled with NaN. Factories are cheap to copy and are never
/// implicitly defaulted; callers construct one at their own boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryFactory {
    srid: i32,
    axis_count: usize,
    scale_xy: f64,
    scale_z: f64,
}

fn clamp_axis_count(axis_count: usize) -> usize {
    axis_count.clamp(2, 4)
}

impl GeometryFactory {
    /// A factory with full double precision.
    pub fn floating(srid: i32, axis_count: usize) -> Self {
        Self::fixed(srid, axis_count, 0.0, 0.0)
    }

    /// A factory with fixed XY and Z scales. A scale of `0` means floating.
    pub fn fixed(srid: i32, axis_count: usize, scale_xy: f64, scale_z: f64) -> Self {
        Self {
            srid,
            axis_count: clamp_axis_count(axis_count),
            scale_xy,
            scale_z,
        }
    }

    /// A new factory with all four settings replaced.
    pub fn derive(&self, srid: i32, axis_count: usize, scale_xy: f64, scale_z: f64) -> Self {
        Self::fixed(srid, axis_count, scale_xy, scale_z)
    }

    pub fn with_srid(&self, srid: i32) -> Self {
        self.derive(srid, self.axis_count, self.scale_xy, self.scale_z)
    }

    pub fn with_axis_count(&self, axis_count: usize) -> Self {
        self.derive(self.srid, axis_count, self.scale_xy, self.scale_z)
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn axis_count(&self) -> usize {
        self.axis_count
    }

    pub fn scale_xy(&self) -> f64 {
        self.scale_xy
    }

    pub fn scale_z(&self) -> f64 {
        self.scale_z
    }

    /// The precision applied to X and Y.
    pub fn precision_model(&self) -> PrecisionModel {
        PrecisionModel::from_scale(self.scale_xy)
    }

    /// The precision applied to Z.
    pub fn precision_model_z(&self) -> PrecisionModel {
        PrecisionModel::from_scale(self.scale_z)
    }

    /// A sequence of `size` NaN vertices to be filled in place.
    pub fn create_sequence(&self, size: usize, axis_count: usize) -> CoordinateSequence {
        CoordinateSequence::filled(size, axis_count)
    }

    fn normalize(&self, coords: CoordinateSequence) -> CoordinateSequence {
        if coords.axis_count() == self.axis_count {
            coords
        } else {
            coords.to_axis_count(self.axis_count)
        }
    }

    /// Build a point from a sequence of zero (EMPTY) or one vertex.
    pub fn point(&self, coords: CoordinateSequence) -> Result<Point> {
        if coords.len() > 1 {
            return Err(WkxError::IncorrectGeometryType(
                format!("a point holds at most one vertex, got {}", coords.len()).into(),
            ));
        }
        Ok(Point {
            factory: *self,
            coords: self.normalize(coords),
        })
    }

    pub fn empty_point(&self) -> Point {
        Point {
            factory: *self,
            coords: CoordinateSequence::new(self.axis_count),
        }
    }

    pub fn line_string(&self, coords: CoordinateSequence) -> LineString {
        LineString {
            factory: *self,
            coords: self.normalize(coords),
        }
    }

    pub fn linear_ring(&self, coords: CoordinateSequence) -> LinearRing {
        LinearRing {
            factory: *self,
            coords: self.normalize(coords),
        }
    }

    /// Build a polygon from its exterior ring followed by its holes. No rings is EMPTY.
    pub fn polygon(&self, rings: Vec<LinearRing>) -> Polygon {
        Polygon {
            factory: *self,
            rings: rings
                .into_iter()
                .map(|ring| self.linear_ring(ring.coords))
                .collect(),
        }
    }

    pub fn multi_point(&self, points: Vec<Point>) -> MultiPoint {
        MultiPoint {
            factory: *self,
            points: points
                .into_iter()
                .map(|point| Point {
                    factory: *self,
                    coords: self.normalize(point.coords),
                })
                .collect(),
        }
    }

    pub fn multi_line_string(&self, lines: Vec<LineString>) -> MultiLineString {
        MultiLineString {
            factory: *self,
            lines: lines
                .into_iter()
                .map(|line| self.line_string(line.coords))
                .collect(),
        }
    }

    pub fn multi_polygon(&self, polygons: Vec<Polygon>) -> MultiPolygon {
        MultiPolygon {
            factory: *self,
            polygons: polygons
                .into_iter()
                .map(|polygon| self.polygon(polygon.rings))
                .collect(),
        }
    }

    pub fn geometry_collection(&self, geometries: Vec<Geometry>) -> GeometryCollection {
        GeometryCollection {
            factory: *self,
            geometries: geometries
                .into_iter()
                .map(|geometry| self.rehome(geometry))
                .collect(),
        }
    }

    /// Copy a geometry onto this factory.
    pub fn geometry(&self, geometry: &Geometry) -> Geometry {
        self.rehome(geometry.clone())
    }

    fn rehome(&self, geometry: Geometry) -> Geometry {
        match geometry {
            Geometry::Point(g) => Geometry::Point(Point {
                factory: *self,
                coords: self.normalize(g.coords),
            }),
            Geometry::LineString(g) => Geometry::LineString(self.line_string(g.coords)),
            Geometry::LinearRing(g) => Geometry::LinearRing(self.linear_ring(g.coords)),
            Geometry::Polygon(g) => Geometry::Polygon(self.polygon(g.rings)),
            Geometry::MultiPoint(g) => Geometry::MultiPoint(self.multi_point(g.points)),
            Geometry::MultiLineString(g) => {
                Geometry::MultiLineString(self.multi_line_string(g.lines))
            }
            Geometry::MultiPolygon(g) => Geometry::MultiPolygon(self.multi_polygon(g.polygons)),
            Geometry::GeometryCollection(g) => {
                Geometry::GeometryCollection(self.geometry_collection(g.geometries))
            }
        }
    }
}
