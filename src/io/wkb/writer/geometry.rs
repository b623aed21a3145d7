use std::io::Write;

use byteorder::{ByteOrder, WriteBytesExt};

use crate::error::{Result, WkxError};
use crate::geometry::{CoordinateSequence, Dimension, Geometry, Point, Polygon};
use crate::io::wkb::common::{Endianness, TypeWord, WKBType};

const HEADER_BYTES: usize = 1 + 4;
const COUNT_BYTES: usize = 4;
const SRID_BYTES: usize = 4;

/// The byte length of a Point, which always carries one vertex.
pub fn point_wkb_size(axis_count: usize) -> usize {
    HEADER_BYTES + axis_count * 8
}

/// The byte length of a LineString or LinearRing.
pub fn line_string_wkb_size(coords: &CoordinateSequence) -> usize {
    HEADER_BYTES + sequence_size(coords)
}

/// The byte length of a Polygon.
pub fn polygon_wkb_size(polygon: &Polygon) -> usize {
    HEADER_BYTES
        + COUNT_BYTES
        + polygon
            .rings()
            .iter()
            .map(|ring| sequence_size(ring.coords()))
            .sum::<usize>()
}

fn sequence_size(coords: &CoordinateSequence) -> usize {
    COUNT_BYTES + coords.len() * coords.axis_count() * 8
}

/// The byte length of a geometry encoded as EWKB. Only the outermost geometry carries an SRID.
pub fn geometry_wkb_size(geometry: &Geometry, include_srid: bool) -> usize {
    let srid_bytes = if include_srid && geometry.srid() > 0 {
        SRID_BYTES
    } else {
        0
    };
    let size = match geometry {
        Geometry::Point(g) => point_wkb_size(g.axis_count()),
        Geometry::LineString(g) => line_string_wkb_size(g.coords()),
        Geometry::LinearRing(g) => line_string_wkb_size(g.coords()),
        Geometry::Polygon(g) => polygon_wkb_size(g),
        Geometry::MultiPoint(g) => {
            HEADER_BYTES + COUNT_BYTES + g.points().len() * point_wkb_size(g.axis_count())
        }
        Geometry::MultiLineString(g) => {
            HEADER_BYTES
                + COUNT_BYTES
                + g.lines()
                    .iter()
                    .map(|line| line_string_wkb_size(line.coords()))
                    .sum::<usize>()
        }
        Geometry::MultiPolygon(g) => {
            HEADER_BYTES + COUNT_BYTES + g.polygons().iter().map(polygon_wkb_size).sum::<usize>()
        }
        Geometry::GeometryCollection(g) => {
            HEADER_BYTES
                + COUNT_BYTES
                + g.geometries()
                    .iter()
                    .map(|member| geometry_wkb_size(member, false))
                    .sum::<usize>()
        }
    };
    size + srid_bytes
}

/// A vertex, ring or part count as written in WKB.
fn wkb_count(count: usize) -> Result<u32> {
    u32::try_from(count).map_err(|_| {
        WkxError::IncorrectGeometryType(
            format!("{} elements do not fit in a WKB count", count).into(),
        )
    })
}

/// Writes EWKB in byte order `B`, whose marker is `byte_order`.
pub(super) struct WkbEncoder<'a, B: ByteOrder, W: Write> {
    writer: &'a mut W,
    byte_order: Endianness,
    _order: std::marker::PhantomData<B>,
}

impl<'a, B: ByteOrder, W: Write> WkbEncoder<'a, B, W> {
    pub fn new(writer: &'a mut W, byte_order: Endianness) -> Self {
        Self {
            writer,
            byte_order,
            _order: std::marker::PhantomData,
        }
    }

    fn header(
        &mut self,
        geometry_type: WKBType,
        axis_count: usize,
        srid: Option<i32>,
    ) -> Result<()> {
        let word = TypeWord {
            geometry_type,
            dimension: Dimension::from_axis_count(axis_count),
            has_srid: srid.is_some(),
        };
        self.writer.write_u8(self.byte_order.into())?;
        self.writer.write_u32::<B>(word.encode())?;
        if let Some(srid) = srid {
            self.writer.write_u32::<B>(srid as u32)?;
        }
        Ok(())
    }

    fn count(&mut self, count: usize) -> Result<()> {
        self.writer.write_u32::<B>(wkb_count(count)?)?;
        Ok(())
    }

    fn sequence(&mut self, coords: &CoordinateSequence) -> Result<()> {
        self.count(coords.len())?;
        for value in coords.as_slice() {
            self.writer.write_f64::<B>(*value)?;
        }
        Ok(())
    }

    fn point(&mut self, point: &Point, srid: Option<i32>) -> Result<()> {
        self.header(WKBType::Point, point.axis_count(), srid)?;
        if point.is_empty() {
            for _ in 0..point.axis_count() {
                self.writer.write_f64::<B>(f64::NAN)?;
            }
        } else {
            for value in point.coords().vertex(0) {
                self.writer.write_f64::<B>(*value)?;
            }
        }
        Ok(())
    }

    fn line_string(&mut self, coords: &CoordinateSequence, srid: Option<i32>) -> Result<()> {
        self.header(WKBType::LineString, coords.axis_count(), srid)?;
        self.sequence(coords)
    }

    fn polygon(&mut self, polygon: &Polygon, srid: Option<i32>) -> Result<()> {
        self.header(WKBType::Polygon, polygon.axis_count(), srid)?;
        self.count(polygon.rings().len())?;
        for ring in polygon.rings() {
            self.sequence(ring.coords())?;
        }
        Ok(())
    }

    /// Write a geometry and its parts. Parts never repeat the SRID.
    pub fn geometry(&mut self, geometry: &Geometry, srid: Option<i32>) -> Result<()> {
        match geometry {
            Geometry::Point(g) => self.point(g, srid),
            Geometry::LineString(g) => self.line_string(g.coords(), srid),
            Geometry::LinearRing(g) => self.line_string(g.coords(), srid),
            Geometry::Polygon(g) => self.polygon(g, srid),
            Geometry::MultiPoint(g) => {
                self.header(WKBType::MultiPoint, g.axis_count(), srid)?;
                self.count(g.points().len())?;
                g.points().iter().try_for_each(|point| self.point(point, None))
            }
            Geometry::MultiLineString(g) => {
                self.header(WKBType::MultiLineString, g.axis_count(), srid)?;
                self.count(g.lines().len())?;
                g.lines()
                    .iter()
                    .try_for_each(|line| self.line_string(line.coords(), None))
            }
            Geometry::MultiPolygon(g) => {
                self.header(WKBType::MultiPolygon, g.axis_count(), srid)?;
                self.count(g.polygons().len())?;
                g.polygons()
                    .iter()
                    .try_for_each(|polygon| self.polygon(polygon, None))
            }
            Geometry::GeometryCollection(g) => {
                self.header(WKBType::GeometryCollection, g.axis_count(), srid)?;
                self.count(g.geometries().len())?;
                g.geometries()
                    .iter()
                    .try_for_each(|member| self.geometry(member, None))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn count_limit() {
        assert_eq!(wkb_count(3).unwrap(), 3);
        assert_eq!(wkb_count(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn count_overflow_is_an_error() {
        let err = wkb_count(u32::MAX as usize + 1).unwrap_err();
        assert!(matches!(err, WkxError::IncorrectGeometryType(_)));
    }
}
