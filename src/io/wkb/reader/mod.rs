//! Decoding WKB and EWKB byte streams.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WkxError};
use crate::geometry::{
    CoordinateSequence, Dimension, Geometry, GeometryFactory, LineString, LinearRing, Point,
    Polygon, X, Y,
};
use crate::io::wkb::common::{Endianness, TypeWord, WKBType};
use crate::io::wkb::hex::hex_to_bytes;
use crate::io::MAX_NESTING;

use source::ByteSource;

mod repair;
mod source;

/// Counts read from the stream are untrusted; never reserve more than this many vertices or
/// parts up front.
const MAX_PREALLOCATION: usize = 4096;

/// Options for the WKB reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WkbReaderOptions {
    /// Reject open or short rings, one-point line strings and unknown byte order markers instead
    /// of repairing them.
    pub strict: bool,

    /// Always build geometries with the factory's axis count, as for the WKT parser.
    pub use_factory_axis_count: bool,
}

impl WkbReaderOptions {
    pub fn new(strict: bool, use_factory_axis_count: bool) -> Self {
        Self {
            strict,
            use_factory_axis_count,
        }
    }
}

/// Reads [`Geometry`] values from WKB.
///
/// A reader keeps a scratch buffer for vertex ordinates between reads, so give each thread its
/// own instance.
#[derive(Debug, Clone)]
pub struct WkbReader {
    factory: GeometryFactory,
    options: WkbReaderOptions,
    ord_values: Vec<f64>,
}

impl WkbReader {
    pub fn new(factory: GeometryFactory, options: WkbReaderOptions) -> Self {
        Self {
            factory,
            options,
            ord_values: vec![],
        }
    }

    pub fn factory(&self) -> &GeometryFactory {
        &self.factory
    }

    pub fn options(&self) -> &WkbReaderOptions {
        &self.options
    }

    /// Read one geometry from the start of `bytes`.
    pub fn read(&mut self, bytes: &[u8]) -> Result<Geometry> {
        self.read_from(bytes)
    }

    /// Read one geometry from a byte stream, consuming only the bytes it occupies.
    pub fn read_from<R: Read>(&mut self, reader: R) -> Result<Geometry> {
        let mut source = ByteSource::new(reader);
        let factory = self.factory;
        self.read_geometry(&mut source, factory, 0)
    }

    /// Read one geometry from hex-encoded WKB.
    pub fn read_hex(&mut self, hex: &str) -> Result<Geometry> {
        let bytes = hex_to_bytes(hex)?;
        self.read(&bytes)
    }

    fn read_byte_order<R: Read>(&self, source: &mut ByteSource<R>) -> Result<()> {
        let position = source.position();
        let marker = source.read_u8("the byte order")?;
        match Endianness::try_from(marker) {
            Ok(byte_order) => source.set_byte_order(byte_order),
            Err(marker) if self.options.strict => {
                return Err(WkxError::malformed(
                    position,
                    format!("unknown byte order marker {}", marker),
                ))
            }
            Err(marker) => {
                tracing::debug!(
                    position,
                    marker,
                    byte_order = ?source.byte_order(),
                    "Unknown byte order marker, keeping the current byte order"
                );
            }
        }
        Ok(())
    }

    fn read_geometry<R: Read>(
        &mut self,
        source: &mut ByteSource<R>,
        factory: GeometryFactory,
        depth: usize,
    ) -> Result<Geometry> {
        if depth > MAX_NESTING {
            return Err(WkxError::malformed(
                source.position(),
                "geometry nesting too deep",
            ));
        }
        self.read_byte_order(source)?;
        let header = TypeWord::decode(source.read_u32("the geometry type")?)?;

        let mut factory = factory;
        if header.has_srid {
            let srid = source.read_u32("the SRID")? as i32;
            if factory.srid() == 0 {
                factory = factory.with_srid(srid);
            }
        }
        let declared = header.dimension.axis_count();
        if !self.options.use_factory_axis_count && declared != factory.axis_count() {
            tracing::trace!(
                declared,
                factory_axis_count = factory.axis_count(),
                "Deriving factory for declared dimension"
            );
            factory = factory.with_axis_count(declared);
        }

        let dimension = header.dimension;
        let geometry = match header.geometry_type {
            WKBType::Point => self.read_point(source, &factory, dimension)?.into(),
            WKBType::LineString => self.read_line_string(source, &factory, dimension)?.into(),
            WKBType::Polygon => self.read_polygon(source, &factory, dimension)?.into(),
            WKBType::MultiPoint => {
                let points = self.read_parts(source, &factory, depth, |geometry| match geometry {
                    Geometry::Point(point) => Ok(point),
                    other => Err(other),
                })?;
                factory.multi_point(points).into()
            }
            WKBType::MultiLineString => {
                let lines = self.read_parts(source, &factory, depth, |geometry| match geometry {
                    Geometry::LineString(line) => Ok(line),
                    other => Err(other),
                })?;
                factory.multi_line_string(lines).into()
            }
            WKBType::MultiPolygon => {
                let polygons = self.read_parts(source, &factory, depth, |geometry| match geometry {
                    Geometry::Polygon(polygon) => Ok(polygon),
                    other => Err(other),
                })?;
                factory.multi_polygon(polygons).into()
            }
            WKBType::GeometryCollection => {
                let geometries = self.read_parts(source, &factory, depth, Ok)?;
                factory.geometry_collection(geometries).into()
            }
        };
        Ok(geometry)
    }

    /// A count followed by that many complete geometries, each checked by `accept`.
    fn read_parts<R: Read, T>(
        &mut self,
        source: &mut ByteSource<R>,
        factory: &GeometryFactory,
        depth: usize,
        accept: impl Fn(Geometry) -> std::result::Result<T, Geometry>,
    ) -> Result<Vec<T>> {
        let count = source.read_u32("the number of parts")? as usize;
        let mut parts = Vec::with_capacity(count.min(MAX_PREALLOCATION));
        for _ in 0..count {
            let position = source.position();
            let geometry = self.read_geometry(source, *factory, depth + 1)?;
            let part = accept(geometry).map_err(|other| {
                WkxError::malformed(
                    position,
                    format!(
                        "unexpected {} inside a multi-geometry",
                        other.geometry_type().wkt_keyword()
                    ),
                )
            })?;
            parts.push(part);
        }
        Ok(parts)
    }

    /// `count` vertices of `dimension`, with X and Y made precise.
    fn read_coordinates<R: Read>(
        &mut self,
        source: &mut ByteSource<R>,
        factory: &GeometryFactory,
        dimension: Dimension,
        count: usize,
    ) -> Result<CoordinateSequence> {
        let slots = dimension.slots();
        let width = slots.iter().max().map_or(0, |slot| slot + 1);
        if self.ord_values.len() < width {
            self.ord_values.resize(width, f64::NAN);
        }

        let precision = factory.precision_model();
        let mut coords =
            CoordinateSequence::with_capacity(factory.axis_count(), count.min(MAX_PREALLOCATION));
        for _ in 0..count {
            self.ord_values.fill(f64::NAN);
            for slot in slots {
                self.ord_values[*slot] = source.read_f64()?;
            }
            self.ord_values[X] = precision.make_precise(self.ord_values[X]);
            self.ord_values[Y] = precision.make_precise(self.ord_values[Y]);
            coords.push_vertex(&self.ord_values);
        }
        Ok(coords)
    }

    /// A point is one vertex with no count; all-NaN ordinates mean EMPTY.
    fn read_point<R: Read>(
        &mut self,
        source: &mut ByteSource<R>,
        factory: &GeometryFactory,
        dimension: Dimension,
    ) -> Result<Point> {
        let coords = self.read_coordinates(source, factory, dimension, 1)?;
        if coords.vertex(0).iter().all(|value| value.is_nan()) {
            Ok(factory.empty_point())
        } else {
            factory.point(coords)
        }
    }

    fn read_line_string<R: Read>(
        &mut self,
        source: &mut ByteSource<R>,
        factory: &GeometryFactory,
        dimension: Dimension,
    ) -> Result<LineString> {
        let position = source.position();
        let count = source.read_u32("the number of points")? as usize;
        let mut coords = self.read_coordinates(source, factory, dimension, count)?;
        if repair::is_degenerate_line(&coords) {
            if self.options.strict {
                return Err(WkxError::malformed(
                    position,
                    "line string has a single point",
                ));
            }
            tracing::debug!(position, "Extending single-point line string");
            repair::extend_line(&mut coords);
        }
        Ok(factory.line_string(coords))
    }

    fn read_linear_ring<R: Read>(
        &mut self,
        source: &mut ByteSource<R>,
        factory: &GeometryFactory,
        dimension: Dimension,
    ) -> Result<LinearRing> {
        let position = source.position();
        let count = source.read_u32("the number of points")? as usize;
        let mut coords = self.read_coordinates(source, factory, dimension, count)?;
        if repair::is_invalid_ring(&coords) {
            if self.options.strict {
                return Err(WkxError::malformed(
                    position,
                    format!("ring of {} points is not closed or too short", coords.len()),
                ));
            }
            tracing::debug!(position, points = coords.len(), "Closing invalid ring");
            repair::close_ring(&mut coords);
        }
        Ok(factory.linear_ring(coords))
    }

    fn read_polygon<R: Read>(
        &mut self,
        source: &mut ByteSource<R>,
        factory: &GeometryFactory,
        dimension: Dimension,
    ) -> Result<Polygon> {
        let count = source.read_u32("the number of rings")? as usize;
        let mut rings = Vec::with_capacity(count.min(MAX_PREALLOCATION));
        for _ in 0..count {
            rings.push(self.read_linear_ring(source, factory, dimension)?);
        }
        Ok(factory.polygon(rings))
    }
}

/// Read WKB with default options.
pub fn read_wkb(bytes: &[u8], factory: &GeometryFactory) -> Result<Geometry> {
    WkbReader::new(*factory, Default::default()).read(bytes)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{M, Z};
    use approx::assert_relative_eq;

    fn xy() -> GeometryFactory {
        GeometryFactory::floating(0, 2)
    }

    fn read_hex(hex: &str) -> Result<Geometry> {
        WkbReader::new(xy(), Default::default()).read_hex(hex)
    }

    fn strict_hex(hex: &str) -> Result<Geometry> {
        WkbReader::new(xy(), WkbReaderOptions::new(true, false)).read_hex(hex)
    }

    #[test]
    fn point() {
        let geometry = read_hex("0101000000000000000000F03F0000000000000040").unwrap();
        let Geometry::Point(point) = geometry else {
            panic!("expected a point");
        };
        assert_eq!(point.x(), Some(1.0));
        assert_eq!(point.y(), Some(2.0));
        assert_eq!(point.srid(), 0);
    }

    #[test]
    fn big_endian_point() {
        let geometry = read_hex("00000000013FF00000000000004000000000000000").unwrap();
        let Geometry::Point(point) = geometry else {
            panic!("expected a point");
        };
        assert_eq!(point.x(), Some(1.0));
        assert_eq!(point.y(), Some(2.0));
    }

    #[test]
    fn ewkb_point_with_srid() {
        let geometry = read_hex("0101000020E6100000000000000000244000000000000034C0").unwrap();
        assert_eq!(geometry.srid(), 4326);
        let Geometry::Point(point) = geometry else {
            panic!("expected a point");
        };
        assert_eq!(point.x(), Some(10.0));
        assert_eq!(point.y(), Some(-20.0));
    }

    #[test]
    fn ewkb_dimensions() {
        let Geometry::Point(point) =
            read_hex("0101000080000000000000244000000000000034C00000000000005940").unwrap()
        else {
            panic!("expected a point");
        };
        assert_eq!(point.axis_count(), 3);
        assert_eq!(point.z(), Some(100.0));

        let Geometry::Point(point) =
            read_hex("0101000040000000000000244000000000000034C0000000000000F03F").unwrap()
        else {
            panic!("expected a point");
        };
        assert_eq!(point.axis_count(), 4);
        assert!(point.coords().get(0, Z).is_nan());
        assert_eq!(point.coords().get(0, M), 1.0);

        let Geometry::Point(point) = read_hex(
            "01010000C0000000000000244000000000000034C00000000000005940000000000000F03F",
        )
        .unwrap() else {
            panic!("expected a point");
        };
        assert_eq!(point.coords().vertex(0), &[10.0, -20.0, 100.0, 1.0]);
    }

    #[test]
    fn multi_point_with_srid_and_z() {
        let geometry = read_hex("01040000A0E6100000020000000101000080000000000000244000000000000034C0000000000000594001010000800000000000000000000000000000E0BF0000000000405940").unwrap();
        assert_eq!(geometry.srid(), 4326);
        assert_eq!(geometry.axis_count(), 3);
        let Geometry::MultiPoint(multi_point) = geometry else {
            panic!("expected a multipoint");
        };
        assert_eq!(multi_point.points().len(), 2);
        assert_eq!(multi_point.points()[1].srid(), 4326);
        assert_relative_eq!(multi_point.points()[1].z().unwrap(), 101.0);
        assert_relative_eq!(multi_point.points()[1].y().unwrap(), -0.5);
    }

    #[test]
    fn empty_point() {
        let geometry = read_hex("0101000000000000000000F87F000000000000F87F").unwrap();
        assert!(geometry.is_empty());
    }

    #[test]
    fn unknown_type_code() {
        let err = read_hex("0109000000").unwrap_err();
        assert!(matches!(err, WkxError::UnsupportedGeometryType(_)));
    }

    #[test]
    fn truncated() {
        // Two points announced, the Y of the first one is missing.
        let err = read_hex("0102000000020000000000000000000000").unwrap_err();
        assert!(matches!(err, WkxError::MalformedInput { position: 17, .. }));
        let err = read_hex("01").unwrap_err();
        assert!(matches!(err, WkxError::MalformedInput { position: 1, .. }));
    }

    #[test]
    fn nesting_limit() {
        let nested = |depth: usize| {
            let mut hex = "010700000001000000".repeat(depth);
            hex.push_str("0101000000000000000000F03F0000000000000040");
            hex
        };
        assert_eq!(read_hex(&nested(MAX_NESTING)).unwrap().num_points(), 1);

        let err = read_hex(&nested(20_000)).unwrap_err();
        assert!(err.to_string().contains("nesting too deep"));
        assert_eq!(err.position(), Some((MAX_NESTING + 1) * 9));
    }

    #[test]
    fn mixed_byte_order_parts() {
        // XDR MULTIPOINT holding an NDR POINT (1 2) and an XDR POINT (3 4).
        let hex = "000000000400000002\
                   0101000000000000000000F03F0000000000000040\
                   000000000140080000000000004010000000000000";
        let geometry = read_hex(hex).unwrap();
        assert_eq!(geometry.to_string(), "MULTIPOINT ((1 2), (3 4))");
        let Geometry::MultiPoint(multi_point) = geometry else {
            panic!("expected a multipoint");
        };
        assert_eq!(multi_point.points()[1].y(), Some(4.0));
    }

    #[test]
    fn single_point_line_string() {
        let hex = "010200000001000000000000000000F03F0000000000000040";
        let Geometry::LineString(line) = read_hex(hex).unwrap() else {
            panic!("expected a line string");
        };
        assert_eq!(line.num_points(), 2);
        assert_eq!(line.coords().vertex(0), line.coords().vertex(1));

        assert!(matches!(
            strict_hex(hex),
            Err(WkxError::MalformedInput { position: 5, .. })
        ));
    }

    /// A polygon whose single ring has three points and is not closed.
    const OPEN_TRIANGLE: &str = "01030000000100000003000000000000000000000000000000000000000000000000000040000000000000000000000000000000400000000000000040";

    #[test]
    fn ring_repair() {
        let Geometry::Polygon(polygon) = read_hex(OPEN_TRIANGLE).unwrap() else {
            panic!("expected a polygon");
        };
        let ring = polygon.exterior().unwrap();
        assert!(ring.num_points() >= 4);
        assert!(ring.is_closed());
        assert_eq!(ring.coords().first(), ring.coords().last());
    }

    #[test]
    fn ring_repair_is_an_error_when_strict() {
        let err = strict_hex(OPEN_TRIANGLE).unwrap_err();
        assert!(matches!(err, WkxError::MalformedInput { position: 9, .. }));
    }

    #[test]
    fn multi_part_type_mismatch() {
        // A MULTIPOLYGON holding a POINT.
        let err = read_hex("0106000000010000000101000000000000000000F03F0000000000000040")
            .unwrap_err();
        assert!(matches!(err, WkxError::MalformedInput { position: 9, .. }));
    }

    #[test]
    fn bad_byte_order() {
        // The marker 0x07 keeps the initial big-endian order.
        let hex = "070000000100000000000000004000000000000000";
        let Geometry::Point(point) = read_hex(hex).unwrap() else {
            panic!("expected a point");
        };
        assert_eq!(point.x(), Some(0.0));
        assert_eq!(point.y(), Some(2.0));

        let err = strict_hex(hex).unwrap_err();
        assert!(matches!(err, WkxError::MalformedInput { position: 0, .. }));
    }

    #[test]
    fn fixed_factory_axis_count() {
        let options = WkbReaderOptions::new(false, true);
        let mut reader = WkbReader::new(xy(), options);
        let geometry = reader
            .read_hex("01010000C0000000000000244000000000000034C00000000000005940000000000000F03F")
            .unwrap();
        assert_eq!(geometry.axis_count(), 2);
    }

    #[test]
    fn fixed_precision() {
        let factory = GeometryFactory::fixed(0, 2, 1.0, 0.0);
        let mut reader = WkbReader::new(factory, Default::default());
        // POINT (1.4 2.6)
        let Geometry::Point(point) = reader
            .read_hex("0101000000666666666666F63FCDCCCCCCCCCC0440")
            .unwrap()
        else {
            panic!("expected a point");
        };
        assert_eq!(point.x(), Some(1.0));
        assert_eq!(point.y(), Some(3.0));
    }

    #[test]
    fn read_from_stream_consumes_one_geometry() {
        let bytes = hex_to_bytes(
            "0101000000000000000000F03F0000000000000040010100000000000000000008400000000000001040",
        )
        .unwrap();
        let mut stream = &bytes[..];
        let mut reader = WkbReader::new(xy(), Default::default());
        let first = reader.read_from(&mut stream).unwrap();
        let second = reader.read_from(&mut stream).unwrap();
        let Geometry::Point(first) = first else {
            panic!("expected a point");
        };
        let Geometry::Point(second) = second else {
            panic!("expected a point");
        };
        assert_eq!(first.x(), Some(1.0));
        assert_eq!(second.x(), Some(3.0));
        assert!(stream.is_empty());
    }
}
