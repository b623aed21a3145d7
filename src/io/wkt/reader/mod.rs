//! Recursive-descent parsing of WKT and EWKT text.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{
    CoordinateSequence, Dimension, Geometry, GeometryFactory, LineString, LinearRing, Point,
    Polygon, X, Y,
};
use crate::io::MAX_NESTING;
use crate::number::{parse_f64, parse_i32};

use cursor::TextCursor;

mod cursor;

/// Options for the WKT parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WktReaderOptions {
    /// Always build geometries with the factory's axis count.
    ///
    /// When set, ordinates beyond the factory's axis count are read and discarded and missing
    /// ones are filled with NaN. When unset, a geometry that declares a different dimension than
    /// the factory is built with a derived factory of the declared axis count.
    pub use_factory_axis_count: bool,
}

impl WktReaderOptions {
    pub fn new(use_factory_axis_count: bool) -> Self {
        Self {
            use_factory_axis_count,
        }
    }
}

/// The state shared by every part of one tagged geometry.
#[derive(Debug, Clone, Copy)]
struct Context {
    factory: GeometryFactory,
    dimension: Dimension,
}

/// Parses WKT text into [`Geometry`] values.
///
/// ```
/// use geo_wkx::geometry::GeometryFactory;
/// use geo_wkx::io::wkt::WktParser;
///
/// let factory = GeometryFactory::floating(0, 2);
/// let geometry = WktParser::default()
///     .parse("SRID=4326;LINESTRING (0 0, 1 1, 2 2)", &factory)
///     .unwrap()
///     .unwrap();
/// assert_eq!(geometry.srid(), 4326);
/// assert_eq!(geometry.num_points(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WktParser {
    options: WktReaderOptions,
}

impl WktParser {
    pub fn new(options: WktReaderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WktReaderOptions {
        &self.options
    }

    /// Parse one geometry, with an optional `SRID=<int>;` prefix.
    ///
    /// Returns `Ok(None)` for empty or whitespace-only text. Any text after the geometry is an
    /// error.
    pub fn parse(&self, text: &str, factory: &GeometryFactory) -> Result<Option<Geometry>> {
        let mut cursor = TextCursor::new(text);
        cursor.skip_whitespace();
        if cursor.at_end() {
            return Ok(None);
        }

        let mut factory = *factory;
        if cursor.eat_prefix("SRID=") {
            let start = cursor.position();
            let token = cursor.token_until(b';');
            let srid = parse_i32(token)
                .ok_or_else(|| cursor.error_at(start, "expected an integer SRID"))?;
            cursor.expect(b';')?;
            if factory.srid() == 0 {
                factory = factory.with_srid(srid);
            }
        }

        let geometry = self.parse_tagged(&mut cursor, factory, 0)?;

        cursor.skip_whitespace();
        if !cursor.at_end() {
            return Err(cursor.unexpected("end of input"));
        }
        Ok(Some(geometry))
    }

    fn parse_tagged(
        &self,
        cursor: &mut TextCursor,
        factory: GeometryFactory,
        depth: usize,
    ) -> Result<Geometry> {
        let start = cursor.position();
        if depth > MAX_NESTING {
            return Err(cursor.error_at(start, "geometry nesting too deep"));
        }
        let keyword = cursor.keyword();
        let dimension = parse_dimension(cursor);
        let ctx = Context {
            factory: self.reconcile(factory, dimension),
            dimension,
        };

        let geometry = match keyword {
            "POINT" => self.parse_point(cursor, &ctx)?.into(),
            "LINESTRING" => self.parse_line_string(cursor, &ctx)?.into(),
            "LINEARRING" => self.parse_linear_ring(cursor, &ctx)?.into(),
            "POLYGON" => self.parse_polygon(cursor, &ctx)?.into(),
            "MULTIPOINT" => {
                let points = if cursor.eat_word("EMPTY") {
                    vec![]
                } else {
                    parse_parts(cursor, |cursor| self.parse_multi_point_member(cursor, &ctx))?
                };
                ctx.factory.multi_point(points).into()
            }
            "MULTILINESTRING" => {
                let lines = if cursor.eat_word("EMPTY") {
                    vec![]
                } else {
                    parse_parts(cursor, |cursor| self.parse_line_string(cursor, &ctx))?
                };
                ctx.factory.multi_line_string(lines).into()
            }
            "MULTIPOLYGON" => {
                let polygons = if cursor.eat_word("EMPTY") {
                    vec![]
                } else {
                    parse_parts(cursor, |cursor| self.parse_polygon(cursor, &ctx))?
                };
                ctx.factory.multi_polygon(polygons).into()
            }
            "GEOMETRYCOLLECTION" => {
                self.parse_collection(cursor, factory, dimension, depth)?
            }
            "" => return Err(cursor.unexpected("a geometry type")),
            other => {
                return Err(cursor.error_at(start, format!("unknown geometry type '{}'", other)))
            }
        };
        Ok(geometry)
    }

    /// Pick the factory for a geometry that declares `dimension`.
    fn reconcile(&self, factory: GeometryFactory, dimension: Dimension) -> GeometryFactory {
        let declared = dimension.axis_count();
        if self.options.use_factory_axis_count || declared == factory.axis_count() {
            factory
        } else {
            tracing::trace!(
                declared,
                factory_axis_count = factory.axis_count(),
                "Deriving factory for declared dimension"
            );
            factory.with_axis_count(declared)
        }
    }

    /// One vertex: up to one number per slot of the declared dimension.
    fn parse_vertex(
        &self,
        cursor: &mut TextCursor,
        ctx: &Context,
        coords: &mut CoordinateSequence,
    ) -> Result<()> {
        let slots = ctx.dimension.slots();
        let mut ordinates = [f64::NAN; 4];
        let mut count = 0;
        loop {
            let start = cursor.position();
            let token = cursor.number_token();
            if token.is_empty() {
                break;
            }
            let slot = *slots.get(count).ok_or_else(|| {
                cursor.error_at(
                    start,
                    format!("too many ordinates for a vertex of {} axes", slots.len()),
                )
            })?;
            ordinates[slot] = parse_f64(token).ok_or_else(|| {
                cursor.error_at(start, format!("expected a number but found '{}'", token))
            })?;
            count += 1;
        }
        if count < 2 {
            return Err(cursor.unexpected("a number"));
        }

        let precision = ctx.factory.precision_model();
        ordinates[X] = precision.make_precise(ordinates[X]);
        ordinates[Y] = precision.make_precise(ordinates[Y]);
        coords.push_vertex(&ordinates);
        Ok(())
    }

    /// `EMPTY` or a parenthesised, comma-separated list of vertices. `()` is also empty.
    fn parse_coord_list(
        &self,
        cursor: &mut TextCursor,
        ctx: &Context,
    ) -> Result<CoordinateSequence> {
        let mut coords = CoordinateSequence::new(ctx.factory.axis_count());
        if cursor.eat_word("EMPTY") {
            return Ok(coords);
        }
        cursor.expect(b'(')?;
        if cursor.eat(b')') {
            return Ok(coords);
        }
        loop {
            self.parse_vertex(cursor, ctx, &mut coords)?;
            if cursor.eat(b')') {
                return Ok(coords);
            }
            if !cursor.eat(b',') {
                return Err(cursor.unexpected("',' or ')'"));
            }
        }
    }

    fn parse_point(&self, cursor: &mut TextCursor, ctx: &Context) -> Result<Point> {
        let start = cursor.position();
        let coords = self.parse_coord_list(cursor, ctx)?;
        if coords.len() > 1 {
            return Err(cursor.error_at(start, "a point holds exactly one vertex"));
        }
        ctx.factory.point(coords)
    }

    fn parse_line_string(&self, cursor: &mut TextCursor, ctx: &Context) -> Result<LineString> {
        Ok(ctx.factory.line_string(self.parse_coord_list(cursor, ctx)?))
    }

    fn parse_linear_ring(&self, cursor: &mut TextCursor, ctx: &Context) -> Result<LinearRing> {
        Ok(ctx.factory.linear_ring(self.parse_coord_list(cursor, ctx)?))
    }

    fn parse_polygon(&self, cursor: &mut TextCursor, ctx: &Context) -> Result<Polygon> {
        let rings = if cursor.eat_word("EMPTY") {
            vec![]
        } else {
            parse_parts(cursor, |cursor| self.parse_linear_ring(cursor, ctx))?
        };
        Ok(ctx.factory.polygon(rings))
    }

    /// A MULTIPOINT member, either `(x y)`, `EMPTY` or a bare `x y`.
    fn parse_multi_point_member(&self, cursor: &mut TextCursor, ctx: &Context) -> Result<Point> {
        cursor.skip_whitespace();
        if cursor.peek() == Some(b'(') || cursor.at_word("EMPTY") {
            self.parse_point(cursor, ctx)
        } else {
            let mut coords = CoordinateSequence::with_capacity(ctx.factory.axis_count(), 1);
            self.parse_vertex(cursor, ctx, &mut coords)?;
            ctx.factory.point(coords)
        }
    }

    /// Members are parsed against the outer factory and reconcile their own dimension. Without a
    /// suffix the collection takes the largest axis count among its members.
    fn parse_collection(
        &self,
        cursor: &mut TextCursor,
        factory: GeometryFactory,
        dimension: Dimension,
        depth: usize,
    ) -> Result<Geometry> {
        let members = if cursor.eat_word("EMPTY") {
            vec![]
        } else {
            parse_parts(cursor, |cursor| self.parse_tagged(cursor, factory, depth + 1))?
        };

        let collection_factory = if self.options.use_factory_axis_count {
            factory
        } else if dimension == Dimension::XY {
            let axis_count = members
                .iter()
                .map(|member| member.axis_count())
                .max()
                .unwrap_or(2);
            factory.with_axis_count(axis_count)
        } else {
            factory.with_axis_count(dimension.axis_count())
        };
        Ok(collection_factory.geometry_collection(members).into())
    }
}

/// The optional `Z`, `M` or `ZM` after a geometry keyword.
fn parse_dimension(cursor: &mut TextCursor) -> Dimension {
    if cursor.eat_word("ZM") {
        Dimension::XYZM
    } else if cursor.eat_word("Z") {
        Dimension::XYZ
    } else if cursor.eat_word("M") {
        Dimension::XYM
    } else {
        Dimension::XY
    }
}

/// `(part, part, ...)`, used for rings, multi-geometry members and collection members alike.
fn parse_parts<'a, T>(
    cursor: &mut TextCursor<'a>,
    mut parse_part: impl FnMut(&mut TextCursor<'a>) -> Result<T>,
) -> Result<Vec<T>> {
    cursor.expect(b'(')?;
    let mut parts = vec![];
    loop {
        parts.push(parse_part(cursor)?);
        if cursor.eat(b')') {
            return Ok(parts);
        }
        if !cursor.eat(b',') {
            return Err(cursor.unexpected("',' or ')'"));
        }
    }
}

/// Parse WKT text with default options.
pub fn read_wkt(text: &str, factory: &GeometryFactory) -> Result<Option<Geometry>> {
    WktParser::default().parse(text, factory)
}
