use crate::geometry::coord::{CoordinateSequence, M, X, Y, Z};
use crate::geometry::GeometryFactory;

macro_rules! impl_common {
    ($struct_name:ident) => {
        impl $struct_name {
            /// The factory this geometry was built by.
            pub fn factory(&self) -> &GeometryFactory {
                &self.factory
            }

            /// The spatial reference identifier, `0` when unspecified.
            pub fn srid(&self) -> i32 {
                self.factory.srid()
            }

            /// The number of ordinates per vertex.
            pub fn axis_count(&self) -> usize {
                self.factory.axis_count()
            }
        }
    };
}

/// A single position, or EMPTY.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub(crate) factory: GeometryFactory,
    pub(crate) coords: CoordinateSequence,
}

impl Point {
    pub fn coords(&self) -> &CoordinateSequence {
        &self.coords
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The ordinate on `axis`, or `None` for an empty point.
    pub fn ordinate(&self, axis: usize) -> Option<f64> {
        (!self.is_empty()).then(|| self.coords.get(0, axis))
    }

    pub fn x(&self) -> Option<f64> {
        self.ordinate(X)
    }

    pub fn y(&self) -> Option<f64> {
        self.ordinate(Y)
    }

    pub fn z(&self) -> Option<f64> {
        self.ordinate(Z)
    }

    pub fn m(&self) -> Option<f64> {
        self.ordinate(M)
    }
}

/// An ordered series of vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    pub(crate) factory: GeometryFactory,
    pub(crate) coords: CoordinateSequence,
}

impl LineString {
    pub fn coords(&self) -> &CoordinateSequence {
        &self.coords
    }

    pub fn num_points(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.coords.is_closed()
    }
}

/// A closed line string used as a polygon boundary.
///
/// Closure is not enforced on construction; the WKB reader repairs rings before building them.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing {
    pub(crate) factory: GeometryFactory,
    pub(crate) coords: CoordinateSequence,
}

impl LinearRing {
    pub fn coords(&self) -> &CoordinateSequence {
        &self.coords
    }

    pub fn num_points(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.coords.is_closed()
    }
}

/// An exterior ring followed by zero or more holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub(crate) factory: GeometryFactory,
    pub(crate) rings: Vec<LinearRing>,
}

impl Polygon {
    pub fn rings(&self) -> &[LinearRing] {
        &self.rings
    }

    pub fn exterior(&self) -> Option<&LinearRing> {
        self.rings.first()
    }

    pub fn interiors(&self) -> &[LinearRing] {
        self.rings.get(1..).unwrap_or(&[])
    }

    pub fn num_interiors(&self) -> usize {
        self.rings.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.rings.iter().all(|ring| ring.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    pub(crate) factory: GeometryFactory,
    pub(crate) points: Vec<Point>,
}

impl MultiPoint {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.iter().all(|point| point.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString {
    pub(crate) factory: GeometryFactory,
    pub(crate) lines: Vec<LineString>,
}

impl MultiLineString {
    pub fn lines(&self) -> &[LineString] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    pub(crate) factory: GeometryFactory,
    pub(crate) polygons: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(|polygon| polygon.is_empty())
    }
}

/// A heterogeneous collection of geometries.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    pub(crate) factory: GeometryFactory,
    pub(crate) geometries: Vec<Geometry>,
}

impl GeometryCollection {
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.iter().all(|geometry| geometry.is_empty())
    }
}

impl_common!(Point);
impl_common!(LineString);
impl_common!(LinearRing);
impl_common!(Polygon);
impl_common!(MultiPoint);
impl_common!(MultiLineString);
impl_common!(MultiPolygon);
impl_common!(GeometryCollection);

/// The geometry variants understood by the codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    /// The upper-case WKT keyword for this type.
    pub fn wkt_keyword(&self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::LinearRing => "LINEARRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }
}

/// A geometry of any type.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::LinearRing(_) => GeometryType::LinearRing,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    pub fn factory(&self) -> &GeometryFactory {
        match self {
            Geometry::Point(g) => g.factory(),
            Geometry::LineString(g) => g.factory(),
            Geometry::LinearRing(g) => g.factory(),
            Geometry::Polygon(g) => g.factory(),
            Geometry::MultiPoint(g) => g.factory(),
            Geometry::MultiLineString(g) => g.factory(),
            Geometry::MultiPolygon(g) => g.factory(),
            Geometry::GeometryCollection(g) => g.factory(),
        }
    }

    pub fn srid(&self) -> i32 {
        self.factory().srid()
    }

    pub fn axis_count(&self) -> usize {
        self.factory().axis_count()
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_empty(),
            Geometry::LineString(g) => g.is_empty(),
            Geometry::LinearRing(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::MultiPoint(g) => g.is_empty(),
            Geometry::MultiLineString(g) => g.is_empty(),
            Geometry::MultiPolygon(g) => g.is_empty(),
            Geometry::GeometryCollection(g) => g.is_empty(),
        }
    }

    /// The total number of vertices in this geometry.
    pub fn num_points(&self) -> usize {
        match self {
            Geometry::Point(g) => g.coords.len(),
            Geometry::LineString(g) => g.num_points(),
            Geometry::LinearRing(g) => g.num_points(),
            Geometry::Polygon(g) => g.rings.iter().map(|ring| ring.num_points()).sum(),
            Geometry::MultiPoint(g) => g.points.iter().map(|point| point.coords.len()).sum(),
            Geometry::MultiLineString(g) => g.lines.iter().map(|line| line.num_points()).sum(),
            Geometry::MultiPolygon(g) => g
                .polygons
                .iter()
                .flat_map(|polygon| polygon.rings.iter())
                .map(|ring| ring.num_points())
                .sum(),
            Geometry::GeometryCollection(g) => g.geometries.iter().map(|g| g.num_points()).sum(),
        }
    }
}

macro_rules! impl_into_geometry {
    ($struct_name:ident) => {
        impl From<$struct_name> for Geometry {
            fn from(value: $struct_name) -> Self {
                Geometry::$struct_name(value)
            }
        }
    };
}

impl_into_geometry!(Point);
impl_into_geometry!(LineString);
impl_into_geometry!(LinearRing);
impl_into_geometry!(Polygon);
impl_into_geometry!(MultiPoint);
impl_into_geometry!(MultiLineString);
impl_into_geometry!(MultiPolygon);
impl_into_geometry!(GeometryCollection);
