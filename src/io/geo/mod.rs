//! Convert to and from [`geo`] geometries.
//!
//! `geo` carries two dimensions only: Z and M are dropped on the way out and filled with NaN
//! on the way in when the factory has more axes.

use crate::error::{Result, WkxError};
use crate::geometry::{
    CoordinateSequence, Geometry, GeometryCollection, GeometryFactory, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

fn sequence_to_geo(coords: &CoordinateSequence) -> geo::LineString<f64> {
    geo::LineString::new(
        (0..coords.len())
            .map(|i| geo::Coord {
                x: coords.x(i),
                y: coords.y(i),
            })
            .collect(),
    )
}

/// Convert a [`Point`] to a [`geo::Point`].
///
/// `geo` has no empty point, so EMPTY is rejected.
pub fn point_to_geo(point: &Point) -> Result<geo::Point<f64>> {
    match (point.x(), point.y()) {
        (Some(x), Some(y)) => Ok(geo::Point::new(x, y)),
        _ => Err(WkxError::IncorrectGeometryType(
            "geo cannot represent an empty point".into(),
        )),
    }
}

pub fn line_string_to_geo(line_string: &LineString) -> geo::LineString<f64> {
    sequence_to_geo(line_string.coords())
}

pub fn linear_ring_to_geo(ring: &LinearRing) -> geo::LineString<f64> {
    sequence_to_geo(ring.coords())
}

/// Convert a [`Polygon`] to a [`geo::Polygon`]. An empty polygon gets an empty exterior.
pub fn polygon_to_geo(polygon: &Polygon) -> geo::Polygon<f64> {
    let exterior = polygon
        .exterior()
        .map(linear_ring_to_geo)
        .unwrap_or_else(|| geo::LineString::new(vec![]));
    let interiors = polygon.interiors().iter().map(linear_ring_to_geo).collect();
    geo::Polygon::new(exterior, interiors)
}

pub fn multi_point_to_geo(multi_point: &MultiPoint) -> Result<geo::MultiPoint<f64>> {
    let points = multi_point
        .points()
        .iter()
        .map(point_to_geo)
        .collect::<Result<Vec<_>>>()?;
    Ok(geo::MultiPoint::new(points))
}

pub fn multi_line_string_to_geo(multi_line_string: &MultiLineString) -> geo::MultiLineString<f64> {
    geo::MultiLineString::new(
        multi_line_string
            .lines()
            .iter()
            .map(line_string_to_geo)
            .collect(),
    )
}

pub fn multi_polygon_to_geo(multi_polygon: &MultiPolygon) -> geo::MultiPolygon<f64> {
    geo::MultiPolygon::new(
        multi_polygon
            .polygons()
            .iter()
            .map(polygon_to_geo)
            .collect(),
    )
}

pub fn geometry_collection_to_geo(
    collection: &GeometryCollection,
) -> Result<geo::GeometryCollection<f64>> {
    let geometries = collection
        .geometries()
        .iter()
        .map(geometry_to_geo)
        .collect::<Result<Vec<_>>>()?;
    Ok(geo::GeometryCollection::new_from(geometries))
}

/// Convert any [`Geometry`] to a [`geo::Geometry`], keeping X and Y only.
pub fn geometry_to_geo(geometry: &Geometry) -> Result<geo::Geometry<f64>> {
    let geometry = match geometry {
        Geometry::Point(g) => geo::Geometry::Point(point_to_geo(g)?),
        Geometry::LineString(g) => geo::Geometry::LineString(line_string_to_geo(g)),
        Geometry::LinearRing(g) => geo::Geometry::LineString(linear_ring_to_geo(g)),
        Geometry::Polygon(g) => geo::Geometry::Polygon(polygon_to_geo(g)),
        Geometry::MultiPoint(g) => geo::Geometry::MultiPoint(multi_point_to_geo(g)?),
        Geometry::MultiLineString(g) => {
            geo::Geometry::MultiLineString(multi_line_string_to_geo(g))
        }
        Geometry::MultiPolygon(g) => geo::Geometry::MultiPolygon(multi_polygon_to_geo(g)),
        Geometry::GeometryCollection(g) => {
            geo::Geometry::GeometryCollection(geometry_collection_to_geo(g)?)
        }
    };
    Ok(geometry)
}

fn sequence_from_geo(line_string: &geo::LineString<f64>) -> CoordinateSequence {
    let mut coords = CoordinateSequence::with_capacity(2, line_string.0.len());
    for coord in &line_string.0 {
        coords.push_vertex(&[coord.x, coord.y]);
    }
    coords
}

fn polygon_from_geo(polygon: &geo::Polygon<f64>, factory: &GeometryFactory) -> Polygon {
    if polygon.exterior().0.is_empty() {
        return factory.polygon(vec![]);
    }
    let rings = std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| factory.linear_ring(sequence_from_geo(ring)))
        .collect();
    factory.polygon(rings)
}

fn point_from_geo(point: &geo::Point<f64>, factory: &GeometryFactory) -> Point {
    let mut coords = CoordinateSequence::with_capacity(2, 1);
    coords.push_vertex(&[point.x(), point.y()]);
    // A single vertex is always accepted.
    factory
        .point(coords)
        .unwrap_or_else(|_| factory.empty_point())
}

/// Build a [`Geometry`] on `factory` from a [`geo::Geometry`].
///
/// `Line` becomes a two-vertex LineString; `Rect` and `Triangle` become Polygons.
pub fn geometry_from_geo(geometry: &geo::Geometry<f64>, factory: &GeometryFactory) -> Geometry {
    match geometry {
        geo::Geometry::Point(g) => point_from_geo(g, factory).into(),
        geo::Geometry::Line(g) => {
            let line = geo::LineString::new(vec![g.start, g.end]);
            factory.line_string(sequence_from_geo(&line)).into()
        }
        geo::Geometry::LineString(g) => factory.line_string(sequence_from_geo(g)).into(),
        geo::Geometry::Polygon(g) => polygon_from_geo(g, factory).into(),
        geo::Geometry::MultiPoint(g) => factory
            .multi_point(g.iter().map(|p| point_from_geo(p, factory)).collect())
            .into(),
        geo::Geometry::MultiLineString(g) => factory
            .multi_line_string(
                g.iter()
                    .map(|line| factory.line_string(sequence_from_geo(line)))
                    .collect(),
            )
            .into(),
        geo::Geometry::MultiPolygon(g) => factory
            .multi_polygon(g.iter().map(|p| polygon_from_geo(p, factory)).collect())
            .into(),
        geo::Geometry::GeometryCollection(g) => factory
            .geometry_collection(g.iter().map(|g| geometry_from_geo(g, factory)).collect())
            .into(),
        geo::Geometry::Rect(g) => polygon_from_geo(&g.to_polygon(), factory).into(),
        geo::Geometry::Triangle(g) => polygon_from_geo(&g.to_polygon(), factory).into(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::GeometryType;
    use crate::test::{linestring, multipoint, point, polygon};

    #[test]
    fn point_round_trip() {
        let factory = GeometryFactory::floating(0, 2);
        let geo_point = point::p0();
        let geometry = geometry_from_geo(&geo_point.into(), &factory);
        assert_eq!(geometry.geometry_type(), GeometryType::Point);
        assert_eq!(geometry_to_geo(&geometry).unwrap(), geo::Geometry::Point(geo_point));
    }

    #[test]
    fn empty_point_is_rejected() {
        let factory = GeometryFactory::floating(0, 2);
        let err = geometry_to_geo(&factory.empty_point().into()).unwrap_err();
        assert!(matches!(err, WkxError::IncorrectGeometryType(_)));
    }

    #[test]
    fn drops_extra_axes() {
        let factory = GeometryFactory::floating(4326, 4);
        let geometry = geometry_from_geo(&linestring::ls0().into(), &factory);
        assert_eq!(geometry.axis_count(), 4);
        assert_eq!(geometry.srid(), 4326);
        assert_eq!(
            geometry_to_geo(&geometry).unwrap(),
            geo::Geometry::LineString(linestring::ls0())
        );
    }

    #[test]
    fn polygon_with_hole() {
        let factory = GeometryFactory::floating(0, 2);
        let geometry = geometry_from_geo(&polygon::p1().into(), &factory);
        match &geometry {
            Geometry::Polygon(p) => assert_eq!(p.num_interiors(), 1),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            geometry_to_geo(&geometry).unwrap(),
            geo::Geometry::Polygon(polygon::p1())
        );
    }

    #[test]
    fn multi_point() {
        let factory = GeometryFactory::floating(0, 3);
        let geometry = geometry_from_geo(&multipoint::mp0().into(), &factory);
        assert_eq!(geometry.num_points(), 2);
        assert_eq!(
            geometry_to_geo(&geometry).unwrap(),
            geo::Geometry::MultiPoint(multipoint::mp0())
        );
    }

    #[test]
    fn rect_becomes_polygon() {
        let factory = GeometryFactory::floating(0, 2);
        let rect = geo::Rect::new(geo::coord! { x: 0., y: 0. }, geo::coord! { x: 2., y: 1. });
        let geometry = geometry_from_geo(&rect.into(), &factory);
        assert_eq!(geometry.geometry_type(), GeometryType::Polygon);
        assert_eq!(geometry.num_points(), 5);
    }

    #[test]
    fn line_becomes_line_string() {
        let factory = GeometryFactory::floating(0, 2);
        let line = geo::Line::new(geo::coord! { x: 0., y: 0. }, geo::coord! { x: 1., y: 1. });
        let geometry = geometry_from_geo(&line.into(), &factory);
        assert_eq!(geometry.geometry_type(), GeometryType::LineString);
        assert_eq!(geometry.num_points(), 2);
    }
}
