use std::fmt;

use crate::geometry::{
    Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
use crate::io::wkt::{WktWriter, WktWriterOptions};

/// Compact WKT, or formatted WKT with `{:#}`.
impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = WktWriterOptions {
            formatted: f.alternate(),
            ..Default::default()
        };
        WktWriter::new(options).write_to(self, f)
    }
}

macro_rules! impl_fmt {
    ($struct_name:ident) => {
        impl fmt::Display for $struct_name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&Geometry::$struct_name(self.clone()), f)
            }
        }
    };
}

impl_fmt!(Point);
impl_fmt!(LineString);
impl_fmt!(LinearRing);
impl_fmt!(Polygon);
impl_fmt!(MultiPoint);
impl_fmt!(MultiLineString);
impl_fmt!(MultiPolygon);
impl_fmt!(GeometryCollection);

#[cfg(test)]
mod test {
    use crate::geometry::GeometryFactory;
    use crate::test::geometry::seq;

    #[test]
    fn display_point() {
        let factory = GeometryFactory::floating(4326, 3);
        let point = factory.point(seq(3, &[1., 2.5, -3.])).unwrap();
        assert_eq!(point.to_string(), "POINT Z (1 2.5 -3)");
    }

    #[test]
    fn display_alternate_is_formatted() {
        let factory = GeometryFactory::floating(0, 2);
        let lines = factory.multi_line_string(vec![
            factory.line_string(seq(2, &[0., 0., 1., 1.])),
            factory.line_string(seq(2, &[2., 2., 3., 3.])),
        ]);
        assert_eq!(lines.to_string(), "MULTILINESTRING ((0 0, 1 1), (2 2, 3 3))");
        assert_eq!(
            format!("{:#}", lines),
            "MULTILINESTRING ((0 0, 1 1),\n  (2 2, 3 3))"
        );
    }
}
