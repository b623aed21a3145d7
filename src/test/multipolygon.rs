use geo::{polygon, MultiPolygon};

use crate::test::polygon;

pub(crate) fn mp0() -> MultiPolygon {
    MultiPolygon::new(vec![
        polygon::p0(),
        polygon![
            (x: 0., y: 0.),
            (x: 1., y: 0.),
            (x: 1., y: 1.),
        ],
    ])
}

pub(crate) fn mp1() -> MultiPolygon {
    MultiPolygon::new(vec![polygon::p1()])
}
