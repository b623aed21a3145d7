use geo::polygon;

use criterion::{criterion_group, criterion_main, Criterion};
use geo_wkx::geometry::{Geometry, GeometryFactory};
use geo_wkx::io::geo::geometry_from_geo;
use geo_wkx::io::wkb::{WkbReader, WkbWriter};
use geo_wkx::io::wkt::{read_wkt, to_wkt};

fn create_data() -> Geometry {
    // An L shape
    let poly = polygon![
        (x: 0.0, y: 0.0),
        (x: 4.0, y: 0.0),
        (x: 4.0, y: 1.0),
        (x: 1.0, y: 1.0),
        (x: 1.0, y: 4.0),
        (x: 0.0, y: 4.0),
        (x: 0.0, y: 0.0),
    ];
    let multi = geo::MultiPolygon::new(vec![poly; 1000]);
    geometry_from_geo(&multi.into(), &GeometryFactory::floating(4326, 2))
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let factory = GeometryFactory::floating(0, 2);
    let geometry = create_data();
    let text = to_wkt(&geometry);
    let bytes = WkbWriter::default().write(&geometry).unwrap();

    c.bench_function("write WKT", |b| b.iter(|| to_wkt(&geometry)));
    c.bench_function("parse WKT", |b| {
        b.iter(|| read_wkt(&text, &factory).unwrap().unwrap())
    });
    c.bench_function("write WKB", |b| {
        b.iter(|| WkbWriter::default().write(&geometry).unwrap())
    });
    c.bench_function("read WKB", |b| {
        let mut reader = WkbReader::new(factory, Default::default());
        b.iter(|| reader.read(&bytes).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
