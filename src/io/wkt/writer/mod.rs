use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

use crate::geometry::{
    CoordinateSequence, Dimension, Geometry, GeometryCollection, GeometryFactory, MultiLineString,
    MultiPoint, MultiPolygon, Polygon, Z,
};
use crate::io::wkt::dimension_suffix;
use crate::number::{decimals_for_scale, write_f64, NumberFormat};

/// Options for the WKT writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WktWriterOptions {
    /// Break nested parts onto indented lines.
    pub formatted: bool,

    /// Spaces per nesting level in formatted output.
    pub indent: usize,

    /// In formatted output, wrap coordinate lists after this many vertices. `0` never wraps.
    pub max_coordinates_per_line: usize,

    /// How ordinates are rendered when the precision model does not decide.
    pub number_format: NumberFormat,

    /// Render X/Y (and Z) with the number of decimals implied by a fixed precision model.
    pub use_precision_model: bool,

    /// Prefix the text with `SRID=<srid>;` when the geometry has a non-zero SRID.
    pub include_srid: bool,
}

impl WktWriterOptions {
    pub fn new(
        formatted: bool,
        indent: usize,
        max_coordinates_per_line: usize,
        number_format: NumberFormat,
        use_precision_model: bool,
        include_srid: bool,
    ) -> Self {
        Self {
            formatted,
            indent,
            max_coordinates_per_line,
            number_format,
            use_precision_model,
            include_srid,
        }
    }
}

impl Default for WktWriterOptions {
    fn default() -> Self {
        Self::new(false, 2, 0, NumberFormat::Shortest, true, false)
    }
}

/// Writes [`Geometry`] values as WKT.
///
/// NaN ordinates are written as `0`.
#[derive(Debug, Clone, Default)]
pub struct WktWriter {
    options: WktWriterOptions,
}

impl WktWriter {
    pub fn new(options: WktWriterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WktWriterOptions {
        &self.options
    }

    pub fn write(&self, geometry: &Geometry) -> String {
        let mut out = String::new();
        // Writing into a String never fails.
        let _ = self.write_to(geometry, &mut out);
        out
    }

    /// Write into any text sink.
    pub fn write_to<W: Write>(&self, geometry: &Geometry, out: &mut W) -> fmt::Result {
        if self.options.include_srid && geometry.srid() > 0 {
            write!(out, "SRID={};", geometry.srid())?;
        }
        let mut text = TextWriter::new(out, &self.options, geometry.factory());
        text.geometry_tagged(geometry, 0)
    }
}

/// Write a geometry as compact WKT.
pub fn to_wkt(geometry: &Geometry) -> String {
    WktWriter::default().write(geometry)
}

struct TextWriter<'a, W: Write> {
    out: &'a mut W,
    options: &'a WktWriterOptions,
    /// Number format per ordinate slot.
    formats: [NumberFormat; 4],
}

impl<'a, W: Write> TextWriter<'a, W> {
    fn new(out: &'a mut W, options: &'a WktWriterOptions, factory: &GeometryFactory) -> Self {
        let fallback = options.number_format;
        let from_scale = |scale: f64| {
            if options.use_precision_model {
                decimals_for_scale(scale)
                    .map(NumberFormat::Decimals)
                    .unwrap_or(fallback)
            } else {
                fallback
            }
        };
        let xy = from_scale(factory.scale_xy());
        let z = from_scale(factory.scale_z());
        Self {
            out,
            options,
            formats: [xy, xy, z, fallback],
        }
    }

    fn indent(&mut self, level: usize) -> fmt::Result {
        if self.options.formatted && level > 0 {
            self.out.write_char('\n')?;
            for _ in 0..level * self.options.indent {
                self.out.write_char(' ')?;
            }
        }
        Ok(())
    }

    /// The `,` between two parts. A wrapping separator starts a new indented line in formatted
    /// output, otherwise a single space follows.
    fn separator(&mut self, level: usize, wraps: bool) -> fmt::Result {
        self.out.write_char(',')?;
        if wraps && self.options.formatted && level > 0 {
            self.indent(level)
        } else {
            self.out.write_char(' ')
        }
    }

    /// Whether vertex `index` starts a new line.
    fn wraps_at(&self, index: usize) -> bool {
        let per_line = self.options.max_coordinates_per_line;
        per_line > 0 && index % per_line == 0
    }

    fn geometry_tagged(&mut self, geometry: &Geometry, level: usize) -> fmt::Result {
        let dimension = written_dimension(geometry);
        self.out.write_str(geometry.geometry_type().wkt_keyword())?;
        self.out.write_str(dimension_suffix(dimension))?;
        self.out.write_char(' ')?;

        match geometry {
            Geometry::Point(g) => self.sequence(g.coords(), dimension, level),
            Geometry::LineString(g) => self.sequence(g.coords(), dimension, level),
            Geometry::LinearRing(g) => self.sequence(g.coords(), dimension, level),
            Geometry::Polygon(g) => self.polygon(g, dimension, level),
            Geometry::MultiPoint(g) => self.multi_point(g, dimension, level),
            Geometry::MultiLineString(g) => self.multi_line_string(g, dimension, level),
            Geometry::MultiPolygon(g) => self.multi_polygon(g, dimension, level),
            Geometry::GeometryCollection(g) => self.collection(g, level),
        }
    }

    fn vertex(
        &mut self,
        coords: &CoordinateSequence,
        index: usize,
        dimension: Dimension,
    ) -> fmt::Result {
        for (i, slot) in dimension.slots().iter().enumerate() {
            if i > 0 {
                self.out.write_char(' ')?;
            }
            let value = coords.get(index, *slot);
            let value = if value.is_nan() { 0.0 } else { value };
            write_f64(&mut *self.out, value, self.formats[*slot])?;
        }
        Ok(())
    }

    fn sequence(
        &mut self,
        coords: &CoordinateSequence,
        dimension: Dimension,
        level: usize,
    ) -> fmt::Result {
        if coords.is_empty() {
            return self.out.write_str("EMPTY");
        }
        self.out.write_char('(')?;
        for i in 0..coords.len() {
            if i > 0 {
                let wraps = self.wraps_at(i);
                self.separator(level + 1, wraps)?;
            }
            self.vertex(coords, i, dimension)?;
        }
        self.out.write_char(')')
    }

    fn polygon(&mut self, polygon: &Polygon, dimension: Dimension, level: usize) -> fmt::Result {
        if polygon.rings().is_empty() {
            return self.out.write_str("EMPTY");
        }
        self.out.write_char('(')?;
        for (i, ring) in polygon.rings().iter().enumerate() {
            if i == 0 {
                self.sequence(ring.coords(), dimension, level)?;
            } else {
                self.separator(level + 1, true)?;
                self.sequence(ring.coords(), dimension, level + 1)?;
            }
        }
        self.out.write_char(')')
    }

    fn multi_point(
        &mut self,
        multi_point: &MultiPoint,
        dimension: Dimension,
        level: usize,
    ) -> fmt::Result {
        if multi_point.points().is_empty() {
            return self.out.write_str("EMPTY");
        }
        self.out.write_char('(')?;
        for (i, point) in multi_point.points().iter().enumerate() {
            if i > 0 {
                let wraps = self.wraps_at(i);
                self.separator(level + 1, wraps)?;
            }
            self.sequence(point.coords(), dimension, level)?;
        }
        self.out.write_char(')')
    }

    fn multi_line_string(
        &mut self,
        multi_line_string: &MultiLineString,
        dimension: Dimension,
        level: usize,
    ) -> fmt::Result {
        if multi_line_string.lines().is_empty() {
            return self.out.write_str("EMPTY");
        }
        self.out.write_char('(')?;
        for (i, line) in multi_line_string.lines().iter().enumerate() {
            if i == 0 {
                self.sequence(line.coords(), dimension, level)?;
            } else {
                self.separator(level + 1, true)?;
                self.sequence(line.coords(), dimension, level + 1)?;
            }
        }
        self.out.write_char(')')
    }

    fn multi_polygon(
        &mut self,
        multi_polygon: &MultiPolygon,
        dimension: Dimension,
        level: usize,
    ) -> fmt::Result {
        if multi_polygon.polygons().is_empty() {
            return self.out.write_str("EMPTY");
        }
        self.out.write_char('(')?;
        for (i, polygon) in multi_polygon.polygons().iter().enumerate() {
            if i == 0 {
                self.polygon(polygon, dimension, level)?;
            } else {
                self.separator(level + 1, true)?;
                self.polygon(polygon, dimension, level + 1)?;
            }
        }
        self.out.write_char(')')
    }

    fn collection(&mut self, collection: &GeometryCollection, level: usize) -> fmt::Result {
        if collection.geometries().is_empty() {
            return self.out.write_str("EMPTY");
        }
        self.out.write_char('(')?;
        for (i, geometry) in collection.geometries().iter().enumerate() {
            if i == 0 {
                self.geometry_tagged(geometry, level)?;
            } else {
                self.separator(level + 1, true)?;
                self.geometry_tagged(geometry, level + 1)?;
            }
        }
        self.out.write_char(')')
    }
}

/// The suffix to write. A four-axis geometry whose Z values are all NaN is written as `M`, the
/// form the parser reads back into the same slots.
fn written_dimension(geometry: &Geometry) -> Dimension {
    match geometry.axis_count() {
        2 => Dimension::XY,
        3 => Dimension::XYZ,
        _ => {
            let mut sequences = vec![];
            collect_sequences(geometry, &mut sequences);
            let has_vertices = sequences.iter().any(|coords| !coords.is_empty());
            let z_absent = sequences
                .iter()
                .all(|coords| (0..coords.len()).all(|i| coords.get(i, Z).is_nan()));
            if has_vertices && z_absent {
                Dimension::XYM
            } else {
                Dimension::XYZM
            }
        }
    }
}

fn collect_sequences<'g>(geometry: &'g Geometry, out: &mut Vec<&'g CoordinateSequence>) {
    match geometry {
        Geometry::Point(g) => out.push(g.coords()),
        Geometry::LineString(g) => out.push(g.coords()),
        Geometry::LinearRing(g) => out.push(g.coords()),
        Geometry::Polygon(g) => out.extend(g.rings().iter().map(|ring| ring.coords())),
        Geometry::MultiPoint(g) => out.extend(g.points().iter().map(|point| point.coords())),
        Geometry::MultiLineString(g) => out.extend(g.lines().iter().map(|line| line.coords())),
        Geometry::MultiPolygon(g) => out.extend(
            g.polygons()
                .iter()
                .flat_map(|polygon| polygon.rings())
                .map(|ring| ring.coords()),
        ),
        Geometry::GeometryCollection(g) => {
            for member in g.geometries() {
                collect_sequences(member, out);
            }
        }
    }
}
