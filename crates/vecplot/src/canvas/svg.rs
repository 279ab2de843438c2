//! SVG canvases.
//!
//! [`SvgCanvas2d`] and [`SvgCanvas3d`] draw into an in-memory SVG document
//! built with the `svg` crate. Coordinates are mapped onto a plotting area
//! of `width * dpi` by `height * dpi` pixels surrounded by a margin.
//!
//! Nodes are collected into layers and emitted bottom to top, one `<g>`
//! group per non-empty layer, so gridlines stay behind content and labels
//! stay on top regardless of call order.

mod planar;
mod projection;
mod spatial;

pub use planar::SvgCanvas2d;
pub use spatial::SvgCanvas3d;

use std::{ffi::OsStr, fs::File, io::Write, path::Path};

use log::{debug, error, info, warn};
use svg::{Document, node::element as svg_element};

use vecplot_core::{
    color::Color,
    draw::{MarkerShape, StrokeDefinition},
    geometry::{AxisRange, FigureSize, Point2},
};

use super::Error;
use crate::config::StyleConfig;

/// Type alias for a boxed SVG node.
pub type SvgNode = Box<dyn svg::Node>;

const GRID_COLOR: &str = "#b0b0b0";
const FRAME_COLOR: &str = "#404040";
const FONT_FAMILY: &str = "sans-serif";
const FONT_SIZE: f64 = 10.0;

/// Rendering layers, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Layer {
    Background,
    Grid,
    Content,
    Labels,
}

impl Layer {
    fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Grid => "grid",
            Self::Content => "content",
            Self::Labels => "labels",
        }
    }
}

/// Document state shared by the 2D and 3D canvases.
#[derive(Debug)]
struct Surface {
    background: Option<Color>,
    dpi: f64,
    margin: f64,
    plot: Option<FigureSize>,
    items: Vec<(Layer, SvgNode)>,
    document: Option<Document>,
}

impl Surface {
    fn new(style: &StyleConfig) -> Result<Self, Error> {
        let background = style.background_color().map_err(Error::Render)?;
        let (dpi, margin) = (style.dpi(), style.margin());
        if !(dpi.is_finite() && dpi > 0.0) {
            return Err(Error::Render(format!("dpi must be positive, got {dpi}")));
        }
        if !(margin.is_finite() && margin >= 0.0) {
            return Err(Error::Render(format!(
                "margin must be non-negative, got {margin}"
            )));
        }
        Ok(Self {
            background,
            dpi,
            margin,
            plot: None,
            items: Vec::new(),
            document: None,
        })
    }

    fn margin(&self) -> f64 {
        self.margin
    }

    /// Sizes the plotting area from a figure size in inches and returns it
    /// in pixels.
    fn configure(&mut self, size: FigureSize) -> Result<FigureSize, Error> {
        if self.plot.is_some() {
            return Err(Error::Render("canvas configured twice".to_string()));
        }
        let plot = FigureSize::new(size.width() * self.dpi, size.height() * self.dpi);
        if !(plot.width() > 0.0 && plot.height() > 0.0 && plot.aspect().is_finite()) {
            return Err(Error::Render(format!(
                "figure size {}x{} has no drawable area",
                size.width(),
                size.height()
            )));
        }
        debug!(width = plot.width(), height = plot.height(); "SVG plotting area");
        self.plot = Some(plot);
        Ok(plot)
    }

    fn push(&mut self, layer: Layer, node: impl Into<SvgNode>) -> Result<(), Error> {
        if self.plot.is_none() {
            return Err(Error::Render("canvas drawn on before configure".to_string()));
        }
        if self.document.is_some() {
            return Err(Error::Render("canvas drawn on after show".to_string()));
        }
        self.items.push((layer, node.into()));
        Ok(())
    }

    /// Builds the document on first call; later calls return the same one.
    fn finalize(&mut self) -> Result<&Document, Error> {
        if self.document.is_none() {
            let document = self.build()?;
            debug!(nodes = self.items.len(); "SVG document finalized");
            self.document = Some(document);
        }
        self.document
            .as_ref()
            .ok_or_else(|| Error::Render("document missing after finalize".to_string()))
    }

    fn build(&mut self) -> Result<Document, Error> {
        let plot = self
            .plot
            .ok_or_else(|| Error::Render("canvas shown before configure".to_string()))?;
        let width = plot.width() + 2.0 * self.margin;
        let height = plot.height() + 2.0 * self.margin;

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(color) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", color)
                    .set("fill-opacity", color.alpha()),
            );
        }

        let mut items = std::mem::take(&mut self.items);
        items.sort_by_key(|(layer, _)| *layer);

        let mut current: Option<(Layer, svg_element::Group)> = None;
        for (layer, node) in items {
            current = match current {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((layer, group.add(node)))
                }
                previous => {
                    if let Some((_, group)) = previous {
                        doc = doc.add(group);
                    }
                    let group = svg_element::Group::new().set("data-layer", layer.name());
                    Some((layer, group.add(node)))
                }
            };
        }
        if let Some((_, group)) = current {
            doc = doc.add(group);
        }

        Ok(doc)
    }

    fn markup(&self) -> Option<String> {
        self.document.as_ref().map(Document::to_string)
    }

    fn into_markup(mut self) -> Result<String, Error> {
        self.finalize().map(Document::to_string)
    }

    /// Finalizes the document and writes it to `path` as SVG.
    fn write(&mut self, path: &Path) -> Result<(), Error> {
        let file_name = path.display().to_string();
        if path.extension().and_then(OsStr::to_str) != Some("svg") {
            warn!(file_name; "Output is always SVG regardless of the file extension");
        }

        let doc = self.finalize()?;

        info!(file_name; "Creating SVG file");
        let f = match File::create(path) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name, err:err; "Failed to create SVG file");
                return Err(Error::Io(err));
            }
        };

        if let Err(err) = write!(&f, "{doc}") {
            error!(file_name, err:err; "Failed to write SVG content");
            return Err(Error::Io(err));
        }

        Ok(())
    }
}

fn line_node(start: Point2, end: Point2, stroke: &StrokeDefinition) -> svg_element::Line {
    let line = svg_element::Line::new()
        .set("x1", start.x())
        .set("y1", start.y())
        .set("x2", end.x())
        .set("y2", end.y())
        .set("stroke-linecap", "round");
    vecplot_core::apply_stroke!(line, stroke)
}

fn marker_node(center: Point2, color: Color, marker: MarkerShape) -> SvgNode {
    let half = f64::from(marker.size()) / 2.0;
    match marker {
        MarkerShape::Dot => Box::new(
            svg_element::Circle::new()
                .set("cx", center.x())
                .set("cy", center.y())
                .set("r", half)
                .set("fill", &color)
                .set("fill-opacity", color.alpha()),
        ),
        MarkerShape::Cross => {
            let (x, y) = (center.x(), center.y());
            let data = format!(
                "M {} {} L {} {} M {} {} L {} {}",
                x - half,
                y - half,
                x + half,
                y + half,
                x - half,
                y + half,
                x + half,
                y - half
            );
            let stroke = StrokeDefinition::solid(color, 2.0);
            Box::new(vecplot_core::apply_stroke!(
                svg_element::Path::new().set("d", data).set("fill", "none"),
                &stroke
            ))
        }
    }
}

/// A closed, filled, unstroked path through `points`.
fn polygon_node(points: &[Point2], color: Color, opacity: f32) -> svg_element::Path {
    let mut data = String::new();
    for (i, p) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        data.push_str(&format!("{command} {} {} ", p.x(), p.y()));
    }
    data.push('Z');
    svg_element::Path::new()
        .set("d", data)
        .set("fill", &color)
        .set("fill-opacity", opacity * color.alpha())
        .set("stroke", "none")
}

fn label_node(position: Point2, text: &str, anchor: &str) -> svg_element::Text {
    svg_element::Text::new(text)
        .set("x", position.x())
        .set("y", position.y())
        .set("text-anchor", anchor)
        .set("dominant-baseline", "central")
        .set("font-family", FONT_FAMILY)
        .set("font-size", FONT_SIZE)
}

/// Corners of a triangular head with its point at `tip`, aimed along
/// `tail -> tip`. Returns `None` when the direction is undefined.
fn arrow_head(tail: Point2, tip: Point2, length: f64, width: f64) -> Option<[Point2; 3]> {
    let delta = tip.sub_point(tail);
    let norm = delta.length();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    let dir = delta.scale(1.0 / norm);
    let normal = Point2::new(-dir.y(), dir.x()).scale(width / 2.0);
    let base = tip.sub_point(dir.scale(length));
    Some([tip, base.add_point(normal), base.sub_point(normal)])
}

/// Evenly spaced round tick positions covering `range`, aiming for about
/// five ticks with steps of 1, 2 or 5 times a power of ten.
fn nice_ticks(range: AxisRange) -> Vec<f64> {
    const TARGET: f64 = 5.0;
    let span = range.span();
    if !(span.is_finite() && span > 0.0) {
        return Vec::new();
    }
    let raw = span / TARGET;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = match raw / magnitude {
        n if n < 1.5 => 1.0,
        n if n < 3.0 => 2.0,
        n if n < 7.0 => 5.0,
        _ => 10.0,
    } * magnitude;

    let first = (range.min() / step).ceil() as i64;
    let last = (range.max() / step + 1e-9).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Tick label text: short, without trailing zeros or negative zero.
fn tick_label(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(AxisRange::new(-2.0, 2.0)), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(
            nice_ticks(AxisRange::new(-2.1, 10.5)),
            vec![-2.0, 0.0, 2.0, 4.0, 6.0, 8.0, 10.0]
        );
        assert!(nice_ticks(AxisRange::new(1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_tick_label() {
        assert_eq!(tick_label(3.0), "3");
        assert_eq!(tick_label(-0.0), "0");
        assert_eq!(tick_label(0.5), "0.5");
        assert_eq!(tick_label(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_arrow_head() {
        let [tip, left, right] =
            arrow_head(Point2::origin(), Point2::new(10.0, 0.0), 2.0, 1.0).unwrap();
        assert_eq!(tip, Point2::new(10.0, 0.0));
        assert_eq!(left, Point2::new(8.0, 0.5));
        assert_eq!(right, Point2::new(8.0, -0.5));
    }

    #[test]
    fn test_arrow_head_zero_length() {
        assert!(arrow_head(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0), 2.0, 1.0).is_none());
    }

    #[test]
    fn test_layers_render_bottom_to_top() {
        let mut surface = Surface::new(&StyleConfig::default()).unwrap();
        surface.configure(FigureSize::new(1.0, 1.0)).unwrap();
        surface
            .push(Layer::Labels, label_node(Point2::origin(), "x", "middle"))
            .unwrap();
        surface
            .push(
                Layer::Grid,
                line_node(
                    Point2::origin(),
                    Point2::new(1.0, 1.0),
                    &StrokeDefinition::default(),
                ),
            )
            .unwrap();

        let markup = surface.into_markup().unwrap();
        let grid = markup.find("data-layer=\"grid\"").unwrap();
        let labels = markup.find("data-layer=\"labels\"").unwrap();
        assert!(grid < labels);
        assert!(!markup.contains("data-layer=\"content\""));
    }

    #[test]
    fn test_push_before_configure_fails() {
        let mut surface = Surface::new(&StyleConfig::default()).unwrap();
        let result = surface.push(Layer::Content, svg_element::Group::new());
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_document_size_includes_margin() {
        let mut surface = Surface::new(&StyleConfig::default()).unwrap();
        surface.configure(FigureSize::new(2.0, 1.0)).unwrap();
        let markup = surface.into_markup().unwrap();
        assert!(markup.contains("viewBox=\"0 0 280 180\""));
    }
}
