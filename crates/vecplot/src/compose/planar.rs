//! 2D scene composer.

use std::path::PathBuf;

use log::{debug, info};

use vecplot_core::{
    color::Color,
    draw::{MarkerShape, StrokeDefinition},
    geometry::Point2,
    primitive::{Arrow2, Primitive2, cyclic_edges, extract_vectors_2d},
};

use super::finish;
use crate::{
    VecplotError,
    canvas::{ARROW_HEAD_ASPECT, ArrowGlyph, Canvas, HeadSize},
    config::LayoutConfig,
    layout::{GridSpacing, Layout2Request, Viewport2, ViewportEngine},
};

const AXIS_WIDTH: f32 = 2.0;
const LINE_WIDTH: f32 = 1.5;

/// Options of a 2D render call.
#[derive(Debug, Clone, PartialEq)]
pub struct Render2dOptions {
    /// Mark the origin with a cross.
    pub include_origin: bool,
    /// Draw the horizontal and vertical axis lines through the origin.
    pub draw_axes: bool,
    /// Grid to snap the viewport to, or `None` for no grid.
    pub grid: Option<GridSpacing>,
    /// Give one coordinate unit the same physical length on both axes.
    pub preserve_aspect: bool,
    /// Figure width in inches.
    pub width: f64,
    /// Where to save the rendered figure.
    pub save_path: Option<PathBuf>,
}

impl Default for Render2dOptions {
    fn default() -> Self {
        Self {
            include_origin: true,
            draw_axes: true,
            grid: Some(GridSpacing::unit()),
            preserve_aspect: true,
            width: 6.0,
            save_path: None,
        }
    }
}

impl Render2dOptions {
    fn layout_request(&self) -> Layout2Request {
        Layout2Request {
            grid: self.grid,
            preserve_aspect: self.preserve_aspect,
            width: self.width,
        }
    }
}

/// Renders a 2D scene onto `canvas`.
///
/// # Errors
///
/// - [`VecplotError::DegenerateGeometry`] if a primitive cannot be drawn
/// - [`VecplotError::EmptyScene`] if the primitives contribute no coordinates
/// - [`VecplotError::InvalidOption`] for a non-positive width
/// - [`VecplotError::Io`] if saving fails
/// - [`VecplotError::Export`] for any other canvas failure
pub fn render_2d<C>(
    canvas: &mut C,
    primitives: &[Primitive2],
    options: &Render2dOptions,
    config: &LayoutConfig,
) -> Result<(), VecplotError>
where
    C: Canvas<Point = Point2, Viewport = Viewport2>,
{
    for primitive in primitives {
        primitive.validate()?;
    }

    let viewport = ViewportEngine::new(config)
        .layout_2d(extract_vectors_2d(primitives), &options.layout_request())?;
    info!(primitives = primitives.len(); "2D layout calculated");

    canvas.configure(&viewport)?;

    if options.draw_axes {
        let axis = StrokeDefinition::solid(Color::black(), AXIS_WIDTH);
        for (start, end) in viewport.axis_segments() {
            canvas.line(start, end, &axis)?;
        }
    }
    if options.include_origin {
        canvas.scatter(&[Point2::origin()], Color::black(), MarkerShape::Cross)?;
    }

    let head_length = config.arrow_head_fraction() * viewport.x().span();
    for primitive in primitives {
        debug!(kind = primitive.kind(); "Drawing primitive");
        draw_primitive(canvas, primitive, head_length)?;
    }

    finish(canvas, options.save_path.as_deref())?;
    info!("2D scene rendered");
    Ok(())
}

fn draw_primitive<C>(
    canvas: &mut C,
    primitive: &Primitive2,
    head_length: f64,
) -> Result<(), VecplotError>
where
    C: Canvas<Point = Point2, Viewport = Viewport2>,
{
    match primitive {
        Primitive2::Polygon(polygon) => {
            if let Some(color) = polygon.stroke() {
                let stroke = StrokeDefinition::solid(color, LINE_WIDTH);
                for (start, end) in cyclic_edges(polygon.vertices()) {
                    canvas.line(start, end, &stroke)?;
                }
            }
            if let Some(fill) = polygon.fill() {
                canvas.fill_polygon(polygon.vertices(), fill, polygon.alpha())?;
            }
        }
        Primitive2::Points(points) => {
            canvas.scatter(points.points(), points.color(), MarkerShape::Dot)?;
        }
        Primitive2::Arrow(arrow) => match arrow_glyph(arrow, head_length) {
            Some(glyph) => canvas.arrow(&glyph)?,
            None => debug!(tip:? = arrow.tip(); "Skipping zero-length arrow"),
        },
        Primitive2::Segment(segment) => {
            let stroke = StrokeDefinition::solid(segment.color(), LINE_WIDTH);
            canvas.line(segment.start(), segment.end(), &stroke)?;
        }
    }
    Ok(())
}

/// Shortens the shaft by `head_length` so the head ends exactly at the tip.
/// Arrows shorter than their head keep no visible shaft. Zero-length arrows
/// have no direction and yield `None`.
fn arrow_glyph(arrow: &Arrow2, head_length: f64) -> Option<ArrowGlyph<Point2>> {
    let delta = arrow.displacement();
    let length = delta.length();
    if length == 0.0 {
        return None;
    }
    let shaft = (length - head_length).max(0.0);
    Some(ArrowGlyph {
        tail: arrow.tail(),
        shaft_end: arrow.tail().add_point(delta.scale(shaft / length)),
        tip: arrow.tip(),
        head: HeadSize::Data {
            length: head_length,
            width: head_length / ARROW_HEAD_ASPECT,
        },
        color: arrow.color(),
    })
}
