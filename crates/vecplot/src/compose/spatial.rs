//! 3D scene composer.

use std::path::PathBuf;

use log::{debug, info};

use vecplot_core::{
    color::Color,
    draw::{MarkerShape, StrokeDefinition},
    geometry::{AxisRange, Point3},
    primitive::{Box3, Primitive3, cyclic_edges, extract_vectors_3d},
};

use super::finish;
use crate::{
    VecplotError,
    canvas::{ArrowGlyph, Canvas, HeadSize},
    config::LayoutConfig,
    layout::{Layout3Request, ViewAngles, Viewport3, ViewportEngine},
};

/// Length of 3D arrowheads in output pixels.
pub const ARROW_HEAD_PIXELS: f64 = 20.0;

const LINE_WIDTH: f32 = 1.5;

/// Options of a 3D render call.
#[derive(Debug, Clone, PartialEq)]
pub struct Render3dOptions {
    /// Mark the origin with a cross.
    pub include_origin: bool,
    /// Draw one axis line per dimension through the origin.
    pub draw_axes: bool,
    /// Figure width in inches.
    pub width: f64,
    /// Where to save the rendered figure.
    pub save_path: Option<PathBuf>,
    /// Camera azimuth in degrees; -60 when unset.
    pub azimuth: Option<f64>,
    /// Camera elevation in degrees; 30 when unset.
    pub elevation: Option<f64>,
    /// Displayed x/y/z ranges overriding the computed ones.
    pub axis_limits: Option<[AxisRange; 3]>,
    /// Explicit x/y/z tick positions.
    pub axis_ticks: Option<[Vec<f64>; 3]>,
}

impl Default for Render3dOptions {
    fn default() -> Self {
        Self {
            include_origin: true,
            draw_axes: true,
            width: 6.0,
            save_path: None,
            azimuth: None,
            elevation: None,
            axis_limits: None,
            axis_ticks: None,
        }
    }
}

impl Render3dOptions {
    fn layout_request(&self) -> Layout3Request {
        Layout3Request {
            width: self.width,
            view: ViewAngles::resolve(self.azimuth, self.elevation),
            limits: self.axis_limits,
            ticks: self.axis_ticks.clone(),
        }
    }
}

/// Renders a 3D scene onto `canvas`.
///
/// # Errors
///
/// - [`VecplotError::DegenerateGeometry`] if a primitive cannot be drawn
/// - [`VecplotError::EmptyScene`] if the primitives contribute no coordinates
/// - [`VecplotError::InvalidOption`] for a non-positive width or malformed limits
/// - [`VecplotError::Io`] if saving fails
/// - [`VecplotError::Export`] for any other canvas failure
pub fn render_3d<C>(
    canvas: &mut C,
    primitives: &[Primitive3],
    options: &Render3dOptions,
    config: &LayoutConfig,
) -> Result<(), VecplotError>
where
    C: Canvas<Point = Point3, Viewport = Viewport3>,
{
    for primitive in primitives {
        primitive.validate()?;
    }

    let viewport = ViewportEngine::new(config)
        .layout_3d(extract_vectors_3d(primitives), &options.layout_request())?;
    info!(primitives = primitives.len(); "3D layout calculated");

    canvas.configure(&viewport)?;

    if options.draw_axes {
        let axis = StrokeDefinition::solid(Color::black(), LINE_WIDTH);
        for (start, end) in viewport.axis_segments() {
            canvas.line(start, end, &axis)?;
        }
    }
    if options.include_origin {
        canvas.scatter(&[Point3::origin()], Color::black(), MarkerShape::Cross)?;
    }

    for primitive in primitives {
        debug!(kind = primitive.kind(); "Drawing primitive");
        draw_primitive(canvas, primitive)?;
    }

    finish(canvas, options.save_path.as_deref())?;
    info!("3D scene rendered");
    Ok(())
}

fn draw_primitive<C>(canvas: &mut C, primitive: &Primitive3) -> Result<(), VecplotError>
where
    C: Canvas<Point = Point3, Viewport = Viewport3>,
{
    match primitive {
        Primitive3::Polygon(polygon) => {
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
        Primitive3::Points(points) => {
            canvas.scatter(points.points(), points.color(), MarkerShape::Dot)?;
        }
        Primitive3::Arrow(arrow) => {
            canvas.arrow(&ArrowGlyph {
                tail: arrow.tail(),
                shaft_end: arrow.head(),
                tip: arrow.head(),
                head: HeadSize::Screen {
                    length: ARROW_HEAD_PIXELS,
                },
                color: arrow.color(),
            })?;
        }
        Primitive3::Segment(segment) => {
            let stroke = StrokeDefinition::solid(segment.color(), LINE_WIDTH)
                .with_style(segment.style().clone());
            canvas.line(segment.start(), segment.end(), &stroke)?;
        }
        Primitive3::Box(cuboid) => draw_box(canvas, cuboid)?,
    }
    Ok(())
}

fn draw_box<C>(canvas: &mut C, cuboid: &Box3) -> Result<(), VecplotError>
where
    C: Canvas<Point = Point3, Viewport = Viewport3>,
{
    let stroke = Box3::stroke();
    for (start, end) in cuboid.edges() {
        canvas.line(start, end, &stroke)?;
    }
    Ok(())
}
