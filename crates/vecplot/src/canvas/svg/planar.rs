//! 2D SVG canvas.

use std::path::Path;

use log::{debug, info};
use svg::node::element as svg_element;

use vecplot_core::{
    color::Color,
    draw::{MarkerShape, StrokeDefinition},
    geometry::{AxisRange, FigureSize, Point2},
};

use super::{
    FONT_SIZE, FRAME_COLOR, GRID_COLOR, Layer, Surface, arrow_head, label_node, line_node,
    marker_node, nice_ticks, polygon_node, tick_label,
};
use crate::{
    canvas::{ArrowGlyph, Canvas, Error, HeadSize},
    config::StyleConfig,
    layout::Viewport2,
};

/// Maps coordinates onto the pixel plotting area, flipping the y axis.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: AxisRange,
    y: AxisRange,
    plot: FigureSize,
    margin: f64,
}

impl Frame {
    fn to_pixel(self, p: Point2) -> Point2 {
        Point2::new(
            self.margin + (p.x() - self.x.min()) / self.x.span() * self.plot.width(),
            self.margin + (self.y.max() - p.y()) / self.y.span() * self.plot.height(),
        )
    }
}

/// Canvas drawing a 2D scene into an SVG document.
///
/// # Example
///
/// ```
/// use vecplot::canvas::{Canvas, SvgCanvas2d};
/// use vecplot::compose::{Render2dOptions, render_2d};
/// use vecplot::config::AppConfig;
/// use vecplot::primitive::{Arrow2, Primitive2};
///
/// let config = AppConfig::default();
/// let mut canvas = SvgCanvas2d::new(config.style()).unwrap();
/// let scene = [Primitive2::from(Arrow2::new([2.0, 1.0]))];
/// render_2d(&mut canvas, &scene, &Render2dOptions::default(), config.layout()).unwrap();
///
/// let markup = canvas.svg().unwrap();
/// assert!(markup.starts_with("<svg"));
/// ```
#[derive(Debug)]
pub struct SvgCanvas2d {
    surface: Surface,
    frame: Option<Frame>,
}

impl SvgCanvas2d {
    /// Creates an empty canvas styled by `style`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the style has an invalid background
    /// color, resolution or margin.
    pub fn new(style: &StyleConfig) -> Result<Self, Error> {
        Ok(Self {
            surface: Surface::new(style)?,
            frame: None,
        })
    }

    /// The SVG markup, once the canvas has been saved or shown.
    pub fn svg(&self) -> Option<String> {
        self.surface.markup()
    }

    /// Finalizes the canvas if needed and returns its SVG markup.
    pub fn into_svg(self) -> Result<String, Error> {
        self.surface.into_markup()
    }

    fn frame(&self) -> Result<Frame, Error> {
        self.frame
            .ok_or_else(|| Error::Render("canvas drawn on before configure".to_string()))
    }

    fn draw_grid(&mut self, frame: Frame, viewport: &Viewport2) -> Result<(), Error> {
        let grid = StrokeDefinition::solid(Color::new(GRID_COLOR).map_err(Error::Render)?, 0.8);
        for &x in viewport.x_ticks() {
            let line = line_node(
                frame.to_pixel(Point2::new(x, frame.y.min())),
                frame.to_pixel(Point2::new(x, frame.y.max())),
                &grid,
            );
            self.surface.push(Layer::Grid, line)?;
        }
        for &y in viewport.y_ticks() {
            let line = line_node(
                frame.to_pixel(Point2::new(frame.x.min(), y)),
                frame.to_pixel(Point2::new(frame.x.max(), y)),
                &grid,
            );
            self.surface.push(Layer::Grid, line)?;
        }

        let margin = frame.margin;
        let border = svg_element::Rectangle::new()
            .set("x", margin)
            .set("y", margin)
            .set("width", frame.plot.width())
            .set("height", frame.plot.height())
            .set("fill", "none")
            .set("stroke", FRAME_COLOR)
            .set("stroke-width", 1);
        self.surface.push(Layer::Grid, border)
    }

    /// Tick labels along the bottom and left edges. Gridded plots label
    /// their gridlines; ungridded plots get round default positions.
    fn draw_tick_labels(&mut self, frame: Frame, viewport: &Viewport2) -> Result<(), Error> {
        let x_ticks = match viewport.x_ticks() {
            [] => nice_ticks(frame.x),
            ticks => ticks.to_vec(),
        };
        let y_ticks = match viewport.y_ticks() {
            [] => nice_ticks(frame.y),
            ticks => ticks.to_vec(),
        };

        let below = frame.margin + frame.plot.height() + FONT_SIZE;
        for x in x_ticks {
            let anchor = frame.to_pixel(Point2::new(x, frame.y.min()));
            let label = label_node(Point2::new(anchor.x(), below), &tick_label(x), "middle");
            self.surface.push(Layer::Labels, label)?;
        }
        let left = frame.margin - FONT_SIZE / 2.0;
        for y in y_ticks {
            let anchor = frame.to_pixel(Point2::new(frame.x.min(), y));
            let label = label_node(Point2::new(left, anchor.y()), &tick_label(y), "end");
            self.surface.push(Layer::Labels, label)?;
        }
        Ok(())
    }
}

impl Canvas for SvgCanvas2d {
    type Point = Point2;
    type Viewport = Viewport2;

    fn configure(&mut self, viewport: &Viewport2) -> Result<(), Error> {
        let plot = self.surface.configure(viewport.size())?;
        let frame = Frame {
            x: viewport.x(),
            y: viewport.y(),
            plot,
            margin: self.surface.margin(),
        };
        self.frame = Some(frame);

        self.draw_grid(frame, viewport)?;
        self.draw_tick_labels(frame, viewport)?;
        debug!(
            x_ticks = viewport.x_ticks().len(),
            y_ticks = viewport.y_ticks().len();
            "2D canvas configured"
        );
        Ok(())
    }

    fn line(&mut self, start: Point2, end: Point2, stroke: &StrokeDefinition) -> Result<(), Error> {
        let frame = self.frame()?;
        let line = line_node(frame.to_pixel(start), frame.to_pixel(end), stroke);
        self.surface.push(Layer::Content, line)
    }

    fn scatter(
        &mut self,
        points: &[Point2],
        color: Color,
        marker: MarkerShape,
    ) -> Result<(), Error> {
        let frame = self.frame()?;
        let mut group = svg_element::Group::new();
        for &p in points {
            group = group.add(marker_node(frame.to_pixel(p), color, marker));
        }
        self.surface.push(Layer::Content, group)
    }

    fn fill_polygon(
        &mut self,
        vertices: &[Point2],
        color: Color,
        opacity: f32,
    ) -> Result<(), Error> {
        let frame = self.frame()?;
        let pixels: Vec<Point2> = vertices.iter().map(|&v| frame.to_pixel(v)).collect();
        self.surface
            .push(Layer::Content, polygon_node(&pixels, color, opacity))
    }

    fn arrow(&mut self, arrow: &ArrowGlyph<Point2>) -> Result<(), Error> {
        let frame = self.frame()?;
        let shaft = StrokeDefinition::solid(arrow.color, 1.5);
        let tail = frame.to_pixel(arrow.tail);
        let tip = frame.to_pixel(arrow.tip);

        let head = match arrow.head {
            HeadSize::Data { length, width } => arrow_head(arrow.tail, arrow.tip, length, width)
                .map(|corners| corners.map(|c| frame.to_pixel(c))),
            HeadSize::Screen { length } => arrow_head(
                tail,
                tip,
                length,
                length / crate::canvas::ARROW_HEAD_ASPECT,
            ),
        };

        let mut group = svg_element::Group::new().add(line_node(
            tail,
            frame.to_pixel(arrow.shaft_end),
            &shaft,
        ));
        if let Some(corners) = head {
            group = group.add(polygon_node(&corners, arrow.color, 1.0));
        }
        self.surface.push(Layer::Content, group)
    }

    fn save(&mut self, path: &Path) -> Result<(), Error> {
        self.surface.write(path)
    }

    fn show(&mut self) -> Result<(), Error> {
        self.surface.finalize()?;
        info!("2D SVG document ready");
        Ok(())
    }
}
