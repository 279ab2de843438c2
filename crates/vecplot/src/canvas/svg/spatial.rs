//! 3D SVG canvas.

use std::path::Path;

use log::{debug, info};
use svg::node::element as svg_element;

use vecplot_core::{
    color::Color,
    draw::{MarkerShape, StrokeDefinition},
    geometry::{AxisRange, Point2, Point3},
};

use super::{
    FONT_SIZE, GRID_COLOR, Layer, Surface, arrow_head, label_node, line_node, marker_node,
    nice_ticks, polygon_node, projection::Projection, tick_label,
};
use crate::{
    canvas::{ARROW_HEAD_ASPECT, ArrowGlyph, Canvas, Error, HeadSize},
    config::StyleConfig,
    layout::Viewport3,
};

const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];
const LABEL_OFFSET: f64 = 14.0;

/// Canvas drawing a 3D scene into an SVG document.
///
/// The limits box is drawn as a light wireframe with tick labels on its
/// outer edges; scene content is projected orthographically.
#[derive(Debug)]
pub struct SvgCanvas3d {
    surface: Surface,
    projection: Option<Projection>,
}

impl SvgCanvas3d {
    /// Creates an empty canvas styled by `style`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the style has an invalid background
    /// color, resolution or margin.
    pub fn new(style: &StyleConfig) -> Result<Self, Error> {
        Ok(Self {
            surface: Surface::new(style)?,
            projection: None,
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

    fn projection(&self) -> Result<Projection, Error> {
        self.projection
            .ok_or_else(|| Error::Render("canvas drawn on before configure".to_string()))
    }

    /// The 12 edges of the limits box.
    fn draw_frame(&mut self, projection: Projection) -> Result<(), Error> {
        let frame = StrokeDefinition::solid(Color::new(GRID_COLOR).map_err(Error::Render)?, 0.6);
        let corners = box_corners(projection.limits());
        for (i, a) in corners.iter().enumerate() {
            for b in &corners[i + 1..] {
                // Corners sharing two coordinates form an edge.
                let shared = a
                    .to_array()
                    .iter()
                    .zip(b.to_array())
                    .filter(|(p, q)| **p == *q)
                    .count();
                if shared == 2 {
                    let line = line_node(projection.project(*a), projection.project(*b), &frame);
                    self.surface.push(Layer::Grid, line)?;
                }
            }
        }
        Ok(())
    }

    /// Tick labels along the lowest visible edge of each axis, plus the
    /// axis name past the positive end.
    fn draw_labels(&mut self, projection: Projection, viewport: &Viewport3) -> Result<(), Error> {
        let limits = projection.limits();
        for axis in 0..3 {
            let ticks = match viewport.ticks() {
                Some(ticks) => ticks[axis].clone(),
                None => nice_ticks(limits[axis]),
            };
            let edge = label_edge(&projection, axis);
            for value in ticks {
                let mut coords = edge;
                coords[axis] = value;
                let position = push_out(&projection, projection.project(coords.into()));
                let label = label_node(position, &tick_label(value), "middle");
                self.surface.push(Layer::Labels, label)?;
            }

            let mut end = [0.0; 3];
            end[axis] = limits[axis].max();
            let clamped = clamp_to(limits, end);
            let position = push_out(&projection, projection.project(clamped));
            let name = label_node(position, AXIS_NAMES[axis], "middle")
                .set("font-size", FONT_SIZE * 1.2)
                .set("font-style", "italic");
            self.surface.push(Layer::Labels, name)?;
        }
        Ok(())
    }
}

impl Canvas for SvgCanvas3d {
    type Point = Point3;
    type Viewport = Viewport3;

    fn configure(&mut self, viewport: &Viewport3) -> Result<(), Error> {
        let plot = self.surface.configure(viewport.size())?;
        let projection = Projection::new(
            viewport.limits(),
            viewport.view(),
            plot,
            self.surface.margin(),
        );
        self.projection = Some(projection);

        self.draw_frame(projection)?;
        self.draw_labels(projection, viewport)?;
        debug!(
            azimuth = viewport.view().azimuth(),
            elevation = viewport.view().elevation(),
            explicit_ticks = viewport.ticks().is_some();
            "3D canvas configured"
        );
        Ok(())
    }

    fn line(&mut self, start: Point3, end: Point3, stroke: &StrokeDefinition) -> Result<(), Error> {
        let projection = self.projection()?;
        let line = line_node(projection.project(start), projection.project(end), stroke);
        self.surface.push(Layer::Content, line)
    }

    fn scatter(
        &mut self,
        points: &[Point3],
        color: Color,
        marker: MarkerShape,
    ) -> Result<(), Error> {
        let projection = self.projection()?;
        let mut group = svg_element::Group::new();
        for &p in points {
            group = group.add(marker_node(projection.project(p), color, marker));
        }
        self.surface.push(Layer::Content, group)
    }

    fn fill_polygon(
        &mut self,
        vertices: &[Point3],
        color: Color,
        opacity: f32,
    ) -> Result<(), Error> {
        let projection = self.projection()?;
        let pixels: Vec<Point2> = vertices.iter().map(|&v| projection.project(v)).collect();
        self.surface
            .push(Layer::Content, polygon_node(&pixels, color, opacity))
    }

    fn arrow(&mut self, arrow: &ArrowGlyph<Point3>) -> Result<(), Error> {
        let projection = self.projection()?;
        let tail = projection.project(arrow.tail);
        let tip = projection.project(arrow.tip);

        // Only pixel-sized heads are drawn in 3D.
        let HeadSize::Screen { length } = arrow.head else {
            return Err(Error::Render(
                "3D arrowheads must be sized in screen pixels".to_string(),
            ));
        };
        let width = length / ARROW_HEAD_ASPECT;

        let shaft = StrokeDefinition::solid(arrow.color, 1.5);
        let mut group = svg_element::Group::new().add(line_node(
            tail,
            projection.project(arrow.shaft_end),
            &shaft,
        ));
        if let Some(corners) = arrow_head(tail, tip, length, width) {
            group = group.add(polygon_node(&corners, arrow.color, 1.0));
        }
        self.surface.push(Layer::Content, group)
    }

    fn save(&mut self, path: &Path) -> Result<(), Error> {
        self.surface.write(path)
    }

    fn show(&mut self) -> Result<(), Error> {
        self.surface.finalize()?;
        info!("3D SVG document ready");
        Ok(())
    }
}

fn box_corners(limits: [AxisRange; 3]) -> Vec<Point3> {
    let [x, y, z] = limits;
    let mut corners = Vec::with_capacity(8);
    for cx in [x.min(), x.max()] {
        for cy in [y.min(), y.max()] {
            for cz in [z.min(), z.max()] {
                corners.push(Point3::new(cx, cy, cz));
            }
        }
    }
    corners
}

/// Picks the limits-box edge parallel to `axis` that appears lowest on
/// screen (leftmost for the vertical axis). Returns a coordinate template
/// whose `axis` component is to be filled in.
fn label_edge(projection: &Projection, axis: usize) -> [f64; 3] {
    let limits = projection.limits();
    let others: Vec<usize> = (0..3).filter(|&i| i != axis).collect();
    let mut best: Option<([f64; 3], f64)> = None;
    for a in [limits[others[0]].min(), limits[others[0]].max()] {
        for b in [limits[others[1]].min(), limits[others[1]].max()] {
            let mut coords = [0.0; 3];
            coords[others[0]] = a;
            coords[others[1]] = b;
            coords[axis] = (limits[axis].min() + limits[axis].max()) / 2.0;
            let screen = projection.project(coords.into());
            let score = if axis == 2 { -screen.x() } else { screen.y() };
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((coords, score));
            }
        }
    }
    best.map(|(coords, _)| coords).unwrap_or([0.0; 3])
}

/// Moves a screen position away from the plot center by the label offset.
fn push_out(projection: &Projection, position: Point2) -> Point2 {
    let delta = position.sub_point(projection.center());
    let norm = delta.length();
    if norm == 0.0 {
        return position;
    }
    position.add_point(delta.scale(LABEL_OFFSET / norm))
}

fn clamp_to(limits: [AxisRange; 3], coords: [f64; 3]) -> Point3 {
    let clamped: [f64; 3] =
        std::array::from_fn(|i| coords[i].clamp(limits[i].min(), limits[i].max()));
    clamped.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::LayoutConfig,
        layout::{Layout3Request, ViewportEngine},
    };

    fn viewport(request: &Layout3Request) -> Viewport3 {
        let config = LayoutConfig::default();
        ViewportEngine::new(&config)
            .layout_3d([Point3::new(1.0, 1.0, 1.0)], request)
            .unwrap()
    }

    #[test]
    fn test_frame_has_twelve_edges() {
        let mut canvas = SvgCanvas3d::new(&StyleConfig::default()).unwrap();
        canvas.configure(&viewport(&Layout3Request::default())).unwrap();
        let markup = canvas.into_svg().unwrap();
        assert_eq!(markup.matches("<line").count(), 12);
    }

    #[test]
    fn test_explicit_ticks_are_labelled() {
        let request = Layout3Request {
            ticks: Some([vec![-1.0, 1.0], vec![0.0], vec![]]),
            ..Layout3Request::default()
        };
        let mut canvas = SvgCanvas3d::new(&StyleConfig::default()).unwrap();
        canvas.configure(&viewport(&request)).unwrap();
        let markup = canvas.into_svg().unwrap();
        // Three tick labels and three axis names.
        assert_eq!(markup.matches("<text").count(), 6);
    }

    #[test]
    fn test_arrow_head_drawn() {
        let mut canvas = SvgCanvas3d::new(&StyleConfig::default()).unwrap();
        canvas.configure(&viewport(&Layout3Request::default())).unwrap();
        let tip = Point3::new(1.0, 1.0, 1.0);
        canvas
            .arrow(&ArrowGlyph {
                tail: Point3::origin(),
                shaft_end: tip,
                tip,
                head: HeadSize::Screen { length: 20.0 },
                color: Color::red(),
            })
            .unwrap();
        canvas.show().unwrap();
        let markup = canvas.svg().unwrap();
        assert!(markup.contains("fill-opacity=\"1\""));
    }

    #[test]
    fn test_zero_length_arrow_does_not_fail() {
        let mut canvas = SvgCanvas3d::new(&StyleConfig::default()).unwrap();
        canvas.configure(&viewport(&Layout3Request::default())).unwrap();
        let p = Point3::new(1.0, 0.0, 0.0);
        let result = canvas.arrow(&ArrowGlyph {
            tail: p,
            shaft_end: p,
            tip: p,
            head: HeadSize::Screen { length: 20.0 },
            color: Color::red(),
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_data_sized_head_rejected() {
        let mut canvas = SvgCanvas3d::new(&StyleConfig::default()).unwrap();
        canvas.configure(&viewport(&Layout3Request::default())).unwrap();
        let tip = Point3::new(1.0, 1.0, 0.0);
        let result = canvas.arrow(&ArrowGlyph {
            tail: Point3::origin(),
            shaft_end: tip,
            tip,
            head: HeadSize::Data {
                length: 0.5,
                width: 0.3,
            },
            color: Color::red(),
        });
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_label_edge_is_on_limits_box() {
        let config = LayoutConfig::default();
        let viewport = ViewportEngine::new(&config)
            .layout_3d([Point3::new(1.0, 1.0, 1.0)], &Layout3Request::default())
            .unwrap();
        let projection = Projection::new(
            viewport.limits(),
            viewport.view(),
            viewport.size(),
            0.0,
        );
        let edge = label_edge(&projection, 0);
        let [_, y, z] = viewport.limits();
        assert!(edge[1] == y.min() || edge[1] == y.max());
        assert_eq!(edge[2], z.min());
    }
}
