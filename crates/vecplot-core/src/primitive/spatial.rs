//! 3D primitives.

use super::planar::DEFAULT_FILL_ALPHA;
use crate::{
    color::Color,
    draw::{StrokeDefinition, StrokeStyle},
    geometry::Point3,
};

/// A closed polygon in space. Outlined in blue unless configured otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon3 {
    vertices: Vec<Point3>,
    stroke: Option<Color>,
    fill: Option<Color>,
    alpha: f32,
}

impl Polygon3 {
    pub fn new<P: Into<Point3>>(vertices: impl IntoIterator<Item = P>) -> Self {
        Self {
            vertices: vertices.into_iter().map(Into::into).collect(),
            stroke: Some(Color::blue()),
            fill: None,
            alpha: DEFAULT_FILL_ALPHA,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    /// Sets the stroke color, `None` to skip the outline.
    pub fn with_stroke(mut self, stroke: Option<Color>) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Sets the fill opacity, clamped to `[0, 1]`.
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn stroke(&self) -> Option<Color> {
        self.stroke
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

/// A set of unconnected points in space.
#[derive(Debug, Clone, PartialEq)]
pub struct Points3 {
    points: Vec<Point3>,
    color: Color,
}

impl Points3 {
    pub fn new<P: Into<Point3>>(points: impl IntoIterator<Item = P>) -> Self {
        Self {
            points: points.into_iter().map(Into::into).collect(),
            color: Color::black(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// An arrow from `tail` (the origin unless set) to `head`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow3 {
    head: Point3,
    tail: Point3,
    color: Color,
}

impl Arrow3 {
    pub fn new(head: impl Into<Point3>) -> Self {
        Self {
            head: head.into(),
            tail: Point3::origin(),
            color: Color::red(),
        }
    }

    pub fn with_tail(mut self, tail: impl Into<Point3>) -> Self {
        self.tail = tail.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn head(&self) -> Point3 {
        self.head
    }

    pub fn tail(&self) -> Point3 {
        self.tail
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// A straight segment in space with a line style.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment3 {
    start: Point3,
    end: Point3,
    color: Color,
    style: StrokeStyle,
}

impl Segment3 {
    pub fn new(start: impl Into<Point3>, end: impl Into<Point3>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            color: Color::blue(),
            style: StrokeStyle::Solid,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn start(&self) -> Point3 {
        self.start
    }

    pub fn end(&self) -> Point3 {
        self.end
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

/// The axis-aligned box spanned by the origin and `corner`.
///
/// Only nine of the twelve box edges are drawn: the three edges that leave
/// the origin lie on the coordinate axes and are left to the axis lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Box3 {
    corner: Point3,
}

impl Box3 {
    pub fn new(corner: impl Into<Point3>) -> Self {
        Self {
            corner: corner.into(),
        }
    }

    pub fn corner(&self) -> Point3 {
        self.corner
    }

    /// The nine drawn edges.
    pub fn edges(&self) -> [(Point3, Point3); 9] {
        let [x, y, z] = self.corner.to_array();
        let p = |x, y, z| Point3::new(x, y, z);
        [
            (p(0.0, y, 0.0), p(x, y, 0.0)),
            (p(0.0, 0.0, z), p(0.0, y, z)),
            (p(0.0, 0.0, z), p(x, 0.0, z)),
            (p(0.0, y, 0.0), p(0.0, y, z)),
            (p(x, 0.0, 0.0), p(x, y, 0.0)),
            (p(x, 0.0, 0.0), p(x, 0.0, z)),
            (p(0.0, y, z), p(x, y, z)),
            (p(x, 0.0, z), p(x, y, z)),
            (p(x, y, 0.0), p(x, y, z)),
        ]
    }

    /// Fixed stroke of box edges; boxes carry no color of their own.
    pub fn stroke() -> StrokeDefinition {
        StrokeDefinition::dashed(Color::gray(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_edges_are_axis_parallel() {
        let cuboid = Box3::new([1.0, 2.0, 3.0]);
        for (a, b) in cuboid.edges() {
            let delta = b.sub_point(a).to_array();
            let moving_axes = delta.iter().filter(|d| **d != 0.0).count();
            assert_eq!(moving_axes, 1, "edge {a:?} -> {b:?} is not axis-parallel");
        }
    }

    #[test]
    fn test_box_edges_skip_origin() {
        let cuboid = Box3::new([1.0, 2.0, 3.0]);
        let edges = cuboid.edges();
        assert_eq!(edges.len(), 9);
        assert!(
            edges
                .iter()
                .all(|(a, b)| *a != Point3::origin() && *b != Point3::origin())
        );
    }

    #[test]
    fn test_box_stroke_is_dashed_gray() {
        let stroke = Box3::stroke();
        assert_eq!(stroke.color(), Color::gray());
        assert_eq!(*stroke.style(), StrokeStyle::Dashed);
    }

    #[test]
    fn test_segment_style() {
        let segment = Segment3::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        assert_eq!(*segment.style(), StrokeStyle::Solid);
        let dashed = segment.with_style(StrokeStyle::Dashed);
        assert_eq!(*dashed.style(), StrokeStyle::Dashed);
    }
}
