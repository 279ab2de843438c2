//! 2D primitives.

use crate::{color::Color, geometry::Point2};

/// Default fill opacity of polygons.
pub const DEFAULT_FILL_ALPHA: f32 = 0.4;

/// A closed polygon with an optional stroke and an optional fill.
///
/// Stroke and fill are independent: a polygon may be outlined, filled, both,
/// or (uselessly) neither.
///
/// # Examples
///
/// ```
/// use vecplot_core::color::Color;
/// use vecplot_core::primitive::Polygon2;
///
/// let square = Polygon2::new([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
///     .with_fill(Color::orange())
///     .without_stroke();
/// assert!(square.stroke().is_none());
/// assert_eq!(square.fill(), Some(Color::orange()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2 {
    vertices: Vec<Point2>,
    stroke: Option<Color>,
    fill: Option<Color>,
    alpha: f32,
}

impl Polygon2 {
    /// Creates a blue-outlined, unfilled polygon.
    pub fn new<P: Into<Point2>>(vertices: impl IntoIterator<Item = P>) -> Self {
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

    pub fn without_stroke(self) -> Self {
        self.with_stroke(None)
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

    pub fn vertices(&self) -> &[Point2] {
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

/// A set of unconnected points.
#[derive(Debug, Clone, PartialEq)]
pub struct Points2 {
    points: Vec<Point2>,
    color: Color,
}

impl Points2 {
    /// Creates a black point set.
    pub fn new<P: Into<Point2>>(points: impl IntoIterator<Item = P>) -> Self {
        Self {
            points: points.into_iter().map(Into::into).collect(),
            color: Color::black(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// An arrow from `tail` (the origin unless set) to `tip`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow2 {
    tip: Point2,
    tail: Point2,
    color: Color,
}

impl Arrow2 {
    /// Creates a red arrow from the origin to `tip`.
    pub fn new(tip: impl Into<Point2>) -> Self {
        Self {
            tip: tip.into(),
            tail: Point2::origin(),
            color: Color::red(),
        }
    }

    pub fn with_tail(mut self, tail: impl Into<Point2>) -> Self {
        self.tail = tail.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn tip(&self) -> Point2 {
        self.tip
    }

    pub fn tail(&self) -> Point2 {
        self.tail
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Displacement from tail to tip.
    pub fn displacement(&self) -> Point2 {
        self.tip.sub_point(self.tail)
    }
}

/// A straight line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment2 {
    start: Point2,
    end: Point2,
    color: Color,
}

impl Segment2 {
    /// Creates a blue segment.
    pub fn new(start: impl Into<Point2>, end: impl Into<Point2>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            color: Color::blue(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn start(&self) -> Point2 {
        self.start
    }

    pub fn end(&self) -> Point2 {
        self.end
    }

    pub fn color(&self) -> Color {
        self.color
    }
}
