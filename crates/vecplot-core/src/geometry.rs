//! Coordinate types for scene layout.
//!
//! This module provides the fundamental geometric types used throughout
//! vecplot for describing primitive coordinates and the computed viewport.
//!
//! # Overview
//!
//! - [`Point2`] - A coordinate tuple `(x, y)` in scene space
//! - [`Point3`] - A coordinate tuple `(x, y, z)` in scene space
//! - [`AxisRange`] - A closed `[min, max]` interval along one axis
//! - [`FigureSize`] - The physical size of the rendered figure, in inches
//!
//! # Coordinate System
//!
//! Scene coordinates are mathematical coordinates: the origin sits at
//! `(0, 0)` (or `(0, 0, 0)`), X increases rightward and Y increases upward.
//! Backends that draw in screen space (such as SVG, where Y grows downward)
//! flip the axis themselves.

use crate::vector;

/// A 2D coordinate tuple in scene space.
///
/// # Examples
///
/// ```
/// # use vecplot_core::geometry::Point2;
/// let p1 = Point2::new(3.0, 4.0);
/// let p2 = Point2::from([1.0, 1.0]);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 4.0);
/// assert_eq!(sum.y(), 5.0);
/// assert_eq!(p1.length(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2 {
    x: f64,
    y: f64,
}

impl Point2 {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    pub fn origin() -> Self {
        Self::default()
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the coordinates as a fixed-size tuple.
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Checks if both coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Checks that neither coordinate is NaN or infinite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point2) -> Self {
        vector::add([self.to_array(), other.to_array()]).into()
    }

    /// Subtracts another point from this point, returning a new point.
    pub fn sub_point(self, other: Point2) -> Self {
        vector::subtract(self.to_array(), other.to_array()).into()
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f64) -> Self {
        vector::scale(self.to_array(), factor).into()
    }

    /// Euclidean distance from the origin.
    pub fn length(self) -> f64 {
        vector::length(self.to_array())
    }
}

impl From<[f64; 2]> for Point2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point2> for [f64; 2] {
    fn from(point: Point2) -> Self {
        point.to_array()
    }
}

/// A 3D coordinate tuple in scene space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Point3 {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin `(0, 0, 0)`.
    pub fn origin() -> Self {
        Self::default()
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn z(self) -> f64 {
        self.z
    }

    /// Returns the coordinates as a fixed-size tuple.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Checks that no coordinate is NaN or infinite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point3) -> Self {
        vector::add([self.to_array(), other.to_array()]).into()
    }

    /// Subtracts another point from this point, returning a new point.
    pub fn sub_point(self, other: Point3) -> Self {
        vector::subtract(self.to_array(), other.to_array()).into()
    }

    /// Euclidean distance from the origin.
    pub fn length(self) -> f64 {
        vector::length(self.to_array())
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<(f64, f64, f64)> for Point3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

impl From<Point3> for [f64; 3] {
    fn from(point: Point3) -> Self {
        point.to_array()
    }
}

/// A closed interval `[min, max]` along one axis.
///
/// # Examples
///
/// ```
/// # use vecplot_core::geometry::AxisRange;
/// let range = AxisRange::new(-1.0, 4.0);
/// assert_eq!(range.span(), 5.0);
/// assert!(range.contains(0.0));
/// assert!(!range.contains(4.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    min: f64,
    max: f64,
}

impl AxisRange {
    /// Creates a new range. Callers are expected to pass `min <= max`.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The range that covers only the origin.
    pub fn at_origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn min(self) -> f64 {
        self.min
    }

    pub fn max(self) -> f64 {
        self.max
    }

    /// Distance between `min` and `max`.
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Returns true if `value` lies inside the closed interval.
    pub fn contains(self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Grows the range so it covers `value`.
    pub fn include(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    /// Grows the range by `padding` on both ends.
    pub fn pad(self, padding: f64) -> Self {
        Self {
            min: self.min - padding,
            max: self.max + padding,
        }
    }

    /// Returns true if `min <= max` and both ends are finite.
    pub fn is_well_formed(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

impl From<(f64, f64)> for AxisRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

impl From<[f64; 2]> for AxisRange {
    fn from([min, max]: [f64; 2]) -> Self {
        Self::new(min, max)
    }
}

/// Physical size of a rendered figure, in inches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FigureSize {
    width: f64,
    height: f64,
}

impl FigureSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }

    /// Height divided by width.
    pub fn aspect(self) -> f64 {
        self.height / self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2_conversions() {
        let p: Point2 = [1.5, -2.0].into();
        assert_eq!(p, Point2::new(1.5, -2.0));
        assert_eq!(Point2::from((1.5, -2.0)), p);
        assert_eq!(<[f64; 2]>::from(p), [1.5, -2.0]);
    }

    #[test]
    fn test_point2_arithmetic() {
        let a = Point2::new(3.0, 1.0);
        let b = Point2::new(1.0, 2.0);
        assert_eq!(a.add_point(b), Point2::new(4.0, 3.0));
        assert_eq!(a.sub_point(b), Point2::new(2.0, -1.0));
        assert_eq!(b.scale(2.0), Point2::new(2.0, 4.0));
        assert_eq!(Point2::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn test_point2_predicates() {
        assert!(Point2::origin().is_zero());
        assert!(!Point2::new(0.0, 0.1).is_zero());
        assert!(Point2::new(1.0, 2.0).is_finite());
        assert!(!Point2::new(f64::NAN, 2.0).is_finite());
        assert!(!Point2::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_point3_arithmetic() {
        let a = Point3::new(1.0, 2.0, 2.0);
        assert_eq!(a.length(), 3.0);
        assert_eq!(a.add_point(a), Point3::new(2.0, 4.0, 4.0));
        assert_eq!(a.sub_point(a), Point3::origin());
        assert!(!Point3::new(0.0, 0.0, f64::NAN).is_finite());
    }

    #[test]
    fn test_axis_range_include_and_pad() {
        let range = AxisRange::at_origin().include(3.0).include(-1.0);
        assert_eq!(range, AxisRange::new(-1.0, 3.0));

        let padded = range.pad(0.5);
        assert_eq!(padded.min(), -1.5);
        assert_eq!(padded.max(), 3.5);
        assert_eq!(padded.span(), 5.0);
    }

    #[test]
    fn test_axis_range_well_formed() {
        assert!(AxisRange::new(-1.0, 1.0).is_well_formed());
        assert!(AxisRange::new(2.0, 2.0).is_well_formed());
        assert!(!AxisRange::new(2.0, 1.0).is_well_formed());
        assert!(!AxisRange::new(f64::NEG_INFINITY, 1.0).is_well_formed());
    }

    #[test]
    fn test_figure_size_aspect() {
        let size = FigureSize::new(6.0, 3.0);
        assert_eq!(size.aspect(), 0.5);
    }
}
