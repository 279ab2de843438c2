//! Scene primitives and coordinate extraction.
//!
//! A scene is an ordered list of primitives drawn from a closed set:
//!
//! | 2D ([`Primitive2`]) | 3D ([`Primitive3`]) |
//! |---------------------|---------------------|
//! | [`Polygon2`] | [`Polygon3`] |
//! | [`Points2`] | [`Points3`] |
//! | [`Arrow2`] | [`Arrow3`] |
//! | [`Segment2`] | [`Segment3`] |
//! | | [`Box3`] |
//!
//! Primitives are immutable values: they are built once by the caller,
//! consumed by a single render call and discarded.
//!
//! Layout only needs the coordinates a primitive contributes, which
//! [`extract_vectors_2d`] and [`extract_vectors_3d`] produce lazily.

mod planar;
mod spatial;

pub use planar::{Arrow2, Points2, Polygon2, Segment2};
pub use spatial::{Arrow3, Box3, Points3, Polygon3, Segment3};

use std::{array, iter, slice};

use log::trace;
use thiserror::Error;

use crate::geometry::{Point2, Point3};

/// Structural problems with a primitive that make it impossible to draw.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("{kind} needs at least {required} vertices, found {found}")]
    TooFewVertices {
        kind: &'static str,
        required: usize,
        found: usize,
    },

    #[error("{kind} contains a non-finite coordinate")]
    NonFiniteCoordinate { kind: &'static str },
}

/// The coordinates contributed by a single primitive.
///
/// Borrowed from the primitive; never allocates.
#[derive(Debug, Clone)]
pub enum Vectors<'a, P: Copy> {
    Many(iter::Copied<slice::Iter<'a, P>>),
    Pair(array::IntoIter<P, 2>),
    Single(iter::Once<P>),
}

impl<'a, P: Copy> Vectors<'a, P> {
    pub(crate) fn many(points: &'a [P]) -> Self {
        Self::Many(points.iter().copied())
    }

    pub(crate) fn pair(a: P, b: P) -> Self {
        Self::Pair([a, b].into_iter())
    }

    pub(crate) fn single(p: P) -> Self {
        Self::Single(iter::once(p))
    }
}

impl<P: Copy> Iterator for Vectors<'_, P> {
    type Item = P;

    fn next(&mut self) -> Option<P> {
        match self {
            Self::Many(inner) => inner.next(),
            Self::Pair(inner) => inner.next(),
            Self::Single(inner) => inner.next(),
        }
    }
}

/// Returns the cyclic edge list of a vertex ring: edge `i` joins vertex `i`
/// and vertex `(i + 1) % n`.
pub fn cyclic_edges<P: Copy>(vertices: &[P]) -> impl Iterator<Item = (P, P)> + '_ {
    let count = vertices.len();
    (0..count).map(move |i| (vertices[i], vertices[(i + 1) % count]))
}

/// Minimum vertex count of a polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

fn check_polygon(found: usize) -> Result<(), GeometryError> {
    if found < MIN_POLYGON_VERTICES {
        return Err(GeometryError::TooFewVertices {
            kind: "polygon",
            required: MIN_POLYGON_VERTICES,
            found,
        });
    }
    Ok(())
}

/// A drawable 2D primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive2 {
    Polygon(Polygon2),
    Points(Points2),
    Arrow(Arrow2),
    Segment(Segment2),
}

impl Primitive2 {
    /// Short lowercase name of the primitive kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Polygon(_) => "polygon",
            Self::Points(_) => "points",
            Self::Arrow(_) => "arrow",
            Self::Segment(_) => "segment",
        }
    }

    /// Coordinates this primitive contributes to layout: polygon vertices,
    /// every point of a point set, arrow tip and tail, segment endpoints.
    pub fn vectors(&self) -> Vectors<'_, Point2> {
        match self {
            Self::Polygon(polygon) => Vectors::many(polygon.vertices()),
            Self::Points(points) => Vectors::many(points.points()),
            Self::Arrow(arrow) => Vectors::pair(arrow.tip(), arrow.tail()),
            Self::Segment(segment) => Vectors::pair(segment.start(), segment.end()),
        }
    }

    /// Checks the primitive can be drawn.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] for polygons with fewer than
    /// three vertices and [`GeometryError::NonFiniteCoordinate`] when any
    /// coordinate is NaN or infinite.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if let Self::Polygon(polygon) = self {
            check_polygon(polygon.vertices().len())?;
        }
        if !self.vectors().all(Point2::is_finite) {
            return Err(GeometryError::NonFiniteCoordinate { kind: self.kind() });
        }
        Ok(())
    }
}

impl From<Polygon2> for Primitive2 {
    fn from(polygon: Polygon2) -> Self {
        Self::Polygon(polygon)
    }
}

impl From<Points2> for Primitive2 {
    fn from(points: Points2) -> Self {
        Self::Points(points)
    }
}

impl From<Arrow2> for Primitive2 {
    fn from(arrow: Arrow2) -> Self {
        Self::Arrow(arrow)
    }
}

impl From<Segment2> for Primitive2 {
    fn from(segment: Segment2) -> Self {
        Self::Segment(segment)
    }
}

/// A drawable 3D primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive3 {
    Polygon(Polygon3),
    Points(Points3),
    Arrow(Arrow3),
    Segment(Segment3),
    Box(Box3),
}

impl Primitive3 {
    /// Short lowercase name of the primitive kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Polygon(_) => "polygon",
            Self::Points(_) => "points",
            Self::Arrow(_) => "arrow",
            Self::Segment(_) => "segment",
            Self::Box(_) => "box",
        }
    }

    /// Coordinates this primitive contributes to layout. A box contributes
    /// only its stored corner.
    pub fn vectors(&self) -> Vectors<'_, Point3> {
        match self {
            Self::Polygon(polygon) => Vectors::many(polygon.vertices()),
            Self::Points(points) => Vectors::many(points.points()),
            Self::Arrow(arrow) => Vectors::pair(arrow.head(), arrow.tail()),
            Self::Segment(segment) => Vectors::pair(segment.start(), segment.end()),
            Self::Box(cuboid) => Vectors::single(cuboid.corner()),
        }
    }

    /// Checks the primitive can be drawn. See [`Primitive2::validate`].
    pub fn validate(&self) -> Result<(), GeometryError> {
        if let Self::Polygon(polygon) = self {
            check_polygon(polygon.vertices().len())?;
        }
        if !self.vectors().all(Point3::is_finite) {
            return Err(GeometryError::NonFiniteCoordinate { kind: self.kind() });
        }
        Ok(())
    }
}

impl From<Polygon3> for Primitive3 {
    fn from(polygon: Polygon3) -> Self {
        Self::Polygon(polygon)
    }
}

impl From<Points3> for Primitive3 {
    fn from(points: Points3) -> Self {
        Self::Points(points)
    }
}

impl From<Arrow3> for Primitive3 {
    fn from(arrow: Arrow3) -> Self {
        Self::Arrow(arrow)
    }
}

impl From<Segment3> for Primitive3 {
    fn from(segment: Segment3) -> Self {
        Self::Segment(segment)
    }
}

impl From<Box3> for Primitive3 {
    fn from(cuboid: Box3) -> Self {
        Self::Box(cuboid)
    }
}

/// Lazily yields every coordinate the 2D primitives contribute, in scene
/// order. The iterator is single-use; call again for another pass.
///
/// # Examples
///
/// ```
/// use vecplot_core::geometry::Point2;
/// use vecplot_core::primitive::{Arrow2, Points2, Primitive2, extract_vectors_2d};
///
/// let scene: Vec<Primitive2> = vec![
///     Arrow2::new([2.0, 1.0]).into(),
///     Points2::new([[1.0, 1.0], [3.0, -1.0]]).into(),
/// ];
/// let vectors: Vec<Point2> = extract_vectors_2d(&scene).collect();
/// assert_eq!(vectors.len(), 4);
/// assert_eq!(vectors[1], Point2::origin()); // arrow tail
/// ```
pub fn extract_vectors_2d(primitives: &[Primitive2]) -> impl Iterator<Item = Point2> + '_ {
    trace!(primitives = primitives.len(); "Extracting 2D vectors");
    primitives.iter().flat_map(Primitive2::vectors)
}

/// Lazily yields every coordinate the 3D primitives contribute, in scene
/// order. The iterator is single-use; call again for another pass.
pub fn extract_vectors_3d(primitives: &[Primitive3]) -> impl Iterator<Item = Point3> + '_ {
    trace!(primitives = primitives.len(); "Extracting 3D vectors");
    primitives.iter().flat_map(Primitive3::vectors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_2d_per_kind() {
        let scene: Vec<Primitive2> = vec![
            Polygon2::new([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]).into(),
            Points2::new([[5.0, 5.0]]).into(),
            Arrow2::new([2.0, 3.0]).with_tail([1.0, 1.0]).into(),
            Segment2::new([-1.0, 0.0], [0.0, -4.0]).into(),
        ];

        let vectors: Vec<Point2> = extract_vectors_2d(&scene).collect();
        assert_eq!(
            vectors,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(5.0, 5.0),
                Point2::new(2.0, 3.0),
                Point2::new(1.0, 1.0),
                Point2::new(-1.0, 0.0),
                Point2::new(0.0, -4.0),
            ]
        );
    }

    #[test]
    fn test_extract_3d_box_contributes_corner_only() {
        let scene: Vec<Primitive3> = vec![Box3::new([1.0, 2.0, 3.0]).into()];
        let vectors: Vec<Point3> = extract_vectors_3d(&scene).collect();
        assert_eq!(vectors, vec![Point3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn test_extract_3d_arrow_default_tail() {
        let scene: Vec<Primitive3> = vec![Arrow3::new([1.0, 1.0, 1.0]).into()];
        let vectors: Vec<Point3> = extract_vectors_3d(&scene).collect();
        assert_eq!(vectors, vec![Point3::new(1.0, 1.0, 1.0), Point3::origin()]);
    }

    #[test]
    fn test_extract_empty() {
        assert_eq!(extract_vectors_2d(&[]).count(), 0);

        let empty_points: Vec<Primitive2> = vec![Points2::new(Vec::<[f64; 2]>::new()).into()];
        assert_eq!(extract_vectors_2d(&empty_points).count(), 0);
    }

    #[test]
    fn test_cyclic_edges_wrap_around() {
        let ring = [1, 2, 3];
        let edges: Vec<_> = cyclic_edges(&ring).collect();
        assert_eq!(edges, vec![(1, 2), (2, 3), (3, 1)]);
        assert_eq!(cyclic_edges::<i32>(&[]).count(), 0);
    }

    #[test]
    fn test_validate_polygon_vertex_count() {
        let line: Primitive2 = Polygon2::new([[0.0, 0.0], [1.0, 1.0]]).into();
        assert_eq!(
            line.validate(),
            Err(GeometryError::TooFewVertices {
                kind: "polygon",
                required: 3,
                found: 2
            })
        );

        let triangle: Primitive3 =
            Polygon3::new([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]).into();
        assert!(triangle.validate().is_ok());
    }

    #[test]
    fn test_validate_non_finite() {
        let arrow: Primitive2 = Arrow2::new([f64::NAN, 1.0]).into();
        let err = arrow.validate().unwrap_err();
        assert_eq!(err, GeometryError::NonFiniteCoordinate { kind: "arrow" });
        assert_eq!(err.to_string(), "arrow contains a non-finite coordinate");
    }

    #[test]
    fn test_kind_names() {
        let segment: Primitive2 = Segment2::new([0.0, 0.0], [1.0, 1.0]).into();
        assert_eq!(segment.kind(), "segment");
        let cuboid: Primitive3 = Box3::new([1.0, 1.0, 1.0]).into();
        assert_eq!(cuboid.kind(), "box");
    }
}
