//! 2D viewport computation.

use log::{debug, trace};

use vecplot_core::geometry::{AxisRange, FigureSize, Point2};

use super::{ViewportEngine, check_range, check_width, grid_ticks};
use crate::VecplotError;

/// Grid cell size along x and y, both strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpacing {
    x: f64,
    y: f64,
}

impl GridSpacing {
    /// Creates a grid spacing.
    ///
    /// # Errors
    ///
    /// Returns [`VecplotError::InvalidOption`] unless both spacings are
    /// finite and positive.
    pub fn new(x: f64, y: f64) -> Result<Self, VecplotError> {
        for (axis, spacing) in [("x", x), ("y", y)] {
            if !(spacing.is_finite() && spacing > 0.0) {
                return Err(VecplotError::InvalidOption(format!(
                    "grid spacing along {axis} must be a positive number, got {spacing}"
                )));
            }
        }
        Ok(Self { x, y })
    }

    /// One unit in both directions.
    pub fn unit() -> Self {
        Self { x: 1.0, y: 1.0 }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }
}

impl Default for GridSpacing {
    fn default() -> Self {
        Self::unit()
    }
}

/// Inputs of a 2D layout pass besides the coordinates themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout2Request {
    /// Grid to snap to, or `None` for an ungridded plot.
    pub grid: Option<GridSpacing>,
    /// Derive the figure height from the data so units are square.
    pub preserve_aspect: bool,
    /// Figure width in inches.
    pub width: f64,
}

impl Default for Layout2Request {
    fn default() -> Self {
        Self {
            grid: Some(GridSpacing::unit()),
            preserve_aspect: true,
            width: 6.0,
        }
    }
}

/// The computed 2D viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport2 {
    x: AxisRange,
    y: AxisRange,
    x_ticks: Vec<f64>,
    y_ticks: Vec<f64>,
    size: FigureSize,
    grid: Option<GridSpacing>,
}

impl Viewport2 {
    pub fn x(&self) -> AxisRange {
        self.x
    }

    pub fn y(&self) -> AxisRange {
        self.y
    }

    /// Gridline positions along x; empty for ungridded plots.
    pub fn x_ticks(&self) -> &[f64] {
        &self.x_ticks
    }

    /// Gridline positions along y; empty for ungridded plots.
    pub fn y_ticks(&self) -> &[f64] {
        &self.y_ticks
    }

    pub fn size(&self) -> FigureSize {
        self.size
    }

    pub fn grid(&self) -> Option<GridSpacing> {
        self.grid
    }

    /// The horizontal and vertical axis lines through the origin, each
    /// spanning the full viewport.
    pub fn axis_segments(&self) -> [(Point2, Point2); 2] {
        [
            (
                Point2::new(self.x.min(), 0.0),
                Point2::new(self.x.max(), 0.0),
            ),
            (
                Point2::new(0.0, self.y.min()),
                Point2::new(0.0, self.y.max()),
            ),
        ]
    }
}

impl ViewportEngine<'_> {
    /// Computes the 2D viewport containing `vectors` and the origin.
    ///
    /// # Errors
    ///
    /// - [`VecplotError::EmptyScene`] if `vectors` is empty
    /// - [`VecplotError::InvalidOption`] if the layout config or the requested
    ///   width is invalid, a padded range is not finite, or the grid needs
    ///   more than [`MAX_GRID_TICKS`](super::MAX_GRID_TICKS) ticks on an axis
    pub fn layout_2d(
        &self,
        vectors: impl IntoIterator<Item = Point2>,
        request: &Layout2Request,
    ) -> Result<Viewport2, VecplotError> {
        self.config().validate()?;

        let (x_extent, y_extent) = vectors
            .into_iter()
            .fold(None, |extent: Option<(AxisRange, AxisRange)>, v| {
                let (x, y) = extent.unwrap_or((AxisRange::at_origin(), AxisRange::at_origin()));
                Some((x.include(v.x()), y.include(v.y())))
            })
            .ok_or(VecplotError::EmptyScene)?;
        check_width(request.width)?;

        debug!(
            min_x = x_extent.min(),
            max_x = x_extent.max(),
            min_y = y_extent.min(),
            max_y = y_extent.max();
            "Computed 2D extent"
        );

        let (x, y, x_ticks, y_ticks) = match request.grid {
            Some(grid) => {
                let x = check_range("x", self.pad_gridded(x_extent, grid.x()))?;
                let y = check_range("y", self.pad_gridded(y_extent, grid.y()))?;
                let x_ticks = grid_ticks("x", x, grid.x())?;
                let y_ticks = grid_ticks("y", y, grid.y())?;
                (x, y, x_ticks, y_ticks)
            }
            None => (
                check_range("x", self.pad_plain(x_extent))?,
                check_range("y", self.pad_plain(y_extent))?,
                Vec::new(),
                Vec::new(),
            ),
        };

        let height = if request.preserve_aspect {
            request.width * (y.span() / x.span())
        } else {
            request.width * self.config().default_aspect()
        };

        let viewport = Viewport2 {
            x,
            y,
            x_ticks,
            y_ticks,
            size: FigureSize::new(request.width, height),
            grid: request.grid,
        };

        debug!(
            x_min = x.min(),
            x_max = x.max(),
            y_min = y.min(),
            y_max = y.max(),
            width = request.width,
            height;
            "Computed 2D viewport"
        );
        trace!(viewport:?; "2D viewport");

        Ok(viewport)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::config::LayoutConfig;

    fn layout(points: &[[f64; 2]], request: Layout2Request) -> Result<Viewport2, VecplotError> {
        let config = LayoutConfig::default();
        ViewportEngine::new(&config)
            .layout_2d(points.iter().copied().map(Point2::from), &request)
    }

    #[test]
    fn test_single_point_unit_grid() {
        let viewport = layout(&[[3.0, 3.0]], Layout2Request::default()).unwrap();
        assert_eq!(viewport.x(), AxisRange::new(-1.0, 4.0));
        assert_eq!(viewport.y(), AxisRange::new(-1.0, 4.0));
        assert_eq!(viewport.x_ticks(), &[-1.0, 0.0, 1.0, 2.0, 3.0]);
        assert_eq!(viewport.size(), FigureSize::new(6.0, 6.0));
    }

    #[test]
    fn test_large_extent_pads_by_fraction() {
        // extent [0, 100]: ceil(5.0) = 5 beats one unit of grid
        let viewport = layout(&[[100.0, 1.0]], Layout2Request::default()).unwrap();
        assert_eq!(viewport.x(), AxisRange::new(-5.0, 105.0));
        assert_eq!(viewport.y(), AxisRange::new(-1.0, 2.0));
    }

    #[test]
    fn test_negative_coordinates() {
        let viewport = layout(&[[-2.5, -7.0], [1.0, 0.5]], Layout2Request::default()).unwrap();
        assert_eq!(viewport.x(), AxisRange::new(-4.0, 2.0));
        assert_eq!(viewport.y(), AxisRange::new(-8.0, 2.0));
    }

    #[test]
    fn test_ungridded_padding() {
        let request = Layout2Request {
            grid: None,
            ..Layout2Request::default()
        };
        let viewport = layout(&[[10.0, 4.0]], request).unwrap();
        assert_approx_eq!(f64, viewport.x().min(), -0.5);
        assert_approx_eq!(f64, viewport.x().max(), 10.5);
        assert_approx_eq!(f64, viewport.y().min(), -0.2);
        assert_approx_eq!(f64, viewport.y().max(), 4.2);
        assert!(viewport.x_ticks().is_empty());
        assert!(viewport.grid().is_none());
    }

    #[test]
    fn test_ungridded_degenerate_axis() {
        let request = Layout2Request {
            grid: None,
            ..Layout2Request::default()
        };
        // every y is zero: the y range must still have height
        let viewport = layout(&[[2.0, 0.0], [4.0, 0.0]], request).unwrap();
        assert_eq!(viewport.y(), AxisRange::new(-1.0, 1.0));
        assert!(viewport.size().height() > 0.0);
    }

    #[test]
    fn test_origin_only_scene() {
        let viewport = layout(&[[0.0, 0.0]], Layout2Request::default()).unwrap();
        assert_eq!(viewport.x(), AxisRange::new(-1.0, 1.0));
        assert_eq!(viewport.y(), AxisRange::new(-1.0, 1.0));
    }

    #[test]
    fn test_aspect_not_preserved() {
        let request = Layout2Request {
            preserve_aspect: false,
            width: 8.0,
            ..Layout2Request::default()
        };
        let viewport = layout(&[[10.0, 1.0]], request).unwrap();
        assert_approx_eq!(f64, viewport.size().height(), 6.0);
    }

    #[test]
    fn test_empty_scene() {
        let result = layout(&[], Layout2Request::default());
        assert!(matches!(result, Err(VecplotError::EmptyScene)));
    }

    #[test]
    fn test_invalid_width() {
        let request = Layout2Request {
            width: -1.0,
            ..Layout2Request::default()
        };
        let result = layout(&[[1.0, 1.0]], request);
        assert!(matches!(result, Err(VecplotError::InvalidOption(_))));
    }

    #[test]
    fn test_empty_scene_reported_before_width() {
        let request = Layout2Request {
            width: -1.0,
            ..Layout2Request::default()
        };
        let result = layout(&[], request);
        assert!(matches!(result, Err(VecplotError::EmptyScene)));
    }

    #[test]
    fn test_huge_coordinates_rejected_by_grid_cap() {
        let result = layout(&[[1e18, 1.0]], Layout2Request::default());
        assert!(matches!(result, Err(VecplotError::InvalidOption(_))));

        let result = layout(&[[1e20, 1.0]], Layout2Request::default());
        assert!(matches!(result, Err(VecplotError::InvalidOption(_))));

        // A coarser grid brings the same point back under the cap.
        let request = Layout2Request {
            grid: Some(GridSpacing::new(1e15, 1.0).unwrap()),
            ..Layout2Request::default()
        };
        let viewport = layout(&[[1e18, 1.0]], request).unwrap();
        assert!(viewport.x_ticks().len() <= crate::layout::MAX_GRID_TICKS);
    }

    #[test]
    fn test_overflowing_extent_rejected() {
        let ungridded = Layout2Request {
            grid: None,
            ..Layout2Request::default()
        };
        let result = layout(&[[f64::MAX, 1.0], [-f64::MAX, 0.0]], ungridded);
        assert!(matches!(result, Err(VecplotError::InvalidOption(_))));

        let result = layout(&[[f64::MAX, 1.0]], Layout2Request::default());
        assert!(matches!(result, Err(VecplotError::InvalidOption(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config: LayoutConfig = toml::from_str("padding_fraction = -1.0").unwrap();
        let request = Layout2Request {
            grid: None,
            ..Layout2Request::default()
        };
        let result = ViewportEngine::new(&config).layout_2d([Point2::new(10.0, 4.0)], &request);
        assert!(matches!(result, Err(VecplotError::InvalidOption(_))));

        let config: LayoutConfig = toml::from_str("degenerate_padding = 0.0").unwrap();
        let result = ViewportEngine::new(&config).layout_2d([Point2::new(2.0, 0.0)], &request);
        assert!(matches!(result, Err(VecplotError::InvalidOption(_))));
    }

    #[test]
    fn test_grid_spacing_validation() {
        assert!(GridSpacing::new(0.5, 2.0).is_ok());
        assert!(GridSpacing::new(0.0, 1.0).is_err());
        assert!(GridSpacing::new(1.0, -1.0).is_err());
        assert!(GridSpacing::new(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_axis_segments_span_viewport() {
        let viewport = layout(&[[3.0, 3.0]], Layout2Request::default()).unwrap();
        let [horizontal, vertical] = viewport.axis_segments();
        assert_eq!(horizontal, (Point2::new(-1.0, 0.0), Point2::new(4.0, 0.0)));
        assert_eq!(vertical, (Point2::new(0.0, -1.0), Point2::new(0.0, 4.0)));
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::config::LayoutConfig;

    fn points_strategy() -> impl Strategy<Value = Vec<Point2>> {
        prop::collection::vec(
            (-500.0f64..500.0, -500.0f64..500.0).prop_map(|(x, y)| Point2::new(x, y)),
            1..20,
        )
    }

    fn grid_strategy() -> impl Strategy<Value = Option<GridSpacing>> {
        prop_oneof![
            Just(None),
            (0.25f64..10.0, 0.25f64..10.0)
                .prop_map(|(x, y)| Some(GridSpacing::new(x, y).expect("positive spacing"))),
        ]
    }

    fn request_strategy() -> impl Strategy<Value = Layout2Request> {
        (grid_strategy(), 1.0f64..20.0).prop_map(|(grid, width)| Layout2Request {
            grid,
            preserve_aspect: true,
            width,
        })
    }

    fn is_multiple(value: f64, spacing: f64) -> bool {
        let steps = value / spacing;
        approx_eq!(f64, steps, steps.round(), epsilon = 1e-6)
    }

    /// Both ranges contain the origin and every input coordinate.
    fn check_range_contains_inputs(
        points: Vec<Point2>,
        request: Layout2Request,
    ) -> Result<(), TestCaseError> {
        let config = LayoutConfig::default();
        let viewport = ViewportEngine::new(&config)
            .layout_2d(points.iter().copied(), &request)
            .expect("non-empty scene");

        prop_assert!(viewport.x().contains(0.0));
        prop_assert!(viewport.y().contains(0.0));
        for p in &points {
            prop_assert!(viewport.x().contains(p.x()));
            prop_assert!(viewport.y().contains(p.y()));
        }
        Ok(())
    }

    /// Gridded range ends are multiples of the grid spacing.
    fn check_range_snapped_to_grid(
        points: Vec<Point2>,
        request: Layout2Request,
    ) -> Result<(), TestCaseError> {
        let Some(grid) = request.grid else {
            return Ok(());
        };
        let config = LayoutConfig::default();
        let viewport = ViewportEngine::new(&config)
            .layout_2d(points, &request)
            .expect("non-empty scene");

        prop_assert!(is_multiple(viewport.x().min(), grid.x()));
        prop_assert!(is_multiple(viewport.x().max(), grid.x()));
        prop_assert!(is_multiple(viewport.y().min(), grid.y()));
        prop_assert!(is_multiple(viewport.y().max(), grid.y()));
        prop_assert!(viewport.x_ticks().iter().all(|t| *t < viewport.x().max()));
        Ok(())
    }

    /// With aspect preserved, figure proportions match the data proportions.
    fn check_aspect_preserved(
        points: Vec<Point2>,
        request: Layout2Request,
    ) -> Result<(), TestCaseError> {
        let config = LayoutConfig::default();
        let viewport = ViewportEngine::new(&config)
            .layout_2d(points, &request)
            .expect("non-empty scene");

        let expected = viewport.y().span() / viewport.x().span();
        prop_assert!(approx_eq!(
            f64,
            viewport.size().aspect(),
            expected,
            epsilon = 1e-9
        ));
        prop_assert!(viewport.x().span() > 0.0 && viewport.y().span() > 0.0);
        Ok(())
    }

    proptest! {
        #[test]
        fn range_contains_inputs(points in points_strategy(), request in request_strategy()) {
            check_range_contains_inputs(points, request)?;
        }

        #[test]
        fn range_snapped_to_grid(points in points_strategy(), request in request_strategy()) {
            check_range_snapped_to_grid(points, request)?;
        }

        #[test]
        fn aspect_preserved(points in points_strategy(), request in request_strategy()) {
            check_aspect_preserved(points, request)?;
        }
    }
}
