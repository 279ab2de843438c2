//! 3D viewport computation.

use log::{debug, trace};

use vecplot_core::geometry::{AxisRange, FigureSize, Point3};

use super::{ViewportEngine, check_range, check_width};
use crate::VecplotError;

/// Camera orientation in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewAngles {
    azimuth: f64,
    elevation: f64,
}

impl ViewAngles {
    pub const DEFAULT_AZIMUTH: f64 = -60.0;
    pub const DEFAULT_ELEVATION: f64 = 30.0;

    pub fn new(azimuth: f64, elevation: f64) -> Self {
        Self { azimuth, elevation }
    }

    /// Fills unset angles with the defaults.
    pub fn resolve(azimuth: Option<f64>, elevation: Option<f64>) -> Self {
        Self::new(
            azimuth.unwrap_or(Self::DEFAULT_AZIMUTH),
            elevation.unwrap_or(Self::DEFAULT_ELEVATION),
        )
    }

    pub fn azimuth(self) -> f64 {
        self.azimuth
    }

    pub fn elevation(self) -> f64 {
        self.elevation
    }
}

impl Default for ViewAngles {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

/// Inputs of a 3D layout pass besides the coordinates themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout3Request {
    /// Figure width in inches.
    pub width: f64,
    pub view: ViewAngles,
    /// Displayed x/y/z limits overriding the computed ranges.
    pub limits: Option<[AxisRange; 3]>,
    /// Explicit x/y/z tick positions; backend defaults otherwise.
    pub ticks: Option<[Vec<f64>; 3]>,
}

impl Default for Layout3Request {
    fn default() -> Self {
        Self {
            width: 6.0,
            view: ViewAngles::default(),
            limits: None,
            ticks: None,
        }
    }
}

/// The computed 3D viewport.
///
/// `content` holds the padded ranges computed from the scene and is what
/// axis lines span; `limits` is what the backend displays, which differs
/// from `content` only when the caller overrides the limits.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport3 {
    content: [AxisRange; 3],
    limits: [AxisRange; 3],
    ticks: Option<[Vec<f64>; 3]>,
    size: FigureSize,
    view: ViewAngles,
}

impl Viewport3 {
    /// Computed x/y/z ranges.
    pub fn content(&self) -> [AxisRange; 3] {
        self.content
    }

    /// Displayed x/y/z ranges.
    pub fn limits(&self) -> [AxisRange; 3] {
        self.limits
    }

    pub fn ticks(&self) -> Option<&[Vec<f64>; 3]> {
        self.ticks.as_ref()
    }

    pub fn size(&self) -> FigureSize {
        self.size
    }

    pub fn view(&self) -> ViewAngles {
        self.view
    }

    /// One line per dimension through the origin, spanning the computed range.
    pub fn axis_segments(&self) -> [(Point3, Point3); 3] {
        let [x, y, z] = self.content;
        [
            (
                Point3::new(x.min(), 0.0, 0.0),
                Point3::new(x.max(), 0.0, 0.0),
            ),
            (
                Point3::new(0.0, y.min(), 0.0),
                Point3::new(0.0, y.max(), 0.0),
            ),
            (
                Point3::new(0.0, 0.0, z.min()),
                Point3::new(0.0, 0.0, z.max()),
            ),
        ]
    }
}

impl ViewportEngine<'_> {
    /// Computes the 3D viewport containing `vectors`, the origin and the
    /// minimum visible axis length.
    ///
    /// # Errors
    ///
    /// - [`VecplotError::EmptyScene`] if `vectors` is empty
    /// - [`VecplotError::InvalidOption`] for an invalid layout config, a
    ///   non-positive width, malformed limits or coordinates too large to pad
    pub fn layout_3d(
        &self,
        vectors: impl IntoIterator<Item = Point3>,
        request: &Layout3Request,
    ) -> Result<Viewport3, VecplotError> {
        self.config().validate()?;

        let extent = vectors
            .into_iter()
            .fold(None, |extent: Option<[AxisRange; 3]>, v| {
                let ranges = extent.unwrap_or([AxisRange::at_origin(); 3]);
                let coords = v.to_array();
                Some(std::array::from_fn(|i| ranges[i].include(coords[i])))
            })
            .ok_or(VecplotError::EmptyScene)?;

        check_width(request.width)?;
        if let Some(limits) = &request.limits {
            for (axis, range) in ["x", "y", "z"].into_iter().zip(limits) {
                if !range.is_well_formed() || range.span() == 0.0 {
                    return Err(VecplotError::InvalidOption(format!(
                        "{axis} limits must be finite with min < max, got [{}, {}]",
                        range.min(),
                        range.max()
                    )));
                }
            }
        }

        let minimum = self.config().min_axis_extent_3d();
        let content = extent.map(|range| {
            let padded = self.pad_plain(range);
            AxisRange::new(padded.min().min(-minimum), padded.max().max(minimum))
        });
        for (axis, range) in ["x", "y", "z"].into_iter().zip(content) {
            check_range(axis, range)?;
        }
        let limits = request.limits.unwrap_or(content);

        let width = request.width;
        let size = FigureSize::new(width, width * self.config().default_aspect());

        let viewport = Viewport3 {
            content,
            limits,
            ticks: request.ticks.clone(),
            size,
            view: request.view,
        };

        debug!(
            x_min = content[0].min(),
            x_max = content[0].max(),
            y_min = content[1].min(),
            y_max = content[1].max(),
            z_min = content[2].min(),
            z_max = content[2].max(),
            overridden = request.limits.is_some();
            "Computed 3D viewport"
        );
        trace!(viewport:?; "3D viewport");

        Ok(viewport)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::config::LayoutConfig;

    fn layout(points: &[[f64; 3]], request: &Layout3Request) -> Result<Viewport3, VecplotError> {
        let config = LayoutConfig::default();
        ViewportEngine::new(&config).layout_3d(points.iter().copied().map(Point3::from), request)
    }

    #[test]
    fn test_small_scene_shows_minimum_axes() {
        let viewport = layout(&[[1.0, 0.5, 0.0]], &Layout3Request::default()).unwrap();
        for range in viewport.content() {
            assert!(range.min() <= -2.0);
            assert!(range.max() >= 2.0);
        }
        assert_eq!(viewport.content()[2], AxisRange::new(-2.0, 2.0));
    }

    #[test]
    fn test_large_scene_pads_five_percent() {
        let viewport = layout(&[[10.0, -20.0, 40.0]], &Layout3Request::default()).unwrap();
        let [x, y, z] = viewport.content();
        assert_approx_eq!(f64, x.max(), 10.5);
        assert_eq!(x.min(), -2.0);
        assert_approx_eq!(f64, y.min(), -21.0);
        assert_eq!(y.max(), 2.0);
        assert_approx_eq!(f64, z.max(), 42.0);
    }

    #[test]
    fn test_limits_override_display_only() {
        let limits = [
            AxisRange::new(-5.0, 5.0),
            AxisRange::new(-6.0, 6.0),
            AxisRange::new(-7.0, 7.0),
        ];
        let request = Layout3Request {
            limits: Some(limits),
            ..Layout3Request::default()
        };
        let viewport = layout(&[[1.0, 1.0, 1.0]], &request).unwrap();
        assert_eq!(viewport.limits(), limits);
        assert_eq!(viewport.content()[0], AxisRange::new(-2.0, 2.0));
    }

    #[test]
    fn test_malformed_limits_rejected() {
        let request = Layout3Request {
            limits: Some([
                AxisRange::new(-5.0, 5.0),
                AxisRange::new(3.0, 3.0),
                AxisRange::new(-7.0, 7.0),
            ]),
            ..Layout3Request::default()
        };
        let err = layout(&[[1.0, 1.0, 1.0]], &request).unwrap_err();
        assert!(err.to_string().contains("y limits"));
    }

    #[test]
    fn test_axis_segments() {
        let viewport = layout(&[[3.0, 0.0, 0.0]], &Layout3Request::default()).unwrap();
        let [x_axis, _, z_axis] = viewport.axis_segments();
        assert_eq!(x_axis.0, Point3::new(-2.0, 0.0, 0.0));
        assert_approx_eq!(f64, x_axis.1.x(), 3.15);
        assert_eq!(z_axis, (Point3::new(0.0, 0.0, -2.0), Point3::new(0.0, 0.0, 2.0)));
    }

    #[test]
    fn test_view_angles_resolve() {
        let view = ViewAngles::resolve(Some(10.0), None);
        assert_eq!(view.azimuth(), 10.0);
        assert_eq!(view.elevation(), ViewAngles::DEFAULT_ELEVATION);
    }

    #[test]
    fn test_empty_scene() {
        let result = layout(&[], &Layout3Request::default());
        assert!(matches!(result, Err(VecplotError::EmptyScene)));
    }

    #[test]
    fn test_empty_scene_reported_before_width() {
        let request = Layout3Request {
            width: 0.0,
            ..Layout3Request::default()
        };
        let result = layout(&[], &request);
        assert!(matches!(result, Err(VecplotError::EmptyScene)));

        let result = layout(&[[1.0, 1.0, 1.0]], &request);
        assert!(matches!(result, Err(VecplotError::InvalidOption(_))));
    }

    #[test]
    fn test_overflowing_extent_rejected() {
        let result = layout(
            &[[f64::MAX, 0.0, 0.0], [-f64::MAX, 0.0, 0.0]],
            &Layout3Request::default(),
        );
        assert!(matches!(result, Err(VecplotError::InvalidOption(msg)) if msg.starts_with("x ")));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config: LayoutConfig = toml::from_str("default_aspect = -0.75").unwrap();
        let result = ViewportEngine::new(&config)
            .layout_3d([Point3::new(1.0, 1.0, 1.0)], &Layout3Request::default());
        assert!(matches!(result, Err(VecplotError::InvalidOption(msg)) if msg.contains("default_aspect")));
    }

    #[test]
    fn test_figure_size_uses_default_aspect() {
        let viewport = layout(&[[1.0, 1.0, 1.0]], &Layout3Request::default()).unwrap();
        assert_eq!(viewport.size(), FigureSize::new(6.0, 4.5));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::LayoutConfig;

    fn points_strategy() -> impl Strategy<Value = Vec<Point3>> {
        prop::collection::vec(
            (-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0)
                .prop_map(|(x, y, z)| Point3::new(x, y, z)),
            1..16,
        )
    }

    /// Every computed range covers [-2, 2], the origin and all inputs.
    fn check_ranges_cover_inputs(points: Vec<Point3>) -> Result<(), TestCaseError> {
        let config = LayoutConfig::default();
        let viewport = ViewportEngine::new(&config)
            .layout_3d(points.iter().copied(), &Layout3Request::default())
            .expect("non-empty scene");

        let content = viewport.content();
        for range in content {
            prop_assert!(range.contains(-2.0) && range.contains(2.0));
        }
        for p in &points {
            for (range, coord) in content.iter().zip(p.to_array()) {
                prop_assert!(range.contains(coord));
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn ranges_cover_inputs(points in points_strategy()) {
            check_ranges_cover_inputs(points)?;
        }
    }
}
