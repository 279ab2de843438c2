//! Orthographic projection of 3D coordinates onto the plotting area.

use vecplot_core::geometry::{AxisRange, FigureSize, Point2, Point3};

use crate::layout::ViewAngles;

/// Projects coordinates inside `limits` onto a pixel plotting area.
///
/// Each axis range is first normalized to `[-0.5, 0.5]`, so the limits box
/// becomes a unit cube, which is then viewed from the azimuth/elevation
/// camera and scaled uniformly to fit the plotting area.
#[derive(Debug, Clone, Copy)]
pub(super) struct Projection {
    limits: [AxisRange; 3],
    right: [f64; 3],
    up: [f64; 3],
    scale: f64,
    center: Point2,
}

impl Projection {
    pub(super) fn new(
        limits: [AxisRange; 3],
        view: ViewAngles,
        plot: FigureSize,
        margin: f64,
    ) -> Self {
        let (sin_az, cos_az) = view.azimuth().to_radians().sin_cos();
        let (sin_el, cos_el) = view.elevation().to_radians().sin_cos();
        let right = [-sin_az, cos_az, 0.0];
        let up = [-sin_el * cos_az, -sin_el * sin_az, cos_el];

        // Half extents of the projected unit cube.
        let half_width = 0.5 * right.iter().map(|c| c.abs()).sum::<f64>();
        let half_height = 0.5 * up.iter().map(|c| c.abs()).sum::<f64>();
        let scale = (plot.width() / (2.0 * half_width)).min(plot.height() / (2.0 * half_height));

        Self {
            limits,
            right,
            up,
            scale,
            center: Point2::new(
                margin + plot.width() / 2.0,
                margin + plot.height() / 2.0,
            ),
        }
    }

    pub(super) fn limits(&self) -> [AxisRange; 3] {
        self.limits
    }

    pub(super) fn center(&self) -> Point2 {
        self.center
    }

    pub(super) fn project(&self, p: Point3) -> Point2 {
        let coords = p.to_array();
        let unit: [f64; 3] = std::array::from_fn(|i| {
            let range = self.limits[i];
            (coords[i] - range.min()) / range.span() - 0.5
        });
        let screen_x = dot(unit, self.right);
        let screen_y = dot(unit, self.up);
        Point2::new(
            self.center.x() + screen_x * self.scale,
            self.center.y() - screen_y * self.scale,
        )
    }
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
