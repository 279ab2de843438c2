//! Viewport layout engine.
//!
//! Given the coordinates a scene contributes, the engine computes the
//! coordinate-space viewport the scene is drawn in: per-axis ranges, tick
//! positions and the physical figure size.
//!
//! # Padding Policy
//!
//! Every axis range starts from the extent of the coordinates with the
//! origin folded in, so axes never start away from zero. The extent is then
//! padded on both ends:
//!
//! - **2D with a grid**: padding is at least one grid cell and at least
//!   `ceil(padding_fraction * extent)`; the padded range is then snapped
//!   outward to multiples of the grid spacing so gridlines land exactly on
//!   the boundary. Ticks step by the grid spacing from the range minimum,
//!   excluding the maximum.
//! - **2D without a grid**: padding is `padding_fraction * extent`, or
//!   `degenerate_padding` when the extent is zero. No ticks.
//! - **3D**: as 2D without a grid, then widened to cover at least
//!   `[-min_axis_extent_3d, min_axis_extent_3d]`.
//!
//! Layout is a pure function of its inputs; it fails with
//! [`VecplotError::EmptyScene`] when there are no coordinates, and with
//! [`VecplotError::InvalidOption`] when the [`LayoutConfig`] is invalid, a
//! padded range overflows to infinity, or a grid would need more than
//! [`MAX_GRID_TICKS`] ticks on one axis.
//!
//! [`VecplotError::EmptyScene`]: crate::VecplotError::EmptyScene
//! [`VecplotError::InvalidOption`]: crate::VecplotError::InvalidOption

mod planar;
mod spatial;

pub use planar::{GridSpacing, Layout2Request, Viewport2};
pub use spatial::{Layout3Request, ViewAngles, Viewport3};

use vecplot_core::geometry::AxisRange;

use crate::{VecplotError, config::LayoutConfig};

/// Most gridlines drawn along one 2D axis.
pub const MAX_GRID_TICKS: usize = 10_000;

/// Computes viewports according to a [`LayoutConfig`].
#[derive(Debug, Clone, Copy)]
pub struct ViewportEngine<'a> {
    config: &'a LayoutConfig,
}

impl<'a> ViewportEngine<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    fn config(&self) -> &LayoutConfig {
        self.config
    }

    /// Pads `extent` by the plain (ungridded) policy.
    fn pad_plain(&self, extent: AxisRange) -> AxisRange {
        let span = extent.span();
        let padding = if span == 0.0 {
            self.config.degenerate_padding()
        } else {
            self.config.padding_fraction() * span
        };
        extent.pad(padding)
    }

    /// Pads `extent` by the gridded policy and snaps it to `spacing`.
    fn pad_gridded(&self, extent: AxisRange, spacing: f64) -> AxisRange {
        let padding = spacing.max((self.config.padding_fraction() * extent.span()).ceil());
        AxisRange::new(
            spacing * ((extent.min() - padding) / spacing).floor(),
            spacing * ((extent.max() + padding) / spacing).ceil(),
        )
    }
}

/// Ticks every `spacing` from `range.min()` up to, but excluding, `range.max()`.
fn grid_ticks(axis: &str, range: AxisRange, spacing: f64) -> Result<Vec<f64>, VecplotError> {
    let count = (range.span() / spacing).round();
    if !(count.is_finite() && count <= MAX_GRID_TICKS as f64) {
        return Err(VecplotError::InvalidOption(format!(
            "grid spacing {spacing} needs {count} gridlines along {axis}, at most \
             {MAX_GRID_TICKS} are drawn; use a coarser grid or disable it"
        )));
    }
    Ok((0..count as usize)
        .map(|i| range.min() + i as f64 * spacing)
        .collect())
}

/// Rejects ranges whose padding overflowed.
fn check_range(axis: &str, range: AxisRange) -> Result<AxisRange, VecplotError> {
    if !(range.is_well_formed() && range.span().is_finite()) {
        return Err(VecplotError::InvalidOption(format!(
            "{axis} coordinates are too large to lay out, range [{}, {}]",
            range.min(),
            range.max()
        )));
    }
    Ok(range)
}

fn check_width(width: f64) -> Result<(), VecplotError> {
    if !(width.is_finite() && width > 0.0) {
        return Err(VecplotError::InvalidOption(format!(
            "figure width must be a positive number, got {width}"
        )));
    }
    Ok(())
}
