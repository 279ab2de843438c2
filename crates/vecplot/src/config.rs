//! Configuration types for vecplot rendering.
//!
//! This module provides configuration structures that control how scenes
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! loading from TOML; every field has a default, so an empty document is a
//! valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Padding policy and sizing constants of the viewport engines.
//! - [`StyleConfig`] - Output resolution, margins and background.
//!
//! # Example
//!
//! ```
//! # use vecplot::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     padding_fraction = 0.1
//!
//!     [style]
//!     dpi = 72
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.layout().padding_fraction(), 0.1);
//! assert_eq!(config.style().dpi(), 72.0);
//! assert_eq!(config.layout().min_axis_extent_3d(), 2.0);
//! ```

use serde::Deserialize;

use vecplot_core::color::Color;

use crate::VecplotError;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Constants of the viewport padding policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Share of an axis extent added as padding on each end.
    padding_fraction: f64,

    /// Padding used when an axis extent is exactly zero.
    degenerate_padding: f64,

    /// Every 3D axis range covers at least `[-min_axis_extent_3d, min_axis_extent_3d]`.
    min_axis_extent_3d: f64,

    /// Length of a 2D arrowhead as a share of the x-axis span.
    arrow_head_fraction: f64,

    /// Height / width of figures whose aspect ratio is not derived from the data.
    default_aspect: f64,
}

impl LayoutConfig {
    pub fn padding_fraction(&self) -> f64 {
        self.padding_fraction
    }

    pub fn degenerate_padding(&self) -> f64 {
        self.degenerate_padding
    }

    pub fn min_axis_extent_3d(&self) -> f64 {
        self.min_axis_extent_3d
    }

    pub fn arrow_head_fraction(&self) -> f64 {
        self.arrow_head_fraction
    }

    pub fn default_aspect(&self) -> f64 {
        self.default_aspect
    }

    /// Checks that every constant keeps viewports non-empty and upright.
    ///
    /// # Errors
    ///
    /// Returns [`VecplotError::InvalidOption`] naming the first constant that
    /// is not finite, or is negative (`padding_fraction`,
    /// `min_axis_extent_3d`, `arrow_head_fraction`) or not positive
    /// (`degenerate_padding`, `default_aspect`).
    pub fn validate(&self) -> Result<(), VecplotError> {
        let checks = [
            ("padding_fraction", self.padding_fraction, false),
            ("degenerate_padding", self.degenerate_padding, true),
            ("min_axis_extent_3d", self.min_axis_extent_3d, false),
            ("arrow_head_fraction", self.arrow_head_fraction, false),
            ("default_aspect", self.default_aspect, true),
        ];
        for (name, value, strictly_positive) in checks {
            let in_range = if strictly_positive {
                value > 0.0
            } else {
                value >= 0.0
            };
            if !(value.is_finite() && in_range) {
                let bound = if strictly_positive { "positive" } else { "non-negative" };
                return Err(VecplotError::InvalidOption(format!(
                    "layout.{name} must be a finite {bound} number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding_fraction: 0.05,
            degenerate_padding: 1.0,
            min_axis_extent_3d: 2.0,
            arrow_head_fraction: 0.1,
            default_aspect: 0.75,
        }
    }
}

/// Visual styling configuration for rendered scenes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background [`Color`] as a color string; transparent when unset.
    background_color: Option<String>,

    /// Output pixels per figure inch.
    dpi: f64,

    /// Pixels of blank space around the plotting area.
    margin: f64,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            dpi: 100.0,
            margin: 40.0,
        }
    }
}
