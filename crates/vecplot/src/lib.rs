//! vecplot - Auto-scaled 2D and 3D vector scenes for teaching linear algebra.
//!
//! A scene is a list of primitives (polygons, point sets, arrows, segments
//! and, in 3D, boxes). vecplot extracts every coordinate the scene
//! contributes, computes a viewport that frames all of it, and draws the
//! primitives onto a [`canvas::Canvas`]. The SVG backend turns the result
//! into a document.

pub mod canvas;
pub mod compose;
pub mod config;
pub mod layout;
pub mod scene;

mod error;

pub use vecplot_core::{color, draw, geometry, primitive, vector};

pub use error::VecplotError;

use log::info;

use canvas::{SvgCanvas2d, SvgCanvas3d};
use compose::{Render2dOptions, Render3dOptions};
use config::AppConfig;
use primitive::{Primitive2, Primitive3};
use scene::Scene;

/// Builder for parsing and rendering vecplot scenes.
///
/// # Examples
///
/// ```rust
/// use vecplot::{Plotter, compose::Render2dOptions, primitive::Arrow2};
///
/// let plotter = Plotter::default();
/// let svg = plotter
///     .render_2d_svg(&[Arrow2::new([2.0, 1.0]).into()], &Render2dOptions::default())
///     .expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct Plotter {
    config: AppConfig,
}

impl Plotter {
    /// Create a new plotter with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML scene description.
    ///
    /// # Errors
    ///
    /// See [`Scene::parse`].
    pub fn parse(&self, source: &str) -> Result<Scene, VecplotError> {
        info!("Parsing scene");
        Scene::parse(source)
    }

    /// Render a 2D scene to SVG markup.
    ///
    /// The figure is also written to `options.save_path` when one is set.
    ///
    /// # Errors
    ///
    /// Returns `VecplotError` for invalid primitives or options, an empty
    /// scene, or a failing backend.
    pub fn render_2d_svg(
        &self,
        primitives: &[Primitive2],
        options: &Render2dOptions,
    ) -> Result<String, VecplotError> {
        info!(primitives = primitives.len(); "Rendering 2D scene");
        let mut canvas = SvgCanvas2d::new(self.config.style())?;
        compose::render_2d(&mut canvas, primitives, options, self.config.layout())?;
        let svg = canvas.into_svg()?;
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Render a 3D scene to SVG markup.
    ///
    /// The figure is also written to `options.save_path` when one is set.
    ///
    /// # Errors
    ///
    /// Returns `VecplotError` for invalid primitives or options, or a
    /// failing backend.
    pub fn render_3d_svg(
        &self,
        primitives: &[Primitive3],
        options: &Render3dOptions,
    ) -> Result<String, VecplotError> {
        info!(primitives = primitives.len(); "Rendering 3D scene");
        let mut canvas = SvgCanvas3d::new(self.config.style())?;
        compose::render_3d(&mut canvas, primitives, options, self.config.layout())?;
        let svg = canvas.into_svg()?;
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Render a parsed scene to SVG markup.
    ///
    /// # Errors
    ///
    /// See [`Plotter::render_2d_svg`] and [`Plotter::render_3d_svg`].
    pub fn render_scene_svg(&self, scene: &Scene) -> Result<String, VecplotError> {
        match scene {
            Scene::Planar {
                primitives,
                options,
            } => self.render_2d_svg(primitives, options),
            Scene::Spatial {
                primitives,
                options,
            } => self.render_3d_svg(primitives, options),
        }
    }
}
