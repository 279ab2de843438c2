//! Rendering surfaces for composed scenes.
//!
//! This module provides the [`Canvas`] trait, the small capability interface
//! the scene composers draw through. A canvas is created fresh for each
//! render call, configured once with the computed viewport, receives the
//! draw calls in scene order and is finally saved and/or shown.
//!
//! # Available Backends
//!
//! - [`svg`] - [`SvgCanvas2d`] and [`SvgCanvas3d`], producing SVG markup
//! - [`recording`] - [`RecordingCanvas`], a headless canvas that keeps every
//!   call for inspection
//!
//! # Error Handling
//!
//! Canvas operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`VecplotError`] at the crate boundary;
//! [`Error::Io`] maps to [`VecplotError::Io`] unchanged.
//!
//! [`VecplotError`]: crate::VecplotError
//! [`VecplotError::Io`]: crate::VecplotError::Io

pub mod recording;
pub mod svg;

pub use recording::{DrawCall, RecordingCanvas, RecordingCanvas2d, RecordingCanvas3d};
pub use self::svg::{SvgCanvas2d, SvgCanvas3d};

use std::{fmt, path::Path};

use vecplot_core::{
    color::Color,
    draw::{MarkerShape, StrokeDefinition},
};

/// Ratio of arrowhead length to arrowhead width.
pub const ARROW_HEAD_ASPECT: f64 = 1.5;

/// Size of an arrowhead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeadSize {
    /// Length and width in coordinate units; the head scales with the axes.
    /// Supported by 2D canvases only.
    Data { length: f64, width: f64 },
    /// Length in output pixels, independent of the coordinate scale.
    Screen { length: f64 },
}

/// A directed arrow as handed to a canvas.
///
/// `tail` and `tip` are the logical endpoints. `shaft_end` is where the
/// visible shaft stops, which may differ from `tip` when the shaft is
/// shortened to leave room for the head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGlyph<P> {
    pub tail: P,
    pub shaft_end: P,
    pub tip: P,
    pub head: HeadSize,
    pub color: Color,
}

/// Abstraction for rendering surfaces.
///
/// Implementors are dimension-specific through [`Canvas::Point`] and
/// [`Canvas::Viewport`].
pub trait Canvas {
    /// Coordinate type of the drawing calls.
    type Point: Copy + fmt::Debug;
    /// Viewport type the surface is configured with.
    type Viewport;

    /// Sets limits, ticks, grid and physical size. Called once, before any
    /// drawing call.
    fn configure(&mut self, viewport: &Self::Viewport) -> Result<(), Error>;

    /// Draws a straight line from `start` to `end`.
    fn line(
        &mut self,
        start: Self::Point,
        end: Self::Point,
        stroke: &StrokeDefinition,
    ) -> Result<(), Error>;

    /// Draws unconnected markers at every point.
    fn scatter(
        &mut self,
        points: &[Self::Point],
        color: Color,
        marker: MarkerShape,
    ) -> Result<(), Error>;

    /// Fills the region enclosed by `vertices` without stroking it.
    fn fill_polygon(
        &mut self,
        vertices: &[Self::Point],
        color: Color,
        opacity: f32,
    ) -> Result<(), Error>;

    /// Draws a shaft with an arrowhead at its tip.
    fn arrow(&mut self, arrow: &ArrowGlyph<Self::Point>) -> Result<(), Error>;

    /// Persists the rendered surface to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be created or written.
    fn save(&mut self, path: &Path) -> Result<(), Error>;

    /// Finalises the surface. No drawing is accepted afterwards.
    fn show(&mut self) -> Result<(), Error>;
}

/// Errors that can occur while drawing on a canvas.
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
