//! A headless canvas that records every call it receives.
//!
//! [`RecordingCanvas`] draws nothing. It keeps the sequence of [`DrawCall`]s
//! so callers can check exactly what a composer asked the backend to do,
//! for example that a polygon without a fill issues no fill call.
//!
//! # Example
//!
//! ```
//! use vecplot::canvas::{DrawCall, RecordingCanvas2d};
//! use vecplot::compose::{Render2dOptions, render_2d};
//! use vecplot::config::LayoutConfig;
//! use vecplot::primitive::{Points2, Primitive2};
//!
//! let mut canvas = RecordingCanvas2d::new();
//! let scene = [Primitive2::from(Points2::new([[1.0, 2.0]]))];
//! render_2d(&mut canvas, &scene, &Render2dOptions::default(), &LayoutConfig::default()).unwrap();
//!
//! assert!(canvas.calls().iter().any(|call| matches!(call, DrawCall::Scatter { .. })));
//! assert!(matches!(canvas.calls().last(), Some(DrawCall::Show)));
//! ```

use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use vecplot_core::{
    color::Color,
    draw::{MarkerShape, StrokeDefinition},
    geometry::{Point2, Point3},
};

use super::{ArrowGlyph, Canvas, Error};
use crate::layout::{Viewport2, Viewport3};

/// One call received by a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall<P, V> {
    Configure(V),
    Line {
        start: P,
        end: P,
        stroke: StrokeDefinition,
    },
    Scatter {
        points: Vec<P>,
        color: Color,
        marker: MarkerShape,
    },
    FillPolygon {
        vertices: Vec<P>,
        color: Color,
        opacity: f32,
    },
    Arrow(ArrowGlyph<P>),
    Save(PathBuf),
    Show,
}

/// Headless [`Canvas`] recording its calls in order.
///
/// The canvas enforces the same call protocol as the real backends:
/// drawing before `configure` or after `show` is a render error.
#[derive(Debug, Clone)]
pub struct RecordingCanvas<P, V> {
    calls: Vec<DrawCall<P, V>>,
    configured: bool,
    shown: bool,
    save_error: Option<io::ErrorKind>,
}

/// Recording canvas for 2D scenes.
pub type RecordingCanvas2d = RecordingCanvas<Point2, Viewport2>;

/// Recording canvas for 3D scenes.
pub type RecordingCanvas3d = RecordingCanvas<Point3, Viewport3>;

impl<P, V> RecordingCanvas<P, V> {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            configured: false,
            shown: false,
            save_error: None,
        }
    }

    /// Makes every `save` fail with an I/O error of `kind`.
    pub fn with_save_error(mut self, kind: io::ErrorKind) -> Self {
        self.save_error = Some(kind);
        self
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> &[DrawCall<P, V>] {
        &self.calls
    }

    /// Consumes the canvas and returns the recorded calls.
    pub fn into_calls(self) -> Vec<DrawCall<P, V>> {
        self.calls
    }

    /// The viewport passed to `configure`, if any.
    pub fn viewport(&self) -> Option<&V> {
        self.calls.iter().find_map(|call| match call {
            DrawCall::Configure(viewport) => Some(viewport),
            _ => None,
        })
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    fn record(&mut self, call: DrawCall<P, V>) -> Result<(), Error> {
        if !self.configured {
            return Err(Error::Render("canvas drawn on before configure".to_string()));
        }
        if self.shown {
            return Err(Error::Render("canvas drawn on after show".to_string()));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl<P, V> Default for RecordingCanvas<P, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, V> Canvas for RecordingCanvas<P, V>
where
    P: Copy + fmt::Debug,
    V: Clone,
{
    type Point = P;
    type Viewport = V;

    fn configure(&mut self, viewport: &V) -> Result<(), Error> {
        if self.configured {
            return Err(Error::Render("canvas configured twice".to_string()));
        }
        self.configured = true;
        self.calls.push(DrawCall::Configure(viewport.clone()));
        Ok(())
    }

    fn line(&mut self, start: P, end: P, stroke: &StrokeDefinition) -> Result<(), Error> {
        self.record(DrawCall::Line {
            start,
            end,
            stroke: stroke.clone(),
        })
    }

    fn scatter(&mut self, points: &[P], color: Color, marker: MarkerShape) -> Result<(), Error> {
        self.record(DrawCall::Scatter {
            points: points.to_vec(),
            color,
            marker,
        })
    }

    fn fill_polygon(&mut self, vertices: &[P], color: Color, opacity: f32) -> Result<(), Error> {
        self.record(DrawCall::FillPolygon {
            vertices: vertices.to_vec(),
            color,
            opacity,
        })
    }

    fn arrow(&mut self, arrow: &ArrowGlyph<P>) -> Result<(), Error> {
        self.record(DrawCall::Arrow(*arrow))
    }

    fn save(&mut self, path: &Path) -> Result<(), Error> {
        if let Some(kind) = self.save_error {
            return Err(Error::Io(io::Error::new(
                kind,
                format!("cannot write {}", path.display()),
            )));
        }
        self.record(DrawCall::Save(path.to_path_buf()))
    }

    fn show(&mut self) -> Result<(), Error> {
        self.record(DrawCall::Show)?;
        self.shown = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Canvas2 = RecordingCanvas<Point2, ()>;

    #[test]
    fn test_records_in_order() {
        let mut canvas = Canvas2::new();
        canvas.configure(&()).unwrap();
        canvas
            .line(
                Point2::origin(),
                Point2::new(1.0, 0.0),
                &StrokeDefinition::default(),
            )
            .unwrap();
        canvas.show().unwrap();

        let calls = canvas.calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(calls[0], DrawCall::Configure(())));
        assert!(matches!(calls[1], DrawCall::Line { .. }));
        assert!(matches!(calls[2], DrawCall::Show));
        assert!(canvas.is_shown());
    }

    #[test]
    fn test_draw_before_configure_fails() {
        let mut canvas = Canvas2::new();
        let result = canvas.scatter(&[Point2::origin()], Color::black(), MarkerShape::Dot);
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_draw_after_show_fails() {
        let mut canvas = Canvas2::new();
        canvas.configure(&()).unwrap();
        canvas.show().unwrap();
        let result = canvas.fill_polygon(&[Point2::origin()], Color::blue(), 0.5);
        assert!(result.is_err());
    }

    #[test]
    fn test_save_error() {
        let mut canvas = Canvas2::new().with_save_error(io::ErrorKind::PermissionDenied);
        canvas.configure(&()).unwrap();
        match canvas.save(Path::new("/nowhere/out.svg")) {
            Err(Error::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::PermissionDenied),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
