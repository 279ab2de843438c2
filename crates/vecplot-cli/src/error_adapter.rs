//! Error adapter for converting VecplotError to miette diagnostics.
//!
//! This module provides the bridge between the library's error type and
//! miette's rich diagnostic formatting used in the CLI. Scene file errors
//! that carry a byte span are rendered with a labelled source snippet.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use vecplot::VecplotError;

/// Adapter for a [`VecplotError::Scene`] error that points into the scene
/// source.
pub struct SceneDiagnostic<'a> {
    message: &'a str,
    span: Range<usize>,
    src: &'a str,
}

impl<'a> SceneDiagnostic<'a> {
    pub fn new(message: &'a str, span: Range<usize>, src: &'a str) -> Self {
        Self { message, span, src }
    }
}

impl fmt::Debug for SceneDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneDiagnostic")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for SceneDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid scene: {}", self.message)
    }
}

impl std::error::Error for SceneDiagnostic<'_> {}

impl MietteDiagnostic for SceneDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("vecplot::scene"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = span_to_miette(&self.span, self.src.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(self.message.to_string()), span),
        )))
    }
}

/// Adapter for [`VecplotError`] variants without a source location.
pub struct ErrorAdapter<'a>(pub &'a VecplotError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            VecplotError::Io(_) => "vecplot::io",
            VecplotError::UnsupportedPrimitive { .. } => "vecplot::unsupported_primitive",
            VecplotError::EmptyScene => "vecplot::empty_scene",
            VecplotError::DegenerateGeometry(_) => "vecplot::degenerate_geometry",
            VecplotError::DimensionMismatch { .. } => "vecplot::dimension_mismatch",
            VecplotError::InvalidOption(_) => "vecplot::invalid_option",
            VecplotError::Scene { .. } => "vecplot::scene",
            VecplotError::Export(_) => "vecplot::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            VecplotError::UnsupportedPrimitive { .. } => {
                "supported kinds are polygon, points, arrow and segment, plus box in 3D scenes"
            }
            VecplotError::EmptyScene => "add at least one primitive with coordinates",
            VecplotError::DimensionMismatch { .. } => {
                "2D scenes use [x, y] pairs and 3D scenes use [x, y, z] triples"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A scene error with source location information.
    Scene(SceneDiagnostic<'a>),
    /// An error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Scene(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Scene(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Scene(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Scene(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Scene(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Scene(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Clamps a byte range to the source and converts it to a miette [`SourceSpan`].
fn span_to_miette(span: &Range<usize>, src_len: usize) -> SourceSpan {
    let start = span.start.min(src_len);
    let end = span.end.clamp(start, src_len);
    SourceSpan::new(start.into(), end - start)
}

/// Convert a [`VecplotError`] into a reportable error.
///
/// Scene errors with a span become a [`Reportable::Scene`]; everything else
/// is reported without source context.
pub fn to_reportable(err: &VecplotError) -> Reportable<'_> {
    match err {
        VecplotError::Scene {
            message,
            span: Some(span),
            src,
        } => Reportable::Scene(SceneDiagnostic::new(message, span.clone(), src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
