//! Error types for vecplot operations.
//!
//! This module provides the main error type [`VecplotError`]. Every failure
//! is reported synchronously by the call that triggered it; nothing is
//! retried or swallowed.

use std::{io, ops::Range};

use thiserror::Error;

use vecplot_core::primitive::GeometryError;

/// The main error type for vecplot operations.
#[derive(Debug, Error)]
pub enum VecplotError {
    /// Backend I/O failure, such as an unwritable save path. Propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A value in the scene is not one of the supported primitive kinds.
    #[error("Unsupported primitive `{kind}`: {reason}")]
    UnsupportedPrimitive { kind: String, reason: String },

    /// The scene contributes no coordinates at all.
    #[error("Empty scene: the primitives contribute no coordinates to lay out")]
    EmptyScene,

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(#[from] GeometryError),

    /// A coordinate tuple has the wrong number of components for the scene.
    #[error("Dimension mismatch: expected {expected} coordinates, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// A scene description could not be read; `span` points into `src`.
    #[error("Invalid scene: {message}")]
    Scene {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::canvas::Error> for VecplotError {
    fn from(error: crate::canvas::Error) -> Self {
        match error {
            crate::canvas::Error::Io(err) => Self::Io(err),
            other => Self::Export(Box::new(other)),
        }
    }
}

impl VecplotError {
    /// Create a new `Scene` error with the associated source text.
    pub fn new_scene_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Scene {
            message: message.into(),
            span,
            src: src.into(),
        }
    }

    /// Create a new `UnsupportedPrimitive` error.
    pub fn unsupported(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedPrimitive {
            kind: kind.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_io_error_is_unchanged() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err = VecplotError::from(crate::canvas::Error::Io(io_err));
        match err {
            VecplotError::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::PermissionDenied),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_canvas_render_error_is_export() {
        let err = VecplotError::from(crate::canvas::Error::Render("boom".to_string()));
        assert!(matches!(err, VecplotError::Export(_)));
        assert_eq!(err.to_string(), "Export error: Render error: boom");
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            VecplotError::unsupported("circle", "not a primitive kind").to_string(),
            "Unsupported primitive `circle`: not a primitive kind"
        );
        assert_eq!(
            VecplotError::DimensionMismatch {
                expected: 2,
                found: 3
            }
            .to_string(),
            "Dimension mismatch: expected 2 coordinates, found 3"
        );
    }
}
