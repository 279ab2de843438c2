//! Styling definitions shared by primitives and rendering backends.
//!
//! - [`StrokeDefinition`] / [`StrokeStyle`]: how lines are stroked
//! - [`MarkerShape`]: how individual points are marked
//! - [`apply_stroke!`](crate::apply_stroke!): applies a stroke to an SVG element

mod marker;
mod stroke;

pub use marker::MarkerShape;
pub use stroke::{StrokeDefinition, StrokeStyle};
