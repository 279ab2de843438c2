//! vecplot Core Types and Definitions
//!
//! This crate provides the foundational value types for vecplot scenes. It
//! includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Coordinate tuples, axis ranges and figure sizes ([`geometry`] module)
//! - **Vectors**: Elementwise arithmetic over coordinate tuples ([`vector`] module)
//! - **Draw**: Stroke and marker styling ([`draw`] module)
//! - **Primitives**: The closed set of drawable scene primitives and the
//!   coordinate extraction used for layout ([`primitive`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod primitive;
pub mod vector;
