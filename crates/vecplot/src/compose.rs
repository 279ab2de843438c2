//! Scene composition.
//!
//! The composers tie the pipeline together for one render call:
//!
//! ```text
//! primitives
//!     ↓ validate (fail fast, nothing drawn)
//!     ↓ extract coordinates
//!     ↓ layout (viewport)
//! canvas.configure
//!     ↓ axes, origin marker
//!     ↓ one dispatch per primitive, in scene order
//! canvas.save (when a path is given), canvas.show
//! ```
//!
//! A composer owns no state across calls. The first failing step aborts
//! the call; no partial scene is saved.

mod planar;
mod spatial;

pub use planar::{Render2dOptions, render_2d};
pub use spatial::{ARROW_HEAD_PIXELS, Render3dOptions, render_3d};

use std::path::Path;

use log::info;

use crate::{VecplotError, canvas::Canvas};

/// Saves the canvas if a path is given, then shows it.
fn finish<C: Canvas>(canvas: &mut C, save_path: Option<&Path>) -> Result<(), VecplotError> {
    if let Some(path) = save_path {
        canvas.save(path)?;
        info!(path:? = path; "Scene saved");
    }
    canvas.show()?;
    Ok(())
}
