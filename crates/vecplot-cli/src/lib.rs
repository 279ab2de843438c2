//! CLI logic for the vecplot scene renderer.
//!
//! Reads a TOML scene file, renders it through [`vecplot::Plotter`] and
//! writes the SVG output.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use vecplot::{Plotter, VecplotError};

/// Run the vecplot CLI application
///
/// # Errors
///
/// Returns `VecplotError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene file errors
/// - Layout and rendering errors
pub fn run(args: &Args) -> Result<(), VecplotError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let plotter = Plotter::new(app_config);
    let scene = plotter.parse(&source)?;
    let svg = plotter.render_scene_svg(&scene)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
