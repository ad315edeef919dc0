//! CLI logic for the archsketch diagram tool.
//!
//! This module contains the core CLI logic: loading configuration, applying
//! command-line overrides, and rendering the selected architecture.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::PathBuf;

use log::info;

use archsketch::{ArchsketchError, DiagramBuilder, config::AppConfig};

/// Run the archsketch CLI application
///
/// Declares the selected architecture and renders it into the output
/// directory, returning the path of the written file.
///
/// # Errors
///
/// Returns `ArchsketchError` for:
/// - Configuration loading errors
/// - Reference and scope errors while declaring the diagram
/// - Icon resolution errors
/// - Graphviz and file I/O errors
pub fn run(args: &Args) -> Result<PathBuf, ArchsketchError> {
    info!(
        architecture:% = args.architecture,
        title = args.architecture.title();
        "Processing diagram"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    apply_overrides(&mut app_config, args);

    let builder = DiagramBuilder::new(app_config);
    let architecture = args.architecture;
    let options = architecture.options().with_auto_open(args.show);
    let path = builder.draw(options, |scope| architecture.declare(scope))?;

    info!(output_file = path.display().to_string(); "Diagram exported successfully");

    Ok(path)
}

fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(dir) = &args.output_dir {
        config.output_mut().set_directory(dir);
    }
    if let Some(format) = args.format {
        config.output_mut().set_format(format);
    }
    if let Some(dir) = &args.icons_dir {
        config.icons_mut().set_directory(dir);
    }
    if let Some(dir) = &args.assets_dir {
        config.icons_mut().set_base_directory(dir);
    }
}
