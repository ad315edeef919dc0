//! Command-line argument definitions for the archsketch CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the architecture to draw and override the
//! output, icon, and logging settings from the configuration file.

use std::path::PathBuf;

use clap::Parser;

use archsketch::{architectures::Architecture, export::OutputFormat};

/// Command-line arguments for the archsketch diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Architecture to draw (bastion-host, vpc-peering, site-to-site-vpn)
    #[arg(help = "Architecture to draw")]
    pub architecture: Architecture,

    /// Directory the diagram is written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output format (png, svg, jpg, pdf, dot)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Directory holding the built-in icon set
    #[arg(long)]
    pub icons_dir: Option<PathBuf>,

    /// Directory that custom icon paths are relative to
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Open the rendered file in the default viewer
    #[arg(long)]
    pub show: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
