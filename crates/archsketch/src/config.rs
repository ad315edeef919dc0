//! Configuration types for archsketch rendering.
//!
//! This module provides configuration structures that control where diagrams
//! are written, how icons are resolved, and which Graphviz attributes are
//! applied. All types implement [`serde::Deserialize`] for flexible loading
//! from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`OutputConfig`] - Output [`OutputFormat`] and directory.
//! - [`IconConfig`] - Icon directory and the base directory for custom icons.
//! - [`StyleConfig`] - Graphviz attribute overrides and the cluster palette.
//!
//! # Example
//!
//! ```
//! # use archsketch::config::AppConfig;
//! # use archsketch::export::OutputFormat;
//! let config = AppConfig::default();
//! assert_eq!(config.output().format(), OutputFormat::Png);
//! assert!(config.icons().directory().is_none());
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use archsketch_core::color::Color;

use crate::export::OutputFormat;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,

    /// Icon resolution section.
    #[serde(default)]
    icons: IconConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(output: OutputConfig, icons: IconConfig, style: StyleConfig) -> Self {
        Self {
            output,
            icons,
            style,
        }
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Mutable access to the output section, for command-line overrides.
    pub fn output_mut(&mut self) -> &mut OutputConfig {
        &mut self.output
    }

    pub fn icons(&self) -> &IconConfig {
        &self.icons
    }

    /// Mutable access to the icon section, for command-line overrides.
    pub fn icons_mut(&mut self) -> &mut IconConfig {
        &mut self.icons
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Where and in which format rendered diagrams are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Image format handed to Graphviz.
    #[serde(default)]
    format: OutputFormat,

    /// Output directory. Defaults to the current working directory.
    #[serde(default)]
    directory: Option<PathBuf>,
}

impl OutputConfig {
    pub fn new(format: OutputFormat, directory: Option<PathBuf>) -> Self {
        Self { format, directory }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns the configured output directory, falling back to `.`.
    pub fn directory(&self) -> &Path {
        self.directory.as_deref().unwrap_or(Path::new("."))
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = Some(directory.into());
    }
}

/// Icon lookup locations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IconConfig {
    /// Directory holding the built-in icon set (`aws/compute/ec2.png`, ...).
    /// When unset, built-in categories are drawn as plain shapes.
    #[serde(default)]
    directory: Option<PathBuf>,

    /// Directory that custom icon paths are resolved against.
    #[serde(default)]
    base_directory: Option<PathBuf>,
}

impl IconConfig {
    pub fn new(directory: Option<PathBuf>, base_directory: Option<PathBuf>) -> Self {
        Self {
            directory,
            base_directory,
        }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Returns the base directory for custom icons, falling back to `.`.
    pub fn base_directory(&self) -> &Path {
        self.base_directory.as_deref().unwrap_or(Path::new("."))
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = Some(directory.into());
    }

    pub fn set_base_directory(&mut self, directory: impl Into<PathBuf>) {
        self.base_directory = Some(directory.into());
    }
}

/// Graphviz attribute overrides.
///
/// Each table is applied on top of the built-in defaults, in the order it
/// was written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    graph: IndexMap<String, String>,

    #[serde(default)]
    node: IndexMap<String, String>,

    #[serde(default)]
    edge: IndexMap<String, String>,

    /// Cluster background colors, cycled by nesting depth.
    #[serde(default)]
    cluster_backgrounds: Option<Vec<Color>>,
}

impl StyleConfig {
    pub fn graph(&self) -> &IndexMap<String, String> {
        &self.graph
    }

    pub fn node(&self) -> &IndexMap<String, String> {
        &self.node
    }

    pub fn edge(&self) -> &IndexMap<String, String> {
        &self.edge
    }

    /// Returns the configured cluster palette, or `None` to use the defaults.
    ///
    /// An empty palette is treated as unset.
    pub fn cluster_backgrounds(&self) -> Option<&[Color]> {
        self.cluster_backgrounds
            .as_deref()
            .filter(|palette| !palette.is_empty())
    }
}
