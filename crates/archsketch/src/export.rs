//! Diagram export.
//!
//! The [`Exporter`] trait is the seam between a finished [`Diagram`] and
//! whatever draws it. [`GraphvizExporter`] converts the diagram into a DOT
//! graph (see [`dot`]) and hands it to Graphviz.

pub mod dot;

mod graphviz;

pub use graphviz::GraphvizExporter;

use std::{fmt, io, path::PathBuf, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use archsketch_core::semantic::Diagram;

/// Renders a finished diagram to a file.
pub trait Exporter {
    /// Render `diagram` and return the path of the written file.
    fn export(&self, diagram: &Diagram) -> Result<PathBuf, Error>;
}

/// Export failures.
#[derive(Debug, Error)]
pub enum Error {
    /// An icon could not be found.
    #[error("cannot resolve icon for `{category}` at {}", path.display())]
    Asset { category: String, path: PathBuf },

    /// The Graphviz `dot` program failed or could not be started.
    #[error("graphviz failed: {0}")]
    Graphviz(io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Image formats produced by the exporter.
///
/// `Dot` writes the generated DOT source without invoking Graphviz.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Jpg,
    Pdf,
    Dot,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Jpg => "jpg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "pdf" => Ok(Self::Pdf),
            "dot" => Ok(Self::Dot),
            _ => Err("Unsupported output format"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// File stem used when a title yields no usable characters.
pub const DEFAULT_FILE_STEM: &str = "diagrams_image";

/// Derive the output file name from a diagram title.
///
/// Whitespace runs and path separators become underscores and the result is
/// lower-cased. A title with nothing left falls back to
/// [`DEFAULT_FILE_STEM`].
///
/// # Examples
///
/// ```
/// use archsketch::export::{OutputFormat, output_file_name};
///
/// assert_eq!(
///     output_file_name("Connect to Private EC2 using a Bastion", OutputFormat::Png),
///     "connect_to_private_ec2_using_a_bastion.png"
/// );
/// ```
pub fn output_file_name(title: &str, format: OutputFormat) -> String {
    let stem = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(['/', '\\'], "_")
        .to_lowercase();
    let stem = if stem.is_empty() {
        DEFAULT_FILE_STEM
    } else {
        &stem
    };
    format!("{stem}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name_collapses_whitespace() {
        assert_eq!(
            output_file_name("  VPC \t Peering ", OutputFormat::Svg),
            "vpc_peering.svg"
        );
    }

    #[test]
    fn test_output_file_name_keeps_punctuation() {
        assert_eq!(
            output_file_name("Site to Site VPN (A-B)", OutputFormat::Dot),
            "site_to_site_vpn_(a-b).dot"
        );
    }

    #[test]
    fn test_output_file_name_replaces_path_separators() {
        assert_eq!(
            output_file_name("VPC A/B", OutputFormat::Png),
            "vpc_a_b.png"
        );
        assert_eq!(
            output_file_name("../Escape\\Here", OutputFormat::Dot),
            ".._escape_here.dot"
        );
    }

    #[test]
    fn test_output_file_name_empty_title_uses_default_stem() {
        assert_eq!(output_file_name("", OutputFormat::Png), "diagrams_image.png");
        assert_eq!(
            output_file_name(" \t\n", OutputFormat::Svg),
            "diagrams_image.svg"
        );
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("jpeg".parse::<OutputFormat>(), Ok(OutputFormat::Jpg));
        assert_eq!("dot".parse::<OutputFormat>(), Ok(OutputFormat::Dot));
        assert!("gif".parse::<OutputFormat>().is_err());
    }
}
