//! Error adapter for converting ArchsketchError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use archsketch::{ArchsketchError, BuildError, export};

/// Adapter giving an [`ArchsketchError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a ArchsketchError);

impl ErrorAdapter<'_> {
    fn code_str(&self) -> &'static str {
        match self.0 {
            ArchsketchError::Io(_) => "archsketch::io",
            ArchsketchError::Build(err) if err.is_reference_error() => "archsketch::reference",
            ArchsketchError::Build(_) => "archsketch::scope",
            ArchsketchError::Export(export::Error::Asset { .. }) => "archsketch::asset",
            ArchsketchError::Export(export::Error::Graphviz(_)) => "archsketch::graphviz",
            ArchsketchError::Export(export::Error::Io(_)) => "archsketch::io",
            ArchsketchError::Config(_) => "archsketch::config",
        }
    }

    fn help_str(&self) -> Option<&'static str> {
        match self.0 {
            ArchsketchError::Build(BuildError::ForeignHandle { .. }) => {
                Some("handles are only valid inside the diagram that created them")
            }
            ArchsketchError::Build(BuildError::UnknownNode { .. }) => None,
            ArchsketchError::Build(BuildError::ClusterNotOpen { .. }) => {
                Some("declare the node while the cluster is still open")
            }
            ArchsketchError::Export(export::Error::Asset { .. }) => {
                Some("set `[icons] directory` or `base_directory`, or pass --icons-dir / --assets-dir")
            }
            ArchsketchError::Export(export::Error::Graphviz(_)) => {
                Some("install Graphviz so that `dot` is on PATH, or use --format dot")
            }
            _ => None,
        }
    }
}

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
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_str()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::{io, path::PathBuf};

    use archsketch::{
        scope::DiagramScope,
        semantic::{Category, DiagramOptions},
    };

    use super::*;

    fn code(err: &ArchsketchError) -> String {
        ErrorAdapter(err).code().unwrap().to_string()
    }

    fn foreign_handle_error() -> ArchsketchError {
        let mut first = DiagramScope::new(DiagramOptions::new("first"));
        let stale = first.add_node(Category::Ec2, "stale");
        let mut second = DiagramScope::new(DiagramOptions::new("second"));
        let fresh = second.add_node(Category::Ec2, "fresh");
        second.connect(fresh, stale).unwrap_err().into()
    }

    #[test]
    fn test_reference_error_code() {
        let err = foreign_handle_error();
        assert_eq!(code(&err), "archsketch::reference");
        assert!(ErrorAdapter(&err).help().is_some());
    }

    #[test]
    fn test_scope_error_code() {
        let err = ArchsketchError::Build(BuildError::ClusterNotOpen {
            label: "VPC".to_string(),
        });
        assert_eq!(code(&err), "archsketch::scope");
    }

    #[test]
    fn test_asset_error_code() {
        let err = ArchsketchError::Export(export::Error::Asset {
            category: "custom(logo/person.png)".to_string(),
            path: PathBuf::from("logo/person.png"),
        });
        assert_eq!(code(&err), "archsketch::asset");
        assert_eq!(
            ErrorAdapter(&err).to_string(),
            "Export error: cannot resolve icon for `custom(logo/person.png)` at logo/person.png"
        );
    }

    #[test]
    fn test_io_and_config_codes() {
        let io_err = ArchsketchError::Io(io::Error::other("disk full"));
        assert_eq!(code(&io_err), "archsketch::io");
        assert!(ErrorAdapter(&io_err).help().is_none());

        let config_err = ArchsketchError::Config("bad".to_string());
        assert_eq!(code(&config_err), "archsketch::config");
    }

    #[test]
    fn test_graphviz_error_has_help() {
        let err = ArchsketchError::Export(export::Error::Graphviz(io::Error::new(
            io::ErrorKind::NotFound,
            "dot",
        )));
        assert_eq!(code(&err), "archsketch::graphviz");
        assert!(
            ErrorAdapter(&err)
                .help()
                .unwrap()
                .to_string()
                .contains("Graphviz")
        );
    }
}
