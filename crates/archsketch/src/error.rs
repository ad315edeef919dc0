//! Error types for archsketch operations.
//!
//! This module provides the main error type [`ArchsketchError`] which wraps
//! the failures that can occur while declaring and rendering a diagram.

use std::io;

use thiserror::Error;

use archsketch_core::BuildError;

use crate::export;

/// The main error type for archsketch operations.
#[derive(Debug, Error)]
pub enum ArchsketchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A declaration referenced a handle it may not use or left a scope
    /// in a bad state.
    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ArchsketchError {
    /// Returns `true` for errors caused by an invalid node or cluster handle.
    pub fn is_reference_error(&self) -> bool {
        matches!(self, Self::Build(err) if err.is_reference_error())
    }

    /// Returns `true` for errors caused by using a cluster outside its scope.
    pub fn is_scope_error(&self) -> bool {
        matches!(self, Self::Build(err) if err.is_scope_error())
    }

    /// Returns `true` for errors caused by a missing icon.
    pub fn is_asset_error(&self) -> bool {
        matches!(self, Self::Export(export::Error::Asset { .. }))
    }
}
