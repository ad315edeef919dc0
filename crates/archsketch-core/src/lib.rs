//! Archsketch Core Types and Builder
//!
//! This crate provides the foundational types for archsketch diagrams. It
//! includes:
//!
//! - **Colors**: CSS color parsing with Graphviz-friendly output ([`color::Color`])
//! - **Semantic**: The diagram model of clusters, nodes and edges ([`semantic`] module)
//! - **Scope**: The scoped builder that assembles a diagram in declaration order ([`scope`] module)
//! - **Errors**: Reference and scope errors raised during construction ([`BuildError`])

pub mod color;
pub mod scope;
pub mod semantic;

mod error;

pub use error::{BuildError, HandleKind};
