//! Semantic diagram model types.
//!
//! These types describe a diagram after it has been declared: the cluster
//! tree, the nodes placed in it, and the edges drawn across it. They carry no
//! layout information; positioning is left to the renderer.
//!
//! # Pipeline Position
//!
//! ```text
//! Declarations (DiagramScope)
//!     ↓ finish
//! Semantic Model (these types)
//!     ↓ export
//! DOT graph
//!     ↓ graphviz
//! Image file
//! ```
//!
//! # Organization
//!
//! - [`diagram`] - [`Diagram`], [`DiagramOptions`], [`Direction`] and the cluster tree
//! - [`element`] - [`Node`], [`Category`], [`Edge`] and the handle types

pub mod diagram;
pub mod element;

pub use diagram::*;
pub use element::*;
