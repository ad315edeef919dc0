//! Errors raised while declaring a diagram.

use thiserror::Error;

use crate::semantic::DiagramId;

/// Construction-time errors.
///
/// These are programmer errors: a handle was used with the wrong diagram, or
/// a declaration targeted a cluster that is no longer open. None of them are
/// recoverable, and a diagram that produced one is never rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A handle created by one diagram was passed to another.
    #[error("{kind} handle belongs to diagram {owner}, not to diagram {current}")]
    ForeignHandle {
        kind: HandleKind,
        owner: DiagramId,
        current: DiagramId,
    },

    /// A node handle does not name a node of this diagram.
    #[error("node #{index} does not exist in diagram {diagram}")]
    UnknownNode { index: usize, diagram: DiagramId },

    /// A declaration targeted a cluster that is not on the active-parent stack.
    #[error("cluster `{label}` is not open")]
    ClusterNotOpen { label: String },
}

impl BuildError {
    /// Returns `true` for errors caused by a handle that never existed in, or
    /// does not belong to, the current diagram.
    pub fn is_reference_error(&self) -> bool {
        matches!(self, Self::ForeignHandle { .. } | Self::UnknownNode { .. })
    }

    /// Returns `true` for errors caused by declaring outside an open scope.
    pub fn is_scope_error(&self) -> bool {
        matches!(self, Self::ClusterNotOpen { .. })
    }
}

/// The kind of handle named in a [`BuildError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Node,
    Cluster,
}

impl std::fmt::Display for HandleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node => f.write_str("node"),
            Self::Cluster => f.write_str("cluster"),
        }
    }
}
