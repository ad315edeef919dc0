//! Core diagram structure types.
//!
//! This module contains the root of the semantic model:
//! - [`Diagram`] - The finished diagram: options, cluster tree, nodes and edges
//! - [`DiagramOptions`] - Title, layout direction and auto-open flag
//! - [`Direction`] - Layout direction hint passed to the renderer
//! - [`Cluster`] - A named grouping inside the cluster tree

use std::{
    fmt,
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef as _,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{BuildError, HandleKind},
    semantic::element::{ClusterHandle, Edge, EdgeHandle, Member, Node, NodeHandle, Parent},
};

static NEXT_DIAGRAM_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a diagram.
///
/// Every handle remembers the diagram that created it, so a handle cannot be
/// used to reach into a different diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiagramId(u64);

impl DiagramId {
    pub(crate) fn next() -> Self {
        Self(NEXT_DIAGRAM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DiagramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Layout direction hint.
///
/// The names match Graphviz `rankdir` values and external configuration strings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Direction {
    /// Left to right (default)
    #[default]
    #[serde(rename = "LR")]
    LeftRight,
    #[serde(rename = "RL")]
    RightLeft,
    #[serde(rename = "TB")]
    TopBottom,
    #[serde(rename = "BT")]
    BottomTop,
}

impl Direction {
    /// Returns the Graphviz `rankdir` value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeftRight => "LR",
            Self::RightLeft => "RL",
            Self::TopBottom => "TB",
            Self::BottomTop => "BT",
        }
    }
}

impl FromStr for Direction {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LR" => Ok(Self::LeftRight),
            "RL" => Ok(Self::RightLeft),
            "TB" => Ok(Self::TopBottom),
            "BT" => Ok(Self::BottomTop),
            _ => Err("Unsupported direction"),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagram-level attributes.
///
/// # Examples
///
/// ```
/// use archsketch_core::semantic::{DiagramOptions, Direction};
///
/// let options = DiagramOptions::new("VPC Peering").with_direction(Direction::TopBottom);
/// assert_eq!(options.title(), "VPC Peering");
/// assert!(!options.auto_open());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramOptions {
    title: String,
    direction: Direction,
    auto_open: bool,
}

impl DiagramOptions {
    /// Create options with the given title, left-to-right layout and auto-open disabled.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            direction: Direction::default(),
            auto_open: false,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Whether the rendered file should be opened in the system viewer.
    pub fn with_auto_open(mut self, auto_open: bool) -> Self {
        self.auto_open = auto_open;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn auto_open(&self) -> bool {
        self.auto_open
    }
}

/// Stored child reference. Uses raw indices so that two diagrams built from
/// the same declarations compare equal regardless of their identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Node(usize),
    Cluster(usize),
}

/// A named grouping of nodes and nested clusters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    label: String,
    parent: Option<usize>,
    depth: usize,
    members: Vec<Slot>,
}

impl Cluster {
    /// Borrow the cluster's display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Nesting depth, 1 for a cluster declared directly under the diagram.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of direct children (nodes and clusters).
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A borrowed view of one edge together with its endpoints.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRef<'a> {
    handle: EdgeHandle,
    source: NodeHandle,
    target: NodeHandle,
    edge: &'a Edge,
}

impl<'a> EdgeRef<'a> {
    pub fn handle(&self) -> EdgeHandle {
        self.handle
    }

    pub fn source(&self) -> NodeHandle {
        self.source
    }

    pub fn target(&self) -> NodeHandle {
        self.target
    }

    pub fn edge(&self) -> &'a Edge {
        self.edge
    }
}

/// A fully declared diagram.
///
/// Nodes and edges live in a [`petgraph`] directed graph whose indices follow
/// declaration order; the cluster tree is kept alongside it. A diagram is only
/// produced by [`DiagramScope::finish`](crate::scope::DiagramScope::finish),
/// so it is always structurally complete.
#[derive(Debug, Clone)]
pub struct Diagram {
    id: DiagramId,
    options: DiagramOptions,
    root: Vec<Slot>,
    clusters: Vec<Cluster>,
    graph: DiGraph<Node, Edge>,
}

impl Diagram {
    pub(crate) fn new(options: DiagramOptions) -> Self {
        Self {
            id: DiagramId::next(),
            options,
            root: Vec::new(),
            clusters: Vec::new(),
            graph: DiGraph::new(),
        }
    }

    /// Get the diagram identity.
    pub fn id(&self) -> DiagramId {
        self.id
    }

    /// Borrow the diagram options.
    pub fn options(&self) -> &DiagramOptions {
        &self.options
    }

    pub fn title(&self) -> &str {
        self.options.title()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Depth of the cluster tree, counting the diagram root as level 1.
    pub fn tree_depth(&self) -> usize {
        1 + self.clusters.iter().map(Cluster::depth).max().unwrap_or(0)
    }

    /// Look up a node by handle. Returns `None` for handles of other diagrams.
    pub fn node(&self, handle: NodeHandle) -> Option<&Node> {
        if handle.diagram() != self.id {
            return None;
        }
        self.graph.node_weight(handle.node_index())
    }

    /// Look up a cluster by handle. Returns `None` for handles of other diagrams.
    pub fn cluster(&self, handle: ClusterHandle) -> Option<&Cluster> {
        if handle.diagram() != self.id {
            return None;
        }
        self.clusters.get(handle.index())
    }

    /// Look up an edge by handle. Returns `None` for handles of other diagrams.
    pub fn edge(&self, handle: EdgeHandle) -> Option<EdgeRef<'_>> {
        if handle.diagram() != self.id {
            return None;
        }
        let (source, target) = self.graph.edge_endpoints(handle.edge_index())?;
        let edge = self.graph.edge_weight(handle.edge_index())?;
        Some(EdgeRef {
            handle,
            source: NodeHandle::new(self.id, source),
            target: NodeHandle::new(self.id, target),
            edge,
        })
    }

    /// Iterate over all nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &Node)> {
        self.graph
            .node_indices()
            .map(|idx| (NodeHandle::new(self.id, idx), &self.graph[idx]))
    }

    /// Iterate over all clusters in declaration order.
    pub fn clusters(&self) -> impl Iterator<Item = (ClusterHandle, &Cluster)> {
        self.clusters
            .iter()
            .enumerate()
            .map(|(idx, cluster)| (ClusterHandle::new(self.id, idx), cluster))
    }

    /// Iterate over all edges in declaration order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> {
        self.graph.edge_references().map(|edge| EdgeRef {
            handle: EdgeHandle::new(self.id, edge.id()),
            source: NodeHandle::new(self.id, edge.source()),
            target: NodeHandle::new(self.id, edge.target()),
            edge: edge.weight(),
        })
    }

    /// Iterate over the direct children of `parent` in declaration order.
    ///
    /// Yields nothing for a cluster handle of another diagram.
    pub fn children(&self, parent: Parent) -> impl Iterator<Item = Member> + '_ {
        let slots: &[Slot] = match parent {
            Parent::Root => &self.root,
            Parent::Cluster(handle) => self
                .cluster(handle)
                .map(|cluster| cluster.members.as_slice())
                .unwrap_or_default(),
        };
        slots.iter().map(|slot| self.member(*slot))
    }

    /// Returns the parent a node was declared under.
    pub fn parent_of(&self, handle: NodeHandle) -> Option<Parent> {
        let node = self.node(handle)?;
        Some(self.parent_from_index(node.parent_index()))
    }

    /// Returns the parent a cluster was declared under.
    pub fn parent_of_cluster(&self, handle: ClusterHandle) -> Option<Parent> {
        let cluster = self.cluster(handle)?;
        Some(self.parent_from_index(cluster.parent))
    }

    /// Iterate over the edges that touch `handle`, in declaration order.
    pub fn edges_of(&self, handle: NodeHandle) -> impl Iterator<Item = EdgeRef<'_>> {
        self.edges()
            .filter(move |edge| edge.source == handle || edge.target == handle)
    }

    fn member(&self, slot: Slot) -> Member {
        match slot {
            Slot::Node(idx) => Member::Node(NodeHandle::new(self.id, NodeIndex::new(idx))),
            Slot::Cluster(idx) => Member::Cluster(ClusterHandle::new(self.id, idx)),
        }
    }

    fn parent_from_index(&self, index: Option<usize>) -> Parent {
        match index {
            Some(idx) => Parent::Cluster(ClusterHandle::new(self.id, idx)),
            None => Parent::Root,
        }
    }

    // -------------------------------------------------------------------------
    // Construction, used by `DiagramScope`
    // -------------------------------------------------------------------------

    pub(crate) fn check_node(&self, handle: NodeHandle) -> Result<(), BuildError> {
        if handle.diagram() != self.id {
            return Err(BuildError::ForeignHandle {
                kind: HandleKind::Node,
                owner: handle.diagram(),
                current: self.id,
            });
        }
        if handle.index() >= self.graph.node_count() {
            return Err(BuildError::UnknownNode {
                index: handle.index(),
                diagram: self.id,
            });
        }
        Ok(())
    }

    pub(crate) fn check_cluster(&self, handle: ClusterHandle) -> Result<(), BuildError> {
        if handle.diagram() != self.id {
            return Err(BuildError::ForeignHandle {
                kind: HandleKind::Cluster,
                owner: handle.diagram(),
                current: self.id,
            });
        }
        Ok(())
    }

    pub(crate) fn cluster_label(&self, index: usize) -> &str {
        &self.clusters[index].label
    }

    pub(crate) fn push_cluster(&mut self, parent: Option<usize>, label: String) -> ClusterHandle {
        let index = self.clusters.len();
        let depth = parent.map_or(1, |idx| self.clusters[idx].depth + 1);
        self.clusters.push(Cluster {
            label,
            parent,
            depth,
            members: Vec::new(),
        });
        self.slots_mut(parent).push(Slot::Cluster(index));
        ClusterHandle::new(self.id, index)
    }

    pub(crate) fn push_node(&mut self, node: Node) -> NodeHandle {
        let parent = node.parent_index();
        let idx = self.graph.add_node(node);
        self.slots_mut(parent).push(Slot::Node(idx.index()));
        NodeHandle::new(self.id, idx)
    }

    pub(crate) fn push_edge(
        &mut self,
        source: NodeHandle,
        target: NodeHandle,
        edge: Edge,
    ) -> EdgeHandle {
        let idx = self
            .graph
            .add_edge(source.node_index(), target.node_index(), edge);
        EdgeHandle::new(self.id, idx)
    }

    fn slots_mut(&mut self, parent: Option<usize>) -> &mut Vec<Slot> {
        match parent {
            Some(idx) => &mut self.clusters[idx].members,
            None => &mut self.root,
        }
    }
}

/// Structural equality: identity is ignored, everything else is compared in
/// declaration order.
impl PartialEq for Diagram {
    fn eq(&self, other: &Self) -> bool {
        self.options == other.options
            && self.root == other.root
            && self.clusters == other.clusters
            && self.graph.node_weights().eq(other.graph.node_weights())
            && self
                .graph
                .edge_references()
                .map(|e| (e.source(), e.target(), e.weight()))
                .eq(other
                    .graph
                    .edge_references()
                    .map(|e| (e.source(), e.target(), e.weight())))
    }
}

impl Eq for Diagram {}
