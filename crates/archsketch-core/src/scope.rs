//! Scoped diagram construction.
//!
//! A [`DiagramScope`] accepts declarations for exactly one diagram and keeps
//! an explicit stack of active parents. [`DiagramScope::open_cluster`] pushes a
//! cluster and returns a [`ClusterScope`] guard; dropping the guard pops the
//! stack back to where it was, whether the cluster body finished or bailed out
//! early with `?`.
//!
//! # Example
//!
//! ```
//! use archsketch_core::{
//!     BuildError,
//!     scope::DiagramScope,
//!     semantic::{Category, DiagramOptions, Edge},
//! };
//!
//! # fn main() -> Result<(), BuildError> {
//! let mut scope = DiagramScope::new(DiagramOptions::new("Connect to Private EC2 using a Bastion"));
//! let person = scope.add_custom_node("Person", "logo/person.png");
//!
//! let (igw, bastion) = {
//!     let mut vpc = scope.open_cluster("VPC");
//!     let igw = vpc.add_node(Category::InternetGateway, "Internet Gateway");
//!     let mut public = vpc.open_cluster("Public Subnet");
//!     let bastion = public.add_node(Category::Ec2, "EC2 (Bastion Host)");
//!     (igw, bastion)
//! };
//!
//! scope.connect(person, igw)?;
//! scope.connect_with(igw, bastion, Edge::bidirectional())?;
//!
//! let diagram = scope.finish();
//! assert_eq!(diagram.node_count(), 3);
//! assert_eq!(diagram.tree_depth(), 3);
//! # Ok(())
//! # }
//! ```

use std::{
    ops::{Deref, DerefMut},
    path::PathBuf,
};

use log::{debug, trace};

use crate::{
    error::BuildError,
    semantic::{
        Category, ClusterHandle, Diagram, DiagramId, DiagramOptions, Edge, EdgeHandle, Node,
        NodeHandle, Parent,
    },
};

/// Construction context for a single diagram.
#[derive(Debug)]
pub struct DiagramScope {
    diagram: Diagram,
    active: Vec<usize>,
}

impl DiagramScope {
    /// Begin declaring a new diagram.
    pub fn new(options: DiagramOptions) -> Self {
        let diagram = Diagram::new(options);
        debug!(diagram:% = diagram.id(), title = diagram.title(); "Opened diagram scope");
        Self {
            diagram,
            active: Vec::new(),
        }
    }

    /// Identity of the diagram under construction.
    pub fn id(&self) -> DiagramId {
        self.diagram.id()
    }

    /// Borrow the diagram as declared so far.
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// The parent that receives new nodes and clusters.
    pub fn active_parent(&self) -> Parent {
        match self.active.last() {
            Some(&idx) => Parent::Cluster(ClusterHandle::new(self.diagram.id(), idx)),
            None => Parent::Root,
        }
    }

    /// Number of clusters currently open.
    pub fn open_depth(&self) -> usize {
        self.active.len()
    }

    /// Open a cluster under the active parent.
    ///
    /// The cluster stays active until the returned guard is dropped.
    pub fn open_cluster(&mut self, label: impl Into<String>) -> ClusterScope<'_> {
        let parent = self.active.last().copied();
        self.enter(parent, label.into())
    }

    /// Open a cluster under an explicit parent.
    ///
    /// The new cluster becomes the active parent until the guard is dropped.
    ///
    /// # Errors
    ///
    /// Same as [`DiagramScope::add_node_in`].
    pub fn open_cluster_in(
        &mut self,
        parent: Parent,
        label: impl Into<String>,
    ) -> Result<ClusterScope<'_>, BuildError> {
        let parent = self.resolve_parent(parent)?;
        Ok(self.enter(parent, label.into()))
    }

    fn enter(&mut self, parent: Option<usize>, label: String) -> ClusterScope<'_> {
        let restore = self.active.len();
        let handle = self.diagram.push_cluster(parent, label);
        self.active.push(handle.index());
        trace!(
            label = self.diagram.cluster_label(handle.index()),
            depth = self.active.len();
            "Opened cluster"
        );
        ClusterScope {
            scope: self,
            handle,
            restore,
        }
    }

    /// Open a cluster, run `body` inside it, and close it again.
    ///
    /// The cluster is closed on every exit path; the body's result is passed
    /// through unchanged.
    pub fn cluster<T, E, F>(&mut self, label: impl Into<String>, body: F) -> Result<T, E>
    where
        F: FnOnce(&mut ClusterScope<'_>) -> Result<T, E>,
    {
        let mut cluster = self.open_cluster(label);
        body(&mut cluster)
    }

    /// Declare a node under the active parent.
    pub fn add_node(&mut self, category: Category, label: impl Into<String>) -> NodeHandle {
        let parent = self.active.last().copied();
        self.push_node(parent, category, label.into())
    }

    /// Declare a node whose icon is the image at `path`.
    pub fn add_custom_node(
        &mut self,
        label: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> NodeHandle {
        self.add_node(Category::Custom(path.into()), label)
    }

    /// Declare a node under an explicit parent.
    ///
    /// # Errors
    ///
    /// - [`BuildError::ForeignHandle`] if `parent` belongs to another diagram.
    /// - [`BuildError::ClusterNotOpen`] if `parent` is a cluster that has
    ///   already been closed.
    pub fn add_node_in(
        &mut self,
        parent: Parent,
        category: Category,
        label: impl Into<String>,
    ) -> Result<NodeHandle, BuildError> {
        let parent = self.resolve_parent(parent)?;
        Ok(self.push_node(parent, category, label.into()))
    }

    /// Declare a plain forward edge from `source` to `target`.
    pub fn connect(
        &mut self,
        source: NodeHandle,
        target: NodeHandle,
    ) -> Result<EdgeHandle, BuildError> {
        self.connect_with(source, target, Edge::new())
    }

    /// Declare an edge from `source` to `target` with explicit attributes.
    ///
    /// # Errors
    ///
    /// Returns a reference error if either handle was not created by this
    /// diagram.
    pub fn connect_with(
        &mut self,
        source: NodeHandle,
        target: NodeHandle,
        edge: Edge,
    ) -> Result<EdgeHandle, BuildError> {
        self.diagram.check_node(source)?;
        self.diagram.check_node(target)?;

        trace!(
            source = source.index(),
            target = target.index(),
            direction:% = edge.direction();
            "Declared edge"
        );
        Ok(self.diagram.push_edge(source, target, edge))
    }

    /// Close the scope and return the finished diagram.
    pub fn finish(self) -> Diagram {
        debug!(
            diagram:% = self.diagram.id(),
            nodes = self.diagram.node_count(),
            clusters = self.diagram.cluster_count(),
            edges = self.diagram.edge_count();
            "Closed diagram scope"
        );
        self.diagram
    }

    /// Only the root and clusters on the active-parent stack accept children.
    fn resolve_parent(&self, parent: Parent) -> Result<Option<usize>, BuildError> {
        match parent {
            Parent::Root => Ok(None),
            Parent::Cluster(handle) => {
                self.diagram.check_cluster(handle)?;
                if !self.active.contains(&handle.index()) {
                    return Err(BuildError::ClusterNotOpen {
                        label: self.diagram.cluster_label(handle.index()).to_string(),
                    });
                }
                Ok(Some(handle.index()))
            }
        }
    }

    fn push_node(
        &mut self,
        parent: Option<usize>,
        category: Category,
        label: String,
    ) -> NodeHandle {
        trace!(label = label.as_str(), category:% = category; "Declared node");
        self.diagram.push_node(Node::new(label, category, parent))
    }
}

/// Guard for an open cluster.
///
/// Dereferences to the owning [`DiagramScope`], so nodes, nested clusters and
/// edges can be declared through it. Dropping the guard restores the active
/// parent that was in effect before the cluster was opened.
#[derive(Debug)]
pub struct ClusterScope<'a> {
    scope: &'a mut DiagramScope,
    handle: ClusterHandle,
    restore: usize,
}

impl ClusterScope<'_> {
    /// Handle of the cluster this guard keeps open.
    pub fn handle(&self) -> ClusterHandle {
        self.handle
    }
}

impl Deref for ClusterScope<'_> {
    type Target = DiagramScope;

    fn deref(&self) -> &Self::Target {
        self.scope
    }
}

impl DerefMut for ClusterScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.scope
    }
}

impl Drop for ClusterScope<'_> {
    fn drop(&mut self) {
        self.scope.active.truncate(self.restore);
        trace!(cluster = self.handle.index(), depth = self.restore; "Closed cluster");
    }
}
