//! Conversion of a [`Diagram`] into a Graphviz DOT graph.
//!
//! Clusters become `cluster_N` subgraphs (Graphviz only draws a box around
//! subgraphs whose name starts with `cluster`), nodes become `node_N`, and
//! edges are emitted after all nodes so they can cross cluster boundaries.
//! Every index comes from declaration order, which keeps the output stable
//! between runs.

use dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph, GraphAttributes, Id, Node as DotNode, NodeId,
    Stmt, Subgraph, Vertex,
};
use indexmap::IndexMap;
use log::debug;

use archsketch_core::{
    color::Color,
    semantic::{
        ArrowDirection, ClusterHandle, Diagram, EdgeRef, LineStyle, Member, NodeHandle, Parent,
    },
};

use crate::{
    config::StyleConfig,
    export::Error,
    icon::{IconAsset, IconResolver},
};

const GRAPH_DEFAULTS: &[(&str, &str)] = &[
    ("pad", "2.0"),
    ("splines", "ortho"),
    ("nodesep", "0.60"),
    ("ranksep", "0.75"),
    ("fontname", "Sans-Serif"),
    ("fontsize", "15"),
    ("fontcolor", "#2D3436"),
];

const CLUSTER_DEFAULTS: &[(&str, &str)] = &[
    ("shape", "box"),
    ("style", "rounded"),
    ("labeljust", "l"),
    ("pencolor", "#AEB6BE"),
    ("fontname", "Sans-Serif"),
    ("fontsize", "12"),
];

const NODE_DEFAULTS: &[(&str, &str)] = &[
    ("shape", "box"),
    ("style", "rounded"),
    ("fixedsize", "true"),
    ("width", "1.4"),
    ("height", "1.4"),
    ("labelloc", "b"),
    ("imagescale", "true"),
    ("fontname", "Sans-Serif"),
    ("fontsize", "13"),
    ("fontcolor", "#2D3436"),
];

const EDGE_DEFAULTS: &[(&str, &str)] = &[("color", "#7B8894")];

/// Cluster backgrounds, indexed by nesting depth.
const CLUSTER_BACKGROUNDS: &[&str] = &["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

/// Height of an image node with a single-line label; each extra line adds
/// `IMAGE_LINE_PADDING`.
const IMAGE_NODE_HEIGHT: f64 = 1.9;
const IMAGE_LINE_PADDING: f64 = 0.4;

/// Builds DOT graphs from diagrams.
#[derive(Debug, Clone, Copy)]
pub struct DotBuilder<'a> {
    icons: &'a IconResolver,
    style: &'a StyleConfig,
}

impl<'a> DotBuilder<'a> {
    /// Create a builder that resolves icons with `icons` and applies `style`
    /// overrides on top of the defaults.
    pub fn new(icons: &'a IconResolver, style: &'a StyleConfig) -> Self {
        Self { icons, style }
    }

    /// Convert `diagram` into a directed DOT graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Asset`] if any node icon cannot be resolved. No
    /// partial graph is returned in that case.
    pub fn build(&self, diagram: &Diagram) -> Result<Graph, Error> {
        let mut graph_attributes = vec![
            ("rankdir", diagram.options().direction().as_str()),
            ("label", diagram.title()),
        ];
        graph_attributes.extend_from_slice(GRAPH_DEFAULTS);

        let mut stmts = vec![
            Stmt::GAttribute(GraphAttributes::Graph(merge(
                &graph_attributes,
                self.style.graph(),
            ))),
            Stmt::GAttribute(GraphAttributes::Node(merge(NODE_DEFAULTS, self.style.node()))),
            Stmt::GAttribute(GraphAttributes::Edge(merge(EDGE_DEFAULTS, self.style.edge()))),
        ];

        self.push_members(diagram, Parent::Root, &mut stmts)?;
        stmts.extend(diagram.edges().map(edge_stmt));

        debug!(
            title = diagram.title(),
            statements = stmts.len();
            "Built DOT graph"
        );

        Ok(Graph::DiGraph {
            id: quoted(diagram.title()),
            strict: false,
            stmts,
        })
    }

    fn push_members(
        &self,
        diagram: &Diagram,
        parent: Parent,
        stmts: &mut Vec<Stmt>,
    ) -> Result<(), Error> {
        for member in diagram.children(parent) {
            let stmt = match member {
                Member::Node(handle) => self.node_stmt(diagram, handle)?,
                Member::Cluster(handle) => self.cluster_stmt(diagram, handle)?,
            };
            stmts.extend(stmt);
        }
        Ok(())
    }

    fn node_stmt(&self, diagram: &Diagram, handle: NodeHandle) -> Result<Option<Stmt>, Error> {
        let Some(node) = diagram.node(handle) else {
            return Ok(None);
        };

        let mut attributes = vec![attribute("label", node.label())];
        match self.icons.resolve(node.category())? {
            IconAsset::Image(path) => {
                let lines = node.label().lines().count().max(1);
                let height = IMAGE_NODE_HEIGHT + IMAGE_LINE_PADDING * (lines - 1) as f64;
                attributes.push(attribute("shape", "none"));
                attributes.push(attribute("height", &format!("{height:.1}")));
                attributes.push(attribute("image", &path.to_string_lossy()));
            }
            IconAsset::Shape(shape) => attributes.push(attribute("shape", shape)),
        }

        Ok(Some(Stmt::Node(DotNode {
            id: node_id(handle),
            attributes,
        })))
    }

    fn cluster_stmt(
        &self,
        diagram: &Diagram,
        handle: ClusterHandle,
    ) -> Result<Option<Stmt>, Error> {
        let Some(cluster) = diagram.cluster(handle) else {
            return Ok(None);
        };

        let mut stmts: Vec<Stmt> = CLUSTER_DEFAULTS
            .iter()
            .map(|(key, value)| Stmt::Attribute(attribute(key, value)))
            .collect();
        stmts.push(Stmt::Attribute(attribute("label", cluster.label())));
        stmts.push(Stmt::Attribute(attribute(
            "bgcolor",
            &self.cluster_background(cluster.depth()),
        )));

        self.push_members(diagram, Parent::Cluster(handle), &mut stmts)?;

        Ok(Some(Stmt::Subgraph(Subgraph {
            id: Id::Plain(format!("cluster_{}", handle.index())),
            stmts,
        })))
    }

    fn cluster_background(&self, depth: usize) -> String {
        let level = depth.saturating_sub(1);
        match self.style.cluster_backgrounds() {
            Some(palette) => palette[level % palette.len()].to_hex(),
            None => CLUSTER_BACKGROUNDS[level % CLUSTER_BACKGROUNDS.len()].to_string(),
        }
    }
}

fn edge_stmt(edge: EdgeRef<'_>) -> Stmt {
    let spec = edge.edge();
    let mut attributes = Vec::new();

    if let Some(label) = spec.label() {
        attributes.push(attribute("label", label));
    }
    match spec.direction() {
        ArrowDirection::Forward => {}
        ArrowDirection::Backward => attributes.push(attribute("dir", "back")),
        ArrowDirection::Bidirectional => attributes.push(attribute("dir", "both")),
        ArrowDirection::Plain => attributes.push(attribute("dir", "none")),
    }
    if let Some(color) = spec.color().map(Color::to_hex) {
        attributes.push(attribute("color", &color));
    }
    if spec.style() != LineStyle::Solid {
        attributes.push(attribute("style", spec.style().as_str()));
    }

    Stmt::Edge(DotEdge {
        ty: EdgeTy::Pair(
            Vertex::N(node_id(edge.source())),
            Vertex::N(node_id(edge.target())),
        ),
        attributes,
    })
}

fn node_id(handle: NodeHandle) -> NodeId {
    NodeId(Id::Plain(format!("node_{}", handle.index())), None)
}

fn attribute(key: &str, value: &str) -> Attribute {
    Attribute(Id::Plain(key.to_string()), quoted(value))
}

/// Wrap `value` in a quoted DOT string, escaping what the DOT lexer treats
/// specially inside quotes.
fn quoted(value: &str) -> Id {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    Id::Escaped(format!("\"{escaped}\""))
}

/// Apply `overrides` on top of `defaults`. Overridden keys keep their default
/// position; new keys are appended in the order they were configured.
fn merge(defaults: &[(&str, &str)], overrides: &IndexMap<String, String>) -> Vec<Attribute> {
    let mut merged: IndexMap<&str, &str> = defaults.iter().copied().collect();
    for (key, value) in overrides {
        merged.insert(key, value);
    }
    merged
        .into_iter()
        .map(|(key, value)| attribute(key, value))
        .collect()
}
