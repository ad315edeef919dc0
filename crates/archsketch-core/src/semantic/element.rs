//! Diagram element types for the semantic model.

use std::{fmt, path::PathBuf, str::FromStr};

use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::Deserialize;

use crate::{color::Color, semantic::diagram::DiagramId};

/// Visual category of a node.
///
/// The category is a flat tag: the builder never branches on it, and the
/// renderer maps it to an icon asset. `Custom` carries an explicit image path
/// supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Ec2,
    InternetGateway,
    Vpc,
    VpcPeering,
    PrivateSubnet,
    PublicSubnet,
    RouteTable,
    Endpoint,
    VpnGateway,
    CustomerGateway,
    VpnConnection,
    SystemsManagerParameterStore,
    IamRole,
    User,
    Terraform,
    /// A caller-supplied image, resolved relative to the diagram's base directory.
    Custom(PathBuf),
}

impl Category {
    /// Returns the stable name of the category.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ec2 => "ec2",
            Self::InternetGateway => "internet_gateway",
            Self::Vpc => "vpc",
            Self::VpcPeering => "vpc_peering",
            Self::PrivateSubnet => "private_subnet",
            Self::PublicSubnet => "public_subnet",
            Self::RouteTable => "route_table",
            Self::Endpoint => "endpoint",
            Self::VpnGateway => "vpn_gateway",
            Self::CustomerGateway => "customer_gateway",
            Self::VpnConnection => "vpn_connection",
            Self::SystemsManagerParameterStore => "systems_manager_parameter_store",
            Self::IamRole => "iam_role",
            Self::User => "user",
            Self::Terraform => "terraform",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(path) => write!(f, "custom({})", path.display()),
            _ => f.write_str(self.name()),
        }
    }
}

/// A labeled leaf of the diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    label: String,
    category: Category,
    parent: Option<usize>,
}

impl Node {
    pub(crate) fn new(label: String, category: Category, parent: Option<usize>) -> Self {
        Self {
            label,
            category,
            parent,
        }
    }

    /// Borrow the node's display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Borrow the node's visual category.
    pub fn category(&self) -> &Category {
        &self.category
    }

    pub(crate) fn parent_index(&self) -> Option<usize> {
        self.parent
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.category)
    }
}

/// Direction markers drawn on an edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowDirection {
    #[default]
    Forward, // ->
    Backward,      // <-
    Bidirectional, // <->
    Plain,         // -
}

impl ArrowDirection {
    fn to_str(self) -> &'static str {
        match self {
            Self::Forward => "->",
            Self::Backward => "<-",
            Self::Bidirectional => "<->",
            Self::Plain => "-",
        }
    }
}

impl FromStr for ArrowDirection {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "->" => Ok(Self::Forward),
            "<-" => Ok(Self::Backward),
            "<->" => Ok(Self::Bidirectional),
            "-" => Ok(Self::Plain),
            _ => Err("Invalid arrow direction"),
        }
    }
}

impl fmt::Display for ArrowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Line pattern used to draw an edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Bold,
}

impl LineStyle {
    /// Returns the Graphviz `style` value for this line style.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Bold => "bold",
        }
    }
}

/// A relation drawn between two nodes.
///
/// `Edge` doubles as the declaration value passed to
/// [`DiagramScope::connect_with`](crate::scope::DiagramScope::connect_with):
///
/// ```
/// use archsketch_core::semantic::{ArrowDirection, Edge};
///
/// let edge = Edge::new().with_label("SSM");
/// assert_eq!(edge.label(), Some("SSM"));
/// assert_eq!(edge.direction(), ArrowDirection::Forward);
///
/// let both = Edge::bidirectional();
/// assert_eq!(both.direction(), ArrowDirection::Bidirectional);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edge {
    label: Option<String>,
    direction: ArrowDirection,
    color: Option<Color>,
    style: LineStyle,
}

impl Edge {
    /// Create a plain forward edge without a label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an edge with arrow heads on both ends.
    pub fn bidirectional() -> Self {
        Self::new().with_direction(ArrowDirection::Bidirectional)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_direction(mut self, direction: ArrowDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    /// Borrow the edge label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn direction(&self) -> ArrowDirection {
        self.direction
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn style(&self) -> LineStyle {
        self.style
    }
}

/// Handle to a node declared in a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    diagram: DiagramId,
    index: NodeIndex,
}

impl NodeHandle {
    pub(crate) fn new(diagram: DiagramId, index: NodeIndex) -> Self {
        Self { diagram, index }
    }

    /// The diagram that created this handle.
    pub fn diagram(&self) -> DiagramId {
        self.diagram
    }

    /// Position of the node in declaration order.
    pub fn index(&self) -> usize {
        self.index.index()
    }

    pub(crate) fn node_index(&self) -> NodeIndex {
        self.index
    }
}

/// Handle to a cluster declared in a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterHandle {
    diagram: DiagramId,
    index: usize,
}

impl ClusterHandle {
    pub(crate) fn new(diagram: DiagramId, index: usize) -> Self {
        Self { diagram, index }
    }

    /// The diagram that created this handle.
    pub fn diagram(&self) -> DiagramId {
        self.diagram
    }

    /// Position of the cluster in declaration order.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Handle to an edge declared in a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeHandle {
    diagram: DiagramId,
    index: EdgeIndex,
}

impl EdgeHandle {
    pub(crate) fn new(diagram: DiagramId, index: EdgeIndex) -> Self {
        Self { diagram, index }
    }

    /// The diagram that created this handle.
    pub fn diagram(&self) -> DiagramId {
        self.diagram
    }

    /// Position of the edge in declaration order.
    pub fn index(&self) -> usize {
        self.index.index()
    }

    pub(crate) fn edge_index(&self) -> EdgeIndex {
        self.index
    }
}

/// A parent that can receive nodes and clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    /// The diagram itself.
    Root,
    /// A cluster of the diagram.
    Cluster(ClusterHandle),
}

impl From<ClusterHandle> for Parent {
    fn from(handle: ClusterHandle) -> Self {
        Self::Cluster(handle)
    }
}

/// A child of the root or of a cluster, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Member {
    Node(NodeHandle),
    Cluster(ClusterHandle),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_direction_round_trips_through_str() {
        for direction in [
            ArrowDirection::Forward,
            ArrowDirection::Backward,
            ArrowDirection::Bidirectional,
            ArrowDirection::Plain,
        ] {
            let parsed: ArrowDirection = direction.to_string().parse().unwrap();
            assert_eq!(parsed, direction);
        }
        assert!("=>".parse::<ArrowDirection>().is_err());
    }

    #[test]
    fn test_edge_defaults() {
        let edge = Edge::new();
        assert_eq!(edge.label(), None);
        assert_eq!(edge.direction(), ArrowDirection::Forward);
        assert_eq!(edge.color(), None);
        assert_eq!(edge.style(), LineStyle::Solid);
    }

    #[test]
    fn test_edge_builder_chain() {
        let color = Color::new("red").unwrap();
        let edge = Edge::bidirectional()
            .with_label("IPSec")
            .with_color(color)
            .with_style(LineStyle::Dashed);

        assert_eq!(edge.label(), Some("IPSec"));
        assert_eq!(edge.direction(), ArrowDirection::Bidirectional);
        assert_eq!(edge.color(), Some(color));
        assert_eq!(edge.style().as_str(), "dashed");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::InternetGateway.to_string(), "internet_gateway");
        assert_eq!(
            Category::Custom(PathBuf::from("logo/person.png")).to_string(),
            "custom(logo/person.png)"
        );
    }
}
