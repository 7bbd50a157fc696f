mod edge;
mod node;
mod style;

pub use edge::{Edge, EdgeId};
pub use node::{Node, NodeId, NodeKind, NODE_HEIGHT, NODE_WIDTH};
pub use style::{EdgeStyle, NodeColor, NodeStyle};

use egui::{Pos2, Rect};

/// The full set of nodes and edges being edited.
///
/// Both collections keep insertion order, which is also the paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// The diagram shown on a fresh start.
    pub fn seed() -> Self {
        let start = Node::new(
            NodeId::from_seq(1),
            "Start",
            Pos2::new(100.0, 100.0),
            NodeStyle::with_color(NodeColor::Green),
        );
        let process = Node::new(
            NodeId::from_seq(2),
            "Process",
            Pos2::new(300.0, 100.0),
            NodeStyle::with_color(NodeColor::Blue),
        );
        let edge = Edge::new(
            EdgeId::between(&start.id, &process.id),
            start.id.clone(),
            process.id.clone(),
            EdgeStyle::Default,
        );

        Self {
            nodes: vec![start, process],
            edges: vec![edge],
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edge(id).is_some()
    }

    /// The most recently inserted node.
    pub fn last_node(&self) -> Option<&Node> {
        self.nodes.last()
    }

    pub fn push_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// A fresh edge id for the pair; parallel edges get a `#n` suffix.
    pub fn next_edge_id(&self, source: &NodeId, target: &NodeId) -> EdgeId {
        let base = EdgeId::between(source, target);
        if !self.contains_edge(&base) {
            return base;
        }
        (2..)
            .map(|n| EdgeId::parallel(source, target, n))
            .find(|id| !self.contains_edge(id))
            .unwrap_or(base)
    }

    /// Removes nodes whose id is in `ids`. Returns the removed count.
    pub fn remove_nodes(&mut self, ids: &[NodeId]) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|n| !ids.contains(&n.id));
        before - self.nodes.len()
    }

    /// Removes edges whose id is in `ids`. Returns the removed count.
    pub fn remove_edges(&mut self, ids: &[EdgeId]) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| !ids.contains(&e.id));
        before - self.edges.len()
    }

    /// Removes every edge with an endpoint in `nodes`.
    pub fn remove_edges_touching(&mut self, nodes: &[NodeId]) -> usize {
        let before = self.edges.len();
        self.edges
            .retain(|e| !nodes.iter().any(|n| e.touches(n)));
        before - self.edges.len()
    }

    /// Edges whose source or target is not in the diagram.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(|e| !self.contains_node(&e.source) || !self.contains_node(&e.target))
    }

    /// Highest counter-issued id present, if any.
    pub fn max_node_seq(&self) -> Option<u64> {
        self.nodes.iter().filter_map(|n| n.id.seq()).max()
    }

    /// World-space bounds of all nodes.
    pub fn bounds(&self) -> Option<Rect> {
        self.nodes
            .iter()
            .map(Node::rect)
            .reduce(|acc, r| acc.union(r))
    }
}
