use egui::Pos2;

use crate::config::EditorConfig;
use crate::diagram::{Diagram, Edge, EdgeId, EdgeStyle, Node, NodeColor, NodeId, NodeStyle};
use crate::event::{CanvasEvent, EventHandler};
use crate::id_generator::IdCounter;

/// Owns the live diagram and applies every change made to it.
#[derive(Debug, Clone)]
pub struct EditorController {
    diagram: Diagram,
    ids: IdCounter,
    edge_style: EdgeStyle,
    dark_theme: bool,
    config: EditorConfig,
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorController {
    /// Starts from the seed diagram.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_diagram(Diagram::seed(), config)
    }

    pub fn with_diagram(diagram: Diagram, config: EditorConfig) -> Self {
        let mut ids = IdCounter::starting_at(1);
        if let Some(max) = diagram.max_node_seq() {
            ids.observe(max);
        }
        Self {
            diagram,
            ids,
            edge_style: EdgeStyle::default(),
            dark_theme: false,
            config,
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn edge_style(&self) -> EdgeStyle {
        self.edge_style
    }

    pub fn is_dark_theme(&self) -> bool {
        self.dark_theme
    }

    /// The id the next `add_node` will use, `None` once ids ran out.
    pub fn next_node_seq(&self) -> Option<u64> {
        self.ids.peek()
    }

    /// Appends a node and, when the diagram was not empty, an edge from the
    /// previously inserted node to it. Returns `None` without touching the
    /// diagram when no unused id is left.
    pub fn add_node(&mut self) -> Option<NodeId> {
        let Some(seq) = self.ids.allocate() else {
            log::warn!("Node ids exhausted, node not added");
            return None;
        };
        let id = NodeId::from_seq(seq);
        let node = Node::new(
            id.clone(),
            format!("Node {seq}"),
            self.config.spawn_position(seq),
            NodeStyle::with_color(NodeColor::for_seq(seq)),
        );

        let previous = self.diagram.last_node().map(|n| n.id.clone());
        self.diagram.push_node(node);

        if let Some(previous) = previous {
            self.push_edge(previous, id.clone());
        }

        log::info!("Added node {id}");
        Some(id)
    }

    /// Adds an edge with the current style. Self-loops and duplicates are
    /// accepted.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> EdgeId {
        let id = self.push_edge(source, target);
        log::info!("Connected {id}");
        id
    }

    fn push_edge(&mut self, source: NodeId, target: NodeId) -> EdgeId {
        let id = self.diagram.next_edge_id(&source, &target);
        self.diagram
            .push_edge(Edge::new(id.clone(), source, target, self.edge_style));
        id
    }

    pub fn delete_nodes(&mut self, ids: &[NodeId]) {
        let removed = self.diagram.remove_nodes(ids);
        let cascaded = if self.config.cascade_delete {
            self.diagram.remove_edges_touching(ids)
        } else {
            0
        };
        log::info!("Deleted {removed} node(s), {cascaded} incident edge(s)");
    }

    pub fn delete_edges(&mut self, ids: &[EdgeId]) {
        let removed = self.diagram.remove_edges(ids);
        log::info!("Deleted {removed} edge(s)");
    }

    /// Only edges created after this call use the new style.
    pub fn set_edge_style(&mut self, style: EdgeStyle) {
        if self.edge_style != style {
            log::info!("Edge style: {}", style.name());
        }
        self.edge_style = style;
    }

    pub fn rename_node(&mut self, id: &NodeId, label: String) {
        match self.diagram.node_mut(id) {
            Some(node) => node.label = label,
            None => log::warn!("Rename of unknown node {id} ignored"),
        }
    }

    pub fn move_node(&mut self, id: &NodeId, position: Pos2) {
        if let Some(node) = self.diagram.node_mut(id) {
            node.position = position;
        }
    }

    pub fn toggle_theme(&mut self) {
        self.dark_theme = !self.dark_theme;
    }

    pub fn set_dark_theme(&mut self, dark: bool) {
        self.dark_theme = dark;
    }

    /// Swaps in a loaded diagram. The counter only moves forward.
    pub fn replace_diagram(&mut self, diagram: Diagram) {
        let dangling = diagram.dangling_edges().count();
        if dangling > 0 {
            log::warn!("Loaded diagram has {dangling} dangling edge(s)");
        }
        if let Some(max) = diagram.max_node_seq() {
            self.ids.observe(max);
        }
        self.diagram = diagram;
    }
}

impl EventHandler for EditorController {
    fn handle_event(&mut self, event: CanvasEvent) {
        match event {
            CanvasEvent::Connect { source, target } => {
                self.connect(source, target);
            }
            CanvasEvent::DeleteNodes(ids) => self.delete_nodes(&ids),
            CanvasEvent::DeleteEdges(ids) => self.delete_edges(&ids),
            CanvasEvent::MoveNode { id, position } => self.move_node(&id, position),
            CanvasEvent::RenameNode { id, label } => self.rename_node(&id, label),
        }
    }
}
