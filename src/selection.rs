use crate::diagram::{Diagram, EdgeId, NodeId};

/// Nodes and edges currently selected on the canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
}

impl Selection {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }

    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.contains(id)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Replaces the selection, or toggles `id` in it when `additive`.
    pub fn pick_node(&mut self, id: NodeId, additive: bool) {
        if !additive {
            self.clear();
        }
        if let Some(i) = self.nodes.iter().position(|n| *n == id) {
            if additive {
                self.nodes.remove(i);
            }
        } else {
            self.nodes.push(id);
        }
    }

    pub fn pick_edge(&mut self, id: EdgeId, additive: bool) {
        if !additive {
            self.clear();
        }
        if let Some(i) = self.edges.iter().position(|e| *e == id) {
            if additive {
                self.edges.remove(i);
            }
        } else {
            self.edges.push(id);
        }
    }

    /// Drops ids that no longer exist in `diagram`.
    pub fn retain_existing(&mut self, diagram: &Diagram) {
        self.nodes.retain(|id| diagram.contains_node(id));
        self.edges.retain(|id| diagram.contains_edge(id));
    }

    /// Empties the selection, returning what was in it.
    pub fn take(&mut self) -> (Vec<NodeId>, Vec<EdgeId>) {
        (std::mem::take(&mut self.nodes), std::mem::take(&mut self.edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_additive_pick_toggles() {
        let mut selection = Selection::default();
        selection.pick_node(NodeId::from_seq(1), false);
        selection.pick_node(NodeId::from_seq(2), true);
        assert_eq!(selection.nodes().len(), 2);

        selection.pick_node(NodeId::from_seq(1), true);
        assert_eq!(selection.nodes(), &[NodeId::from_seq(2)]);

        selection.pick_edge(EdgeId::new("e1-2"), false);
        assert!(selection.nodes().is_empty());
        assert_eq!(selection.edges().len(), 1);
    }

    #[test]
    fn test_retain_existing() {
        let mut diagram = Diagram::seed();
        let mut selection = Selection::default();
        selection.pick_node(NodeId::from_seq(2), false);
        selection.pick_edge(EdgeId::new("e1-2"), true);

        diagram.remove_nodes(&[NodeId::from_seq(2)]);
        selection.retain_existing(&diagram);

        assert!(selection.nodes().is_empty());
        assert_eq!(selection.edges(), &[EdgeId::new("e1-2")]);
    }
}
