use egui::Pos2;

use crate::diagram::{EdgeId, NodeId};

/// Gestures reported by the canvas that change the diagram.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// A drag from a source handle was released over `target`.
    Connect {
        source: NodeId,
        target: NodeId,
    },
    /// Selected nodes were deleted.
    DeleteNodes(Vec<NodeId>),
    /// Selected edges were deleted.
    DeleteEdges(Vec<EdgeId>),
    /// A node was dragged to a new world position.
    MoveNode {
        id: NodeId,
        position: Pos2,
    },
    /// The inline label editor lost focus.
    RenameNode {
        id: NodeId,
        label: String,
    },
}

impl CanvasEvent {
    pub fn name(&self) -> &'static str {
        match self {
            CanvasEvent::Connect { .. } => "connect",
            CanvasEvent::DeleteNodes(_) => "delete_nodes",
            CanvasEvent::DeleteEdges(_) => "delete_edges",
            CanvasEvent::MoveNode { .. } => "move_node",
            CanvasEvent::RenameNode { .. } => "rename_node",
        }
    }
}
