use crate::diagram::{Node, NodeId};
use crate::error::TransitionError;

/// Inline label editing.
///
/// ```text
///  ┌─────────┐  double-click   ┌─────────┐
///  │ Viewing ├────────────────►│ Editing │
///  │         │◄────────────────┤         │
///  └─────────┘   focus lost    └─────────┘
///                (commit)
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LabelEditor {
    #[default]
    Viewing,
    Editing {
        node: NodeId,
        buffer: String,
        /// Focus has been requested for the text field.
        focused: bool,
    },
}

impl LabelEditor {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    pub fn editing_node(&self) -> Option<&NodeId> {
        match self {
            Self::Editing { node, .. } => Some(node),
            Self::Viewing => None,
        }
    }

    /// Viewing → Editing, seeded with the node's current label.
    pub fn begin(&mut self, node: &Node) -> Result<(), TransitionError> {
        if let Self::Editing { node: editing, .. } = self {
            return Err(TransitionError::AlreadyEditing {
                editing: editing.clone(),
                requested: node.id.clone(),
            });
        }
        if !node.is_editable() {
            return Err(TransitionError::NotEditable(node.id.clone()));
        }
        *self = Self::Editing {
            node: node.id.clone(),
            buffer: node.label.clone(),
            focused: false,
        };
        Ok(())
    }

    /// Editing → Viewing. Returns the node and the text to store.
    pub fn commit(&mut self) -> Result<(NodeId, String), TransitionError> {
        match std::mem::take(self) {
            Self::Editing { node, buffer, .. } => Ok((node, buffer)),
            Self::Viewing => Err(TransitionError::NotEditing),
        }
    }

    /// Drops the edit without committing, e.g. when its node disappeared.
    pub fn abandon(&mut self) {
        *self = Self::Viewing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{NodeKind, NodeStyle};
    use egui::Pos2;

    fn node(id: u64) -> Node {
        Node::new(NodeId::from_seq(id), format!("Node {id}"), Pos2::ZERO, NodeStyle::default())
    }

    #[test]
    fn test_begin_seeds_buffer() {
        let mut editor = LabelEditor::default();
        editor.begin(&node(4)).unwrap();
        match &editor {
            LabelEditor::Editing { buffer, focused, .. } => {
                assert_eq!(buffer, "Node 4");
                assert!(!focused);
            }
            LabelEditor::Viewing => panic!("expected editing"),
        }
    }

    #[test]
    fn test_static_nodes_refuse_editing() {
        let mut editor = LabelEditor::default();
        let err = editor.begin(&node(1).with_kind(NodeKind::Static)).unwrap_err();
        assert_eq!(err, TransitionError::NotEditable(NodeId::from_seq(1)));
        assert!(!editor.is_editing());
    }
}
