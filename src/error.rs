use thiserror::Error;

use crate::diagram::NodeId;

/// Errors that can occur during label editor state transitions
#[derive(Debug, Error, PartialEq)]
pub enum TransitionError {
    /// A second edit was started before the first one was committed
    #[error("Already editing the label of node {editing}, cannot start editing {requested}")]
    AlreadyEditing { editing: NodeId, requested: NodeId },

    /// Commit or cancel without an edit in progress
    #[error("No label edit in progress")]
    NotEditing,

    /// The node's label is not editable
    #[error("Label of node {0} is not editable")]
    NotEditable(NodeId),
}
