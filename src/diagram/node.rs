use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::style::NodeStyle;

/// Width of a node box in world units.
pub const NODE_WIDTH: f32 = 150.0;
/// Height of a node box in world units.
pub const NODE_HEIGHT: f32 = 40.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_seq(seq: u64) -> Self {
        Self(seq.to_string())
    }

    /// The numeric value of ids handed out by the counter, if this is one.
    pub fn seq(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether the label of a node can be edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Static,
    #[default]
    Editable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    pub label: String,
    pub position: Pos2,
    #[serde(default)]
    pub style: NodeStyle,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>, position: Pos2, style: NodeStyle) -> Self {
        Self {
            id,
            kind: NodeKind::Editable,
            label: label.into(),
            position,
            style,
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_editable(&self) -> bool {
        self.kind == NodeKind::Editable
    }

    /// Bounding box in world coordinates. `position` is the top-left corner.
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, Vec2::new(NODE_WIDTH, NODE_HEIGHT))
    }

    /// Anchor of the outgoing connection handle (bottom center).
    pub fn source_anchor(&self) -> Pos2 {
        self.rect().center_bottom()
    }

    /// Anchor of the incoming connection handle (top center).
    pub fn target_anchor(&self) -> Pos2 {
        self.rect().center_top()
    }
}
