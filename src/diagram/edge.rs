use serde::{Deserialize, Serialize};

use super::node::NodeId;
use super::style::EdgeStyle;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id derived from the endpoint pair, e.g. `e1-2`.
    pub fn between(source: &NodeId, target: &NodeId) -> Self {
        Self(format!("e{source}-{target}"))
    }

    /// The `n`th parallel edge between the same pair, e.g. `e1-2#2`.
    pub fn parallel(source: &NodeId, target: &NodeId, n: usize) -> Self {
        Self(format!("e{source}-{target}#{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type", default)]
    pub style: EdgeStyle,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, style: EdgeStyle) -> Self {
        Self {
            id,
            source,
            target,
            style,
        }
    }

    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }
}
