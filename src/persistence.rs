use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagram::{Diagram, Edge, Node};

/// Errors that can occur while saving or loading the flowchart
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize flowchart: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Saved flowchart is corrupt: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Borrowed view written to storage.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
}

/// Owned form read back from storage.
#[derive(Deserialize)]
struct Snapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// Serializes the diagram into the text stored in the slot.
pub fn to_snapshot(diagram: &Diagram) -> PersistenceResult<String> {
    let snapshot = SnapshotRef {
        nodes: diagram.nodes(),
        edges: diagram.edges(),
    };
    serde_json::to_string(&snapshot).map_err(PersistenceError::Serialize)
}

/// Parses stored text. No referential checks are made.
pub fn from_snapshot(text: &str) -> PersistenceResult<Diagram> {
    let snapshot: Snapshot = serde_json::from_str(text).map_err(PersistenceError::Parse)?;
    let mut diagram = Diagram::new();
    for node in snapshot.nodes {
        diagram.push_node(node);
    }
    for edge in snapshot.edges {
        diagram.push_edge(edge);
    }
    Ok(diagram)
}

/// Reads and writes the single saved-flowchart slot of a key-value store.
#[derive(Debug, Clone)]
pub struct DiagramStore {
    key: String,
}

impl DiagramStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrites the slot unconditionally.
    pub fn save(&self, diagram: &Diagram, storage: &mut dyn eframe::Storage) -> PersistenceResult<()> {
        let text = to_snapshot(diagram)?;
        storage.set_string(&self.key, text);
        storage.flush();
        log::info!(
            "Saved flowchart ({} nodes, {} edges) under '{}'",
            diagram.nodes().len(),
            diagram.edges().len(),
            self.key
        );
        Ok(())
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn load(&self, storage: &dyn eframe::Storage) -> PersistenceResult<Option<Diagram>> {
        let Some(text) = storage.get_string(&self.key) else {
            log::info!("Nothing saved under '{}'", self.key);
            return Ok(None);
        };
        let diagram = from_snapshot(&text)?;
        log::info!(
            "Loaded flowchart ({} nodes, {} edges)",
            diagram.nodes().len(),
            diagram.edges().len()
        );
        Ok(Some(diagram))
    }
}

/// Storage that lives only as long as the process. Used when the frame has
/// no persistent storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }

    fn flush(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::Storage as _;

    #[test]
    fn test_snapshot_shape() {
        let text = to_snapshot(&Diagram::seed()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["nodes"][0]["id"], "1");
        assert_eq!(value["nodes"][0]["label"], "Start");
        assert_eq!(value["nodes"][0]["type"], "editable");
        assert_eq!(value["nodes"][0]["style"]["color"], "green");
        assert_eq!(value["edges"][0]["id"], "e1-2");
        assert_eq!(value["edges"][0]["type"], "default");
    }

    #[test]
    fn test_missing_style_fields_default() {
        let text = r#"{"nodes":[{"id":"a","label":"A","position":{"x":1.0,"y":2.0}}],"edges":[]}"#;
        let diagram = from_snapshot(text).unwrap();
        let node = &diagram.nodes()[0];
        assert!(node.is_editable());
        assert_eq!(node.style.padding, 10.0);
    }

    #[test]
    fn test_save_overwrites_slot() {
        let store = DiagramStore::new("flowchart");
        let mut storage = MemoryStorage::new();

        store.save(&Diagram::seed(), &mut storage).unwrap();
        store.save(&Diagram::new(), &mut storage).unwrap();

        let stored = storage.get_string("flowchart").unwrap();
        assert_eq!(stored, r#"{"nodes":[],"edges":[]}"#);
    }
}
