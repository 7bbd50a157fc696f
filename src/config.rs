use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Storage key holding the saved flowchart.
pub const DEFAULT_STORAGE_KEY: &str = "flowchart";
/// File name of the exported image.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "flowchart.png";

/// Editor settings. Persisted alongside the user's preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct EditorConfig {
    /// Remove incident edges when a node is deleted.
    pub cascade_delete: bool,
    /// Position of a hypothetical node with id 0; new nodes step right from it.
    pub spawn_origin: Pos2,
    /// Horizontal distance between consecutive new nodes.
    pub spawn_step: f32,
    pub storage_key: String,
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            cascade_delete: true,
            spawn_origin: Pos2::new(100.0, 200.0),
            spawn_step: 100.0,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_owned(),
        }
    }
}

impl EditorConfig {
    /// Deterministic position of the node with sequential id `seq`.
    pub fn spawn_position(&self, seq: u64) -> Pos2 {
        Pos2::new(
            self.spawn_origin.x + seq as f32 * self.spawn_step,
            self.spawn_origin.y,
        )
    }
}
