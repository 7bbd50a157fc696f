pub mod edge_path;
pub mod hit_testing;

pub use edge_path::{distance_to_polyline, edge_path};
pub use hit_testing::{edge_at, node_at, source_handle_at};
