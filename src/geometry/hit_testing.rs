use egui::Pos2;

use crate::diagram::{Diagram, EdgeId, Node, NodeId};

use super::edge_path::{distance_to_polyline, edge_path};

/// Radius of a connection handle, in world units.
pub const HANDLE_RADIUS: f32 = 5.0;
/// Extra slack when grabbing a handle.
pub const HANDLE_GRAB_SLACK: f32 = 4.0;
/// How close to an edge path a click must land.
pub const EDGE_HIT_TOLERANCE: f32 = 6.0;

/// Topmost node under `pos`. Later nodes paint over earlier ones.
pub fn node_at(diagram: &Diagram, pos: Pos2) -> Option<&Node> {
    diagram.nodes().iter().rev().find(|n| n.rect().contains(pos))
}

/// Node whose outgoing handle is under `pos`.
pub fn source_handle_at(diagram: &Diagram, pos: Pos2, zoom: f32) -> Option<&NodeId> {
    let reach = HANDLE_RADIUS + HANDLE_GRAB_SLACK / zoom.max(f32::EPSILON);
    diagram
        .nodes()
        .iter()
        .rev()
        .find(|n| n.source_anchor().distance(pos) <= reach)
        .map(|n| &n.id)
}

/// Topmost edge within tolerance of `pos`. Edges with a missing endpoint
/// cannot be hit.
pub fn edge_at(diagram: &Diagram, pos: Pos2, zoom: f32) -> Option<&EdgeId> {
    let tolerance = EDGE_HIT_TOLERANCE / zoom.max(f32::EPSILON);
    diagram
        .edges()
        .iter()
        .rev()
        .find(|edge| {
            let (Some(source), Some(target)) =
                (diagram.node(&edge.source), diagram.node(&edge.target))
            else {
                return false;
            };
            let path = edge_path(edge.style, source.source_anchor(), target.target_anchor());
            distance_to_polyline(pos, &path) <= tolerance
        })
        .map(|e| &e.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_node_hit() {
        let diagram = Diagram::seed();
        assert_eq!(node_at(&diagram, pos2(110.0, 110.0)).unwrap().label, "Start");
        assert_eq!(node_at(&diagram, pos2(310.0, 110.0)).unwrap().label, "Process");
        assert!(node_at(&diagram, pos2(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_source_handle_hit() {
        let diagram = Diagram::seed();
        let anchor = diagram.nodes()[0].source_anchor();
        assert_eq!(
            source_handle_at(&diagram, anchor + egui::vec2(2.0, 0.0), 1.0),
            Some(&NodeId::from_seq(1))
        );
        assert!(source_handle_at(&diagram, anchor + egui::vec2(30.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_edge_hit_skips_dangling() {
        let mut diagram = Diagram::seed();
        let start = diagram.nodes()[0].source_anchor();
        assert_eq!(edge_at(&diagram, start, 1.0).map(EdgeId::as_str), Some("e1-2"));

        diagram.remove_nodes(&[NodeId::from_seq(2)]);
        assert!(edge_at(&diagram, start, 1.0).is_none());
    }
}
