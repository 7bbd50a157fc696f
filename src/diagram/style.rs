use egui::Color32;
use serde::{Deserialize, Serialize};

/// The fixed five-color node palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeColor {
    Red,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl NodeColor {
    pub const ALL: [NodeColor; 5] = [
        NodeColor::Red,
        NodeColor::Yellow,
        NodeColor::Green,
        NodeColor::Blue,
        NodeColor::Purple,
    ];

    /// Palette entry for a sequential node id (`id mod 5`).
    pub fn for_seq(seq: u64) -> Self {
        Self::ALL[(seq % Self::ALL.len() as u64) as usize]
    }

    pub fn fill(self) -> Color32 {
        match self {
            NodeColor::Red => Color32::from_rgb(0xF8, 0x71, 0x71),
            NodeColor::Yellow => Color32::from_rgb(0xFB, 0xBF, 0x24),
            NodeColor::Green => Color32::from_rgb(0x34, 0xD3, 0x99),
            NodeColor::Blue => Color32::from_rgb(0x60, 0xA5, 0xFA),
            NodeColor::Purple => Color32::from_rgb(0xA7, 0x8B, 0xFA),
        }
    }

    pub fn border(self) -> Color32 {
        match self {
            NodeColor::Red => Color32::from_rgb(0xDC, 0x26, 0x26),
            NodeColor::Yellow => Color32::from_rgb(0xCA, 0x8A, 0x04),
            NodeColor::Green => Color32::from_rgb(0x05, 0x96, 0x69),
            NodeColor::Blue => Color32::from_rgb(0x25, 0x63, 0xEB),
            NodeColor::Purple => Color32::from_rgb(0x7C, 0x3A, 0xED),
        }
    }

    /// Fill used while the pointer hovers the node.
    pub fn hover_fill(self) -> Color32 {
        match self {
            NodeColor::Red => Color32::from_rgb(0x3B, 0x82, 0xF6),
            NodeColor::Yellow => Color32::from_rgb(0x8B, 0x5C, 0xF6),
            NodeColor::Green => Color32::from_rgb(0xF5, 0x9E, 0x0B),
            NodeColor::Blue => Color32::from_rgb(0xEC, 0x48, 0x99),
            NodeColor::Purple => Color32::from_rgb(0x10, 0xB9, 0x81),
        }
    }
}

/// Visual attributes of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStyle {
    pub color: NodeColor,
    pub padding: f32,
    pub radius: f32,
    pub shadow: bool,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            color: NodeColor::Blue,
            padding: 10.0,
            radius: 8.0,
            shadow: true,
        }
    }
}

impl NodeStyle {
    pub fn with_color(color: NodeColor) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

/// Routing used to draw a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    #[default]
    Default,
    Step,
    SmoothStep,
    Straight,
    Bezier,
}

impl EdgeStyle {
    pub const ALL: [EdgeStyle; 5] = [
        EdgeStyle::Default,
        EdgeStyle::Step,
        EdgeStyle::SmoothStep,
        EdgeStyle::Straight,
        EdgeStyle::Bezier,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EdgeStyle::Default => "Default",
            EdgeStyle::Step => "Step",
            EdgeStyle::SmoothStep => "Smooth Step",
            EdgeStyle::Straight => "Straight",
            EdgeStyle::Bezier => "Bezier",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps_by_id() {
        assert_eq!(NodeColor::for_seq(0), NodeColor::Red);
        assert_eq!(NodeColor::for_seq(3), NodeColor::Blue);
        assert_eq!(NodeColor::for_seq(7), NodeColor::Green);
    }

    #[test]
    fn test_edge_style_wire_names() {
        let json = serde_json::to_string(&EdgeStyle::SmoothStep).unwrap();
        assert_eq!(json, "\"smoothstep\"");
        let parsed: EdgeStyle = serde_json::from_str("\"straight\"").unwrap();
        assert_eq!(parsed, EdgeStyle::Straight);
    }
}
