use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, vec2};

use crate::diagram::{Diagram, Node, NodeId};
use crate::geometry::edge_path;
use crate::geometry::hit_testing::HANDLE_RADIUS;
use crate::selection::Selection;

use super::viewport::Viewport;

/// Background dot spacing in world units.
const DOT_GAP: f32 = 12.0;
/// Growth of a hovered node.
const HOVER_SCALE: f32 = 1.08;
const LABEL_SIZE: f32 = 14.0;

/// Colors that follow the light/dark theme. Node colors come from the
/// palette and do not change.
#[derive(Debug, Clone, Copy)]
pub struct CanvasColors {
    pub background: Color32,
    pub dots: Color32,
    pub edge: Color32,
    pub edge_selected: Color32,
    pub selection_outline: Color32,
    pub handle: Color32,
    pub minimap_background: Color32,
    pub minimap_viewport: Color32,
}

impl CanvasColors {
    pub fn for_theme(dark: bool) -> Self {
        if dark {
            Self {
                background: Color32::from_rgb(0x1A, 0x1A, 0x1A),
                dots: Color32::from_gray(0x55),
                edge: Color32::from_gray(0xB1),
                edge_selected: Color32::WHITE,
                selection_outline: Color32::WHITE,
                handle: Color32::from_gray(0xDD),
                minimap_background: Color32::from_rgba_unmultiplied(0x2A, 0x2A, 0x2A, 0xE0),
                minimap_viewport: Color32::from_gray(0xAA),
            }
        } else {
            Self {
                background: Color32::WHITE,
                dots: Color32::from_gray(0x91),
                edge: Color32::from_gray(0xB1),
                edge_selected: Color32::from_gray(0x55),
                selection_outline: Color32::BLACK,
                handle: Color32::from_gray(0x1A),
                minimap_background: Color32::from_rgba_unmultiplied(0xF4, 0xF4, 0xF4, 0xE0),
                minimap_viewport: Color32::from_gray(0x60),
            }
        }
    }
}

/// Everything needed to paint one frame of the canvas.
pub struct Scene<'a> {
    pub diagram: &'a Diagram,
    pub viewport: &'a Viewport,
    pub rect: Rect,
    pub selection: &'a Selection,
    pub hovered: Option<&'a NodeId>,
    /// Node whose label is covered by the text editor.
    pub editing: Option<&'a NodeId>,
    /// In-flight connection: source node and pointer in world space.
    pub pending_connection: Option<(&'a NodeId, Pos2)>,
    pub show_handles: bool,
    pub colors: CanvasColors,
}

pub fn paint(painter: &Painter, scene: &Scene<'_>) {
    painter.rect_filled(scene.rect, 0.0, scene.colors.background);
    paint_dots(painter, scene);
    paint_edges(painter, scene);
    paint_pending_connection(painter, scene);
    for node in scene.diagram.nodes() {
        paint_node(painter, scene, node);
    }
}

fn paint_dots(painter: &Painter, scene: &Scene<'_>) {
    let gap = DOT_GAP * scene.viewport.zoom;
    if gap < 4.0 {
        return;
    }
    let radius = (scene.viewport.zoom).clamp(0.5, 1.5);
    let origin = scene.viewport.to_screen(scene.rect, Pos2::ZERO);
    let first_x = scene.rect.left() + (origin.x - scene.rect.left()).rem_euclid(gap);
    let first_y = scene.rect.top() + (origin.y - scene.rect.top()).rem_euclid(gap);

    let mut y = first_y;
    while y <= scene.rect.bottom() {
        let mut x = first_x;
        while x <= scene.rect.right() {
            painter.circle_filled(Pos2::new(x, y), radius, scene.colors.dots);
            x += gap;
        }
        y += gap;
    }
}

fn paint_edges(painter: &Painter, scene: &Scene<'_>) {
    let diagram = scene.diagram;
    for edge in diagram.edges() {
        let (Some(source), Some(target)) = (diagram.node(&edge.source), diagram.node(&edge.target))
        else {
            continue;
        };
        let points: Vec<Pos2> = edge_path(edge.style, source.source_anchor(), target.target_anchor())
            .into_iter()
            .map(|p| scene.viewport.to_screen(scene.rect, p))
            .collect();
        let stroke = if scene.selection.contains_edge(&edge.id) {
            Stroke::new(2.5, scene.colors.edge_selected)
        } else {
            Stroke::new(1.5, scene.colors.edge)
        };
        painter.add(Shape::line(points, stroke));
    }
}

fn paint_pending_connection(painter: &Painter, scene: &Scene<'_>) {
    let Some((source, pointer)) = scene.pending_connection else {
        return;
    };
    let Some(node) = scene.diagram.node(source) else {
        return;
    };
    let from = scene.viewport.to_screen(scene.rect, node.source_anchor());
    let to = scene.viewport.to_screen(scene.rect, pointer);
    painter.extend(Shape::dashed_line(
        &[from, to],
        Stroke::new(1.5, scene.colors.edge_selected),
        6.0,
        4.0,
    ));
}

fn paint_node(painter: &Painter, scene: &Scene<'_>, node: &Node) {
    let zoom = scene.viewport.zoom;
    let hovered = scene.hovered == Some(&node.id);
    let mut rect = scene.viewport.rect_to_screen(scene.rect, node.rect());
    if hovered {
        rect = Rect::from_center_size(rect.center(), rect.size() * HOVER_SCALE);
    }
    let rounding = node.style.radius * zoom;

    if node.style.shadow {
        let (offset, alpha) = if hovered { (6.0, 64) } else { (2.0, 38) };
        painter.rect_filled(
            rect.translate(vec2(0.0, offset * zoom)).expand(1.0),
            rounding,
            Color32::from_black_alpha(alpha),
        );
    }

    let color = node.style.color;
    let (fill, border) = if hovered {
        (color.hover_fill(), Color32::BLACK)
    } else {
        (color.fill(), color.border())
    };
    painter.rect(rect, rounding, fill, Stroke::new(2.0, border));

    if scene.selection.contains_node(&node.id) {
        painter.rect_stroke(
            rect.expand(3.0),
            rounding + 3.0,
            Stroke::new(1.5, scene.colors.selection_outline),
        );
    }

    if scene.editing != Some(&node.id) {
        let inner = rect.shrink(node.style.padding * zoom);
        painter.with_clip_rect(inner.intersect(scene.rect)).text(
            rect.center(),
            Align2::CENTER_CENTER,
            &node.label,
            FontId::proportional(LABEL_SIZE * zoom),
            Color32::WHITE,
        );
    }

    if scene.show_handles {
        let radius = HANDLE_RADIUS * zoom;
        let stroke = Stroke::new(1.0, Color32::WHITE);
        for anchor in [node.target_anchor(), node.source_anchor()] {
            let center = scene.viewport.to_screen(scene.rect, anchor);
            painter.circle(center, radius, scene.colors.handle, stroke);
        }
    }
}
