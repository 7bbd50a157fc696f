//! The interactive flowchart canvas.
//!
//! The canvas never mutates the diagram. It turns pointer and keyboard
//! input into [`CanvasEvent`]s and keeps only presentational state:
//! viewport, selection, hover, the drag in progress and the label editor.

mod label_editor;
mod minimap;
mod render;
mod viewport;

pub use label_editor::LabelEditor;
pub use render::CanvasColors;
pub use viewport::Viewport;

use egui::{Key, PointerButton, Pos2, Rect, Sense, Ui, Vec2};

use crate::diagram::{Diagram, NodeId};
use crate::event::CanvasEvent;
use crate::geometry::{edge_at, node_at, source_handle_at};
use crate::selection::Selection;

/// Zoom step of the zoom in/out controls.
const ZOOM_STEP: f32 = 1.2;

/// Pointer drag in progress.
#[derive(Debug, Clone, Default, PartialEq)]
enum Drag {
    #[default]
    None,
    Panning,
    MovingNode {
        id: NodeId,
        /// Pointer position relative to the node's top-left, in world units.
        grab: Vec2,
    },
    Connecting {
        source: NodeId,
        pointer: Pos2,
    },
}

#[derive(Debug)]
pub struct Canvas {
    viewport: Viewport,
    selection: Selection,
    label_editor: LabelEditor,
    drag: Drag,
    hovered: Option<NodeId>,
    /// Connection handles and on-canvas controls. Hidden during export.
    chrome_visible: bool,
    fit_pending: bool,
    last_rect: Option<Rect>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            selection: Selection::default(),
            label_editor: LabelEditor::default(),
            drag: Drag::None,
            hovered: None,
            chrome_visible: true,
            fit_pending: true,
            last_rect: None,
        }
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn label_editor(&self) -> &LabelEditor {
        &self.label_editor
    }

    /// Screen rect the canvas occupied last frame.
    pub fn rect(&self) -> Option<Rect> {
        self.last_rect
    }

    pub fn chrome_visible(&self) -> bool {
        self.chrome_visible
    }

    pub fn set_chrome_visible(&mut self, visible: bool) {
        self.chrome_visible = visible;
    }

    /// Fits the diagram into view on the next frame.
    pub fn request_fit(&mut self) {
        self.fit_pending = true;
    }

    /// Forgets per-diagram state after the diagram was replaced.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.label_editor.abandon();
        self.drag = Drag::None;
        self.hovered = None;
        self.fit_pending = true;
    }

    pub fn zoom_in(&mut self) {
        self.zoom_centered(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_centered(1.0 / ZOOM_STEP);
    }

    fn zoom_centered(&mut self, factor: f32) {
        if let Some(rect) = self.last_rect {
            self.viewport.zoom_around(rect, rect.center(), factor);
        }
    }

    /// Draws the canvas and returns the gestures completed this frame.
    /// With `interactive` false the canvas only paints.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        diagram: &Diagram,
        colors: CanvasColors,
        interactive: bool,
    ) -> Vec<CanvasEvent> {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        self.last_rect = Some(rect);

        if self.fit_pending {
            if let Some(bounds) = diagram.bounds() {
                self.viewport.fit(rect, bounds);
            }
            self.fit_pending = false;
        }

        self.selection.retain_existing(diagram);

        let mut events = Vec::new();
        if interactive {
            self.handle_pointer(ui, &response, diagram, &mut events);
            self.handle_keys(ui, &mut events);
        } else {
            self.hovered = None;
        }

        let pending_connection = match &self.drag {
            Drag::Connecting { source, pointer } => Some((source, *pointer)),
            _ => None,
        };
        let scene = render::Scene {
            diagram,
            viewport: &self.viewport,
            rect,
            selection: &self.selection,
            hovered: self.hovered.as_ref(),
            editing: self.label_editor.editing_node(),
            pending_connection,
            show_handles: self.chrome_visible,
            colors,
        };
        render::paint(&painter, &scene);
        minimap::paint_minimap(&painter, diagram, &self.viewport, rect, &colors);

        self.show_label_editor(ui, diagram, rect, &mut events);
        events
    }

    fn handle_pointer(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        diagram: &Diagram,
        events: &mut Vec<CanvasEvent>,
    ) {
        let rect = response.rect;
        let world = |p: Pos2| self.viewport.to_world(rect, p);

        self.hovered = response
            .hover_pos()
            .and_then(|p| node_at(diagram, world(p)))
            .map(|n| n.id.clone());

        if response.hovered() {
            let (zoom, scroll, pointer) =
                ui.input(|i| (i.zoom_delta(), i.smooth_scroll_delta, i.pointer.hover_pos()));
            if zoom != 1.0 {
                let anchor = pointer.unwrap_or(rect.center());
                self.viewport.zoom_around(rect, anchor, zoom);
            }
            if scroll != Vec2::ZERO {
                self.viewport.pan(scroll);
            }
        }

        if response.drag_started_by(PointerButton::Primary) {
            let origin = ui.input(|i| i.pointer.press_origin());
            if let Some(origin) = origin {
                self.begin_drag(diagram, self.viewport.to_world(rect, origin), ui);
            }
        }

        if response.dragged_by(PointerButton::Primary) {
            let pointer = response
                .interact_pointer_pos()
                .map(|p| self.viewport.to_world(rect, p));
            match &mut self.drag {
                Drag::Panning => self.viewport.pan(response.drag_delta()),
                Drag::MovingNode { id, grab } => {
                    if let Some(pointer) = pointer {
                        events.push(CanvasEvent::MoveNode {
                            id: id.clone(),
                            position: pointer - *grab,
                        });
                    }
                }
                Drag::Connecting { pointer: end, .. } => {
                    if let Some(pointer) = pointer {
                        *end = pointer;
                    }
                }
                Drag::None => {}
            }
        }

        if response.drag_stopped() {
            if let Drag::Connecting { source, pointer } = std::mem::take(&mut self.drag) {
                match node_at(diagram, pointer) {
                    Some(target) => {
                        log::debug!("Connection gesture {source} -> {}", target.id);
                        events.push(CanvasEvent::Connect {
                            source,
                            target: target.id.clone(),
                        });
                    }
                    None => log::debug!("Connection from {source} dropped on empty canvas"),
                }
            }
            self.drag = Drag::None;
        }

        if response.clicked() {
            let additive = ui.input(|i| i.modifiers.shift);
            let pos = response.interact_pointer_pos().map(|p| self.viewport.to_world(rect, p));
            self.pick(diagram, pos, additive);
        }

        if response.double_clicked() {
            let pos = response.interact_pointer_pos().map(|p| self.viewport.to_world(rect, p));
            if let Some(node) = pos.and_then(|p| node_at(diagram, p)) {
                self.begin_label_edit(diagram, &node.id, events);
            }
        }
    }

    fn begin_drag(&mut self, diagram: &Diagram, origin: Pos2, ui: &Ui) {
        let zoom = self.viewport.zoom;
        self.drag = if let Some(source) = source_handle_at(diagram, origin, zoom)
            .filter(|_| self.chrome_visible)
        {
            Drag::Connecting {
                source: source.clone(),
                pointer: origin,
            }
        } else if let Some(node) = node_at(diagram, origin) {
            if !self.selection.contains_node(&node.id) {
                let additive = ui.input(|i| i.modifiers.shift);
                self.selection.pick_node(node.id.clone(), additive);
            }
            Drag::MovingNode {
                id: node.id.clone(),
                grab: origin - node.position,
            }
        } else {
            Drag::Panning
        };
    }

    fn pick(&mut self, diagram: &Diagram, pos: Option<Pos2>, additive: bool) {
        let Some(pos) = pos else {
            return;
        };
        if let Some(node) = node_at(diagram, pos) {
            self.selection.pick_node(node.id.clone(), additive);
        } else if let Some(edge) = edge_at(diagram, pos, self.viewport.zoom) {
            self.selection.pick_edge(edge.clone(), additive);
        } else if !additive {
            self.selection.clear();
        }
    }

    fn handle_keys(&mut self, ui: &Ui, events: &mut Vec<CanvasEvent>) {
        if ui.ctx().wants_keyboard_input() || self.selection.is_empty() {
            return;
        }
        let delete = ui.input(|i| i.key_pressed(Key::Delete) || i.key_pressed(Key::Backspace));
        if !delete {
            return;
        }
        let (nodes, edges) = self.selection.take();
        if self
            .label_editor
            .editing_node()
            .is_some_and(|id| nodes.contains(id))
        {
            self.label_editor.abandon();
        }
        if !nodes.is_empty() {
            events.push(CanvasEvent::DeleteNodes(nodes));
        }
        if !edges.is_empty() {
            events.push(CanvasEvent::DeleteEdges(edges));
        }
    }

    /// Starts editing `id`, committing any edit already in progress.
    pub fn begin_label_edit(&mut self, diagram: &Diagram, id: &NodeId, events: &mut Vec<CanvasEvent>) {
        let Some(node) = diagram.node(id) else {
            return;
        };
        if self.label_editor.is_editing() {
            if let Ok((id, label)) = self.label_editor.commit() {
                events.push(CanvasEvent::RenameNode { id, label });
            }
        }
        if let Err(err) = self.label_editor.begin(node) {
            log::debug!("Label edit not started: {err}");
        }
    }

    fn show_label_editor(&mut self, ui: &mut Ui, diagram: &Diagram, rect: Rect, events: &mut Vec<CanvasEvent>) {
        let Some(id) = self.label_editor.editing_node().cloned() else {
            return;
        };
        let Some(node) = diagram.node(&id) else {
            self.label_editor.abandon();
            return;
        };
        let screen = self.viewport.rect_to_screen(rect, node.rect());
        let LabelEditor::Editing { buffer, focused, .. } = &mut self.label_editor else {
            return;
        };

        let response = ui.put(screen, egui::TextEdit::singleline(buffer).id_salt(("label_editor", id.as_str())));
        if !*focused {
            response.request_focus();
            *focused = true;
        } else if response.lost_focus() {
            match self.label_editor.commit() {
                Ok((id, label)) => events.push(CanvasEvent::RenameNode { id, label }),
                Err(err) => log::warn!("{err}"),
            }
        }
    }
}
