use egui::{Event, Key, Modifiers, PointerButton, Pos2, RawInput, Rect, pos2, vec2};
use flowchart_editor::canvas::CanvasColors;
use flowchart_editor::geometry::{edge_at, edge_path};
use flowchart_editor::{Canvas, CanvasEvent, Diagram, EdgeId, EdgeStyle, NodeId};

/// Drives a canvas through headless egui frames.
struct Harness {
    ctx: egui::Context,
    canvas: Canvas,
    diagram: Diagram,
    time: f64,
}

impl Harness {
    fn new() -> Self {
        let mut harness = Self {
            ctx: egui::Context::default(),
            canvas: Canvas::new(),
            diagram: Diagram::seed(),
            time: 0.0,
        };
        // Lay out once so the next frame can hit-test the canvas
        harness.frame(Vec::new());
        harness.frame(Vec::new());
        harness
    }

    fn frame(&mut self, events: Vec<Event>) -> Vec<CanvasEvent> {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))),
            time: Some(self.time),
            events,
            ..RawInput::default()
        };
        self.time += 1.0 / 60.0;

        let mut out = Vec::new();
        let canvas = &mut self.canvas;
        let diagram = &self.diagram;
        let _ = self.ctx.run(input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    out = canvas.show(ui, diagram, CanvasColors::for_theme(false), true);
                });
        });
        out
    }

    fn screen(&self, world: Pos2) -> Pos2 {
        let rect = self.canvas.rect().unwrap();
        self.canvas.viewport().to_screen(rect, world)
    }

    fn node(&self, seq: u64) -> &flowchart_editor::Node {
        self.diagram.node(&NodeId::from_seq(seq)).unwrap()
    }

    fn press(&mut self, at: Pos2) -> Vec<CanvasEvent> {
        self.frame(vec![Event::PointerMoved(at), button(at, true)])
    }

    fn move_to(&mut self, at: Pos2) -> Vec<CanvasEvent> {
        self.frame(vec![Event::PointerMoved(at)])
    }

    fn release(&mut self, at: Pos2) -> Vec<CanvasEvent> {
        self.frame(vec![Event::PointerMoved(at), button(at, false)])
    }

    fn click(&mut self, at: Pos2) {
        self.press(at);
        self.release(at);
    }

    /// Press at `from`, drag through the midpoint to `to`, release there.
    fn drag(&mut self, from: Pos2, to: Pos2) -> Vec<CanvasEvent> {
        let mut events = self.press(from);
        events.extend(self.move_to(from.lerp(to, 0.5)));
        events.extend(self.move_to(to));
        events.extend(self.release(to));
        events
    }

    fn key(&mut self, key: Key) -> Vec<CanvasEvent> {
        self.frame(vec![Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::NONE,
        }])
    }
}

fn button(pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::NONE,
    }
}

fn connects(events: &[CanvasEvent]) -> Vec<&CanvasEvent> {
    events
        .iter()
        .filter(|e| matches!(e, CanvasEvent::Connect { .. }))
        .collect()
}

#[test]
fn test_click_then_delete_removes_node() {
    let mut harness = Harness::new();
    let start = harness.screen(harness.node(1).rect().center());

    harness.click(start);
    assert!(harness.canvas.selection().contains_node(&NodeId::from_seq(1)));

    let events = harness.key(Key::Delete);
    assert_eq!(events, vec![CanvasEvent::DeleteNodes(vec![NodeId::from_seq(1)])]);
    assert!(harness.canvas.selection().is_empty());
}

#[test]
fn test_backspace_removes_selected_edge() {
    let mut harness = Harness::new();
    let points = edge_path(
        EdgeStyle::Default,
        harness.node(1).source_anchor(),
        harness.node(2).target_anchor(),
    );
    let middle = points[points.len() / 2];
    assert!(edge_at(&harness.diagram, middle, 1.0).is_some());

    let on_edge = harness.screen(middle);
    harness.click(on_edge);

    let events = harness.key(Key::Backspace);
    assert_eq!(events, vec![CanvasEvent::DeleteEdges(vec![EdgeId::new("e1-2")])]);
}

#[test]
fn test_delete_without_selection_is_silent() {
    let mut harness = Harness::new();
    assert!(harness.key(Key::Delete).is_empty());
}

#[test]
fn test_delete_ignored_while_typing() {
    let mut harness = Harness::new();
    let start = harness.screen(harness.node(1).rect().center());
    harness.click(start);

    let mut events = Vec::new();
    let diagram = harness.diagram.clone();
    harness
        .canvas
        .begin_label_edit(&diagram, &NodeId::from_seq(1), &mut events);
    // Focus lands on the label field during this frame
    harness.frame(Vec::new());
    assert!(harness.ctx.wants_keyboard_input());

    let events = harness.key(Key::Delete);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, CanvasEvent::DeleteNodes(_) | CanvasEvent::DeleteEdges(_)))
    );
    assert!(harness.canvas.selection().contains_node(&NodeId::from_seq(1)));
}

#[test]
fn test_drag_from_handle_onto_node_connects() {
    let mut harness = Harness::new();
    let handle = harness.screen(harness.node(2).source_anchor());
    let target = harness.screen(harness.node(1).rect().center());

    let events = harness.drag(handle, target);
    assert_eq!(
        connects(&events),
        vec![&CanvasEvent::Connect {
            source: NodeId::from_seq(2),
            target: NodeId::from_seq(1),
        }]
    );
}

#[test]
fn test_drag_from_handle_onto_empty_canvas_does_nothing() {
    let mut harness = Harness::new();
    let handle = harness.screen(harness.node(1).source_anchor());
    let empty = harness.screen(pos2(175.0, 400.0));

    let events = harness.drag(handle, empty);
    assert!(events.is_empty(), "{events:?}");
}

#[test]
fn test_hidden_chrome_blocks_connecting() {
    let mut harness = Harness::new();
    harness.canvas.set_chrome_visible(false);
    let handle = harness.screen(harness.node(2).source_anchor());
    let target = harness.screen(harness.node(1).rect().center());

    let events = harness.drag(handle, target);
    assert!(connects(&events).is_empty());
}
