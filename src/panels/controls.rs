use egui::{Id, Order, Rect, vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportAction {
    ZoomIn,
    ZoomOut,
    FitView,
}

/// Zoom and fit buttons floating over the bottom-left of the canvas.
pub fn viewport_controls(ctx: &egui::Context, canvas: Rect) -> Option<ViewportAction> {
    let mut action = None;

    egui::Area::new(Id::new("viewport_controls"))
        .order(Order::Foreground)
        .fixed_pos(canvas.left_bottom() + vec2(10.0, -100.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.vertical(|ui| {
                    if ui.button("+").on_hover_text("Zoom in").clicked() {
                        action = Some(ViewportAction::ZoomIn);
                    }
                    if ui.button("−").on_hover_text("Zoom out").clicked() {
                        action = Some(ViewportAction::ZoomOut);
                    }
                    if ui.button("⛶").on_hover_text("Fit view").clicked() {
                        action = Some(ViewportAction::FitView);
                    }
                });
            });
        });

    action
}
