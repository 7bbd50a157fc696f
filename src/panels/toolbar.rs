use crate::diagram::EdgeStyle;

/// Commands issued from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    AddNode,
    SetEdgeStyle(EdgeStyle),
    Save,
    Load,
    ExportImage,
    ToggleTheme,
}

/// What the toolbar needs to know to draw itself.
#[derive(Debug, Clone, Copy)]
pub struct ToolbarState {
    pub edge_style: EdgeStyle,
    pub dark_theme: bool,
    pub exporting: bool,
    /// False while a notice is blocking the editor.
    pub enabled: bool,
}

pub fn toolbar(ctx: &egui::Context, state: ToolbarState) -> Option<ToolbarAction> {
    let mut action = None;

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_enabled_ui(state.enabled, |ui| {
            ui.horizontal(|ui| {
                if ui.button("➕ Add Node").clicked() {
                    action = Some(ToolbarAction::AddNode);
                }

                ui.separator();

                let mut edge_style = state.edge_style;
                egui::ComboBox::from_label("Edge style")
                    .selected_text(edge_style.name())
                    .show_ui(ui, |ui| {
                        for style in EdgeStyle::ALL {
                            ui.selectable_value(&mut edge_style, style, style.name());
                        }
                    });
                if edge_style != state.edge_style {
                    log::info!("Edge style selected from UI: {}", edge_style.name());
                    action = Some(ToolbarAction::SetEdgeStyle(edge_style));
                }

                ui.separator();

                if ui.button("💾 Save").clicked() {
                    action = Some(ToolbarAction::Save);
                }
                if ui.button("📂 Load").clicked() {
                    action = Some(ToolbarAction::Load);
                }
                if ui
                    .add_enabled(!state.exporting, egui::Button::new("🖼 Export Image"))
                    .clicked()
                {
                    action = Some(ToolbarAction::ExportImage);
                }

                ui.separator();

                let theme_label = if state.dark_theme { "☀ Light" } else { "🌙 Dark" };
                if ui.button(theme_label).clicked() {
                    action = Some(ToolbarAction::ToggleTheme);
                }
            });
        });
    });

    action
}
