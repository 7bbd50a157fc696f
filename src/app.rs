use crate::canvas::{Canvas, CanvasColors};
use crate::config::EditorConfig;
use crate::controller::EditorController;
use crate::diagram::EdgeStyle;
use crate::event;
use crate::export::ImageExporter;
use crate::panels::{self, Notice, ToolbarAction, ToolbarState, ViewportAction};
use crate::persistence::{DiagramStore, MemoryStorage};

/// Settings restored when the app restarts. The diagram itself is only
/// persisted by an explicit save.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Preferences {
    pub dark_theme: bool,
    pub edge_style: EdgeStyle,
    pub config: EditorConfig,
}

pub struct FlowchartApp {
    controller: EditorController,
    canvas: Canvas,
    exporter: ImageExporter,
    store: DiagramStore,
    // Stands in for the frame's storage when persistence is unavailable
    fallback_storage: MemoryStorage,
    notice: Option<Notice>,
    applied_dark_theme: Option<bool>,
}

impl Default for FlowchartApp {
    fn default() -> Self {
        Self::from_preferences(Preferences::default())
    }
}

impl FlowchartApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let preferences: Preferences = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        log::info!("Starting flowchart editor with {preferences:?}");
        Self::from_preferences(preferences)
    }

    pub fn from_preferences(preferences: Preferences) -> Self {
        let Preferences {
            dark_theme,
            edge_style,
            config,
        } = preferences;

        let store = DiagramStore::new(config.storage_key.clone());
        let exporter = ImageExporter::new(config.export_file_name.clone());
        let mut controller = EditorController::new(config);
        controller.set_dark_theme(dark_theme);
        controller.set_edge_style(edge_style);

        Self {
            controller,
            canvas: Canvas::new(),
            exporter,
            store,
            fallback_storage: MemoryStorage::new(),
            notice: None,
            applied_dark_theme: None,
        }
    }

    pub fn controller(&self) -> &EditorController {
        &self.controller
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            dark_theme: self.controller.is_dark_theme(),
            edge_style: self.controller.edge_style(),
            config: self.controller.config().clone(),
        }
    }

    /// Writes the diagram to the saved-flowchart slot.
    pub fn save_to(&mut self, storage: &mut dyn eframe::Storage) {
        self.notice = Some(match self.store.save(self.controller.diagram(), storage) {
            Ok(()) => Notice::info("Flowchart saved!"),
            Err(err) => Notice::error(format!("Failed to save flowchart: {err}")),
        });
    }

    /// Replaces the diagram with the saved one, if there is one.
    pub fn load_from(&mut self, storage: &dyn eframe::Storage) {
        self.notice = Some(match self.store.load(storage) {
            Ok(Some(diagram)) => {
                self.controller.replace_diagram(diagram);
                self.canvas.reset();
                Notice::info("Flowchart loaded!")
            }
            Ok(None) => Notice::info("No saved flowchart found."),
            Err(err) => {
                log::error!("{err}");
                Notice::error(format!("Failed to load flowchart: {err}"))
            }
        });
    }

    fn run_action(&mut self, action: ToolbarAction, ctx: &egui::Context, frame: &mut eframe::Frame) {
        log::debug!("Toolbar action: {action:?}");
        match action {
            ToolbarAction::AddNode => {
                if self.controller.add_node().is_none() {
                    self.notice = Some(Notice::error("Cannot add node: no unused node id left"));
                }
            }
            ToolbarAction::SetEdgeStyle(style) => self.controller.set_edge_style(style),
            ToolbarAction::Save => match frame.storage_mut() {
                Some(storage) => self.save_to(storage),
                None => {
                    let mut storage = std::mem::take(&mut self.fallback_storage);
                    self.save_to(&mut storage);
                    self.fallback_storage = storage;
                }
            },
            ToolbarAction::Load => match frame.storage() {
                Some(storage) => self.load_from(storage),
                None => {
                    let storage = std::mem::take(&mut self.fallback_storage);
                    self.load_from(&storage);
                    self.fallback_storage = storage;
                }
            },
            ToolbarAction::ExportImage => {
                if let Err(err) = self.exporter.begin(&mut self.canvas, ctx) {
                    self.notice = Some(Notice::error(format!("Failed to export image: {err}")));
                }
            }
            ToolbarAction::ToggleTheme => self.controller.toggle_theme(),
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        let dark = self.controller.is_dark_theme();
        if self.applied_dark_theme != Some(dark) {
            ctx.set_visuals(if dark {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            self.applied_dark_theme = Some(dark);
        }
    }
}

impl eframe::App for FlowchartApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.preferences());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.apply_theme(ctx);

        if let Some(Err(err)) = self.exporter.poll(&mut self.canvas, ctx) {
            self.notice = Some(Notice::error(format!("Failed to export image: {err}")));
        }

        let blocked = self.notice.is_some();
        let state = ToolbarState {
            edge_style: self.controller.edge_style(),
            dark_theme: self.controller.is_dark_theme(),
            exporting: self.exporter.is_busy(),
            enabled: !blocked,
        };
        if let Some(action) = panels::toolbar(ctx, state) {
            self.run_action(action, ctx, frame);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let colors = CanvasColors::for_theme(self.controller.is_dark_theme());
                let events = self
                    .canvas
                    .show(ui, self.controller.diagram(), colors, !blocked);
                event::dispatch(events, &mut self.controller);
            });

        if self.canvas.chrome_visible() {
            if let Some(rect) = self.canvas.rect() {
                match panels::viewport_controls(ctx, rect) {
                    Some(ViewportAction::ZoomIn) => self.canvas.zoom_in(),
                    Some(ViewportAction::ZoomOut) => self.canvas.zoom_out(),
                    Some(ViewportAction::FitView) => self.canvas.request_fit(),
                    None => {}
                }
            }
        }

        if let Some(notice) = &self.notice {
            if panels::notice_window(ctx, notice) {
                self.notice = None;
            }
        }
    }
}
