use std::io::Cursor;

use egui::{ColorImage, Context, Rect};
use image::{ImageFormat, RgbaImage, imageops};
use thiserror::Error;

use crate::canvas::Canvas;

/// Errors that can occur while exporting the canvas as an image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("An export is already in progress")]
    Busy,

    #[error("Nothing to export: the canvas has no visible area")]
    EmptyRegion,

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Download failed: {0}")]
    Download(String),

    #[error("No screenshot received after {0} frames")]
    NoScreenshot(u32),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Frames to wait for the backend's screenshot before giving up.
const SCREENSHOT_FRAME_BUDGET: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Phase {
    #[default]
    Idle,
    /// Chrome is hidden; the next frame paints without it.
    Preparing { region: Rect },
    /// Screenshot requested, waiting for the backend to deliver it.
    AwaitingFrame { region: Rect, waited: u32 },
}

/// Captures the canvas into a PNG. The capture spans a few frames; handles
/// and controls stay hidden until it finishes, whatever the outcome.
#[derive(Debug)]
pub struct ImageExporter {
    phase: Phase,
    file_name: String,
}

impl ImageExporter {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            phase: Phase::Idle,
            file_name: file_name.into(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn begin(&mut self, canvas: &mut Canvas, ctx: &Context) -> ExportResult<()> {
        if self.is_busy() {
            return Err(ExportError::Busy);
        }
        let region = canvas
            .rect()
            .filter(|r| r.is_positive())
            .ok_or(ExportError::EmptyRegion)?;

        log::info!("Exporting canvas region {region:?}");
        canvas.set_chrome_visible(false);
        self.phase = Phase::Preparing { region };
        ctx.request_repaint();
        Ok(())
    }

    /// Drives the capture. Returns the delivered file name once it has
    /// finished, or the error that ended it.
    pub fn poll(&mut self, canvas: &mut Canvas, ctx: &Context) -> Option<ExportResult<String>> {
        match self.phase {
            Phase::Idle => None,
            Phase::Preparing { region } => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
                self.phase = Phase::AwaitingFrame { region, waited: 0 };
                ctx.request_repaint();
                None
            }
            Phase::AwaitingFrame { region, waited } => {
                let screenshot = ctx.input(|i| {
                    i.raw.events.iter().find_map(|event| match event {
                        egui::Event::Screenshot { image, .. } => Some(image.clone()),
                        _ => None,
                    })
                });
                match screenshot {
                    Some(image) => Some(self.complete(canvas, &image, region, ctx.pixels_per_point())),
                    None if waited >= SCREENSHOT_FRAME_BUDGET => {
                        self.finish(canvas);
                        let err = ExportError::NoScreenshot(waited);
                        log::error!("Export failed: {err}");
                        Some(Err(err))
                    }
                    None => {
                        self.phase = Phase::AwaitingFrame {
                            region,
                            waited: waited + 1,
                        };
                        ctx.request_repaint();
                        None
                    }
                }
            }
        }
    }

    fn complete(
        &mut self,
        canvas: &mut Canvas,
        screenshot: &ColorImage,
        region: Rect,
        pixels_per_point: f32,
    ) -> ExportResult<String> {
        let result = encode_region(screenshot, region, pixels_per_point)
            .and_then(|png| deliver(&self.file_name, &png));
        self.finish(canvas);

        match &result {
            Ok(name) => log::info!("Exported {name}"),
            Err(err) => log::error!("Export failed: {err}"),
        }
        result
    }

    fn finish(&mut self, canvas: &mut Canvas) {
        canvas.set_chrome_visible(true);
        self.phase = Phase::Idle;
    }
}

/// Crops `region` (in points) out of a screenshot and encodes it as PNG.
pub fn encode_region(screenshot: &ColorImage, region: Rect, pixels_per_point: f32) -> ExportResult<Vec<u8>> {
    let [width, height] = screenshot.size;
    let bytes: Vec<u8> = screenshot
        .pixels
        .iter()
        .flat_map(|c| c.to_srgba_unmultiplied())
        .collect();
    let full = RgbaImage::from_raw(width as u32, height as u32, bytes).ok_or(ExportError::EmptyRegion)?;

    let min = (region.min.to_vec2() * pixels_per_point).max(egui::Vec2::ZERO);
    let size = region.size() * pixels_per_point;
    let cropped = imageops::crop_imm(
        &full,
        min.x.round() as u32,
        min.y.round() as u32,
        size.x.round().max(0.0) as u32,
        size.y.round().max(0.0) as u32,
    )
    .to_image();
    if cropped.width() == 0 || cropped.height() == 0 {
        return Err(ExportError::EmptyRegion);
    }

    let mut png = Vec::new();
    cropped.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

#[cfg(not(target_arch = "wasm32"))]
fn deliver(file_name: &str, png: &[u8]) -> ExportResult<String> {
    std::fs::write(file_name, png).map_err(|source| ExportError::Write {
        path: file_name.to_owned(),
        source,
    })?;
    Ok(file_name.to_owned())
}

/// Hands the PNG to the browser as a download.
#[cfg(target_arch = "wasm32")]
fn deliver(file_name: &str, png: &[u8]) -> ExportResult<String> {
    use wasm_bindgen::JsCast;

    let js_err = |e: wasm_bindgen::JsValue| ExportError::Download(format!("{e:?}"));

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(png));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ExportError::Download("no document".to_owned()))?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| ExportError::Download("not an anchor element".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(js_err)?;
    Ok(file_name.to_owned())
}
