use egui::Color32;
use futures::channel::oneshot;
use image::{ImageFormat, RgbaImage};
use log::{error, info};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::thread;

use crate::document::Document;
use crate::error::ExportError;
use crate::raster::RasterCanvas;
use crate::renderer::Renderer;

pub const EXPORT_FILE_PREFIX: &str = "DrawingApp_";

pub type ExportResult = Result<PathBuf, ExportError>;

/// `DrawingApp_<unix seconds>.png`
pub fn export_file_name(timestamp_secs: u64) -> String {
    format!("{EXPORT_FILE_PREFIX}{timestamp_secs}.png")
}

/// Render the full canvas into an owned image.
///
/// The canvas is filled with `canvas_color`, the background (if any) is
/// drawn fit-centered, then the strokes are replayed on top. Runs on the UI
/// thread; the result shares nothing with the document.
pub fn compose_snapshot(
    document: &Document,
    background: Option<&RgbaImage>,
    canvas_color: Color32,
    width: u32,
    height: u32,
) -> RgbaImage {
    let mut canvas = RasterCanvas::new(width, height);
    canvas.fill(canvas_color);
    if let Some(background) = background {
        canvas.draw_image_fit(background);
    }
    Renderer::new().render(document, &mut canvas);
    canvas.into_image()
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ExportError::EmptyCanvas(image.width(), image.height()));
    }
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Encode `image` and write it into `dir`, returning the file path
pub fn write_png(image: &RgbaImage, dir: &Path, timestamp_secs: u64) -> ExportResult {
    let bytes = encode_png(image)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(timestamp_secs));
    fs::write(&path, bytes)?;
    Ok(path)
}

/// A PNG export running on a worker thread.
///
/// The worker owns its snapshot, so the document can keep changing while
/// the export is in flight.
pub struct ExportJob {
    receiver: oneshot::Receiver<ExportResult>,
}

impl ExportJob {
    pub fn spawn(snapshot: RgbaImage, dir: PathBuf, timestamp_secs: u64) -> Result<Self, ExportError> {
        let (sender, receiver) = oneshot::channel();

        thread::Builder::new()
            .name("png-export".to_owned())
            .spawn(move || {
                let result = write_png(&snapshot, &dir, timestamp_secs);
                match &result {
                    Ok(path) => info!("💾 Exported canvas to {}", path.display()),
                    Err(err) => error!("Export failed: {}", err),
                }
                // The receiver may have been dropped if the app closed
                let _ = sender.send(result);
            })
            .map_err(ExportError::Spawn)?;

        Ok(Self { receiver })
    }

    /// Non-blocking check for the worker's result
    pub fn poll(&mut self) -> Option<ExportResult> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(ExportError::WorkerGone)),
        }
    }

    /// Block until the worker finishes
    pub fn wait(self) -> ExportResult {
        futures::executor::block_on(self.receiver).unwrap_or(Err(ExportError::WorkerGone))
    }
}
