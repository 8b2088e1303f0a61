use eframe::egui;

use crate::background::{self, BackgroundImage};
use crate::error::ImportError;

/// Turns files dropped on the window into background images
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHandler {
    pub fn new() -> Self {
        Self {
            dropped_files: Vec::new(),
        }
    }

    /// Collect newly dropped files from the UI context.
    /// Returns true if any were dropped this frame.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        let mut new_dropped_files = false;

        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
                new_dropped_files = true;
            }
        });

        new_dropped_files
    }

    /// Decode the dropped files, draining the queue.
    ///
    /// Only the last successfully decoded image matters to the caller, but
    /// every failure is returned so it can be reported.
    pub fn process_dropped_files(&mut self) -> Vec<Result<BackgroundImage, ImportError>> {
        self.dropped_files
            .drain(..)
            .map(|file| Self::load_dropped_file(&file))
            .collect()
    }

    fn file_name(file: &egui::DroppedFile) -> String {
        if let Some(path) = &file.path {
            path.display().to_string()
        } else if !file.name.is_empty() {
            file.name.clone()
        } else {
            "unknown".to_owned()
        }
    }

    /// Check if a file is an image based on MIME type or extension
    fn is_image_file(file: &egui::DroppedFile) -> bool {
        if !file.mime.is_empty() {
            file.mime.starts_with("image/")
        } else if let Some(path) = &file.path {
            background::is_supported_image_path(path)
        } else {
            background::is_supported_image_path(std::path::Path::new(&file.name))
        }
    }

    fn load_dropped_file(file: &egui::DroppedFile) -> Result<BackgroundImage, ImportError> {
        let file_name = Self::file_name(file);

        if !Self::is_image_file(file) {
            log::warn!("Dropped file is not a supported type: {}", file_name);
            return Err(ImportError::UnsupportedType(file_name));
        }

        if let Some(bytes) = &file.bytes {
            log::info!("Processing image from memory: {} ({} bytes)", file_name, bytes.len());
            BackgroundImage::from_bytes(file_name, bytes)
        } else if let Some(path) = &file.path {
            log::info!("Processing image from path: {}", path.display());
            BackgroundImage::from_path(path)
        } else {
            log::warn!("Dropped file has no accessible data: {}", file_name);
            Err(ImportError::NoData(file_name))
        }
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop to use as background:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else {
                    text += "\n(Path not available)";
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(24.0),
            Color32::WHITE,
        );
    }
}
