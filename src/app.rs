use egui::{Color32, Painter, Rect, pos2};
use std::path::Path;

use crate::background::BackgroundImage;
use crate::config::AppConfig;
use crate::document::Document;
use crate::error::ImportError;
use crate::export::{self, ExportJob};
use crate::file_handler::FileHandler;
use crate::geometry::fit_center;
use crate::input::{self, InputHandler};
use crate::notifications::Notifications;
use crate::palette::BrushSize;
use crate::panels;
use crate::renderer::{PainterCanvas, Renderer};
use crate::stroke::BrushState;
use crate::util::time;

/// Brush choices remembered between runs
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct BrushSettings {
    pub color: Color32,
    pub size: BrushSize,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            size: BrushSize::default(),
        }
    }
}

impl BrushSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            color: config.brush_color(),
            size: config.brush_size,
        }
    }
}

pub struct DrawingApp {
    config: AppConfig,
    palette: Vec<(String, Color32)>,
    document: Document,
    renderer: Renderer,
    input: InputHandler,
    file_handler: FileHandler,
    background: Option<BackgroundImage>,
    brush_size: BrushSize,
    pixels_per_point: f32,
    canvas_rect: Rect,
    show_brush_dialog: bool,
    import_path: Option<String>,
    export_job: Option<ExportJob>,
    notifications: Notifications,
}

impl DrawingApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<BrushSettings>(storage, eframe::APP_KEY))
            .unwrap_or_else(|| BrushSettings::from_config(&config));
        Self::with_settings(config, settings, cc.egui_ctx.pixels_per_point())
    }

    pub fn with_settings(config: AppConfig, settings: BrushSettings, pixels_per_point: f32) -> Self {
        let brush = BrushState::new(settings.color, settings.size.to_px(pixels_per_point))
            .unwrap_or_else(|err| {
                log::warn!("Falling back to the default brush: {}", err);
                BrushState::default()
            });
        log::info!(
            "Starting with brush {:?} ({} px), exports go to {}",
            brush.color,
            brush.thickness,
            config.export_dir.display()
        );

        Self {
            palette: config.palette_colors(),
            config,
            document: Document::with_brush(brush),
            renderer: Renderer::new(),
            input: InputHandler::new(Rect::NOTHING),
            file_handler: FileHandler::new(),
            background: None,
            brush_size: settings.size,
            pixels_per_point,
            canvas_rect: Rect::NOTHING,
            show_brush_dialog: false,
            import_path: None,
            export_job: None,
            notifications: Notifications::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn palette(&self) -> &[(String, Color32)] {
        &self.palette
    }

    pub fn brush_size(&self) -> BrushSize {
        self.brush_size
    }

    pub fn canvas_color(&self) -> Color32 {
        self.config.canvas_color()
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn select_color(&mut self, color: Color32) {
        log::info!("Brush color selected: {:?}", color);
        self.document.set_brush_color(color);
    }

    pub fn select_brush_size(&mut self, size: BrushSize) {
        match self.document.set_brush_thickness(size.to_px(self.pixels_per_point)) {
            Ok(()) => {
                log::info!("Brush size selected: {}", size.label());
                self.brush_size = size;
            }
            Err(err) => log::error!("Could not apply brush size {}: {}", size.label(), err),
        }
    }

    pub fn undo(&mut self) {
        self.document.undo();
    }

    pub fn redo(&mut self) {
        self.document.redo();
    }

    pub fn clear_canvas(&mut self) {
        self.document.clear();
    }

    pub fn clear_background(&mut self) {
        if let Some(background) = self.background.take() {
            log::info!("Removed background {}", background.name());
        }
    }

    pub fn is_brush_dialog_open(&self) -> bool {
        self.show_brush_dialog
    }

    pub fn set_brush_dialog_open(&mut self, open: bool) {
        self.show_brush_dialog = open;
    }

    pub fn import_path_mut(&mut self) -> Option<&mut String> {
        self.import_path.as_mut()
    }

    pub fn open_import_dialog(&mut self) {
        self.import_path.get_or_insert_with(String::new);
    }

    pub fn close_import_dialog(&mut self) {
        self.import_path = None;
    }

    /// Windows drawn over the canvas swallow pointer input
    pub fn is_modal_open(&self) -> bool {
        self.show_brush_dialog || self.import_path.is_some()
    }

    pub fn is_exporting(&self) -> bool {
        self.export_job.is_some()
    }

    /// Keep the brush thickness in pixels when the display scale changes
    fn sync_pixels_per_point(&mut self, ctx: &egui::Context) {
        let pixels_per_point = ctx.pixels_per_point();
        if pixels_per_point != self.pixels_per_point {
            log::debug!("Display scale changed to {}", pixels_per_point);
            self.pixels_per_point = pixels_per_point;
            self.input.set_pixels_per_point(pixels_per_point);
            self.select_brush_size(self.brush_size);
        }
    }

    /// Feed this frame's pointer and shortcut input to the document
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas: &egui::Response) {
        self.canvas_rect = canvas.rect;
        self.input.set_canvas_rect(canvas.rect);
        self.input.set_canvas_hovered(canvas.hovered());
        self.input.set_pixels_per_point(self.pixels_per_point);
        if self.is_modal_open() {
            return;
        }
        for event in self.input.process_input(ctx) {
            input::apply_event(&mut self.document, event);
        }
    }

    /// Paint canvas color, background and strokes into `rect`
    pub fn render(&mut self, ctx: &egui::Context, painter: &Painter, rect: Rect) {
        painter.rect_filled(rect, 0.0, self.canvas_color());

        if let Some(background) = &mut self.background {
            let size = background.size();
            let texture_id = background.texture(ctx).id();
            painter.image(
                texture_id,
                fit_center(size, rect),
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        let mut canvas = PainterCanvas::new(painter, rect.min, self.pixels_per_point);
        self.renderer.render(&self.document, &mut canvas);
    }

    pub fn import_background_from_path(&mut self, path: &str, now: f64) {
        let result = BackgroundImage::from_path(Path::new(path.trim()));
        self.apply_import(result, now);
    }

    fn apply_import(&mut self, result: Result<BackgroundImage, ImportError>, now: f64) {
        match result {
            Ok(background) => {
                log::info!("🖼️ Background set to {}", background.name());
                self.notifications
                    .info(format!("Background: {}", background.name()), now);
                self.background = Some(background);
            }
            Err(err) => {
                log::error!("Background import failed: {}", err);
                self.notifications.error(err.to_string(), now);
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if !self.file_handler.check_for_dropped_files(ctx) {
            return;
        }
        let now = ctx.input(|i| i.time);
        for result in self.file_handler.process_dropped_files() {
            self.apply_import(result, now);
        }
    }

    /// Canvas size in physical pixels, as last laid out
    pub fn canvas_size_px(&self) -> (u32, u32) {
        if !self.canvas_rect.is_positive() {
            return (0, 0);
        }
        let size = self.canvas_rect.size() * self.pixels_per_point;
        (size.x.round() as u32, size.y.round() as u32)
    }

    /// Snapshot the canvas and write it as PNG on a worker thread
    pub fn start_export(&mut self, now: f64) {
        if self.export_job.is_some() {
            self.notifications.info("An export is already running", now);
            return;
        }

        let (width, height) = self.canvas_size_px();
        let snapshot = export::compose_snapshot(
            &self.document,
            self.background.as_ref().map(|b| b.image()),
            self.canvas_color(),
            width,
            height,
        );

        match ExportJob::spawn(snapshot, self.config.export_dir.clone(), time::timestamp_secs()) {
            Ok(job) => self.export_job = Some(job),
            Err(err) => {
                log::error!("{}", err);
                self.notifications.error(err.to_string(), now);
            }
        }
    }

    fn poll_export(&mut self, ctx: &egui::Context) {
        let Some(job) = &mut self.export_job else {
            return;
        };

        match job.poll() {
            Some(result) => {
                let now = ctx.input(|i| i.time);
                match result {
                    Ok(path) => self
                        .notifications
                        .info(format!("File saved at: {}", path.display()), now),
                    Err(err) => self
                        .notifications
                        .error(format!("Something went wrong saving the file: {err}"), now),
                }
                self.export_job = None;
            }
            None => ctx.request_repaint(),
        }
    }
}

impl eframe::App for DrawingApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = BrushSettings {
            color: self.document.brush().color,
            size: self.brush_size,
        };
        eframe::set_value(storage, eframe::APP_KEY, &settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_pixels_per_point(ctx);
        self.handle_dropped_files(ctx);
        self.poll_export(ctx);

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
        panels::brush_dialog(self, ctx);
        panels::import_dialog(self, ctx);

        self.file_handler.preview_files_being_dropped(ctx);
        self.notifications.show(ctx);

        if self.document.take_redraw_request() {
            ctx.request_repaint();
        }
    }
}
