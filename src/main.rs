#![warn(clippy::all, rust_2018_idioms)]

use drawing_pad::{AppConfig, DrawingApp};

fn main() -> eframe::Result {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Drawing Pad")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "drawing_pad",
        native_options,
        Box::new(|cc| Ok(Box::new(DrawingApp::new(cc, config)))),
    )
}
