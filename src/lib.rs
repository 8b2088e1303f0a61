#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod background;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod history;
pub mod input;
pub mod notifications;
pub mod palette;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod stroke;
pub mod util;

pub use app::DrawingApp;
pub use config::AppConfig;
pub use document::Document;
pub use history::StrokeStack;
pub use input::{InputEvent, InputHandler};
pub use raster::RasterCanvas;
pub use renderer::{Renderer, StrokeCanvas};
pub use stroke::{BrushState, InProgressStroke, Stroke};
