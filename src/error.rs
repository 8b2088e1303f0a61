use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when changing the brush
#[derive(Debug, Error, PartialEq)]
pub enum BrushError {
    #[error("Brush thickness must be a positive number of pixels, got {0}")]
    InvalidThickness(f32),
}

/// Errors raised when parsing a color string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Unknown color name: {0}")]
    UnknownName(String),

    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}

/// Errors that can occur while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

impl From<ColorParseError> for ConfigError {
    fn from(error: ColorParseError) -> Self {
        ConfigError::InvalidValue(error.to_string())
    }
}

/// Errors that can occur while importing a background image
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read image file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Dropped file has no accessible data: {0}")]
    NoData(String),
}

/// Errors that can occur while exporting the canvas
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot export an empty canvas ({0}x{1})")]
    EmptyCanvas(u32, u32),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export file: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to start export worker: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Export worker stopped before reporting a result")]
    WorkerGone,
}
