use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::palette::{self, BrushSize, DEFAULT_PALETTE};

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV_VAR: &str = "DRAWING_PAD_CONFIG";

/// Looked up in the working directory when the env var is unset
pub const DEFAULT_CONFIG_FILE: &str = "drawing_pad.json";

/// Application settings read from a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing keys fall back to the defaults
pub struct AppConfig {
    /// Directory PNG exports are written to
    pub export_dir: PathBuf,
    /// Brush color at first launch
    pub brush_color: String,
    /// Brush size at first launch
    pub brush_size: BrushSize,
    /// Swatches shown in the tools panel
    pub palette: Vec<String>,
    /// Color under the strokes when no background image is loaded
    pub canvas_color: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            export_dir: std::env::temp_dir(),
            brush_color: "#000000".to_owned(),
            brush_size: BrushSize::default(),
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_owned()).collect(),
            canvas_color: "#FFFFFF".to_owned(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Every color string must parse and the palette must not be empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        palette::parse_color(&self.brush_color)?;
        palette::parse_color(&self.canvas_color)?;
        if self.palette.is_empty() {
            return Err(ConfigError::InvalidValue("palette is empty".to_owned()));
        }
        for color in &self.palette {
            palette::parse_color(color)?;
        }
        Ok(())
    }

    /// Config file location: the env var if set, otherwise the working directory
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// A missing file yields the defaults silently; a broken one is logged and
    /// also yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::error!("Ignoring config file {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn brush_color(&self) -> Color32 {
        palette::parse_color(&self.brush_color).unwrap_or(Color32::BLACK)
    }

    pub fn canvas_color(&self) -> Color32 {
        palette::parse_color(&self.canvas_color).unwrap_or(Color32::WHITE)
    }

    /// Palette entries paired with their parsed colors, skipping invalid ones
    pub fn palette_colors(&self) -> Vec<(String, Color32)> {
        self.palette
            .iter()
            .filter_map(|name| palette::parse_color(name).ok().map(|c| (name.clone(), c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AppConfig::from_json(r#"{ "brush_color": "red", "brush_size": "Large" }"#)
            .unwrap();
        assert_eq!(config.brush_color(), Color32::from_rgb(255, 0, 0));
        assert_eq!(config.brush_size, BrushSize::Large);
        assert_eq!(config.palette.len(), DEFAULT_PALETTE.len());
        assert_eq!(config.canvas_color(), Color32::WHITE);
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let result = AppConfig::from_json(r#"{ "canvas_color": "not-a-color" }"#);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_empty_palette_is_rejected() {
        let result = AppConfig::from_json(r#"{ "palette": [] }"#);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            AppConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    fn scratch_file(contents: Option<&str>) -> PathBuf {
        let path = std::env::temp_dir().join(format!("drawing_pad-{}.json", uuid::Uuid::new_v4()));
        if let Some(contents) = contents {
            fs::write(&path, contents).unwrap();
        }
        path
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let path = scratch_file(None);
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }

    #[test]
    fn test_load_from_malformed_file_gives_defaults() {
        let path = scratch_file(Some("{ \"brush_color\": "));
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());

        fs::write(&path, r#"{ "palette": [] }"#).unwrap();
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_from_valid_file() {
        let path = scratch_file(Some(r#"{ "brush_size": "Small", "canvas_color": "black" }"#));
        let config = AppConfig::load_from(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!(config.brush_size, BrushSize::Small);
        assert_eq!(config.canvas_color(), Color32::BLACK);
        assert_eq!(config.export_dir, AppConfig::default().export_dir);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let path = std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::new_v4()));
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Read { .. })
        ));
    }
}
