//! Brush colors and sizes offered by the tools panel.

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;

/// Swatch row shown in the tools panel, as color strings
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#FFFFFF", "#000000", "#F44336", "#FF9800", "#FFEB3B", "#4CAF50", "#2196F3", "#9C27B0",
];

/// Parses `#RRGGBB`, `#AARRGGBB` or a color name.
///
/// Names are matched case-insensitively against: black, darkgray, gray,
/// lightgray, white, red, green, blue, yellow, cyan, magenta, aqua, fuchsia,
/// lime, maroon, navy, olive, purple, silver, teal (and the `grey` spellings).
pub fn parse_color(text: &str) -> Result<Color32, ColorParseError> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(text.to_owned()));
    }

    let color = match text.to_ascii_lowercase().as_str() {
        "black" => Color32::from_rgb(0x00, 0x00, 0x00),
        "darkgray" | "darkgrey" => Color32::from_rgb(0x44, 0x44, 0x44),
        "gray" | "grey" => Color32::from_rgb(0x88, 0x88, 0x88),
        "lightgray" | "lightgrey" => Color32::from_rgb(0xCC, 0xCC, 0xCC),
        "white" => Color32::from_rgb(0xFF, 0xFF, 0xFF),
        "red" => Color32::from_rgb(0xFF, 0x00, 0x00),
        "green" => Color32::from_rgb(0x00, 0xFF, 0x00),
        "blue" => Color32::from_rgb(0x00, 0x00, 0xFF),
        "yellow" => Color32::from_rgb(0xFF, 0xFF, 0x00),
        "cyan" | "aqua" => Color32::from_rgb(0x00, 0xFF, 0xFF),
        "magenta" | "fuchsia" => Color32::from_rgb(0xFF, 0x00, 0xFF),
        "lime" => Color32::from_rgb(0x00, 0xFF, 0x00),
        "maroon" => Color32::from_rgb(0x80, 0x00, 0x00),
        "navy" => Color32::from_rgb(0x00, 0x00, 0x80),
        "olive" => Color32::from_rgb(0x80, 0x80, 0x00),
        "purple" => Color32::from_rgb(0x80, 0x00, 0x80),
        "silver" => Color32::from_rgb(0xC0, 0xC0, 0xC0),
        "teal" => Color32::from_rgb(0x00, 0x80, 0x80),
        _ => return Err(ColorParseError::UnknownName(text.to_owned())),
    };
    Ok(color)
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    let [a, r, g, b] = value.to_be_bytes();
    match hex.len() {
        6 => Some(Color32::from_rgb(r, g, b)),
        8 => Some(Color32::from_rgba_unmultiplied(r, g, b, a)),
        _ => None,
    }
}

/// Brush size choices, in device-independent points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BrushSize {
    VerySmall,
    Small,
    #[default]
    Medium,
    Large,
    XLarge,
    XXLarge,
}

impl BrushSize {
    pub const ALL: [BrushSize; 6] = [
        BrushSize::VerySmall,
        BrushSize::Small,
        BrushSize::Medium,
        BrushSize::Large,
        BrushSize::XLarge,
        BrushSize::XXLarge,
    ];

    pub fn dp(self) -> f32 {
        match self {
            BrushSize::VerySmall => 5.0,
            BrushSize::Small => 10.0,
            BrushSize::Medium => 20.0,
            BrushSize::Large => 30.0,
            BrushSize::XLarge => 50.0,
            BrushSize::XXLarge => 70.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BrushSize::VerySmall => "Very small",
            BrushSize::Small => "Small",
            BrushSize::Medium => "Medium",
            BrushSize::Large => "Large",
            BrushSize::XLarge => "X-Large",
            BrushSize::XXLarge => "XX-Large",
        }
    }

    /// Thickness in physical pixels for the given display scale
    pub fn to_px(self, pixels_per_point: f32) -> f32 {
        dp_to_px(self.dp(), pixels_per_point)
    }
}

pub fn dp_to_px(dp: f32, pixels_per_point: f32) -> f32 {
    dp * pixels_per_point
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color("#FF0000"), Ok(Color32::from_rgb(255, 0, 0)));
        assert_eq!(parse_color(" #00ff00 "), Ok(Color32::from_rgb(0, 255, 0)));
        assert_eq!(
            parse_color("#FF0000FF"),
            Ok(Color32::from_rgba_unmultiplied(0, 0, 255, 255))
        );
    }

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color("Red"), Ok(Color32::from_rgb(255, 0, 0)));
        assert_eq!(parse_color("grey"), parse_color("gray"));
        assert_eq!(parse_color("teal"), Ok(Color32::from_rgb(0, 128, 128)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_color("#12345"), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!(parse_color("#GGGGGG"), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!(parse_color("#+12345"), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!(parse_color("chartreuse"), Err(ColorParseError::UnknownName(_))));
    }

    #[test]
    fn test_default_palette_parses() {
        for color in DEFAULT_PALETTE {
            assert!(parse_color(color).is_ok(), "{color} should parse");
        }
    }

    #[test]
    fn test_brush_size_conversion() {
        assert_eq!(BrushSize::default(), BrushSize::Medium);
        assert_eq!(BrushSize::Medium.to_px(1.0), 20.0);
        assert_eq!(BrushSize::XXLarge.to_px(2.0), 140.0);
    }
}
