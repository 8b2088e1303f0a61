use egui::{ColorImage, Context, TextureHandle, TextureOptions, Vec2};
use image::RgbaImage;
use std::path::Path;

use crate::error::ImportError;

const SUPPORTED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Check whether a path looks like an image we can decode
pub fn is_supported_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Image shown behind the strokes. Drawing never modifies it.
pub struct BackgroundImage {
    name: String,
    image: RgbaImage,
    texture: Option<TextureHandle>,
}

impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("name", &self.name)
            .field("size", &self.image.dimensions())
            .field("texture", &self.texture.as_ref().map(|_| "<texture>"))
            .finish()
    }
}

impl BackgroundImage {
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self, ImportError> {
        let name = name.into();
        let image = image::load_from_memory(bytes)?.to_rgba8();
        log::debug!(
            "Decoded background {}: {}x{}",
            name,
            image.width(),
            image.height()
        );
        Ok(Self {
            name,
            image,
            texture: None,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        if !is_supported_image_path(path) {
            return Err(ImportError::UnsupportedType(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        Self::from_bytes(path.display().to_string(), &bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.image.width() as f32, self.image.height() as f32)
    }

    /// Upload to the GPU on first use
    pub fn texture(&mut self, ctx: &Context) -> &TextureHandle {
        let Self {
            name,
            image,
            texture,
        } = self;
        texture.get_or_insert_with(|| {
            let size = [image.width() as usize, image.height() as usize];
            let color_image = ColorImage::from_rgba_unmultiplied(size, image.as_raw());
            ctx.load_texture(format!("background:{name}"), color_image, TextureOptions::LINEAR)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image_path(&PathBuf::from("photo.JPG")));
        assert!(is_supported_image_path(&PathBuf::from("/tmp/a.png")));
        assert!(!is_supported_image_path(&PathBuf::from("notes.txt")));
        assert!(!is_supported_image_path(&PathBuf::from("no_extension")));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = BackgroundImage::from_bytes("junk", b"definitely not an image");
        assert!(matches!(result, Err(ImportError::Decode(_))));
    }

    #[test]
    fn test_unsupported_path_fails_before_reading() {
        let result = BackgroundImage::from_path(&PathBuf::from("/nonexistent/file.txt"));
        assert!(matches!(result, Err(ImportError::UnsupportedType(_))));
    }

    #[test]
    fn test_decode_png_bytes() {
        let source = RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]));
        let bytes = crate::export::encode_png(&source).unwrap();
        let background = BackgroundImage::from_bytes("mem", &bytes).unwrap();
        assert_eq!(background.size(), Vec2::new(2.0, 3.0));
        assert_eq!(background.image(), &source);
    }
}
