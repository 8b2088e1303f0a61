use egui::{Color32, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage, imageops};

use crate::geometry::{calculate_bounds, distance_to_line_segment, fit_center};
use crate::renderer::StrokeCanvas;

/// A fixed-size software raster that strokes can be replayed onto.
///
/// Each polyline is first accumulated into a coverage mask and then blended
/// once, so segments of a translucent stroke that overlap do not darken.
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// A fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.width() && y < self.height()).then(|| *self.image.get_pixel(x, y))
    }

    /// Replace every pixel with `color`
    pub fn fill(&mut self, color: Color32) {
        let pixel = Rgba(color.to_srgba_unmultiplied());
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    /// Paint `source` scaled to fit, centered, over the current contents
    pub fn draw_image_fit(&mut self, source: &RgbaImage) {
        let frame = Rect::from_min_size(
            Pos2::ZERO,
            Vec2::new(self.width() as f32, self.height() as f32),
        );
        let fitted = fit_center(
            Vec2::new(source.width() as f32, source.height() as f32),
            frame,
        );
        let width = fitted.width().round() as u32;
        let height = fitted.height().round() as u32;
        if width == 0 || height == 0 {
            return;
        }

        let scaled = imageops::resize(source, width, height, imageops::FilterType::Triangle);
        imageops::overlay(
            &mut self.image,
            &scaled,
            fitted.min.x.round() as i64,
            fitted.min.y.round() as i64,
        );
    }

    /// Pixel-space region covered by `rect`, clamped to the canvas
    fn clamp_region(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.min.x.floor().max(0.0) as u32;
        let y0 = rect.min.y.floor().max(0.0) as u32;
        let x1 = (rect.max.x.ceil().max(0.0) as u32).min(self.width());
        let y1 = (rect.max.y.ceil().max(0.0) as u32).min(self.height());
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

impl StrokeCanvas for RasterCanvas {
    fn draw_polyline(&mut self, points: &[Pos2], color: Color32, thickness: f32) {
        let Some(first) = points.first() else {
            return;
        };
        let radius = thickness / 2.0;
        let Some((x0, y0, x1, y1)) = self.clamp_region(calculate_bounds(points, radius + 1.0))
        else {
            return;
        };

        let mask_width = (x1 - x0) as usize;
        let mut mask = vec![0.0f32; mask_width * (y1 - y0) as usize];

        let segments: Vec<(Pos2, Pos2)> = if points.len() == 1 {
            vec![(*first, *first)]
        } else {
            points.windows(2).map(|w| (w[0], w[1])).collect()
        };

        for (start, end) in segments {
            let Some((sx0, sy0, sx1, sy1)) =
                self.clamp_region(calculate_bounds(&[start, end], radius + 1.0))
            else {
                continue;
            };
            for y in sy0..sy1 {
                for x in sx0..sx1 {
                    let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                    let distance = distance_to_line_segment(center, start, end);
                    let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                    let slot = &mut mask[(y - y0) as usize * mask_width + (x - x0) as usize];
                    *slot = slot.max(coverage);
                }
            }
        }

        let [r, g, b, a] = color.to_srgba_unmultiplied();
        for y in y0..y1 {
            for x in x0..x1 {
                let coverage = mask[(y - y0) as usize * mask_width + (x - x0) as usize];
                if coverage > 0.0 {
                    let alpha = a as f32 / 255.0 * coverage;
                    blend_over(self.image.get_pixel_mut(x, y), [r, g, b], alpha);
                }
            }
        }
    }
}

/// Source-over blend of an unpremultiplied color onto an unpremultiplied pixel
fn blend_over(dst: &mut Rgba<u8>, src: [u8; 3], src_alpha: f32) {
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return;
    }

    for channel in 0..3 {
        let s = src[channel] as f32;
        let d = dst[channel] as f32;
        let value = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        dst[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point_renders_as_dot() {
        let mut canvas = RasterCanvas::new(20, 20);
        canvas.fill(Color32::WHITE);
        canvas.draw_polyline(&[Pos2::new(10.0, 10.0)], Color32::RED, 8.0);

        // Inside the dot
        assert_eq!(canvas.pixel(10, 10), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(canvas.pixel(7, 10), Some(Rgba([255, 0, 0, 255])));
        // Well outside the radius
        assert_eq!(canvas.pixel(2, 2), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(canvas.pixel(16, 10), Some(Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_round_cap_extends_past_endpoint() {
        let mut canvas = RasterCanvas::new(40, 20);
        canvas.draw_polyline(
            &[Pos2::new(10.0, 10.0), Pos2::new(30.0, 10.0)],
            Color32::BLACK,
            10.0,
        );
        // 3px beyond the end, inside the cap
        assert_eq!(canvas.pixel(32, 10).map(|p| p[3]), Some(255));
        // Beyond the cap
        assert_eq!(canvas.pixel(37, 10).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_translucent_stroke_blends_once() {
        let mut canvas = RasterCanvas::new(20, 20);
        let half_red = Color32::from_rgba_unmultiplied(255, 0, 0, 128);
        // Goes back over itself
        canvas.draw_polyline(
            &[Pos2::new(5.0, 10.0), Pos2::new(15.0, 10.0), Pos2::new(5.0, 10.0)],
            half_red,
            4.0,
        );
        let pixel = canvas.pixel(10, 10).unwrap();
        assert!(pixel[0] >= 250);
        assert_eq!(pixel[3], 128);
    }

    #[test]
    fn test_out_of_bounds_points_are_clipped() {
        let mut canvas = RasterCanvas::new(10, 10);
        canvas.draw_polyline(
            &[Pos2::new(-50.0, -50.0), Pos2::new(-40.0, -40.0)],
            Color32::BLACK,
            4.0,
        );
        assert!(canvas.image().pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_draw_image_fit_centers_background() {
        let mut canvas = RasterCanvas::new(20, 10);
        canvas.fill(Color32::WHITE);
        let source = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
        canvas.draw_image_fit(&source);

        // 10x10 square centered horizontally: columns 5..15
        assert_eq!(canvas.pixel(10, 5), Some(Rgba([0, 0, 255, 255])));
        assert_eq!(canvas.pixel(1, 5), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(canvas.pixel(18, 5), Some(Rgba([255, 255, 255, 255])));
    }
}
