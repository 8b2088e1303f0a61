use egui::{Color32, Painter, Pos2, Stroke as EguiStroke, Vec2};

use crate::document::Document;

/// Something that can draw a polyline with round joins and round caps.
///
/// A single point must come out as a dot whose diameter is `thickness`.
pub trait StrokeCanvas {
    fn draw_polyline(&mut self, points: &[Pos2], color: Color32, thickness: f32);
}

/// Replays a document onto a canvas
#[derive(Debug, Default, Clone, Copy)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Paints committed strokes in order, then the stroke being drawn on top.
    ///
    /// Each stroke uses its own frozen color and thickness.
    pub fn render(&self, document: &Document, target: &mut dyn StrokeCanvas) {
        for stroke in document.committed() {
            target.draw_polyline(stroke.points(), stroke.color(), stroke.thickness());
        }

        if let Some(stroke) = document.in_progress() {
            if !stroke.is_empty() {
                target.draw_polyline(stroke.points(), stroke.color(), stroke.thickness());
            }
        }
    }
}

/// Draws onto an egui painter.
///
/// Strokes live in canvas-local physical pixels; this maps them back to
/// screen points relative to `origin`.
pub struct PainterCanvas<'a> {
    painter: &'a Painter,
    origin: Vec2,
    points_per_pixel: f32,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2, pixels_per_point: f32) -> Self {
        Self {
            painter,
            origin: origin.to_vec2(),
            points_per_pixel: 1.0 / pixels_per_point,
        }
    }

    fn to_screen(&self, point: Pos2) -> Pos2 {
        (point.to_vec2() * self.points_per_pixel + self.origin).to_pos2()
    }
}

impl StrokeCanvas for PainterCanvas<'_> {
    fn draw_polyline(&mut self, points: &[Pos2], color: Color32, thickness: f32) {
        let width = thickness * self.points_per_pixel;
        let stroke = EguiStroke::new(width, color);

        for window in points.windows(2) {
            self.painter
                .line_segment([self.to_screen(window[0]), self.to_screen(window[1])], stroke);
        }

        // Discs at every vertex give the round joins and caps
        for point in points {
            self.painter.circle_filled(self.to_screen(*point), width / 2.0, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the calls made by the renderer
    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<(Vec<Pos2>, Color32, f32)>,
    }

    impl StrokeCanvas for RecordingCanvas {
        fn draw_polyline(&mut self, points: &[Pos2], color: Color32, thickness: f32) {
            self.calls.push((points.to_vec(), color, thickness));
        }
    }

    #[test]
    fn test_render_replays_in_order_with_in_progress_last() {
        let mut doc = Document::new();
        doc.begin_stroke_with(Pos2::new(0.0, 0.0), Color32::RED, 10.0).unwrap();
        doc.end_stroke();
        doc.begin_stroke_with(Pos2::new(1.0, 1.0), Color32::BLUE, 2.0).unwrap();
        doc.end_stroke();
        doc.begin_stroke_with(Pos2::new(2.0, 2.0), Color32::GREEN, 4.0).unwrap();

        let mut canvas = RecordingCanvas::default();
        Renderer::new().render(&doc, &mut canvas);

        let colors: Vec<Color32> = canvas.calls.iter().map(|c| c.1).collect();
        assert_eq!(colors, vec![Color32::RED, Color32::BLUE, Color32::GREEN]);
        assert_eq!(canvas.calls[0].2, 10.0);
    }

    #[test]
    fn test_empty_placeholder_is_not_painted() {
        let mut doc = Document::new();
        doc.begin_stroke(Pos2::ZERO);
        doc.end_stroke();

        let mut canvas = RecordingCanvas::default();
        Renderer::new().render(&doc, &mut canvas);
        assert_eq!(canvas.calls.len(), 1);
    }

    #[test]
    fn test_painter_canvas_accepts_strokes() {
        let ctx = egui::Context::default();
        let rect = egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(100.0, 100.0));
        let painter = Painter::new(ctx, egui::LayerId::background(), rect);

        let mut doc = Document::new();
        doc.begin_stroke(Pos2::new(10.0, 10.0));
        doc.extend_stroke(Pos2::new(20.0, 20.0));

        let mut canvas = PainterCanvas::new(&painter, rect.min, 2.0);
        assert_eq!(canvas.to_screen(Pos2::new(10.0, 10.0)), Pos2::new(5.0, 5.0));
        Renderer::new().render(&doc, &mut canvas);
    }
}
