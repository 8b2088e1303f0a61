use eframe::egui;

/// Palette entry: a square of its color, outlined when it is the brush color
pub struct SwatchButton {
    pub color: egui::Color32,
    pub selected: bool,
}

impl SwatchButton {
    pub fn new(color: egui::Color32, selected: bool) -> Self {
        Self { color, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(28.0, 28.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect.shrink(2.0), 4.0, self.color);

            let outline = if self.selected {
                egui::Stroke::new(3.0, egui::Color32::from_rgb(33, 150, 243))
            } else if response.hovered() {
                egui::Stroke::new(1.5, egui::Color32::from_gray(160))
            } else {
                egui::Stroke::new(1.0, egui::Color32::from_gray(90))
            };
            painter.rect_stroke(rect.shrink(1.0), 4.0, outline);
        }

        response
    }
}
