use crate::DrawingApp;
use crate::components::SwatchButton;

pub fn tools_panel(app: &mut DrawingApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Brush");

            let brush = app.document().brush();
            ui.horizontal_wrapped(|ui| {
                let palette: Vec<egui::Color32> = app.palette().iter().map(|(_, c)| *c).collect();
                for color in palette {
                    if SwatchButton::new(color, color == brush.color).show(ui).clicked() {
                        app.select_color(color);
                    }
                }
            });

            ui.horizontal(|ui| {
                if ui.button("🖌 Size").clicked() {
                    app.set_brush_dialog_open(true);
                }
                ui.label(format!("{} ({:.0} px)", app.brush_size().label(), brush.thickness));
            });

            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.document().can_undo();
                let can_redo = app.document().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("⟲ Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("⟳ Redo")).clicked() {
                    app.redo();
                }
            });

            ui.horizontal(|ui| {
                ui.label(format!("Strokes: {}", app.document().committed().len()));
                ui.label(format!("Redo stack: {}", app.document().undone().len()));
            });

            ui.separator();
            ui.heading("Canvas");

            if ui.button("🖼 Import background").clicked() {
                app.open_import_dialog();
            }
            if app.background().is_some() && ui.button("Remove background").clicked() {
                app.clear_background();
            }
            if ui.button("🗑 Clear strokes").clicked() {
                app.clear_canvas();
            }

            ui.separator();

            ui.horizontal(|ui| {
                let exporting = app.is_exporting();
                if ui
                    .add_enabled(!exporting, egui::Button::new("💾 Save & export"))
                    .clicked()
                {
                    let now = ctx.input(|i| i.time);
                    app.start_export(now);
                }
                if exporting {
                    ui.spinner();
                }
            });
        });
}
