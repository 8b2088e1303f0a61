use crate::DrawingApp;
use crate::palette::BrushSize;

/// Brush size picker; closes as soon as a size is chosen
pub fn brush_dialog(app: &mut DrawingApp, ctx: &egui::Context) {
    if !app.is_brush_dialog_open() {
        return;
    }

    let mut open = true;
    let mut chosen = None;
    egui::Window::new("Brush size")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui| {
            for size in BrushSize::ALL {
                let label = format!("{} ({} dp)", size.label(), size.dp());
                if ui
                    .selectable_label(app.brush_size() == size, label)
                    .clicked()
                {
                    chosen = Some(size);
                }
            }
        });

    if let Some(size) = chosen {
        app.select_brush_size(size);
        open = false;
    }
    app.set_brush_dialog_open(open);
}

/// Asks for the path of an image to put behind the strokes
pub fn import_dialog(app: &mut DrawingApp, ctx: &egui::Context) {
    let Some(path) = app.import_path_mut() else {
        return;
    };

    let mut submit = false;
    let mut cancel = false;
    egui::Window::new("Import background")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Image file (or drop one onto the window):");
            let response = ui.text_edit_singleline(path);
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            ui.horizontal(|ui| {
                submit |= ui.button("Open").clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });

    if submit {
        let path = path.clone();
        let now = ctx.input(|i| i.time);
        app.close_import_dialog();
        app.import_background_from_path(&path, now);
    } else if cancel {
        app.close_import_dialog();
    }
}
