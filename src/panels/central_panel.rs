use crate::DrawingApp;

pub fn central_panel(app: &mut DrawingApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            // Handle input
            app.handle_input(ctx, &response);

            // Render the canvas
            app.render(ctx, &painter, response.rect);
        });
}
