use super::{EguiApp, style};
use eframe::egui::{self, RichText};

impl EguiApp {
    pub(super) fn render_status_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let status = &self.controller.ui.status;
            ui.horizontal(|ui| {
                ui.add_space(8.0);
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::hover());
                ui.painter()
                    .circle_filled(rect.center(), 7.0, status.badge_color);
                ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                ui.separator();
                let response = ui.label(RichText::new(&status.text).color(palette.text_primary));
                if !status.log.is_empty() {
                    response.on_hover_text(status.log_text());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(self.controller.training_state().label())
                            .color(palette.text_muted),
                    );
                    ui.label(RichText::new("Model:").color(palette.text_muted));
                });
            });
        });
    }
}
