use super::{EguiApp, error_banner, style};
use crate::uploads::UploadSlot;
use eframe::egui::{self, RichText, Ui};

impl EguiApp {
    pub(super) fn render_upload_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.columns(UploadSlot::ALL.len(), |columns| {
            for (column, slot) in columns.iter_mut().zip(UploadSlot::ALL) {
                self.render_upload_slot(column, slot);
            }
        });
        ui.add_space(8.0);

        if let Some(message) = self.controller.session().batch.user_message() {
            error_banner(ui, &message);
            ui.add_space(6.0);
        }

        let batch = &self.controller.session().batch;
        let submitting = batch.is_submitting();
        let enabled = batch.can_submit();
        let label = if submitting {
            "Processing..."
        } else {
            "Train Model & Get Metrics"
        };
        let mut clicked = false;
        ui.vertical_centered(|ui| {
            clicked = ui
                .add_enabled(enabled, egui::Button::new(RichText::new(label).strong()))
                .clicked();
        });
        if clicked {
            self.controller.submit_batch();
        }

        if let Some(elapsed) = self.controller.processing_elapsed() {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(
                        RichText::new("Processing your data...").color(palette.accent_ice),
                    );
                });
                ui.label(
                    RichText::new(format!("Elapsed: {} s", elapsed.as_secs()))
                        .color(palette.text_muted),
                );
                ui.label(
                    RichText::new("(Data is being sent to the backend for processing.)")
                        .small()
                        .color(palette.text_muted),
                );
            });
        }
    }

    fn render_upload_slot(&mut self, ui: &mut Ui, slot: UploadSlot) {
        let palette = style::palette();
        let selected = self
            .controller
            .session()
            .batch
            .uploads()
            .get(slot)
            .map(|file| (file.file_name().to_string(), file.len()));
        ui.label(RichText::new(format!("{} (CSV)", slot.label())).strong());
        match &selected {
            Some((name, len)) => {
                ui.label(RichText::new(name).color(palette.success))
                    .on_hover_text(format!("{len} bytes"));
            }
            None => {
                ui.label(RichText::new("No file selected").color(palette.text_muted));
            }
        }
        let locked = self.controller.session().batch.is_submitting();
        ui.horizontal(|ui| {
            if ui.add_enabled(!locked, egui::Button::new("Browse...")).clicked() {
                self.controller.pick_upload(slot);
            }
            if selected.is_some() && ui.add_enabled(!locked, egui::Button::new("Clear")).clicked()
            {
                self.controller.clear_upload(slot);
            }
        });
    }
}
