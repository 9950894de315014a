use super::{EguiApp, error_banner, style};
use crate::session::TrainingState;
use eframe::egui::{self, RichText, Ui};

impl EguiApp {
    pub(super) fn render_single_row_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.heading("Predict Single Row");
        ui.label(
            RichText::new(
                "Upload a CSV file containing a single row of features (without 'Label') \
                 to get a prediction.",
            )
            .color(palette.text_muted),
        );
        ui.add_space(6.0);

        let single_row = &self.controller.session().single_row;
        let predicting = single_row.is_predicting();
        let selected = single_row.file().map(|file| file.file_name().to_string());
        let mut browse = false;
        let mut clear = false;
        ui.horizontal(|ui| {
            ui.label(RichText::new("Single Row Data (CSV)").strong());
            match &selected {
                Some(name) => ui.label(RichText::new(name).color(palette.success)),
                None => ui.label(RichText::new("No file selected").color(palette.text_muted)),
            };
            browse = ui.add_enabled(!predicting, egui::Button::new("Browse...")).clicked();
            if selected.is_some() {
                clear = ui.add_enabled(!predicting, egui::Button::new("Clear")).clicked();
            }
        });
        if browse {
            self.controller.pick_single_row();
        }
        if clear {
            self.controller.clear_single_row();
        }

        let training = self.controller.training_state();
        if training != TrainingState::Trained {
            ui.label(
                RichText::new(format!(
                    "Model status: {}. Train the model before predicting.",
                    training.label()
                ))
                .small()
                .color(palette.accent_copper),
            );
        }

        if let Some(message) = self.controller.session().single_row.user_message() {
            ui.add_space(4.0);
            error_banner(ui, &message);
        }

        ui.add_space(6.0);
        let enabled = self.controller.session().can_predict();
        let label = if predicting {
            "Predicting..."
        } else {
            "Predict Label"
        };
        let mut clicked = false;
        ui.vertical_centered(|ui| {
            clicked = ui
                .add_enabled(enabled, egui::Button::new(RichText::new(label).strong()))
                .clicked();
        });
        if clicked {
            self.controller.predict_single_row();
        }

        if let Some(label) = self.controller.session().single_row.prediction() {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Predicted Label:").color(palette.text_muted));
                ui.label(
                    RichText::new(label.to_string())
                        .size(28.0)
                        .strong()
                        .color(palette.accent_mint),
                );
            });
        }
    }
}
