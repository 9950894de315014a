use super::{EguiApp, error_banner, style};
use eframe::egui::{self, Align2, RichText};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SettingsAction {
    None,
    Apply,
    Cancel,
}

impl EguiApp {
    pub(super) fn render_settings_window(&mut self, ctx: &egui::Context) {
        if !self.controller.ui.settings.open {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.close_settings();
            return;
        }
        let palette = style::palette();
        let mut open = true;
        let mut action = SettingsAction::None;
        egui::Window::new("Backend")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("Address of the training and prediction service.")
                        .color(palette.text_muted),
                );
                ui.add_space(6.0);
                let state = &mut self.controller.ui.settings;
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.backend_url_input)
                        .hint_text("http://127.0.0.1:8000")
                        .desired_width(380.0),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    action = SettingsAction::Apply;
                }
                if let Some(err) = state.last_error.clone() {
                    ui.add_space(6.0);
                    error_banner(ui, &err);
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        action = SettingsAction::Cancel;
                    }
                    if ui.button("Save").clicked() {
                        action = SettingsAction::Apply;
                    }
                });
            });
        if !open {
            action = SettingsAction::Cancel;
        }
        match action {
            SettingsAction::None => {}
            SettingsAction::Apply => self.controller.apply_backend_url(),
            SettingsAction::Cancel => self.controller.close_settings(),
        }
    }
}
