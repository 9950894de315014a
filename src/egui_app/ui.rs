//! egui renderer for the application UI.

mod results_panel;
mod settings_window;
mod single_row_panel;
mod status_bar;
pub mod style;
mod upload_panel;

use std::time::Duration;

use crate::config::AppSettings;
use crate::egui_app::controller::EguiController;
use eframe::egui::{self, RichText, Ui};

/// Smallest window that still fits the three upload slots side by side.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(720.0, 560.0);

const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            controller: EguiController::new(settings),
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<_> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        for path in dropped {
            self.controller.accept_dropped_file(&path);
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Unsupervised Domain Adaptation")
                        .strong()
                        .color(palette.accent_mint),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let logs = ui.button("Logs");
                    let logs = match crate::logging::current_log_file() {
                        Some(path) => logs.on_hover_text(path.display().to_string()),
                        None => logs.on_hover_text("File logging is disabled"),
                    };
                    if logs.clicked() {
                        self.controller.open_logs_folder();
                    }
                    if ui.button("Backend...").clicked() {
                        self.controller.open_settings();
                    }
                    ui.label(
                        RichText::new(&self.controller.settings().backend.base_url)
                            .color(palette.text_muted),
                    );
                });
            });
        });
    }

    fn render_main_column(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.label(
            RichText::new(
                "Upload your source, target, and useful columns CSV files to train the model \
                 and see performance metrics.",
            )
            .color(palette.text_muted),
        );
        ui.add_space(8.0);
        style::section_frame().show(ui, |ui| self.render_upload_panel(ui));
        ui.add_space(10.0);
        if self.controller.session().batch.metrics().is_some() {
            style::section_frame().show(ui, |ui| self.render_results_panel(ui));
            ui.add_space(10.0);
        }
        style::section_frame().show(ui, |ui| self.render_single_row_panel(ui));
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.handle_dropped_files(ctx);
        self.render_top_bar(ctx);
        self.render_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| self.render_main_column(ui));
        });
        self.render_settings_window(ctx);
        if self.controller.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        }
    }
}

/// Inline error banner under a control group.
fn error_banner(ui: &mut Ui, message: &str) {
    let palette = style::palette();
    style::error_banner_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(message).color(palette.warning));
    });
}
