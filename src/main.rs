#![deny(missing_docs)]

//! Entry point for the egui-based UDA client.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use uda_client::config;
use uda_client::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use uda_client::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting uda-client");

    let settings = config::load_or_default();

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(980.0, 820.0))
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_drag_and_drop(true);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "UDA Client",
        native_options,
        Box::new(move |_cc| match settings {
            Ok(settings) => Ok(Box::new(EguiApp::new(settings))),
            Err(err) => {
                tracing::error!("Failed to load config: {err}");
                Ok(Box::new(LaunchError {
                    message: format!("Failed to load config: {err}"),
                }))
            }
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
