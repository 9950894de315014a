use super::{EguiController, build_http_backend};
use crate::{app_dirs::AppPaths, config, egui_app::ui::style::StatusTone};

impl EguiController {
    pub fn open_settings(&mut self) {
        self.ui.settings.open = true;
        self.ui.settings.backend_url_input = self.settings.backend.base_url.clone();
        self.ui.settings.last_error = None;
    }

    pub fn close_settings(&mut self) {
        self.ui.settings.open = false;
        self.ui.settings.last_error = None;
    }

    /// Point the client at a new backend address.
    ///
    /// An unparseable address leaves the current backend in place and keeps
    /// the window open with the error. Requests already in flight finish
    /// against the old address.
    pub fn apply_backend_url(&mut self) {
        let input = self.ui.settings.backend_url_input.trim().trim_end_matches('/');
        if input.is_empty() {
            self.ui.settings.last_error = Some("Backend URL cannot be empty.".to_string());
            return;
        }
        let mut candidate = self.settings.clone();
        candidate.backend.base_url = input.to_string();
        match build_http_backend(&candidate) {
            Ok(backend) => {
                let text = format!("Backend set to {}", candidate.backend.base_url);
                self.settings = candidate;
                self.backend = Ok(backend);
                self.persist_settings();
                self.close_settings();
                self.set_status(text, StatusTone::Info);
            }
            Err(err) => {
                self.ui.settings.last_error = Some(err.to_string());
            }
        }
    }

    /// Reveal the log folder in the system file manager.
    pub fn open_logs_folder(&mut self) {
        let dir = match AppPaths::resolve().and_then(|paths| paths.logs_dir()) {
            Ok(dir) => dir,
            Err(err) => {
                self.set_status(err.to_string(), StatusTone::Error);
                return;
            }
        };
        if let Err(err) = open::that(&dir) {
            self.set_status(
                format!("Could not open {}: {err}", dir.display()),
                StatusTone::Error,
            );
        }
    }

    pub(super) fn persist_settings(&mut self) {
        if !self.persist_settings {
            return;
        }
        if let Err(err) = config::save(&self.settings) {
            tracing::warn!("Failed to save settings: {err}");
            self.set_status(format!("Failed to save settings: {err}"), StatusTone::Warning);
        }
    }
}
