use crate::egui_app::ui::style::{self, StatusTone};
use egui::Color32;

const MAX_STATUS_LOG: usize = 50;

/// UI-only state owned by the controller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    pub status: StatusBarState,
    pub settings: SettingsUiState,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Main status message text.
    pub text: String,
    /// Badge label shown next to the status.
    pub badge_label: String,
    /// Badge color.
    pub badge_color: Color32,
    /// Rolling status log entries, oldest first.
    pub log: Vec<String>,
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self::idle()
    }
}

impl StatusBarState {
    /// Status shown before anything has been uploaded.
    pub fn idle() -> Self {
        Self {
            text: "Upload the source, target, and useful columns CSV files to begin".into(),
            badge_label: style::status_badge_label(StatusTone::Idle).into(),
            badge_color: style::status_badge_color(StatusTone::Idle),
            log: Vec::new(),
        }
    }

    pub fn set(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.text = text.into();
        self.badge_label = style::status_badge_label(tone).into();
        self.badge_color = style::status_badge_color(tone);
        self.log.push(self.text.clone());
        if self.log.len() > MAX_STATUS_LOG {
            let excess = self.log.len() - MAX_STATUS_LOG;
            self.log.drain(..excess);
        }
    }

    /// Concatenate log entries into a single displayable string.
    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }
}

/// Backend settings window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsUiState {
    /// Whether the settings window is open.
    pub open: bool,
    /// Backend URL being edited.
    pub backend_url_input: String,
    /// Last error message, if any.
    pub last_error: Option<String>,
}
