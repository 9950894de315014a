use std::path::{Path, PathBuf};

use rfd::FileDialog;

use super::EguiController;
use crate::{
    download::{self, DownloadError},
    egui_app::ui::style::StatusTone,
    uploads::{CsvFile, UploadSlot},
};

impl EguiController {
    /// Ask the user for one of the three training inputs.
    pub fn pick_upload(&mut self, slot: UploadSlot) {
        let Some(path) = self.csv_dialog(slot.label()).pick_file() else {
            return;
        };
        self.select_upload_path(slot, &path);
    }

    /// Read `path` into `slot`. Read failures keep the previous selection.
    pub fn select_upload_path(&mut self, slot: UploadSlot, path: &Path) {
        match CsvFile::open(path) {
            Ok(file) => {
                let text = format!("{}: {}", slot.label(), file.file_name());
                self.session.batch.select(slot, file);
                self.remember_upload_dir(path);
                self.set_status(text, StatusTone::Info);
            }
            Err(err) => {
                tracing::warn!("Failed to read {}: {err}", path.display());
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
    }

    pub fn clear_upload(&mut self, slot: UploadSlot) {
        self.session.batch.clear(slot);
    }

    pub fn pick_single_row(&mut self) {
        let Some(path) = self.csv_dialog("Single Row Data").pick_file() else {
            return;
        };
        self.select_single_row_path(&path);
    }

    pub fn select_single_row_path(&mut self, path: &Path) {
        match CsvFile::open(path) {
            Ok(file) => {
                let text = format!("Single Row Data: {}", file.file_name());
                self.session.select_single_row(file);
                self.remember_upload_dir(path);
                self.set_status(text, StatusTone::Info);
            }
            Err(err) => {
                tracing::warn!("Failed to read {}: {err}", path.display());
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
    }

    pub fn clear_single_row(&mut self) {
        self.session.single_row.clear();
    }

    /// Route a file dropped onto the window to the first empty input.
    pub fn accept_dropped_file(&mut self, path: &Path) {
        let next_slot = self.session.batch.uploads().missing().first().copied();
        match next_slot {
            Some(slot) => self.select_upload_path(slot, path),
            None => self.select_single_row_path(path),
        }
    }

    /// Offer the predictions CSV through a save dialog.
    pub fn save_predictions_via_dialog(&mut self) {
        let Some(file) = download::prepare(self.session.batch.predictions()) else {
            self.set_status("No predictions to download yet", StatusTone::Warning);
            return;
        };
        let mut dialog = FileDialog::new()
            .set_file_name(file.file_name)
            .add_filter("CSV", &["csv"]);
        if let Some(dir) = &self.settings.ui.last_upload_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };
        self.report_save(file.save_as(&path).map(|()| path));
    }

    /// Write `predictions.csv` into `dir` without a dialog.
    pub fn save_predictions_into(&mut self, dir: &Path) -> Option<PathBuf> {
        let Some(file) = download::prepare(self.session.batch.predictions()) else {
            self.set_status("No predictions to download yet", StatusTone::Warning);
            return None;
        };
        self.report_save(file.save_into(dir))
    }

    fn report_save(&mut self, result: Result<PathBuf, DownloadError>) -> Option<PathBuf> {
        match result {
            Ok(path) => {
                self.set_status(
                    format!("Saved predictions to {}", path.display()),
                    StatusTone::Info,
                );
                Some(path)
            }
            Err(err) => {
                tracing::error!("Saving predictions failed: {err}");
                self.set_status(err.to_string(), StatusTone::Error);
                None
            }
        }
    }

    fn csv_dialog(&self, title: &str) -> FileDialog {
        let dialog = FileDialog::new()
            .set_title(title)
            .add_filter("CSV", &["csv"]);
        match &self.settings.ui.last_upload_dir {
            Some(dir) if dir.is_dir() => dialog.set_directory(dir),
            _ => dialog,
        }
    }

    fn remember_upload_dir(&mut self, path: &Path) {
        let Some(dir) = path.parent() else {
            return;
        };
        if self.settings.ui.last_upload_dir.as_deref() == Some(dir) {
            return;
        }
        self.settings.ui.last_upload_dir = Some(dir.to_path_buf());
        self.persist_settings();
    }
}
