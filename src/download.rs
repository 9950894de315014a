//! Saving the in-memory predictions CSV as `predictions.csv`.

use std::path::{Path, PathBuf};

use crate::prediction::PredictionsArtifact;

/// File name every predictions download uses.
pub const PREDICTIONS_FILE_NAME: &str = "predictions.csv";
/// MIME type advertised for the download.
pub const PREDICTIONS_MIME: &str = "text/csv;charset=utf-8;";

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// A file ready to be handed to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadFile {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub contents: Vec<u8>,
}

/// Build the download for the current artifact; `None` when there is nothing to save.
pub fn prepare(artifact: Option<&PredictionsArtifact>) -> Option<DownloadFile> {
    let artifact = artifact?;
    Some(DownloadFile {
        file_name: PREDICTIONS_FILE_NAME,
        mime: PREDICTIONS_MIME,
        contents: artifact.as_str().as_bytes().to_vec(),
    })
}

impl DownloadFile {
    /// Write into `dir` under the canonical file name.
    pub fn save_into(&self, dir: &Path) -> Result<PathBuf, DownloadError> {
        if !dir.is_dir() {
            return Err(DownloadError::NotADirectory(dir.to_path_buf()));
        }
        let path = dir.join(self.file_name);
        self.save_as(&path)?;
        Ok(path)
    }

    /// Write to an explicit path, e.g. one chosen in a save dialog.
    pub fn save_as(&self, path: &Path) -> Result<(), DownloadError> {
        std::fs::write(path, &self.contents).map_err(|source| DownloadError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = self.contents.len(), "Predictions saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn nothing_to_download_without_artifact() {
        assert!(prepare(None).is_none());
    }

    #[test]
    fn saved_file_round_trips_exactly() {
        let csv = "Label\r\n0\r\n1\r\nß,\"quoted\"\r\n";
        let artifact = PredictionsArtifact::new(csv);
        let download = prepare(Some(&artifact)).unwrap();
        assert_eq!(download.file_name, "predictions.csv");
        assert_eq!(download.mime, "text/csv;charset=utf-8;");

        let dir = tempdir().unwrap();
        let path = download.save_into(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("predictions.csv"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), csv);
    }

    #[test]
    fn save_into_rejects_files() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, "").unwrap();
        let download = prepare(Some(&PredictionsArtifact::new("Label\n"))).unwrap();
        assert!(matches!(
            download.save_into(&file),
            Err(DownloadError::NotADirectory(_))
        ));
    }
}
