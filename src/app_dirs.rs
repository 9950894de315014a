//! Where the client keeps its files on disk.
//!
//! Everything lives in one `.uda-client` folder under the OS config
//! directory: `config.toml` at the top and one file per launch in `logs/`.
//! Setting `UDA_CLIENT_CONFIG_HOME` moves that folder under another base,
//! which is how tests and portable installs keep their files apart.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

/// Folder created under the base config directory.
pub const APP_DIR_NAME: &str = ".uda-client";
/// Environment variable replacing the OS config directory as the base.
pub const CONFIG_HOME_ENV: &str = "UDA_CLIENT_CONFIG_HOME";
/// Settings file inside the app folder.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Log folder inside the app folder.
pub const LOGS_DIR_NAME: &str = "logs";

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("No config directory found; set UDA_CLIENT_CONFIG_HOME to choose one")]
    NoBaseDir,
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolved layout of the app folder.
///
/// Resolving does not touch the disk; each accessor creates the folder it
/// returns or the parent of the file it returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    /// Resolve from `UDA_CLIENT_CONFIG_HOME`, falling back to the OS config dir.
    pub fn resolve() -> Result<Self, AppDirError> {
        let base = env_base()
            .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
            .ok_or(AppDirError::NoBaseDir)?;
        Ok(Self::under(&base))
    }

    /// Layout rooted at `base/.uda-client`.
    pub fn under(base: &Path) -> Self {
        Self {
            root: base.join(APP_DIR_NAME),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `config.toml`; the app folder is created so saving can succeed.
    pub fn config_file(&self) -> Result<PathBuf, AppDirError> {
        ensure_dir(&self.root)?;
        Ok(self.root.join(CONFIG_FILE_NAME))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, AppDirError> {
        let path = self.root.join(LOGS_DIR_NAME);
        ensure_dir(&path)?;
        Ok(path)
    }
}

fn env_base() -> Option<PathBuf> {
    std::env::var_os(CONFIG_HOME_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn ensure_dir(path: &Path) -> Result<(), AppDirError> {
    std::fs::create_dir_all(path).map_err(|source| AppDirError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn layout_is_created_lazily_under_base() {
        let base = tempdir().unwrap();
        let paths = AppPaths::under(base.path());
        assert_eq!(paths.root(), base.path().join(APP_DIR_NAME));
        assert!(!paths.root().exists());

        let config = paths.config_file().unwrap();
        assert_eq!(config, paths.root().join(CONFIG_FILE_NAME));
        assert!(paths.root().is_dir());
        assert!(!config.exists());

        let logs = paths.logs_dir().unwrap();
        assert_eq!(logs, paths.root().join(LOGS_DIR_NAME));
        assert!(logs.is_dir());
    }

    #[test]
    fn file_in_place_of_app_folder_is_reported() {
        let base = tempdir().unwrap();
        std::fs::write(base.path().join(APP_DIR_NAME), "not a folder").unwrap();
        let err = AppPaths::under(base.path()).logs_dir().unwrap_err();
        let AppDirError::CreateDir { path, .. } = err else {
            panic!("expected CreateDir, got {err:?}");
        };
        assert!(path.ends_with(LOGS_DIR_NAME));
    }
}
