use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

use uda_client::{app_dirs::CONFIG_HOME_ENV, config::BACKEND_URL_ENV};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the config home at a temp dir and clears the backend URL override
/// for the guard's lifetime.
pub struct UdaEnvGuard {
    previous_home: Option<String>,
    previous_url: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl UdaEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous_home = std::env::var(CONFIG_HOME_ENV).ok();
        let previous_url = std::env::var(BACKEND_URL_ENV).ok();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, path);
            std::env::remove_var(BACKEND_URL_ENV);
        }
        Self {
            previous_home,
            previous_url,
            _lock: lock,
        }
    }

    pub fn set_backend_url(&self, url: &str) {
        // SAFETY: the guard holds the global env lock.
        unsafe {
            std::env::set_var(BACKEND_URL_ENV, url);
        }
    }
}

impl Drop for UdaEnvGuard {
    fn drop(&mut self) {
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            restore(CONFIG_HOME_ENV, self.previous_home.take());
            restore(BACKEND_URL_ENV, self.previous_url.take());
        }
    }
}

unsafe fn restore(key: &str, value: Option<String>) {
    match value {
        // SAFETY: callers hold the global env lock.
        Some(value) => unsafe { std::env::set_var(key, value) },
        None => unsafe { std::env::remove_var(key) },
    }
}
