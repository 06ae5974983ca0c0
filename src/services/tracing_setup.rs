//! Diagnostics go to a log file; the terminal belongs to the UI.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Default log location in the system temp directory
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("scoom.log")
}

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber writing to `path`. The filter defaults to
/// `info` and honours `RUST_LOG`. Returns false when the log file cannot be
/// opened or a subscriber is already installed.
pub fn init_global(path: &Path) -> bool {
    let file = match open_log(path) {
        Ok(file) => file,
        Err(_) => return false,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .is_ok()
}
