use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Cannot open log file {0}: {1}")]
    Open(String, #[source] std::io::Error),
    #[error("Logging already initialized: {0}")]
    Init(String),
}

/// Sends tracing output to `log_file`, appending.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing(log_file: &Path) -> Result<(), LoggingError> {
    let file = open_log_file(log_file)
        .map_err(|e| LoggingError::Open(log_file.display().to_string(), e))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
