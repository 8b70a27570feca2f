//! Status-line logger.
use std::path::{Path, PathBuf};

use super::utils::log_file_path;
use super::{DRY_RUN_TARGET, SUCCESS_TARGET};

/// Emits status lines as [`tracing`] events.
///
/// Without an installed subscriber (unit tests) every method is a no-op.
#[derive(Debug, Default)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger that knows where the log file lives.
    ///
    /// Nothing is touched on disk. The file and its directory are created by
    /// [`init_subscriber`](super::init_subscriber).
    #[must_use]
    pub fn new() -> Self {
        Self {
            log_file: log_file_path(),
        }
    }

    /// Path of the persistent log file, if the cache directory is available.
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Log an informational message (`[i]`).
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a success message (`[✓]`).
    pub fn success(&self, msg: &str) {
        tracing::info!(target: SUCCESS_TARGET, "{msg}");
    }

    /// Log a dry-run preview message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Log a warning message (`[!]`).
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a fatal error message (`[✗]`).
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a debug message (console only when verbose; always in the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }
}
