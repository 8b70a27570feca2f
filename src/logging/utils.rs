//! Log file location and timestamp formatting.
use std::path::{Path, PathBuf};

/// Directory under the cache root holding dotman's log.
const LOG_DIR: &str = "dotman";

/// File name of the persistent log.
const LOG_FILE: &str = "dotman.log";

/// Log file location under `cache`. Pure; nothing is created.
pub(super) fn log_file_in(cache: &Path) -> PathBuf {
    cache.join(LOG_DIR).join(LOG_FILE)
}

/// Return the log file path, `<cache dir>/dotman/dotman.log`, or `None` when
/// the platform has no cache directory.
///
/// The directory is created when the file layer opens the log.
pub(super) fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|cache| log_file_in(&cache))
}

/// Format the current UTC time as `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the current UTC time as `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}
