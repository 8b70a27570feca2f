//! Resolve configured path strings into absolute, normalized paths.
use std::path::{Component, Path, PathBuf};

use crate::error::PathError;

/// Home-directory marker. Every occurrence is replaced, not just a leading one.
const HOME_MARKER: char = '~';

/// Turns raw mapping strings into absolute paths.
///
/// Captures the home and working directories once so that every entry of a
/// run is resolved against the same base.
#[derive(Debug, Clone)]
pub struct PathResolver {
    home: PathBuf,
    cwd: PathBuf,
}

impl PathResolver {
    /// Create a resolver with explicit home and working directories.
    #[must_use]
    pub const fn new(home: PathBuf, cwd: PathBuf) -> Self {
        Self { home, cwd }
    }

    /// Create a resolver for the current user and process working directory.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::HomeDir`] if the home directory is unknown and
    /// [`PathError::CurrentDir`] if the working directory cannot be read.
    pub fn from_env() -> Result<Self, PathError> {
        let home = dirs::home_dir().ok_or(PathError::HomeDir)?;
        let cwd = std::env::current_dir().map_err(|source| PathError::CurrentDir { source })?;
        Ok(Self::new(home, dunce::simplified(&cwd).to_path_buf()))
    }

    /// Resolve `raw`: expand `~`, anchor relative paths at the working
    /// directory, then clean `.` and `..` lexically.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> PathBuf {
        let expanded = if raw.contains(HOME_MARKER) {
            PathBuf::from(raw.replace(HOME_MARKER, &self.home.to_string_lossy()))
        } else {
            PathBuf::from(raw)
        };

        let absolute = if expanded.is_absolute() {
            expanded
        } else {
            self.cwd.join(expanded)
        };

        normalize(&absolute)
    }
}

/// Lexically normalize `path` without touching the filesystem.
///
/// `.` segments are dropped, `..` removes the previous normal segment, and
/// `..` directly under the root stays at the root.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push(component);
                }
            }
        }
    }
    if out.as_os_str().is_empty() {
        out.push(Component::CurDir);
    }
    out
}
