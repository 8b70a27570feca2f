//! Symlink resource: probe a destination and link it to its source.
use std::io;
use std::path::{Path, PathBuf};

use super::fs;
use crate::error::LinkError;

/// What currently occupies the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationState {
    /// Nothing at the destination.
    Missing,
    /// Something is there: a file, a directory, or any symlink (dangling
    /// included).
    Present,
}

/// Result of a successful [`SymlinkResource::reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkChange {
    /// The destination was absent and the link was created.
    Created,
    /// The destination was removed and replaced by the link.
    Replaced,
}

/// A symlink to create at `destination`, pointing to `source`.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The file or directory the symlink points to.
    pub source: PathBuf,
    /// Where the symlink is created.
    pub destination: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource from resolved paths.
    #[must_use]
    pub const fn new(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Human-readable `source -> destination` description.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} -> {}", self.source.display(), self.destination.display())
    }

    /// Inspect the destination without following a symlink placed there.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Probe`] for any failure other than "not found".
    pub fn probe(&self) -> Result<DestinationState, LinkError> {
        probe_path(&self.destination)
    }

    /// Make the destination a symlink to the source.
    ///
    /// A missing destination is linked directly, creating parent
    /// directories. A present destination is removed first when `force` is
    /// set; otherwise [`LinkError::AlreadyExists`] is returned and nothing is
    /// touched. Directories created before a failed link are left behind.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::AlreadyExists`] when the destination is present
    /// and `force` is `false`, or the I/O variant of [`LinkError`] for the
    /// step that failed.
    pub fn reconcile(&self, force: bool) -> Result<LinkChange, LinkError> {
        let change = match self.probe()? {
            DestinationState::Missing => LinkChange::Created,
            DestinationState::Present if !force => {
                return Err(LinkError::AlreadyExists {
                    destination: self.destination.clone(),
                });
            }
            DestinationState::Present => {
                fs::remove_path(&self.destination).map_err(|source| LinkError::Remove {
                    path: self.destination.clone(),
                    source,
                })?;
                LinkChange::Replaced
            }
        };

        fs::ensure_parent_dir(&self.destination).map_err(|source| LinkError::CreateParent {
            path: self.destination.clone(),
            source,
        })?;

        fs::create_symlink(&self.source, &self.destination).map_err(|source| {
            LinkError::Symlink {
                source_path: self.source.clone(),
                destination: self.destination.clone(),
                source,
            }
        })?;

        Ok(change)
    }
}

fn probe_path(path: &Path) -> Result<DestinationState, LinkError> {
    match std::fs::symlink_metadata(path) {
        Ok(_) => Ok(DestinationState::Present),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(DestinationState::Missing),
        Err(source) => Err(LinkError::Probe {
            path: path.to_path_buf(),
            source,
        }),
    }
}
