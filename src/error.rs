//! Domain-specific error types for dotman.
//!
//! Internal modules return typed errors ([`ConfigError`], [`PathError`],
//! [`LinkError`]) while the command handler at the CLI boundary converts them
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! DotmanError
//! ├── Config(ConfigError) : reading and parsing the mapping file
//! ├── Path(PathError)     : home / working directory lookup
//! ├── Link(LinkError)     : probing, removing and creating destinations
//! └── Prompt(io::Error)   : reading the operator's answer
//! ```
//!
//! [`LinkError::AlreadyExists`] is the single recoverable variant: the
//! orchestrator turns it into a prompt instead of aborting.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for dotman.
#[derive(Error, Debug)]
pub enum DotmanError {
    /// The mapping file could not be read or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A configured path could not be resolved.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A destination could not be reconciled.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// The operator's answer could not be read.
    #[error("cannot read answer from standard input")]
    Prompt(#[from] std::io::Error),
}

/// Errors that arise from loading the mapping file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The mapping file could not be read.
    #[error("cannot open config file at {}", path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A non-blank line does not split into exactly two fields on `:`.
    #[error("invalid format at line {line} of config file {}", path.display())]
    InvalidFormat {
        /// 1-based line number.
        line: usize,
        /// Path of the offending file.
        path: PathBuf,
    },

    /// The same destination string appears on more than one line.
    #[error("destination {0} has been used more than once")]
    DuplicateDestination(String),
}

/// Errors that arise while resolving configured paths.
#[derive(Error, Debug)]
pub enum PathError {
    /// The current user's home directory is unknown.
    #[error("cannot determine the home directory of the current user")]
    HomeDir,

    /// The working directory could not be read.
    #[error("cannot get absolute path")]
    CurrentDir {
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from reconciling a single symlink.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The destination is already present and force was not requested.
    #[error("destination already exists: {}", destination.display())]
    AlreadyExists {
        /// The destination that is in the way.
        destination: PathBuf,
    },

    /// The destination could not be inspected.
    #[error("unable to open {}", path.display())]
    Probe {
        /// Path that was inspected.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The parent directories of the destination could not be created.
    #[error("unable to create parent directories of file {}", path.display())]
    CreateParent {
        /// The destination whose parents were being created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An existing destination could not be deleted.
    #[error("cannot delete {}", path.display())]
    Remove {
        /// Path that could not be removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The symlink itself could not be created.
    #[error(
        "unable to create the symlink between {} and {}",
        source_path.display(),
        destination.display()
    )]
    Symlink {
        /// What the link should point to.
        source_path: PathBuf,
        /// Where the link was being created.
        destination: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl LinkError {
    /// Return `true` for the recoverable "destination already exists" case.
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}
