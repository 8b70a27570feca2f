//! Dotfile linker.
//!
//! Reads a `source : destination` mapping file and makes every destination a
//! symlink to its source, asking before anything already present is removed.
//!
//! - **[`config`]**: parse and validate the mapping file
//! - **[`paths`]**: expand `~` and normalize paths
//! - **[`resources`]**: probe, remove and create symlinks
//! - **[`prompt`]**: the replace/skip question
//! - **[`commands`]**: the link run tying it together
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod prompt;
pub mod resources;

/// Version string: `DOTMAN_VERSION` at build time, else the package version.
pub const VERSION: &str = match option_env!("DOTMAN_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};
