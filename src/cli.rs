//! Command-line interface.
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::commands::link::LinkOpts;
use crate::config::DEFAULT_CONFIG_FILE;

/// Symlink dotfiles into place from a `source : destination` mapping file.
#[derive(Parser, Debug)]
#[command(name = "dotman", version = crate::VERSION)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "DOTMAN_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Replace existing destinations without prompting
    #[arg(
        short,
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub force: bool,

    /// Preview changes without touching the filesystem
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Options for the link run.
    #[must_use]
    pub fn link_opts(&self) -> LinkOpts {
        LinkOpts {
            config: self.config.clone(),
            force: self.force,
            dry_run: self.dry_run,
        }
    }
}
