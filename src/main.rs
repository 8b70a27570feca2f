//! `dotman` binary entry point.
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;

use dotman::cli::Cli;
use dotman::commands::link;
use dotman::logging::{self, Logger};
use dotman::paths::PathResolver;
use dotman::prompt::TerminalConfirm;

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = Logger::new();

    match run(&args, &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log.error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli, log: &Logger) -> Result<()> {
    let resolver = PathResolver::from_env().context("unable to resolve paths")?;
    let mut confirm = TerminalConfirm::stdio();
    link::run(&args.link_opts(), &resolver, &mut confirm, log)?;
    Ok(())
}
