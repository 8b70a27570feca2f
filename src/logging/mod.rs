//! Console and file logging built on [`tracing`].
//!
//! [`Logger`] emits events; [`init_subscriber`] installs the console
//! formatter (the `[i]` / `[✓]` / `[!]` / `[✗]` prefixes) and the persistent
//! log file layer.

mod logger;
mod subscriber;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;

/// Target for events rendered with the success prefix.
pub(crate) const SUCCESS_TARGET: &str = "dotman::success";

/// Target for dry-run preview events.
pub(crate) const DRY_RUN_TARGET: &str = "dotman::dry_run";
