//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::{IsTerminal as _, Write as _};
use std::path::Path;
use std::sync::Mutex;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path};
use super::{DRY_RUN_TARGET, SUCCESS_TARGET};

/// Environment variable overriding the console filter (`EnvFilter` syntax).
const LOG_ENV: &str = "DOTMAN_LOG";

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.message);
        }
    }
}

fn event_message(event: &tracing::Event<'_>) -> String {
    let mut extractor = MessageExtractor::default();
    event.record(&mut extractor);
    extractor.message
}

/// Render one console line for an event.
///
/// Colour codes wrap only the prefix, so the visible text is the same with
/// and without colour.
fn render_console_line(level: tracing::Level, target: &str, msg: &str, color: bool) -> String {
    let (prefix, code) = match level {
        tracing::Level::ERROR => ("[✗]", "31"),
        tracing::Level::WARN => ("[!]", "33"),
        tracing::Level::INFO if target == SUCCESS_TARGET => ("[✓]", "32"),
        tracing::Level::INFO if target == DRY_RUN_TARGET => ("[i] [dry run]", "33"),
        tracing::Level::INFO => ("[i]", "34"),
        _ => ("   ", "2"),
    };
    if color {
        format!("\x1b[{code}m{prefix}\x1b[0m {msg}")
    } else {
        format!("{prefix} {msg}")
    }
}

/// Render one log file line for an event.
fn render_file_line(level: tracing::Level, target: &str, msg: &str, ts: &str) -> String {
    match (level, target) {
        (tracing::Level::INFO, SUCCESS_TARGET) => format!("[{ts}] [ok] {msg}"),
        (tracing::Level::INFO, DRY_RUN_TARGET) => format!("[{ts}] [dry run] {msg}"),
        (tracing::Level::ERROR, _) => format!("[{ts}] [error] {msg}"),
        (tracing::Level::WARN, _) => format!("[{ts}] [warn] {msg}"),
        (tracing::Level::DEBUG | tracing::Level::TRACE, _) => format!("[{ts}] [debug] {msg}"),
        _ => format!("[{ts}] {msg}"),
    }
}

/// A [`tracing_subscriber::Layer`] that writes all events to the persistent
/// log file with timestamps.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate (or create) the log file at `path` and its directory, write a
    /// run header, and return a layer appending to it.
    ///
    /// Returns `None` if the file cannot be written.
    pub(super) fn create(path: &Path) -> Option<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        let version = crate::VERSION;
        let header = format!(
            "==========================================\n\
             dotman {version} {}\n\
             ==========================================\n",
            format_utc_datetime(),
        );
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let msg = event_message(event);
        let line = render_file_line(*metadata.level(), metadata.target(), &msg, &format_utc_time());

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits the status-line
/// prefixes.
struct StatusFormatter {
    color: bool,
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for StatusFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let msg = event_message(event);
        writeln!(
            writer,
            "{}",
            render_console_line(*metadata.level(), metadata.target(), &msg, self.color)
        )
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console output goes to stdout at `INFO` (`DEBUG` when `verbose`), unless
/// `DOTMAN_LOG` holds a filter directive. The log file receives every event
/// at `DEBUG` and above. Must be called once at program startup.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let console_layer = fmt::layer()
        .event_format(StatusFormatter {
            color: std::io::stdout().is_terminal(),
        })
        .with_writer(std::io::stdout)
        .with_filter(console_filter);

    let file_layer = log_file_path()
        .and_then(|path| FileLayer::create(&path))
        .map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
