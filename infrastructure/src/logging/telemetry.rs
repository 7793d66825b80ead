//! `tracing` subscriber setup.
//!
//! Installed once per process. Verbosity comes from `-v` counts; an optional
//! log directory adds a daily-rolling plain-text file. Problems opening the
//! directory are reported through the installed subscriber and startup
//! continues without the file layer.

use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{debug, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE_PREFIX: &str = "travel-agent.log";

static INITIALIZED: OnceLock<()> = OnceLock::new();

#[derive(Debug, Clone, Default)]
pub struct TelemetryOptions {
    /// Number of `-v` flags
    pub verbosity: u8,
    /// Only errors on stderr
    pub quiet: bool,
    pub log_dir: Option<PathBuf>,
}

/// Keeps the non-blocking file writer alive; drop it at exit to flush.
#[must_use]
pub struct TelemetryGuard {
    _file: Option<WorkerGuard>,
}

/// Filter for the given verbosity.
pub fn filter_for(verbosity: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(options: &TelemetryOptions) -> TelemetryGuard {
    if INITIALIZED.set(()).is_err() {
        debug!("tracing already initialized");
        return TelemetryGuard { _file: None };
    }

    let mut file_error = None;
    let (file_layer, guard) = match &options.log_dir {
        Some(dir) => match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                file_error = Some(format!("{}: {}", dir.display(), e));
                (None, None)
            }
        },
        None => (None, None),
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = tracing_subscriber::registry()
        .with(filter_for(options.verbosity, options.quiet))
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    if let Err(e) = installed {
        eprintln!("warning: could not install tracing subscriber: {e}");
    }
    if let Some(err) = file_error {
        warn!("Could not open log directory {}; file logging disabled", err);
    }

    TelemetryGuard { _file: guard }
}
