//! Logging setup
//!
//! `RUST_LOG` wins over the `-v` count, which otherwise picks the crate's
//! level while everything else stays at `warn`. A quiet run without a log
//! file installs no writer at all, whatever `RUST_LOG` says.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Where and how much to log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions<'a> {
    /// Number of `-v` flags given
    pub verbosity: u8,
    /// Append to this file instead of writing to stderr
    pub file: Option<&'a Path>,
    /// Log nothing unless asked to (full-screen UI without a log file)
    pub quiet: bool,
}

/// Install the global `tracing` subscriber
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(options: LogOptions<'_>) -> Result<()> {
    let filter = if is_silenced(options) {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(options)))
    };

    let (file_layer, stderr_layer) = match options.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let layer = fmt::layer().with_writer(Mutex::new(file)).with_ansi(false);
            (Some(layer), None)
        }
        None if options.quiet => (None, None),
        None => (None, Some(fmt::layer().with_writer(io::stderr))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("failed to install log subscriber")?;

    tracing::debug!(verbosity = options.verbosity, "logging initialized");
    Ok(())
}

/// Nowhere to write without drawing over the full-screen UI
const fn is_silenced(options: LogOptions<'_>) -> bool {
    options.quiet && options.file.is_none()
}

fn default_directives(options: LogOptions<'_>) -> String {
    if is_silenced(options) {
        return "off".to_string();
    }

    let level = match options.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("warn,wordle_engine={level}")
}
