//! Logging setup.
//!
//! Warnings and errors go to stderr by default. `-v` raises the level one
//! step at a time and `BREATHBOX_LOG` takes any `EnvFilter` directive
//! (e.g. `breathbox=trace`). The full-screen UI owns the terminal, so while
//! it runs logs are appended to `~/.breathbox/logs/breathbox.log` instead.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::BreathError;

/// Environment variable holding a filter directive.
pub const LOG_ENV: &str = "BREATHBOX_LOG";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error, with colors when it is a terminal.
    Stderr,
    /// Appended to a file, without colors.
    File(PathBuf),
}

/// Default level for a `-v` count.
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter: `BREATHBOX_LOG` when set, otherwise the `-v` level.
fn filter_for(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)))
}

/// Install the global subscriber.
///
/// Calling this twice is harmless; the second subscriber is ignored.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(verbosity: u8, target: &LogTarget) -> Result<(), BreathError> {
    let filter = filter_for(verbosity);

    let result = match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .try_init(),
        LogTarget::File(path) => {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true),
                )
                .try_init()
        }
    };

    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
    Ok(())
}
