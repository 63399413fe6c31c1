//! Structured logging setup

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines go.
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    /// Append to a file. Used by the TUI, which owns the terminal.
    File(PathBuf),
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to init logging: {0}")]
    Init(String),
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str, target: LogTarget) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string())),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| TelemetryError::Open {
                    path: path.display().to_string(),
                    source,
                })?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
                .map_err(|e| TelemetryError::Init(e.to_string()))
        }
    }
}
