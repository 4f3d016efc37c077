//! Structured logging setup for the msgspec binaries.
//!
//! Library crates only emit `tracing` events; a subscriber is installed by
//! whichever front end drives the pipeline.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors raised while installing the global subscriber.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The log file could not be opened for appending.
    #[error("Failed to open log file '{path}': {source}")]
    LogFile {
        /// Path of the log file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber was already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    Init(String),
}

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "msgspec_core=trace")
    pub level: String,
    /// Whether to emit JSON lines
    pub json_format: bool,
    /// Whether to enable pretty formatting with colors
    pub pretty_format: bool,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_format: false,
            file_path: None,
            include_targets: false,
        }
    }
}

impl LoggingConfig {
    /// Builds the filter, falling back to `info` when the directive is invalid.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the tracing subscriber with the given configuration
///
/// # Errors
///
/// Returns [`LoggingError`] when the log file cannot be opened or a global
/// subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    let file = match &config.file_path {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::LogFile {
                    path: path.clone(),
                    source,
                })?,
        ),
        None => None,
    };

    let result = if config.json_format {
        let layer = fmt::layer().json().with_target(config.include_targets);
        match file {
            Some(file) => registry.with(layer.with_writer(Mutex::new(file))).try_init(),
            None => registry.with(layer.with_writer(std::io::stderr)).try_init(),
        }
    } else if config.pretty_format {
        let layer = fmt::layer().pretty().with_target(config.include_targets);
        match file {
            Some(file) => registry
                .with(layer.with_ansi(false).with_writer(Mutex::new(file)))
                .try_init(),
            None => registry.with(layer.with_writer(std::io::stderr)).try_init(),
        }
    } else {
        let layer = fmt::layer().with_target(config.include_targets);
        match file {
            Some(file) => registry
                .with(layer.with_ansi(false).with_writer(Mutex::new(file)))
                .try_init(),
            None => registry.with(layer.with_writer(std::io::stderr)).try_init(),
        }
    };

    result.map_err(|e| LoggingError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(!config.pretty_format);
        assert!(config.file_path.is_none());
        assert!(!config.include_targets);
    }

    #[test]
    fn test_unwritable_log_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            file_path: Some(dir.path().join("missing/dir/out.log").display().to_string()),
            ..LoggingConfig::default()
        };
        assert!(matches!(
            init_logging(&config),
            Err(LoggingError::LogFile { .. })
        ));
    }
}
