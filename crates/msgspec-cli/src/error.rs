//! Application-wide error types using thiserror.

use msgspec_codegen::CodegenError;
use msgspec_common::{LoggingError, ValidationFailed};
use msgspec_config::ConfigError;
use msgspec_core::BundleError;
use std::path::PathBuf;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Fatal bundle error.
    #[error(transparent)]
    Bundle(#[from] BundleError),

    /// Generator error.
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    /// Logging could not be set up.
    #[error(transparent)]
    Logging(#[from] LoggingError),

    /// Strict mode and a non-empty error list.
    #[error(transparent)]
    ValidationFailed(#[from] ValidationFailed),

    /// Report serialization error.
    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),

    /// I/O error on an output file.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the command line front end.
pub type CliResult<T> = Result<T, CliError>;
