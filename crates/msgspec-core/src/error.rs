//! Fatal error types for bundle loading.
//!
//! Structural problems between locales are never raised through these types;
//! they are collected as [`crate::MsgSpecError`] records instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a loading or validation run
#[derive(Error, Debug)]
pub enum BundleError {
    /// A language tag could not be parsed
    #[error("Invalid locale tag '{tag}': {reason}")]
    InvalidLocale {
        /// The rejected tag.
        tag: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The bundle description is incomplete or inconsistent
    #[error("Invalid bundle definition: {0}")]
    InvalidBundle(String),

    /// The main locale's resource file exists in none of the roots
    #[error("Resource '{file}' for main locale {locale} of bundle '{bundle}' not found in any of {roots:?}")]
    ResourceNotFound {
        /// Bundle base name.
        bundle: String,
        /// Main locale tag.
        locale: String,
        /// Expected file name relative to each root.
        file: String,
        /// Roots that were searched, in order.
        roots: Vec<PathBuf>,
    },

    /// The main locale defines no key carrying the configured prefix
    #[error("No key with prefix '{prefix}' found for main locale {locale}")]
    NoKeysInScope {
        /// Configured key prefix.
        prefix: String,
        /// Main locale tag.
        locale: String,
    },

    /// A located resource file could not be read
    #[error("Failed to read resource file {path}: {source}")]
    Io {
        /// Path of the resource file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for bundle operations
pub type BundleResult<T> = Result<T, BundleError>;
