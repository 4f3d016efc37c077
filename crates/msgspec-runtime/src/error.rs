//! Errors raised while formatting or parsing a message.

use msgspec_core::TemplateError;
use thiserror::Error;

/// Reasons a template cannot be formatted or parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The template itself is malformed
    #[error("malformed template: {0}")]
    Template(#[from] TemplateError),

    /// An argument has a kind its placeholder cannot format
    #[error("argument {index} must be a {expected} value, got {found}")]
    ArgumentKind {
        /// Argument index.
        index: usize,
        /// Kind required by the placeholder.
        expected: &'static str,
        /// Kind that was supplied.
        found: &'static str,
    },

    /// A decimal pattern could not be parsed
    #[error("invalid number pattern '{0}'")]
    NumberPattern(String),

    /// A date pattern uses an unsupported letter or is unbalanced
    #[error("invalid date pattern '{pattern}': {reason}")]
    DatePattern {
        /// The offending pattern.
        pattern: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A choice subpattern could not be parsed
    #[error("invalid choice pattern '{0}'")]
    ChoicePattern(String),

    /// Text does not match the template it is parsed against
    #[error("cannot parse '{text}': {reason}")]
    Unparseable {
        /// The text being parsed.
        text: String,
        /// Where matching failed.
        reason: String,
    },

    /// No template is available for the requested locale
    #[error("no template available for locale {0}")]
    NoTemplate(String),
}

impl FormatError {
    pub(crate) fn unparseable(text: &str, reason: impl Into<String>) -> Self {
        Self::Unparseable {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for formatting operations
pub type FormatResult<T> = Result<T, FormatError>;
