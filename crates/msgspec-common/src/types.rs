//! Common type definitions shared by the validation and generation front ends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity policy applied to the recoverable validation errors of a run.
///
/// The validation core only classifies problems; callers pick one of these
/// modes to decide whether a non-empty error list fails the operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Every recoverable error is reported as a warning, regardless of count.
    WarnOnly,
    /// Any recoverable error fails the operation.
    #[default]
    Strict,
}

impl ValidationMode {
    /// Maps the classic `warnOnly` switch onto a mode.
    #[must_use]
    pub const fn from_warn_only(warn_only: bool) -> Self {
        if warn_only {
            Self::WarnOnly
        } else {
            Self::Strict
        }
    }

    /// Returns `true` when `error_count` errors must fail the operation.
    #[must_use]
    pub const fn fails_on(self, error_count: usize) -> bool {
        match self {
            Self::WarnOnly => false,
            Self::Strict => error_count > 0,
        }
    }

    /// Applies the policy to a run's error list.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailed`] when the mode fails on `errors`.
    pub fn gate<T>(self, errors: &[T]) -> Result<(), ValidationFailed> {
        if self.fails_on(errors.len()) {
            Err(ValidationFailed {
                count: errors.len(),
            })
        } else {
            Ok(())
        }
    }

    /// Level at which individual errors are reported under this mode.
    #[must_use]
    pub const fn report_level(self) -> tracing::Level {
        match self {
            Self::WarnOnly => tracing::Level::WARN,
            Self::Strict => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WarnOnly => write!(f, "warn-only"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// A strict run found recoverable errors.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("validation failed with {count} error(s)")]
pub struct ValidationFailed {
    /// Number of errors found.
    pub count: usize,
}

/// Error returned when a validation mode name is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown validation mode '{0}', expected 'warn-only' or 'strict'")]
pub struct UnknownModeError(pub String);

impl FromStr for ValidationMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn-only" | "warn_only" | "warn" => Ok(Self::WarnOnly),
            "strict" => Ok(Self::Strict),
            other => Err(UnknownModeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_only_never_fails() {
        assert!(!ValidationMode::WarnOnly.fails_on(0));
        assert!(!ValidationMode::WarnOnly.fails_on(42));
    }

    #[test]
    fn test_strict_fails_on_any_error() {
        assert!(!ValidationMode::Strict.fails_on(0));
        assert!(ValidationMode::Strict.fails_on(1));
    }

    #[test]
    fn test_gate() {
        let errors = ["a", "b"];
        assert_eq!(ValidationMode::WarnOnly.gate(&errors), Ok(()));
        assert_eq!(
            ValidationMode::Strict.gate(&errors),
            Err(ValidationFailed { count: 2 })
        );
        assert_eq!(ValidationMode::Strict.gate::<&str>(&[]), Ok(()));
    }

    #[test]
    fn test_from_warn_only() {
        assert_eq!(ValidationMode::from_warn_only(true), ValidationMode::WarnOnly);
        assert_eq!(ValidationMode::from_warn_only(false), ValidationMode::Strict);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("warn-only".parse::<ValidationMode>(), Ok(ValidationMode::WarnOnly));
        assert_eq!(" STRICT ".parse::<ValidationMode>(), Ok(ValidationMode::Strict));
        assert!("lenient".parse::<ValidationMode>().is_err());
        assert_eq!(ValidationMode::WarnOnly.to_string(), "warn-only");
    }

    #[test]
    fn test_serde_names() {
        let mode: ValidationMode = serde_yaml::from_str("warn_only").unwrap();
        assert_eq!(mode, ValidationMode::WarnOnly);
        assert_eq!(serde_yaml::to_string(&ValidationMode::Strict).unwrap().trim(), "strict");
    }
}
