//! # msgspec Common
//!
//! Shared types, logging setup and test utilities for msgspec.
//!
//! This crate provides the foundational pieces used across all other
//! crates in the msgspec workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use types::*;
