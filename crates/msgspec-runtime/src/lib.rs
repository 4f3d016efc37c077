//! # msgspec Runtime
//!
//! Formatting support for accessors generated by `msgspec-codegen`.
//!
//! Templates use the same placeholder grammar the validator checks. Numbers
//! and dates are rendered with per-language conventions: decimal and grouping
//! separators, currency placement, date ordering and month/day names.
//! [`parse_message`] reads a formatted message back into its arguments.
//!
//! # Example
//!
//! ```rust
//! use msgspec_runtime::{format_message, LocaleTag, MessageArg};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let locale = LocaleTag::parse("de-DE")?;
//! let text = format_message(
//!     "{0} hat {1,number} Punkte",
//!     &locale,
//!     &[MessageArg::from("Alex"), MessageArg::from(1234.5)],
//! )?;
//! assert_eq!(text, "Alex hat 1.234,5 Punkte");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod arg;
pub mod choice;
pub mod date;
pub mod error;
pub mod format;
pub mod number;
pub mod parse;
pub mod symbols;

pub use arg::{DateTimeValue, MessageArg, Number};
pub use error::{FormatError, FormatResult};
pub use format::{format_message, render, resolve_template};
pub use parse::{parse, parse_message};
pub use msgspec_core::LocaleTag;
pub use symbols::LocaleSymbols;
