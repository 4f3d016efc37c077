//! # msgspec CLI
//!
//! Command line front end: `msgspec validate` checks a bundle against the
//! configured severity policy, `msgspec generate` validates and writes the
//! typed accessor source.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod args;
pub mod commands;
pub mod error;

pub use args::*;
pub use commands::*;
pub use error::*;
