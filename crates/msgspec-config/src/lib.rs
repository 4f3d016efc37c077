//! # msgspec Config
//!
//! Configuration for the msgspec front ends.
//!
//! A YAML file describes the bundle, the severity policy, the generator
//! options and logging. `MSGSPEC_*` environment variables override individual
//! values, and the merged result is validated before use.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::*;
pub use schema::*;
