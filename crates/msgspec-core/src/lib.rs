//! # msgspec Core
//!
//! Loading, parsing and cross-locale validation of localized message bundles.
//!
//! A bundle is a family of `.properties` files, one per locale, sharing a key
//! namespace. The main locale is canonical: every other locale must define the
//! same keys with templates whose placeholders agree with the main template's
//! argument signature. Problems are collected as [`MsgSpecError`] records; only
//! missing or unreadable resources abort a run.
//!
//! # Example
//!
//! ```rust,no_run
//! use msgspec_core::{load_and_validate, Bundle};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bundle = Bundle::builder("messages")
//!     .key_prefix("app.msg")
//!     .main_locale("en-GB")
//!     .locale("fr-FR")
//!     .root("src/main/resources")
//!     .build()?;
//!
//! let specs = load_and_validate(&bundle)?;
//! for error in specs.errors() {
//!     println!("{error}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bundle;
pub mod error;
pub mod locale;
pub mod resource;
pub mod specs;
pub mod template;
pub mod validator;

pub use bundle::{Bundle, BundleBuilder, OverridePolicy};
pub use error::{BundleError, BundleResult};
pub use locale::LocaleTag;
pub use resource::{parse_properties, LocaleMessageMap, ResourceLoader};
pub use specs::{ErrorKind, MsgSpec, MsgSpecError, MsgSpecs};
pub use template::{
    parse_signature, ArgType, ArgumentSpec, MessageSignature, Placeholder, Segment, Template,
    TemplateError, MAX_ARGUMENT_INDEX,
};
pub use validator::SignatureValidator;

use tracing::info;

/// Runs the loader and the validator for `bundle`.
///
/// # Errors
///
/// Returns a [`BundleError`] when the main locale's resource is missing or has
/// no key in scope, or when a located resource cannot be read. Every other
/// problem is reported through [`MsgSpecs::errors`].
pub fn load_and_validate(bundle: &Bundle) -> BundleResult<MsgSpecs> {
    let maps = ResourceLoader::new(bundle).load_all()?;
    let specs = SignatureValidator::new(bundle).validate(&maps);
    info!(
        bundle = bundle.name(),
        keys = specs.len(),
        errors = specs.errors().len(),
        "Validated bundle"
    );
    Ok(specs)
}
