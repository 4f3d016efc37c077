//! # msgspec Sample
//!
//! Message accessors generated at build time from the bundle under
//! `resources/`, plus a small helper showing how they are called.
//!
//! ```rust
//! use msgspec_sample::messages::GREETING;
//! use msgspec_sample::LocaleTag;
//!
//! let de = LocaleTag::parse("de-DE").unwrap();
//! assert_eq!(GREETING.format().arg0("Ada").with_locale(&de), "Hallo Ada!");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

include!(concat!(env!("OUT_DIR"), "/sample_messages.rs"));

pub use msgspec_runtime::LocaleTag;

/// One-line inbox status for `user`, e.g. `Ada, you have 3 messages.`
#[must_use]
pub fn inbox_line(locale: &LocaleTag, user: &str, unread: u32) -> String {
    messages::INBOX_SUMMARY
        .format()
        .arg0(user)
        .arg1(unread)
        .with_locale(locale)
}
