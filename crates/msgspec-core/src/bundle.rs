//! Bundle identity: base name, key prefix, locales and resource roots.

use crate::error::{BundleError, BundleResult};
use crate::locale::LocaleTag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Which resource root wins when several define the same key for a locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverridePolicy {
    /// Later roots override earlier ones key by key.
    #[default]
    LastRootWins,
    /// The first root defining a key keeps it.
    FirstRootWins,
}

/// A named group of localized message templates sharing one key namespace.
///
/// Immutable once built; construct it through [`Bundle::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    name: String,
    key_prefix: String,
    main_locale: LocaleTag,
    locales: BTreeSet<LocaleTag>,
    roots: Vec<PathBuf>,
    override_policy: OverridePolicy,
}

impl Bundle {
    /// Starts a bundle definition for the given base name.
    pub fn builder(name: impl Into<String>) -> BundleBuilder {
        BundleBuilder::new(name)
    }

    /// Base name, e.g. `messages` or `i18n.messages`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized key prefix (empty, or ending with `.`).
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// The canonical locale.
    #[must_use]
    pub const fn main_locale(&self) -> &LocaleTag {
        &self.main_locale
    }

    /// Every tracked locale, main included, in tag order.
    #[must_use]
    pub const fn locales(&self) -> &BTreeSet<LocaleTag> {
        &self.locales
    }

    /// Tracked locales other than the main one, in tag order.
    pub fn secondary_locales(&self) -> impl Iterator<Item = &LocaleTag> {
        self.locales.iter().filter(move |l| **l != self.main_locale)
    }

    /// Resource roots in search order.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Precedence between roots.
    #[must_use]
    pub const fn override_policy(&self) -> OverridePolicy {
        self.override_policy
    }

    /// File name of a locale's resource, relative to a root.
    ///
    /// Dots in the base name are package separators:
    /// `i18n.messages` + `fr-FR` gives `i18n/messages_fr_FR.properties`.
    #[must_use]
    pub fn resource_file(&self, locale: &LocaleTag) -> PathBuf {
        let mut parts: Vec<&str> = self.name.split('.').collect();
        let stem = parts.pop().unwrap_or_default();
        let suffix = locale.resource_suffix();
        let file = if suffix.is_empty() {
            format!("{stem}.properties")
        } else {
            format!("{stem}_{suffix}.properties")
        };
        let mut path: PathBuf = parts.iter().collect();
        path.push(file);
        path
    }

    /// Full path of a locale's resource under `root`.
    #[must_use]
    pub fn resource_path(&self, root: &Path, locale: &LocaleTag) -> PathBuf {
        root.join(self.resource_file(locale))
    }

    /// Strips the key prefix, returning `None` for out-of-scope keys.
    #[must_use]
    pub fn strip_prefix<'k>(&self, key: &'k str) -> Option<&'k str> {
        key.strip_prefix(self.key_prefix.as_str())
            .filter(|rest| !rest.is_empty())
    }

    /// Appends a trailing `.` to a non-empty prefix that lacks one.
    #[must_use]
    pub fn normalize_prefix(prefix: &str) -> String {
        let prefix = prefix.trim();
        if prefix.is_empty() || prefix.ends_with('.') {
            prefix.to_string()
        } else {
            format!("{prefix}.")
        }
    }
}

/// Builder for [`Bundle`]
#[derive(Debug, Clone, Default)]
pub struct BundleBuilder {
    name: String,
    key_prefix: String,
    main_locale: Option<String>,
    locales: Vec<String>,
    roots: Vec<PathBuf>,
    override_policy: OverridePolicy,
}

impl BundleBuilder {
    /// Creates a builder for the given base name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the key prefix; a missing trailing `.` is added.
    #[must_use]
    pub fn key_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.key_prefix = Bundle::normalize_prefix(prefix.as_ref());
        self
    }

    /// Sets the canonical locale tag.
    #[must_use]
    pub fn main_locale(mut self, tag: impl Into<String>) -> Self {
        self.main_locale = Some(tag.into());
        self
    }

    /// Tracks an additional locale tag.
    #[must_use]
    pub fn locale(mut self, tag: impl Into<String>) -> Self {
        self.locales.push(tag.into());
        self
    }

    /// Tracks several additional locale tags.
    #[must_use]
    pub fn locales<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Appends a resource root.
    #[must_use]
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Appends several resource roots, keeping their order.
    #[must_use]
    pub fn roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots.extend(roots.into_iter().map(Into::into));
        self
    }

    /// Sets the precedence between roots.
    #[must_use]
    pub const fn override_policy(mut self, policy: OverridePolicy) -> Self {
        self.override_policy = policy;
        self
    }

    /// Validates and freezes the definition.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::InvalidBundle`] for an empty name, a missing main
    /// locale or an empty root list, and [`BundleError::InvalidLocale`] for a
    /// malformed tag.
    pub fn build(self) -> BundleResult<Bundle> {
        let name = self.name.trim().to_string();
        if name.is_empty() || name.split('.').any(str::is_empty) {
            return Err(BundleError::InvalidBundle(format!(
                "invalid bundle base name '{}'",
                self.name
            )));
        }
        let main_tag = self
            .main_locale
            .ok_or_else(|| BundleError::InvalidBundle("main locale is not set".to_string()))?;
        if self.roots.is_empty() {
            return Err(BundleError::InvalidBundle(
                "at least one resource root is required".to_string(),
            ));
        }

        let main_locale = LocaleTag::parse(&main_tag)?;
        let mut locales = BTreeSet::new();
        locales.insert(main_locale.clone());
        for tag in &self.locales {
            locales.insert(LocaleTag::parse(tag)?);
        }

        Ok(Bundle {
            name,
            key_prefix: self.key_prefix,
            main_locale,
            locales,
            roots: self.roots,
            override_policy: self.override_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(name: &str) -> Bundle {
        Bundle::builder(name)
            .key_prefix("app.msg")
            .main_locale("en-GB")
            .locales(["fr-FR", "de-DE", "en-GB"])
            .root("res")
            .build()
            .unwrap()
    }

    #[test]
    fn test_prefix_normalization() {
        assert_eq!(Bundle::normalize_prefix("app.msg"), "app.msg.");
        assert_eq!(Bundle::normalize_prefix("app.msg."), "app.msg.");
        assert_eq!(Bundle::normalize_prefix(""), "");
    }

    #[test]
    fn test_main_locale_is_tracked_once() {
        let b = bundle("messages");
        let tags: Vec<&str> = b.locales().iter().map(LocaleTag::as_str).collect();
        assert_eq!(tags, vec!["de-DE", "en-GB", "fr-FR"]);
        let secondary: Vec<&str> = b.secondary_locales().map(LocaleTag::as_str).collect();
        assert_eq!(secondary, vec!["de-DE", "fr-FR"]);
    }

    #[test]
    fn test_resource_file_naming() {
        let b = bundle("i18n.messages");
        let fr = LocaleTag::parse("fr-FR").unwrap();
        assert_eq!(
            b.resource_file(&fr),
            Path::new("i18n").join("messages_fr_FR.properties")
        );
        let und = LocaleTag::parse("und").unwrap();
        assert_eq!(b.resource_file(&und), Path::new("i18n").join("messages.properties"));
    }

    #[test]
    fn test_strip_prefix() {
        let b = bundle("messages");
        assert_eq!(b.strip_prefix("app.msg.greeting"), Some("greeting"));
        assert_eq!(b.strip_prefix("app.msg."), None);
        assert_eq!(b.strip_prefix("other.greeting"), None);
    }

    #[test]
    fn test_build_rejects_incomplete_definitions() {
        assert!(Bundle::builder("").main_locale("en").root("r").build().is_err());
        assert!(Bundle::builder("m").root("r").build().is_err());
        assert!(Bundle::builder("m").main_locale("en").build().is_err());
        assert!(matches!(
            Bundle::builder("m").main_locale("en").locale("??").root("r").build(),
            Err(BundleError::InvalidLocale { .. })
        ));
    }
}
