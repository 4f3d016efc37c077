//! Locale tags and their resource naming.

use crate::error::{BundleError, BundleResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A parsed BCP-47 style language tag.
///
/// Tags compare and sort by their canonical text (`en-GB`, `fr-FR`), which is
/// the order the validator walks locales in.
#[derive(Debug, Clone)]
pub struct LocaleTag {
    id: LanguageIdentifier,
    tag: String,
}

impl LocaleTag {
    /// Parses a tag such as `fr-FR`, `en_GB` or `de`.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::InvalidLocale`] when the tag is not well formed.
    pub fn parse(tag: &str) -> BundleResult<Self> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(BundleError::InvalidLocale {
                tag: tag.to_string(),
                reason: "empty tag".to_string(),
            });
        }
        let id = trimmed
            .parse::<LanguageIdentifier>()
            .map_err(|e| BundleError::InvalidLocale {
                tag: tag.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_identifier(id))
    }

    /// Wraps an already parsed identifier.
    #[must_use]
    pub fn from_identifier(id: LanguageIdentifier) -> Self {
        let tag = id.to_string();
        Self { id, tag }
    }

    /// Canonical tag text, e.g. `fr-FR`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.tag
    }

    /// Primary language subtag, e.g. `fr`.
    #[must_use]
    pub fn language(&self) -> &str {
        self.id.language.as_str()
    }

    /// Region subtag, if any.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.id.region.as_ref().map(|r| r.as_str())
    }

    /// Underlying language identifier.
    #[must_use]
    pub const fn identifier(&self) -> &LanguageIdentifier {
        &self.id
    }

    /// Suffix used in resource file names: `fr_FR`, `de`, `en_US_posix`.
    ///
    /// The undetermined language (`und`) has an empty suffix and maps to the
    /// bundle's base file.
    #[must_use]
    pub fn resource_suffix(&self) -> String {
        let language = self.language();
        if language == "und" {
            return String::new();
        }
        let mut suffix = language.to_string();
        if let Some(region) = self.region() {
            suffix.push('_');
            suffix.push_str(region);
        }
        for variant in self.id.variants() {
            suffix.push('_');
            suffix.push_str(variant.as_str());
        }
        suffix
    }

    /// Whether both tags share the primary language.
    #[must_use]
    pub fn same_language(&self, other: &Self) -> bool {
        self.language() == other.language()
    }
}

impl FromStr for LocaleTag {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl PartialEq for LocaleTag {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for LocaleTag {}

impl Hash for LocaleTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
    }
}

impl PartialOrd for LocaleTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocaleTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tag.cmp(&other.tag)
    }
}

impl Serialize for LocaleTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag)
    }
}

impl<'de> Deserialize<'de> for LocaleTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
