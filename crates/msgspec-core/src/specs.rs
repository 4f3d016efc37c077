//! Validation results: canonical signatures per key and the structured error
//! list of a run.

use crate::locale::LocaleTag;
use crate::template::MessageSignature;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Classification of a recoverable validation problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The template could not be parsed, or declares an index twice with
    /// different types.
    ParseError,
    /// A secondary locale lacks a key of the main locale.
    MissingKey,
    /// A secondary locale defines a key the main locale does not.
    ExtraKey,
    /// Argument counts differ from the canonical signature.
    ArgCountMismatch,
    /// An argument type differs from the canonical signature.
    ArgTypeMismatch,
}

impl ErrorKind {
    /// Upper-case name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ParseError => "PARSE_ERROR",
            Self::MissingKey => "MISSING_KEY",
            Self::ExtraKey => "EXTRA_KEY",
            Self::ArgCountMismatch => "ARG_COUNT_MISMATCH",
            Self::ArgTypeMismatch => "ARG_TYPE_MISMATCH",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One validation problem. Collected, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSpecError {
    /// Prefix-stripped key.
    pub key: String,
    /// Locale the problem was found in.
    pub locale: Option<LocaleTag>,
    /// Classification.
    pub kind: ErrorKind,
    /// Human-readable detail.
    pub detail: String,
}

impl MsgSpecError {
    /// Creates an error record.
    pub fn new(
        key: impl Into<String>,
        locale: Option<LocaleTag>,
        kind: ErrorKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            locale,
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for MsgSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.locale {
            Some(locale) => write!(f, "{} [{}] {}: {}", self.kind, locale, self.key, self.detail),
            None => write!(f, "{} {}: {}", self.kind, self.key, self.detail),
        }
    }
}

/// Everything known about one key after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MsgSpec {
    /// Prefix-stripped key.
    pub key: String,
    /// Canonical signature, refined by secondary locales; `None` when the
    /// main template did not parse.
    pub signature: Option<MessageSignature>,
    /// Raw templates of every locale defining the key.
    pub templates: BTreeMap<LocaleTag, String>,
}

impl MsgSpec {
    /// Template for `locale`, if that locale defines the key.
    #[must_use]
    pub fn template(&self, locale: &LocaleTag) -> Option<&str> {
        self.templates.get(locale).map(String::as_str)
    }
}

/// The result of a validation run. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MsgSpecs {
    bundle_name: String,
    key_prefix: String,
    main_locale: LocaleTag,
    locales: BTreeSet<LocaleTag>,
    specs: BTreeMap<String, MsgSpec>,
    errors: Vec<MsgSpecError>,
}

impl MsgSpecs {
    /// Base name of the validated bundle.
    #[must_use]
    pub fn bundle_name(&self) -> &str {
        &self.bundle_name
    }

    /// Key prefix that was stripped.
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Canonical locale.
    #[must_use]
    pub const fn main_locale(&self) -> &LocaleTag {
        &self.main_locale
    }

    /// All tracked locales, main included.
    #[must_use]
    pub const fn locales(&self) -> &BTreeSet<LocaleTag> {
        &self.locales
    }

    /// Spec for a prefix-stripped key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MsgSpec> {
        self.specs.get(key)
    }

    /// Canonical signature of a key, if it has one.
    #[must_use]
    pub fn signature(&self, key: &str) -> Option<&MessageSignature> {
        self.specs.get(key).and_then(|spec| spec.signature.as_ref())
    }

    /// Main-locale keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// Specs in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = &MsgSpec> {
        self.specs.values()
    }

    /// Number of main-locale keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether there is no key at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Every error, sorted by key then locale.
    #[must_use]
    pub fn errors(&self) -> &[MsgSpecError] {
        &self.errors
    }

    /// Errors recorded for one key.
    pub fn errors_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a MsgSpecError> {
        self.errors.iter().filter(move |e| e.key == key)
    }

    /// Whether any locale of `key` failed to parse.
    #[must_use]
    pub fn has_parse_error(&self, key: &str) -> bool {
        self.errors_for(key).any(|e| e.kind == ErrorKind::ParseError)
    }

    /// Keys that can be turned into accessors: a canonical signature and no
    /// parse error in any locale.
    pub fn generatable(&self) -> impl Iterator<Item = (&MsgSpec, &MessageSignature)> {
        self.specs.values().filter_map(|spec| {
            let signature = spec.signature.as_ref()?;
            (!self.has_parse_error(&spec.key)).then_some((spec, signature))
        })
    }

    /// Whether the run produced no error.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error counts per kind.
    #[must_use]
    pub fn error_counts(&self) -> BTreeMap<ErrorKind, usize> {
        let mut counts = BTreeMap::new();
        for error in &self.errors {
            *counts.entry(error.kind).or_insert(0) += 1;
        }
        counts
    }
}

/// Collects specs and errors during a run, then freezes them into [`MsgSpecs`].
#[derive(Debug)]
pub(crate) struct SpecsAccumulator {
    specs: MsgSpecs,
}

impl SpecsAccumulator {
    pub(crate) fn new(
        bundle_name: &str,
        key_prefix: &str,
        main_locale: LocaleTag,
        locales: BTreeSet<LocaleTag>,
    ) -> Self {
        Self {
            specs: MsgSpecs {
                bundle_name: bundle_name.to_string(),
                key_prefix: key_prefix.to_string(),
                main_locale,
                locales,
                specs: BTreeMap::new(),
                errors: Vec::new(),
            },
        }
    }

    pub(crate) fn push_spec(&mut self, spec: MsgSpec) {
        self.specs.specs.insert(spec.key.clone(), spec);
    }

    pub(crate) fn push_error(&mut self, error: MsgSpecError) {
        self.specs.errors.push(error);
    }

    /// Sorts errors by key, then locale (`None` first), keeping push order
    /// for ties.
    pub(crate) fn finish(mut self) -> MsgSpecs {
        self.specs
            .errors
            .sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.locale.cmp(&b.locale)));
        self.specs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> LocaleTag {
        LocaleTag::parse(s).unwrap()
    }

    fn accumulator() -> SpecsAccumulator {
        let locales = [tag("en-GB"), tag("fr-FR")].into_iter().collect();
        SpecsAccumulator::new("messages", "app.msg.", tag("en-GB"), locales)
    }

    #[test]
    fn test_error_display() {
        let error = MsgSpecError::new(
            "greeting",
            Some(tag("fr-FR")),
            ErrorKind::ArgCountMismatch,
            "expected 2 args, found 1",
        );
        assert_eq!(
            error.to_string(),
            "ARG_COUNT_MISMATCH [fr-FR] greeting: expected 2 args, found 1"
        );

        let error = MsgSpecError::new("x", None, ErrorKind::ParseError, "bad");
        assert_eq!(error.to_string(), "PARSE_ERROR x: bad");
    }

    #[test]
    fn test_kind_serializes_in_report_form() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::ArgTypeMismatch).unwrap(),
            r#""ARG_TYPE_MISMATCH""#
        );
    }

    #[test]
    fn test_finish_sorts_by_key_then_locale() {
        let mut acc = accumulator();
        acc.push_error(MsgSpecError::new("b", Some(tag("fr-FR")), ErrorKind::MissingKey, "1"));
        acc.push_error(MsgSpecError::new("a", Some(tag("fr-FR")), ErrorKind::ExtraKey, "2"));
        acc.push_error(MsgSpecError::new("b", None, ErrorKind::ParseError, "3"));
        acc.push_error(MsgSpecError::new("a", Some(tag("de-DE")), ErrorKind::MissingKey, "4"));
        acc.push_error(MsgSpecError::new("a", Some(tag("fr-FR")), ErrorKind::ArgCountMismatch, "5"));

        let specs = acc.finish();
        let details: Vec<&str> = specs.errors().iter().map(|e| e.detail.as_str()).collect();
        assert_eq!(details, vec!["4", "2", "5", "3", "1"]);
    }

    #[test]
    fn test_generatable_skips_parse_errors_and_missing_signatures() {
        let mut acc = accumulator();
        for key in ["ok", "broken_fr", "broken_main"] {
            acc.push_spec(MsgSpec {
                key: key.to_string(),
                signature: (key != "broken_main").then(MessageSignature::default),
                templates: BTreeMap::new(),
            });
        }
        acc.push_error(MsgSpecError::new(
            "broken_fr",
            Some(tag("fr-FR")),
            ErrorKind::ParseError,
            "unterminated quote",
        ));
        acc.push_error(MsgSpecError::new(
            "ok",
            Some(tag("fr-FR")),
            ErrorKind::MissingKey,
            "missing",
        ));

        let specs = acc.finish();
        let keys: Vec<&str> = specs.generatable().map(|(spec, _)| spec.key.as_str()).collect();
        assert_eq!(keys, vec!["ok"]);
        assert!(specs.has_parse_error("broken_fr"));
        assert!(!specs.is_clean());
        assert_eq!(specs.error_counts()[&ErrorKind::ParseError], 1);
    }
}
