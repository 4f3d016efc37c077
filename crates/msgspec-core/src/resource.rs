//! Resource loading for `.properties` bundles.
//!
//! Each locale's file is looked up in every resource root, in order. Found
//! files are merged key by key according to the bundle's [`OverridePolicy`];
//! only keys carrying the bundle prefix are kept, with the prefix removed.

use crate::bundle::{Bundle, OverridePolicy};
use crate::error::{BundleError, BundleResult};
use crate::locale::LocaleTag;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Key → raw template text for one locale, built once and read-only after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleMessageMap {
    locale: LocaleTag,
    messages: BTreeMap<String, String>,
    sources: Vec<PathBuf>,
}

impl LocaleMessageMap {
    /// Builds a map from already prefix-stripped entries.
    pub fn from_messages<I, K, V>(locale: LocaleTag, messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            locale,
            messages: messages
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            sources: Vec::new(),
        }
    }

    /// Locale of this map.
    #[must_use]
    pub const fn locale(&self) -> &LocaleTag {
        &self.locale
    }

    /// Template for a prefix-stripped key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Whether the key is defined.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// Keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Entries in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of keys in scope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether no key is in scope.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Files that contributed to this map, in root order.
    #[must_use]
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Whether a resource file was found in at least one root.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.sources.is_empty()
    }
}

/// Loads [`LocaleMessageMap`]s for the locales of a [`Bundle`].
#[derive(Debug, Clone, Copy)]
pub struct ResourceLoader<'a> {
    bundle: &'a Bundle,
}

impl<'a> ResourceLoader<'a> {
    /// Creates a loader for the given bundle.
    #[must_use]
    pub const fn new(bundle: &'a Bundle) -> Self {
        Self { bundle }
    }

    /// Loads one locale across all roots.
    ///
    /// A locale with no file in any root yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Io`] when a located file cannot be read.
    pub fn load_locale(&self, locale: &LocaleTag) -> BundleResult<LocaleMessageMap> {
        let mut map = LocaleMessageMap::from_messages(locale.clone(), Vec::<(String, String)>::new());

        for root in self.bundle.roots() {
            let path = self.bundle.resource_path(root, locale);
            let Some(content) = read_resource(&path)? else {
                continue;
            };
            debug!("Loading resource file: {:?}", path);

            let mut file_messages = BTreeMap::new();
            for (key, value) in parse_properties(&content) {
                let Some(stripped) = self.bundle.strip_prefix(&key) else {
                    continue;
                };
                if file_messages.insert(stripped.to_string(), value).is_some() {
                    warn!("Duplicate definition for: {} in locale {} ({:?})", key, locale, path);
                }
            }

            match self.bundle.override_policy() {
                OverridePolicy::LastRootWins => map.messages.extend(file_messages),
                OverridePolicy::FirstRootWins => {
                    for (key, value) in file_messages {
                        map.messages.entry(key).or_insert(value);
                    }
                }
            }
            map.sources.push(path);
        }

        debug!("Locale {} has {} keys in scope", locale, map.len());
        Ok(map)
    }

    /// Loads every tracked locale, main locale first.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::ResourceNotFound`] when the main locale has no
    /// file in any root, [`BundleError::NoKeysInScope`] when it has no key
    /// with the bundle prefix, and [`BundleError::Io`] on read failures.
    pub fn load_all(&self) -> BundleResult<BTreeMap<LocaleTag, LocaleMessageMap>> {
        let main = self.bundle.main_locale();
        let main_map = self.load_locale(main)?;

        if !main_map.is_present() {
            return Err(BundleError::ResourceNotFound {
                bundle: self.bundle.name().to_string(),
                locale: main.to_string(),
                file: self.bundle.resource_file(main).display().to_string(),
                roots: self.bundle.roots().to_vec(),
            });
        }
        if main_map.is_empty() {
            return Err(BundleError::NoKeysInScope {
                prefix: self.bundle.key_prefix().to_string(),
                locale: main.to_string(),
            });
        }

        let mut maps = BTreeMap::new();
        maps.insert(main.clone(), main_map);

        for locale in self.bundle.secondary_locales() {
            let map = self.load_locale(locale)?;
            if !map.is_present() {
                warn!(
                    "No resource file for locale {} of bundle '{}'",
                    locale,
                    self.bundle.name()
                );
            }
            maps.insert(locale.clone(), map);
        }

        info!(
            "Loaded {} locales for bundle '{}'",
            maps.len(),
            self.bundle.name()
        );
        Ok(maps)
    }
}

/// Reads a resource file as UTF-8, mapping "not found" to `None`.
fn read_resource(path: &Path) -> BundleResult<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| BundleError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidData, e),
            }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(BundleError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parses a `.properties` document into its entries, in file order.
///
/// Duplicate keys are all returned; callers decide which one wins.
#[must_use]
pub fn parse_properties(content: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(raw) = lines.next() {
        let line = raw.trim_start_matches(is_blank);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        entries.push(split_entry(&logical));
    }

    entries
}

const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Splits a logical line at the first unescaped `=`, `:` or blank.
fn split_entry(line: &str) -> (String, String) {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    let mut key_end = len;
    let mut value_start = len;
    let mut explicit_separator = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' {
            key_end = i;
            value_start = i + 1;
            explicit_separator = true;
            break;
        } else if is_blank(c) {
            key_end = i;
            value_start = i + 1;
            break;
        }
    }

    let mut start = value_start;
    while start < len && is_blank(chars[start]) {
        start += 1;
    }
    if !explicit_separator && start < len && (chars[start] == '=' || chars[start] == ':') {
        start += 1;
        while start < len && is_blank(chars[start]) {
            start += 1;
        }
    }

    (unescape(&chars[..key_end]), unescape(&chars[start.min(len)..]))
}

fn unescape(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&escaped) = chars.get(i) else {
            break;
        };
        i += 1;
        match escaped {
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{c}'),
            'u' => match hex_unit(chars, i) {
                Some(high @ 0xD800..=0xDBFF) => {
                    let low = (chars.get(i + 4) == Some(&'\\') && chars.get(i + 5) == Some(&'u'))
                        .then(|| hex_unit(chars, i + 6))
                        .flatten()
                        .filter(|low| (0xDC00..=0xDFFF).contains(low));
                    if let Some(low) = low {
                        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                        out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                        i += 10;
                    } else {
                        out.push(char::REPLACEMENT_CHARACTER);
                        i += 4;
                    }
                }
                Some(unit) => {
                    out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
                    i += 4;
                }
                None => out.push('u'),
            },
            other => out.push(other),
        }
    }

    out
}

/// Reads four hex digits starting at `at`.
fn hex_unit(chars: &[char], at: usize) -> Option<u32> {
    let digits = chars.get(at..at + 4)?;
    digits
        .iter()
        .try_fold(0u32, |acc, c| c.to_digit(16).map(|d| acc * 16 + d))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(content: &str) -> Vec<(String, String)> {
        parse_properties(content)
    }

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_separators() {
        assert_eq!(
            entries("a=1\nb: 2\nc 3\nd = 4\ne\t:\t5\n"),
            vec![pair("a", "1"), pair("b", "2"), pair("c", "3"), pair("d", "4"), pair("e", "5")]
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        assert_eq!(
            entries("# comment\n! other comment\n\n   \n  key=value\n"),
            vec![pair("key", "value")]
        );
    }

    #[test]
    fn test_key_without_value() {
        assert_eq!(entries("lonely\n"), vec![pair("lonely", "")]);
    }

    #[test]
    fn test_line_continuation() {
        assert_eq!(
            entries("long=first \\\n     second \\\n  third\nnext=x\n"),
            vec![pair("long", "first second third"), pair("next", "x")]
        );
    }

    #[test]
    fn test_even_backslashes_do_not_continue() {
        assert_eq!(
            entries("path=C:\\\\\nnext=x\n"),
            vec![pair("path", "C:\\"), pair("next", "x")]
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            entries("a\\=b=c\\:d\nk=tab\\there\\nnew\nu=caf\\u00e9\nsmile=\\uD83D\\uDE00\n"),
            vec![
                pair("a=b", "c:d"),
                pair("k", "tab\there\nnew"),
                pair("u", "café"),
                pair("smile", "\u{1F600}"),
            ]
        );
    }

    #[test]
    fn test_braces_and_quotes_are_kept_verbatim() {
        assert_eq!(
            entries("app.msg.quote=It''s {0} o'clock\n"),
            vec![pair("app.msg.quote", "It''s {0} o'clock")]
        );
    }

    #[test]
    fn test_duplicates_are_all_returned() {
        assert_eq!(entries("a=1\na=2\n"), vec![pair("a", "1"), pair("a", "2")]);
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(entries("a=1\r\nb=2\r\n"), vec![pair("a", "1"), pair("b", "2")]);
    }
}
