//! Cross-locale signature validation.
//!
//! The main locale's template is canonical for every key. Secondary locales
//! are folded over it in tag order: untyped canonical entries take the first
//! concrete type a locale declares, and any other deviation is recorded as a
//! [`MsgSpecError`].

use crate::bundle::Bundle;
use crate::locale::LocaleTag;
use crate::resource::LocaleMessageMap;
use crate::specs::{ErrorKind, MsgSpec, MsgSpecError, MsgSpecs, SpecsAccumulator};
use crate::template::{parse_signature, MessageSignature};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Validates loaded locale maps against the bundle's main locale.
#[derive(Debug, Clone, Copy)]
pub struct SignatureValidator<'a> {
    bundle: &'a Bundle,
}

impl<'a> SignatureValidator<'a> {
    /// Creates a validator for `bundle`.
    #[must_use]
    pub const fn new(bundle: &'a Bundle) -> Self {
        Self { bundle }
    }

    /// Runs the validation.
    ///
    /// Locales missing from `maps` are treated as empty. Never fails: every
    /// problem ends up in [`MsgSpecs::errors`].
    #[must_use]
    pub fn validate(&self, maps: &BTreeMap<LocaleTag, LocaleMessageMap>) -> MsgSpecs {
        let main = self.bundle.main_locale();
        let empty_main = LocaleMessageMap::from_messages(main.clone(), Vec::<(String, String)>::new());
        let main_map = maps.get(main).unwrap_or(&empty_main);

        let secondaries: Vec<(&LocaleTag, Option<&LocaleMessageMap>)> = self
            .bundle
            .secondary_locales()
            .map(|locale| (locale, maps.get(locale)))
            .collect();

        let mut acc = SpecsAccumulator::new(
            self.bundle.name(),
            self.bundle.key_prefix(),
            main.clone(),
            self.bundle.locales().clone(),
        );

        for (key, main_template) in main_map.iter() {
            let mut templates = BTreeMap::new();
            templates.insert(main.clone(), main_template.to_string());

            let mut canonical = match parse_signature(main_template) {
                Ok(signature) => Some(signature),
                Err(e) => {
                    acc.push_error(MsgSpecError::new(
                        key,
                        Some(main.clone()),
                        ErrorKind::ParseError,
                        e.to_string(),
                    ));
                    None
                }
            };

            for (locale, map) in &secondaries {
                let Some(template) = map.and_then(|m| m.get(key)) else {
                    acc.push_error(MsgSpecError::new(
                        key,
                        Some((*locale).clone()),
                        ErrorKind::MissingKey,
                        format!("key is not defined for locale {locale}"),
                    ));
                    continue;
                };
                templates.insert((*locale).clone(), template.to_string());

                let candidate = match parse_signature(template) {
                    Ok(signature) => signature,
                    Err(e) => {
                        acc.push_error(MsgSpecError::new(
                            key,
                            Some((*locale).clone()),
                            ErrorKind::ParseError,
                            e.to_string(),
                        ));
                        continue;
                    }
                };

                if let Some(canonical) = canonical.as_mut() {
                    compare(key, locale, canonical, &candidate, &mut acc);
                }
            }

            if let Some(signature) = &canonical {
                debug!("Signature for {}: {}", key, signature);
            }
            acc.push_spec(MsgSpec {
                key: key.to_string(),
                signature: canonical,
                templates,
            });
        }

        for (locale, map) in &secondaries {
            let Some(map) = map else { continue };
            for key in map.keys().filter(|key| !main_map.contains_key(key)) {
                acc.push_error(MsgSpecError::new(
                    key,
                    Some((*locale).clone()),
                    ErrorKind::ExtraKey,
                    format!("key is not defined for main locale {main}"),
                ));
            }
        }

        let specs = acc.finish();
        info!(
            "Validated {} keys across {} locales: {} errors",
            specs.len(),
            specs.locales().len(),
            specs.errors().len()
        );
        specs
    }
}

/// Compares one secondary signature with the canonical one, refining
/// untyped canonical entries in place.
fn compare(
    key: &str,
    locale: &LocaleTag,
    canonical: &mut MessageSignature,
    candidate: &MessageSignature,
    acc: &mut SpecsAccumulator,
) {
    if canonical.len() != candidate.len() {
        acc.push_error(MsgSpecError::new(
            key,
            Some(locale.clone()),
            ErrorKind::ArgCountMismatch,
            format!(
                "expected {} args, found {}",
                canonical.len(),
                candidate.len()
            ),
        ));
        return;
    }

    for arg in candidate.iter() {
        let Some(expected) = canonical.get(arg.index) else {
            continue;
        };
        if !arg.arg_type.is_concrete() || expected == arg.arg_type {
            continue;
        }
        if canonical.refine(arg.index, arg.arg_type) {
            debug!(
                "Refined argument {} of {} to {} from locale {}",
                arg.index, key, arg.arg_type, locale
            );
        } else {
            acc.push_error(MsgSpecError::new(
                key,
                Some(locale.clone()),
                ErrorKind::ArgTypeMismatch,
                format!(
                    "argument {}: expected {}, found {}",
                    arg.index, expected, arg.arg_type
                ),
            ));
        }
    }
}
