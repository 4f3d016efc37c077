//! # msgspec Codegen
//!
//! Generates Rust source with one typed accessor per validated message key.
//!
//! For a key `app.msg.greeting` with signature `[UNTYPED, NUMBER]` the output
//! contains a `GREETING` constant of accessor type `Greeting`, whose
//! `format()` returns a `GreetingBuilder` with setters `arg0` and `arg1` and
//! a `with_locale` finalizer. Templates of every locale are embedded; the
//! generated code calls into the runtime crate (`msgspec-runtime` by default)
//! to format them.
//!
//! Output is deterministic: accessors follow lexicographic key order and
//! embedded templates follow locale tag order.
//!
//! # Example
//!
//! ```rust,no_run
//! use msgspec_codegen::{AccessorGenerator, GeneratorOptions};
//! use msgspec_core::{load_and_validate, Bundle};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bundle = Bundle::builder("messages")
//!     .key_prefix("app.msg")
//!     .main_locale("en-GB")
//!     .locale("fr-FR")
//!     .root("resources")
//!     .build()?;
//! let specs = load_and_validate(&bundle)?;
//! let generated = AccessorGenerator::new(GeneratorOptions::default())?.generate(&specs)?;
//! std::fs::write("messages.rs", generated.source())?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod naming;
mod render;

use msgspec_core::{MessageSignature, MsgSpecs};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// Runtime crate path used by generated code unless configured otherwise.
pub const DEFAULT_RUNTIME_PATH: &str = "::msgspec_runtime";

/// Module name used by [`ArtifactShape::Namespace`] unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "messages";

/// Errors raised by the generator
#[derive(Error, Debug)]
pub enum CodegenError {
    /// No key survived filtering
    #[error("No generatable keys in bundle '{bundle}'")]
    EmptyBundle {
        /// Bundle base name.
        bundle: String,
    },

    /// Generator options are unusable
    #[error("Invalid generator options: {0}")]
    InvalidOptions(String),

    /// Writing the source text failed
    #[error("Failed to render generated source: {0}")]
    Fmt(#[from] fmt::Error),
}

/// Layout of the generated artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactShape {
    /// Top-level items, suited to `include!` inside a module.
    Flat,
    /// Items wrapped in `pub mod <namespace>`.
    #[default]
    Namespace,
}

impl std::str::FromStr for ArtifactShape {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "namespace" | "module" => Ok(Self::Namespace),
            other => Err(CodegenError::InvalidOptions(format!(
                "unknown artifact shape '{other}', expected 'flat' or 'namespace'"
            ))),
        }
    }
}

/// Options of an [`AccessorGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Artifact layout.
    pub shape: ArtifactShape,
    /// Module name for [`ArtifactShape::Namespace`].
    pub namespace: String,
    /// Path of the runtime crate in generated code.
    pub runtime_path: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            shape: ArtifactShape::default(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Checks the namespace and runtime path.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::InvalidOptions`] when the runtime path is not a
    /// Rust path, or when the namespace shape has an invalid module name.
    pub fn validate(&self) -> Result<(), CodegenError> {
        if !naming::is_path(&self.runtime_path) {
            return Err(CodegenError::InvalidOptions(format!(
                "runtime path '{}' is not a Rust path",
                self.runtime_path
            )));
        }
        if self.shape == ArtifactShape::Namespace && !naming::is_module_name(&self.namespace) {
            return Err(CodegenError::InvalidOptions(format!(
                "namespace '{}' is not a valid module name",
                self.namespace
            )));
        }
        Ok(())
    }
}

/// A key left out of the generated artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedKey {
    /// Prefix-stripped key.
    pub key: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Result of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    source: String,
    accessors: Vec<String>,
    skipped: Vec<SkippedKey>,
}

impl GeneratedSource {
    /// The generated Rust source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Keys that received an accessor, in emission order.
    #[must_use]
    pub fn accessors(&self) -> &[String] {
        &self.accessors
    }

    /// Keys that were skipped, in key order.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedKey] {
        &self.skipped
    }

    /// Consumes the result, returning the source.
    #[must_use]
    pub fn into_source(self) -> String {
        self.source
    }
}

/// Everything needed to render one accessor.
pub(crate) struct AccessorPlan<'a> {
    pub(crate) key: &'a str,
    pub(crate) full_key: String,
    pub(crate) constant: String,
    pub(crate) type_name: String,
    pub(crate) builder_name: String,
    pub(crate) signature: &'a MessageSignature,
    pub(crate) main_template: &'a str,
    pub(crate) templates: Vec<(&'a str, &'a str)>,
}

/// Turns validated [`MsgSpecs`] into accessor source.
#[derive(Debug, Clone)]
pub struct AccessorGenerator {
    options: GeneratorOptions,
}

impl AccessorGenerator {
    /// Creates a generator after validating `options`.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::InvalidOptions`] for unusable options.
    pub fn new(options: GeneratorOptions) -> Result<Self, CodegenError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The options in use.
    #[must_use]
    pub const fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generates accessors for every generatable key of `specs`.
    ///
    /// Keys with a parse error in any locale, and keys whose constant collides
    /// with an earlier key, are skipped with a warning. Constants, type names
    /// and builder names share one namespace: constants are claimed first, and
    /// a type name that is already taken falls back to `<Type>Message`.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::EmptyBundle`] when no key is left.
    pub fn generate(&self, specs: &MsgSpecs) -> Result<GeneratedSource, CodegenError> {
        let mut taken: HashSet<String> =
            naming::RESERVED_CONSTANTS.iter().map(ToString::to_string).collect();
        let mut candidates = Vec::new();
        let mut skipped = Vec::new();

        let mut skip = |key: &str, reason: String| {
            warn!("Skipping key {}: {}", key, reason);
            skipped.push(SkippedKey {
                key: key.to_string(),
                reason,
            });
        };

        for spec in specs.iter() {
            let key = spec.key.as_str();
            let Some(signature) = spec.signature.as_ref() else {
                skip(key, "main template does not parse".to_string());
                continue;
            };
            if specs.has_parse_error(key) {
                skip(key, "a locale template does not parse".to_string());
                continue;
            }
            let Some(main_template) = spec.template(specs.main_locale()) else {
                skip(key, "no main locale template".to_string());
                continue;
            };

            let constant = naming::constant_name(key);
            if !naming::is_usable_constant(&constant) {
                skip(key, format!("identifier '{constant}' is not usable"));
                continue;
            }
            if !taken.insert(constant.clone()) {
                skip(key, format!("identifier '{constant}' is already used by an earlier key"));
                continue;
            }
            candidates.push((spec, signature, main_template, constant));
        }

        let mut plans = Vec::with_capacity(candidates.len());
        for (spec, signature, main_template, constant) in candidates {
            let key = spec.key.as_str();
            let Some(base) = naming::type_name(&constant) else {
                skip(key, format!("no type name can be derived from '{constant}'"));
                continue;
            };
            let Some(type_name) = [base.clone(), format!("{base}Message")]
                .into_iter()
                .find(|name| !taken.contains(name) && !taken.contains(&format!("{name}Builder")))
            else {
                skip(key, format!("type name '{base}' is already used"));
                continue;
            };
            let builder_name = format!("{type_name}Builder");

            taken.insert(type_name.clone());
            taken.insert(builder_name.clone());
            plans.push(AccessorPlan {
                key,
                full_key: format!("{}{}", specs.key_prefix(), key),
                constant,
                type_name,
                builder_name,
                signature,
                main_template,
                templates: spec
                    .templates
                    .iter()
                    .map(|(locale, template)| (locale.as_str(), template.as_str()))
                    .collect(),
            });
        }
        skipped.sort_by(|a, b| a.key.cmp(&b.key));

        if plans.is_empty() {
            return Err(CodegenError::EmptyBundle {
                bundle: specs.bundle_name().to_string(),
            });
        }

        let header = render::BundleHeader {
            name: specs.bundle_name(),
            main_locale: specs.main_locale().as_str(),
            locales: specs.locales().iter().map(|l| l.as_str()).collect(),
        };
        let source = render::render(&header, &plans, &self.options)?;

        info!(
            "Generated {} accessors for bundle '{}' ({} skipped)",
            plans.len(),
            specs.bundle_name(),
            skipped.len()
        );

        Ok(GeneratedSource {
            source,
            accessors: plans.iter().map(|plan| plan.key.to_string()).collect(),
            skipped,
        })
    }
}
