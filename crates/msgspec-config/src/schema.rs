//! Configuration schema definitions using serde.

use crate::loader::ConfigError;
use msgspec_codegen::{ArtifactShape, GeneratorOptions};
use msgspec_common::{LoggingConfig, ValidationMode};
use msgspec_core::{Bundle, OverridePolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Bundle to validate and generate.
    #[validate]
    pub bundle: BundleConfig,
    /// Severity policy.
    pub validation: ValidationConfig,
    /// Code generation settings.
    #[validate]
    pub generator: GeneratorConfig,
    /// Logging settings.
    #[validate(custom(
        function = "crate::validation::validate_logging",
        message = "logging.level cannot be empty"
    ))]
    pub logging: LoggingConfig,
}

/// Bundle description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BundleConfig {
    /// Base name of the resource files.
    #[validate(custom(
        function = "crate::validation::validate_not_blank",
        message = "bundle.name cannot be empty"
    ))]
    pub name: String,
    /// Prefix of the keys in scope.
    pub key_prefix: String,
    /// Canonical locale tag.
    #[validate(custom = "crate::validation::validate_locale_tag")]
    pub main_locale: String,
    /// Other tracked locale tags.
    #[validate(custom = "crate::validation::validate_locale_tags")]
    pub locales: Vec<String>,
    /// Resource roots in search order.
    #[validate(length(min = 1, message = "bundle.resources must list at least one root"))]
    pub resources: Vec<PathBuf>,
    /// Precedence between roots defining the same key.
    pub override_policy: OverridePolicy,
}

/// Severity policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Report errors as warnings without failing the run.
    pub warn_only: bool,
}

/// Code generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(
    function = "crate::validation::validate_generator",
    skip_on_field_errors = false
))]
#[serde(default)]
pub struct GeneratorConfig {
    /// File the generated source is written to.
    #[validate(custom(
        function = "crate::validation::validate_output_path",
        message = "generator.output cannot be empty"
    ))]
    pub output: PathBuf,
    /// Artifact layout.
    pub shape: ArtifactShape,
    /// Module name for the namespace shape.
    pub namespace: String,
    /// Runtime crate path used by generated code.
    pub runtime_path: String,
}

impl GeneratorConfig {
    /// Options for the accessor generator.
    #[must_use]
    pub fn options(&self) -> GeneratorOptions {
        GeneratorOptions {
            shape: self.shape,
            namespace: self.namespace.clone(),
            runtime_path: self.runtime_path.clone(),
        }
    }
}

impl Config {
    /// Builds the core bundle description.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Bundle`] when a locale tag does not parse or a
    /// required field is empty.
    pub fn to_bundle(&self) -> Result<Bundle, ConfigError> {
        let bundle = Bundle::builder(self.bundle.name.as_str())
            .key_prefix(&self.bundle.key_prefix)
            .main_locale(self.bundle.main_locale.as_str())
            .locales(self.bundle.locales.iter().map(String::as_str))
            .roots(self.bundle.resources.iter().cloned())
            .override_policy(self.bundle.override_policy)
            .build()?;
        Ok(bundle)
    }

    /// Options for the accessor generator.
    #[must_use]
    pub fn generator_options(&self) -> GeneratorOptions {
        self.generator.options()
    }

    /// Severity policy for validation errors.
    #[must_use]
    pub const fn validation_mode(&self) -> ValidationMode {
        ValidationMode::from_warn_only(self.validation.warn_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationErrors, ValidationErrorsKind};

    fn failing_fields(errors: &ValidationErrors, section: &str) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = match errors.errors().get(section) {
            Some(ValidationErrorsKind::Struct(inner)) => inner.errors().keys().copied().collect(),
            _ => Vec::new(),
        };
        fields.sort_unstable();
        fields
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_every_problem_is_reported() {
        let mut config = Config::default();
        config.bundle.name = " ".to_string();
        config.bundle.resources.clear();
        config.bundle.locales = vec!["not a tag".to_string()];
        config.generator.namespace = "fn".to_string();
        config.logging.level = String::new();

        let errors = config.validate().unwrap_err();

        assert_eq!(failing_fields(&errors, "bundle"), vec!["locales", "name", "resources"]);
        assert_eq!(failing_fields(&errors, "generator"), vec!["__all__"]);
        assert!(errors.field_errors().contains_key("logging"));
    }

    #[test]
    fn test_messages_name_the_section() {
        let mut config = Config::default();
        config.bundle.resources.clear();

        let errors = config.validate().unwrap_err();

        assert!(errors.to_string().contains("bundle.resources must list at least one root"));
    }

    #[test]
    fn test_flat_shape_ignores_namespace() {
        let mut config = Config::default();
        config.generator.shape = ArtifactShape::Flat;
        config.generator.namespace = String::new();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generator_options_follow_the_section() {
        let mut config = Config::default();
        config.generator.runtime_path = "crate::rt".to_string();

        let options = config.generator_options();

        assert_eq!(options.runtime_path, "crate::rt");
        assert_eq!(options.shape, ArtifactShape::Namespace);
    }
}
