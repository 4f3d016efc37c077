//! Custom validation functions used by the configuration schema.

use crate::schema::GeneratorConfig;
use msgspec_common::LoggingConfig;
use msgspec_core::LocaleTag;
use std::borrow::Cow;
use std::path::Path;
use validator::ValidationError;

fn with_message(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

/// Rejects empty or whitespace-only values.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Validate a BCP 47 locale tag such as `en-GB`
pub fn validate_locale_tag(tag: &str) -> Result<(), ValidationError> {
    LocaleTag::parse(tag).map(|_| ()).map_err(|e| {
        let mut error = with_message("invalid_locale_tag", e.to_string());
        error.add_param(Cow::Borrowed("value"), &tag);
        error
    })
}

/// Validate every tag of a locale list.
pub fn validate_locale_tags(tags: &[String]) -> Result<(), ValidationError> {
    tags.iter().try_for_each(|tag| validate_locale_tag(tag))
}

/// Rejects an empty output path.
pub fn validate_output_path(path: &Path) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::new("empty_output_path"));
    }
    Ok(())
}

/// Checks the runtime path and, for the namespace shape, the module name.
pub fn validate_generator(generator: &GeneratorConfig) -> Result<(), ValidationError> {
    generator
        .options()
        .validate()
        .map_err(|e| with_message("invalid_generator_options", e.to_string()))
}

/// Rejects a blank filter directive.
pub fn validate_logging(logging: &LoggingConfig) -> Result<(), ValidationError> {
    validate_not_blank(&logging.level).map_err(|_| ValidationError::new("blank_log_level"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgspec_codegen::ArtifactShape;
    use std::path::PathBuf;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("messages").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("  \t").is_err());
    }

    #[test]
    fn test_validate_locale_tag() {
        assert!(validate_locale_tag("en-GB").is_ok());
        assert!(validate_locale_tag("fr").is_ok());

        let error = validate_locale_tag("not a tag").unwrap_err();
        assert_eq!(error.code, "invalid_locale_tag");
        assert!(error.message.is_some());
        assert!(validate_locale_tag("").is_err());
    }

    #[test]
    fn test_validate_locale_tags() {
        assert!(validate_locale_tags(&[]).is_ok());
        assert!(validate_locale_tags(&["fr-FR".to_string(), "de-DE".to_string()]).is_ok());
        assert!(validate_locale_tags(&["fr-FR".to_string(), "??".to_string()]).is_err());
    }

    #[test]
    fn test_validate_output_path() {
        assert!(validate_output_path(Path::new("out/messages.rs")).is_ok());
        assert!(validate_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_generator() {
        let mut generator = GeneratorConfig::default();
        assert!(validate_generator(&generator).is_ok());

        generator.namespace = "fn".to_string();
        assert_eq!(
            validate_generator(&generator).unwrap_err().code,
            "invalid_generator_options"
        );

        generator.shape = ArtifactShape::Flat;
        assert!(validate_generator(&generator).is_ok());

        generator.runtime_path = "not a path".to_string();
        generator.output = PathBuf::from("x.rs");
        assert!(validate_generator(&generator).is_err());
    }
}
