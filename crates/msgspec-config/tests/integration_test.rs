//! Integration tests for msgspec-config.

use msgspec_codegen::ArtifactShape;
use msgspec_common::test_utils::{bundle_fixtures, create_temp_dir, write_resource};
use msgspec_common::ValidationMode;
use msgspec_config::{ConfigError, ConfigLoader};
use msgspec_core::load_and_validate;
use validator::ValidationErrorsKind;

#[test]
fn test_config_drives_the_pipeline() {
    let dir = create_temp_dir();
    let resources = dir.path().join("resources");
    write_resource(&resources, "messages_en_GB.properties", bundle_fixtures::EN_GB);
    write_resource(&resources, "messages_fr_FR.properties", bundle_fixtures::FR_FR);
    let config_path = write_resource(
        dir.path(),
        "msgspec.yaml",
        &format!(
            "bundle:\n  key_prefix: app.msg\n  locales: [fr-FR]\n  resources: [{:?}]\n",
            resources.display().to_string()
        ),
    );

    let config = ConfigLoader::load_config(&config_path).unwrap();
    let bundle = config.to_bundle().unwrap();

    assert_eq!(bundle.key_prefix(), "app.msg.");
    assert_eq!(bundle.locales().len(), 2);
    assert_eq!(config.validation_mode(), ValidationMode::Strict);
    assert_eq!(config.generator_options().shape, ArtifactShape::Namespace);

    let specs = load_and_validate(&bundle).unwrap();
    assert!(specs.is_clean(), "{:?}", specs.errors());
    assert_eq!(specs.len(), 3);
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = create_temp_dir();
    let path = write_resource(
        dir.path(),
        "msgspec.yaml",
        "bundle:\n  main_locale: \"\"\n  resources: []\n",
    );

    let err = ConfigLoader::load_config(&path).unwrap_err();

    match err {
        ConfigError::Validation(errors) => {
            let Some(ValidationErrorsKind::Struct(bundle)) = errors.errors().get("bundle") else {
                panic!("expected bundle errors, got {errors}");
            };
            let mut fields: Vec<&str> = bundle.field_errors().keys().copied().collect();
            fields.sort_unstable();
            assert_eq!(fields, vec!["main_locale", "resources"]);
            assert_eq!(bundle.field_errors()["main_locale"][0].code, "invalid_locale_tag");
        }
        other => panic!("unexpected error: {other}"),
    }
}
