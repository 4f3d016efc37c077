//! Default values for every configuration section.

use crate::schema::{BundleConfig, Config, GeneratorConfig, ValidationConfig};
use msgspec_codegen::{ArtifactShape, DEFAULT_NAMESPACE, DEFAULT_RUNTIME_PATH};
use msgspec_common::LoggingConfig;
use msgspec_core::OverridePolicy;
use std::path::PathBuf;

/// Default configuration file names, in search order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["msgspec.yaml", "msgspec.yml"];

impl Default for Config {
    fn default() -> Self {
        Self {
            bundle: BundleConfig::default(),
            validation: ValidationConfig::default(),
            generator: GeneratorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            name: "messages".to_string(),
            key_prefix: String::new(),
            main_locale: "en-GB".to_string(),
            locales: Vec::new(),
            resources: vec![PathBuf::from("src/main/resources")],
            override_policy: OverridePolicy::default(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { warn_only: false }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("target/generated/messages.rs"),
            shape: ArtifactShape::default(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
        }
    }
}
