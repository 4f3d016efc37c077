//! Configuration loading with environment variable overrides.

use crate::defaults::CONFIG_FILE_NAMES;
use crate::schema::Config;
use msgspec_core::BundleError;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "MSGSPEC_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {reason}")]
    EnvParse {
        /// Variable name.
        var: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// The bundle section does not describe a usable bundle
    #[error(transparent)]
    Bundle(#[from] BundleError),
}

/// Configuration loader for the msgspec front ends
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, an
    /// override cannot be parsed, or the merged configuration is invalid.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from the environment and the working directory
    ///
    /// Looks at `MSGSPEC_CONFIG_PATH`, then `msgspec.yaml` and `msgspec.yml`,
    /// and falls back to defaults when no file is found.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load_config`].
    pub fn load() -> Result<Config, ConfigError> {
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Self::load_config(path);
        }
        if let Some(path) = CONFIG_FILE_NAMES.into_iter().map(Path::new).find(|p| p.exists()) {
            return Self::load_config(path);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a YAML document without overrides or validation.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML.
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply `MSGSPEC_*` environment variable overrides to configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvParse`] for a malformed boolean.
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup` instead of the process environment
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::apply_env_overrides`].
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("MSGSPEC_BUNDLE_NAME") {
            config.bundle.name = name;
        }

        if let Some(prefix) = lookup("MSGSPEC_KEY_PREFIX") {
            config.bundle.key_prefix = prefix;
        }

        if let Some(locale) = lookup("MSGSPEC_MAIN_LOCALE") {
            config.bundle.main_locale = locale;
        }

        if let Some(locales) = lookup("MSGSPEC_LOCALES") {
            config.bundle.locales = split_list(&locales).map(str::to_string).collect();
        }

        if let Some(resources) = lookup("MSGSPEC_RESOURCES") {
            config.bundle.resources = split_list(&resources).map(PathBuf::from).collect();
        }

        if let Some(warn_only) = lookup("MSGSPEC_WARN_ONLY") {
            config.validation.warn_only =
                warn_only.trim().parse().map_err(|e: std::str::ParseBoolError| {
                    ConfigError::EnvParse {
                        var: "MSGSPEC_WARN_ONLY".to_string(),
                        reason: e.to_string(),
                    }
                })?;
        }

        if let Some(output) = lookup("MSGSPEC_OUTPUT") {
            config.generator.output = PathBuf::from(output);
        }

        if let Some(level) = lookup("MSGSPEC_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}
