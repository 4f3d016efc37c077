//! Subcommand implementations.

use crate::args::{Cli, Command, GenerateArgs, ValidateArgs};
use crate::error::{CliError, CliResult};
use msgspec_codegen::{AccessorGenerator, GeneratedSource};
use msgspec_common::{init_logging, ValidationMode};
use msgspec_config::{Config, ConfigLoader};
use msgspec_core::{load_and_validate, ErrorKind, LocaleTag, MsgSpecError, MsgSpecs};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn, Level};

/// Machine-readable summary of a validation run.
#[derive(Debug, Serialize)]
pub struct ValidationReport<'a> {
    /// Bundle base name.
    pub bundle: &'a str,
    /// Canonical locale.
    pub main_locale: &'a LocaleTag,
    /// Every tracked locale.
    pub locales: Vec<&'a LocaleTag>,
    /// Number of keys in the main locale.
    pub keys: usize,
    /// Severity policy applied.
    pub mode: ValidationMode,
    /// Whether the run passes under `mode`.
    pub passed: bool,
    /// Error count per kind.
    pub counts: BTreeMap<ErrorKind, usize>,
    /// Every error, in report order.
    pub errors: &'a [MsgSpecError],
}

impl<'a> ValidationReport<'a> {
    /// Summarises `specs` under `mode`.
    #[must_use]
    pub fn new(specs: &'a MsgSpecs, mode: ValidationMode) -> Self {
        Self {
            bundle: specs.bundle_name(),
            main_locale: specs.main_locale(),
            locales: specs.locales().iter().collect(),
            keys: specs.len(),
            mode,
            passed: !mode.fails_on(specs.errors().len()),
            counts: specs.error_counts(),
            errors: specs.errors(),
        }
    }
}

/// Loads the configuration named on the command line, or the default one.
///
/// # Errors
///
/// Returns [`CliError::Config`] when loading fails.
pub fn load_config(cli: &Cli) -> CliResult<Config> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_config(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    Ok(config)
}

/// Installs the global subscriber described by the logging section.
///
/// # Errors
///
/// Returns [`CliError::Logging`] when the log file cannot be opened or a
/// subscriber is already installed.
pub fn setup_logging(config: &Config) -> CliResult<()> {
    init_logging(&config.logging)?;
    Ok(())
}

/// Runs a subcommand.
///
/// # Errors
///
/// Returns the first fatal error, or [`CliError::ValidationFailed`] when the
/// severity policy rejects the error list.
pub fn execute(command: &Command, config: Config) -> CliResult<()> {
    match command {
        Command::Validate(args) => run_validate(args, &config),
        Command::Generate(args) => run_generate(args, config).map(|_| ()),
    }
}

/// `msgspec validate`.
///
/// # Errors
///
/// See [`execute`].
pub fn run_validate(args: &ValidateArgs, config: &Config) -> CliResult<()> {
    let mode = args.mode.resolve(config.validation_mode());
    let specs = validate_bundle(config, mode)?;

    if let Some(path) = &args.report {
        let report = ValidationReport::new(&specs, mode);
        let json = serde_json::to_string_pretty(&report)?;
        write_file(path, &json)?;
        info!("Wrote validation report to {}", path.display());
    }

    mode.gate(specs.errors())?;
    Ok(())
}

/// `msgspec generate`.
///
/// # Errors
///
/// See [`execute`].
pub fn run_generate(args: &GenerateArgs, mut config: Config) -> CliResult<GeneratedSource> {
    args.apply(&mut config);
    let mode = args.mode.resolve(config.validation_mode());
    let generator = AccessorGenerator::new(config.generator_options())?;

    let specs = validate_bundle(&config, mode)?;
    mode.gate(specs.errors())?;

    let generated = generator.generate(&specs)?;
    write_file(&config.generator.output, generated.source())?;
    info!(
        "Wrote {} accessors to {}",
        generated.accessors().len(),
        config.generator.output.display()
    );
    if !generated.skipped().is_empty() {
        warn!("{} keys were skipped", generated.skipped().len());
    }
    Ok(generated)
}

/// Loads and validates the configured bundle, logging every error at the
/// level `mode` prescribes.
///
/// # Errors
///
/// Returns [`CliError::Config`] or [`CliError::Bundle`] for fatal problems.
pub fn validate_bundle(config: &Config, mode: ValidationMode) -> CliResult<MsgSpecs> {
    let bundle = config.to_bundle().map_err(CliError::Config)?;
    let specs = load_and_validate(&bundle)?;

    let level = mode.report_level();
    for e in specs.errors() {
        if level == Level::WARN {
            warn!("{}", e);
        } else {
            error!("{}", e);
        }
    }

    if specs.is_clean() {
        info!("Bundle '{}' is consistent across {} locales", bundle.name(), bundle.locales().len());
    } else {
        let summary = specs
            .error_counts()
            .iter()
            .map(|(kind, count)| format!("{kind}={count}"))
            .collect::<Vec<_>>()
            .join(", ");
        info!(
            "Bundle '{}': {} errors ({}) in {} mode",
            bundle.name(),
            specs.errors().len(),
            summary,
            mode
        );
    }
    Ok(specs)
}

fn write_file(path: &Path, content: &str) -> CliResult<()> {
    let io = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io)?;
    }
    fs::write(path, content).map_err(io)
}
