//! Command line arguments.

use clap::{Args, Parser, Subcommand};
use msgspec_codegen::ArtifactShape;
use msgspec_common::ValidationMode;
use msgspec_config::Config;
use std::path::PathBuf;

/// Validate localized message bundles and generate typed accessors
#[derive(Parser, Debug)]
#[command(name = "msgspec", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level, overriding the configuration
    #[arg(short, long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate every locale against the main locale
    Validate(ValidateArgs),
    /// Validate, then write the typed accessor source
    Generate(GenerateArgs),
}

/// Severity flags shared by both subcommands.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ModeArgs {
    /// Report errors as warnings and never fail
    #[arg(long, conflicts_with = "strict")]
    pub warn_only: bool,

    /// Fail when any error is found
    #[arg(long)]
    pub strict: bool,
}

impl ModeArgs {
    /// Mode selected on the command line, falling back to `configured`.
    #[must_use]
    pub const fn resolve(self, configured: ValidationMode) -> ValidationMode {
        if self.warn_only {
            ValidationMode::WarnOnly
        } else if self.strict {
            ValidationMode::Strict
        } else {
            configured
        }
    }
}

/// Arguments of `msgspec validate`.
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Severity flags
    #[command(flatten)]
    pub mode: ModeArgs,

    /// Write a JSON report of the run to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// Arguments of `msgspec generate`.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Severity flags
    #[command(flatten)]
    pub mode: ModeArgs,

    /// Output file, overriding the configuration
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Artifact layout: flat or namespace
    #[arg(long)]
    pub shape: Option<ArtifactShape>,

    /// Module name for the namespace layout
    #[arg(long)]
    pub namespace: Option<String>,
}

impl GenerateArgs {
    /// Folds the generator flags into `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(output) = &self.output {
            config.generator.output.clone_from(output);
        }
        if let Some(shape) = self.shape {
            config.generator.shape = shape;
        }
        if let Some(namespace) = &self.namespace {
            config.generator.namespace.clone_from(namespace);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "msgspec",
            "generate",
            "--config",
            "msgspec.yaml",
            "--shape",
            "flat",
            "-o",
            "out.rs",
            "--warn-only",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("msgspec.yaml")));
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.shape, Some(ArtifactShape::Flat));
        assert_eq!(args.mode.resolve(ValidationMode::Strict), ValidationMode::WarnOnly);

        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.generator.output, PathBuf::from("out.rs"));
        assert_eq!(config.generator.shape, ArtifactShape::Flat);
    }

    #[test]
    fn test_conflicting_modes() {
        let result = Cli::try_parse_from(["msgspec", "validate", "--warn-only", "--strict"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_mode_defaults_to_configuration() {
        let cli = Cli::try_parse_from(["msgspec", "validate"]).unwrap();
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.mode.resolve(ValidationMode::WarnOnly), ValidationMode::WarnOnly);
        assert_eq!(args.report, None);
    }
}
