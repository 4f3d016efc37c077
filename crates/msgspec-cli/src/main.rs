//! Main entry point for the `msgspec` command.

use anyhow::Result;
use clap::Parser;
use msgspec_cli::{execute, load_config, setup_logging, Cli};
use tracing::{debug, error};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    setup_logging(&config)?;
    debug!("Effective configuration: {:?}", config);

    if let Err(e) = execute(&cli.command, config) {
        error!("{}", e);
        return Err(e.into());
    }

    Ok(())
}
