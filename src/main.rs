mod cli;
mod config;
mod download;
mod error;
mod extract;
mod installer;
mod logging;
mod payload;
mod platform;
mod progress;
mod verify;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use crate::cli::{Cli, Commands};
use crate::config::InstallerConfig;
use crate::installer::Settings;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = InstallerConfig::load(cli.config.as_deref())?;
    let settings = Settings::from_sources(&cli, &cfg)?;
    match cli.command.unwrap_or(Commands::Install { archive: None }) {
        Commands::Install { archive } => {
            installer::install(&settings, archive.as_deref())?;
            Ok(())
        }
        Commands::Plan => installer::plan(&settings),
    }
}
