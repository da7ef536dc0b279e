//! CLI for the cdfetch fetch engine.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cdfetch_core::config;

use commands::{run_config, run_fetch, FetchArgs};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cdfetch")]
#[command(about = "cdfetch: fetch one or more URLs as a single change-detection snapshot", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a target (one URL, or several joined with '|') and print its content.
    Fetch(FetchArgs),

    /// Show the config file path and the effective configuration.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch(args) => run_fetch(&cfg, args).await?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
