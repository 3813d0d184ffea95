//! CLI for the KEG binary installer.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use keg_core::config;
use keg_core::registry::Registry;
use std::path::Path;

use commands::{
    run_available, run_checksum, run_completions, run_fetch, run_install, run_list, run_remove,
    run_show,
};

/// Top-level CLI for the KEG binary installer.
#[derive(Debug, Parser)]
#[command(name = "keg")]
#[command(about = "KEG: manifest-driven installer for prebuilt binaries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Install a formula: download, verify, and place the binary.
    Install {
        /// Formula name (resolved in the formula directory) or path to a
        /// formula .toml file.
        formula: String,
        /// Reinstall even if the same or a newer version is already installed.
        #[arg(long)]
        force: bool,
    },

    /// Download and verify a formula's artifact without installing it.
    Fetch {
        /// Formula name or path to a formula .toml file.
        formula: String,
    },

    /// Show installed artifacts.
    List,

    /// List formulas available in the formula directory.
    Available,

    /// Print a formula's parsed metadata.
    Show {
        /// Formula name or path to a formula .toml file.
        formula: String,
    },

    /// Remove an installed binary and its registry record.
    Remove {
        /// Installed artifact name.
        name: String,
    },

    /// Compute SHA-256 of a file (e.g. a downloaded artifact).
    Checksum {
        /// Path to the file.
        path: String,
    },

    /// Generate shell completions on stdout.
    Completions {
        /// Shell to generate for.
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Completions don't need config or registry; handle them first.
        if let CliCommand::Completions { shell } = &cli.command {
            run_completions(*shell);
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let db = Registry::open_default().await?;

        match cli.command {
            CliCommand::Install { formula, force } => {
                run_install(&db, &cfg, &formula, force).await?
            }
            CliCommand::Fetch { formula } => run_fetch(&cfg, &formula).await?,
            CliCommand::List => run_list(&db).await?,
            CliCommand::Available => run_available(&cfg)?,
            CliCommand::Show { formula } => run_show(&cfg, &formula)?,
            CliCommand::Remove { name } => run_remove(&db, &name).await?,
            CliCommand::Checksum { path } => run_checksum(Path::new(&path))?,
            CliCommand::Completions { .. } => unreachable!("handled above"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
