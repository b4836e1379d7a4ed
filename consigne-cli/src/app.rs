use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use consigne_config::Settings;
use consigne_store::StateStore;
use tracing::info;

use crate::commands::{self, DriverCommand, FactoryCommand, LedgerCommand, TreasuryCommand};
use crate::telemetry;

/// Back-office bookkeeping for a bottled-gas distributor.
#[derive(Debug, Parser)]
#[command(name = "consigne", version, about)]
pub struct Cli {
    /// Path to a settings file; defaults to `consigne.toml` if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Driver debt and advance accounts.
    #[command(subcommand)]
    Driver(DriverCommand),
    /// Factory exchanges and supplier bottle debt.
    #[command(subcommand)]
    Factory(FactoryCommand),
    /// Cash operations, bank transfers, and balances.
    #[command(subcommand)]
    Treasury(TreasuryCommand),
    /// The financial transaction log.
    #[command(subcommand)]
    Ledger(LedgerCommand),
    /// Write a default settings file.
    ConfigInit {
        #[arg(long, default_value = "consigne.toml")]
        path: PathBuf,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    telemetry::init(&settings.log.filter);

    if let Command::ConfigInit { path } = &cli.command {
        return commands::config_init(&settings, path);
    }

    let store = StateStore::new(&settings.data_dir);
    let mut state = store.load()?;
    let mutated = match cli.command {
        Command::Driver(command) => commands::driver::handle(command, &mut state)?,
        Command::Factory(command) => commands::factory::handle(command, &mut state)?,
        Command::Treasury(command) => {
            commands::treasury::handle(command, &mut state, &settings)?
        }
        Command::Ledger(command) => commands::ledger::handle(command, &settings)?,
        Command::ConfigInit { .. } => unreachable!("handled above"),
    };
    if mutated {
        store.save(&state)?;
        info!(data_dir = %store.root().display(), "state saved");
    }
    Ok(())
}
