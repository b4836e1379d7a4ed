use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use consigne_config::Settings;
use consigne_core::{Account, CashFlow, TransferKind};
use consigne_store::DepotState;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use super::ledger::append_entry;

#[derive(Debug, Subcommand)]
pub enum TreasuryCommand {
    /// Cash paid into or out of one account.
    #[command(subcommand)]
    Cash(CashCommand),
    /// Money moved between accounts.
    #[command(subcommand)]
    Transfer(TransferCommand),
    /// Derived balance of every account.
    Balances,
}

#[derive(Debug, Subcommand)]
pub enum CashCommand {
    /// Create a pending cash operation.
    Add {
        flow: CashFlow,
        account: Account,
        amount: Decimal,
        #[arg(long, default_value = "")]
        label: String,
    },
    /// Rewrite a pending cash operation.
    Update {
        id: Uuid,
        flow: CashFlow,
        account: Account,
        amount: Decimal,
        #[arg(long, default_value = "")]
        label: String,
    },
    /// Validate a pending cash operation (one-way).
    Validate { id: Uuid },
    /// Delete a pending cash operation.
    Delete { id: Uuid },
    /// Cancel a validated cash operation with a compensating record.
    Reverse { id: Uuid },
    /// List cash operations.
    List,
}

#[derive(Debug, Subcommand)]
pub enum TransferCommand {
    /// Create a pending bank transfer.
    Add {
        kind: TransferKind,
        source: Account,
        destination: Account,
        amount: Decimal,
    },
    /// Validate a pending transfer (one-way).
    Validate { id: Uuid },
    /// Delete a pending transfer.
    Delete { id: Uuid },
    /// Cancel a validated transfer with a compensating record.
    Reverse { id: Uuid },
    /// List bank transfers.
    List,
}

pub fn handle(
    command: TreasuryCommand,
    state: &mut DepotState,
    settings: &Settings,
) -> Result<bool> {
    match command {
        TreasuryCommand::Cash(command) => handle_cash(command, state),
        TreasuryCommand::Transfer(command) => handle_transfer(command, state, settings),
        TreasuryCommand::Balances => {
            for row in state.treasury.balances() {
                println!("{:<8} {:>12}", row.account, row.balance);
            }
            Ok(false)
        }
    }
}

fn handle_cash(command: CashCommand, state: &mut DepotState) -> Result<bool> {
    match command {
        CashCommand::Add {
            flow,
            account,
            amount,
            label,
        } => {
            let id = state
                .treasury
                .add_cash_operation(flow, account, amount, Utc::now(), label)?;
            println!("cash operation {id} created (pending)");
            Ok(true)
        }
        CashCommand::Update {
            id,
            flow,
            account,
            amount,
            label,
        } => {
            state
                .treasury
                .update_cash_operation(id, flow, account, amount, Utc::now(), label)?;
            println!("cash operation {id} updated");
            Ok(true)
        }
        CashCommand::Validate { id } => {
            state.treasury.validate_cash_operation(id)?;
            println!("cash operation {id} validated");
            Ok(true)
        }
        CashCommand::Delete { id } => {
            state.treasury.delete_cash_operation(id)?;
            println!("cash operation {id} deleted");
            Ok(true)
        }
        CashCommand::Reverse { id } => {
            let reversal = state.treasury.reverse_cash_operation(id, Utc::now())?;
            println!("cash operation {id} reversed by {reversal}");
            Ok(true)
        }
        CashCommand::List => {
            for op in state.treasury.cash_operations() {
                println!(
                    "{}  {}  {:<9} {:<9} {:<7} {:>10}  {}",
                    op.id,
                    op.date.format("%Y-%m-%d"),
                    op.status,
                    op.flow,
                    op.account,
                    op.amount,
                    op.label
                );
            }
            Ok(false)
        }
    }
}

fn handle_transfer(
    command: TransferCommand,
    state: &mut DepotState,
    settings: &Settings,
) -> Result<bool> {
    match command {
        TransferCommand::Add {
            kind,
            source,
            destination,
            amount,
        } => {
            let id = state
                .treasury
                .add_transfer(kind, source, destination, amount, Utc::now())?;
            println!("transfer {id} created (pending)");
            Ok(true)
        }
        TransferCommand::Validate { id } => {
            let entry = state.treasury.validate_transfer(id)?;
            if let Some(entry) = entry {
                let sequence = append_entry(settings, entry)?;
                info!(sequence, "regularization entry appended");
            }
            println!("transfer {id} validated");
            Ok(true)
        }
        TransferCommand::Delete { id } => {
            state.treasury.delete_transfer(id)?;
            println!("transfer {id} deleted");
            Ok(true)
        }
        TransferCommand::Reverse { id } => {
            let reversal = state.treasury.reverse_transfer(id, Utc::now())?;
            println!("transfer {id} reversed by {reversal}");
            Ok(true)
        }
        TransferCommand::List => {
            for transfer in state.treasury.transfers() {
                println!(
                    "{}  {}  {:<9} {:<17} {} -> {}  {:>10}",
                    transfer.id,
                    transfer.date.format("%Y-%m-%d"),
                    transfer.status,
                    transfer.kind,
                    transfer.source,
                    transfer.destination,
                    transfer.amount
                );
            }
            Ok(false)
        }
    }
}
