use std::str::FromStr;

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use consigne_core::{BottleCondition, BottleTypeId, DebtKind, OperationId, TruckId};
use consigne_factory::{ReceivedLine, SentLine};
use consigne_store::DepotState;

/// `<bottle-type>:<qty>:<empty|defective>` on the command line.
#[derive(Clone, Debug)]
pub struct SendLineArg(pub SentLine);

impl FromStr for SendLineArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let bottle_type = parts
            .next()
            .ok_or("missing bottle type")?
            .parse::<BottleTypeId>()
            .map_err(|err| format!("invalid bottle type: {err}"))?;
        let quantity = parts
            .next()
            .ok_or("missing quantity")?
            .parse::<u32>()
            .map_err(|err| format!("invalid quantity: {err}"))?;
        let condition = parts
            .next()
            .ok_or("missing condition")?
            .parse::<BottleCondition>()?;
        Ok(Self(SentLine {
            bottle_type,
            quantity,
            condition,
        }))
    }
}

/// `<bottle-type>:<qty>` on the command line.
#[derive(Clone, Debug)]
pub struct ReturnLineArg(pub ReceivedLine);

impl FromStr for ReturnLineArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (bottle_type, quantity) = s
            .split_once(':')
            .ok_or("expected <bottle-type>:<qty>")?;
        Ok(Self(ReceivedLine {
            bottle_type: bottle_type
                .parse()
                .map_err(|err| format!("invalid bottle type: {err}"))?,
            quantity: quantity
                .parse()
                .map_err(|err| format!("invalid quantity: {err}"))?,
        }))
    }
}

#[derive(Debug, Subcommand)]
pub enum FactoryCommand {
    /// Record a truck leaving for the factory.
    Send {
        #[arg(long)]
        truck: TruckId,
        /// Name of the driver making the trip.
        #[arg(long = "driver")]
        driver_name: String,
        #[arg(required = true)]
        lines: Vec<SendLineArg>,
    },
    /// Record the single return event of a pending operation.
    Return {
        operation: OperationId,
        #[arg(required = true)]
        lines: Vec<ReturnLineArg>,
    },
    /// Manually settle part of a supplier debt.
    Settle {
        bottle_type: BottleTypeId,
        kind: DebtKind,
        quantity: u32,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Show per-type supplier debt.
    Debts,
    /// List exchange operations.
    Operations,
}

pub fn handle(command: FactoryCommand, state: &mut DepotState) -> Result<bool> {
    match command {
        FactoryCommand::Send {
            truck,
            driver_name,
            lines,
        } => {
            let lines = lines.into_iter().map(|line| line.0).collect();
            let id = state
                .factory
                .record_send(truck, driver_name, Utc::now(), lines)?;
            println!("operation {id} created");
            Ok(true)
        }
        FactoryCommand::Return { operation, lines } => {
            let received: Vec<ReceivedLine> = lines.into_iter().map(|line| line.0).collect();
            let summary = state
                .factory
                .reconcile_return(operation, &received, Utc::now())?;
            for line in &summary.lines {
                println!(
                    "{}: recu {}, vides compenses {}, defectueuses compensees {}, excedent {}",
                    line.bottle_type,
                    line.received,
                    line.empty_compensated,
                    line.defective_compensated,
                    line.excess
                );
            }
            println!("variation de dette: {}", summary.debt_change);
            Ok(true)
        }
        FactoryCommand::Settle {
            bottle_type,
            kind,
            quantity,
            note,
        } => {
            state
                .factory
                .settle(bottle_type, kind, quantity, Utc::now(), note)?;
            let debt = state.factory.debt(bottle_type);
            println!(
                "{bottle_type}: vides {} defectueuses {}",
                debt.empty, debt.defective
            );
            Ok(true)
        }
        FactoryCommand::Debts => {
            for (bottle_type, debt) in state.factory.debts() {
                println!(
                    "{bottle_type}  vides {:>6}  defectueuses {:>6}",
                    debt.empty, debt.defective
                );
            }
            Ok(false)
        }
        FactoryCommand::Operations => {
            for op in state.factory.operations() {
                let status = if op.is_pending() { "pending" } else { "completed" };
                println!(
                    "{}  {}  {:<10} {}  envoyees {}  variation {}",
                    op.id,
                    op.date.format("%Y-%m-%d"),
                    status,
                    op.driver_name,
                    op.total_sent(),
                    op.debt_change
                        .map(|change| change.to_string())
                        .unwrap_or_else(|| "-".to_string())
                );
            }
            Ok(false)
        }
    }
}
