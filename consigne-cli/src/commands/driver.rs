use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use consigne_core::DriverId;
use consigne_store::DepotState;
use rust_decimal::Decimal;

#[derive(Debug, Subcommand)]
pub enum DriverCommand {
    /// Register a new driver.
    Add { name: String },
    /// List drivers with their current position.
    List,
    /// Show one driver's account and history.
    Show { driver: DriverId },
    /// Apply a signed debt delta (new unpaid sale, correction, ...).
    Debt {
        driver: DriverId,
        #[arg(allow_hyphen_values = true)]
        amount: Decimal,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Record a payment from a driver.
    Pay { driver: DriverId, amount: Decimal },
}

pub fn handle(command: DriverCommand, state: &mut DepotState) -> Result<bool> {
    match command {
        DriverCommand::Add { name } => {
            let driver = state.drivers.register(&name, Utc::now());
            println!("registered {name} as {driver}");
            Ok(true)
        }
        DriverCommand::List => {
            for (id, record) in state.drivers.drivers() {
                let account = record.account();
                println!(
                    "{id}  {:<20} dette {:>10}  avance {:>10}  solde {:>10}",
                    record.name,
                    account.debt,
                    account.advances,
                    account.balance()
                );
            }
            Ok(false)
        }
        DriverCommand::Show { driver } => {
            let record = state.drivers.record(driver)?;
            let account = record.account();
            println!(
                "{} — dette {}, avance {}, solde {}",
                record.name,
                account.debt,
                account.advances,
                account.balance()
            );
            for event in record.events() {
                println!(
                    "  {}  {:<8} {:>10}  {}",
                    event.date.format("%Y-%m-%d"),
                    format!("{:?}", event.entry_type()).to_lowercase(),
                    event.display_amount(),
                    event.description
                );
            }
            Ok(false)
        }
        DriverCommand::Debt {
            driver,
            amount,
            note,
        } => {
            state.drivers.update_debt(driver, amount, Utc::now(), note)?;
            let account = state.drivers.account(driver)?;
            println!("dette {}, solde {}", account.debt, account.balance());
            Ok(true)
        }
        DriverCommand::Pay { driver, amount } => {
            let split = state.drivers.record_payment(driver, amount, Utc::now())?;
            println!(
                "paiement {}: {} sur dette, {} en avance",
                amount, split.applied_to_debt, split.to_advances
            );
            Ok(true)
        }
    }
}
