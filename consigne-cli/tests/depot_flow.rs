use anyhow::Result;
use chrono::Utc;
use consigne_cli::commands::{driver, treasury, DriverCommand, TreasuryCommand};
use consigne_cli::commands::treasury::TransferCommand;
use consigne_config::{LedgerBackend, LedgerSettings, LogSettings, Settings};
use consigne_core::{Account, TransactionKind, TransferKind};
use consigne_ledger::{JsonTransactionRepository, TransactionQuery, TransactionRepository};
use consigne_store::{DepotState, StateStore};
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn test_settings(dir: &TempDir) -> Settings {
    Settings {
        data_dir: dir.path().to_path_buf(),
        ledger: LedgerSettings {
            backend: LedgerBackend::Json,
            path: None,
        },
        log: LogSettings {
            filter: "warn".to_string(),
        },
    }
}

#[test]
fn payment_flow_survives_a_store_round_trip() -> Result<()> {
    let dir = TempDir::new()?;
    let store = StateStore::new(dir.path());
    let mut state = DepotState::default();

    let karim = state.drivers.register("Karim", Utc::now());
    driver::handle(
        DriverCommand::Debt {
            driver: karim,
            amount: dec!(120),
            note: "tournee".to_string(),
        },
        &mut state,
    )?;
    driver::handle(
        DriverCommand::Pay {
            driver: karim,
            amount: dec!(150),
        },
        &mut state,
    )?;
    store.save(&state)?;

    let reloaded = store.load()?;
    let account = reloaded.drivers.account(karim)?;
    assert_eq!(account.debt, dec!(0));
    assert_eq!(account.advances, dec!(30));
    Ok(())
}

#[test]
fn validating_a_cheque_remittance_writes_the_log_entry() -> Result<()> {
    let dir = TempDir::new()?;
    let settings = test_settings(&dir);
    let mut state = DepotState::default();

    let transfer = state.treasury.add_transfer(
        TransferKind::RemiseCheques,
        Account::Cheque,
        Account::Banque,
        dec!(1500),
        Utc::now(),
    )?;
    let mutated = treasury::handle(
        TreasuryCommand::Transfer(TransferCommand::Validate { id: transfer }),
        &mut state,
        &settings,
    )?;
    assert!(mutated);

    let repo = JsonTransactionRepository::new(settings.ledger_path())?;
    let entries = repo.query(TransactionQuery::default())?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, TransactionKind::Transfert);
    assert_eq!(entries[0].sequence, 1);
    assert_eq!(entries[0].reference.as_deref(), Some(transfer.to_string().as_str()));
    assert_eq!(state.treasury.balance(Account::Banque), dec!(1500));
    Ok(())
}

#[test]
fn validating_a_cash_deposit_writes_no_log_entry() -> Result<()> {
    let dir = TempDir::new()?;
    let settings = test_settings(&dir);
    let mut state = DepotState::default();

    let transfer = state.treasury.add_transfer(
        TransferKind::VersementEspece,
        Account::Espece,
        Account::Banque,
        dec!(200),
        Utc::now(),
    )?;
    treasury::handle(
        TreasuryCommand::Transfer(TransferCommand::Validate { id: transfer }),
        &mut state,
        &settings,
    )?;

    let repo = JsonTransactionRepository::new(settings.ledger_path())?;
    assert!(repo.query(TransactionQuery::default())?.is_empty());
    Ok(())
}
