use std::fs;
use std::path::{Path, PathBuf};

use consigne_drivers::DriverLedger;
use consigne_factory::FactoryLedger;
use consigne_treasury::Treasury;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::StoreResult;

const DRIVERS_FILE: &str = "drivers.json";
const FACTORY_FILE: &str = "factory.json";
const TREASURY_FILE: &str = "treasury.json";

/// The full mutable back-office state, one field per ledger.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DepotState {
    pub drivers: DriverLedger,
    pub factory: FactoryLedger,
    pub treasury: Treasury,
}

/// Directory-backed store writing one JSON document per collection.
#[derive(Clone, Debug)]
pub struct StateStore {
    root: PathBuf,
}

impl StateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the persisted state; collections without a file start empty.
    pub fn load(&self) -> StoreResult<DepotState> {
        Ok(DepotState {
            drivers: self.load_collection(DRIVERS_FILE)?.unwrap_or_default(),
            factory: self.load_collection(FACTORY_FILE)?.unwrap_or_default(),
            treasury: self.load_collection(TREASURY_FILE)?.unwrap_or_default(),
        })
    }

    /// Persist every collection.
    ///
    /// Each document is written to a temp file and renamed into place, so
    /// an interrupted save never leaves a torn collection behind.
    pub fn save(&self, state: &DepotState) -> StoreResult<()> {
        fs::create_dir_all(&self.root)?;
        self.save_collection(DRIVERS_FILE, &state.drivers)?;
        self.save_collection(FACTORY_FILE, &state.factory)?;
        self.save_collection(TREASURY_FILE, &state.treasury)?;
        debug!(root = %self.root.display(), "state saved");
        Ok(())
    }

    fn load_collection<T: DeserializeOwned>(&self, name: &str) -> StoreResult<Option<T>> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read(&path)?;
        if raw.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    fn save_collection<T: Serialize>(&self, name: &str, value: &T) -> StoreResult<()> {
        let path = self.root.join(name);
        let payload = serde_json::to_vec_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use consigne_core::{Account, BottleCondition, BottleTypeId, CashFlow, TruckId};
    use consigne_factory::SentLine;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[test]
    fn missing_files_load_as_empty_state() {
        let dir = tempdir().unwrap();
        let store = StateStore::new(dir.path());
        let state = store.load().unwrap();
        assert!(state.drivers.is_empty());
        assert!(state.factory.operations().is_empty());
        assert!(state.treasury.cash_operations().is_empty());
    }

    #[test]
    fn save_then_load_reproduces_identical_ledgers() {
        let dir = tempdir().unwrap();
        let store = StateStore::new(dir.path());

        let mut state = DepotState::default();
        let driver = state.drivers.register("Karim", Utc::now());
        state
            .drivers
            .update_debt(driver, dec!(120), Utc::now(), "tournee")
            .unwrap();
        state
            .drivers
            .record_payment(driver, dec!(150), Utc::now())
            .unwrap();
        let butane = BottleTypeId::new();
        state
            .factory
            .record_send(
                TruckId::new(),
                "Karim",
                Utc::now(),
                vec![SentLine {
                    bottle_type: butane,
                    quantity: 10,
                    condition: BottleCondition::Empty,
                }],
            )
            .unwrap();
        let op = state
            .treasury
            .add_cash_operation(
                CashFlow::Versement,
                Account::Espece,
                dec!(500),
                Utc::now(),
                "vente",
            )
            .unwrap();
        state.treasury.validate_cash_operation(op).unwrap();

        store.save(&state).unwrap();
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, state);
        assert_eq!(
            reloaded.treasury.balance(Account::Espece),
            state.treasury.balance(Account::Espece)
        );
    }

    #[test]
    fn save_overwrites_previous_snapshots() {
        let dir = tempdir().unwrap();
        let store = StateStore::new(dir.path());

        let mut state = DepotState::default();
        store.save(&state).unwrap();
        state.drivers.register("Nadia", Utc::now());
        store.save(&state).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.drivers.len(), 1);
    }
}
