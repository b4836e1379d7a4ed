use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use consigne_core::{Amount, DriverId};
use serde::{Deserialize, Serialize};

use crate::{
    DriverAccount, DriverError, DriverEvent, DriverEventKind, DriverResult, PaymentBreakdown,
};

/// A registered driver and the immutable event sequence behind their
/// account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverRecord {
    pub name: String,
    pub registered_at: DateTime<Utc>,
    events: Vec<DriverEvent>,
}

impl DriverRecord {
    fn new(name: String, registered_at: DateTime<Utc>) -> Self {
        Self {
            name,
            registered_at,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[DriverEvent] {
        &self.events
    }

    /// Fold the event sequence into the current account snapshot.
    pub fn account(&self) -> DriverAccount {
        DriverAccount::fold(self.events.iter().map(|event| &event.kind))
    }
}

/// All driver accounts, keyed by driver id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverLedger {
    drivers: BTreeMap<DriverId, DriverRecord>,
    next_sequence: u64,
}

impl DriverLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new driver with an empty account (debt and advances
    /// both zero) and return the generated id.
    pub fn register(&mut self, name: impl Into<String>, date: DateTime<Utc>) -> DriverId {
        let driver = DriverId::new();
        // A fresh v4 id cannot collide with a registered one.
        let _ = self.register_with_id(driver, name, date);
        driver
    }

    /// Register a driver under a caller-provided id.
    pub fn register_with_id(
        &mut self,
        driver: DriverId,
        name: impl Into<String>,
        date: DateTime<Utc>,
    ) -> DriverResult<()> {
        if self.drivers.contains_key(&driver) {
            return Err(DriverError::AlreadyRegistered(driver));
        }
        self.drivers.insert(driver, DriverRecord::new(name.into(), date));
        Ok(())
    }

    /// Apply a signed debt delta.
    ///
    /// The fold clamps debt at zero, so a negative delta larger than the
    /// outstanding debt loses the remainder; it does not become an
    /// advance. An audit event is appended even for a zero delta.
    pub fn update_debt(
        &mut self,
        driver: DriverId,
        delta: Amount,
        date: DateTime<Utc>,
        description: impl Into<String>,
    ) -> DriverResult<()> {
        self.append(
            driver,
            date,
            DriverEventKind::DebtAdjusted { delta },
            description.into(),
        )
    }

    /// Record a payment from a driver.
    ///
    /// The part covering outstanding debt clears it; any excess becomes a
    /// standing advance. Returns how the amount split.
    pub fn record_payment(
        &mut self,
        driver: DriverId,
        amount: Amount,
        date: DateTime<Utc>,
    ) -> DriverResult<PaymentBreakdown> {
        if amount <= Amount::ZERO {
            return Err(DriverError::NonPositiveAmount(amount));
        }
        let before = self.account(driver)?;
        let applied_to_debt = amount.min(before.debt);
        let to_advances = amount - applied_to_debt;
        let description = format!(
            "paiement de {amount}: {applied_to_debt} sur dette, {to_advances} en avance"
        );
        self.append(
            driver,
            date,
            DriverEventKind::PaymentReceived { amount },
            description,
        )?;
        Ok(PaymentBreakdown {
            applied_to_debt,
            to_advances,
        })
    }

    /// Current account snapshot for a driver.
    pub fn account(&self, driver: DriverId) -> DriverResult<DriverAccount> {
        self.record(driver).map(DriverRecord::account)
    }

    /// Full audit history for a driver, oldest first.
    pub fn history(&self, driver: DriverId) -> DriverResult<&[DriverEvent]> {
        self.record(driver).map(DriverRecord::events)
    }

    pub fn record(&self, driver: DriverId) -> DriverResult<&DriverRecord> {
        self.drivers
            .get(&driver)
            .ok_or(DriverError::UnknownDriver(driver))
    }

    pub fn drivers(&self) -> impl Iterator<Item = (DriverId, &DriverRecord)> {
        self.drivers.iter().map(|(id, record)| (*id, record))
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    fn append(
        &mut self,
        driver: DriverId,
        date: DateTime<Utc>,
        kind: DriverEventKind,
        description: String,
    ) -> DriverResult<()> {
        let record = self
            .drivers
            .get_mut(&driver)
            .ok_or(DriverError::UnknownDriver(driver))?;
        self.next_sequence += 1;
        let event = DriverEvent::new(driver, self.next_sequence, date, kind, description);
        record.events.push(event);
        Ok(())
    }
}
