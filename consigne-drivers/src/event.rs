use chrono::{DateTime, Utc};
use consigne_core::{Amount, DriverId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One immutable record in a driver's ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverEvent {
    pub id: Uuid,
    pub sequence: u64,
    pub date: DateTime<Utc>,
    pub driver: DriverId,
    pub kind: DriverEventKind,
    pub description: String,
}

/// The two mutation paths a driver account supports.
///
/// The paths deliberately keep distinct arithmetic: a debt adjustment is
/// clamped at zero and silently loses any remainder, while a payment
/// overflows the excess into the driver's standing advance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event", content = "value")]
pub enum DriverEventKind {
    DebtAdjusted { delta: Amount },
    PaymentReceived { amount: Amount },
}

/// The two-valued vocabulary the audit history displays.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Debt,
    Payment,
}

impl DriverEvent {
    pub fn new(
        driver: DriverId,
        sequence: u64,
        date: DateTime<Utc>,
        kind: DriverEventKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence,
            date,
            driver,
            kind,
            description: description.into(),
        }
    }

    /// Audit classification: a positive debt adjustment displays as a
    /// debt entry, everything else as a payment.
    pub fn entry_type(&self) -> EntryType {
        match &self.kind {
            DriverEventKind::DebtAdjusted { delta } if *delta > Amount::ZERO => EntryType::Debt,
            _ => EntryType::Payment,
        }
    }

    /// Unsigned amount shown in the audit history.
    pub fn display_amount(&self) -> Amount {
        match &self.kind {
            DriverEventKind::DebtAdjusted { delta } => delta.abs(),
            DriverEventKind::PaymentReceived { amount } => *amount,
        }
    }
}
