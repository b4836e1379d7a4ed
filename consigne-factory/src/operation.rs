use chrono::{DateTime, Utc};
use consigne_core::{BottleCondition, BottleTypeId, OperationId, TruckId};
use serde::{Deserialize, Serialize};

/// One line of bottles loaded for the factory.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SentLine {
    pub bottle_type: BottleTypeId,
    pub quantity: u32,
    pub condition: BottleCondition,
}

/// One line of bottles received back from the factory.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReceivedLine {
    pub bottle_type: BottleTypeId,
    pub quantity: u32,
}

/// A send/return exchange with the factory.
///
/// Created when the truck leaves; completed by exactly one return event,
/// which freezes the record for good.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExchangeOperation {
    pub id: OperationId,
    pub truck: TruckId,
    pub driver_name: String,
    pub date: DateTime<Utc>,
    pub sent: Vec<SentLine>,
    /// Empty until the return is recorded.
    pub received: Vec<ReceivedLine>,
    /// Net figure stamped at return time: positive means the supplier
    /// still owes bottles, negative means they over-returned.
    pub debt_change: Option<i64>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl ExchangeOperation {
    pub fn new(
        truck: TruckId,
        driver_name: impl Into<String>,
        date: DateTime<Utc>,
        sent: Vec<SentLine>,
    ) -> Self {
        Self {
            id: OperationId::new(),
            truck,
            driver_name: driver_name.into(),
            date,
            sent,
            received: Vec::new(),
            debt_change: None,
            returned_at: None,
        }
    }

    /// An operation is pending until its return is reconciled.
    pub fn is_pending(&self) -> bool {
        self.debt_change.is_none()
    }

    /// Bottles sent across all lines, regardless of condition.
    pub fn total_sent(&self) -> u64 {
        self.sent.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
