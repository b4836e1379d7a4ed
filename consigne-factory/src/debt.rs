use chrono::{DateTime, Utc};
use consigne_core::{BottleTypeId, DebtKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signed per-bottle-type counters of what the supplier owes back.
///
/// Positive means the supplier owes the business; negative is a supplier
/// credit. Neither counter is floored.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BottleDebt {
    pub empty: i64,
    pub defective: i64,
}

impl BottleDebt {
    pub fn is_zero(&self) -> bool {
        self.empty == 0 && self.defective == 0
    }
}

/// Append-only audit record of a manual debt settlement.
///
/// The counter math happens on [`BottleDebt`] when the record is created;
/// the record itself only documents it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub bottle_type: BottleTypeId,
    pub kind: DebtKind,
    pub quantity: u32,
    pub description: String,
}

impl Settlement {
    pub fn new(
        bottle_type: BottleTypeId,
        kind: DebtKind,
        quantity: u32,
        date: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            bottle_type,
            kind,
            quantity,
            description: description.into(),
        }
    }
}
