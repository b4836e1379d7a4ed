use chrono::{DateTime, Utc};
use consigne_core::{Account, Amount, TransactionKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical record of a single money movement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionEntry {
    pub id: Uuid,
    pub sequence: u64,
    /// Business date of the movement.
    pub date: DateTime<Utc>,
    /// Instant the entry was written to the log.
    pub recorded_at: DateTime<Utc>,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub source: Option<Account>,
    pub destination: Option<Account>,
    /// Link back to the originating operation or transfer, if any.
    pub reference: Option<String>,
    pub label: String,
}

impl TransactionEntry {
    /// Creates a new entry with a zero sequence number.
    pub fn new(
        kind: TransactionKind,
        amount: Amount,
        date: DateTime<Utc>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence: 0,
            date,
            recorded_at: Utc::now(),
            kind,
            amount,
            source: None,
            destination: None,
            reference: None,
            label: label.into(),
        }
    }

    pub fn with_accounts(mut self, source: Option<Account>, destination: Option<Account>) -> Self {
        self.source = source;
        self.destination = destination;
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Assign the monotonic sequence number used for replay.
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }
}
