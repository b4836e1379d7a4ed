use chrono::{DateTime, Utc};
use consigne_core::{Account, TransactionKind};

use crate::TransactionEntry;

/// Filter describing which transaction entries to load from storage.
#[derive(Clone, Debug)]
pub struct TransactionQuery {
    pub kind: Option<TransactionKind>,
    /// Matches entries where the account is either source or destination.
    pub account: Option<Account>,
    pub start_sequence: Option<u64>,
    pub end_sequence: Option<u64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
    pub ascending: bool,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            kind: None,
            account: None,
            start_sequence: None,
            end_sequence: None,
            start_date: None,
            end_date: None,
            limit: None,
            ascending: true,
        }
    }
}

impl TransactionQuery {
    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.account = Some(account);
        self
    }

    pub fn with_sequence_range(mut self, start: Option<u64>, end: Option<u64>) -> Self {
        self.start_sequence = start;
        self.end_sequence = end;
        self
    }

    pub fn with_date_range(
        mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn descending(mut self) -> Self {
        self.ascending = false;
        self
    }

    /// In-memory predicate equivalent of the storage-side filters.
    pub(crate) fn matches(&self, entry: &TransactionEntry) -> bool {
        if let Some(kind) = self.kind {
            if entry.kind != kind {
                return false;
            }
        }
        if let Some(account) = self.account {
            if entry.source != Some(account) && entry.destination != Some(account) {
                return false;
            }
        }
        if let Some(start) = self.start_sequence {
            if entry.sequence < start {
                return false;
            }
        }
        if let Some(end) = self.end_sequence {
            if entry.sequence > end {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if entry.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if entry.date > end {
                return false;
            }
        }
        true
    }
}
