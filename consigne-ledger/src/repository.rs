use crate::{LedgerResult, TransactionEntry, TransactionQuery};

/// Abstraction over durable transaction-log storage engines.
pub trait TransactionRepository: Send + Sync {
    /// Persist a single entry.
    fn append(&self, entry: &TransactionEntry) -> LedgerResult<()> {
        self.append_batch(std::slice::from_ref(entry))
    }

    /// Persist a group of entries atomically.
    fn append_batch(&self, entries: &[TransactionEntry]) -> LedgerResult<()>;

    /// Read the latest persisted sequence value.
    fn latest_sequence(&self) -> LedgerResult<Option<u64>>;

    /// Load entries matching the supplied query.
    fn query(&self, query: TransactionQuery) -> LedgerResult<Vec<TransactionEntry>>;
}
