//! Append-only financial transaction log and its storage backends.
//!
//! The log is the audit trail of every money movement the back office
//! records. Entries are immutable once appended; account balances are
//! derived elsewhere from validated treasury records, never by mutating
//! the log.

mod entry;
mod error;
mod json;
mod query;
mod repository;
mod sequencer;
mod sqlite;

pub use entry::TransactionEntry;
pub use error::{LedgerError, LedgerResult};
pub use json::JsonTransactionRepository;
pub use query::TransactionQuery;
pub use repository::TransactionRepository;
pub use sequencer::TransactionSequencer;
pub use sqlite::SqliteTransactionRepository;
