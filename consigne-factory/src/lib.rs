//! Supplier bottle-debt accounting and factory exchange reconciliation.
//!
//! Bottles sent to the factory create a per-type debt the supplier owes
//! back; a single return event per operation settles that debt through an
//! empty-first compensation pass and restocks whatever came back full.

mod debt;
mod error;
mod ledger;
mod operation;
mod reconcile;

pub use debt::{BottleDebt, Settlement};
pub use error::{FactoryError, FactoryResult};
pub use ledger::FactoryLedger;
pub use operation::{ExchangeOperation, ReceivedLine, SentLine};
pub use reconcile::{LineReconciliation, ReturnSummary};
