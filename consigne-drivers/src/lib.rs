//! Per-driver debt and advance accounting.
//!
//! A driver's account is never stored: it is the fold of an ordered,
//! immutable sequence of ledger events, so the audit history and the
//! displayed balances cannot drift apart.

mod account;
mod error;
mod event;
mod ledger;

pub use account::{DriverAccount, PaymentBreakdown};
pub use error::{DriverError, DriverResult};
pub use event::{DriverEvent, DriverEventKind, EntryType};
pub use ledger::{DriverLedger, DriverRecord};
