//! Cash operations, bank transfers, and the account balance calculator.
//!
//! Both record kinds follow the same two-phase life: created pending,
//! validated exactly once, and only then visible to the balance
//! calculator. Validated records are immutable; cancelling one goes
//! through a compensating reversal record, never physical removal.

mod error;
mod journal;
mod records;
mod treasury;

pub use error::{TreasuryError, TreasuryResult};
pub use journal::regularization_entry;
pub use records::{AccountBalance, BankTransfer, CashOperation};
pub use treasury::Treasury;
