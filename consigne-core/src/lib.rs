//! Core domain types shared by the Consigne back-office crates.

mod accounts;
mod bottles;
mod ids;
mod money;

pub use accounts::{Account, CashFlow, RecordStatus, TransactionKind, TransferKind};
pub use bottles::{BottleCondition, DebtKind};
pub use ids::{BottleTypeId, DriverId, OperationId, TruckId};
pub use money::Amount;
