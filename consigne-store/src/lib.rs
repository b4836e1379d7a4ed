//! Persistence boundary for the back-office state.
//!
//! Each ledger persists as its own JSON document under the data
//! directory, the same one-document-per-collection layout the business
//! has always kept. The engines never touch the filesystem themselves;
//! they are handed their state and hand it back.

mod error;
mod store;

pub use error::{StoreError, StoreResult};
pub use store::{DepotState, StateStore};
