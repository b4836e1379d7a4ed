use consigne_core::{Amount, DriverId};
use thiserror::Error;

/// Result alias for driver-ledger operations.
pub type DriverResult<T> = Result<T, DriverError>;

/// Error type surfaced by driver-ledger operations.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("unknown driver: {0}")]
    UnknownDriver(DriverId),
    #[error("driver already registered: {0}")]
    AlreadyRegistered(DriverId),
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Amount),
}
