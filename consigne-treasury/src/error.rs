use consigne_core::Amount;
use thiserror::Error;
use uuid::Uuid;

/// Result alias for treasury operations.
pub type TreasuryResult<T> = Result<T, TreasuryError>;

/// Error type surfaced by treasury operations.
#[derive(Debug, Error)]
pub enum TreasuryError {
    #[error("unknown cash operation: {0}")]
    UnknownCashOperation(Uuid),
    #[error("unknown bank transfer: {0}")]
    UnknownTransfer(Uuid),
    #[error("record {0} is already validated")]
    AlreadyValidated(Uuid),
    #[error("record {0} is validated and immutable; cancel it with a reversal")]
    ValidatedRecordImmutable(Uuid),
    #[error("record {0} is still pending; delete it instead of reversing")]
    ReversalRequiresValidated(Uuid),
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Amount),
}
