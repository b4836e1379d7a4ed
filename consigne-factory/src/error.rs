use consigne_core::OperationId;
use thiserror::Error;

/// Result alias for factory-ledger operations.
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Error type surfaced by factory-ledger operations.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("unknown factory operation: {0}")]
    UnknownOperation(OperationId),
    #[error("factory operation {0} already has its return recorded")]
    OperationCompleted(OperationId),
    #[error("a send needs at least one line with a positive quantity")]
    EmptySend,
    #[error("settlement quantity must be positive")]
    ZeroQuantity,
}
