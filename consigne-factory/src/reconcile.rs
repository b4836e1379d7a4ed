use consigne_core::{BottleTypeId, OperationId};
use serde::{Deserialize, Serialize};

/// Outcome of reconciling one factory return.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnSummary {
    pub operation: OperationId,
    /// `total_received - total_sent` over the whole operation. This figure
    /// is deliberately independent of the per-type compensation pass.
    pub debt_change: i64,
    pub lines: Vec<LineReconciliation>,
}

/// Per-bottle-type trace of how a received quantity was absorbed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineReconciliation {
    pub bottle_type: BottleTypeId,
    pub received: u32,
    /// Portion matched against empties sent on this operation.
    pub empty_compensated: u32,
    /// Portion matched against defectives sent on this operation.
    pub defective_compensated: u32,
    /// Portion beyond everything sent; booked as extra empties owed to
    /// the business.
    pub excess: u32,
}
