use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use consigne_core::{BottleCondition, BottleTypeId, DebtKind, OperationId, TruckId};
use serde::{Deserialize, Serialize};

use crate::{
    BottleDebt, ExchangeOperation, FactoryError, FactoryResult, LineReconciliation, ReceivedLine,
    ReturnSummary, SentLine, Settlement,
};

/// Supplier bottle-debt ledger, exchange operations, and the sellable
/// stock touched by returns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FactoryLedger {
    debts: BTreeMap<BottleTypeId, BottleDebt>,
    operations: Vec<ExchangeOperation>,
    settlements: Vec<Settlement>,
    stock: BTreeMap<BottleTypeId, i64>,
}

impl FactoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a truck leaving for the factory.
    ///
    /// Every sent bottle becomes supplier debt of the matching kind.
    /// Zero-quantity lines are dropped; a send with nothing left after
    /// that is refused.
    pub fn record_send(
        &mut self,
        truck: TruckId,
        driver_name: impl Into<String>,
        date: DateTime<Utc>,
        lines: Vec<SentLine>,
    ) -> FactoryResult<OperationId> {
        let kept: Vec<SentLine> = lines.into_iter().filter(|line| line.quantity > 0).collect();
        if kept.is_empty() {
            return Err(FactoryError::EmptySend);
        }
        for line in &kept {
            let debt = self.debts.entry(line.bottle_type).or_default();
            match line.condition {
                BottleCondition::Empty => debt.empty += i64::from(line.quantity),
                BottleCondition::Defective => debt.defective += i64::from(line.quantity),
            }
        }
        let operation = ExchangeOperation::new(truck, driver_name, date, kept);
        let id = operation.id;
        self.operations.push(operation);
        Ok(id)
    }

    /// Reconcile the single return event of a pending operation.
    ///
    /// Received bottles compensate the operation's sent empties first,
    /// then its sent defectives; anything beyond that is booked as extra
    /// empties owed to the business. Everything received goes back to
    /// sellable stock, and the operation is completed for good.
    pub fn reconcile_return(
        &mut self,
        operation: OperationId,
        received: &[ReceivedLine],
        date: DateTime<Utc>,
    ) -> FactoryResult<ReturnSummary> {
        let op = self
            .operations
            .iter_mut()
            .find(|op| op.id == operation)
            .ok_or(FactoryError::UnknownOperation(operation))?;
        if !op.is_pending() {
            return Err(FactoryError::OperationCompleted(operation));
        }

        let mut sent: BTreeMap<BottleTypeId, (u32, u32)> = BTreeMap::new();
        for line in &op.sent {
            let per_type = sent.entry(line.bottle_type).or_default();
            match line.condition {
                BottleCondition::Empty => per_type.0 = per_type.0.saturating_add(line.quantity),
                BottleCondition::Defective => {
                    per_type.1 = per_type.1.saturating_add(line.quantity)
                }
            }
        }

        let mut incoming: BTreeMap<BottleTypeId, u32> = BTreeMap::new();
        for line in received.iter().filter(|line| line.quantity > 0) {
            let qty = incoming.entry(line.bottle_type).or_default();
            *qty = qty.saturating_add(line.quantity);
        }

        let mut lines = Vec::with_capacity(incoming.len());
        let mut total_received: u64 = 0;
        for (&bottle_type, &quantity) in &incoming {
            total_received += u64::from(quantity);
            let (sent_empty, sent_defective) =
                sent.get(&bottle_type).copied().unwrap_or_default();

            let mut remaining = quantity;
            let empty_compensated = remaining.min(sent_empty);
            remaining -= empty_compensated;
            let defective_compensated = remaining.min(sent_defective);
            remaining -= defective_compensated;

            let debt = self.debts.entry(bottle_type).or_default();
            debt.empty -= i64::from(empty_compensated);
            debt.defective -= i64::from(defective_compensated);
            // More came back than was ever sent of this type: booked as
            // empties owed in the business's favor.
            debt.empty += i64::from(remaining);

            // Returned bottles come back full and sellable.
            *self.stock.entry(bottle_type).or_default() += i64::from(quantity);

            lines.push(LineReconciliation {
                bottle_type,
                received: quantity,
                empty_compensated,
                defective_compensated,
                excess: remaining,
            });
        }

        let debt_change = total_received as i64 - op.total_sent() as i64;
        op.received = incoming
            .into_iter()
            .map(|(bottle_type, quantity)| ReceivedLine {
                bottle_type,
                quantity,
            })
            .collect();
        op.debt_change = Some(debt_change);
        op.returned_at = Some(date);

        Ok(ReturnSummary {
            operation,
            debt_change,
            lines,
        })
    }

    /// Manually settle part of a supplier debt.
    ///
    /// No floor is applied; over-settling leaves a supplier credit.
    pub fn settle(
        &mut self,
        bottle_type: BottleTypeId,
        kind: DebtKind,
        quantity: u32,
        date: DateTime<Utc>,
        description: impl Into<String>,
    ) -> FactoryResult<Settlement> {
        if quantity == 0 {
            return Err(FactoryError::ZeroQuantity);
        }
        let debt = self.debts.entry(bottle_type).or_default();
        match kind {
            DebtKind::Empty => debt.empty -= i64::from(quantity),
            DebtKind::Defective => debt.defective -= i64::from(quantity),
        }
        let settlement = Settlement::new(bottle_type, kind, quantity, date, description);
        self.settlements.push(settlement.clone());
        Ok(settlement)
    }

    /// Current debt for a bottle type; zero if it never appeared.
    pub fn debt(&self, bottle_type: BottleTypeId) -> BottleDebt {
        self.debts.get(&bottle_type).copied().unwrap_or_default()
    }

    pub fn debts(&self) -> impl Iterator<Item = (BottleTypeId, BottleDebt)> + '_ {
        self.debts.iter().map(|(id, debt)| (*id, *debt))
    }

    pub fn operation(&self, id: OperationId) -> Option<&ExchangeOperation> {
        self.operations.iter().find(|op| op.id == id)
    }

    pub fn operations(&self) -> &[ExchangeOperation] {
        &self.operations
    }

    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    /// Sellable full-bottle stock for a type.
    pub fn stock(&self, bottle_type: BottleTypeId) -> i64 {
        self.stock.get(&bottle_type).copied().unwrap_or_default()
    }
}
