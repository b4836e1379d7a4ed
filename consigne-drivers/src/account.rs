use consigne_core::Amount;
use serde::{Deserialize, Serialize};

use crate::DriverEventKind;

/// Snapshot of a driver's position, derived by folding ledger events.
///
/// `debt` never goes below zero; `balance` is always recomputed from the
/// two counters, never stored on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverAccount {
    pub debt: Amount,
    pub advances: Amount,
}

impl DriverAccount {
    /// Signed position: negative means the driver owes the business.
    pub fn balance(&self) -> Amount {
        self.advances - self.debt
    }

    /// Apply one event to the running state.
    pub fn apply(&mut self, kind: &DriverEventKind) {
        match kind {
            DriverEventKind::DebtAdjusted { delta } => {
                self.debt = (self.debt + delta).max(Amount::ZERO);
            }
            DriverEventKind::PaymentReceived { amount } => {
                if *amount <= self.debt {
                    self.debt -= amount;
                } else {
                    self.advances += amount - self.debt;
                    self.debt = Amount::ZERO;
                }
            }
        }
    }

    /// Fold a full event sequence into an account snapshot.
    pub fn fold<'a>(kinds: impl IntoIterator<Item = &'a DriverEventKind>) -> Self {
        let mut account = Self::default();
        for kind in kinds {
            account.apply(kind);
        }
        account
    }
}

/// How a payment split between outstanding debt and standing advance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub applied_to_debt: Amount,
    pub to_advances: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn debt_is_clamped_at_zero() {
        let account = DriverAccount::fold([
            &DriverEventKind::DebtAdjusted { delta: dec!(50) },
            &DriverEventKind::DebtAdjusted { delta: dec!(-80) },
        ]);
        assert_eq!(account.debt, Amount::ZERO);
        assert_eq!(account.advances, Amount::ZERO);
        assert_eq!(account.balance(), Amount::ZERO);
    }

    #[test]
    fn payment_overflow_becomes_advance() {
        let account = DriverAccount::fold([
            &DriverEventKind::DebtAdjusted { delta: dec!(50) },
            &DriverEventKind::PaymentReceived { amount: dec!(80) },
        ]);
        assert_eq!(account.debt, Amount::ZERO);
        assert_eq!(account.advances, dec!(30));
        assert_eq!(account.balance(), dec!(30));
    }

    #[test]
    fn partial_payment_leaves_advances_untouched() {
        let account = DriverAccount::fold([
            &DriverEventKind::DebtAdjusted { delta: dec!(100) },
            &DriverEventKind::PaymentReceived { amount: dec!(40) },
        ]);
        assert_eq!(account.debt, dec!(60));
        assert_eq!(account.advances, Amount::ZERO);
        assert_eq!(account.balance(), dec!(-60));
    }
}
