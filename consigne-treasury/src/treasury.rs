use chrono::{DateTime, Utc};
use consigne_core::{Account, Amount, CashFlow, RecordStatus, TransferKind};
use consigne_ledger::TransactionEntry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    journal::regularization_entry, AccountBalance, BankTransfer, CashOperation, TreasuryError,
    TreasuryResult,
};

/// All cash operations and bank transfers, pending and validated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Treasury {
    cash_operations: Vec<CashOperation>,
    transfers: Vec<BankTransfer>,
}

impl Treasury {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- cash operations -----

    /// Create a pending cash operation.
    pub fn add_cash_operation(
        &mut self,
        flow: CashFlow,
        account: Account,
        amount: Amount,
        date: DateTime<Utc>,
        label: impl Into<String>,
    ) -> TreasuryResult<Uuid> {
        check_amount(amount)?;
        let operation = CashOperation {
            id: Uuid::new_v4(),
            date,
            amount,
            flow,
            account,
            status: RecordStatus::Pending,
            label: label.into(),
            reverses: None,
        };
        let id = operation.id;
        self.cash_operations.push(operation);
        Ok(id)
    }

    /// Rewrite a pending cash operation; validated records are immutable.
    pub fn update_cash_operation(
        &mut self,
        id: Uuid,
        flow: CashFlow,
        account: Account,
        amount: Amount,
        date: DateTime<Utc>,
        label: impl Into<String>,
    ) -> TreasuryResult<()> {
        check_amount(amount)?;
        let operation = self.cash_operation_mut(id)?;
        if operation.status.is_validated() {
            return Err(TreasuryError::ValidatedRecordImmutable(id));
        }
        operation.flow = flow;
        operation.account = account;
        operation.amount = amount;
        operation.date = date;
        operation.label = label.into();
        Ok(())
    }

    /// One-way transition to validated.
    pub fn validate_cash_operation(&mut self, id: Uuid) -> TreasuryResult<()> {
        let operation = self.cash_operation_mut(id)?;
        if operation.status.is_validated() {
            return Err(TreasuryError::AlreadyValidated(id));
        }
        operation.status = RecordStatus::Validated;
        Ok(())
    }

    /// Remove a pending cash operation. A validated record stays in the
    /// history; use [`Treasury::reverse_cash_operation`] instead.
    pub fn delete_cash_operation(&mut self, id: Uuid) -> TreasuryResult<CashOperation> {
        let index = self
            .cash_operations
            .iter()
            .position(|op| op.id == id)
            .ok_or(TreasuryError::UnknownCashOperation(id))?;
        if self.cash_operations[index].status.is_validated() {
            return Err(TreasuryError::ValidatedRecordImmutable(id));
        }
        Ok(self.cash_operations.remove(index))
    }

    /// Cancel a validated cash operation with a compensating record of
    /// the opposite flow, validated immediately. Both records stay.
    pub fn reverse_cash_operation(
        &mut self,
        id: Uuid,
        date: DateTime<Utc>,
    ) -> TreasuryResult<Uuid> {
        let original = self.cash_operation(id)?.clone();
        if !original.status.is_validated() {
            return Err(TreasuryError::ReversalRequiresValidated(id));
        }
        let reversal = CashOperation {
            id: Uuid::new_v4(),
            date,
            amount: original.amount,
            flow: match original.flow {
                CashFlow::Versement => CashFlow::Retrait,
                CashFlow::Retrait => CashFlow::Versement,
            },
            account: original.account,
            status: RecordStatus::Validated,
            label: format!("annulation: {}", original.label),
            reverses: Some(id),
        };
        let reversal_id = reversal.id;
        self.cash_operations.push(reversal);
        Ok(reversal_id)
    }

    pub fn cash_operation(&self, id: Uuid) -> TreasuryResult<&CashOperation> {
        self.cash_operations
            .iter()
            .find(|op| op.id == id)
            .ok_or(TreasuryError::UnknownCashOperation(id))
    }

    pub fn cash_operations(&self) -> &[CashOperation] {
        &self.cash_operations
    }

    // ----- bank transfers -----

    /// Create a pending bank transfer.
    pub fn add_transfer(
        &mut self,
        kind: TransferKind,
        source: Account,
        destination: Account,
        amount: Amount,
        date: DateTime<Utc>,
    ) -> TreasuryResult<Uuid> {
        check_amount(amount)?;
        let transfer = BankTransfer {
            id: Uuid::new_v4(),
            date,
            amount,
            kind,
            source,
            destination,
            status: RecordStatus::Pending,
            reverses: None,
        };
        let id = transfer.id;
        self.transfers.push(transfer);
        Ok(id)
    }

    /// Rewrite a pending transfer; validated records are immutable.
    pub fn update_transfer(
        &mut self,
        id: Uuid,
        kind: TransferKind,
        source: Account,
        destination: Account,
        amount: Amount,
        date: DateTime<Utc>,
    ) -> TreasuryResult<()> {
        check_amount(amount)?;
        let transfer = self.transfer_mut(id)?;
        if transfer.status.is_validated() {
            return Err(TreasuryError::ValidatedRecordImmutable(id));
        }
        transfer.kind = kind;
        transfer.source = source;
        transfer.destination = destination;
        transfer.amount = amount;
        transfer.date = date;
        Ok(())
    }

    /// One-way transition to validated.
    ///
    /// A cheque remittance additionally yields the regularization entry
    /// the caller must append to the transaction log; other kinds yield
    /// nothing.
    pub fn validate_transfer(&mut self, id: Uuid) -> TreasuryResult<Option<TransactionEntry>> {
        let transfer = self.transfer_mut(id)?;
        if transfer.status.is_validated() {
            return Err(TreasuryError::AlreadyValidated(id));
        }
        transfer.status = RecordStatus::Validated;
        Ok(regularization_entry(transfer))
    }

    /// Remove a pending transfer. A validated record stays in the
    /// history; use [`Treasury::reverse_transfer`] instead.
    pub fn delete_transfer(&mut self, id: Uuid) -> TreasuryResult<BankTransfer> {
        let index = self
            .transfers
            .iter()
            .position(|transfer| transfer.id == id)
            .ok_or(TreasuryError::UnknownTransfer(id))?;
        if self.transfers[index].status.is_validated() {
            return Err(TreasuryError::ValidatedRecordImmutable(id));
        }
        Ok(self.transfers.remove(index))
    }

    /// Cancel a validated transfer with a compensating record moving the
    /// same amount back, validated immediately. Both records stay.
    pub fn reverse_transfer(&mut self, id: Uuid, date: DateTime<Utc>) -> TreasuryResult<Uuid> {
        let original = self.transfer(id)?.clone();
        if !original.status.is_validated() {
            return Err(TreasuryError::ReversalRequiresValidated(id));
        }
        let reversal = BankTransfer {
            id: Uuid::new_v4(),
            date,
            amount: original.amount,
            kind: original.kind,
            source: original.destination,
            destination: original.source,
            status: RecordStatus::Validated,
            reverses: Some(id),
        };
        let reversal_id = reversal.id;
        self.transfers.push(reversal);
        Ok(reversal_id)
    }

    pub fn transfer(&self, id: Uuid) -> TreasuryResult<&BankTransfer> {
        self.transfers
            .iter()
            .find(|transfer| transfer.id == id)
            .ok_or(TreasuryError::UnknownTransfer(id))
    }

    pub fn transfers(&self) -> &[BankTransfer] {
        &self.transfers
    }

    // ----- balances -----

    /// Derive one account's balance from validated records only.
    ///
    /// Recomputed on every call; pending records contribute nothing.
    pub fn balance(&self, account: Account) -> Amount {
        let cash: Amount = self
            .cash_operations
            .iter()
            .filter(|op| op.account == account && op.status.is_validated())
            .map(CashOperation::signed_amount)
            .sum();
        let transfers: Amount = self
            .transfers
            .iter()
            .filter(|transfer| transfer.status.is_validated())
            .map(|transfer| transfer.contribution(account))
            .sum();
        cash + transfers
    }

    /// Balance rows for every account, in display order.
    pub fn balances(&self) -> Vec<AccountBalance> {
        Account::ALL
            .into_iter()
            .map(|account| AccountBalance {
                account,
                balance: self.balance(account),
            })
            .collect()
    }

    fn cash_operation_mut(&mut self, id: Uuid) -> TreasuryResult<&mut CashOperation> {
        self.cash_operations
            .iter_mut()
            .find(|op| op.id == id)
            .ok_or(TreasuryError::UnknownCashOperation(id))
    }

    fn transfer_mut(&mut self, id: Uuid) -> TreasuryResult<&mut BankTransfer> {
        self.transfers
            .iter_mut()
            .find(|transfer| transfer.id == id)
            .ok_or(TreasuryError::UnknownTransfer(id))
    }
}

fn check_amount(amount: Amount) -> TreasuryResult<()> {
    if amount <= Amount::ZERO {
        return Err(TreasuryError::NonPositiveAmount(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use consigne_core::TransactionKind;
    use rust_decimal_macros::dec;

    #[test]
    fn pending_records_never_move_a_balance() {
        let mut treasury = Treasury::new();
        treasury
            .add_cash_operation(
                CashFlow::Versement,
                Account::Espece,
                dec!(500),
                Utc::now(),
                "vente comptoir",
            )
            .unwrap();
        treasury
            .add_transfer(
                TransferKind::VersementEspece,
                Account::Espece,
                Account::Banque,
                dec!(200),
                Utc::now(),
            )
            .unwrap();

        for account in Account::ALL {
            assert_eq!(treasury.balance(account), Amount::ZERO);
        }
    }

    #[test]
    fn validation_applies_the_signed_contribution_exactly() {
        let mut treasury = Treasury::new();
        let deposit = treasury
            .add_cash_operation(
                CashFlow::Versement,
                Account::Espece,
                dec!(500),
                Utc::now(),
                "vente comptoir",
            )
            .unwrap();
        let withdrawal = treasury
            .add_cash_operation(
                CashFlow::Retrait,
                Account::Espece,
                dec!(120),
                Utc::now(),
                "achat gasoil",
            )
            .unwrap();

        treasury.validate_cash_operation(deposit).unwrap();
        assert_eq!(treasury.balance(Account::Espece), dec!(500));
        treasury.validate_cash_operation(withdrawal).unwrap();
        assert_eq!(treasury.balance(Account::Espece), dec!(380));
    }

    #[test]
    fn transfer_moves_value_between_accounts_on_validation() {
        let mut treasury = Treasury::new();
        let transfer = treasury
            .add_transfer(
                TransferKind::VersementEspece,
                Account::Espece,
                Account::Banque,
                dec!(300),
                Utc::now(),
            )
            .unwrap();
        let entry = treasury.validate_transfer(transfer).unwrap();

        assert!(entry.is_none());
        assert_eq!(treasury.balance(Account::Espece), dec!(-300));
        assert_eq!(treasury.balance(Account::Banque), dec!(300));
    }

    #[test]
    fn same_account_transfer_nets_to_zero() {
        let mut treasury = Treasury::new();
        let transfer = treasury
            .add_transfer(
                TransferKind::RetraitBancaire,
                Account::Banque,
                Account::Banque,
                dec!(300),
                Utc::now(),
            )
            .unwrap();
        treasury.validate_transfer(transfer).unwrap();
        assert_eq!(treasury.balance(Account::Banque), Amount::ZERO);
    }

    #[test]
    fn cheque_remittance_yields_exactly_one_regularization_entry() {
        let mut treasury = Treasury::new();
        let transfer = treasury
            .add_transfer(
                TransferKind::RemiseCheques,
                Account::Cheque,
                Account::Banque,
                dec!(1500),
                Utc::now(),
            )
            .unwrap();
        let entry = treasury.validate_transfer(transfer).unwrap().unwrap();

        assert_eq!(entry.kind, TransactionKind::Transfert);
        assert_eq!(entry.amount, dec!(1500));
        assert_eq!(entry.source, Some(Account::Cheque));
        assert_eq!(entry.destination, Some(Account::Banque));
        assert_eq!(entry.reference.as_deref(), Some(transfer.to_string().as_str()));
        assert_eq!(treasury.balance(Account::Cheque), dec!(-1500));
        assert_eq!(treasury.balance(Account::Banque), dec!(1500));
    }

    #[test]
    fn validation_is_one_way() {
        let mut treasury = Treasury::new();
        let id = treasury
            .add_cash_operation(
                CashFlow::Versement,
                Account::Espece,
                dec!(10),
                Utc::now(),
                "x",
            )
            .unwrap();
        treasury.validate_cash_operation(id).unwrap();
        assert!(matches!(
            treasury.validate_cash_operation(id),
            Err(TreasuryError::AlreadyValidated(_))
        ));
    }

    #[test]
    fn pending_records_can_be_updated_and_deleted() {
        let mut treasury = Treasury::new();
        let id = treasury
            .add_cash_operation(
                CashFlow::Versement,
                Account::Espece,
                dec!(100),
                Utc::now(),
                "brouillon",
            )
            .unwrap();
        treasury
            .update_cash_operation(
                id,
                CashFlow::Retrait,
                Account::Banque,
                dec!(250),
                Utc::now(),
                "corrige",
            )
            .unwrap();
        assert_eq!(treasury.cash_operation(id).unwrap().amount, dec!(250));

        treasury.delete_cash_operation(id).unwrap();
        assert!(treasury.cash_operations().is_empty());
    }

    #[test]
    fn validated_records_refuse_update_and_delete() {
        let mut treasury = Treasury::new();
        let id = treasury
            .add_cash_operation(
                CashFlow::Versement,
                Account::Espece,
                dec!(100),
                Utc::now(),
                "vente",
            )
            .unwrap();
        treasury.validate_cash_operation(id).unwrap();

        assert!(matches!(
            treasury.update_cash_operation(
                id,
                CashFlow::Versement,
                Account::Espece,
                dec!(1),
                Utc::now(),
                "x"
            ),
            Err(TreasuryError::ValidatedRecordImmutable(_))
        ));
        assert!(matches!(
            treasury.delete_cash_operation(id),
            Err(TreasuryError::ValidatedRecordImmutable(_))
        ));
        // The balance is untouched by the refused mutations.
        assert_eq!(treasury.balance(Account::Espece), dec!(100));
    }

    #[test]
    fn reversal_restores_the_balance_and_keeps_both_records() {
        let mut treasury = Treasury::new();
        let id = treasury
            .add_cash_operation(
                CashFlow::Versement,
                Account::Espece,
                dec!(100),
                Utc::now(),
                "vente",
            )
            .unwrap();
        treasury.validate_cash_operation(id).unwrap();
        let reversal = treasury.reverse_cash_operation(id, Utc::now()).unwrap();

        assert_eq!(treasury.balance(Account::Espece), Amount::ZERO);
        assert_eq!(treasury.cash_operations().len(), 2);
        assert_eq!(
            treasury.cash_operation(reversal).unwrap().reverses,
            Some(id)
        );
    }

    #[test]
    fn transfer_reversal_swaps_the_accounts() {
        let mut treasury = Treasury::new();
        let id = treasury
            .add_transfer(
                TransferKind::VersementEspece,
                Account::Espece,
                Account::Banque,
                dec!(400),
                Utc::now(),
            )
            .unwrap();
        treasury.validate_transfer(id).unwrap();
        treasury.reverse_transfer(id, Utc::now()).unwrap();

        assert_eq!(treasury.balance(Account::Espece), Amount::ZERO);
        assert_eq!(treasury.balance(Account::Banque), Amount::ZERO);
        assert_eq!(treasury.transfers().len(), 2);
    }

    #[test]
    fn reversing_a_pending_record_is_refused() {
        let mut treasury = Treasury::new();
        let id = treasury
            .add_cash_operation(
                CashFlow::Versement,
                Account::Espece,
                dec!(100),
                Utc::now(),
                "brouillon",
            )
            .unwrap();
        assert!(matches!(
            treasury.reverse_cash_operation(id, Utc::now()),
            Err(TreasuryError::ReversalRequiresValidated(_))
        ));
    }

    #[test]
    fn amounts_must_be_positive() {
        let mut treasury = Treasury::new();
        assert!(matches!(
            treasury.add_cash_operation(
                CashFlow::Versement,
                Account::Espece,
                Amount::ZERO,
                Utc::now(),
                "rien",
            ),
            Err(TreasuryError::NonPositiveAmount(_))
        ));
        assert!(matches!(
            treasury.add_transfer(
                TransferKind::RemiseCheques,
                Account::Cheque,
                Account::Banque,
                dec!(-5),
                Utc::now(),
            ),
            Err(TreasuryError::NonPositiveAmount(_))
        ));
    }
}
