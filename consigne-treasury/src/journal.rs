use consigne_core::{TransactionKind, TransferKind};
use consigne_ledger::TransactionEntry;

use crate::BankTransfer;

/// Build the transaction-log entry a transfer produces on validation.
///
/// Only a cheque remittance writes to the log: validating it records the
/// cheque-to-bank regularization. The entry carries a zero sequence; the
/// caller assigns one from its sequencer before appending.
pub fn regularization_entry(transfer: &BankTransfer) -> Option<TransactionEntry> {
    match transfer.kind {
        TransferKind::RemiseCheques => Some(
            TransactionEntry::new(
                TransactionKind::Transfert,
                transfer.amount,
                transfer.date,
                "regularisation remise de cheques",
            )
            .with_accounts(Some(transfer.source), Some(transfer.destination))
            .with_reference(transfer.id.to_string()),
        ),
        TransferKind::VersementEspece | TransferKind::RetraitBancaire => None,
    }
}
