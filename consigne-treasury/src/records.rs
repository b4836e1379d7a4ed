use chrono::{DateTime, Utc};
use consigne_core::{Account, Amount, CashFlow, RecordStatus, TransferKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Money paid into or taken out of one account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CashOperation {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub amount: Amount,
    pub flow: CashFlow,
    pub account: Account,
    pub status: RecordStatus,
    pub label: String,
    /// Id of the validated record this one compensates, if any.
    pub reverses: Option<Uuid>,
}

impl CashOperation {
    /// Signed contribution to its account once validated.
    pub fn signed_amount(&self) -> Amount {
        match self.flow {
            CashFlow::Versement => self.amount,
            CashFlow::Retrait => -self.amount,
        }
    }
}

/// Money moved between two accounts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BankTransfer {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub amount: Amount,
    pub kind: TransferKind,
    pub source: Account,
    pub destination: Account,
    pub status: RecordStatus,
    /// Id of the validated record this one compensates, if any.
    pub reverses: Option<Uuid>,
}

impl BankTransfer {
    /// Signed contribution of this transfer to the given account.
    ///
    /// Source and destination apply independently, so a same-account
    /// transfer nets to zero by construction.
    pub fn contribution(&self, account: Account) -> Amount {
        let mut delta = Amount::ZERO;
        if self.source == account {
            delta -= self.amount;
        }
        if self.destination == account {
            delta += self.amount;
        }
        delta
    }
}

/// Display row for one account's derived balance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account: Account,
    pub balance: Amount,
}
