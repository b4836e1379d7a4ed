use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of money accounts balances are derived for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Account {
    Espece,
    Cheque,
    Banque,
    Autre,
}

impl Account {
    /// All accounts, in display order.
    pub const ALL: [Account; 4] = [
        Account::Espece,
        Account::Cheque,
        Account::Banque,
        Account::Autre,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Account::Espece => "espece",
            Account::Cheque => "cheque",
            Account::Banque => "banque",
            Account::Autre => "autre",
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Account {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "espece" => Ok(Account::Espece),
            "cheque" => Ok(Account::Cheque),
            "banque" => Ok(Account::Banque),
            "autre" => Ok(Account::Autre),
            other => Err(format!("unknown account: {other}")),
        }
    }
}

/// Direction of a cash operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlow {
    /// Money paid into the account.
    Versement,
    /// Money taken out of the account.
    Retrait,
}

impl CashFlow {
    pub fn as_str(self) -> &'static str {
        match self {
            CashFlow::Versement => "versement",
            CashFlow::Retrait => "retrait",
        }
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CashFlow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "versement" => Ok(CashFlow::Versement),
            "retrait" => Ok(CashFlow::Retrait),
            other => Err(format!("unknown cash flow: {other}")),
        }
    }
}

/// Kind of an inter-account bank transfer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    /// Cash deposited at the bank counter.
    VersementEspece,
    /// Cheques remitted for collection.
    RemiseCheques,
    /// Withdrawal from the bank account.
    RetraitBancaire,
}

impl TransferKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransferKind::VersementEspece => "versement_espece",
            TransferKind::RemiseCheques => "remise_cheques",
            TransferKind::RetraitBancaire => "retrait_bancaire",
        }
    }
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "versement_espece" => Ok(TransferKind::VersementEspece),
            "remise_cheques" => Ok(TransferKind::RemiseCheques),
            "retrait_bancaire" => Ok(TransferKind::RetraitBancaire),
            other => Err(format!("unknown transfer kind: {other}")),
        }
    }
}

/// Category of an entry in the financial transaction log.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Encaissement,
    Transfert,
    Depense,
    Reparation,
    Ajustement,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Encaissement => "encaissement",
            TransactionKind::Transfert => "transfert",
            TransactionKind::Depense => "depense",
            TransactionKind::Reparation => "reparation",
            TransactionKind::Ajustement => "ajustement",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "encaissement" => Ok(TransactionKind::Encaissement),
            "transfert" => Ok(TransactionKind::Transfert),
            "depense" => Ok(TransactionKind::Depense),
            "reparation" => Ok(TransactionKind::Reparation),
            "ajustement" => Ok(TransactionKind::Ajustement),
            other => Err(format!("unknown transaction kind: {other}")),
        }
    }
}

/// Two-phase commit status of a cash operation or bank transfer.
///
/// Only validated records contribute to account balances; a pending record
/// is invisible to the calculator until it is validated, and validation is
/// one-way.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Pending,
    Validated,
}

impl RecordStatus {
    pub fn is_validated(self) -> bool {
        matches!(self, RecordStatus::Validated)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Validated => "validated",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accounts_round_trip_through_str() {
        for account in Account::ALL {
            assert_eq!(account.as_str().parse::<Account>().unwrap(), account);
        }
    }

    #[test]
    fn transfer_kinds_parse_wire_names() {
        assert_eq!(
            "remise_cheques".parse::<TransferKind>().unwrap(),
            TransferKind::RemiseCheques
        );
        assert!("cheque_remis".parse::<TransferKind>().is_err());
    }
}
