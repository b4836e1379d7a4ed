use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use consigne_core::{Account, TransactionKind};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{LedgerError, LedgerResult, TransactionEntry, TransactionQuery, TransactionRepository};

const LEDGER_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS transaction_entries (
    sequence INTEGER PRIMARY KEY,
    entry_id TEXT NOT NULL UNIQUE,
    date TEXT NOT NULL,
    recorded_at TEXT NOT NULL,
    kind TEXT NOT NULL,
    amount TEXT NOT NULL,
    source TEXT,
    destination TEXT,
    reference TEXT,
    label TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS transaction_idx_date_kind
    ON transaction_entries(date, kind);
CREATE INDEX IF NOT EXISTS transaction_idx_reference
    ON transaction_entries(reference);
"#;

/// SQLite-backed transaction log used by the default configuration.
#[derive(Clone, Debug)]
pub struct SqliteTransactionRepository {
    path: PathBuf,
}

impl SqliteTransactionRepository {
    pub fn new(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let repo = Self { path: path.into() };
        repo.initialize_schema()?;
        Ok(repo)
    }

    fn initialize_schema(&self) -> LedgerResult<()> {
        let conn = self.connect()?;
        conn.execute_batch(LEDGER_SCHEMA)?;
        Ok(())
    }

    fn connect(&self) -> LedgerResult<Connection> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
        Ok(conn)
    }
}

impl TransactionRepository for SqliteTransactionRepository {
    fn append_batch(&self, entries: &[TransactionEntry]) -> LedgerResult<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        for entry in entries {
            tx.execute(
                "INSERT INTO transaction_entries (
                    sequence, entry_id, date, recorded_at, kind, amount, source, destination, reference, label
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    entry.sequence as i64,
                    entry.id.to_string(),
                    entry.date.to_rfc3339(),
                    entry.recorded_at.to_rfc3339(),
                    entry.kind.as_str(),
                    entry.amount.to_string(),
                    entry.source.map(|account| account.as_str()),
                    entry.destination.map(|account| account.as_str()),
                    entry.reference,
                    entry.label,
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn latest_sequence(&self) -> LedgerResult<Option<u64>> {
        let conn = self.connect()?;
        let seq: Option<Option<i64>> = conn
            .query_row("SELECT MAX(sequence) FROM transaction_entries", [], |row| {
                row.get::<_, Option<i64>>(0)
            })
            .optional()?;
        Ok(seq.flatten().map(|value| value as u64))
    }

    fn query(&self, query: TransactionQuery) -> LedgerResult<Vec<TransactionEntry>> {
        let conn = self.connect()?;
        let mut sql = String::from(
            "SELECT sequence, entry_id, date, recorded_at, kind, amount, source, destination, reference, label
             FROM transaction_entries
             WHERE (?1 IS NULL OR kind = ?1)
               AND (?2 IS NULL OR source = ?2 OR destination = ?2)
               AND (?3 IS NULL OR sequence >= ?3)
               AND (?4 IS NULL OR sequence <= ?4)
               AND (?5 IS NULL OR date >= ?5)
               AND (?6 IS NULL OR date <= ?6)",
        );
        sql.push_str(if query.ascending {
            " ORDER BY sequence ASC"
        } else {
            " ORDER BY sequence DESC"
        });
        if query.limit.is_some() {
            sql.push_str(" LIMIT ?7");
        }

        let mut params: Vec<Value> = Vec::with_capacity(7);
        params.push(optional_text(
            query.kind.map(|kind| kind.as_str().to_string()),
        ));
        params.push(optional_text(
            query.account.map(|account| account.as_str().to_string()),
        ));
        params.push(optional_int(query.start_sequence));
        params.push(optional_int(query.end_sequence));
        params.push(optional_text(query.start_date.map(|ts| ts.to_rfc3339())));
        params.push(optional_text(query.end_date.map(|ts| ts.to_rfc3339())));
        if let Some(limit) = query.limit {
            params.push(Value::Integer(limit as i64));
        }

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(row_to_entry(row)?);
        }
        Ok(entries)
    }
}

fn optional_text(value: Option<String>) -> Value {
    value.map(Value::from).unwrap_or(Value::Null)
}

fn optional_int(value: Option<u64>) -> Value {
    value
        .map(|v| Value::Integer(v as i64))
        .unwrap_or(Value::Null)
}

fn parse_timestamp(raw: &str) -> LedgerResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| LedgerError::Serialization(format!("invalid timestamp {raw}: {err}")))
}

fn parse_account(raw: Option<String>) -> LedgerResult<Option<Account>> {
    raw.map(|value| Account::from_str(&value).map_err(LedgerError::Serialization))
        .transpose()
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> LedgerResult<TransactionEntry> {
    let sequence: i64 = row.get(0)?;
    let entry_id: String = row.get(1)?;
    let date_str: String = row.get(2)?;
    let recorded_str: String = row.get(3)?;
    let kind_str: String = row.get(4)?;
    let amount_str: String = row.get(5)?;
    let source: Option<String> = row.get(6)?;
    let destination: Option<String> = row.get(7)?;
    let reference: Option<String> = row.get(8)?;
    let label: String = row.get(9)?;

    let kind = TransactionKind::from_str(&kind_str).map_err(LedgerError::Serialization)?;
    let amount = Decimal::from_str(&amount_str).map_err(|err| {
        LedgerError::Serialization(format!("invalid decimal {amount_str}: {err}"))
    })?;

    Ok(TransactionEntry {
        id: Uuid::parse_str(&entry_id).map_err(|err| {
            LedgerError::Serialization(format!("invalid entry id {entry_id}: {err}"))
        })?,
        sequence: sequence as u64,
        date: parse_timestamp(&date_str)?,
        recorded_at: parse_timestamp(&recorded_str)?,
        kind,
        amount,
        source: parse_account(source)?,
        destination: parse_account(destination)?,
        reference,
        label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[test]
    fn sqlite_roundtrip() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("ledger.db");
        let repo = SqliteTransactionRepository::new(&db_path).unwrap();
        let entry = TransactionEntry::new(
            TransactionKind::Transfert,
            dec!(1500),
            Utc::now(),
            "remise de cheques",
        )
        .with_accounts(Some(Account::Cheque), Some(Account::Banque))
        .with_reference("transfer-1")
        .with_sequence(1);
        repo.append(&entry).unwrap();

        let result = repo
            .query(TransactionQuery::default().with_sequence_range(Some(1), Some(10)))
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].amount, dec!(1500));
        assert_eq!(result[0].kind, TransactionKind::Transfert);
        assert_eq!(result[0].source, Some(Account::Cheque));
        assert_eq!(result[0].destination, Some(Account::Banque));
    }

    #[test]
    fn query_filters_by_account_on_either_side() {
        let dir = tempdir().unwrap();
        let repo = SqliteTransactionRepository::new(dir.path().join("ledger.db")).unwrap();
        let outgoing = TransactionEntry::new(
            TransactionKind::Depense,
            dec!(200),
            Utc::now(),
            "achat gasoil",
        )
        .with_accounts(Some(Account::Espece), None)
        .with_sequence(1);
        let incoming = TransactionEntry::new(
            TransactionKind::Encaissement,
            dec!(900),
            Utc::now(),
            "encaissement client",
        )
        .with_accounts(None, Some(Account::Banque))
        .with_sequence(2);
        repo.append_batch(&[outgoing, incoming]).unwrap();

        let banque = repo
            .query(TransactionQuery::default().with_account(Account::Banque))
            .unwrap();
        assert_eq!(banque.len(), 1);
        assert_eq!(banque[0].sequence, 2);
        assert_eq!(repo.latest_sequence().unwrap(), Some(2));
    }
}
