use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::{LedgerError, LedgerResult, TransactionEntry, TransactionQuery, TransactionRepository};

/// Transaction log stored as a single JSON array file.
///
/// Mirrors the one-document-per-collection layout the back office has
/// always persisted; the whole array is rewritten on every append, with a
/// temp-file rename so a crash never leaves a torn file behind.
#[derive(Debug)]
pub struct JsonTransactionRepository {
    path: PathBuf,
    entries: Mutex<Vec<TransactionEntry>>,
}

impl JsonTransactionRepository {
    pub fn new(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let path = path.into();
        let entries = load_entries(&path)?;
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &[TransactionEntry]) -> LedgerResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn load_entries(path: &Path) -> LedgerResult<Vec<TransactionEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read(path)?;
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(&raw)?)
}

impl TransactionRepository for JsonTransactionRepository {
    fn append_batch(&self, batch: &[TransactionEntry]) -> LedgerResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let mut entries = self.entries.lock();
        let tail = entries.last().map(|entry| entry.sequence).unwrap_or(0);
        for entry in batch {
            if entry.sequence <= tail {
                return Err(LedgerError::InvalidState(format!(
                    "sequence {} is not past the persisted tail {tail}",
                    entry.sequence
                )));
            }
        }
        entries.extend_from_slice(batch);
        self.persist(&entries)
    }

    fn latest_sequence(&self) -> LedgerResult<Option<u64>> {
        let entries = self.entries.lock();
        Ok(entries.iter().map(|entry| entry.sequence).max())
    }

    fn query(&self, query: TransactionQuery) -> LedgerResult<Vec<TransactionEntry>> {
        let entries = self.entries.lock();
        let mut matched: Vec<TransactionEntry> = entries
            .iter()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect();
        matched.sort_by_key(|entry| entry.sequence);
        if !query.ascending {
            matched.reverse();
        }
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use consigne_core::{Account, TransactionKind};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn sample_entry(kind: TransactionKind, seq: u64) -> TransactionEntry {
        TransactionEntry::new(kind, dec!(100), Utc::now(), format!("entry {seq}"))
            .with_accounts(Some(Account::Espece), None)
            .with_sequence(seq)
    }

    #[test]
    fn json_file_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.json");
        let repo = JsonTransactionRepository::new(&path).unwrap();
        repo.append_batch(&[
            sample_entry(TransactionKind::Encaissement, 1),
            sample_entry(TransactionKind::Depense, 2),
        ])
        .unwrap();
        drop(repo);

        let reopened = JsonTransactionRepository::new(&path).unwrap();
        assert_eq!(reopened.latest_sequence().unwrap(), Some(2));
        let all = reopened.query(TransactionQuery::default()).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].label, "entry 1");
    }

    #[test]
    fn rejects_non_monotonic_sequences() {
        let dir = tempdir().unwrap();
        let repo =
            JsonTransactionRepository::new(dir.path().join("transactions.json")).unwrap();
        repo.append(&sample_entry(TransactionKind::Encaissement, 5))
            .unwrap();
        let stale = sample_entry(TransactionKind::Encaissement, 5);
        assert!(matches!(
            repo.append(&stale),
            Err(LedgerError::InvalidState(_))
        ));
    }

    #[test]
    fn query_respects_kind_and_limit() {
        let dir = tempdir().unwrap();
        let repo =
            JsonTransactionRepository::new(dir.path().join("transactions.json")).unwrap();
        repo.append_batch(&[
            sample_entry(TransactionKind::Encaissement, 1),
            sample_entry(TransactionKind::Encaissement, 2),
            sample_entry(TransactionKind::Depense, 3),
        ])
        .unwrap();

        let latest = repo
            .query(
                TransactionQuery::default()
                    .with_kind(TransactionKind::Encaissement)
                    .descending()
                    .with_limit(1),
            )
            .unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].sequence, 2);
    }
}
