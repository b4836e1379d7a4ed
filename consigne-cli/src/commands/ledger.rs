use anyhow::Result;
use clap::Subcommand;
use consigne_config::{LedgerBackend, Settings};
use consigne_core::{Account, TransactionKind};
use consigne_ledger::{
    JsonTransactionRepository, SqliteTransactionRepository, TransactionEntry, TransactionQuery,
    TransactionRepository, TransactionSequencer,
};

#[derive(Debug, Subcommand)]
pub enum LedgerCommand {
    /// List transaction-log entries, newest first.
    List {
        #[arg(long)]
        kind: Option<TransactionKind>,
        #[arg(long)]
        account: Option<Account>,
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
}

/// Open the transaction log the settings point at.
pub fn open_repository(settings: &Settings) -> Result<Box<dyn TransactionRepository>> {
    let path = settings.ledger_path();
    Ok(match settings.ledger.backend {
        LedgerBackend::Sqlite => Box::new(SqliteTransactionRepository::new(path)?),
        LedgerBackend::Json => Box::new(JsonTransactionRepository::new(path)?),
    })
}

/// Assign the next sequence and append one entry to the configured log.
pub fn append_entry(settings: &Settings, entry: TransactionEntry) -> Result<u64> {
    let repo = open_repository(settings)?;
    let sequencer = TransactionSequencer::bootstrap(repo.as_ref())?;
    let entry = entry.with_sequence(sequencer.next());
    let sequence = entry.sequence;
    repo.append(&entry)?;
    Ok(sequence)
}

pub fn handle(command: LedgerCommand, settings: &Settings) -> Result<bool> {
    match command {
        LedgerCommand::List {
            kind,
            account,
            limit,
        } => {
            let repo = open_repository(settings)?;
            let mut query = TransactionQuery::default().descending().with_limit(limit);
            if let Some(kind) = kind {
                query = query.with_kind(kind);
            }
            if let Some(account) = account {
                query = query.with_account(account);
            }
            for entry in repo.query(query)? {
                println!(
                    "{:>6}  {}  {:<13} {:>12}  {} -> {}  {}",
                    entry.sequence,
                    entry.date.format("%Y-%m-%d"),
                    entry.kind,
                    entry.amount,
                    entry
                        .source
                        .map(|account| account.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    entry
                        .destination
                        .map(|account| account.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    entry.label
                );
            }
            Ok(false)
        }
    }
}
