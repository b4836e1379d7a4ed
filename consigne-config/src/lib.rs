//! Typed settings for the Consigne binaries.
//!
//! Settings layer three sources, weakest first: built-in defaults, an
//! optional `consigne.toml`, and `CONSIGNE_`-prefixed environment
//! variables (`CONSIGNE_LEDGER__BACKEND=json`).

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_FILE: &str = "consigne.toml";
const ENV_PREFIX: &str = "CONSIGNE";

/// Top-level settings for every Consigne binary.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Directory the state collections live under.
    pub data_dir: PathBuf,
    pub ledger: LedgerSettings,
    pub log: LogSettings,
}

/// Where the financial transaction log is kept.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LedgerSettings {
    pub backend: LedgerBackend,
    /// Explicit log location; defaults to a file under `data_dir`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Storage engine backing the transaction log.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerBackend {
    Sqlite,
    Json,
}

/// Logging configuration, as an `EnvFilter` directive.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LogSettings {
    pub filter: String,
}

impl Settings {
    /// Load settings from defaults, an optional TOML file, and the
    /// environment.
    ///
    /// An explicitly passed path must exist; the default `consigne.toml`
    /// is optional.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .set_default("data_dir", "./data")?
            .set_default("ledger.backend", "sqlite")?
            .set_default("log.filter", "info")?;
        builder = match explicit {
            Some(path) => builder.add_source(File::from(path.to_path_buf())),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };
        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .context("failed to assemble configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// The resolved transaction-log location.
    pub fn ledger_path(&self) -> PathBuf {
        match (&self.ledger.path, self.ledger.backend) {
            (Some(path), _) => path.clone(),
            (None, LedgerBackend::Sqlite) => self.data_dir.join("transactions.db"),
            (None, LedgerBackend::Json) => self.data_dir.join("transactions.json"),
        }
    }

    /// Render the settings as a TOML document, for `config init`.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to render configuration")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            ledger: LedgerSettings {
                backend: LedgerBackend::Sqlite,
                path: None,
            },
            log: LogSettings {
                filter: "info".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_load_without_a_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.ledger.backend, LedgerBackend::Sqlite);
        assert_eq!(settings.log.filter, "info");
        assert!(settings.ledger_path().ends_with("transactions.db"));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("consigne.toml");
        fs::write(
            &path,
            "data_dir = \"/var/lib/consigne\"\n\n[ledger]\nbackend = \"json\"\n\n[log]\nfilter = \"debug\"\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.ledger.backend, LedgerBackend::Json);
        assert_eq!(settings.data_dir, PathBuf::from("/var/lib/consigne"));
        assert_eq!(
            settings.ledger_path(),
            PathBuf::from("/var/lib/consigne/transactions.json")
        );
    }

    #[test]
    fn default_settings_render_as_toml() {
        let rendered = Settings::default().to_toml().unwrap();
        assert!(rendered.contains("data_dir"));
        assert!(rendered.contains("backend"));
    }
}
