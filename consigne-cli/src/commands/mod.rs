pub mod driver;
pub mod factory;
pub mod ledger;
pub mod treasury;

use std::path::Path;

use anyhow::{Context, Result};
use consigne_config::Settings;

pub use driver::DriverCommand;
pub use factory::FactoryCommand;
pub use ledger::LedgerCommand;
pub use treasury::TreasuryCommand;

/// Write the active settings out as a starter `consigne.toml`.
pub fn config_init(settings: &Settings, path: &Path) -> Result<()> {
    let rendered = settings.to_toml()?;
    std::fs::write(path, rendered)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}
