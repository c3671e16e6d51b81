//! Path resolution for config and ledger files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, DeliveryConfig};
use crate::errors::CliError;

/// Resolve the config file path, checking DELIVERY_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("DELIVERY_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the ledger file path from CLI args or config.
pub fn resolve_ledger_path(cli: &Cli, config: Option<&DeliveryConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.ledger.as_deref() {
        return Ok(PathBuf::from(path));
    }

    match config {
        Some(config) => Ok(PathBuf::from(&config.ledger.path)),
        None => {
            let config_path = resolve_config_path()?;
            Err(CliError::not_found(
                format!("No config found at {}", config_path.display()),
                missing_ledger_hint(),
            )
            .into())
        }
    }
}

/// Load the config file if it exists.
pub fn load_config() -> anyhow::Result<Option<DeliveryConfig>> {
    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        return Ok(None);
    }
    read_config(&config_path).map(Some)
}

/// Error for a ledger path with no file behind it.
pub fn missing_ledger_error(path: &Path) -> CliError {
    CliError::not_found(
        format!("No ledger found at {}", path.display()),
        missing_ledger_hint(),
    )
}

fn missing_ledger_hint() -> String {
    "Run:\n  delivery init\n\nOr specify a ledger path:\n  DELIVERY_LEDGER_PATH=/path/to/deliveries.db delivery init".to_string()
}
