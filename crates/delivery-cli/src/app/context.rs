//! Application context for the Delivery CLI.
//!
//! Provides a unified context that combines CLI arguments with
//! lazily-loaded configuration.

use std::path::{Path, PathBuf};

use once_cell::unsync::OnceCell;

use delivery_core::Owner;

use crate::cli::Cli;
use crate::config::DeliveryConfig;
use crate::ui::{OutputFormat, UiContext};

use super::resolver::{load_config, resolve_ledger_path};
use super::session::LedgerSession;

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<DeliveryConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config file contents, loading them lazily. `None` if no config exists.
    pub fn config(&self) -> anyhow::Result<Option<&DeliveryConfig>> {
        Ok(self.config.get_or_try_init(load_config)?.as_ref())
    }

    /// Resolve the ledger file path from flags, env or config.
    pub fn ledger_path(&self) -> anyhow::Result<PathBuf> {
        resolve_ledger_path(self.cli, self.config()?)
    }

    /// Identity performing writes to the ledger at `path`.
    ///
    /// `--caller` wins. Otherwise the configured owner is used, but only when
    /// the config describes this ledger.
    pub fn caller(&self, path: &Path) -> anyhow::Result<Option<Owner>> {
        if let Some(caller) = self.cli.caller.as_deref() {
            return Ok(Some(Owner::new(caller)));
        }
        Ok(self
            .config()?
            .filter(|config| config.points_at(path))
            .and_then(|config| config.identity.owner.as_deref())
            .map(Owner::new))
    }

    /// Open the ledger with the write policy stored in it.
    pub fn open_ledger(&self) -> anyhow::Result<LedgerSession> {
        let path = self.ledger_path()?;
        LedgerSession::open(&path, self.caller(&path)?)
    }

    /// Build a UI context for the given output flags.
    pub fn ui_context(&self, json: bool, format: Option<OutputFormat>) -> UiContext {
        UiContext::from_env(json, format)
    }
}
