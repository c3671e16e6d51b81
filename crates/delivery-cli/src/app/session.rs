//! A loaded ledger paired with the store it came from.

use std::path::Path;

use delivery_core::{Ledger, LedgerStore, Owner, OwnerOnly, SqliteStore, TracingListener};

use super::resolver::missing_ledger_error;

/// Ledger loaded from disk. Mutations stay in memory until `save`.
pub struct LedgerSession {
    store: SqliteStore,
    ledger: Ledger,
}

impl LedgerSession {
    /// Open the store at `path` and rebuild the ledger from it.
    ///
    /// When the ledger was created with `--enforce-owner`, writes are checked
    /// against `caller` (or the ledger owner when no caller is given).
    pub fn open(path: &Path, caller: Option<Owner>) -> anyhow::Result<Self> {
        if !path.exists() {
            return Err(missing_ledger_error(path).into());
        }

        let store = SqliteStore::open(path)?;
        let mut ledger = Ledger::restore(store.load()?)?;
        if store.enforce_owner()? {
            let caller = caller.unwrap_or_else(|| ledger.owner().clone());
            ledger = ledger.with_authorizer(OwnerOnly::new(caller));
        }
        ledger.subscribe(TracingListener);

        Ok(Self { store, ledger })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Persist the in-memory ledger back to its store.
    pub fn save(&self) -> anyhow::Result<()> {
        self.store.save(&self.ledger.snapshot())?;
        Ok(())
    }
}
