//! Storage backend trait definition.
//!
//! `LedgerStore` abstracts where a ledger snapshot lives between runs, so
//! the core logic does not depend on a particular backend.

use std::path::Path;

use super::types::LedgerSnapshot;
use crate::error::Result;
use crate::record::Owner;

/// Persistence interface for ledger snapshots.
///
/// Implementations must ensure:
/// - `save` is atomic: a failed save leaves the previous snapshot intact
/// - `load` returns exactly what the last successful `save` wrote
/// - the owner written by `create` is never changed
/// - `save` rejects snapshots that `validate` would reject
pub trait LedgerStore: Send + Sync {
    /// Create a new, empty store at `path` owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Storage` if:
    /// - File already exists
    /// - Cannot write to path
    fn create(path: &Path, owner: &Owner) -> Result<Self>
    where
        Self: Sized;

    /// Open an existing store.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Storage` if the file is missing or is not a
    /// delivery ledger.
    fn open(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Read the stored snapshot.
    fn load(&self) -> Result<LedgerSnapshot>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()>;

    /// Whether writes are restricted to the ledger owner.
    ///
    /// Stores created before the flag existed report `false`.
    fn enforce_owner(&self) -> Result<bool>;

    /// Turn the owner-only write policy on or off for this ledger.
    fn set_enforce_owner(&self, enforce: bool) -> Result<()>;

    /// Check backend integrity and the snapshot's ID invariants.
    fn check_integrity(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_definition_compiles() {
        fn _accepts_store<T: LedgerStore>(_store: T) {}
    }
}
