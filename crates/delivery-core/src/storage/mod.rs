//! Storage layer for the delivery ledger.
//!
//! The ledger itself lives in memory. A `LedgerStore` persists its
//! `LedgerSnapshot` between process runs; `SqliteStore` is the bundled
//! backend.

mod sqlite;
mod traits;
mod types;

pub use sqlite::SqliteStore;
pub use traits::LedgerStore;
pub use types::{LedgerSnapshot, FORMAT_VERSION};
