//! # Delivery Core
//!
//! Core library for the delivery ledger: an append-style record of shipped
//! packages and the status changes they go through.
//!
//! This crate provides the ledger model, its operations, notifications and
//! storage abstractions independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **ledger**: the `Ledger` state and its create/update/read operations
//! - **record**: delivery records, identifiers and owner identity
//! - **events**: notifications emitted on create/update and their listeners
//! - **clock**: time source used to stamp status updates
//! - **auth**: authorization hook consulted before mutations
//! - **storage**: snapshot persistence (SQLite backend)

pub mod auth;
pub mod clock;
pub mod error;
pub mod events;
pub mod ledger;
pub mod record;
pub mod storage;

pub use auth::{Action, AllowAll, Authorizer, OwnerOnly};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{LedgerError, Result};
pub use events::{EventListener, EventLog, LedgerEvent, TracingListener};
pub use ledger::Ledger;
pub use record::{DeliveryRecord, NewDelivery, Owner, PackageId};
pub use storage::{LedgerSnapshot, LedgerStore, SqliteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
