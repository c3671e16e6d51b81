//! Application-level utilities for the Delivery CLI.
//!
//! This module provides:
//! - Path resolution for config and ledger files
//! - A lazily-loaded application context
//! - Ledger sessions that load, mutate and save a store

mod context;
mod resolver;
mod session;

// Re-export public API
pub use context::AppContext;
pub use resolver::{missing_ledger_error, resolve_config_path};
