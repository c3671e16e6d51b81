//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying deliveries
//! and notifications as JSON, tables or plain text.

mod json;
mod text;

// Re-export public API
pub use json::{event_json, record_json, records_json};
pub use text::{print_events, print_record, print_record_list};
