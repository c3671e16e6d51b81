//! Helper functions for the CLI.

mod parsing;

pub use parsing::{format_timestamp, parse_package_id, parse_timestamp};
