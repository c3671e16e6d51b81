//! UI primitives for the Delivery CLI.
//!
//! - **Context**: Environment detection (TTY, color) and output mode
//! - **Render**: Tables, key-value lines, status coloring

mod context;
pub mod render;

pub use context::{OutputFormat, UiContext};
pub use render::{kv, status, table};
