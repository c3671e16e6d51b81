//! Command handlers, one module per subcommand group.

pub mod events;
pub mod init;
pub mod list;
pub mod misc;
pub mod record;
pub mod show;
pub mod update;
