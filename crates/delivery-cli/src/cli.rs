use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use delivery_core::VERSION;

use crate::ui::OutputFormat;

/// Delivery - an append-style ledger of shipped packages and their status
#[derive(Parser)]
#[command(name = "delivery")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the ledger file
    #[arg(short, long, global = true, env = "DELIVERY_LEDGER_PATH")]
    pub ledger: Option<String>,

    /// Identity performing writes (defaults to the configured owner)
    #[arg(long, global = true, env = "DELIVERY_IDENTITY")]
    pub caller: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the ledger will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Owner identity to record (defaults to a generated ID)
    #[arg(long)]
    pub owner: Option<String>,

    /// Only allow the owner to record and update deliveries
    #[arg(long)]
    pub enforce_owner: bool,

    /// Config path override
    #[arg(long)]
    pub config_path: Option<String>,
}

/// Arguments for the `record` command
#[derive(Args)]
pub struct RecordArgs {
    /// Sender name
    #[arg(long)]
    pub sender: String,

    /// Recipient name
    #[arg(long)]
    pub recipient: String,

    /// Dispatch time (unix seconds, ISO-8601 or YYYY-MM-DD; defaults to now)
    #[arg(long, value_name = "TIME", allow_hyphen_values = true)]
    pub dispatch_time: Option<String>,

    /// Initial status
    #[arg(long, default_value = "dispatched")]
    pub status: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `update` command
#[derive(Args)]
pub struct UpdateArgs {
    /// Package ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// New status
    #[arg(value_name = "STATUS")]
    pub status: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Package ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Print only package IDs
    #[arg(long)]
    pub ids: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `events` command
#[derive(Args)]
pub struct EventsArgs {
    /// Only show events for this package ID
    #[arg(long, value_name = "ID")]
    pub package: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new delivery ledger
    Init(InitArgs),

    /// Record a new delivery
    Record(RecordArgs),

    /// Update the status of a delivery
    Update(UpdateArgs),

    /// Show a delivery by ID
    Show(ShowArgs),

    /// List deliveries in creation order
    List(ListArgs),

    /// Show emitted notifications
    Events(EventsArgs),

    /// Print the ledger owner
    Owner,

    /// Check ledger integrity
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}
