//! Delivery CLI - an append-style ledger of shipped packages
//!
//! This is the command-line host for the delivery ledger. It supplies the
//! pieces the core leaves to its environment: a store on disk, the owner
//! identity, the wall clock and a place for notifications to go.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{events, init, list, misc, record, show, update};
use crate::constants::exit_codes;
use crate::errors::CliError;

fn init_tracing() {
    let filter = std::env::var("DELIVERY_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn main() {
    init_tracing();
    let cli = parse_args();
    let ctx = AppContext::new(&cli);

    if let Err(err) = run(&ctx, &cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            cli_err.exit();
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

/// Parse arguments; rejected flag values exit with the invalid-input code.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::InvalidValue | ErrorKind::ValueValidation) => {
            let _ = err.print();
            std::process::exit(exit_codes::INVALID_INPUT);
        }
        Err(err) => err.exit(),
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args),
        Some(Commands::Record(args)) => record::handle_record(ctx, args),
        Some(Commands::Update(args)) => update::handle_update(ctx, args),
        Some(Commands::Show(args)) => show::handle_show(ctx, args),
        Some(Commands::List(args)) => list::handle_list(ctx, args),
        Some(Commands::Events(args)) => events::handle_events(ctx, args),
        Some(Commands::Owner) => misc::handle_owner(ctx),
        Some(Commands::Check) => misc::handle_check(ctx),
        Some(Commands::Completions { shell }) => misc::handle_completions(*shell),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
