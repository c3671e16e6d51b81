use clap::CommandFactory;
use clap_complete::generate;

use delivery_core::{LedgerStore, SqliteStore};

use crate::app::{missing_ledger_error, AppContext};
use crate::cli::Cli;
use crate::errors::CliError;

pub fn handle_owner(ctx: &AppContext) -> anyhow::Result<()> {
    let session = ctx.open_ledger()?;
    println!("{}", session.ledger().owner());
    Ok(())
}

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let path = ctx.ledger_path()?;
    if !path.exists() {
        return Err(missing_ledger_error(&path).into());
    }

    let store = SqliteStore::open(&path)?;
    match store.check_integrity() {
        Ok(()) => {
            if !ctx.quiet() {
                println!("Integrity check: OK");
                println!("- sqlite: OK");
                println!("- package IDs: OK");
                println!("- events: OK");
            }
            Ok(())
        }
        Err(err) => Err(CliError::IntegrityFailed(format!(
            "Integrity check failed: {}\nHint: Restore the ledger file from a backup.",
            err
        ))
        .into()),
    }
}

pub fn handle_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "delivery", &mut std::io::stdout());
    Ok(())
}
