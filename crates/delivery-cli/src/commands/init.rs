use std::path::PathBuf;

use delivery_core::{LedgerStore, Owner, SqliteStore};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_ledger_path, write_config, DeliveryConfig};
use crate::errors::CliError;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let target = match args.path.as_deref().or(ctx.cli().ledger.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => default_ledger_path()?,
    };
    if target.exists() {
        return Err(CliError::invalid_input(format!(
            "A file already exists at {}\nHint: Choose another path or remove the existing file.",
            target.display()
        ))
        .into());
    }

    let owner = args
        .owner
        .as_deref()
        .map(Owner::new)
        .unwrap_or_else(Owner::generate);

    let store = SqliteStore::create(&target, &owner)?;
    store.set_enforce_owner(args.enforce_owner)?;

    let config_path = match args.config_path.as_deref() {
        Some(path) => PathBuf::from(path),
        None => resolve_config_path()?,
    };
    if config_path.exists() {
        tracing::info!(
            config = %config_path.display(),
            "replacing existing config"
        );
    }
    let config = DeliveryConfig::new(&target, Some(owner.to_string()));
    write_config(&config_path, &config)?;

    if !ctx.quiet() {
        println!("Initialized delivery ledger at {}", target.display());
        println!("Owner: {}", owner);
        if args.enforce_owner {
            println!("Writes: owner only");
        }
        println!("Config: {}", config_path.display());
    }
    Ok(())
}
