use delivery_core::LedgerError;

use crate::app::AppContext;
use crate::cli::EventsArgs;
use crate::errors::from_ledger_error;
use crate::helpers::parse_package_id;
use crate::output::{event_json, print_events};

pub fn handle_events(ctx: &AppContext, args: &EventsArgs) -> anyhow::Result<()> {
    let session = ctx.open_ledger()?;
    let ledger = session.ledger();

    let package = args.package.as_deref().map(parse_package_id).transpose()?;
    if let Some(id) = package {
        if !ledger.exists(id) {
            return Err(from_ledger_error(LedgerError::NotFound(id)));
        }
    }

    let selected: Vec<_> = ledger
        .events()
        .iter()
        .enumerate()
        .map(|(index, event)| (index + 1, event))
        .filter(|(_, event)| package.map_or(true, |id| event.package_id() == id))
        .collect();

    if args.json {
        let output = selected
            .iter()
            .map(|(seq, event)| event_json(*seq, event))
            .collect::<serde_json::Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if selected.is_empty() {
        if !ctx.quiet() {
            println!("No events recorded.");
        }
    } else {
        print_events(selected);
    }
    Ok(())
}
