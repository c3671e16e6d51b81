use delivery_core::LedgerEvent;

use crate::app::AppContext;
use crate::cli::UpdateArgs;
use crate::errors::from_ledger_error;
use crate::helpers::parse_package_id;
use crate::output::record_json;

pub fn handle_update(ctx: &AppContext, args: &UpdateArgs) -> anyhow::Result<()> {
    let id = parse_package_id(&args.id)?;

    let mut session = ctx.open_ledger()?;
    session
        .ledger_mut()
        .update_status(id, args.status.as_str())
        .map_err(from_ledger_error)?;
    session.save()?;

    if args.json {
        let record = session.ledger().delivery(id)?;
        println!("{}", serde_json::to_string_pretty(&record_json(record))?);
    } else if !ctx.quiet() {
        match session.ledger().events().last() {
            Some(LedgerEvent::StatusUpdated {
                old_status,
                new_status,
                ..
            }) => println!("Updated delivery {}: {} -> {}", id, old_status, new_status),
            _ => println!("Updated delivery {}", id),
        }
    }
    Ok(())
}
