use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::output::{print_record_list, records_json};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let session = ctx.open_ledger()?;
    let ledger = session.ledger();
    let ui = ctx.ui_context(args.json, args.format);

    if args.ids {
        if ui.mode.is_json() {
            println!("{}", serde_json::to_string(ledger.package_ids())?);
        } else {
            for id in ledger.package_ids() {
                println!("{}", id);
            }
        }
        return Ok(());
    }

    let records: Vec<_> = ledger.deliveries().collect();
    if ui.mode.is_json() {
        let output = records_json(records.iter().copied());
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if records.is_empty() {
        if !ctx.quiet() {
            println!("No deliveries recorded.");
        }
    } else {
        print_record_list(&ui, &records);
    }
    Ok(())
}
