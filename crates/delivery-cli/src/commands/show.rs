use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::errors::from_ledger_error;
use crate::helpers::parse_package_id;
use crate::output::{print_record, record_json};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let id = parse_package_id(&args.id)?;
    let session = ctx.open_ledger()?;
    let record = session.ledger().delivery(id).map_err(from_ledger_error)?;

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&record_json(record))?);
    } else {
        print_record(&ui, record);
    }
    Ok(())
}
