use chrono::Utc;

use delivery_core::NewDelivery;

use crate::app::AppContext;
use crate::cli::RecordArgs;
use crate::errors::from_ledger_error;
use crate::helpers::parse_timestamp;
use crate::output::record_json;

pub fn handle_record(ctx: &AppContext, args: &RecordArgs) -> anyhow::Result<()> {
    let dispatch_time = match args.dispatch_time.as_deref() {
        Some(value) => parse_timestamp(value)?,
        None => Utc::now().timestamp(),
    };

    let mut session = ctx.open_ledger()?;
    let delivery = NewDelivery::new(&args.sender, &args.recipient, dispatch_time)
        .with_status(&args.status);
    let id = session
        .ledger_mut()
        .record_delivery(delivery)
        .map_err(from_ledger_error)?;
    session.save()?;

    if args.json {
        let record = session.ledger().delivery(id)?;
        println!("{}", serde_json::to_string_pretty(&record_json(record))?);
    } else if !ctx.quiet() {
        println!("Recorded delivery {}", id);
    }
    Ok(())
}
