//! Text and table output formatting for deliveries and events.

use delivery_core::{DeliveryRecord, LedgerEvent};

use crate::helpers::format_timestamp;
use crate::ui::{kv, status, table, UiContext};

/// Lines describing one delivery.
pub fn record_lines(ctx: &UiContext, record: &DeliveryRecord) -> Vec<String> {
    vec![
        kv(ctx, "ID", &record.id.to_string()),
        kv(ctx, "Sender", &record.sender),
        kv(ctx, "Recipient", &record.recipient),
        kv(ctx, "Dispatch Time", &format_timestamp(record.dispatch_time)),
        kv(ctx, "Status", &status(ctx, &record.status)),
        kv(ctx, "Delivery Time", &format_timestamp(record.delivery_time)),
    ]
}

/// Print one delivery.
pub fn print_record(ctx: &UiContext, record: &DeliveryRecord) {
    for line in record_lines(ctx, record) {
        println!("{}", line);
    }
}

/// Print deliveries as a table, one row per record.
pub fn print_record_list(ctx: &UiContext, records: &[&DeliveryRecord]) {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            vec![
                record.id.to_string(),
                record.sender.clone(),
                record.recipient.clone(),
                status(ctx, &record.status),
                format_timestamp(record.delivery_time),
            ]
        })
        .collect();
    println!(
        "{}",
        table(
            ctx,
            &["ID", "SENDER", "RECIPIENT", "STATUS", "DELIVERED"],
            &rows
        )
    );
}

/// One-line description of a notification.
pub fn event_line(event: &LedgerEvent) -> String {
    match event {
        LedgerEvent::DeliveryRecorded {
            id,
            sender,
            recipient,
            dispatch_time,
            status,
        } => format!(
            "DeliveryRecorded({}, {:?}, {:?}, {}, {:?})",
            id, sender, recipient, dispatch_time, status
        ),
        LedgerEvent::StatusUpdated {
            id,
            old_status,
            new_status,
        } => format!("StatusUpdated({}, {:?}, {:?})", id, old_status, new_status),
    }
}

/// Print notifications, numbered by their position in the log.
pub fn print_events<'a>(events: impl IntoIterator<Item = (usize, &'a LedgerEvent)>) {
    for (seq, event) in events {
        println!("{} {}", seq, event_line(event));
    }
}
