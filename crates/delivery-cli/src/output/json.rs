//! JSON output formatting for deliveries and events.

use delivery_core::{DeliveryRecord, LedgerEvent};

/// Convert a delivery record to JSON for output.
pub fn record_json(record: &DeliveryRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id,
        "sender": record.sender,
        "recipient": record.recipient,
        "dispatch_time": record.dispatch_time,
        "status": record.status,
        "delivery_time": record.delivery_time,
    })
}

/// Convert multiple records to a JSON array for output.
pub fn records_json<'a>(
    records: impl IntoIterator<Item = &'a DeliveryRecord>,
) -> Vec<serde_json::Value> {
    records.into_iter().map(record_json).collect()
}

/// Convert an event to JSON, tagged with its 1-based position in the log.
pub fn event_json(seq: usize, event: &LedgerEvent) -> serde_json::Result<serde_json::Value> {
    let mut value = serde_json::to_value(event)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("seq".to_string(), serde_json::json!(seq));
    }
    Ok(value)
}
