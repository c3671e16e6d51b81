//! Row types for database queries.

use crate::error::{LedgerError, Result};
use crate::events::LedgerEvent;
use crate::record::{DeliveryRecord, PackageId};

/// Raw row data from the deliveries table, before parsing into domain types.
#[derive(Debug)]
pub struct DeliveryRow {
    pub id: i64,
    pub sender: String,
    pub recipient: String,
    pub dispatch_time: i64,
    pub status: String,
    pub delivery_time: i64,
}

impl DeliveryRow {
    pub fn from_record(record: &DeliveryRecord) -> Result<Self> {
        Ok(Self {
            id: to_sql_id(record.id)?,
            sender: record.sender.clone(),
            recipient: record.recipient.clone(),
            dispatch_time: record.dispatch_time,
            status: record.status.clone(),
            delivery_time: record.delivery_time,
        })
    }
}

impl TryFrom<DeliveryRow> for DeliveryRecord {
    type Error = LedgerError;

    fn try_from(row: DeliveryRow) -> Result<Self> {
        Ok(DeliveryRecord {
            id: from_sql_id(row.id)?,
            sender: row.sender,
            recipient: row.recipient,
            dispatch_time: row.dispatch_time,
            status: row.status,
            delivery_time: row.delivery_time,
        })
    }
}

/// Raw row data from the events table.
#[derive(Debug)]
pub struct EventRow {
    pub seq: i64,
    pub payload_json: String,
}

impl TryFrom<EventRow> for LedgerEvent {
    type Error = LedgerError;

    fn try_from(row: EventRow) -> Result<Self> {
        serde_json::from_str(&row.payload_json).map_err(|e| {
            LedgerError::Storage(format!("Invalid event JSON at seq {}: {}", row.seq, e))
        })
    }
}

pub fn to_sql_id(id: PackageId) -> Result<i64> {
    i64::try_from(id.get())
        .map_err(|_| LedgerError::Storage(format!("Package ID {} out of range", id)))
}

pub fn from_sql_id(value: i64) -> Result<PackageId> {
    u64::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .map(PackageId::new)
        .ok_or_else(|| LedgerError::Storage(format!("Invalid package ID: {}", value)))
}
