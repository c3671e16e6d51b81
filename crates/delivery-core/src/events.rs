//! Notifications emitted by the ledger.
//!
//! Every successful create or update produces exactly one `LedgerEvent`.
//! The ledger hands it to each registered `EventListener` and then appends
//! it to its `EventLog`, synchronously and in commit order.

use serde::{Deserialize, Serialize};

use crate::record::PackageId;

/// A notification describing a committed ledger change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A new delivery was recorded.
    DeliveryRecorded {
        id: PackageId,
        sender: String,
        recipient: String,
        dispatch_time: i64,
        status: String,
    },

    /// A delivery's status was replaced. `old_status` is the value before the change.
    StatusUpdated {
        id: PackageId,
        old_status: String,
        new_status: String,
    },
}

impl LedgerEvent {
    /// Package the event refers to.
    pub fn package_id(&self) -> PackageId {
        match self {
            LedgerEvent::DeliveryRecorded { id, .. } | LedgerEvent::StatusUpdated { id, .. } => *id,
        }
    }

    /// Event name as it appears in serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::DeliveryRecorded { .. } => "delivery_recorded",
            LedgerEvent::StatusUpdated { .. } => "status_updated",
        }
    }
}

/// Receiver of ledger notifications.
pub trait EventListener: Send {
    fn on_event(&mut self, event: &LedgerEvent);
}

impl<F> EventListener for F
where
    F: FnMut(&LedgerEvent) + Send,
{
    fn on_event(&mut self, event: &LedgerEvent) {
        self(event)
    }
}

/// Listener that writes each notification to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl EventListener for TracingListener {
    fn on_event(&mut self, event: &LedgerEvent) {
        match event {
            LedgerEvent::DeliveryRecorded {
                id,
                sender,
                recipient,
                dispatch_time,
                status,
            } => tracing::info!(
                package_id = %id,
                sender = %sender,
                recipient = %recipient,
                dispatch_time,
                status = %status,
                "delivery recorded"
            ),
            LedgerEvent::StatusUpdated {
                id,
                old_status,
                new_status,
            } => tracing::info!(
                package_id = %id,
                old_status = %old_status,
                new_status = %new_status,
                "status updated"
            ),
        }
    }
}

/// Append-only, in-memory record of emitted notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<LedgerEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&LedgerEvent> {
        self.events.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LedgerEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Events that refer to one package, oldest first.
    pub fn for_package(&self, id: PackageId) -> impl Iterator<Item = &LedgerEvent> {
        self.events.iter().filter(move |e| e.package_id() == id)
    }
}

impl From<Vec<LedgerEvent>> for EventLog {
    fn from(events: Vec<LedgerEvent>) -> Self {
        Self { events }
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a LedgerEvent;
    type IntoIter = std::slice::Iter<'a, LedgerEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn updated(id: u64, old: &str, new: &str) -> LedgerEvent {
        LedgerEvent::StatusUpdated {
            id: PackageId::new(id),
            old_status: old.to_string(),
            new_status: new.to_string(),
        }
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let value = serde_json::to_value(updated(1, "dispatched", "delivered")).unwrap();
        assert_eq!(value["event"], "status_updated");
        assert_eq!(value["id"], 1);
        assert_eq!(value["old_status"], "dispatched");
        assert_eq!(value["new_status"], "delivered");
    }

    #[test]
    fn test_log_filters_by_package() {
        let mut log = EventLog::new();
        log.push(updated(1, "a", "b"));
        log.push(updated(2, "a", "b"));
        log.push(updated(1, "b", "c"));

        assert_eq!(log.len(), 3);
        assert_eq!(log.for_package(PackageId::new(1)).count(), 2);
        assert_eq!(log.last(), Some(&updated(1, "b", "c")));
    }

    #[test]
    fn test_closure_is_a_listener() {
        let mut seen = Vec::new();
        {
            let mut listener = |e: &LedgerEvent| seen.push(e.name());
            listener.on_event(&updated(1, "a", "b"));
        }
        assert_eq!(seen, vec!["status_updated"]);
    }
}
