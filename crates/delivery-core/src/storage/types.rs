//! Persistent snapshot of ledger state.

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::events::EventLog;
use crate::record::{DeliveryRecord, Owner, PackageId};

/// Storage format version written to new stores.
pub const FORMAT_VERSION: &str = "0.1";

/// Everything needed to rebuild a `Ledger`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Identity recorded at initialization
    pub owner: Owner,

    /// ID the next create will receive
    pub next_id: PackageId,

    /// Records in creation order
    pub deliveries: Vec<DeliveryRecord>,

    /// Notifications emitted so far, in commit order
    pub events: EventLog,
}

impl LedgerSnapshot {
    /// Snapshot of a ledger with no records.
    pub fn empty(owner: Owner) -> Self {
        Self {
            owner,
            next_id: PackageId::FIRST,
            deliveries: Vec::new(),
            events: EventLog::new(),
        }
    }

    /// Check the ID invariants: records carry IDs `1..=N` in order and the
    /// counter sits at `N + 1`. Events may only reference existing records.
    pub fn validate(&self) -> Result<()> {
        for (index, record) in self.deliveries.iter().enumerate() {
            let expected = index as u64 + 1;
            if record.id.get() != expected {
                return Err(LedgerError::Validation(format!(
                    "Delivery at position {} has ID {} (expected {})",
                    index, record.id, expected
                )));
            }
            if record.delivery_time < 0 {
                return Err(LedgerError::Validation(format!(
                    "Delivery {} has negative delivery time",
                    record.id
                )));
            }
        }

        let expected_next = self.deliveries.len() as u64 + 1;
        if self.next_id.get() != expected_next {
            return Err(LedgerError::Validation(format!(
                "Next ID is {} but {} deliveries are stored",
                self.next_id,
                self.deliveries.len()
            )));
        }

        if let Some(event) = self
            .events
            .iter()
            .find(|event| event.package_id().get() >= expected_next || event.package_id().get() == 0)
        {
            return Err(LedgerError::Validation(format!(
                "Event {} references unknown package {}",
                event.name(),
                event.package_id()
            )));
        }

        Ok(())
    }
}
