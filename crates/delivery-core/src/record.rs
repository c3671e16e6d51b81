//! Core data types for delivery records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LedgerError;

/// Identifier assigned to a package by the ledger.
///
/// IDs start at 1 and increase by one per successful create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(u64);

impl PackageId {
    /// The first ID a fresh ledger hands out.
    pub const FIRST: PackageId = PackageId(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PackageId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for PackageId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('#');
        trimmed
            .parse::<u64>()
            .map(PackageId)
            .map_err(|e| LedgerError::Validation(format!("Invalid package ID {:?}: {}", s, e)))
    }
}

/// Identity recorded as the ledger's owner at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Owner(String);

impl Owner {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    /// Generate a fresh random owner identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored delivery record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Identifier assigned by the ledger
    pub id: PackageId,

    /// Free-form sender name
    pub sender: String,

    /// Free-form recipient name
    pub recipient: String,

    /// Dispatch time in unix seconds, fixed at creation
    pub dispatch_time: i64,

    /// Current status
    pub status: String,

    /// Time of the latest status update in unix seconds; 0 if never updated
    pub delivery_time: i64,
}

impl DeliveryRecord {
    /// True until the first status update.
    pub fn is_pending(&self) -> bool {
        self.delivery_time == 0
    }
}

/// Builder for creating new delivery records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDelivery {
    pub sender: String,
    pub recipient: String,
    pub dispatch_time: i64,
    pub status: String,
}

impl NewDelivery {
    /// Status used when the caller does not supply one.
    pub const DEFAULT_STATUS: &'static str = "dispatched";

    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, dispatch_time: i64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            dispatch_time,
            status: Self::DEFAULT_STATUS.to_string(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub(crate) fn into_record(self, id: PackageId) -> DeliveryRecord {
        DeliveryRecord {
            id,
            sender: self.sender,
            recipient: self.recipient,
            dispatch_time: self.dispatch_time,
            status: self.status,
            delivery_time: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_delivery_builder() {
        let delivery = NewDelivery::new("Alice", "Bob", 1000);
        assert_eq!(delivery.status, "dispatched");

        let delivery = delivery.with_status("in transit");
        assert_eq!(delivery.sender, "Alice");
        assert_eq!(delivery.recipient, "Bob");
        assert_eq!(delivery.dispatch_time, 1000);
        assert_eq!(delivery.status, "in transit");
    }

    #[test]
    fn test_into_record_starts_pending() {
        let record = NewDelivery::new("Alice", "Bob", 1000).into_record(PackageId::FIRST);
        assert_eq!(record.id, PackageId::new(1));
        assert_eq!(record.delivery_time, 0);
        assert!(record.is_pending());
    }

    #[test]
    fn test_package_id_parse() {
        assert_eq!("7".parse::<PackageId>().unwrap(), PackageId::new(7));
        assert_eq!("#12".parse::<PackageId>().unwrap(), PackageId::new(12));
        assert!("abc".parse::<PackageId>().is_err());
        assert!("-1".parse::<PackageId>().is_err());
    }

    #[test]
    fn test_package_id_serializes_as_number() {
        let json = serde_json::to_string(&PackageId::new(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn test_generated_owners_differ() {
        assert_ne!(Owner::generate(), Owner::generate());
    }
}
