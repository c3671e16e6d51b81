//! Authorization hook for ledger mutations.
//!
//! The ledger consults its `Authorizer` before every create and update,
//! before touching any state. The default policy allows everything; hosts
//! that want owner-only writes install `OwnerOnly` explicitly.

use crate::error::{LedgerError, Result};
use crate::record::{NewDelivery, Owner, PackageId};

/// A mutation the ledger is about to perform.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    RecordDelivery(&'a NewDelivery),
    UpdateStatus { id: PackageId, new_status: &'a str },
}

impl Action<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Action::RecordDelivery(_) => "record_delivery",
            Action::UpdateStatus { .. } => "update_status",
        }
    }
}

/// Policy deciding whether a mutation may proceed.
pub trait Authorizer: Send + Sync {
    /// Return `Err(LedgerError::Unauthorized)` to reject the action.
    fn authorize(&self, owner: &Owner, action: &Action<'_>) -> Result<()>;
}

/// Permits every action.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn authorize(&self, _owner: &Owner, _action: &Action<'_>) -> Result<()> {
        Ok(())
    }
}

/// Permits actions only when the acting identity is the ledger owner.
#[derive(Debug, Clone)]
pub struct OwnerOnly {
    caller: Owner,
}

impl OwnerOnly {
    pub fn new(caller: Owner) -> Self {
        Self { caller }
    }
}

impl Authorizer for OwnerOnly {
    fn authorize(&self, owner: &Owner, action: &Action<'_>) -> Result<()> {
        if &self.caller == owner {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized(format!(
                "{} requires the ledger owner (caller: {})",
                action.name(),
                self.caller
            )))
        }
    }
}
