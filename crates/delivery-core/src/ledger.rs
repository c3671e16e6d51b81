//! The delivery ledger.
//!
//! `Ledger` owns every delivery record, hands out package IDs and emits a
//! notification for each committed change. Operations take `&self` or
//! `&mut self`, so a single writer at a time is enforced by the borrow
//! checker rather than by locking.

use std::collections::HashMap;
use std::fmt;

use crate::auth::{Action, AllowAll, Authorizer};
use crate::clock::{Clock, SystemClock};
use crate::error::{LedgerError, Result};
use crate::events::{EventListener, EventLog, LedgerEvent};
use crate::record::{DeliveryRecord, NewDelivery, Owner, PackageId};
use crate::storage::LedgerSnapshot;

/// Append-style ledger of package deliveries.
pub struct Ledger {
    owner: Owner,
    records: HashMap<PackageId, DeliveryRecord>,
    order: Vec<PackageId>,
    next_id: PackageId,
    events: EventLog,
    listeners: Vec<Box<dyn EventListener>>,
    clock: Box<dyn Clock>,
    authorizer: Box<dyn Authorizer>,
}

impl Ledger {
    /// Create an empty ledger owned by `owner`.
    pub fn new(owner: Owner) -> Self {
        Self {
            owner,
            records: HashMap::new(),
            order: Vec::new(),
            next_id: PackageId::FIRST,
            events: EventLog::new(),
            listeners: Vec::new(),
            clock: Box::new(SystemClock),
            authorizer: Box::new(AllowAll),
        }
    }

    /// Replace the time source used to stamp status updates.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the authorization policy consulted before mutations.
    pub fn with_authorizer(mut self, authorizer: impl Authorizer + 'static) -> Self {
        self.authorizer = Box::new(authorizer);
        self
    }

    /// Register a listener. Listeners run in registration order.
    pub fn subscribe(&mut self, listener: impl EventListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Identity recorded when the ledger was initialized.
    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    /// Record a new delivery and return its package ID.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Unauthorized` if the installed authorizer
    /// rejects the action. The default policy never does.
    pub fn record_delivery(&mut self, delivery: NewDelivery) -> Result<PackageId> {
        self.authorize(&Action::RecordDelivery(&delivery))?;

        let id = self.next_id;
        self.next_id = id.next();

        let record = delivery.into_record(id);
        let event = LedgerEvent::DeliveryRecorded {
            id,
            sender: record.sender.clone(),
            recipient: record.recipient.clone(),
            dispatch_time: record.dispatch_time,
            status: record.status.clone(),
        };
        self.records.insert(id, record);
        self.order.push(id);

        tracing::debug!(package_id = %id, "delivery stored");
        self.emit(event);
        Ok(id)
    }

    /// Replace the status of an existing delivery and stamp its delivery time.
    ///
    /// The delivery time is set on every update, not only the first one.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if no record has this ID, or
    /// `LedgerError::Unauthorized` if the authorizer rejects the action.
    /// Either way the ledger is left unchanged.
    pub fn update_status(&mut self, id: PackageId, new_status: impl Into<String>) -> Result<()> {
        let new_status = new_status.into();
        if !self.exists(id) {
            tracing::warn!(package_id = %id, "status update for unknown package");
            return Err(LedgerError::NotFound(id));
        }
        self.authorize(&Action::UpdateStatus {
            id,
            new_status: &new_status,
        })?;

        // Zero is reserved for "never updated".
        let now = self.clock.now().max(1);
        let record = self
            .records
            .get_mut(&id)
            .ok_or(LedgerError::NotFound(id))?;
        let old_status = std::mem::replace(&mut record.status, new_status.clone());
        record.delivery_time = now;

        tracing::debug!(
            package_id = %id,
            old_status = %old_status,
            new_status = %new_status,
            delivery_time = now,
            "status stored"
        );
        self.emit(LedgerEvent::StatusUpdated {
            id,
            old_status,
            new_status,
        });
        Ok(())
    }

    /// Borrow a delivery record.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if no record has this ID.
    pub fn delivery(&self, id: PackageId) -> Result<&DeliveryRecord> {
        self.records.get(&id).ok_or(LedgerError::NotFound(id))
    }

    /// Owned copy of a delivery record, detached from the ledger.
    pub fn delivery_details(&self, id: PackageId) -> Result<DeliveryRecord> {
        self.delivery(id).cloned()
    }

    /// All package IDs in creation order.
    pub fn package_ids(&self) -> &[PackageId] {
        &self.order
    }

    /// Records in creation order.
    pub fn deliveries(&self) -> impl Iterator<Item = &DeliveryRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn exists(&self, id: PackageId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every notification emitted so far, in commit order.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Capture the persistent state of the ledger.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            owner: self.owner.clone(),
            next_id: self.next_id,
            deliveries: self.deliveries().cloned().collect(),
            events: self.events.clone(),
        }
    }

    /// Rebuild a ledger from a snapshot.
    ///
    /// Listeners are not replayed; the restored event log is history only.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` if the snapshot breaks the ID
    /// invariants (IDs `1..=N` in order, counter at `N + 1`).
    pub fn restore(snapshot: LedgerSnapshot) -> Result<Self> {
        snapshot.validate()?;

        let LedgerSnapshot {
            owner,
            next_id,
            deliveries,
            events,
        } = snapshot;

        let mut ledger = Ledger::new(owner);
        ledger.next_id = next_id;
        ledger.order = deliveries.iter().map(|record| record.id).collect();
        ledger.records = deliveries
            .into_iter()
            .map(|record| (record.id, record))
            .collect();
        ledger.events = events;
        Ok(ledger)
    }

    fn authorize(&self, action: &Action<'_>) -> Result<()> {
        self.authorizer
            .authorize(&self.owner, action)
            .inspect_err(|err| tracing::warn!(action = action.name(), error = %err, "action denied"))
    }

    fn emit(&mut self, event: LedgerEvent) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
        self.events.push(event);
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("owner", &self.owner)
            .field("deliveries", &self.order.len())
            .field("next_id", &self.next_id)
            .field("events", &self.events.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
