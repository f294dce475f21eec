//! # Dispute Store
//!
//! In-memory persistence for dispute records with per-dispute exclusive
//! critical sections.
//!
//! ## Concurrency Model
//!
//! Each record lives behind its own `Arc<Mutex<_>>`. The lifecycle
//! controller holds a record's lock across its check-then-write sequence,
//! so two concurrent reveals can never both pass a stale "not yet
//! revealed" check. Operations on different disputes take different
//! locks and run fully in parallel. The outer map lock is held only for
//! lookup and insertion, never across a record operation.
//!
//! A hosting environment with sequential transaction application can
//! supply the same guarantee itself; this store is the standalone
//! equivalent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use verdict_core::{DisputeId, OrderId};

use crate::error::DisputeError;
use crate::record::DisputeRecord;

/// A handle to one dispute's exclusive critical section.
pub type DisputeHandle = Arc<Mutex<DisputeRecord>>;

#[derive(Debug, Default)]
struct StoreInner {
    by_id: HashMap<DisputeId, DisputeHandle>,
    /// One dispute per order, ever; reopening is host policy.
    by_order: HashMap<OrderId, DisputeId>,
}

/// Keeper of all dispute records.
#[derive(Debug, Default)]
pub struct DisputeStore {
    inner: RwLock<StoreInner>,
}

impl DisputeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly opened dispute.
    ///
    /// # Errors
    ///
    /// Returns [`DisputeError::DisputeAlreadyOpen`] if the order already
    /// has a dispute.
    pub fn insert(&self, record: DisputeRecord) -> Result<(), DisputeError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.by_order.contains_key(&record.order_id) {
            return Err(DisputeError::DisputeAlreadyOpen(record.order_id));
        }
        inner.by_order.insert(record.order_id, record.id);
        inner
            .by_id
            .insert(record.id, Arc::new(Mutex::new(record)));
        Ok(())
    }

    /// The critical-section handle for a dispute.
    pub fn handle(&self, id: &DisputeId) -> Result<DisputeHandle, DisputeError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .by_id
            .get(id)
            .cloned()
            .ok_or(DisputeError::NotFound(*id))
    }

    /// A point-in-time copy of a dispute record.
    pub fn snapshot(&self, id: &DisputeId) -> Result<DisputeRecord, DisputeError> {
        let handle = self.handle(id)?;
        let record = handle.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(record.clone())
    }

    /// The dispute covering an order, if any.
    pub fn dispute_for_order(&self, order_id: &OrderId) -> Option<DisputeId> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.by_order.get(order_id).copied()
    }

    /// All dispute identifiers, in no particular order.
    pub fn ids(&self) -> Vec<DisputeId> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.by_id.keys().copied().collect()
    }

    /// Number of stored disputes.
    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.by_id.len()
    }

    /// Whether the store holds no disputes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
