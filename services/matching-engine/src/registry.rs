//! Order registry
//!
//! Dense id-indexed table of order state with a liveness flag per slot.
//! Lookups are a bounds check and an array read; no hashing on the hot path.

use lob_types::ids::OrderId;
use lob_types::order::Order;

use crate::memory::{self, PageOptions};

#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    order: Order,
    live: bool,
}

/// Id-indexed order table
///
/// Invariant: an id is live iff its entry's flag is set, and a live id is
/// queued exactly once on the side and price stored in its entry.
#[derive(Debug, Clone)]
pub struct OrderRegistry {
    entries: Box<[Entry]>,
    live: usize,
}

impl OrderRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![Entry::default(); capacity].into_boxed_slice(),
            live: 0,
        }
    }

    /// Number of addressable ids; valid ids are `0..capacity`
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn in_range(&self, order_id: OrderId) -> bool {
        order_id.index() < self.entries.len()
    }

    /// Number of live orders
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Liveness flag; out-of-range ids are never live
    #[inline(always)]
    pub fn is_live(&self, order_id: OrderId) -> bool {
        self.entries
            .get(order_id.index())
            .is_some_and(|entry| entry.live)
    }

    /// State of a live order
    #[inline(always)]
    pub fn get(&self, order_id: OrderId) -> Option<&Order> {
        self.entries
            .get(order_id.index())
            .filter(|entry| entry.live)
            .map(|entry| &entry.order)
    }

    /// Mutable state of a live order
    #[inline(always)]
    pub fn get_mut(&mut self, order_id: OrderId) -> Option<&mut Order> {
        self.entries
            .get_mut(order_id.index())
            .filter(|entry| entry.live)
            .map(|entry| &mut entry.order)
    }

    /// Record a newly resting order as live
    ///
    /// The caller has already checked the id is in range and not live.
    #[inline]
    pub fn insert(&mut self, order: Order) {
        let entry = &mut self.entries[order.id.index()];
        debug_assert!(!entry.live, "order {} already live", order.id);
        *entry = Entry { order, live: true };
        self.live += 1;
    }

    /// Clear the liveness flag, returning the final state
    #[inline]
    pub fn retire(&mut self, order_id: OrderId) -> Option<Order> {
        let entry = self.entries.get_mut(order_id.index())?;
        if !entry.live {
            return None;
        }
        entry.live = false;
        self.live -= 1;
        Some(entry.order)
    }

    /// Iterate live orders in id order (full scan)
    pub fn iter_live(&self) -> impl Iterator<Item = &Order> + '_ {
        self.entries.iter().filter(|e| e.live).map(|e| &e.order)
    }

    pub(crate) fn prepare_pages(&mut self, options: PageOptions) {
        memory::prepare(&mut self.entries, options);
    }
}
