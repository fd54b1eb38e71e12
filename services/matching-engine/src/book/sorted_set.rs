//! Sorted-array best-price index
//!
//! Occupied slots kept in a fixed-capacity array ordered worst to best, so
//! the best slot is the last element and consuming it is a plain truncate.

use std::cmp::Ordering;

use super::price_index::{PriceIndex, Priority};

/// Fixed-capacity sorted set of occupied price slots
#[derive(Debug, Clone)]
pub struct SortedPriceSet {
    data: Box<[u32]>,
    len: usize,
    priority: Priority,
}

impl SortedPriceSet {
    /// Capacity equals the number of slots, so inserts never overflow.
    pub fn new(slots: usize, priority: Priority) -> Self {
        Self {
            data: vec![0u32; slots].into_boxed_slice(),
            len: 0,
            priority,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Occupied slots, best first
    pub fn iter_best_first(&self) -> impl Iterator<Item = usize> + '_ {
        self.data[..self.len].iter().rev().map(|&s| s as usize)
    }

    /// Worst-to-best comparison used for the backing order
    fn cmp(&self, a: u32, b: u32) -> Ordering {
        match self.priority {
            Priority::Highest => a.cmp(&b),
            Priority::Lowest => b.cmp(&a),
        }
    }

    fn search(&self, slot: usize) -> Result<usize, usize> {
        let slot = slot as u32;
        self.data[..self.len].binary_search_by(|probe| self.cmp(*probe, slot))
    }
}

impl PriceIndex for SortedPriceSet {
    fn insert(&mut self, slot: usize) {
        debug_assert!(slot < self.data.len(), "slot {slot} outside sorted set");
        if let Err(position) = self.search(slot) {
            self.data.copy_within(position..self.len, position + 1);
            self.data[position] = slot as u32;
            self.len += 1;
        }
    }

    fn remove(&mut self, slot: usize) {
        if let Ok(position) = self.search(slot) {
            self.data.copy_within(position + 1..self.len, position);
            self.len -= 1;
        }
    }

    #[inline]
    fn best(&self) -> Option<usize> {
        self.len.checked_sub(1).map(|last| self.data[last] as usize)
    }

    fn contains(&self, slot: usize) -> bool {
        self.search(slot).is_ok()
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }
}
