//! Best-price index
//!
//! Tracks which price slots on one side currently hold resting orders and
//! answers "which occupied slot is most aggressive". Slots are zero-based
//! table indexes; the price bias is applied by the owning `BookSide`.

use serde::{Deserialize, Serialize};

use super::bitset::PriceBitset;
use super::sorted_set::SortedPriceSet;

/// Ordering of a side: bids prefer the highest slot, asks the lowest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Highest,
    Lowest,
}

impl Priority {
    /// True if `a` is strictly more aggressive than `b`
    #[inline(always)]
    pub fn better(self, a: usize, b: usize) -> bool {
        match self {
            Priority::Highest => a > b,
            Priority::Lowest => a < b,
        }
    }
}

/// Set of occupied price slots with a best-element query
pub trait PriceIndex {
    /// Mark a slot occupied; inserting an occupied slot is a no-op
    fn insert(&mut self, slot: usize);

    /// Mark a slot empty; removing an empty slot is a no-op
    fn remove(&mut self, slot: usize);

    /// Most aggressive occupied slot, None when the side is empty
    fn best(&self) -> Option<usize>;

    fn contains(&self, slot: usize) -> bool;

    fn is_empty(&self) -> bool {
        self.best().is_none()
    }
}

/// Which `PriceIndex` implementation a book uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceIndexKind {
    /// One bit per price with a cached best; best for small dense domains
    #[default]
    Bitset,
    /// Fixed-capacity sorted array of occupied slots
    SortedArray,
}

/// Runtime-selected best-price index
#[derive(Debug, Clone)]
pub enum OccupiedPrices {
    Bitset(PriceBitset),
    Sorted(SortedPriceSet),
}

impl OccupiedPrices {
    pub fn new(kind: PriceIndexKind, slots: usize, priority: Priority) -> Self {
        match kind {
            PriceIndexKind::Bitset => OccupiedPrices::Bitset(PriceBitset::new(slots, priority)),
            PriceIndexKind::SortedArray => OccupiedPrices::Sorted(SortedPriceSet::new(slots, priority)),
        }
    }

    pub fn kind(&self) -> PriceIndexKind {
        match self {
            OccupiedPrices::Bitset(_) => PriceIndexKind::Bitset,
            OccupiedPrices::Sorted(_) => PriceIndexKind::SortedArray,
        }
    }
}

impl PriceIndex for OccupiedPrices {
    #[inline(always)]
    fn insert(&mut self, slot: usize) {
        match self {
            OccupiedPrices::Bitset(set) => set.insert(slot),
            OccupiedPrices::Sorted(set) => set.insert(slot),
        }
    }

    #[inline(always)]
    fn remove(&mut self, slot: usize) {
        match self {
            OccupiedPrices::Bitset(set) => set.remove(slot),
            OccupiedPrices::Sorted(set) => set.remove(slot),
        }
    }

    #[inline(always)]
    fn best(&self) -> Option<usize> {
        match self {
            OccupiedPrices::Bitset(set) => set.best(),
            OccupiedPrices::Sorted(set) => set.best(),
        }
    }

    fn contains(&self, slot: usize) -> bool {
        match self {
            OccupiedPrices::Bitset(set) => set.contains(slot),
            OccupiedPrices::Sorted(set) => set.contains(slot),
        }
    }
}
