//! Bitset best-price index
//!
//! One bit per price slot. `best` is a leading/trailing-zero scan over the
//! words, memoized in a single-slot cache and bounded by a frontier word so
//! repeated queries between structural changes cost O(1).

use std::cell::Cell;

use super::price_index::{PriceIndex, Priority};

const BITS: usize = u64::BITS as usize;
const NONE: u32 = u32::MAX;

/// Occupancy bitset over a bounded price domain
#[derive(Debug, Clone)]
pub struct PriceBitset {
    words: Box<[u64]>,
    slots: usize,
    priority: Priority,
    /// Last best slot returned, or NONE when it must be rescanned.
    cached: Cell<u32>,
    /// No word strictly better than this one has a set bit.
    frontier: Cell<usize>,
}

impl PriceBitset {
    pub fn new(slots: usize, priority: Priority) -> Self {
        let words = slots.div_ceil(BITS).max(1);
        Self {
            words: vec![0u64; words].into_boxed_slice(),
            slots,
            priority,
            cached: Cell::new(NONE),
            frontier: Cell::new(Self::worst_word(priority, words)),
        }
    }

    fn worst_word(priority: Priority, words: usize) -> usize {
        match priority {
            Priority::Highest => 0,
            Priority::Lowest => words - 1,
        }
    }

    /// Number of slots addressable by this set
    pub fn capacity(&self) -> usize {
        self.slots
    }

    /// Number of occupied slots (full scan; not for hot paths)
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[cold]
    fn scan(&self) -> Option<usize> {
        let start = self.frontier.get();
        let found = match self.priority {
            Priority::Highest => (0..=start)
                .rev()
                .find(|&w| self.words[w] != 0)
                .map(|w| (w, w * BITS + (BITS - 1 - self.words[w].leading_zeros() as usize))),
            Priority::Lowest => (start..self.words.len())
                .find(|&w| self.words[w] != 0)
                .map(|w| (w, w * BITS + self.words[w].trailing_zeros() as usize)),
        };

        match found {
            Some((word, slot)) => {
                self.frontier.set(word);
                self.cached.set(slot as u32);
                Some(slot)
            }
            None => {
                self.frontier.set(Self::worst_word(self.priority, self.words.len()));
                None
            }
        }
    }
}

impl PriceIndex for PriceBitset {
    #[inline]
    fn insert(&mut self, slot: usize) {
        debug_assert!(slot < self.slots, "slot {slot} outside bitset");
        let word = slot / BITS;
        self.words[word] |= 1u64 << (slot % BITS);

        if self.priority.better(word, self.frontier.get()) {
            self.frontier.set(word);
        }
        // An insert can only make the best more extreme, so a warm cache
        // is advanced instead of dropped.
        let cached = self.cached.get();
        if cached != NONE && self.priority.better(slot, cached as usize) {
            self.cached.set(slot as u32);
        }
    }

    #[inline]
    fn remove(&mut self, slot: usize) {
        debug_assert!(slot < self.slots, "slot {slot} outside bitset");
        self.words[slot / BITS] &= !(1u64 << (slot % BITS));
        if self.cached.get() == slot as u32 {
            self.cached.set(NONE);
        }
    }

    #[inline(always)]
    fn best(&self) -> Option<usize> {
        match self.cached.get() {
            NONE => self.scan(),
            slot => Some(slot as usize),
        }
    }

    fn contains(&self, slot: usize) -> bool {
        slot < self.slots && self.words[slot / BITS] & (1u64 << (slot % BITS)) != 0
    }
}
