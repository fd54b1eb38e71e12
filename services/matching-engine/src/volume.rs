//! Volume-at-price table
//!
//! Aggregate resting quantity per (price slot, side), maintained
//! incrementally on every insert, fill and modify so queries never
//! rescan a level.

use lob_types::numeric::{Quantity, Volume};
use lob_types::order::Side;

use crate::memory::{self, PageOptions};

/// Dense `[slot][side]` volume table
#[derive(Debug, Clone)]
pub struct VolumeTable {
    cells: Box<[[Volume; 2]]>,
}

impl VolumeTable {
    pub fn new(slots: usize) -> Self {
        Self {
            cells: vec![[0; 2]; slots].into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub fn get(&self, side: Side, slot: usize) -> Volume {
        self.cells[slot][side.index()]
    }

    #[inline(always)]
    pub fn add(&mut self, side: Side, slot: usize, quantity: Quantity) {
        self.cells[slot][side.index()] += Volume::from(quantity);
    }

    #[inline(always)]
    pub fn sub(&mut self, side: Side, slot: usize, quantity: Quantity) {
        let cell = &mut self.cells[slot][side.index()];
        debug_assert!(*cell >= Volume::from(quantity), "volume underflow at slot {slot}");
        *cell -= Volume::from(quantity);
    }

    /// Apply the change of one order's quantity from `old` to `new`
    #[inline]
    pub fn replace(&mut self, side: Side, slot: usize, old: Quantity, new: Quantity) {
        self.sub(side, slot, old);
        self.add(side, slot, new);
    }

    pub(crate) fn prepare_pages(&mut self, options: PageOptions) {
        memory::prepare(&mut self.cells, options);
    }
}
