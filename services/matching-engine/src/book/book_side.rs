//! One side of the order book
//!
//! A dense array of price levels indexed by price slot, plus the index of
//! occupied slots. Bids keep the highest slot best, asks the lowest.

use lob_types::ids::OrderId;
use lob_types::numeric::{Price, PriceRange};
use lob_types::order::Side;

use crate::memory::{self, PageOptions};

use super::price_index::{OccupiedPrices, PriceIndex, PriceIndexKind, Priority};
use super::price_level::PriceLevel;

/// Bid or ask side of the book
///
/// Invariant: a slot is in `occupied` iff its level is non-empty.
#[derive(Debug, Clone)]
pub struct BookSide {
    side: Side,
    range: PriceRange,
    levels: Box<[PriceLevel]>,
    occupied: OccupiedPrices,
}

impl BookSide {
    /// Create a new empty side over `range`
    pub fn new(side: Side, range: PriceRange, index: PriceIndexKind) -> Self {
        let priority = match side {
            Side::BUY => Priority::Highest,
            Side::SELL => Priority::Lowest,
        };
        Self {
            side,
            range,
            levels: vec![PriceLevel::new(); range.levels()].into_boxed_slice(),
            occupied: OccupiedPrices::new(index, range.levels(), priority),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn index_kind(&self) -> PriceIndexKind {
        self.occupied.kind()
    }

    /// Price for a level slot
    #[inline(always)]
    pub fn price_at(&self, slot: usize) -> Price {
        self.range.price_at(slot)
    }

    /// Queue an order id at the back of its level
    ///
    /// Returns false if the level is at capacity; nothing changes then.
    #[inline]
    pub fn insert(&mut self, order_id: OrderId, slot: usize) -> bool {
        if !self.levels[slot].push(order_id) {
            return false;
        }
        self.occupied.insert(slot);
        true
    }

    /// Remove an order id from anywhere in its level
    ///
    /// Returns true if the order was found and removed
    pub fn remove(&mut self, order_id: OrderId, slot: usize) -> bool {
        let level = &mut self.levels[slot];
        if !level.erase(order_id) {
            return false;
        }
        // Remove empty price levels from the index
        if level.is_empty() {
            self.occupied.remove(slot);
        }
        true
    }

    /// Drop a slot from the index once its level has drained
    #[inline]
    pub fn release_if_empty(&mut self, slot: usize) {
        if self.levels[slot].is_empty() {
            self.occupied.remove(slot);
        }
    }

    /// Most aggressive occupied slot
    #[inline(always)]
    pub fn best_slot(&self) -> Option<usize> {
        self.occupied.best()
    }

    /// Get the best price
    pub fn best_price(&self) -> Option<Price> {
        self.best_slot().map(|slot| self.price_at(slot))
    }

    pub fn level(&self, slot: usize) -> &PriceLevel {
        &self.levels[slot]
    }

    /// Get mutable reference to a level
    #[inline(always)]
    pub(crate) fn level_mut(&mut self, slot: usize) -> &mut PriceLevel {
        &mut self.levels[slot]
    }

    /// Whether the index marks `slot` occupied
    pub fn is_occupied(&self, slot: usize) -> bool {
        self.occupied.contains(slot)
    }

    /// Occupied slots from best outward, at most `depth` of them
    ///
    /// Walks the level array from the best slot, so cost is proportional to
    /// the price distance covered rather than the number of orders.
    pub fn top_slots(&self, depth: usize) -> Vec<usize> {
        let Some(best) = self.best_slot() else {
            return Vec::new();
        };
        let walk: Box<dyn Iterator<Item = usize>> = match self.side {
            Side::BUY => Box::new((0..=best).rev()),
            Side::SELL => Box::new(best..self.levels.len()),
        };
        walk.filter(|&slot| !self.levels[slot].is_empty())
            .take(depth)
            .collect()
    }

    /// Check if the side has no resting orders
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Get the total number of occupied price levels (full scan)
    pub fn level_count(&self) -> usize {
        self.levels.iter().filter(|level| !level.is_empty()).count()
    }

    pub(crate) fn prepare_pages(&mut self, options: PageOptions) {
        memory::prepare(&mut self.levels, options);
    }
}
