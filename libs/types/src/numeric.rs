//! Price, quantity and volume widths
//!
//! Prices live in a small bounded integer domain rather than the full
//! width of `Price`, so every price maps to a compact zero-based table
//! index through a fixed bias (`PriceRange::min`).

use serde::{Deserialize, Serialize};

/// Discrete price tick
pub type Price = u16;

/// Remaining size of a single order
pub type Quantity = u16;

/// Aggregate resting quantity at one price; wide enough to sum a full level
pub type Volume = u32;

/// Contiguous price domain `[min, min + levels)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    min: Price,
    levels: u32,
}

impl PriceRange {
    /// Create a domain starting at `min` spanning `levels` ticks
    ///
    /// Returns None if the domain is empty or runs past `Price::MAX`.
    pub fn new(min: Price, levels: u32) -> Option<Self> {
        if levels == 0 || min as u32 + levels - 1 > Price::MAX as u32 {
            return None;
        }
        Some(Self { min, levels })
    }

    /// Lowest representable price
    pub fn min(&self) -> Price {
        self.min
    }

    /// Highest representable price (inclusive)
    pub fn max(&self) -> Price {
        (self.min as u32 + self.levels - 1) as Price
    }

    /// Number of distinct prices in the domain
    pub fn levels(&self) -> usize {
        self.levels as usize
    }

    pub fn contains(&self, price: Price) -> bool {
        price >= self.min && (price - self.min) as u32 <= self.levels - 1
    }

    /// Zero-based table index for an in-domain price
    #[inline(always)]
    pub fn index_of(&self, price: Price) -> usize {
        debug_assert!(self.contains(price), "price {price} outside domain");
        (price - self.min) as usize
    }

    /// Zero-based table index, or None when outside the domain
    pub fn checked_index(&self, price: Price) -> Option<usize> {
        self.contains(price).then(|| (price - self.min) as usize)
    }

    /// Inverse of `index_of`
    #[inline(always)]
    pub fn price_at(&self, index: usize) -> Price {
        debug_assert!(index < self.levels as usize);
        (self.min as usize + index) as Price
    }
}
