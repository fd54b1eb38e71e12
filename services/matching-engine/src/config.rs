//! Book configuration
//!
//! Every table in the book is sized from this at construction and never
//! grows afterwards.

use lob_types::errors::BookError;
use lob_types::numeric::{Price, PriceRange};
use serde::{Deserialize, Serialize};

use crate::book::PriceIndexKind;
use crate::memory::PageOptions;

/// Default number of distinct prices per side
pub const DEFAULT_PRICE_LEVELS: u32 = 2048;

/// Default registry capacity (ids `0..DEFAULT_MAX_ORDERS`)
pub const DEFAULT_MAX_ORDERS: u32 = 65_536;

/// Upper bound on registry capacity accepted by `validate`
pub const MAX_ORDER_CAPACITY: u32 = 1 << 24;

/// Configuration for an order book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Lowest accepted price; prices are stored biased by this value.
    pub min_price: Price,
    /// Number of distinct prices, so the domain is `[min_price, min_price + price_levels)`.
    pub price_levels: u32,
    /// Registry capacity; order ids must be below this.
    pub max_orders: u32,
    /// Best-price index implementation.
    pub index: PriceIndexKind,
    /// Touch every page of the tables after allocation.
    pub prefault: bool,
    /// Advise transparent huge pages for the tables (Linux only).
    pub huge_pages: bool,
}

impl BookConfig {
    /// Create a config with sensible defaults.
    pub fn new() -> Self {
        Self {
            min_price: 0,
            price_levels: DEFAULT_PRICE_LEVELS,
            max_orders: DEFAULT_MAX_ORDERS,
            index: PriceIndexKind::Bitset,
            prefault: false,
            huge_pages: false,
        }
    }

    pub fn with_price_domain(mut self, min_price: Price, price_levels: u32) -> Self {
        self.min_price = min_price;
        self.price_levels = price_levels;
        self
    }

    pub fn with_max_orders(mut self, max_orders: u32) -> Self {
        self.max_orders = max_orders;
        self
    }

    pub fn with_index(mut self, index: PriceIndexKind) -> Self {
        self.index = index;
        self
    }

    /// Enable page pre-faulting and huge-page advice
    pub fn with_memory_tuning(mut self) -> Self {
        self.prefault = true;
        self.huge_pages = true;
        self
    }

    /// Check the config and return the price domain it describes
    pub fn validate(&self) -> Result<PriceRange, BookError> {
        if self.max_orders == 0 {
            return Err(BookError::InvalidConfig("max_orders must be non-zero".to_string()));
        }
        if self.max_orders > MAX_ORDER_CAPACITY {
            return Err(BookError::InvalidConfig(format!(
                "max_orders {} exceeds limit {}",
                self.max_orders, MAX_ORDER_CAPACITY
            )));
        }
        PriceRange::new(self.min_price, self.price_levels).ok_or_else(|| {
            BookError::InvalidConfig(format!(
                "price domain of {} levels from {} does not fit the price type",
                self.price_levels, self.min_price
            ))
        })
    }

    pub(crate) fn page_options(&self) -> PageOptions {
        PageOptions {
            huge_pages: self.huge_pages,
            prefault: self.prefault,
        }
    }
}

impl Default for BookConfig {
    fn default() -> Self {
        Self::new()
    }
}
