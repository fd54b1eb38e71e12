//! Order book infrastructure module
//!
//! Contains price levels, best-price indexes, and the per-side book.

pub mod price_level;
pub mod price_index;
pub mod bitset;
pub mod sorted_set;
pub mod book_side;

pub use price_level::{PriceLevel, LEVEL_CAPACITY};
pub use price_index::{PriceIndex, PriceIndexKind, Priority};
pub use book_side::BookSide;
