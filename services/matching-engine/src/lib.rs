//! Matching Engine
//!
//! Fixed-capacity limit order book with price-time priority matching,
//! in-place quantity modification and O(1) point lookups.
//!
//! **Layout:**
//! - Per side, a dense array of FIFO price levels indexed by price plus a
//!   best-price index (bitset by default)
//! - A dense id-indexed order registry with a liveness flag
//! - A `[price][side]` volume table updated incrementally
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - Volume at a price always equals the sum of live resting quantities there
//! - A price is in the best-price index iff its level is non-empty
//! - A live id is queued exactly once, on its own side and price
//! - No allocation after construction

pub mod book;
pub mod config;
pub mod engine;
pub mod events;
pub mod matching;
pub mod memory;
pub mod registry;
pub mod volume;

pub use book::{PriceIndexKind, LEVEL_CAPACITY};
pub use config::BookConfig;
pub use engine::OrderBook;
pub use events::{Fill, MatchReport, RestOutcome};
pub use lob_types::prelude::*;
