//! Records produced while matching
//!
//! The book itself only mutates its tables; these values describe what
//! happened for callers that want more than a match count.

use lob_types::ids::OrderId;
use lob_types::numeric::{Price, Quantity};
use lob_types::order::Side;
use serde::{Deserialize, Serialize};

/// One trade against the head of a resting level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    /// Monotonic per book, starting at the executor's first sequence.
    pub sequence: u64,
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,
    /// Side of the incoming (taker) order
    pub side: Side,
    /// Execution price (the maker's price)
    pub price: Price,
    pub quantity: Quantity,
    /// Maker quantity left after this fill; zero means it left the book
    pub maker_remaining: Quantity,
}

/// What happened to the unfilled part of a submitted order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RestOutcome {
    /// Nothing remained, so nothing was rested
    Filled,
    /// The remainder now rests in the book
    Rested { quantity: Quantity },
    /// The level was full and the remainder was discarded
    Dropped { quantity: Quantity },
}

/// Result of submitting an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Number of discrete fills against resting orders
    pub matches: u32,
    /// Total quantity traded
    pub filled: Quantity,
    pub rest: RestOutcome,
}

impl MatchReport {
    /// Check if the order is now resting in the book
    pub fn is_resting(&self) -> bool {
        matches!(self.rest, RestOutcome::Rested { .. })
    }
}
