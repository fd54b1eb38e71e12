//! Crossing detection logic
//!
//! Determines when a bid and ask can match based on price compatibility

use lob_types::numeric::Price;
use lob_types::order::Side;

/// Check if a bid and ask can match at given prices
///
/// For a buy order to match with a sell order the buy price must be at
/// or above the sell price.
#[inline(always)]
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming order can match against resting order
///
/// Returns true if the incoming order price crosses the resting order price
#[inline(always)]
pub fn incoming_can_match(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::BUY => can_match(incoming_price, resting_price),
        Side::SELL => can_match(resting_price, incoming_price),
    }
}
