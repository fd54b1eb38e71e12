//! Order types
//!
//! An order has an immutable identity (id, price, side) and a remaining
//! quantity that changes only through fills and in-place modification.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Side {
    /// Buy order (bid)
    #[default]
    BUY = 0,
    /// Sell order (ask)
    SELL = 1,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }

    /// Column index for per-side tables
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Order state as seen by the book
///
/// `quantity` is the remaining unfilled size; zero means filled or canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
    pub side: Side,
}

impl Order {
    /// Create an order from a caller-assigned raw id
    pub fn new(id: u32, price: Price, quantity: Quantity, side: Side) -> Self {
        Self {
            id: OrderId::new(id),
            price,
            quantity,
            side,
        }
    }

    /// Shorthand for a buy order
    pub fn buy(id: u32, price: Price, quantity: Quantity) -> Self {
        Self::new(id, price, quantity, Side::BUY)
    }

    /// Shorthand for a sell order
    pub fn sell(id: u32, price: Price, quantity: Quantity) -> Self {
        Self::new(id, price, quantity, Side::SELL)
    }

    /// Check if nothing remains to fill
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }
}
