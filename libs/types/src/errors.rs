//! Error types for the order book
//!
//! Ordinary outcomes (empty book, no cross, zero quantity) are never errors;
//! only caller mistakes and missing orders surface here.

use crate::ids::OrderId;
use crate::numeric::Price;
use thiserror::Error;

/// Order book error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Order not found: {order_id}")]
    NotFound { order_id: OrderId },

    #[error("Order id {order_id} outside registry capacity {capacity}")]
    IdOutOfRange { order_id: OrderId, capacity: usize },

    #[error("Order id {order_id} is already live")]
    DuplicateId { order_id: OrderId },

    #[error("Price {price} outside domain [{min}, {max}]")]
    PriceOutOfRange { price: Price, min: Price, max: Price },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BookError {
    /// Check if this error means the order simply is not live
    pub fn is_not_found(&self) -> bool {
        matches!(self, BookError::NotFound { .. })
    }
}
