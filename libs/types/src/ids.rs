//! Order identifier
//!
//! Identifiers are assigned by the caller and double as direct indexes into
//! the order registry, so they are small dense integers rather than UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an order
///
/// Never reused while the order is live. The value is also the registry
/// slot, which is why it must stay below the book's configured capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u32);

impl OrderId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw value
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Registry slot for this id
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for OrderId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<OrderId> for u32 {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_index() {
        let id = OrderId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(id.index(), 42usize);
        assert_eq!(u32::from(id), 42);
        assert_eq!(OrderId::from(42u32), id);
    }

    #[test]
    fn test_order_id_display() {
        assert_eq!(OrderId::new(7).to_string(), "7");
    }

    #[test]
    fn test_order_id_serialization() {
        let json = serde_json::to_string(&OrderId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderId::new(9));
    }
}
