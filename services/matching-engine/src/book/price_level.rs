//! Price level implementation with FIFO queue
//!
//! A price level holds the ids of every order resting at one exact price on
//! one side, in arrival order. Storage is a fixed ring of `LEVEL_CAPACITY`
//! slots so a level never allocates after the book is built.

use lob_types::ids::OrderId;

/// Maximum number of orders resting at one exact price
///
/// Resting depth per price is expected to be shallow. Must be a power of two.
pub const LEVEL_CAPACITY: usize = 32;

const MASK: usize = LEVEL_CAPACITY - 1;

const _: () = assert!(LEVEL_CAPACITY.is_power_of_two() && LEVEL_CAPACITY <= u8::MAX as usize);

/// A price level containing order ids at a specific price
///
/// Maintains strict FIFO ordering for time-priority matching. Quantities
/// live in the order registry; the level only orders the ids.
#[derive(Debug, Clone, Copy)]
pub struct PriceLevel {
    slots: [OrderId; LEVEL_CAPACITY],
    head: u8,
    len: u8,
}

impl PriceLevel {
    /// Create a new empty price level
    pub const fn new() -> Self {
        Self {
            slots: [OrderId::new(0); LEVEL_CAPACITY],
            head: 0,
            len: 0,
        }
    }

    #[inline(always)]
    fn slot(&self, offset: usize) -> usize {
        (self.head as usize + offset) & MASK
    }

    /// Append an order at the back of the queue (time priority)
    ///
    /// Returns false, leaving the level untouched, when the level is full.
    #[inline]
    pub fn push(&mut self, order_id: OrderId) -> bool {
        if self.is_full() {
            return false;
        }
        let tail = self.slot(self.len as usize);
        self.slots[tail] = order_id;
        self.len += 1;
        true
    }

    /// Peek at the front order without removing it
    #[inline(always)]
    pub fn front(&self) -> Option<OrderId> {
        (self.len > 0).then(|| self.slots[self.head as usize])
    }

    /// Pop the front order from the queue
    #[inline]
    pub fn pop(&mut self) -> Option<OrderId> {
        let front = self.front()?;
        self.head = ((self.head as usize + 1) & MASK) as u8;
        self.len -= 1;
        Some(front)
    }

    /// Remove an order from anywhere in the queue
    ///
    /// Later entries shift forward one slot, so the relative order of the
    /// remaining ids is unchanged. Returns false if the id is not queued here.
    pub fn erase(&mut self, order_id: OrderId) -> bool {
        let len = self.len as usize;
        let Some(position) = (0..len).find(|&i| self.slots[self.slot(i)] == order_id) else {
            return false;
        };

        for i in position..len - 1 {
            let (to, from) = (self.slot(i), self.slot(i + 1));
            self.slots[to] = self.slots[from];
        }
        self.len -= 1;
        true
    }

    /// Check if the price level is empty
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len as usize == LEVEL_CAPACITY
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.len as usize
    }

    /// Iterate queued ids front to back
    pub fn iter(&self) -> impl Iterator<Item = OrderId> + '_ {
        (0..self.len as usize).map(move |i| self.slots[self.slot(i)])
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}
