//! Order book engine
//!
//! `OrderBook` owns every table of one instrument's book and exposes the
//! matching, modify/cancel and query operations. All storage is sized from
//! `BookConfig` at construction; nothing allocates afterwards except the
//! convenience snapshots that return a `Vec`.
//!
//! Bounds policy: `submit`/`match_order` reject out-of-range ids and prices
//! (and ids that are already live) before touching the book. The other
//! operations treat out-of-range input as an absent order.

use lob_types::errors::BookError;
use lob_types::ids::OrderId;
use lob_types::numeric::{Price, PriceRange, Quantity, Volume};
use lob_types::order::{Order, Side};
use tracing::{debug, info, warn};

use crate::book::{BookSide, LEVEL_CAPACITY};
use crate::config::BookConfig;
use crate::events::{Fill, MatchReport, RestOutcome};
use crate::matching::MatchExecutor;
use crate::registry::OrderRegistry;
use crate::volume::VolumeTable;

/// Limit order book for a single instrument
///
/// Single-writer: every operation runs to completion on the caller's
/// thread and the book does no internal locking.
pub struct OrderBook {
    config: BookConfig,
    range: PriceRange,
    bids: BookSide,
    asks: BookSide,
    registry: OrderRegistry,
    volume: VolumeTable,
    executor: MatchExecutor,
}

impl OrderBook {
    /// Create an empty book with the default configuration
    pub fn new() -> Self {
        let config = BookConfig::default();
        let Ok(range) = config.validate() else {
            unreachable!("default configuration is valid");
        };
        Self::build(config, range)
    }

    /// Create an empty book from `config`
    pub fn with_config(config: BookConfig) -> Result<Self, BookError> {
        let range = config.validate()?;
        Ok(Self::build(config, range))
    }

    fn build(config: BookConfig, range: PriceRange) -> Self {
        let mut book = Self {
            bids: BookSide::new(Side::BUY, range, config.index),
            asks: BookSide::new(Side::SELL, range, config.index),
            registry: OrderRegistry::new(config.max_orders as usize),
            volume: VolumeTable::new(range.levels()),
            executor: MatchExecutor::default(),
            range,
            config,
        };

        let pages = book.config.page_options();
        book.registry.prepare_pages(pages);
        book.volume.prepare_pages(pages);
        book.bids.prepare_pages(pages);
        book.asks.prepare_pages(pages);

        info!(
            min_price = range.min(),
            max_price = range.max(),
            max_orders = book.config.max_orders,
            level_capacity = LEVEL_CAPACITY,
            index = ?book.config.index,
            prefault = book.config.prefault,
            huge_pages = book.config.huge_pages,
            "Order book created"
        );
        book
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Accepted price domain
    pub fn price_range(&self) -> PriceRange {
        self.range
    }

    /// Match an incoming order and rest any remainder
    ///
    /// Returns the number of fills performed. See `submit` for the full
    /// outcome, including a remainder dropped because its level was full.
    #[inline]
    pub fn match_order(&mut self, order: Order) -> Result<u32, BookError> {
        self.submit(order).map(|report| report.matches)
    }

    /// Match an incoming order and report what happened to it
    #[inline]
    pub fn submit(&mut self, order: Order) -> Result<MatchReport, BookError> {
        self.submit_with(order, |_| {})
    }

    /// Like `submit`, calling `on_fill` once per fill in execution order
    pub fn submit_with<F: FnMut(&Fill)>(&mut self, order: Order, mut on_fill: F) -> Result<MatchReport, BookError> {
        self.check_incoming(&order)?;

        let mut taker = order;
        let makers = match taker.side {
            Side::BUY => &mut self.asks,
            Side::SELL => &mut self.bids,
        };
        let matches = self.executor.sweep(
            &mut taker,
            makers,
            &mut self.registry,
            &mut self.volume,
            &mut on_fill,
        );

        let rest = if taker.is_filled() {
            RestOutcome::Filled
        } else {
            self.rest(taker)
        };

        Ok(MatchReport {
            matches,
            filled: order.quantity - taker.quantity,
            rest,
        })
    }

    fn check_incoming(&self, order: &Order) -> Result<(), BookError> {
        if !self.registry.in_range(order.id) {
            debug!(order_id = %order.id, "rejecting order: id out of range");
            return Err(BookError::IdOutOfRange {
                order_id: order.id,
                capacity: self.registry.capacity(),
            });
        }
        if !self.range.contains(order.price) {
            debug!(order_id = %order.id, price = order.price, "rejecting order: price out of range");
            return Err(BookError::PriceOutOfRange {
                price: order.price,
                min: self.range.min(),
                max: self.range.max(),
            });
        }
        if self.registry.is_live(order.id) {
            debug!(order_id = %order.id, "rejecting order: id already live");
            return Err(BookError::DuplicateId { order_id: order.id });
        }
        Ok(())
    }

    /// Queue the unfilled remainder on its own side
    #[inline]
    fn rest(&mut self, order: Order) -> RestOutcome {
        let slot = self.range.index_of(order.price);
        let side = match order.side {
            Side::BUY => &mut self.bids,
            Side::SELL => &mut self.asks,
        };

        if !side.insert(order.id, slot) {
            warn!(
                order_id = %order.id,
                side = ?order.side,
                price = order.price,
                quantity = order.quantity,
                "price level full, dropping remainder"
            );
            return RestOutcome::Dropped { quantity: order.quantity };
        }
        self.registry.insert(order);
        self.volume.add(order.side, slot, order.quantity);
        RestOutcome::Rested { quantity: order.quantity }
    }

    /// Set a resting order's quantity in place; zero cancels it
    ///
    /// Queue position is kept for any nonzero quantity. Unknown, dead and
    /// out-of-range ids are ignored. Returns true if an order was changed.
    pub fn modify_order_by_id(&mut self, order_id: OrderId, new_quantity: Quantity) -> bool {
        let Some(order) = self.registry.get_mut(order_id) else {
            return false;
        };
        let (side, price, old_quantity) = (order.side, order.price, order.quantity);
        let slot = self.range.index_of(price);
        self.volume.replace(side, slot, old_quantity, new_quantity);

        if new_quantity != 0 {
            order.quantity = new_quantity;
            return true;
        }

        self.registry.retire(order_id);
        let removed = self.side_mut(side).remove(order_id, slot);
        debug_assert!(removed, "live order {order_id} missing from its level");
        debug!(%order_id, ?side, price, "order canceled");
        true
    }

    /// Cancel a resting order; same as modifying its quantity to zero
    pub fn cancel_order(&mut self, order_id: OrderId) -> bool {
        self.modify_order_by_id(order_id, 0)
    }

    /// Total resting quantity at `price` on `side`; zero outside the domain
    #[inline]
    pub fn get_volume_at_level(&self, side: Side, price: Price) -> Volume {
        self.range
            .checked_index(price)
            .map_or(0, |slot| self.volume.get(side, slot))
    }

    /// Current state of a live order
    pub fn lookup_order_by_id(&self, order_id: OrderId) -> Result<Order, BookError> {
        if !self.registry.in_range(order_id) {
            return Err(BookError::IdOutOfRange {
                order_id,
                capacity: self.registry.capacity(),
            });
        }
        self.registry
            .get(order_id)
            .copied()
            .ok_or(BookError::NotFound { order_id })
    }

    /// Check if an order is live
    #[inline]
    pub fn order_exists(&self, order_id: OrderId) -> bool {
        self.registry.is_live(order_id)
    }

    /// Number of live resting orders
    pub fn live_orders(&self) -> usize {
        self.registry.live_count()
    }

    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Best ask minus best bid, when both sides are non-empty
    pub fn spread(&self) -> Option<Price> {
        Some(self.best_ask()? - self.best_bid()?)
    }

    /// Get depth snapshot (top N price levels, best first)
    pub fn depth_snapshot(&self, side: Side, depth: usize) -> Vec<(Price, Volume)> {
        let book_side = self.side(side);
        book_side
            .top_slots(depth)
            .into_iter()
            .map(|slot| (book_side.price_at(slot), self.volume.get(side, slot)))
            .collect()
    }

    /// Ids resting at `price` on `side`, in time priority
    pub fn level_orders(&self, side: Side, price: Price) -> Vec<OrderId> {
        self.range
            .checked_index(price)
            .map(|slot| self.side(side).level(slot).iter().collect())
            .unwrap_or_default()
    }

    /// Whether the best-price index of `side` marks `price` occupied
    pub fn is_level_occupied(&self, side: Side, price: Price) -> bool {
        self.range
            .checked_index(price)
            .is_some_and(|slot| self.side(side).is_occupied(slot))
    }

    /// Iterate every live order (full registry scan)
    pub fn live_order_iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.registry.iter_live()
    }

    /// Sequence the next fill will carry
    pub fn next_fill_sequence(&self) -> u64 {
        self.executor.sequence()
    }

    fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::BUY => &self.bids,
            Side::SELL => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::BUY => &mut self.bids,
            Side::SELL => &mut self.asks,
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
