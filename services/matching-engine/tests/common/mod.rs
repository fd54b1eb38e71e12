//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};

use lob_engine::{BookConfig, OrderBook, Price, Side, Volume};

/// Route engine logs to the test harness output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Small book with a biased price domain so offsets are exercised.
pub fn small_config() -> BookConfig {
    BookConfig::new().with_price_domain(1_000, 64).with_max_orders(256)
}

/// Everything observable about a book, for before/after comparisons.
#[derive(Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub orders: Vec<(u32, Price, u16, Side)>,
    pub levels: BTreeMap<(u8, Price), (Volume, Vec<u32>)>,
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
}

pub fn snapshot(book: &OrderBook) -> Snapshot {
    let orders = book
        .live_order_iter()
        .map(|o| (o.id.get(), o.price, o.quantity, o.side))
        .collect();
    let mut levels = BTreeMap::new();
    let range = book.price_range();
    for side in [Side::BUY, Side::SELL] {
        for price in range.min()..=range.max() {
            let ids: Vec<u32> = book.level_orders(side, price).iter().map(|id| id.get()).collect();
            let volume = book.get_volume_at_level(side, price);
            if !ids.is_empty() || volume != 0 {
                levels.insert((side as u8, price), (volume, ids));
            }
        }
    }
    Snapshot {
        orders,
        levels,
        best_bid: book.best_bid(),
        best_ask: book.best_ask(),
    }
}

/// Check every structural invariant of the book against an independent
/// recomputation from the registry and level queues.
pub fn check_invariants(book: &OrderBook) {
    let range = book.price_range();
    let mut queued = HashSet::new();

    for side in [Side::BUY, Side::SELL] {
        let mut best: Option<Price> = None;
        for price in range.min()..=range.max() {
            let ids = book.level_orders(side, price);
            let mut expected: Volume = 0;

            for id in &ids {
                assert!(queued.insert(*id), "order {id} queued more than once");
                let order = book
                    .lookup_order_by_id(*id)
                    .unwrap_or_else(|e| panic!("queued order {id} is not live: {e}"));
                assert_eq!(order.side, side, "order {id} queued on the wrong side");
                assert_eq!(order.price, price, "order {id} queued at the wrong price");
                assert!(order.quantity > 0, "live order {id} has zero quantity");
                expected += Volume::from(order.quantity);
            }

            assert_eq!(
                book.get_volume_at_level(side, price),
                expected,
                "volume mismatch at {side:?} {price}"
            );
            assert_eq!(
                book.is_level_occupied(side, price),
                !ids.is_empty(),
                "index occupancy mismatch at {side:?} {price}"
            );

            if !ids.is_empty() {
                best = match (side, best) {
                    (_, None) => Some(price),
                    (Side::BUY, Some(b)) => Some(b.max(price)),
                    (Side::SELL, Some(b)) => Some(b.min(price)),
                };
            }
        }

        let reported = match side {
            Side::BUY => book.best_bid(),
            Side::SELL => book.best_ask(),
        };
        assert_eq!(reported, best, "best price mismatch on {side:?}");
    }

    let live: HashSet<_> = book.live_order_iter().map(|o| o.id).collect();
    assert_eq!(live, queued, "live set differs from queued set");
    assert_eq!(book.live_orders(), live.len());

    if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
        assert!(bid < ask, "book is crossed: bid {bid} >= ask {ask}");
    }
}

/// Total resting quantity across both sides.
pub fn resting_quantity(book: &OrderBook) -> u64 {
    book.live_order_iter().map(|o| o.quantity as u64).sum()
}
