//! End-to-end matching scenarios
//!
//! Each test drives a fresh book through the public surface and checks the
//! structural invariants after every step.

mod common;

use common::check_invariants;
use lob_engine::{
    BookConfig, BookError, Order, OrderBook, OrderId, RestOutcome, Side, LEVEL_CAPACITY,
};

fn id(raw: u32) -> OrderId {
    OrderId::new(raw)
}

fn submit(book: &mut OrderBook, order: Order) -> u32 {
    let matches = book.match_order(order).unwrap();
    check_invariants(book);
    matches
}

fn quantity_of(book: &OrderBook, raw: u32) -> u16 {
    book.lookup_order_by_id(id(raw)).unwrap().quantity
}

#[test]
fn test_rest_into_empty_book() {
    common::init_tracing();
    let mut book = OrderBook::new();
    assert!(!book.order_exists(id(1)));

    assert_eq!(submit(&mut book, Order::sell(1, 100, 10)), 0);

    assert!(book.order_exists(id(1)));
    assert_eq!(book.lookup_order_by_id(id(1)).unwrap(), Order::sell(1, 100, 10));
    assert_eq!(book.get_volume_at_level(Side::SELL, 100), 10);
}

#[test]
fn test_partial_fill_of_resting_order() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::sell(1, 100, 10));

    assert_eq!(submit(&mut book, Order::buy(2, 100, 5)), 1);
    assert_eq!(quantity_of(&book, 1), 5);
    assert!(!book.order_exists(id(2)));

    book.modify_order_by_id(id(1), 0);
    check_invariants(&book);
    assert!(!book.order_exists(id(1)));
}

#[test]
fn test_sweep_across_price_levels() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::sell(3, 90, 5));
    submit(&mut book, Order::sell(4, 95, 5));

    assert_eq!(submit(&mut book, Order::buy(5, 100, 8)), 2);
    assert!(!book.order_exists(id(3)));
    assert_eq!(quantity_of(&book, 4), 2);
    assert!(!book.order_exists(id(5)));

    book.modify_order_by_id(id(4), 1);
    check_invariants(&book);
    assert_eq!(quantity_of(&book, 4), 1);

    book.modify_order_by_id(id(4), 0);
    check_invariants(&book);
    assert!(!book.order_exists(id(4)));
}

#[test]
fn test_sell_against_resting_buy() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::buy(6, 100, 10));

    assert_eq!(submit(&mut book, Order::sell(7, 100, 4)), 1);
    assert_eq!(quantity_of(&book, 6), 6);

    // Crosses at the resting bid's price and rests the leftover.
    assert_eq!(submit(&mut book, Order::sell(8, 90, 7)), 1);
    assert!(!book.order_exists(id(6)));
    assert_eq!(quantity_of(&book, 8), 1);
    assert_eq!(book.best_ask(), Some(90));
    assert_eq!(book.best_bid(), None);
}

#[test]
fn test_cancel_via_zero_modify() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::buy(6, 100, 10));

    book.modify_order_by_id(id(6), 0);
    check_invariants(&book);
    assert!(!book.order_exists(id(6)));
    assert_eq!(book.get_volume_at_level(Side::BUY, 100), 0);
    assert_eq!(book.best_bid(), None);
}

#[test]
fn test_exact_full_fills() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::sell(20, 100, 10));
    assert_eq!(submit(&mut book, Order::buy(21, 100, 10)), 1);
    assert!(!book.order_exists(id(20)));
    assert!(!book.order_exists(id(21)));

    submit(&mut book, Order::buy(42, 100, 10));
    assert_eq!(submit(&mut book, Order::sell(43, 100, 10)), 1);
    assert!(!book.order_exists(id(42)));
    assert_eq!(book.live_orders(), 0);
}

#[test]
fn test_buy_fills_better_level_first() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::sell(22, 95, 4));
    submit(&mut book, Order::sell(23, 100, 6));

    assert_eq!(submit(&mut book, Order::buy(24, 100, 8)), 2);
    assert!(!book.order_exists(id(22)));
    assert_eq!(quantity_of(&book, 23), 2);
}

#[test]
fn test_sell_fills_better_level_first() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::buy(27, 100, 5));
    submit(&mut book, Order::buy(28, 95, 5));

    assert_eq!(submit(&mut book, Order::sell(29, 90, 7)), 2);
    assert!(!book.order_exists(id(27)));
    assert_eq!(quantity_of(&book, 28), 3);
}

#[test]
fn test_modify_unknown_id_leaves_book_untouched() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::buy(25, 100, 10));
    let before = common::snapshot(&book);

    assert!(!book.modify_order_by_id(id(999), 0));
    assert!(!book.modify_order_by_id(id(999), 7));

    assert_eq!(common::snapshot(&book), before);
    assert_eq!(book.lookup_order_by_id(id(25)).unwrap().id, id(25));
}

#[test]
fn test_reduce_then_cancel() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::sell(26, 100, 10));
    assert_eq!(quantity_of(&book, 26), 10);

    book.modify_order_by_id(id(26), 1);
    check_invariants(&book);
    assert_eq!(quantity_of(&book, 26), 1);
    assert_eq!(book.get_volume_at_level(Side::SELL, 100), 1);

    book.modify_order_by_id(id(26), 0);
    check_invariants(&book);
    assert!(!book.order_exists(id(26)));
}

#[test]
fn test_non_crossing_orders_both_rest() {
    let mut book = OrderBook::new();
    assert_eq!(submit(&mut book, Order::sell(30, 105, 5)), 0);
    assert_eq!(submit(&mut book, Order::buy(31, 100, 5)), 0);

    assert!(book.order_exists(id(30)));
    assert!(book.order_exists(id(31)));
    assert_eq!(book.spread(), Some(5));
}

#[test]
fn test_time_priority_within_level() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::sell(32, 100, 4));
    submit(&mut book, Order::sell(33, 100, 6));

    assert_eq!(submit(&mut book, Order::buy(34, 100, 8)), 2);
    assert!(!book.order_exists(id(32)));
    assert_eq!(quantity_of(&book, 33), 2);
}

#[test]
fn test_earliest_bid_hit_first() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::buy(39, 100, 5));
    submit(&mut book, Order::buy(40, 100, 5));

    assert_eq!(submit(&mut book, Order::sell(41, 95, 3)), 1);
    assert_eq!(quantity_of(&book, 39), 2);
    assert_eq!(quantity_of(&book, 40), 5);
}

#[test]
fn test_mixed_operations_keep_integrity() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::buy(35, 100, 10));

    submit(&mut book, Order::sell(36, 100, 5));
    assert_eq!(quantity_of(&book, 35), 5);

    submit(&mut book, Order::sell(37, 95, 3));
    assert_eq!(quantity_of(&book, 35), 2);

    book.modify_order_by_id(id(35), 0);
    check_invariants(&book);
    assert!(!book.order_exists(id(35)));

    submit(&mut book, Order::sell(38, 100, 2));
    assert!(book.order_exists(id(38)));
}

#[test]
fn test_modify_to_same_quantity() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::sell(50, 100, 10));

    book.modify_order_by_id(id(50), 10);
    check_invariants(&book);
    assert_eq!(quantity_of(&book, 50), 10);
    assert_eq!(book.get_volume_at_level(Side::SELL, 100), 10);
}

#[test]
fn test_modify_is_idempotent() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::sell(50, 100, 10));
    submit(&mut book, Order::sell(51, 100, 4));

    book.modify_order_by_id(id(50), 6);
    let once = common::snapshot(&book);
    book.modify_order_by_id(id(50), 6);
    assert_eq!(common::snapshot(&book), once);
}

#[test]
fn test_modify_after_partial_fill() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::buy(51, 100, 10));
    submit(&mut book, Order::sell(52, 100, 4));
    assert_eq!(quantity_of(&book, 51), 6);

    book.modify_order_by_id(id(51), 3);
    check_invariants(&book);
    assert_eq!(quantity_of(&book, 51), 3);

    assert_eq!(submit(&mut book, Order::sell(53, 90, 3)), 1);
    assert!(!book.order_exists(id(51)));
    assert!(!book.order_exists(id(53)));
}

#[test]
fn test_modify_keeps_queue_position() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::sell(54, 100, 5));
    submit(&mut book, Order::sell(55, 100, 5));

    book.modify_order_by_id(id(54), 3);
    check_invariants(&book);
    assert_eq!(book.level_orders(Side::SELL, 100), vec![id(54), id(55)]);

    assert_eq!(submit(&mut book, Order::buy(56, 100, 4)), 2);
    assert!(!book.order_exists(id(54)));
    assert_eq!(quantity_of(&book, 55), 4);
}

#[test]
fn test_increase_keeps_queue_position() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::buy(60, 100, 2));
    submit(&mut book, Order::buy(61, 100, 2));

    book.modify_order_by_id(id(60), 9);
    check_invariants(&book);
    assert_eq!(book.get_volume_at_level(Side::BUY, 100), 11);

    assert_eq!(submit(&mut book, Order::sell(62, 100, 9)), 1);
    assert!(!book.order_exists(id(60)));
    assert_eq!(quantity_of(&book, 61), 2);
}

#[test]
fn test_repeated_modifications() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::buy(57, 100, 12));

    book.modify_order_by_id(id(57), 8);
    assert_eq!(quantity_of(&book, 57), 8);
    book.modify_order_by_id(id(57), 5);
    assert_eq!(quantity_of(&book, 57), 5);
    check_invariants(&book);

    assert_eq!(submit(&mut book, Order::sell(58, 100, 5)), 1);
    assert!(!book.order_exists(id(57)));
}

#[test]
fn test_cancel_middle_of_level() {
    let mut book = OrderBook::new();
    for raw in 70..75 {
        submit(&mut book, Order::sell(raw, 100, 2));
    }
    book.modify_order_by_id(id(72), 0);
    check_invariants(&book);
    assert_eq!(
        book.level_orders(Side::SELL, 100),
        vec![id(70), id(71), id(73), id(74)]
    );

    assert_eq!(submit(&mut book, Order::buy(80, 100, 5)), 3);
    assert_eq!(book.level_orders(Side::SELL, 100), vec![id(73), id(74)]);
    assert_eq!(quantity_of(&book, 73), 1);
    assert_eq!(quantity_of(&book, 74), 2);
}

#[test]
fn test_id_reusable_after_fill() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::sell(1, 100, 5));
    submit(&mut book, Order::buy(2, 100, 5));
    assert!(!book.order_exists(id(1)));

    assert_eq!(submit(&mut book, Order::buy(1, 99, 3)), 0);
    assert_eq!(book.lookup_order_by_id(id(1)).unwrap(), Order::buy(1, 99, 3));
}

#[test]
fn test_lookup_missing_order_is_an_error() {
    let book = OrderBook::new();
    assert_eq!(
        book.lookup_order_by_id(id(3)),
        Err(BookError::NotFound { order_id: id(3) })
    );
    assert!(matches!(
        book.lookup_order_by_id(id(u32::MAX)),
        Err(BookError::IdOutOfRange { .. })
    ));
    assert!(!book.order_exists(id(u32::MAX)));
}

#[test]
fn test_volume_query_outside_domain_is_zero() {
    let book = OrderBook::with_config(common::small_config()).unwrap();
    assert_eq!(book.get_volume_at_level(Side::BUY, 0), 0);
    assert_eq!(book.get_volume_at_level(Side::SELL, u16::MAX), 0);
    assert!(book.level_orders(Side::SELL, 5).is_empty());
}

#[test]
fn test_rejected_submission_does_not_mutate() {
    let mut book = OrderBook::with_config(common::small_config()).unwrap();
    submit(&mut book, Order::sell(1, 1_010, 5));
    let before = common::snapshot(&book);

    // Would cross the resting ask, but the price is below the domain.
    assert!(matches!(
        book.match_order(Order::sell(2, 999, 5)),
        Err(BookError::PriceOutOfRange { price: 999, min: 1_000, max: 1_063 })
    ));
    assert!(matches!(
        book.match_order(Order::buy(256, 1_010, 5)),
        Err(BookError::IdOutOfRange { capacity: 256, .. })
    ));
    assert_eq!(common::snapshot(&book), before);
}

#[test]
fn test_full_level_drops_remainder() {
    common::init_tracing();
    let mut book = OrderBook::with_config(common::small_config()).unwrap();
    for raw in 0..LEVEL_CAPACITY as u32 {
        submit(&mut book, Order::buy(raw, 1_020, 1));
    }
    let before = common::snapshot(&book);

    let report = book.submit(Order::buy(100, 1_020, 7)).unwrap();
    assert_eq!(report.matches, 0);
    assert_eq!(report.rest, RestOutcome::Dropped { quantity: 7 });
    assert!(!book.order_exists(id(100)));
    assert_eq!(common::snapshot(&book), before);
    check_invariants(&book);

    // A different price on the same side still accepts orders.
    let report = book.submit(Order::buy(101, 1_019, 7)).unwrap();
    assert_eq!(report.rest, RestOutcome::Rested { quantity: 7 });
}

#[test]
fn test_full_level_accepts_again_after_fill() {
    let mut book = OrderBook::with_config(common::small_config()).unwrap();
    for raw in 0..LEVEL_CAPACITY as u32 {
        submit(&mut book, Order::buy(raw, 1_005, 1));
    }
    let report = book.submit(Order::buy(120, 1_005, 2)).unwrap();
    assert_eq!(report.rest, RestOutcome::Dropped { quantity: 2 });

    assert_eq!(submit(&mut book, Order::sell(121, 1_005, 1)), 1);
    assert!(!book.order_exists(id(0)));

    let report = book.submit(Order::buy(122, 1_005, 2)).unwrap();
    assert_eq!(report.rest, RestOutcome::Rested { quantity: 2 });
    assert_eq!(book.level_orders(Side::BUY, 1_005).last(), Some(&id(122)));
    assert_eq!(book.get_volume_at_level(Side::BUY, 1_005), LEVEL_CAPACITY as u32 + 1);
    check_invariants(&book);
}

#[test]
fn test_fill_callback_reports_price_time_order() {
    let mut book = OrderBook::new();
    submit(&mut book, Order::sell(1, 101, 2));
    submit(&mut book, Order::sell(2, 100, 2));
    submit(&mut book, Order::sell(3, 100, 2));

    let mut makers = Vec::new();
    let report = book
        .submit_with(Order::buy(4, 101, 5), |fill| {
            makers.push((fill.maker_order_id.get(), fill.price, fill.quantity))
        })
        .unwrap();

    assert_eq!(report.matches, 3);
    assert_eq!(report.filled, 5);
    assert_eq!(makers, vec![(2, 100, 2), (3, 100, 2), (1, 101, 1)]);
    check_invariants(&book);
}

#[test]
fn test_invalid_config_rejected() {
    let err = OrderBook::with_config(BookConfig::new().with_max_orders(0)).err().unwrap();
    assert!(matches!(err, BookError::InvalidConfig(_)));
}
