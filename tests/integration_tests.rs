use level2_book::{BookError, Decimal, OrderBook, OrderId, Quantity, Side};
use std::str::FromStr;

fn price(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// Three bids over two price levels and three asks over three price levels.
fn seeded_orders() -> Vec<(OrderId, Side, Decimal, Quantity)> {
    vec![
        (1, Side::Bid, price("9.40"), 10),
        (2, Side::Bid, price("9.40"), 5),
        (3, Side::Bid, price("9.35"), 2),
        (4, Side::Ask, price("9.45"), 10),
        (5, Side::Ask, price("9.50"), 5),
        (6, Side::Ask, price("9.55"), 2),
    ]
}

fn seeded_book() -> OrderBook {
    let mut order_book = OrderBook::new("VOD.L");
    for (order_id, side, order_price, quantity) in seeded_orders() {
        order_book
            .new_order(side, order_price, quantity, order_id)
            .unwrap();
    }
    order_book
}

fn ids(order_book: &OrderBook, side: Side) -> Vec<OrderId> {
    order_book
        .orders(side)
        .iter()
        .map(|order| order.order_id)
        .collect()
}

#[test]
/// An untouched book holds nothing and answers every query with zero.
fn test_empty_book_queries() {
    let order_book = OrderBook::new("VOD.L");

    assert!(order_book.is_empty());
    for side in [Side::Bid, Side::Ask] {
        assert_eq!(order_book.top_of_book(side), Decimal::ZERO);
        assert_eq!(order_book.book_depth(side), 0);
        assert_eq!(order_book.size_for_price_level(side, price("9.40")), 0);
        assert_eq!(order_book.side_len(side), 0);
    }
    assert_eq!(order_book.size_for_price_level(Side::Ask, Decimal::ZERO), 0);
    assert_eq!(order_book.compute_spread(), (None, None));
}

#[test]
/// Accepted orders land in the index and on exactly one side.
fn test_orders_on_book() {
    let order_book = seeded_book();

    assert_eq!(order_book.order_count(), 6);
    assert_eq!(order_book.side_len(Side::Bid), 3);
    assert_eq!(order_book.side_len(Side::Ask), 3);
    assert_eq!(order_book.instrument(), "VOD.L");

    let order = order_book.order(4).expect("order 4 should rest");
    assert_eq!(order.side, Side::Ask);
    assert_eq!(order.price, price("9.45"));
    assert_eq!(order.quantity, 10);
}

#[test]
/// Better price ranks first on each side, and time breaks ties at equal prices.
fn test_price_time_ordering() {
    let mut order_book = seeded_book();

    assert_eq!(ids(&order_book, Side::Bid), vec![1, 2, 3]);
    assert_eq!(ids(&order_book, Side::Ask), vec![4, 5, 6]);

    // A better bid jumps the queue, a worse ask goes to the back
    order_book.new_order(Side::Bid, price("9.42"), 1, 7).unwrap();
    order_book.new_order(Side::Ask, price("9.60"), 1, 8).unwrap();
    // Same price as an existing level joins behind it
    order_book.new_order(Side::Ask, price("9.45"), 3, 9).unwrap();

    assert_eq!(ids(&order_book, Side::Bid), vec![7, 1, 2, 3]);
    assert_eq!(ids(&order_book, Side::Ask), vec![4, 9, 5, 6, 8]);

    for side in [Side::Bid, Side::Ask] {
        let orders = order_book.orders(side);
        for pair in orders.windows(2) {
            assert!(
                pair[0].cmp_priority(&pair[1]).is_lt(),
                "{side} side out of order: {} before {}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
/// Bids arriving in worst-first order still come out best-first.
fn test_bids_sorted_regardless_of_arrival() {
    let mut order_book = OrderBook::new("VOD.L");
    order_book.new_order(Side::Bid, price("9.30"), 1, 1).unwrap();
    order_book.new_order(Side::Bid, price("9.35"), 1, 2).unwrap();
    order_book.new_order(Side::Bid, price("9.40"), 1, 3).unwrap();
    order_book.new_order(Side::Bid, price("9.35"), 1, 4).unwrap();

    assert_eq!(ids(&order_book, Side::Bid), vec![3, 2, 4, 1]);
    assert_eq!(order_book.top_of_book(Side::Bid), price("9.40"));
}

#[test]
/// Top of book is the highest bid and the lowest ask.
fn test_top_of_book() {
    let order_book = seeded_book();

    assert_eq!(order_book.top_of_book(Side::Bid), price("9.40"));
    assert_eq!(order_book.top_of_book(Side::Ask), price("9.45"));
    assert_eq!(
        order_book.compute_spread(),
        (Some(price("9.40")), Some(price("9.45")))
    );
}

#[test]
/// Depth counts distinct price levels, not orders.
fn test_book_depth() {
    let mut order_book = seeded_book();

    assert_eq!(order_book.book_depth(Side::Bid), 2);
    assert_eq!(order_book.book_depth(Side::Ask), 3);

    // 9.4 and 9.40 are the same level
    order_book.new_order(Side::Bid, price("9.4"), 1, 7).unwrap();
    assert_eq!(order_book.book_depth(Side::Bid), 2);
}

#[test]
/// Size at a level is the number of orders resting at that exact price.
fn test_size_for_price_level() {
    let order_book = seeded_book();

    assert_eq!(order_book.size_for_price_level(Side::Bid, price("9.40")), 2);
    assert_eq!(order_book.size_for_price_level(Side::Bid, price("9.35")), 1);
    assert_eq!(order_book.size_for_price_level(Side::Ask, price("9.50")), 1);
    assert_eq!(order_book.size_for_price_level(Side::Ask, price("9.40")), 0);
    assert_eq!(order_book.size_for_price_level(Side::Bid, Decimal::ZERO), 0);
    assert_eq!(order_book.size_for_price_level(Side::Bid, price("-9.40")), 0);
}

#[test]
/// New orders with a non-positive price or quantity never reach the book.
fn test_invalid_new_orders_rejected() {
    let mut order_book = OrderBook::new("VOD.L");

    assert_eq!(
        order_book.new_order(Side::Bid, Decimal::ZERO, 10, 1),
        Err(BookError::InvalidPrice(Decimal::ZERO))
    );
    assert_eq!(
        order_book.new_order(Side::Ask, price("-9.45"), 10, 2),
        Err(BookError::InvalidPrice(price("-9.45")))
    );
    assert_eq!(
        order_book.new_order(Side::Bid, price("9.40"), 0, 3),
        Err(BookError::InvalidQuantity(0))
    );
    assert_eq!(
        order_book.new_order(Side::Bid, price("9.40"), -5, 4),
        Err(BookError::InvalidQuantity(-5))
    );

    assert!(order_book.is_empty());
    assert_eq!(order_book.book_depth(Side::Bid), 0);
}

#[test]
/// Resubmitting a live id is ignored rather than merged.
fn test_duplicate_order_rejected() {
    let mut order_book = OrderBook::new("VOD.L");
    order_book.new_order(Side::Bid, price("9.40"), 10, 1).unwrap();

    assert_eq!(
        order_book.new_order(Side::Bid, price("9.40"), 10, 1),
        Err(BookError::DuplicateOrder(1))
    );
    assert_eq!(
        order_book.new_order(Side::Ask, price("9.60"), 3, 1),
        Err(BookError::DuplicateOrder(1))
    );

    assert_eq!(order_book.order_count(), 1);
    assert_eq!(order_book.side_len(Side::Bid), 1);
    assert_eq!(order_book.side_len(Side::Ask), 0);
    assert_eq!(order_book.order(1).map(|order| order.quantity), Some(10));
}

#[test]
/// A cancelled id can be reused by a later order.
fn test_cancel_order() {
    let mut order_book = OrderBook::new("VOD.L");
    order_book.new_order(Side::Bid, price("9.40"), 10, 1).unwrap();
    assert!(!order_book.is_empty());

    order_book.cancel(1).unwrap();
    assert!(order_book.is_empty());
    assert_eq!(order_book.side_len(Side::Bid), 0);
    assert_eq!(order_book.top_of_book(Side::Bid), Decimal::ZERO);

    order_book.new_order(Side::Ask, price("9.50"), 4, 1).unwrap();
    assert_eq!(order_book.order(1).map(|order| order.side), Some(Side::Ask));
}

#[test]
/// Cancelling from the middle of a side keeps the rest in order.
fn test_cancel_keeps_remaining_order() {
    let mut order_book = seeded_book();

    order_book.cancel(2).unwrap();
    order_book.cancel(5).unwrap();

    assert_eq!(ids(&order_book, Side::Bid), vec![1, 3]);
    assert_eq!(ids(&order_book, Side::Ask), vec![4, 6]);
    assert_eq!(order_book.order_count(), 4);
    assert_eq!(order_book.size_for_price_level(Side::Bid, price("9.40")), 1);
}

#[test]
fn test_cancel_non_existent_order() {
    let mut order_book = OrderBook::new("VOD.L");

    assert_eq!(order_book.cancel(1), Err(BookError::OrderNotFound(1)));
    assert!(order_book.is_empty());

    order_book.new_order(Side::Bid, price("9.40"), 10, 1).unwrap();
    assert_eq!(order_book.cancel(2), Err(BookError::OrderNotFound(2)));
    assert_eq!(order_book.order_count(), 1);
}

#[test]
fn test_amend_order_quantity() {
    let mut order_book = seeded_book();

    order_book.amend(price("9.50"), 7, 5).unwrap();

    let order = order_book.order(5).unwrap();
    assert_eq!(order.quantity, 7);
    assert_eq!(order.price, price("9.50"));
    assert_eq!(ids(&order_book, Side::Ask), vec![4, 5, 6]);
}

#[test]
/// A price amendment moves the order to its new level.
fn test_amend_order_price_repositions() {
    let mut order_book = seeded_book();

    // Order 6 improves from 9.55 past 9.50 to the front
    order_book.amend(price("9.42"), 2, 6).unwrap();
    assert_eq!(order_book.order(6).map(|order| order.price), Some(price("9.42")));
    assert_eq!(ids(&order_book, Side::Ask), vec![6, 4, 5]);
    assert_eq!(order_book.top_of_book(Side::Ask), price("9.42"));

    // Order 1 worsens from 9.40 to 9.35 and keeps its earlier time at that level
    order_book.amend(price("9.35"), 10, 1).unwrap();
    assert_eq!(ids(&order_book, Side::Bid), vec![2, 1, 3]);
    assert_eq!(order_book.book_depth(Side::Bid), 2);
    assert_eq!(order_book.size_for_price_level(Side::Bid, price("9.35")), 2);
}

#[test]
/// Amending keeps the order's identity and creation time.
fn test_amend_keeps_identity_and_timestamp() {
    let mut order_book = seeded_book();
    let before = order_book.order(4).unwrap();

    order_book.amend(price("9.42"), 9, 4).unwrap();

    let after = order_book.order(4).unwrap();
    assert_eq!(after.order_id, 4);
    assert_eq!(after.side, Side::Ask);
    assert_eq!(after.price, price("9.42"));
    assert_eq!(after.quantity, 9);
    assert_eq!(after.timestamp, before.timestamp);
    assert_eq!(after.sequence, before.sequence);
}

#[test]
/// Amendments with a non-positive price are rejected as a whole.
fn test_invalid_amend_price() {
    let mut order_book = seeded_book();

    assert_eq!(
        order_book.amend(Decimal::ZERO, 2, 6),
        Err(BookError::InvalidAmendment {
            price: Decimal::ZERO,
            quantity: 2
        })
    );
    assert!(order_book.amend(price("-9.60"), 10, 4).is_err());

    let order = order_book.order(6).unwrap();
    assert_eq!((order.price, order.quantity), (price("9.55"), 2));
    let order = order_book.order(4).unwrap();
    assert_eq!((order.price, order.quantity), (price("9.45"), 10));
}

#[test]
/// Amendments with a non-positive quantity are rejected as a whole.
fn test_invalid_amend_quantity() {
    let mut order_book = seeded_book();

    assert!(order_book.amend(price("9.60"), 0, 5).is_err());
    assert!(order_book.amend(price("9.30"), -10, 3).is_err());

    let order = order_book.order(5).unwrap();
    assert_eq!((order.price, order.quantity), (price("9.50"), 5));
    let order = order_book.order(3).unwrap();
    assert_eq!((order.price, order.quantity), (price("9.35"), 2));
    assert_eq!(ids(&order_book, Side::Bid), vec![1, 2, 3]);
}

#[test]
fn test_amend_non_existent_order() {
    let mut order_book = OrderBook::new("VOD.L");

    assert_eq!(
        order_book.amend(price("9.40"), 10, 1),
        Err(BookError::OrderNotFound(1))
    );
    assert!(order_book.is_empty());
}

#[test]
/// A partial fill reduces the order and keeps its place in the queue.
fn test_trade_some_quantity() {
    let mut order_book = seeded_book();

    order_book.trade(2, 1).unwrap();

    assert_eq!(order_book.order(1).map(|order| order.quantity), Some(8));
    assert_eq!(ids(&order_book, Side::Bid), vec![1, 2, 3]);
}

#[test]
fn test_multi_trade_order() {
    let mut order_book = OrderBook::new("VOD.L");
    order_book.new_order(Side::Bid, price("9.40"), 10, 1).unwrap();

    order_book.trade(2, 1).unwrap();
    assert_eq!(order_book.order(1).map(|order| order.quantity), Some(8));

    order_book.trade(4, 1).unwrap();
    assert_eq!(order_book.order(1).map(|order| order.quantity), Some(4));
}

#[test]
/// A fill down to zero removes the order from the index and its side.
fn test_trade_all_quantity() {
    let mut order_book = OrderBook::new("VOD.L");
    order_book.new_order(Side::Bid, price("9.40"), 10, 1).unwrap();

    order_book.trade(10, 1).unwrap();

    assert!(order_book.order(1).is_none());
    assert!(order_book.is_empty());
    assert_eq!(order_book.side_len(Side::Bid), 0);
    assert_eq!(order_book.book_depth(Side::Bid), 0);
}

#[test]
/// Trades larger than the resting quantity are rejected without a partial fill.
fn test_over_trade_rejected() {
    let mut order_book = seeded_book();

    assert_eq!(
        order_book.trade(3, 6),
        Err(BookError::InsufficientQuantity {
            order_id: 6,
            resting: 2,
            requested: 3
        })
    );
    assert_eq!(order_book.order(6).map(|order| order.quantity), Some(2));
    assert_eq!(order_book.trade(0, 6), Err(BookError::InvalidQuantity(0)));
    assert_eq!(order_book.trade(-1, 6), Err(BookError::InvalidQuantity(-1)));
    assert_eq!(order_book.order(6).map(|order| order.quantity), Some(2));
    assert_eq!(order_book.trade(5, 42), Err(BookError::OrderNotFound(42)));
    assert_eq!(order_book.order_count(), 6);
}

#[test]
/// Filling the best order hands the top of book to the next one.
fn test_full_fill_moves_top_of_book() {
    let mut order_book = seeded_book();

    order_book.trade(10, 4).unwrap();
    assert_eq!(order_book.top_of_book(Side::Ask), price("9.50"));
    assert_eq!(order_book.book_depth(Side::Ask), 2);

    order_book.trade(5, 5).unwrap();
    order_book.trade(2, 6).unwrap();
    assert_eq!(order_book.top_of_book(Side::Ask), Decimal::ZERO);
    assert_eq!(order_book.compute_spread(), (Some(price("9.40")), None));
}
