use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::time::Instant;

/// Identifier of an order, unique while the order rests on the book.
pub type OrderId = u64;

/// Order quantity.
///
/// Signed so that invalid (negative) quantities coming off the event stream can be
/// represented and rejected instead of wrapping.
pub type Quantity = i64;

/// Represents the side of an order in the order book.
///
/// - `Bid` represents buy orders (demand side)
/// - `Ask` represents sell orders (supply side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy side: traders willing to purchase at a given price
    #[default]
    Bid,
    /// Sell side: traders willing to sell at a given price
    Ask,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => f.write_str("BID"),
            Side::Ask => f.write_str("ASK"),
        }
    }
}

/// A single order resting on the book.
///
/// The book owns every resting order; callers only ever receive copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestingOrder {
    /// Identity of the order, fixed for its whole life on the book
    pub order_id: OrderId,
    /// Whether this is a buy (`Bid`) or sell (`Ask`) order
    pub side: Side,
    /// Limit price (exact decimal arithmetic)
    pub price: Decimal,
    /// Remaining quantity, always strictly positive while resting
    pub quantity: Quantity,
    /// Instant the order was accepted by the book
    pub timestamp: Instant,
    /// Arrival position within the book, breaks ties between equal timestamps
    pub sequence: u64,
}

impl RestingOrder {
    pub(crate) fn new(
        order_id: OrderId,
        side: Side,
        price: Decimal,
        quantity: Quantity,
        sequence: u64,
    ) -> Self {
        Self {
            order_id,
            side,
            price,
            quantity,
            timestamp: Instant::now(),
            sequence,
        }
    }

    /// Compares two orders of the same side under price-time priority.
    ///
    /// `Ordering::Less` means `self` ranks ahead of `other`. A better price always wins
    /// (higher for bids, lower for asks); at equal prices the earlier order wins.
    ///
    /// ## Examples
    ///
    /// ```
    /// use level2_book::{OrderBook, Side};
    /// use rust_decimal::Decimal;
    /// use std::cmp::Ordering;
    ///
    /// let mut book = OrderBook::new("VOD.L");
    /// book.new_order(Side::Bid, Decimal::new(940, 2), 10, 1).unwrap();
    /// book.new_order(Side::Bid, Decimal::new(940, 2), 5, 2).unwrap();
    ///
    /// let first = book.order(1).unwrap();
    /// let second = book.order(2).unwrap();
    /// assert_eq!(first.cmp_priority(&second), Ordering::Less);
    /// ```
    pub fn cmp_priority(&self, other: &RestingOrder) -> Ordering {
        if self.price == other.price {
            return self
                .timestamp
                .cmp(&other.timestamp)
                .then(self.sequence.cmp(&other.sequence));
        }

        match self.side {
            Side::Bid => other.price.cmp(&self.price),
            Side::Ask => self.price.cmp(&other.price),
        }
    }
}

impl fmt::Display for RestingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order{{order_id={}, side={}, price={}, quantity={}}}",
            self.order_id, self.side, self.price, self.quantity
        )
    }
}
