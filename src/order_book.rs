use crate::error::BookError;
use crate::ledger::SideLedger;
use crate::types::{OrderId, Quantity, RestingOrder, Side};
use rust_decimal::Decimal;
use rustc_hash::{FxHashMap, FxHashSet};
use slab::Slab;
use tracing::{debug, info, warn};

/// The core order book for a single instrument, maintaining price-time priority.
///
/// Orders live in a slab arena. The order index maps an order id to its slab key and
/// each side keeps the slab keys of its orders sorted by priority, so both structures
/// always refer to the same single record.
///
/// Every command either applies completely or is rejected with a [`BookError`] and a
/// `warn` record, leaving the book untouched. Callers are free to ignore the returned
/// result; the outcome is also observable through the queries.
///
/// ### Thread Safety
///
/// This structure is designed to be wrapped in a `RwLock` for concurrent access.
/// The book worker holds the write lock for exactly one event at a time.
#[derive(Debug)]
pub struct OrderBook {
    instrument: String,
    /// Arena owning every resting order
    orders: Slab<RestingOrder>,
    /// Order id to slab key, across both sides
    index: FxHashMap<OrderId, usize>,
    /// Bid side: highest price first, then earliest first
    bids: SideLedger,
    /// Ask side: lowest price first, then earliest first
    asks: SideLedger,
    next_sequence: u64,
}

impl OrderBook {
    /// Creates a new empty order book for `instrument`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use level2_book::OrderBook;
    ///
    /// let order_book = OrderBook::new("VOD.L");
    /// assert!(order_book.is_empty());
    /// ```
    pub fn new(instrument: impl Into<String>) -> Self {
        OrderBook {
            instrument: instrument.into(),
            orders: Slab::new(),
            index: FxHashMap::default(),
            bids: SideLedger::new(Side::Bid),
            asks: SideLedger::new(Side::Ask),
            next_sequence: 0,
        }
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    fn ledger(&self, side: Side) -> &SideLedger {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// Adds a new resting order.
    ///
    /// Rejected when the price or quantity is not strictly positive, or when an order
    /// with the same id is already resting (the existing order is left untouched).
    ///
    /// ## Examples
    ///
    /// ```
    /// use level2_book::{OrderBook, Side, BookError};
    /// use rust_decimal::Decimal;
    ///
    /// let mut order_book = OrderBook::new("VOD.L");
    /// order_book.new_order(Side::Bid, Decimal::new(940, 2), 10, 1).unwrap();
    ///
    /// let duplicate = order_book.new_order(Side::Bid, Decimal::new(940, 2), 10, 1);
    /// assert_eq!(duplicate, Err(BookError::DuplicateOrder(1)));
    /// assert_eq!(order_book.order_count(), 1);
    /// ```
    pub fn new_order(
        &mut self,
        side: Side,
        price: Decimal,
        quantity: Quantity,
        order_id: OrderId,
    ) -> Result<(), BookError> {
        let validation = if price <= Decimal::ZERO {
            Err(BookError::InvalidPrice(price))
        } else if quantity <= 0 {
            Err(BookError::InvalidQuantity(quantity))
        } else if self.index.contains_key(&order_id) {
            Err(BookError::DuplicateOrder(order_id))
        } else {
            Ok(())
        };
        if let Err(err) = validation {
            warn!(instrument = %self.instrument, "rejected new order: {err}");
            debug!(order_id, %side, %price, quantity, "rejected new order details");
            return Err(err);
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let key = self
            .orders
            .insert(RestingOrder::new(order_id, side, price, quantity, sequence));
        self.index.insert(order_id, key);

        let ledger = match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        ledger.insert(key, &self.orders);

        info!(instrument = %self.instrument, "new order created: {}", self.orders[key]);
        Ok(())
    }

    /// Cancels a resting order, removing it from the index and its side.
    pub fn cancel(&mut self, order_id: OrderId) -> Result<(), BookError> {
        let Some(&key) = self.index.get(&order_id) else {
            warn!(instrument = %self.instrument, order_id, "order not found for cancel");
            return Err(BookError::OrderNotFound(order_id));
        };

        let cancelled = self.unlink(order_id, key);
        info!(instrument = %self.instrument, "order cancelled: {cancelled}");
        Ok(())
    }

    /// Replaces the price and quantity of a resting order.
    ///
    /// Both values must be strictly positive or nothing is changed. The order keeps its
    /// identity and its original timestamp, and is moved to the position its new price
    /// gives it.
    pub fn amend(
        &mut self,
        price: Decimal,
        quantity: Quantity,
        order_id: OrderId,
    ) -> Result<(), BookError> {
        if price <= Decimal::ZERO || quantity <= 0 {
            let err = BookError::InvalidAmendment { price, quantity };
            warn!(instrument = %self.instrument, "rejected amendment: {err}");
            debug!(order_id, %price, quantity, "rejected amendment details");
            return Err(err);
        }

        let Some(&key) = self.index.get(&order_id) else {
            warn!(instrument = %self.instrument, order_id, "order not found for amend");
            return Err(BookError::OrderNotFound(order_id));
        };

        let ledger = match self.orders[key].side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };

        // Take the order out at its old rank before the price moves, then re-rank it.
        let ranked = ledger.remove(key, &self.orders);
        debug_assert!(ranked, "indexed order {order_id} missing from its side");

        let amended = &mut self.orders[key];
        amended.price = price;
        amended.quantity = quantity;

        ledger.insert(key, &self.orders);

        info!(instrument = %self.instrument, "order amended: {}", self.orders[key]);
        Ok(())
    }

    /// Reduces a resting order by a traded quantity.
    ///
    /// A trade may not exceed the resting quantity. A trade that brings the order to
    /// exactly zero removes it from the book; otherwise it keeps resting with its time
    /// priority intact.
    ///
    /// ## Examples
    ///
    /// ```
    /// use level2_book::{OrderBook, Side};
    /// use rust_decimal::Decimal;
    ///
    /// let mut order_book = OrderBook::new("VOD.L");
    /// order_book.new_order(Side::Bid, Decimal::new(940, 2), 10, 1).unwrap();
    ///
    /// order_book.trade(2, 1).unwrap();
    /// order_book.trade(4, 1).unwrap();
    /// assert_eq!(order_book.order(1).map(|order| order.quantity), Some(4));
    ///
    /// order_book.trade(4, 1).unwrap();
    /// assert!(order_book.order(1).is_none());
    /// ```
    pub fn trade(&mut self, quantity: Quantity, resting_order_id: OrderId) -> Result<(), BookError> {
        let Some(&key) = self.index.get(&resting_order_id) else {
            warn!(instrument = %self.instrument, order_id = resting_order_id, "order not found for trade");
            return Err(BookError::OrderNotFound(resting_order_id));
        };

        if quantity <= 0 {
            warn!(instrument = %self.instrument, order_id = resting_order_id, quantity, "invalid trade quantity");
            return Err(BookError::InvalidQuantity(quantity));
        }

        let traded = &mut self.orders[key];
        if traded.quantity < quantity {
            let err = BookError::InsufficientQuantity {
                order_id: resting_order_id,
                resting: traded.quantity,
                requested: quantity,
            };
            warn!(instrument = %self.instrument, "rejected trade: {err}");
            debug!("traded order -> {traded}");
            return Err(err);
        }

        info!(instrument = %self.instrument, quantity, "traded on order: {traded}");
        traded.quantity -= quantity;

        if traded.quantity == 0 {
            self.unlink(resting_order_id, key);
            info!(instrument = %self.instrument, order_id = resting_order_id, "order fully filled, removed from depth");
        }
        Ok(())
    }

    /// Removes an indexed order from its side, the index and the arena.
    fn unlink(&mut self, order_id: OrderId, key: usize) -> RestingOrder {
        let ledger = match self.orders[key].side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        let ranked = ledger.remove(key, &self.orders);
        debug_assert!(ranked, "indexed order {order_id} missing from its side");

        self.index.remove(&order_id);
        self.orders.remove(key)
    }

    /// Returns the best price on `side`, or zero when the side holds no orders.
    ///
    /// ## Examples
    ///
    /// ```
    /// use level2_book::{OrderBook, Side};
    /// use rust_decimal::Decimal;
    ///
    /// let mut order_book = OrderBook::new("VOD.L");
    /// assert_eq!(order_book.top_of_book(Side::Ask), Decimal::ZERO);
    ///
    /// order_book.new_order(Side::Ask, Decimal::new(955, 2), 2, 6).unwrap();
    /// order_book.new_order(Side::Ask, Decimal::new(945, 2), 10, 4).unwrap();
    /// assert_eq!(order_book.top_of_book(Side::Ask), Decimal::new(945, 2));
    /// ```
    pub fn top_of_book(&self, side: Side) -> Decimal {
        match self.ledger(side).first() {
            Some(key) => self.orders[key].price,
            None => {
                debug!(instrument = %self.instrument, %side, "no orders on book");
                Decimal::ZERO
            }
        }
    }

    /// Returns the number of distinct price levels on `side`.
    ///
    /// Prices compare numerically, so `9.4` and `9.40` are the same level.
    pub fn book_depth(&self, side: Side) -> usize {
        let mut seen = FxHashSet::default();
        self.ledger(side)
            .iter(&self.orders)
            .filter(|order| seen.insert(order.price.normalize()))
            .count()
    }

    /// Returns the number of orders resting at exactly `price` on `side`.
    ///
    /// A non-positive price is not a valid level and yields zero.
    pub fn size_for_price_level(&self, side: Side, price: Decimal) -> usize {
        if price <= Decimal::ZERO {
            warn!(instrument = %self.instrument, %side, %price, "invalid price level value");
            return 0;
        }

        let ledger = self.ledger(side);
        if ledger.is_empty() {
            debug!(instrument = %self.instrument, %side, %price, "no orders found at price level");
            return 0;
        }

        ledger
            .iter(&self.orders)
            .filter(|order| order.price == price)
            .count()
    }

    /// Computes the current best bid and best ask prices.
    ///
    /// ## Returns
    ///
    /// A tuple of `(best_bid, best_ask)` where each is `Option<Decimal>`.
    /// Returns `None` if there are no orders on that side.
    pub fn compute_spread(&self) -> (Option<Decimal>, Option<Decimal>) {
        let best_bid = self.bids.first().map(|key| self.orders[key].price);
        let best_ask = self.asks.first().map(|key| self.orders[key].price);

        (best_bid, best_ask)
    }

    /// Returns a copy of the resting order with `order_id`, if any.
    pub fn order(&self, order_id: OrderId) -> Option<RestingOrder> {
        self.index
            .get(&order_id)
            .map(|key| self.orders[*key].clone())
    }

    /// Returns copies of the orders on `side`, best first.
    pub fn orders(&self, side: Side) -> Vec<RestingOrder> {
        self.ledger(side).iter(&self.orders).cloned().collect()
    }

    /// Number of resting orders across both sides.
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    /// Number of resting orders on `side`.
    pub fn side_len(&self, side: Side) -> usize {
        self.ledger(side).len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
