//! An in-memory Level-2 order book for a single instrument, driven by a sequential
//! stream of order lifecycle events (new, amend, cancel, trade, close).
//!
//! ## Architecture
//!
//! The library separates concerns into two pieces:
//!
//! 1. `OrderBook`: the state machine that keeps resting orders in price-time priority
//!    and answers Level-2 queries (top of book, book depth, size at a price level)
//! 2. `EventDispatcher`: a single worker that drains a bounded channel of
//!    `OrderMessage`s and applies them to the book one at a time
//!
//! `BookHandle` wires the two together: it owns the channel's producer side, the
//! worker thread, and an `Arc<RwLock<OrderBook>>` that readers on any thread can query.
//!
//! ## Example Usage
//!
//! ```rust
//! use level2_book::{BookConfig, BookHandle, OrderMessage, Side};
//! use rust_decimal::Decimal;
//!
//! let handle = BookHandle::spawn(&BookConfig::new("VOD.L")).unwrap();
//! let book = handle.book();
//!
//! // Producers push events; the worker applies them in arrival order
//! handle.submit(OrderMessage::new_order(1, Side::Bid, Decimal::new(940, 2), 10)).unwrap();
//! handle.submit(OrderMessage::new_order(2, Side::Bid, Decimal::new(940, 2), 5)).unwrap();
//! handle.submit(OrderMessage::new_order(3, Side::Bid, Decimal::new(935, 2), 2)).unwrap();
//! handle.submit(OrderMessage::trade(1, 10)).unwrap();
//!
//! // Close drains everything queued before it, then stops the worker
//! handle.close().unwrap();
//!
//! let book = book.read();
//! assert_eq!(book.top_of_book(Side::Bid), Decimal::new(940, 2));
//! assert_eq!(book.book_depth(Side::Bid), 2);
//! assert_eq!(book.size_for_price_level(Side::Bid, Decimal::new(940, 2)), 1);
//! ```
//!
//! All mutation happens on the worker, under the book's write lock, one event at a
//! time. Readers take the read lock, so they never observe a half-applied event and
//! do not block each other.

mod config;
mod dispatcher;
mod error;
mod ledger;
mod message;
mod order_book;
mod types;

// Re-export public API
pub use config::{BookConfig, DEFAULT_CHANNEL_CAPACITY};
pub use dispatcher::{BookHandle, EventDispatcher};
pub use error::{BookError, DispatchError};
pub use message::{MessageType, OrderData, OrderMessage};
pub use order_book::OrderBook;
pub use types::{OrderId, Quantity, RestingOrder, Side};

// Re-export commonly used external dependencies
pub use parking_lot::RwLock;
pub use rust_decimal::Decimal;
