use crate::types::{OrderId, Quantity};
use rust_decimal::Decimal;

/// Reasons a book command was rejected.
///
/// A rejected command leaves the book exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookError {
    /// Price must be strictly positive
    #[error("invalid price: {0}")]
    InvalidPrice(Decimal),

    /// Quantity must be strictly positive
    #[error("invalid quantity: {0}")]
    InvalidQuantity(Quantity),

    /// Amendments need both a positive price and a positive quantity
    #[error("invalid price and/or quantity amendment: price({price}) quantity({quantity})")]
    InvalidAmendment {
        /// Requested price
        price: Decimal,
        /// Requested quantity
        quantity: Quantity,
    },

    /// An order with this id is already resting
    #[error("order already exists: {0}")]
    DuplicateOrder(OrderId),

    /// No resting order carries this id
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// The trade would over-fill the resting order
    #[error("not enough volume left in order {order_id} to trade {requested} (resting {resting})")]
    InsufficientQuantity {
        /// Order the trade referenced
        order_id: OrderId,
        /// Quantity still resting
        resting: Quantity,
        /// Quantity the trade asked for
        requested: Quantity,
    },
}

/// Failures of the book service plumbing (worker thread and inbound channel).
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to spawn book worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("order book {0} is closed")]
    Closed(String),

    #[error("inbound channel of order book {0} is full")]
    Full(String),

    #[error("book worker for {0} panicked")]
    WorkerPanicked(String),
}
