use crate::types::{OrderId, Quantity, Side};
use rust_decimal::Decimal;

/// Kind of a lifecycle event travelling to the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// New order (side, price, quantity, order id)
    New,
    /// Amend order (price, quantity, order id)
    Amend,
    /// Cancel order (order id)
    Cancel,
    /// Trade against a resting order (quantity, order id)
    Trade,
    /// Close the book, no payload
    Close,
    /// A kind code the book does not understand
    Unrecognized(u8),
}

impl From<u8> for MessageType {
    /// Decodes a raw kind code as produced by ingestion: `0..=4` map to
    /// New, Amend, Cancel, Trade and Close.
    fn from(code: u8) -> Self {
        match code {
            0 => MessageType::New,
            1 => MessageType::Amend,
            2 => MessageType::Cancel,
            3 => MessageType::Trade,
            4 => MessageType::Close,
            other => MessageType::Unrecognized(other),
        }
    }
}

/// Order-shaped payload of a lifecycle event.
///
/// Which fields matter depends on the message kind; the rest are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderData {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Decimal,
    pub quantity: Quantity,
}

/// A lifecycle event: a kind plus its order payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMessage {
    pub msg_type: MessageType,
    pub order_data: OrderData,
}

impl OrderMessage {
    pub fn new(msg_type: MessageType, order_data: OrderData) -> Self {
        Self {
            msg_type,
            order_data,
        }
    }

    pub fn new_order(order_id: OrderId, side: Side, price: Decimal, quantity: Quantity) -> Self {
        Self::new(
            MessageType::New,
            OrderData {
                order_id,
                side,
                price,
                quantity,
            },
        )
    }

    /// Builds an amend event. The side is not part of an amendment and is left at its default.
    pub fn amend(order_id: OrderId, price: Decimal, quantity: Quantity) -> Self {
        Self::new(
            MessageType::Amend,
            OrderData {
                order_id,
                price,
                quantity,
                ..OrderData::default()
            },
        )
    }

    pub fn cancel(order_id: OrderId) -> Self {
        Self::new(
            MessageType::Cancel,
            OrderData {
                order_id,
                ..OrderData::default()
            },
        )
    }

    /// Builds a trade event reducing the resting order `order_id` by `quantity`.
    pub fn trade(order_id: OrderId, quantity: Quantity) -> Self {
        Self::new(
            MessageType::Trade,
            OrderData {
                order_id,
                quantity,
                ..OrderData::default()
            },
        )
    }

    pub fn close() -> Self {
        Self::new(MessageType::Close, OrderData::default())
    }
}
