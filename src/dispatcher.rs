use crate::config::BookConfig;
use crate::error::DispatchError;
use crate::message::{MessageType, OrderMessage};
use crate::order_book::OrderBook;
use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use parking_lot::{RwLock, RwLockReadGuard};
use std::ops::ControlFlow;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{error, info, warn};

/// Sequential consumer that applies inbound events to one book.
///
/// Exactly one event is applied, under the book's write lock, before the next one is
/// received. The loop blocks only while waiting on the channel and stops on `Close`.
#[derive(Debug)]
pub struct EventDispatcher {
    book: Arc<RwLock<OrderBook>>,
    receiver: Receiver<OrderMessage>,
}

impl EventDispatcher {
    pub fn new(book: Arc<RwLock<OrderBook>>, receiver: Receiver<OrderMessage>) -> Self {
        EventDispatcher { book, receiver }
    }

    /// Runs the dispatch loop until a `Close` event arrives, returning how many events
    /// were consumed (the `Close` included).
    ///
    /// If every producer disconnects first no further event can ever arrive, so the
    /// loop exits as well.
    pub fn run(self) -> u64 {
        let instrument = self.book.read().instrument().to_string();
        info!(%instrument, "order book started");

        let mut consumed = 0u64;
        loop {
            let message = match self.receiver.recv() {
                Ok(message) => message,
                Err(_) => {
                    warn!(%instrument, consumed, "all producers disconnected, order book stopping");
                    return consumed;
                }
            };
            consumed += 1;

            if self.dispatch(&message).is_break() {
                info!(%instrument, consumed, "order book closing");
                return consumed;
            }
        }
    }

    /// Routes one event to the matching book command.
    ///
    /// Rejections are already logged by the book and never stop the loop.
    pub fn dispatch(&self, message: &OrderMessage) -> ControlFlow<()> {
        let order = &message.order_data;
        let mut book = self.book.write();

        // Command results are fire-and-forget here; the book logs every rejection.
        let _ = match message.msg_type {
            MessageType::New => book.new_order(order.side, order.price, order.quantity, order.order_id),
            MessageType::Amend => book.amend(order.price, order.quantity, order.order_id),
            MessageType::Cancel => book.cancel(order.order_id),
            MessageType::Trade => book.trade(order.quantity, order.order_id),
            MessageType::Close => return ControlFlow::Break(()),
            MessageType::Unrecognized(code) => {
                error!(instrument = %book.instrument(), code, "unexpected message type");
                Ok(())
            }
        };
        ControlFlow::Continue(())
    }
}

/// Running book service: the shared book, its bounded inbound channel and the worker
/// thread draining it.
///
/// ## Examples
///
/// ```
/// use level2_book::{BookConfig, BookHandle, OrderMessage, Side};
/// use rust_decimal::Decimal;
///
/// let handle = BookHandle::spawn(&BookConfig::new("VOD.L")).unwrap();
/// let book = handle.book();
///
/// handle.submit(OrderMessage::new_order(1, Side::Bid, Decimal::new(940, 2), 10)).unwrap();
/// handle.submit(OrderMessage::new_order(2, Side::Ask, Decimal::new(945, 2), 5)).unwrap();
/// handle.close().unwrap();
///
/// let book = book.read();
/// assert_eq!(book.top_of_book(Side::Bid), Decimal::new(940, 2));
/// assert_eq!(book.book_depth(Side::Ask), 1);
/// ```
#[derive(Debug)]
pub struct BookHandle {
    instrument: String,
    book: Arc<RwLock<OrderBook>>,
    sender: Sender<OrderMessage>,
    worker: Option<JoinHandle<u64>>,
}

impl BookHandle {
    /// Creates an empty book and starts its worker thread.
    pub fn spawn(config: &BookConfig) -> Result<Self, DispatchError> {
        let book = Arc::new(RwLock::new(OrderBook::new(config.instrument.clone())));
        let (sender, receiver) = channel::bounded(config.channel_capacity);

        let dispatcher = EventDispatcher::new(Arc::clone(&book), receiver);
        let worker = thread::Builder::new()
            .name(format!("book-{}", config.instrument))
            .spawn(move || dispatcher.run())?;

        Ok(BookHandle {
            instrument: config.instrument.clone(),
            book,
            sender,
            worker: Some(worker),
        })
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    /// Enqueues an event, blocking while the channel is full.
    pub fn submit(&self, message: OrderMessage) -> Result<(), DispatchError> {
        self.sender
            .send(message)
            .map_err(|_| DispatchError::Closed(self.instrument.clone()))
    }

    /// Enqueues an event without blocking.
    pub fn try_submit(&self, message: OrderMessage) -> Result<(), DispatchError> {
        self.sender.try_send(message).map_err(|err| match err {
            TrySendError::Full(_) => DispatchError::Full(self.instrument.clone()),
            TrySendError::Disconnected(_) => DispatchError::Closed(self.instrument.clone()),
        })
    }

    /// Returns an additional producer for the inbound channel.
    pub fn sender(&self) -> Sender<OrderMessage> {
        self.sender.clone()
    }

    /// Shared handle on the book, for readers on other threads.
    pub fn book(&self) -> Arc<RwLock<OrderBook>> {
        Arc::clone(&self.book)
    }

    /// Read access to the book's current state.
    ///
    /// The worker cannot apply events while the guard is held.
    pub fn read(&self) -> RwLockReadGuard<'_, OrderBook> {
        self.book.read()
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    /// Sends `Close` and waits for the worker to drain everything queued before it.
    pub fn close(self) -> Result<u64, DispatchError> {
        // A worker that already stopped has dropped its receiver; joining still reports it.
        let _ = self.sender.send(OrderMessage::close());
        self.join()
    }

    /// Waits for the worker to stop, returning the number of events it consumed.
    pub fn join(mut self) -> Result<u64, DispatchError> {
        match self.worker.take() {
            Some(worker) => worker
                .join()
                .map_err(|_| DispatchError::WorkerPanicked(self.instrument.clone())),
            None => Ok(0),
        }
    }
}
