/// Default number of events the inbound channel holds before producers block.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Settings for starting a book service with [`BookHandle::spawn`](crate::BookHandle::spawn).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookConfig {
    /// Instrument the book serves; names the worker thread and tags every log line
    pub instrument: String,
    /// Capacity of the bounded inbound event channel
    pub channel_capacity: usize,
}

impl BookConfig {
    pub fn new(instrument: impl Into<String>) -> Self {
        BookConfig {
            instrument: instrument.into(),
            ..Self::default()
        }
    }

    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = instrument.into();
        self
    }

    pub fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity;
        self
    }
}

impl Default for BookConfig {
    fn default() -> Self {
        BookConfig {
            instrument: "BOOK".to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}
