//! Composite Multiplexer
//!
//! Presents an ordered list of backends as one key space. Key-addressed
//! operations go to the first member claiming the key; `subscribe_all` and
//! `unsubscribe` go to every member.

use crate::ports::datastream::{ChangeSubscription, DataStream};
use shared_types::Key;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// Ordered aggregate of backends. Members may themselves be composites.
#[derive(Clone, Default)]
pub struct CompositeDataStream {
    streams: Vec<Rc<dyn DataStream>>,
}

impl CompositeDataStream {
    /// Create a composite over `streams`, searched in the given order.
    #[must_use]
    pub fn new(streams: Vec<Rc<dyn DataStream>>) -> Self {
        debug!("[tw-01] Composite store created with {} members", streams.len());
        Self { streams }
    }

    /// Member backends in resolution order.
    #[must_use]
    pub fn streams(&self) -> &[Rc<dyn DataStream>] {
        &self.streams
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Whether the composite has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// First member claiming `key`.
    #[must_use]
    pub fn find_stream(&self, key: Key) -> Option<&Rc<dyn DataStream>> {
        let found = self.streams.iter().position(|stream| stream.contains(key));
        trace!(key, member = ?found, "[tw-01] Resolved key");
        found.and_then(|index| self.streams.get(index))
    }
}

impl DataStream for CompositeDataStream {
    fn read(&self, key: Key, out: &mut [u8]) {
        if let Some(stream) = self.find_stream(key) {
            stream.read(key, out);
        }
    }

    fn write(&self, key: Key, data: &[u8]) {
        if let Some(stream) = self.find_stream(key) {
            stream.write(key, data);
        }
    }

    fn contains(&self, key: Key) -> bool {
        self.find_stream(key).is_some()
    }

    fn size(&self, key: Key) -> usize {
        self.find_stream(key).map_or(0, |stream| stream.size(key))
    }

    fn subscribe(&self, key: Key, subscription: &ChangeSubscription) {
        if let Some(stream) = self.find_stream(key) {
            stream.subscribe(key, subscription);
        }
    }

    fn subscribe_all(&self, subscription: &ChangeSubscription) {
        for stream in &self.streams {
            stream.subscribe_all(subscription);
        }
    }

    fn unsubscribe(&self, subscription: &ChangeSubscription) {
        for stream in &self.streams {
            stream.unsubscribe(subscription);
        }
    }
}

impl fmt::Debug for CompositeDataStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeDataStream")
            .field("members", &self.streams.len())
            .finish()
    }
}
