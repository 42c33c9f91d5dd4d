//! RAM-backed Leaf Store
//!
//! Owns a zero-initialized byte block described by a [`StoreLayout`] and
//! publishes whenever a write actually changes a value.

use crate::domain::errors::LayoutError;
use crate::domain::layout::StoreLayout;
use crate::ports::datastream::{ChangeChannel, ChangeSubscription, DataStream};
use shared_types::{ChangeArgs, Key};
use std::cell::RefCell;
use std::fmt;
use tracing::{debug, warn};

/// Leaf backend over a contiguous byte block.
///
/// Keeps one change channel per layout entry plus one all-change channel.
pub struct RamDataStream {
    layout: StoreLayout,
    storage: RefCell<Vec<u8>>,
    key_channels: Vec<ChangeChannel>,
    all_channel: ChangeChannel,
}

impl RamDataStream {
    /// Create a store with a freshly allocated, zeroed block.
    #[must_use]
    pub fn new(layout: StoreLayout) -> Self {
        let storage = vec![0u8; layout.storage_len()];
        Self::assemble(layout, storage)
    }

    /// Create a store over a caller-provided block.
    ///
    /// The span covered by the layout is zero-filled; bytes past it are kept.
    pub fn with_storage(layout: StoreLayout, mut storage: Vec<u8>) -> Result<Self, LayoutError> {
        let required = layout.storage_len();
        if storage.len() < required {
            return Err(LayoutError::StorageTooSmall {
                provided: storage.len(),
                required,
            });
        }
        storage[..required].fill(0);
        Ok(Self::assemble(layout, storage))
    }

    fn assemble(layout: StoreLayout, storage: Vec<u8>) -> Self {
        let key_channels = (0..layout.count()).map(|_| ChangeChannel::new()).collect();
        debug!(
            "[tw-01] RAM store created: {} entries, {} bytes",
            layout.count(),
            storage.len()
        );
        Self {
            layout,
            storage: RefCell::new(storage),
            key_channels,
            all_channel: ChangeChannel::new(),
        }
    }

    /// The layout this store was built with.
    #[must_use]
    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// Length of the owned block in bytes.
    #[must_use]
    pub fn storage_len(&self) -> usize {
        self.storage.borrow().len()
    }

    /// Copy of the whole block.
    #[must_use]
    pub fn snapshot(&self) -> Vec<u8> {
        self.storage.borrow().clone()
    }

    fn key_channel(&self, key: Key) -> Option<&ChangeChannel> {
        self.key_channels.get(usize::from(key))
    }
}

impl DataStream for RamDataStream {
    fn read(&self, key: Key, out: &mut [u8]) {
        let Some(entry) = self.layout.entry(key) else {
            return;
        };
        if out.len() < entry.size {
            warn!(key, size = entry.size, buffer = out.len(), "[tw-01] Read buffer too small, ignored");
            return;
        }
        out[..entry.size].copy_from_slice(&self.storage.borrow()[entry.range()]);
    }

    fn write(&self, key: Key, data: &[u8]) {
        let Some(entry) = self.layout.entry(key) else {
            return;
        };
        if data.len() < entry.size {
            warn!(key, size = entry.size, payload = data.len(), "[tw-01] Write payload too small, ignored");
            return;
        }
        let new = &data[..entry.size];

        {
            let mut storage = self.storage.borrow_mut();
            let current = &mut storage[entry.range()];
            if *current == *new {
                return;
            }
            current.copy_from_slice(new);
        }

        debug!("[tw-01] Key {} changed ({} bytes)", key, entry.size);
        let args = ChangeArgs::new(key, new);
        if let Some(channel) = self.key_channel(key) {
            channel.publish_with(|callback| callback(&args));
        }
        self.all_channel.publish_with(|callback| callback(&args));
    }

    fn contains(&self, key: Key) -> bool {
        self.layout.contains(key)
    }

    fn size(&self, key: Key) -> usize {
        self.layout.size(key)
    }

    fn subscribe(&self, key: Key, subscription: &ChangeSubscription) {
        if !self.layout.contains(key) {
            return;
        }
        if let Some(channel) = self.key_channel(key) {
            channel.subscribe(subscription);
        }
    }

    fn subscribe_all(&self, subscription: &ChangeSubscription) {
        self.all_channel.subscribe(subscription);
    }

    fn unsubscribe(&self, subscription: &ChangeSubscription) {
        for channel in &self.key_channels {
            channel.unsubscribe(subscription);
        }
        self.all_channel.unsubscribe(subscription);
    }
}

impl fmt::Debug for RamDataStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RamDataStream")
            .field("entries", &self.layout.count())
            .field("storage_len", &self.storage_len())
            .finish_non_exhaustive()
    }
}
