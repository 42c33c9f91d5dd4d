//! # Database Service
//!
//! Thin facade that delegates every storage operation to its backend.

use shared_types::Key;
use std::fmt;
use std::rc::Rc;
use tracing::debug;
use tw_01_datastream::{
    ChangeSubscription, CompositeDataStream, DataStream, LayoutError, RamDataStream, StoreLayout,
};

/// How a [`Database`] holds its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseShape {
    /// Ordered list of heterogeneous backends.
    Streams,
    /// One layout and its storage block.
    Single,
}

enum Backend {
    Streams(CompositeDataStream),
    Single(RamDataStream),
}

/// Application-facing key/value store.
pub struct Database {
    backend: Backend,
}

impl Database {
    /// Database over `streams`, resolved in order. The first backend
    /// claiming a key owns it.
    #[must_use]
    pub fn new(streams: Vec<Rc<dyn DataStream>>) -> Self {
        debug!("[tw-02] Database over {} streams", streams.len());
        Self {
            backend: Backend::Streams(CompositeDataStream::new(streams)),
        }
    }

    /// Database owning a single zeroed store for `layout`.
    #[must_use]
    pub fn from_layout(layout: StoreLayout) -> Self {
        debug!("[tw-02] Database over single store ({} keys)", layout.count());
        Self {
            backend: Backend::Single(RamDataStream::new(layout)),
        }
    }

    /// Database owning a single store over a caller-provided block.
    pub fn with_storage(layout: StoreLayout, storage: Vec<u8>) -> Result<Self, LayoutError> {
        Ok(Self {
            backend: Backend::Single(RamDataStream::with_storage(layout, storage)?),
        })
    }

    /// Database owning a single store whose layout is a JSON entry table.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(Self::from_layout(StoreLayout::from_json(json)?))
    }

    /// Which shape this database was built with.
    #[must_use]
    pub fn shape(&self) -> DatabaseShape {
        match self.backend {
            Backend::Streams(_) => DatabaseShape::Streams,
            Backend::Single(_) => DatabaseShape::Single,
        }
    }

    /// Member backends; empty for the single-store shape.
    #[must_use]
    pub fn streams(&self) -> &[Rc<dyn DataStream>] {
        match &self.backend {
            Backend::Streams(composite) => composite.streams(),
            Backend::Single(_) => &[],
        }
    }

    /// The owned store of the single-store shape.
    #[must_use]
    pub fn store(&self) -> Option<&RamDataStream> {
        match &self.backend {
            Backend::Single(store) => Some(store),
            Backend::Streams(_) => None,
        }
    }

    fn backend(&self) -> &dyn DataStream {
        match &self.backend {
            Backend::Streams(composite) => composite,
            Backend::Single(store) => store,
        }
    }
}

impl DataStream for Database {
    fn read(&self, key: Key, out: &mut [u8]) {
        self.backend().read(key, out);
    }

    fn write(&self, key: Key, data: &[u8]) {
        self.backend().write(key, data);
    }

    fn contains(&self, key: Key) -> bool {
        self.backend().contains(key)
    }

    fn size(&self, key: Key) -> usize {
        self.backend().size(key)
    }

    fn subscribe(&self, key: Key, subscription: &ChangeSubscription) {
        self.backend().subscribe(key, subscription);
    }

    fn subscribe_all(&self, subscription: &ChangeSubscription) {
        self.backend().subscribe_all(subscription);
    }

    fn unsubscribe(&self, subscription: &ChangeSubscription) {
        self.backend().unsubscribe(subscription);
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Database");
        out.field("shape", &self.shape());
        match &self.backend {
            Backend::Streams(composite) => out.field("backend", composite),
            Backend::Single(store) => out.field("backend", store),
        };
        out.finish()
    }
}
