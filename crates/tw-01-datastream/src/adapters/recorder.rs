//! Recording Subscriber
//!
//! A subscription that appends every change it sees to a shared log. Used by
//! tests and by hosts that want to batch-process changes after a write burst.

use crate::ports::datastream::{on_change, ChangeSubscription};
use shared_types::Key;
use std::cell::RefCell;
use std::rc::Rc;

/// One recorded change: the key and a copy of the written bytes.
pub type RecordedChange = (Key, Vec<u8>);

/// Subscription that records `(key, bytes)` pairs.
///
/// Clones share the same log and the same subscription.
#[derive(Debug, Clone)]
pub struct ChangeRecorder {
    log: Rc<RefCell<Vec<RecordedChange>>>,
    subscription: ChangeSubscription,
}

impl ChangeRecorder {
    /// Create a recorder with an empty log.
    #[must_use]
    pub fn new() -> Self {
        let log: Rc<RefCell<Vec<RecordedChange>>> = Rc::default();
        let sink = Rc::clone(&log);
        let subscription = on_change(move |args| {
            sink.borrow_mut().push((args.key, args.data.to_vec()));
        });
        Self { log, subscription }
    }

    /// The subscription to register with a backend.
    #[must_use]
    pub fn subscription(&self) -> &ChangeSubscription {
        &self.subscription
    }

    /// Copy of every recorded change, oldest first.
    #[must_use]
    pub fn changes(&self) -> Vec<RecordedChange> {
        self.log.borrow().clone()
    }

    /// Keys of every recorded change, oldest first.
    #[must_use]
    pub fn keys(&self) -> Vec<Key> {
        self.log.borrow().iter().map(|(key, _)| *key).collect()
    }

    /// Number of recorded changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    /// Remove and return every recorded change.
    pub fn take(&self) -> Vec<RecordedChange> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

impl Default for ChangeRecorder {
    fn default() -> Self {
        Self::new()
    }
}
