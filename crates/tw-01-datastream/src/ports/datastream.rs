//! # Storage Capability
//!
//! The uniform contract shared by leaf stores, composites and the database
//! facade.
//!
//! ## Contract
//!
//! - `contains(key)`: whether this backend claims the key.
//! - `size(key)`: width of the key's value, 0 if unclaimed.
//! - `read(key, out)`: copy `size(key)` bytes into `out`. Unclaimed keys leave
//!   `out` untouched.
//! - `write(key, data)`: store `size(key)` bytes from `data` *only if* they
//!   differ from the current content, then publish `(key, data)` to the key's
//!   channel and to the all-change channel, in that order.
//! - `subscribe`, `subscribe_all`, `unsubscribe`: manage change interest.
//!   `unsubscribe` removes a subscription from every channel of the backend.

use shared_bus::{EventChannel, Subscription};
use shared_types::{ChangeArgs, Key, Scalar};
use std::rc::Rc;
use tracing::warn;

/// Signature of a change callback.
pub type ChangeCallback = dyn for<'a> Fn(&ChangeArgs<'a>);

/// Handle to a change subscription.
pub type ChangeSubscription = Subscription<ChangeCallback>;

/// Channel delivering change notifications.
pub type ChangeChannel = EventChannel<ChangeCallback>;

/// Create a change subscription from a closure.
///
/// The returned handle must be kept alive for as long as notifications are
/// wanted.
pub fn on_change(callback: impl Fn(&ChangeArgs<'_>) + 'static) -> ChangeSubscription {
    Subscription::new(Box::new(callback))
}

/// Key-addressed storage backend.
///
/// All methods take `&self`: backends are single-threaded and use interior
/// mutability so that change callbacks may read and write the same backend
/// while a publish is in progress.
pub trait DataStream {
    /// Copy the value of `key` into `out[..size(key)]`.
    fn read(&self, key: Key, out: &mut [u8]);

    /// Store `data[..size(key)]` under `key` and publish if it changed.
    fn write(&self, key: Key, data: &[u8]);

    /// Whether this backend claims `key`.
    fn contains(&self, key: Key) -> bool;

    /// Width of `key` in bytes, 0 if unclaimed.
    fn size(&self, key: Key) -> usize;

    /// Notify `subscription` when `key` changes.
    fn subscribe(&self, key: Key, subscription: &ChangeSubscription);

    /// Notify `subscription` when any key changes.
    fn subscribe_all(&self, subscription: &ChangeSubscription);

    /// Remove `subscription` from every channel of this backend.
    fn unsubscribe(&self, subscription: &ChangeSubscription);
}

impl<T: DataStream + ?Sized> DataStream for Rc<T> {
    fn read(&self, key: Key, out: &mut [u8]) {
        (**self).read(key, out);
    }

    fn write(&self, key: Key, data: &[u8]) {
        (**self).write(key, data);
    }

    fn contains(&self, key: Key) -> bool {
        (**self).contains(key)
    }

    fn size(&self, key: Key) -> usize {
        (**self).size(key)
    }

    fn subscribe(&self, key: Key, subscription: &ChangeSubscription) {
        (**self).subscribe(key, subscription);
    }

    fn subscribe_all(&self, subscription: &ChangeSubscription) {
        (**self).subscribe_all(subscription);
    }

    fn unsubscribe(&self, subscription: &ChangeSubscription) {
        (**self).unsubscribe(subscription);
    }
}

/// Typed helpers available on every backend.
pub trait DataStreamExt: DataStream {
    /// Read `key` as `T`.
    ///
    /// `None` if the key is unclaimed or its width is not `T::WIDTH`.
    fn read_scalar<T: Scalar>(&self, key: Key) -> Option<T> {
        if !self.contains(key) || self.size(key) != T::WIDTH {
            return None;
        }
        let mut buf = vec![0u8; T::WIDTH];
        self.read(key, &mut buf);
        T::from_bytes(&buf)
    }

    /// Write `value` to `key`.
    ///
    /// A width mismatch is a caller bug: nothing is stored.
    fn write_scalar<T: Scalar>(&self, key: Key, value: T) {
        if !self.contains(key) {
            return;
        }
        let size = self.size(key);
        if size != T::WIDTH {
            warn!(key, size, width = T::WIDTH, "Typed write width mismatch, ignored");
            return;
        }
        self.write(key, value.to_bytes().as_ref());
    }

    /// Copy of the current value of `key`; empty if unclaimed.
    fn read_vec(&self, key: Key) -> Vec<u8> {
        let mut buf = vec![0u8; self.size(key)];
        self.read(key, &mut buf);
        buf
    }
}

impl<T: DataStream + ?Sized> DataStreamExt for T {}
