//! # Core Entities
//!
//! Keys and change notifications.

use crate::scalar::Scalar;

/// Identifier of a value slot.
///
/// Validity is decided by the backend that owns the slot: a leaf store claims
/// `key < count` with a non-zero size, a composite claims whatever one of its
/// members claims.
pub type Key = u16;

/// Payload delivered to change subscribers.
///
/// `data` borrows the bytes that were written. It is only valid for the
/// duration of the synchronous publish call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeArgs<'a> {
    /// Key whose value changed.
    pub key: Key,
    /// The newly written bytes.
    pub data: &'a [u8],
}

impl<'a> ChangeArgs<'a> {
    /// Create change arguments for `key`.
    #[must_use]
    pub fn new(key: Key, data: &'a [u8]) -> Self {
        Self { key, data }
    }

    /// Decode the new value as `T`.
    ///
    /// Returns `None` when the payload width does not match `T`.
    #[must_use]
    pub fn decode<T: Scalar>(&self) -> Option<T> {
        T::from_bytes(self.data)
    }
}
