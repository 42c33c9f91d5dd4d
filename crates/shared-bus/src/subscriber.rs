//! # Subscriptions
//!
//! A subscription pairs a callback with whatever context the closure captures.
//! It does not own the channel it is registered with.

use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique subscription identifier.
pub type SubscriptionId = u64;

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) struct SubscriptionCell<F: ?Sized> {
    pub(crate) id: SubscriptionId,
    pub(crate) callback: Box<F>,
}

/// Ownership-scoped subscription handle.
///
/// Cloning is cheap and yields a handle to the same subscription. Channels
/// only keep weak references: once every clone is dropped the subscription is
/// never invoked again, even if it was never explicitly unsubscribed.
///
/// `F` is the callback signature, e.g. `dyn Fn(&T)`.
#[must_use = "a subscription stops receiving events once every handle is dropped"]
pub struct Subscription<F: ?Sized> {
    inner: Rc<SubscriptionCell<F>>,
}

impl<F: ?Sized> Subscription<F> {
    /// Create a subscription from a boxed callback.
    pub fn new(callback: Box<F>) -> Self {
        let id = NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            inner: Rc::new(SubscriptionCell { id, callback }),
        }
    }

    /// Identifier shared by every clone of this handle.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.inner.id
    }

    /// Borrow the callback.
    #[must_use]
    pub fn callback(&self) -> &F {
        &self.inner.callback
    }

    pub(crate) fn downgrade(&self) -> Weak<SubscriptionCell<F>> {
        Rc::downgrade(&self.inner)
    }
}

impl<T: ?Sized> Subscription<dyn Fn(&T)> {
    /// Create a subscription for a value channel from a closure.
    pub fn from_fn(callback: impl Fn(&T) + 'static) -> Self {
        Self::new(Box::new(callback))
    }
}

impl<F: ?Sized> Clone for Subscription<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<F: ?Sized> PartialEq for Subscription<F> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl<F: ?Sized> Eq for Subscription<F> {}

impl<F: ?Sized> fmt::Debug for Subscription<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id())
            .field("handles", &Rc::strong_count(&self.inner))
            .finish()
    }
}
