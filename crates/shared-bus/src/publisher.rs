//! # Event Channel
//!
//! Defines the publishing side of the bus.

use crate::subscriber::{Subscription, SubscriptionCell, SubscriptionId};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::trace;

/// A registration held by a channel.
struct Registration<F: ?Sized> {
    id: SubscriptionId,
    handle: Weak<SubscriptionCell<F>>,
}

impl<F: ?Sized> Registration<F> {
    fn is_live(&self) -> bool {
        self.handle.strong_count() > 0
    }
}

/// Ordered set of subscriptions notified together.
///
/// Order of delivery is order of subscription. Subscribing a handle that is
/// already registered is a no-op, as is unsubscribing one that is not.
pub struct EventChannel<F: ?Sized> {
    subscribers: RefCell<Vec<Registration<F>>>,
}

impl<F: ?Sized> EventChannel<F> {
    /// Create an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Register a subscription at the end of the delivery order.
    pub fn subscribe(&self, subscription: &Subscription<F>) {
        let id = subscription.id();
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(Registration::is_live);
        if subscribers.iter().any(|r| r.id == id) {
            return;
        }
        subscribers.push(Registration {
            id,
            handle: subscription.downgrade(),
        });
        trace!(subscription = id, "Subscription registered");
    }

    /// Remove a subscription.
    ///
    /// Returns `true` if it was registered.
    pub fn unsubscribe(&self, subscription: &Subscription<F>) -> bool {
        let id = subscription.id();
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|r| r.id != id);
        let removed = subscribers.len() != before;
        if removed {
            trace!(subscription = id, "Subscription removed");
        }
        removed
    }

    /// Whether `subscription` is currently registered.
    #[must_use]
    pub fn is_subscribed(&self, subscription: &Subscription<F>) -> bool {
        self.contains_id(subscription.id())
    }

    /// Number of live registrations.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|r| r.is_live())
            .count()
    }

    /// Deliver to every current subscriber through `invoke`.
    ///
    /// Returns the number of callbacks invoked.
    pub fn publish_with(&self, mut invoke: impl FnMut(&F)) -> usize {
        let snapshot: Vec<Rc<SubscriptionCell<F>>> = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers.retain(Registration::is_live);
            subscribers.iter().filter_map(|r| r.handle.upgrade()).collect()
        };

        let mut delivered = 0;
        for cell in snapshot {
            // Removed by an earlier callback in this pass.
            if !self.contains_id(cell.id) {
                continue;
            }
            trace!(subscription = cell.id, "Delivering event");
            invoke(&*cell.callback);
            delivered += 1;
        }
        delivered
    }

    fn contains_id(&self, id: SubscriptionId) -> bool {
        self.subscribers
            .borrow()
            .iter()
            .any(|r| r.id == id && r.is_live())
    }
}

impl<T: ?Sized> EventChannel<dyn Fn(&T)> {
    /// Publish `data` to every current subscriber.
    ///
    /// Returns the number of callbacks invoked.
    pub fn publish(&self, data: &T) -> usize {
        self.publish_with(|callback| callback(data))
    }
}

impl<F: ?Sized> Default for EventChannel<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for EventChannel<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
