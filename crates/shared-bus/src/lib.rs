//! # Shared Bus - Synchronous Event Channels
//!
//! Publish/subscribe plumbing used by every datastream backend.
//!
//! ## Model
//!
//! ```text
//! ┌──────────────┐   subscribe()    ┌──────────────┐
//! │ Subscription │ ───────────────→ │ EventChannel │
//! │ (callback)   │                  │              │
//! │              │ ←─────────────── │  publish()   │
//! └──────────────┘   callback(data) └──────────────┘
//! ```
//!
//! - Delivery is synchronous: `publish` invokes every current subscriber, in
//!   subscription order, and returns once the last callback returns.
//! - A panicking callback unwinds through `publish`; nothing is caught.
//! - Channels hold *weak* registrations. A [`Subscription`] stays registered
//!   for as long as its owner keeps a handle alive, and explicit
//!   [`EventChannel::unsubscribe`] removes it immediately.
//!
//! ## Re-entrancy
//!
//! Callbacks may subscribe, unsubscribe and publish on the very channel that is
//! invoking them. The subscriber list is snapshotted before the first callback
//! runs: a subscriber added during the pass is not visited in that pass, and a
//! subscriber removed during the pass is skipped if it has not run yet.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use publisher::EventChannel;
pub use subscriber::{Subscription, SubscriptionId};

/// Channel carrying a plain value of type `T`.
pub type ValueChannel<T> = EventChannel<dyn Fn(&T)>;

/// Subscription to a [`ValueChannel`].
pub type ValueSubscription<T> = Subscription<dyn Fn(&T)>;
