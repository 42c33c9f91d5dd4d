//! # Timer Scheduler (tw-03)
//!
//! Drives one-shot and repeating timers from a host main loop.
//!
//! ## Main Loop Contract
//!
//! ```text
//! loop {
//!     let sleep = controller.run();   // fire due timers, reschedule repeaters
//!     host_sleep(min(sleep, cap));    // never longer than `sleep` ticks
//! }
//! ```
//!
//! `run()` samples the time source once per call and returns the smallest
//! positive number of ticks until an active timer expires, or
//! [`TICKS_MAX`](shared_types::TICKS_MAX) when nothing is pending.
//!
//! ## Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Wraparound order | Expirations compare by signed difference, so a wrapping tick counter stays ordered while intervals are below half its range |
//! | Single catch-up | An overdue repeater fires once per `run()` and advances by one interval |
//! | One-shot retirement | A one-shot timer is inactive before its callback runs |
//! | Stable pass | Timers stopped by a callback are skipped; timers started by a callback wait for the next pass |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Timer identifiers, kinds and per-timer state
//! - `ports/` - The `TimeSource` capability
//! - `adapters/` - Monotonic and manually driven time sources
//! - `service/` - `TimerController`

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export main types
pub use adapters::{ManualTimeSource, MonotonicTimeSource};
pub use domain::entities::{TimerId, TimerKind};
pub use ports::time_source::TimeSource;
pub use service::{RunOutcome, TimerCallback, TimerController};
pub use shared_types::{ticks_until, Ticks, MAX_SAFE_INTERVAL, TICKS_MAX};
