//! # State Machine (tw-04)
//!
//! A flat, signal-driven state machine. Each state is a plain function that
//! receives the machine, a [`Signal`] and optional data; transitions send
//! [`EXIT`] to the old state and [`ENTER`] to the new one.
//!
//! ```ignore
//! use tw_04_fsm::{Fsm, Signal, ENTER, USER_START};
//!
//! const TOGGLE: Signal = USER_START;
//!
//! fn off(fsm: &mut Fsm<bool>, signal: Signal, _: Option<&dyn std::any::Any>) {
//!     match signal {
//!         ENTER => *fsm.context_mut() = false,
//!         TOGGLE => fsm.transition(on),
//!         _ => {}
//!     }
//! }
//! # fn on(_: &mut Fsm<bool>, _: Signal, _: Option<&dyn std::any::Any>) {}
//!
//! let mut fsm = Fsm::new(off, true);
//! fsm.signal(TOGGLE, None);
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod machine;
pub mod signal;

pub use machine::{payload, Fsm, State};
pub use signal::{user_signal, Signal, ENTER, EXIT, USER_START};
