//! # Timer Service
//!
//! `TimerController` owns every active timer and the time source. Host code
//! calls [`TimerController::run`] from its main loop.

mod controller;

pub use controller::{RunOutcome, TimerCallback, TimerController};
