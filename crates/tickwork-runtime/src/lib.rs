//! # Tickwork Runtime
//!
//! Hello-world host for the Tickwork core. The library exposes the wiring
//! for tests; `main.rs` is the entry point.
//!
//! ## Main Loop
//!
//! ```text
//! loop {
//!     sleep = timers.run()          // fire due timers, get ticks to next expiry
//!     host_sleep(min(sleep, max))   // TW_MAX_SLEEP_MS bounds overdue repeaters
//! }
//! ```
//!
//! ## Modules
//!
//! - `config` - `RuntimeConfig` from `TW_*` environment variables
//! - `blink` - Two-state LED machine built on `tw-04-fsm`
//! - `app` - Database layout, timer wiring and the loop itself

#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod app;
pub mod blink;
pub mod config;

pub use app::{Keys, Runtime};
pub use config::{ConfigError, RuntimeConfig};
