//! # Tickwork Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── flows.rs       # Database + timers + FSM working together
//! │   └── scenarios.rs   # Storage and scheduler properties across crates
//! └── benches/
//!     └── tickwork_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p tw-tests
//!
//! # By category
//! cargo test -p tw-tests integration::flows::
//! cargo test -p tw-tests integration::scenarios::
//!
//! # Benchmarks
//! cargo bench -p tw-tests
//! ```

#![allow(dead_code)]

pub mod integration;
