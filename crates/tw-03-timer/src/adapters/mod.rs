//! # Adapters Module
//!
//! Time sources implementing the `TimeSource` port.
//!
//! ## Modules
//!
//! - `monotonic`: Milliseconds since creation, from the OS monotonic clock
//! - `manual`: Ticks set or advanced by the caller (simulation and tests)

pub mod manual;
pub mod monotonic;

pub use manual::ManualTimeSource;
pub use monotonic::MonotonicTimeSource;
