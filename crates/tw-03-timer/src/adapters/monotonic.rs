//! Monotonic clock time source.

use crate::ports::time_source::TimeSource;
use shared_types::Ticks;
use std::time::Instant;

/// Milliseconds elapsed since construction, truncated to `Ticks`.
///
/// Wraps after about 49.7 days, which the scheduler tolerates.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTimeSource {
    origin: Instant,
}

impl MonotonicTimeSource {
    /// Start counting from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTimeSource {
    fn ticks(&self) -> Ticks {
        // Truncation is the wraparound.
        self.origin.elapsed().as_millis() as Ticks
    }
}
