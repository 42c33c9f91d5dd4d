//! Manually driven time source for simulation and tests.

use crate::ports::time_source::TimeSource;
use shared_types::Ticks;
use std::cell::Cell;

/// Tick counter that only moves when told to.
///
/// Share it with a controller through `Rc` and keep a handle to drive it.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    ticks: Cell<Ticks>,
}

impl ManualTimeSource {
    /// Start at `ticks`.
    #[must_use]
    pub fn new(ticks: Ticks) -> Self {
        Self {
            ticks: Cell::new(ticks),
        }
    }

    /// Jump to `ticks`.
    pub fn set(&self, ticks: Ticks) {
        self.ticks.set(ticks);
    }

    /// Move forward by `delta`, wrapping at `Ticks::MAX`.
    pub fn advance(&self, delta: Ticks) {
        self.ticks.set(self.ticks.get().wrapping_add(delta));
    }
}

impl TimeSource for ManualTimeSource {
    fn ticks(&self) -> Ticks {
        self.ticks.get()
    }
}
