//! # Timer Entities
//!
//! Pure scheduling state; no callbacks and no time source.

use shared_types::{ticks_until, Ticks};
use std::fmt;

/// Handle to a started timer.
///
/// Carries the generation of the slot it was issued for, so a handle to a
/// timer that has since stopped or fired never aliases a newer timer reusing
/// the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId {
    index: u32,
    generation: u32,
}

impl TimerId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub(crate) fn index(self) -> usize {
        self.index as usize
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}.{}", self.index, self.generation)
    }
}

/// What happens after a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Deactivates before its callback runs.
    OneShot,
    /// Reschedules one interval later and stays active.
    Repeating,
}

/// Expiration bookkeeping of one active timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSchedule {
    pub kind: TimerKind,
    pub interval: Ticks,
    pub next_expiration: Ticks,
}

impl TimerSchedule {
    /// Schedule the first expiration `interval` ticks after `now`.
    #[must_use]
    pub fn start(kind: TimerKind, interval: Ticks, now: Ticks) -> Self {
        Self {
            kind,
            interval,
            next_expiration: now.wrapping_add(interval),
        }
    }

    /// Signed ticks from `now` until expiry; zero or negative means due.
    #[must_use]
    pub fn ticks_until(&self, now: Ticks) -> i32 {
        ticks_until(self.next_expiration, now)
    }

    #[must_use]
    pub fn is_due(&self, now: Ticks) -> bool {
        self.ticks_until(now) <= 0
    }

    /// Push the expiration out by exactly one interval.
    pub fn advance(&mut self) {
        self.next_expiration = self.next_expiration.wrapping_add(self.interval);
    }
}
