//! # Time Source Port
//!
//! The scheduler's only view of time: a tick counter that never decreases
//! except when it wraps at `Ticks::MAX`.

use shared_types::Ticks;
use std::rc::Rc;

/// Current tick count provider.
pub trait TimeSource {
    /// Current tick count.
    fn ticks(&self) -> Ticks;
}

impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn ticks(&self) -> Ticks {
        (**self).ticks()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn ticks(&self) -> Ticks {
        (**self).ticks()
    }
}
