//! # Ticks
//!
//! The unit of the monotonic counter that drives the timer scheduler.
//!
//! The counter wraps at its numeric range. Ordering between two tick values is
//! defined by the signed difference modulo 2^32, which stays correct across a
//! wrap as long as no interval exceeds half the counter range.

/// Fixed-width tick counter value.
pub type Ticks = u32;

/// Largest representable tick count. Returned by the scheduler when no timer
/// is active.
pub const TICKS_MAX: Ticks = Ticks::MAX;

/// Largest interval whose expiration is still ordered correctly across a wrap.
pub const MAX_SAFE_INTERVAL: Ticks = Ticks::MAX / 2;

/// Signed number of ticks from `now` until `deadline`.
///
/// Zero or negative means the deadline has been reached.
#[inline]
#[must_use]
pub fn ticks_until(deadline: Ticks, now: Ticks) -> i32 {
    deadline.wrapping_sub(now) as i32
}
