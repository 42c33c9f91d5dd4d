//! Signal numbering.

/// Identifier of an event delivered to a state.
pub type Signal = u8;

/// Sent to a state when it becomes current.
pub const ENTER: Signal = 0;

/// Sent to a state when it stops being current.
pub const EXIT: Signal = 1;

/// First value free for application signals.
pub const USER_START: Signal = 2;

/// The `n`-th application signal.
#[must_use]
pub const fn user_signal(n: u8) -> Signal {
    USER_START.saturating_add(n)
}
