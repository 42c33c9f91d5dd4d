//! The state machine and its dispatch rules.

use crate::signal::{Signal, ENTER, EXIT};
use std::any::Any;
use std::fmt;
use tracing::trace;

/// A state: handles one signal with optional data.
///
/// Handlers get the whole machine, so they can reach the context and call
/// [`Fsm::transition`] directly.
pub type State<C> = fn(&mut Fsm<C>, Signal, Option<&dyn Any>);

/// Downcast signal data to `T`.
#[must_use]
pub fn payload<T: Any>(data: Option<&dyn Any>) -> Option<&T> {
    data.and_then(|data| data.downcast_ref::<T>())
}

/// Flat state machine owning its context `C`.
pub struct Fsm<C> {
    state: State<C>,
    context: C,
}

impl<C> Fsm<C> {
    /// Start in `initial`, which receives [`ENTER`].
    pub fn new(initial: State<C>, context: C) -> Self {
        let mut fsm = Self {
            state: initial,
            context,
        };
        fsm.signal(ENTER, None);
        fsm
    }

    /// Deliver `signal` to the current state.
    pub fn signal(&mut self, signal: Signal, data: Option<&dyn Any>) {
        trace!(signal, "[tw-04] Dispatching signal");
        let state = self.state;
        state(self, signal, data);
    }

    /// Leave the current state and enter `to`.
    ///
    /// The old state sees [`EXIT`] before the switch, the new one [`ENTER`]
    /// after it. Transitioning to the current state re-enters it.
    pub fn transition(&mut self, to: State<C>) {
        self.signal(EXIT, None);
        self.state = to;
        self.signal(ENTER, None);
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> State<C> {
        self.state
    }

    /// Whether `state` is the current state.
    #[must_use]
    pub fn is_in(&self, state: State<C>) -> bool {
        self.state as usize == state as usize
    }

    #[must_use]
    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Consume the machine, returning its context. No [`EXIT`] is sent.
    pub fn into_context(self) -> C {
        self.context
    }
}

impl<C: fmt::Debug> fmt::Debug for Fsm<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm")
            .field("state", &(self.state as *const ()))
            .field("context", &self.context)
            .finish()
    }
}
