//! Two-state LED blinker.
//!
//! Each [`TOGGLE`] flips between [`led_off`] and [`led_on`]; entering a
//! state writes the LED level to the database.

use crate::app::Keys;
use std::any::Any;
use std::rc::Rc;
use tracing::trace;
use tw_02_database::{DataStreamExt, Database};
use tw_04_fsm::{Fsm, Signal, ENTER, USER_START};

/// Flip the LED.
pub const TOGGLE: Signal = USER_START;

/// Context of the blink machine.
#[derive(Debug)]
pub struct Blinker {
    database: Rc<Database>,
    toggles: u64,
}

impl Blinker {
    #[must_use]
    pub fn new(database: Rc<Database>) -> Self {
        Self {
            database,
            toggles: 0,
        }
    }

    /// Toggles handled so far.
    #[must_use]
    pub fn toggles(&self) -> u64 {
        self.toggles
    }

    fn set_led(&self, on: bool) {
        trace!(on, "[runtime] LED level");
        self.database.write_scalar(Keys::LedOn.key(), on);
    }
}

/// Start a blinker in [`led_off`].
pub fn blinker(database: Rc<Database>) -> Fsm<Blinker> {
    Fsm::new(led_off, Blinker::new(database))
}

pub fn led_off(fsm: &mut Fsm<Blinker>, signal: Signal, _data: Option<&dyn Any>) {
    match signal {
        ENTER => fsm.context().set_led(false),
        TOGGLE => {
            fsm.context_mut().toggles += 1;
            fsm.transition(led_on);
        }
        _ => {}
    }
}

pub fn led_on(fsm: &mut Fsm<Blinker>, signal: Signal, _data: Option<&dyn Any>) {
    match signal {
        ENTER => fsm.context().set_led(true),
        TOGGLE => {
            fsm.context_mut().toggles += 1;
            fsm.transition(led_off);
        }
        _ => {}
    }
}
