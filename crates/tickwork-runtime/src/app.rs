//! # Runtime Wiring
//!
//! Builds the database, starts the application timers and drives the
//! scheduler from a cooperative loop.
//!
//! ```text
//!   counter timer ──→ Counter += 1 ─┐
//!                                   ├──→ Database ──→ change log (+ metrics)
//!   blink timer ──→ Fsm TOGGLE ──→ LedOn
//! ```

use crate::blink::{blinker, Blinker, TOGGLE};
use crate::config::RuntimeConfig;
use shared_types::Ticks;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::thread;
use std::time::Duration;
use tickwork_telemetry::{DATASTREAM_CHANGES, SCHEDULER_RUNS, SCHEDULER_SLEEP_TICKS, TIMER_FIRES};
use tracing::{debug, info};
use tw_01_datastream::{on_change, store_layout, ChangeSubscription, LayoutError};
use tw_02_database::{DataStream, DataStreamExt, Database};
use tw_03_timer::{RunOutcome, TimeSource, TimerController, TimerId};
use tw_04_fsm::Fsm;

store_layout! {
    /// Keys of the application database.
    pub enum Keys {
        Counter: u16,
        LedOn: bool,
    }
}

/// The host application: database, timers and the blink machine.
pub struct Runtime {
    config: RuntimeConfig,
    database: Rc<Database>,
    timers: TimerController,
    blinker: Rc<RefCell<Fsm<Blinker>>>,
    counter_timer: TimerId,
    blink_timer: TimerId,
    started_at: Ticks,
    _change_log: ChangeSubscription,
}

impl Runtime {
    /// Wire the application and start its timers.
    pub fn new(config: RuntimeConfig, time_source: Rc<dyn TimeSource>) -> Result<Self, LayoutError> {
        let database = Rc::new(Database::from_layout(Keys::layout()?));

        let change_log = on_change(|args| {
            DATASTREAM_CHANGES.inc();
            debug!(key = args.key, data = ?args.data, "[runtime] Value changed");
        });
        database.subscribe_all(&change_log);

        let timers = TimerController::new(time_source);
        let started_at = timers.current_ticks();

        let counter_timer = {
            let database = Rc::clone(&database);
            timers.start_repeating(config.counter_interval, move |_, _| {
                let key = Keys::Counter.key();
                let next = database.read_scalar::<u16>(key).unwrap_or(0).wrapping_add(1);
                database.write_scalar(key, next);
            })
        };

        let blinker = Rc::new(RefCell::new(blinker(Rc::clone(&database))));
        let blink_timer = {
            let blinker = Rc::clone(&blinker);
            timers.start_repeating(config.blink_interval, move |_, _| {
                blinker.borrow_mut().signal(TOGGLE, None);
            })
        };

        info!(
            counter_interval = config.counter_interval,
            blink_interval = config.blink_interval,
            "[runtime] Application wired"
        );

        Ok(Self {
            config,
            database,
            timers,
            blinker,
            counter_timer,
            blink_timer,
            started_at,
            _change_log: change_log,
        })
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    #[must_use]
    pub fn database(&self) -> &Rc<Database> {
        &self.database
    }

    #[must_use]
    pub fn timers(&self) -> &TimerController {
        &self.timers
    }

    #[must_use]
    pub fn counter_timer(&self) -> TimerId {
        self.counter_timer
    }

    #[must_use]
    pub fn blink_timer(&self) -> TimerId {
        self.blink_timer
    }

    /// Current value of the counter.
    #[must_use]
    pub fn counter(&self) -> u16 {
        self.database
            .read_scalar(Keys::Counter.key())
            .unwrap_or_default()
    }

    /// Current LED level.
    #[must_use]
    pub fn led_on(&self) -> bool {
        self.database
            .read_scalar(Keys::LedOn.key())
            .unwrap_or_default()
    }

    /// LED toggles handled by the blink machine.
    #[must_use]
    pub fn toggles(&self) -> u64 {
        self.blinker.borrow().context().toggles()
    }

    /// Ticks since the runtime was created, as of the last pass.
    #[must_use]
    pub fn elapsed(&self) -> Ticks {
        self.timers.current_ticks().wrapping_sub(self.started_at)
    }

    /// One scheduler pass, recorded in the metrics.
    pub fn step(&self) -> RunOutcome {
        let outcome = self.timers.run_outcome();
        SCHEDULER_RUNS.inc();
        TIMER_FIRES.inc_by(outcome.fired as u64);
        SCHEDULER_SLEEP_TICKS.set(i64::from(outcome.sleep));
        outcome
    }

    /// How long to wait after a pass that reported `sleep` ticks.
    #[must_use]
    pub fn sleep_duration(&self, sleep: Ticks) -> Duration {
        Duration::from_millis(u64::from(sleep).min(self.config.max_sleep_ms))
    }

    /// Whether the configured run length has elapsed.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.config
            .run_for_ticks
            .is_some_and(|limit| self.elapsed() >= limit)
    }

    /// Run the main loop on the current thread.
    ///
    /// Returns once `run_for_ticks` have elapsed; never returns otherwise.
    pub fn run(&self) -> u64 {
        self.run_with(thread::sleep)
    }

    /// Run the main loop, waiting with `sleep` between passes.
    ///
    /// Returns the number of passes made.
    pub fn run_with(&self, mut sleep: impl FnMut(Duration)) -> u64 {
        let mut passes = 0;
        loop {
            let outcome = self.step();
            passes += 1;
            if self.finished() {
                info!(
                    passes,
                    elapsed = self.elapsed(),
                    counter = self.counter(),
                    "[runtime] Run length reached"
                );
                return passes;
            }
            sleep(self.sleep_duration(outcome.sleep));
        }
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("config", &self.config)
            .field("timers", &self.timers)
            .field("counter", &self.counter())
            .field("led_on", &self.led_on())
            .finish_non_exhaustive()
    }
}
