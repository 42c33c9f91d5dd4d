//! Timer controller: registration, expiration and rescheduling.

use crate::domain::entities::{TimerId, TimerKind, TimerSchedule};
use crate::ports::time_source::TimeSource;
use shared_types::{Ticks, MAX_SAFE_INTERVAL, TICKS_MAX};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Signature of a timer callback.
///
/// Receives the controller that fired it and its own id, so it may stop
/// itself or start further timers without holding a reference to the
/// controller.
pub type TimerCallback = dyn Fn(&TimerController, TimerId);

/// Result of one scheduler pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Ticks the host may sleep before the next pass.
    pub sleep: Ticks,
    /// Callbacks invoked during the pass.
    pub fired: usize,
}

struct ActiveTimer {
    schedule: TimerSchedule,
    callback: Rc<TimerCallback>,
}

#[derive(Default)]
struct Slot {
    generation: u32,
    timer: Option<ActiveTimer>,
}

/// Work decided for one timer while the state is borrowed.
enum Step {
    Pending(i32),
    Fire(Rc<TimerCallback>, TimerKind),
}

#[derive(Default)]
struct SchedulerState {
    current_ticks: Ticks,
    slots: Vec<Slot>,
    free: Vec<usize>,
    /// Active timers in start order.
    active: Vec<TimerId>,
}

impl SchedulerState {
    fn timer(&self, id: TimerId) -> Option<&ActiveTimer> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.timer.as_ref())
    }

    fn timer_mut(&mut self, id: TimerId) -> Option<&mut ActiveTimer> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.timer.as_mut())
    }

    fn insert(&mut self, timer: ActiveTimer) -> TimerId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                self.slots.len() - 1
            }
        };
        let slot = &mut self.slots[index];
        slot.timer = Some(timer);
        let id = TimerId::new(index as u32, slot.generation);
        self.active.push(id);
        id
    }

    fn remove(&mut self, id: TimerId) -> bool {
        let Some(slot) = self
            .slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation() && slot.timer.is_some())
        else {
            return false;
        };
        slot.timer = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        self.active.retain(|active| *active != id);
        true
    }

    /// Decide what to do with `id` at `now`, updating its schedule.
    fn step(&mut self, id: TimerId, now: Ticks) -> Option<Step> {
        let timer = self.timer_mut(id)?;
        let until = timer.schedule.ticks_until(now);
        if until > 0 {
            return Some(Step::Pending(until));
        }
        let kind = timer.schedule.kind;
        let callback = Rc::clone(&timer.callback);
        match kind {
            TimerKind::Repeating => timer.schedule.advance(),
            TimerKind::OneShot => {
                self.remove(id);
            }
        }
        Some(Step::Fire(callback, kind))
    }
}

/// Owns the active timers and the time source that drives them.
///
/// All methods take `&self`; callbacks invoked by [`run`](Self::run) may
/// start and stop timers on the same controller.
pub struct TimerController {
    time_source: Rc<dyn TimeSource>,
    state: RefCell<SchedulerState>,
}

impl TimerController {
    /// Create a controller and take the first tick sample.
    pub fn new(time_source: Rc<dyn TimeSource>) -> Self {
        let current_ticks = time_source.ticks();
        debug!("[tw-03] Timer controller created at tick {}", current_ticks);
        Self {
            time_source,
            state: RefCell::new(SchedulerState {
                current_ticks,
                ..SchedulerState::default()
            }),
        }
    }

    /// Fire `callback` once, `interval` ticks after the last sample.
    pub fn start_one_shot(
        &self,
        interval: Ticks,
        callback: impl Fn(&TimerController, TimerId) + 'static,
    ) -> TimerId {
        self.start(TimerKind::OneShot, interval, Rc::new(callback))
    }

    /// Fire `callback` every `interval` ticks, starting one interval after
    /// the last sample.
    pub fn start_repeating(
        &self,
        interval: Ticks,
        callback: impl Fn(&TimerController, TimerId) + 'static,
    ) -> TimerId {
        self.start(TimerKind::Repeating, interval, Rc::new(callback))
    }

    /// Start a timer of `kind` with a shared callback.
    pub fn start(&self, kind: TimerKind, interval: Ticks, callback: Rc<TimerCallback>) -> TimerId {
        if interval > MAX_SAFE_INTERVAL {
            warn!(
                interval,
                max = MAX_SAFE_INTERVAL,
                "[tw-03] Interval exceeds half the tick range, expiry order is undefined"
            );
        }
        let mut state = self.state.borrow_mut();
        let schedule = TimerSchedule::start(kind, interval, state.current_ticks);
        let id = state.insert(ActiveTimer { schedule, callback });
        debug!(
            "[tw-03] Started {:?} {} interval={} next={}",
            kind, id, interval, schedule.next_expiration
        );
        id
    }

    /// Deactivate `id`. Stopping a timer that already fired or stopped does
    /// nothing.
    ///
    /// Returns `true` if the timer was active.
    pub fn stop(&self, id: TimerId) -> bool {
        let removed = self.state.borrow_mut().remove(id);
        if removed {
            debug!("[tw-03] Stopped {}", id);
        }
        removed
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn is_active(&self, id: TimerId) -> bool {
        self.state.borrow().timer(id).is_some()
    }

    /// Number of registered timers.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.state.borrow().active.len()
    }

    /// Tick count observed by the last sample.
    #[must_use]
    pub fn current_ticks(&self) -> Ticks {
        self.state.borrow().current_ticks
    }

    /// Interval of an active timer.
    #[must_use]
    pub fn interval(&self, id: TimerId) -> Option<Ticks> {
        self.state.borrow().timer(id).map(|timer| timer.schedule.interval)
    }

    /// Next expiration tick of an active timer.
    #[must_use]
    pub fn next_expiration(&self, id: TimerId) -> Option<Ticks> {
        self.state
            .borrow()
            .timer(id)
            .map(|timer| timer.schedule.next_expiration)
    }

    /// Kind of an active timer.
    #[must_use]
    pub fn kind(&self, id: TimerId) -> Option<TimerKind> {
        self.state.borrow().timer(id).map(|timer| timer.schedule.kind)
    }

    /// Fire every due timer and return how long the host may sleep.
    ///
    /// Equivalent to `run_outcome().sleep`.
    pub fn run(&self) -> Ticks {
        self.run_outcome().sleep
    }

    /// Fire every due timer once.
    ///
    /// Samples the time source once. Repeating timers advance by a single
    /// interval however overdue they are; one-shot timers are deactivated
    /// before their callback runs. The returned sleep is the smallest
    /// positive remaining tick count among timers still active afterwards,
    /// or [`TICKS_MAX`] if there is none.
    pub fn run_outcome(&self) -> RunOutcome {
        let now = self.time_source.ticks();
        let snapshot = {
            let mut state = self.state.borrow_mut();
            state.current_ticks = now;
            state.active.clone()
        };

        let mut sleep = TICKS_MAX;
        let mut fired = 0;
        let mut factor = |until: i32| {
            if until > 0 {
                sleep = sleep.min(until.unsigned_abs());
            }
        };

        for id in &snapshot {
            // Borrow released before the callback runs.
            let step = self.state.borrow_mut().step(*id, now);
            match step {
                // Stopped by an earlier callback in this pass.
                None => continue,
                Some(Step::Pending(until)) => factor(until),
                Some(Step::Fire(callback, kind)) => {
                    trace!("[tw-03] Firing {:?} {} at tick {}", kind, id, now);
                    fired += 1;
                    callback(self, *id);
                    if kind == TimerKind::Repeating {
                        if let Some(timer) = self.state.borrow().timer(*id) {
                            factor(timer.schedule.ticks_until(now));
                        }
                    }
                }
            }
        }

        // Timers started by callbacks during this pass.
        {
            let visited: HashSet<TimerId> = snapshot.into_iter().collect();
            let state = self.state.borrow();
            for id in state.active.iter().filter(|id| !visited.contains(*id)) {
                if let Some(timer) = state.timer(*id) {
                    factor(timer.schedule.ticks_until(now));
                }
            }
        }

        trace!("[tw-03] Pass at tick {}: fired={} sleep={}", now, fired, sleep);
        RunOutcome { sleep, fired }
    }
}

impl fmt::Debug for TimerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("TimerController")
            .field("current_ticks", &state.current_ticks)
            .field("active", &state.active.len())
            .finish_non_exhaustive()
    }
}
