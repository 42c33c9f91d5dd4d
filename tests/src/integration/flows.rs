//! # Integration Test Flows
//!
//! Tests that tw-02-database, tw-03-timer and tw-04-fsm work together
//! through change notifications.
//!
//! ## Flows Tested:
//!
//! 1. **Timer → Database → FSM**: a sampling timer writes readings, a per-key
//!    subscriber feeds them to a monitor machine that raises an alarm key
//! 2. **Database → Timer**: a change schedules deferred work on the controller
//! 3. **Composite routing**: a database over several leaf stores
//! 4. **Hello-world host**: the runtime loop driven by a manual clock

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use tickwork_runtime::{Runtime, RuntimeConfig};
    use tw_01_datastream::{on_change, store_layout, ChangeRecorder, LayoutBuilder, RamDataStream};
    use tw_02_database::{DataStream, DataStreamExt, Database};
    use tw_03_timer::{ManualTimeSource, Ticks, TimerController, TICKS_MAX};
    use tw_04_fsm::{payload, Fsm, Signal, ENTER, EXIT, USER_START};

    store_layout! {
        enum Keys {
            Temperature: u16,
            Alarm: bool,
            Samples: u32,
        }
    }

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn database() -> Rc<Database> {
        Rc::new(Database::from_layout(Keys::layout().unwrap()))
    }

    fn controller() -> (Rc<TimerController>, Rc<ManualTimeSource>) {
        let clock = Rc::new(ManualTimeSource::new(0));
        let timers = Rc::new(TimerController::new(clock.clone()));
        (timers, clock)
    }

    /// Repeating timer writing the next reading on every expiry.
    fn start_sampler(timers: &TimerController, db: &Rc<Database>, interval: Ticks, readings: Vec<u16>) {
        let db = Rc::clone(db);
        let next = Cell::new(0);
        timers.start_repeating(interval, move |_, _| {
            let Some(reading) = readings.get(next.get()).copied() else {
                return;
            };
            next.set(next.get() + 1);
            db.write_scalar(Keys::Temperature.key(), reading);
            let samples = db.read_scalar::<u32>(Keys::Samples.key()).unwrap_or(0);
            db.write_scalar(Keys::Samples.key(), samples + 1);
        });
    }

    const READING: Signal = USER_START;

    struct Monitor {
        database: Rc<Database>,
        threshold: u16,
        alarms: u32,
    }

    fn normal(fsm: &mut Fsm<Monitor>, signal: Signal, data: Option<&dyn Any>) {
        if signal == READING {
            let threshold = fsm.context().threshold;
            if payload::<u16>(data).is_some_and(|value| *value > threshold) {
                fsm.transition(alarmed);
            }
        }
    }

    fn alarmed(fsm: &mut Fsm<Monitor>, signal: Signal, data: Option<&dyn Any>) {
        match signal {
            ENTER => {
                fsm.context_mut().alarms += 1;
                fsm.context().database.write_scalar(Keys::Alarm.key(), true);
            }
            EXIT => fsm.context().database.write_scalar(Keys::Alarm.key(), false),
            READING => {
                let threshold = fsm.context().threshold;
                if payload::<u16>(data).is_some_and(|value| *value <= threshold) {
                    fsm.transition(normal);
                }
            }
            _ => {}
        }
    }

    // =============================================================================
    // INTEGRATION TESTS: TIMER → DATABASE → FSM
    // =============================================================================

    #[test]
    fn test_sampling_timer_drives_alarm_machine() {
        let db = database();
        let (timers, clock) = controller();
        start_sampler(&timers, &db, 100, vec![20, 35, 35, 10]);

        let monitor = Rc::new(RefCell::new(Fsm::new(
            normal,
            Monitor {
                database: Rc::clone(&db),
                threshold: 30,
                alarms: 0,
            },
        )));
        let feed = {
            let monitor = Rc::clone(&monitor);
            on_change(move |args| {
                if let Some(value) = args.decode::<u16>() {
                    monitor.borrow_mut().signal(READING, Some(&value as &dyn Any));
                }
            })
        };
        db.subscribe(Keys::Temperature.key(), &feed);

        let alarm_log = ChangeRecorder::new();
        db.subscribe(Keys::Alarm.key(), alarm_log.subscription());

        for tick in [100, 200, 300, 400] {
            clock.set(tick);
            assert_eq!(timers.run(), 100);
        }

        assert!(monitor.borrow().is_in(normal));
        assert_eq!(monitor.borrow().context().alarms, 1);
        assert_eq!(
            alarm_log.changes(),
            vec![(Keys::Alarm.key(), vec![1]), (Keys::Alarm.key(), vec![0])]
        );
        assert_eq!(db.read_scalar::<u32>(Keys::Samples.key()), Some(4));
    }

    #[test]
    fn test_repeated_reading_not_redelivered() {
        let db = database();
        let (timers, clock) = controller();
        start_sampler(&timers, &db, 10, vec![7, 7, 7, 8]);

        let delivered = Rc::new(RefCell::new(Vec::<u16>::new()));
        let feed = {
            let delivered = Rc::clone(&delivered);
            on_change(move |args| delivered.borrow_mut().extend(args.decode::<u16>()))
        };
        db.subscribe(Keys::Temperature.key(), &feed);

        for tick in (10..=40).step_by(10) {
            clock.set(tick);
            timers.run();
        }

        assert_eq!(*delivered.borrow(), vec![7, 8]);
    }

    #[test]
    fn test_dropped_feed_stops_delivery() {
        let db = database();
        let (timers, clock) = controller();
        start_sampler(&timers, &db, 10, vec![1, 2, 3]);

        let delivered = Rc::new(Cell::new(0));
        let feed = {
            let delivered = Rc::clone(&delivered);
            on_change(move |_| delivered.set(delivered.get() + 1))
        };
        db.subscribe_all(&feed);

        clock.set(10);
        timers.run();
        let before = delivered.get();
        drop(feed);

        clock.set(20);
        timers.run();

        assert_eq!(before, 2);
        assert_eq!(delivered.get(), before);
        assert_eq!(db.read_scalar::<u16>(Keys::Temperature.key()), Some(2));
    }

    // =============================================================================
    // INTEGRATION TESTS: DATABASE → TIMER
    // =============================================================================

    #[test]
    fn test_alarm_change_schedules_auto_clear() {
        let db = database();
        let (timers, clock) = controller();

        let auto_clear = {
            let db = Rc::clone(&db);
            let timers = Rc::clone(&timers);
            on_change(move |args| {
                if args.decode::<bool>() == Some(true) {
                    let db = Rc::clone(&db);
                    timers.start_one_shot(50, move |_, _| {
                        db.write_scalar(Keys::Alarm.key(), false);
                    });
                }
            })
        };
        db.subscribe(Keys::Alarm.key(), &auto_clear);

        db.write_scalar(Keys::Alarm.key(), true);
        assert_eq!(timers.active_count(), 1);
        assert_eq!(timers.run(), 50);

        clock.set(50);
        assert_eq!(timers.run(), TICKS_MAX);
        assert_eq!(db.read_scalar::<bool>(Keys::Alarm.key()), Some(false));
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_work_scheduled_during_run_waits_for_next_pass() {
        let db = database();
        let (timers, clock) = controller();
        start_sampler(&timers, &db, 100, vec![1, 2]);

        let followups = Rc::new(RefCell::new(Vec::<(Option<u32>, Ticks)>::new()));
        let on_sample = {
            let timers = Rc::clone(&timers);
            let followups = Rc::clone(&followups);
            on_change(move |args| {
                let followups = Rc::clone(&followups);
                let sample = args.decode::<u32>();
                timers.start_one_shot(30, move |controller, _| {
                    followups.borrow_mut().push((sample, controller.current_ticks()));
                });
            })
        };
        db.subscribe(Keys::Samples.key(), &on_sample);

        clock.set(100);
        assert_eq!(timers.run(), 30);
        assert!(followups.borrow().is_empty());

        clock.set(130);
        assert_eq!(timers.run(), 70);
        assert_eq!(*followups.borrow(), vec![(Some(1), 130)]);
    }

    // =============================================================================
    // INTEGRATION TESTS: COMPOSITE ROUTING
    // =============================================================================

    #[test]
    fn test_database_over_disjoint_stores() {
        // Key 0 lives in `config`, key 1 in `state`.
        let config = Rc::new(RamDataStream::new(
            LayoutBuilder::new().field(1).reserved().build().unwrap(),
        ));
        let state = Rc::new(RamDataStream::new(
            LayoutBuilder::new().reserved().field(2).build().unwrap(),
        ));
        let db = Database::new(vec![
            config.clone() as Rc<dyn DataStream>,
            state.clone() as Rc<dyn DataStream>,
        ]);
        let recorder = ChangeRecorder::new();
        db.subscribe_all(recorder.subscription());

        db.write(0, &[5]);
        db.write(1, &[6, 7]);

        assert_eq!(config.snapshot(), vec![5]);
        assert_eq!(state.snapshot(), vec![6, 7]);
        assert_eq!(recorder.keys(), vec![0, 1]);

        db.unsubscribe(recorder.subscription());
        db.write(0, &[9]);
        db.write(1, &[9, 9]);
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_shadowed_key_resolves_to_first_store() {
        let first = Rc::new(RamDataStream::new(LayoutBuilder::new().field(2).build().unwrap()));
        let second = Rc::new(RamDataStream::new(LayoutBuilder::new().field(2).build().unwrap()));
        let db = Database::new(vec![
            first.clone() as Rc<dyn DataStream>,
            second.clone() as Rc<dyn DataStream>,
        ]);
        let shadowed = ChangeRecorder::new();
        second.subscribe(0, shadowed.subscription());

        db.write_scalar(0, 0xBEEF_u16);
        db.subscribe(0, shadowed.subscription());
        db.write_scalar(0, 0xCAFE_u16);

        assert_eq!(first.read_scalar::<u16>(0), Some(0xCAFE));
        assert_eq!(second.read_scalar::<u16>(0), Some(0));
        assert_eq!(shadowed.changes(), vec![(0, 0xCAFE_u16.to_ne_bytes().to_vec())]);
    }

    // =============================================================================
    // INTEGRATION TESTS: HOST RUNTIME
    // =============================================================================

    #[test]
    fn test_runtime_loop_with_manual_clock() {
        let clock = Rc::new(ManualTimeSource::new(5_000));
        let config = RuntimeConfig {
            counter_interval: 250,
            blink_interval: 100,
            max_sleep_ms: 60,
            run_for_ticks: Some(1_000),
        };
        let runtime = Runtime::new(config, clock.clone()).unwrap();

        let passes = runtime.run_with(|sleep: Duration| clock.advance(sleep.as_millis() as Ticks));

        assert_eq!(runtime.counter(), 4);
        assert_eq!(runtime.toggles(), 10);
        assert!(!runtime.led_on());
        assert!(passes > 10);
    }
}
