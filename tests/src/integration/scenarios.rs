//! # Storage and Scheduler Scenarios
//!
//! End-to-end checks of the guarantees the core crates make, driven through
//! their public APIs only:
//!
//! - Composite resolution over randomly partitioned key sets
//! - Change suppression and leaf independence
//! - Minimal sleep, repeating catch-up and one-shot lifecycle
//! - Unsubscribe completeness

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use tw_01_datastream::{
        on_change, ChangeRecorder, DataStream, DataStreamExt, Key, LayoutBuilder, RamDataStream,
    };
    use tw_02_database::Database;
    use tw_03_timer::{ManualTimeSource, TimerController, TICKS_MAX};

    const KEYS: Key = 32;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Split `0..KEYS` over `count` backends; some keys stay unowned.
    ///
    /// Returns the backends and, per key, the index of its owner.
    fn partitioned(rng: &mut StdRng, count: usize) -> (Vec<Rc<RamDataStream>>, Vec<Option<usize>>) {
        let owners: Vec<Option<usize>> = (0..KEYS)
            .map(|_| {
                let owner = rng.gen_range(0..=count);
                (owner < count).then_some(owner)
            })
            .collect();
        let sizes: Vec<usize> = (0..KEYS).map(|_| rng.gen_range(1..=8)).collect();

        let backends = (0..count)
            .map(|backend| {
                let layout = owners
                    .iter()
                    .zip(&sizes)
                    .fold(LayoutBuilder::new(), |builder, (owner, size)| {
                        if *owner == Some(backend) {
                            builder.field(*size)
                        } else {
                            builder.reserved()
                        }
                    })
                    .build()
                    .unwrap();
                Rc::new(RamDataStream::new(layout))
            })
            .collect();
        (backends, owners)
    }

    fn controller() -> (TimerController, Rc<ManualTimeSource>) {
        let clock = Rc::new(ManualTimeSource::new(0));
        (TimerController::new(clock.clone()), clock)
    }

    // =============================================================================
    // STORAGE
    // =============================================================================

    #[test]
    fn test_composite_resolution_random_partitions() {
        let mut rng = StdRng::seed_from_u64(0x7157);

        for _ in 0..20 {
            let (backends, owners) = partitioned(&mut rng, 3);
            let db = Database::new(
                backends
                    .iter()
                    .map(|backend| Rc::clone(backend) as Rc<dyn DataStream>)
                    .collect(),
            );

            for key in 0..KEYS {
                let owner = owners[usize::from(key)];
                assert_eq!(db.contains(key), owner.is_some(), "key {key}");

                let before: Vec<Vec<u8>> = backends.iter().map(|b| b.snapshot()).collect();
                let fill: u8 = rng.gen_range(1..=u8::MAX);
                db.write(key, &vec![fill; db.size(key)]);

                for (index, backend) in backends.iter().enumerate() {
                    if Some(index) == owner {
                        assert_eq!(backend.read_vec(key), vec![fill; backend.size(key)]);
                    } else {
                        assert_eq!(backend.snapshot(), before[index], "key {key} leaked");
                    }
                }
            }
        }
    }

    #[test]
    fn test_change_suppression() {
        let db = Database::from_layout(LayoutBuilder::new().field(2).build().unwrap());
        let recorder = ChangeRecorder::new();
        db.subscribe_all(recorder.subscription());

        db.write(0, &[4, 2]);
        db.write(0, &[4, 2]);
        assert_eq!(recorder.len(), 1);

        db.write(0, &[2, 4]);
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_leaf_independence_random_writes() {
        let mut rng = StdRng::seed_from_u64(0x1eaf);
        let layout = (0..KEYS)
            .fold(LayoutBuilder::new(), |builder, _| builder.field(rng.gen_range(0..=6)))
            .build()
            .unwrap();
        let store = RamDataStream::new(layout);
        let mut expected: Vec<Vec<u8>> = (0..KEYS).map(|key| store.read_vec(key)).collect();

        for _ in 0..500 {
            let key = rng.gen_range(0..KEYS);
            let value: Vec<u8> = (0..store.size(key)).map(|_| rng.gen()).collect();
            store.write(key, &value);
            expected[usize::from(key)] = value;

            for other in 0..KEYS {
                assert_eq!(store.read_vec(other), expected[usize::from(other)]);
            }
        }
    }

    #[test]
    fn test_unsubscribe_completeness() {
        let store = RamDataStream::new(LayoutBuilder::new().field(1).field(1).build().unwrap());
        let calls = Rc::new(Cell::new(0));
        let subscription = {
            let calls = Rc::clone(&calls);
            on_change(move |_| calls.set(calls.get() + 1))
        };
        store.subscribe(0, &subscription);
        store.subscribe_all(&subscription);

        store.write(0, &[1]);
        assert_eq!(calls.get(), 2);

        store.unsubscribe(&subscription);
        store.write(0, &[2]);
        store.write(1, &[2]);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_zeroed_store_scenario() {
        let store = RamDataStream::new(LayoutBuilder::new().field_of::<u8>().field_of::<u32>().build().unwrap());
        let published = Rc::new(RefCell::new(Vec::new()));
        let subscription = {
            let published = Rc::clone(&published);
            on_change(move |args| published.borrow_mut().push(args.data.to_vec()))
        };
        store.subscribe_all(&subscription);

        store.write(0, &[0x00]);
        assert!(published.borrow().is_empty());

        store.write(0, &[0xAA]);
        assert_eq!(*published.borrow(), vec![vec![0xAA]]);
        assert_eq!(store.read_scalar::<u32>(1), Some(0));
    }

    // =============================================================================
    // SCHEDULER
    // =============================================================================

    #[test]
    fn test_minimal_sleep() {
        let (timers, clock) = controller();
        timers.start_one_shot(100, |_, _| {});
        timers.start_one_shot(250, |_, _| {});

        assert_eq!(timers.run(), 100);

        clock.set(100);
        assert_eq!(timers.run(), 150);
    }

    #[test]
    fn test_repeating_catch_up() {
        let (timers, clock) = controller();
        let fired = Rc::new(Cell::new(0));
        let id = {
            let fired = Rc::clone(&fired);
            timers.start_repeating(100, move |_, _| fired.set(fired.get() + 1))
        };

        clock.set(250);
        timers.run();

        assert_eq!(fired.get(), 1);
        assert_eq!(timers.next_expiration(id), Some(200));
    }

    #[test]
    fn test_one_shot_lifecycle() {
        let (timers, clock) = controller();
        let id = timers.start_one_shot(10, |_, _| {});

        clock.set(10);
        assert_eq!(timers.run(), TICKS_MAX);

        assert!(!timers.is_active(id));
        assert!(!timers.stop(id));
    }
}
