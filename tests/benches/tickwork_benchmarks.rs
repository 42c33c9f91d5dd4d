//! # Tickwork Benchmarks
//!
//! Hot paths of the core crates:
//!
//! | Crate | Operation | Expectation |
//! |-------|-----------|-------------|
//! | tw-01 Datastream | Leaf write, changed vs. unchanged value | Unchanged skips publish |
//! | tw-01 Datastream | Composite resolution | Linear in member count |
//! | tw-03 Timer | `run()` over active timers | Linear in timer count |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::rc::Rc;
use tw_01_datastream::{on_change, DataStream, DataStreamExt, LayoutBuilder, RamDataStream};
use tw_02_database::Database;
use tw_03_timer::{ManualTimeSource, TimerController};

// ============================================================================
// TW-01: Datastream Benchmarks
// ============================================================================

fn bench_leaf_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("tw-01-leaf-write");

    let store = RamDataStream::new(LayoutBuilder::new().field_of::<u32>().build().unwrap());
    let subscription = on_change(|args| {
        black_box(args.data);
    });
    store.subscribe_all(&subscription);

    group.bench_function("unchanged", |b| {
        b.iter(|| store.write_scalar(0, black_box(0_u32)))
    });

    let mut value = 0_u32;
    group.bench_function("changed", |b| {
        b.iter(|| {
            value = value.wrapping_add(1);
            store.write_scalar(0, black_box(value));
        })
    });

    group.finish();
}

fn bench_composite_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("tw-01-composite-resolution");

    for members in [1_usize, 4, 16, 64] {
        // Member i claims key i only.
        let streams: Vec<Rc<dyn DataStream>> = (0..members)
            .map(|i| {
                let layout = (0..members)
                    .fold(LayoutBuilder::new(), |builder, j| {
                        if i == j {
                            builder.field(4)
                        } else {
                            builder.reserved()
                        }
                    })
                    .build()
                    .unwrap();
                Rc::new(RamDataStream::new(layout)) as Rc<dyn DataStream>
            })
            .collect();
        let db = Database::new(streams);
        let last = (members - 1) as u16;

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("read_last_member", members), &last, |b, key| {
            b.iter(|| black_box(db.read_scalar::<u32>(*key)))
        });
    }

    group.finish();
}

// ============================================================================
// TW-03: Timer Benchmarks
// ============================================================================

fn bench_timer_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("tw-03-timer-run");
    let mut rng = rand::thread_rng();

    for count in [10_usize, 100, 1000] {
        let clock = Rc::new(ManualTimeSource::new(0));
        let timers = TimerController::new(clock.clone());
        for _ in 0..count {
            timers.start_repeating(rng.gen_range(1..=1000), |_, id| {
                black_box(id);
            });
        }

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("repeating", count), &count, |b, _| {
            b.iter(|| {
                clock.advance(1);
                black_box(timers.run())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_leaf_write,
    bench_composite_resolution,
    bench_timer_run
);
criterion_main!(benches);
