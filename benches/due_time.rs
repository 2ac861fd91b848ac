//! Benchmarks for due-time arithmetic on task entries.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pacer::{FnTask, Schedule, TaskEntry};
use std::sync::Arc;
use std::time::Duration;

fn bench_arm_and_due_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("due_time");

    for secs in [1u64, 60, 3600].iter() {
        let make_entry = || {
            TaskEntry::scheduled(
                Arc::new(FnTask::new("bench", || async { Ok(()) })),
                Schedule::every(Duration::from_secs(*secs)),
            )
            .unwrap()
        };

        group.bench_with_input(BenchmarkId::new("arm", secs), secs, |b, _| {
            let mut entry = make_entry();
            b.iter(|| entry.arm().unwrap());
        });

        group.bench_with_input(BenchmarkId::new("is_due", secs), secs, |b, _| {
            let mut entry = make_entry();
            entry.arm().unwrap();
            b.iter(|| entry.is_due());
        });

        group.bench_with_input(BenchmarkId::new("advance", secs), secs, |b, _| {
            let mut entry = make_entry();
            entry.arm().unwrap();
            b.iter(|| entry.advance().unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_arm_and_due_check);

criterion_main!(benches);
