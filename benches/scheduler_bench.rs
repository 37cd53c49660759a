//! Throughput of the dispatch engine under each policy, and of the
//! underlying wait queue in isolation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sched_core::{Policy, PriorityQueue, Scheduler};

const POLICIES: &[Policy] = &[
    Policy::Fcfs,
    Policy::Sjf,
    Policy::Psjf,
    Policy::Pri,
    Policy::Ppri,
    Policy::Rr,
];

fn bench_new_job_arrivals(c: &mut Criterion) {
    let mut group = c.benchmark_group("new_job_arrivals");

    for &policy in POLICIES {
        group.bench_function(BenchmarkId::new("policy", format!("{policy:?}")), |b| {
            b.iter(|| {
                let mut scheduler = Scheduler::start_up(4, policy).unwrap();
                for i in 0..1000u64 {
                    let placed = scheduler.new_job(
                        i,
                        i as i64,
                        (i % 97 + 1) as i64,
                        (i % 10) as i32,
                    );
                    black_box(placed);
                }
            });
        });
    }

    group.finish();
}

fn bench_full_run_to_completion(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run_to_completion");

    for &policy in POLICIES {
        group.bench_function(BenchmarkId::new("policy", format!("{policy:?}")), |b| {
            b.iter(|| {
                let mut scheduler = Scheduler::start_up(4, policy).unwrap();
                let mut running: Vec<(usize, u64, i64)> = Vec::new();
                let mut time = 0i64;

                for i in 0..500u64 {
                    time += 1;
                    let length = (i % 23 + 1) as i64;
                    if let Some(core) = scheduler.new_job(i, time, length, (i % 5) as i32) {
                        running.push((core, i, time + length));
                    }

                    running.retain(|&(core, job_id, finish_at)| {
                        if finish_at <= time {
                            if let Ok(Some(next)) = scheduler.job_finished(core, job_id, time) {
                                black_box(next);
                            }
                            false
                        } else {
                            true
                        }
                    });
                }

                black_box(scheduler.average_waiting_time());
            });
        });
    }

    group.finish();
}

fn bench_priority_queue_offer(c: &mut Criterion) {
    c.bench_function("priority_queue_offer_1000_ascending", |b| {
        b.iter(|| {
            let mut q = PriorityQueue::new(|a: &i64, b: &i64| a.cmp(b));
            for i in 0..1000i64 {
                black_box(q.offer(i % 331));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_new_job_arrivals,
    bench_full_run_to_completion,
    bench_priority_queue_offer
);
criterion_main!(benches);
