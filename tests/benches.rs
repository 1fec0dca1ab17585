#[macro_use]
extern crate criterion;
use criterion::{BenchmarkId, Criterion};
use jobguard::circuitbreaker::CircuitBreaker;
use jobguard::BatchBuilder;
use std::time::Duration;

mod pool {
    use super::*;

    pub fn bench_batch(c: &mut Criterion) {
        let mut group = c.benchmark_group("batch 1000 squares");
        for workers in [1usize, 4, 8].iter() {
            group.bench_with_input(BenchmarkId::from_parameter(workers), workers, |b, &w| {
                b.iter(|| {
                    BatchBuilder::new("bench")
                        .with_worker_count(w)
                        .with_queue_capacity(64)
                        .fold(1..=1000i64, |x| Ok(x * x), 0, |acc, v| acc + v)
                        .unwrap()
                })
            });
        }
        group.finish();
    }
}

mod breaker {
    use super::*;

    pub fn bench_closed_call(c: &mut Criterion) {
        let breaker = CircuitBreaker::new(3, Duration::from_secs(1)).unwrap();
        c.bench_function("closed breaker call", |b| {
            b.iter(|| breaker.call(|| -> Result<u32, ()> { Ok(1) }))
        });
    }

    pub fn bench_rejected_call(c: &mut Criterion) {
        let breaker = CircuitBreaker::new(1, Duration::from_secs(3600)).unwrap();
        let _ = breaker.call(|| -> Result<(), ()> { Err(()) });
        c.bench_function("open breaker call", |b| {
            b.iter(|| breaker.call(|| -> Result<(), ()> { Ok(()) }))
        });
    }
}

criterion_group!(
    benches,
    pool::bench_batch,
    breaker::bench_closed_call,
    breaker::bench_rejected_call
);
criterion_main!(benches);
