//! Benchmarks comparing PooledList against std's LinkedList and VecDeque.
//!
//! Run with: cargo bench
//!
//! Every container is pre-allocated where the API allows it.

use std::collections::{LinkedList, VecDeque};

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use nexus_pooled_list::PooledList;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

const CAPACITY: usize = 100_000;

// ============================================================================
// Push Benchmarks
// ============================================================================

fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");
    group.throughput(Throughput::Elements(CAPACITY as u64));

    // Pre-allocate ONCE, reuse via clear()
    let mut pooled = PooledList::<u64>::with_capacity(CAPACITY);
    let mut linked = LinkedList::<u64>::new();
    let mut deque = VecDeque::<u64>::with_capacity(CAPACITY);

    group.bench_function("pooled-list", |b| {
        b.iter(|| {
            for i in 0..CAPACITY as u64 {
                black_box(pooled.push_back(i));
            }
            pooled.clear();
        });
    });

    group.bench_function("linked-list", |b| {
        b.iter(|| {
            for i in 0..CAPACITY as u64 {
                linked.push_back(black_box(i));
            }
            linked.clear();
        });
    });

    group.bench_function("vecdeque", |b| {
        b.iter(|| {
            for i in 0..CAPACITY as u64 {
                deque.push_back(black_box(i));
            }
            deque.clear();
        });
    });

    group.finish();
}

// ============================================================================
// Iteration Benchmarks
// ============================================================================

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");
    group.throughput(Throughput::Elements(CAPACITY as u64));

    let pooled: PooledList<u64> = (0..CAPACITY as u64).collect();
    let linked: LinkedList<u64> = (0..CAPACITY as u64).collect();
    let deque: VecDeque<u64> = (0..CAPACITY as u64).collect();

    group.bench_function("pooled-list", |b| {
        b.iter(|| black_box(pooled.iter().sum::<u64>()));
    });

    group.bench_function("pooled-list/cursor", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            let mut cursor = pooled.cursor();
            while let Ok(true) = cursor.move_next(&pooled) {
                if let Some(v) = cursor.current(&pooled) {
                    sum += v;
                }
            }
            black_box(sum)
        });
    });

    group.bench_function("linked-list", |b| {
        b.iter(|| black_box(linked.iter().sum::<u64>()));
    });

    group.bench_function("vecdeque", |b| {
        b.iter(|| black_box(deque.iter().sum::<u64>()));
    });

    group.finish();
}

// ============================================================================
// Random Removal Benchmarks
// ============================================================================

/// Removes every node in shuffled order through its handle, then refills.
/// VecDeque has no stable handles, so it removes by position instead.
fn bench_random_remove(c: &mut Criterion) {
    const NODES: usize = 10_000;

    let mut group = c.benchmark_group("random_remove");
    group.throughput(Throughput::Elements(NODES as u64));

    let mut rng = SmallRng::seed_from_u64(42);
    let mut order: Vec<usize> = (0..NODES).collect();
    order.shuffle(&mut rng);

    let mut pooled = PooledList::<u64>::with_capacity(NODES);

    group.bench_function("pooled-list", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..NODES as u64).map(|i| pooled.push_back(i)).collect();
            for &i in &order {
                black_box(pooled.remove(handles[i]).ok());
            }
        });
    });

    let mut deque = VecDeque::<u64>::with_capacity(NODES);
    // Positions shrink as elements go; map each shuffled pick into range.
    let positions: Vec<usize> = order
        .iter()
        .enumerate()
        .map(|(removed, &i)| i % (NODES - removed))
        .collect();

    group.bench_function("vecdeque", |b| {
        b.iter(|| {
            deque.extend(0..NODES as u64);
            for &at in &positions {
                black_box(deque.remove(at));
            }
        });
    });

    group.finish();
}

// ============================================================================
// Churn Benchmarks
// ============================================================================

fn bench_churn(c: &mut Criterion) {
    const CYCLES: usize = 100_000;

    let mut group = c.benchmark_group("churn");
    group.throughput(Throughput::Elements(CYCLES as u64 * 2)); // push + pop

    let mut pooled = PooledList::<u64>::with_capacity(1024);
    pooled.extend(0..512);
    let mut linked: LinkedList<u64> = (0..512).collect();
    let mut deque: VecDeque<u64> = (0..512).collect();

    group.bench_function("pooled-list", |b| {
        b.iter(|| {
            for i in 0..CYCLES as u64 {
                pooled.push_back(i);
                black_box(pooled.pop_front());
            }
        });
    });

    group.bench_function("linked-list", |b| {
        b.iter(|| {
            for i in 0..CYCLES as u64 {
                linked.push_back(i);
                black_box(linked.pop_front());
            }
        });
    });

    group.bench_function("vecdeque", |b| {
        b.iter(|| {
            for i in 0..CYCLES as u64 {
                deque.push_back(i);
                black_box(deque.pop_front());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_push_back,
    bench_iter,
    bench_random_remove,
    bench_churn
);
criterion_main!(benches);
