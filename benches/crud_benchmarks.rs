use avl_ost::{AvlPriorityQueue, AvlTreeMap, AvlTreeSet, count_inversions};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Simple LCG for a deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_orders() -> [(&'static str, Vec<i64>); 3] {
    [("ordered", ordered_keys(N)), ("reverse", reverse_ordered_keys(N)), ("random", random_keys(N))]
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("map_insert_{order}"));

        group.bench_function(BenchmarkId::new("AvlTreeMap", N), |b| {
            b.iter(|| keys.iter().map(|&k| (k, k)).collect::<AvlTreeMap<_, _>>());
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| keys.iter().map(|&k| (k, k)).collect::<BTreeMap<_, _>>());
        });

        group.finish();
    }
}

fn bench_map_get(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("map_get_{order}"));

        let avl_map: AvlTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        group.bench_function(BenchmarkId::new("AvlTreeMap", N), |b| {
            b.iter(|| keys.iter().filter_map(|k| avl_map.get(k)).sum::<i64>());
        });

        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| keys.iter().filter_map(|k| bt_map.get(k)).sum::<i64>());
        });

        group.finish();
    }
}

fn bench_map_remove(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("map_remove_{order}"));

        let avl_map: AvlTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        group.bench_function(BenchmarkId::new("AvlTreeMap", N), |b| {
            b.iter_batched(
                || avl_map.clone(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            );
        });

        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter_batched(
                || bt_map.clone(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.finish();
    }
}

// ─── Set Benchmarks ─────────────────────────────────────────────────────────

fn bench_set_insert(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("set_insert_{order}"));

        group.bench_function(BenchmarkId::new("AvlTreeSet", N), |b| {
            b.iter(|| keys.iter().copied().collect::<AvlTreeSet<_>>());
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| keys.iter().copied().collect::<BTreeSet<_>>());
        });

        group.finish();
    }
}

fn bench_set_contains(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("set_contains_{order}"));

        let avl_set: AvlTreeSet<i64> = keys.iter().copied().collect();
        group.bench_function(BenchmarkId::new("AvlTreeSet", N), |b| {
            b.iter(|| keys.iter().filter(|k| avl_set.contains(k)).count());
        });

        let bt_set: BTreeSet<i64> = keys.iter().copied().collect();
        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| keys.iter().filter(|k| bt_set.contains(k)).count());
        });

        group.finish();
    }
}

// ─── Order-Statistic Benchmarks ─────────────────────────────────────────────

fn bench_set_count_greater(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("set_count_greater_random");

    let avl_set: AvlTreeSet<i64> = keys.iter().copied().collect();
    group.bench_function(BenchmarkId::new("AvlTreeSet", N), |b| {
        b.iter(|| keys.iter().map(|k| avl_set.count_greater_than(k)).sum::<usize>());
    });

    // BTreeSet has no subtree sizes, so the count walks the range.
    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();
    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| keys.iter().take(N / 100).map(|k| bt_set.range(k + 1..).count()).sum::<usize>());
    });

    group.finish();
}

fn bench_set_lower_bound(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("set_lower_bound_random");

    let avl_set: AvlTreeSet<i64> = keys.iter().copied().collect();
    group.bench_function(BenchmarkId::new("AvlTreeSet", N), |b| {
        b.iter(|| keys.iter().filter_map(|k| avl_set.lower_bound(&(k + 1))).count());
    });

    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();
    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| keys.iter().filter_map(|k| bt_set.range(k + 1..).next()).count());
    });

    group.finish();
}

fn bench_count_inversions(c: &mut Criterion) {
    let keys = random_keys(N);
    c.bench_function("count_inversions_random", |b| b.iter(|| count_inversions(keys.iter().copied())));
}

// ─── Priority Queue Benchmarks ──────────────────────────────────────────────

fn bench_queue_enqueue_dequeue(c: &mut Criterion) {
    let priorities: Vec<i64> = random_keys(N).into_iter().map(|k| k % 64).collect();
    let mut group = c.benchmark_group("queue_enqueue_dequeue_random");

    group.bench_function(BenchmarkId::new("AvlPriorityQueue", N), |b| {
        b.iter(|| {
            let mut queue: AvlPriorityQueue<i64, usize> = priorities.iter().copied().zip(0..).collect();
            let mut total = 0;
            while let Ok(item) = queue.dequeue() {
                total += item;
            }
            total
        });
    });

    // Pairing with the negated sequence number keeps the heap FIFO within a priority.
    group.bench_function(BenchmarkId::new("BinaryHeap", N), |b| {
        b.iter(|| {
            let mut heap: BinaryHeap<(i64, isize)> = priorities.iter().copied().zip((0..).map(|i: isize| -i)).collect();
            let mut total = 0;
            while let Some((_, item)) = heap.pop() {
                total += -item;
            }
            total
        });
    });

    group.finish();
}

criterion_group!(map_benches, bench_map_insert, bench_map_get, bench_map_remove);

criterion_group!(set_benches, bench_set_insert, bench_set_contains);

criterion_group!(order_statistic_benches, bench_set_count_greater, bench_set_lower_bound, bench_count_inversions);

criterion_group!(queue_benches, bench_queue_enqueue_dequeue);

criterion_main!(map_benches, set_benches, order_statistic_benches, queue_benches);
