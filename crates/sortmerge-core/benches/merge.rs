//! Merge-join and grouping throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sortmerge_core::{group_by_key, merge_join};

fn multiples(step: u64, len: usize) -> Vec<u64> {
    (0..len as u64).map(|i| i * step).collect()
}

fn benchmark_full_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_join");
    for len in [1_000usize, 100_000] {
        let left = multiples(2, len);
        let right = multiples(3, len);
        group.throughput(Throughput::Elements((2 * len) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| {
                let pairs = merge_join(
                    black_box(left.iter()),
                    |x| **x,
                    black_box(right.iter()),
                    |x| **x,
                )
                .count();
                black_box(pairs);
            })
        });
    }
    group.finish();
}

fn benchmark_checked_join(c: &mut Criterion) {
    let left = multiples(2, 100_000);
    let right = multiples(3, 100_000);

    c.bench_function("full_join_checked_100000", |b| {
        b.iter(|| {
            let ok = merge_join(black_box(left.iter()), |x| **x, black_box(right.iter()), |x| **x)
                .checked()
                .filter(Result::is_ok)
                .count();
            black_box(ok);
        })
    });
}

fn benchmark_group_by_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_by_key");
    for run_len in [1usize, 16, 256] {
        let items: Vec<u64> = (0..100_000u64).map(|i| i / run_len as u64).collect();
        group.throughput(Throughput::Elements(items.len() as u64));
        group.bench_with_input(BenchmarkId::new("run_len", run_len), &items, |b, items| {
            b.iter(|| {
                let groups = group_by_key(black_box(items), |x| *x).count();
                black_box(groups);
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_full_join,
    benchmark_checked_join,
    benchmark_group_by_key
);
criterion_main!(benches);
