//! Benchmarks for sparse matrix multiplication and random access

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use nuyale::{matrix_multiply, reference_multiply, YaleStorage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_matrix(n: usize, density: f64, seed: u64) -> YaleStorage<f64, u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    // full capacity up front, so products over these operands always fit
    let mut m = YaleStorage::create(&[n, n], n * n + 1).unwrap();

    for r in 0..n {
        for c in 0..n {
            if rng.gen::<f64>() < density {
                m.set(r, c, rng.gen_range(-1.0..1.0)).unwrap();
            }
        }
    }
    m
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("SpGEMM");

    for &size in &[50, 100, 200] {
        let a = random_matrix(size, 0.05, 1);
        let b = random_matrix(size, 0.05, 2);

        group.bench_with_input(BenchmarkId::new("three_phase", size), &size, |bench, _| {
            bench.iter(|| {
                let c = matrix_multiply(&a, &b).unwrap();
                black_box(c)
            })
        });

        group.bench_with_input(BenchmarkId::new("reference", size), &size, |bench, _| {
            bench.iter(|| {
                let c = reference_multiply(&a, &b).unwrap();
                black_box(c)
            })
        });
    }

    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("Random Access");

    let size = 500;
    let m = random_matrix(size, 0.02, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let probes: Vec<(usize, usize)> = (0..1000)
        .map(|_| (rng.gen_range(0..size), rng.gen_range(0..size)))
        .collect();

    group.bench_function("ref_at", |bench| {
        bench.iter(|| {
            let mut acc = 0.0;
            for &(r, c) in &probes {
                acc += m.get(r, c);
            }
            black_box(acc)
        })
    });

    group.bench_function("diagonal", |bench| {
        bench.iter(|| {
            let mut acc = 0.0;
            for i in 0..size {
                acc += m.get(i, i);
            }
            black_box(acc)
        })
    });

    group.finish();
}

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("Insertion");

    group.bench_function("set_1000_random", |bench| {
        bench.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(5);
            let mut m = YaleStorage::<f64, u32>::zeros(100, 100);
            for _ in 0..1000 {
                let r = rng.gen_range(0..100);
                let c = rng.gen_range(0..100);
                m.set(r, c, 1.0).unwrap();
            }
            black_box(m)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_multiply, bench_random_access, bench_insertion);
criterion_main!(benches);
