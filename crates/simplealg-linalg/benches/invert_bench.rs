//! Benchmarks for sparse inversion.
//!
//! Includes:
//! - Diagonal, tridiagonal and single-run (permutation-like) shapes
//! - Sequential versus parallel elimination updates
//! - Sparse multiplication

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use simplealg_linalg::{EliminationConfig, SquareMatrix};
use simplealg_rings::{F64Factory, FiniteField, FiniteFieldFactory};

type GF101 = FiniteField<101>;

fn diagonal(rng: &mut ChaCha8Rng, n: usize) -> SquareMatrix<f64> {
    let mut m = SquareMatrix::new(n, &F64Factory::new());
    for i in 0..n {
        m.set(i, i, rng.gen_range(1.0..2.0));
    }
    m
}

fn tridiagonal(rng: &mut ChaCha8Rng, n: usize) -> SquareMatrix<f64> {
    let mut m = diagonal(rng, n);
    for i in 0..n.saturating_sub(1) {
        m.set(i, i + 1, rng.gen_range(-0.4..0.4));
        m.set(i + 1, i, rng.gen_range(-0.4..0.4));
    }
    m
}

fn single_run(rng: &mut ChaCha8Rng, n: usize) -> SquareMatrix<f64> {
    let offset = rng.gen_range(0..n);
    let mut m = SquareMatrix::new(n, &F64Factory::new());
    for i in 0..n {
        m.set(i, (i + offset) % n, rng.gen_range(0.5..1.5));
    }
    m
}

/// Benchmark inversion of sparse shapes. Time should track the non-zero
/// count, not the dimension squared.
fn bench_invert_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("invert_left");
    let mut rng = ChaCha8Rng::seed_from_u64(1111);

    for size in [50, 200, 800] {
        let diag = diagonal(&mut rng, size);
        group.bench_with_input(BenchmarkId::new("diagonal", size), &size, |b, _| {
            b.iter(|| black_box(diag.invert_left()))
        });

        let run = single_run(&mut rng, size);
        group.bench_with_input(BenchmarkId::new("single_run", size), &size, |b, _| {
            b.iter(|| black_box(run.invert_left()))
        });
    }

    // The inverse of a tridiagonal matrix is dense, so keep these small.
    for size in [25, 50, 100] {
        let tri = tridiagonal(&mut rng, size);
        group.bench_with_input(BenchmarkId::new("tridiagonal", size), &size, |b, _| {
            b.iter(|| black_box(tri.invert_left()))
        });
    }

    group.finish();
}

/// Benchmark the parallel update path against the sequential one.
fn bench_parallel_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_updates");
    let fac = FiniteFieldFactory::<101>;
    let mut rng = ChaCha8Rng::seed_from_u64(2222);

    let size = 120;
    let mut m = SquareMatrix::identity(size, &fac);
    for _ in 0..size * 4 {
        let (i, j) = (rng.gen_range(0..size), rng.gen_range(0..size));
        m.set(i, j, GF101::new(rng.gen_range(1..101)));
    }

    let sequential = EliminationConfig::sequential();
    let parallel = EliminationConfig {
        parallel_threshold: 8,
        ..EliminationConfig::default()
    };

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(m.invert_left_with(&sequential)))
    });
    group.bench_function("parallel", |b| {
        b.iter(|| black_box(m.invert_left_with(&parallel)))
    });

    group.finish();
}

/// Benchmark sparse multiplication.
fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    let mut rng = ChaCha8Rng::seed_from_u64(3333);

    for size in [100, 400] {
        let a = tridiagonal(&mut rng, size);
        let b = tridiagonal(&mut rng, size);

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |bench, _| {
            bench.iter(|| black_box(a.multiply(&b)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |bench, _| {
            bench.iter(|| black_box(a.multiply_parallel(&b)))
        });
    }

    group.finish();
}

criterion_group!(
    invert_benches,
    bench_invert_shapes,
    bench_parallel_updates,
    bench_multiply
);
criterion_main!(invert_benches);
