use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tritrotor::{fma, fma_par, fma_scalar, fma_sparse, PackedTritKey, Trit};

fn fixture(seed: u64, n: usize, w: usize) -> (Vec<i64>, PackedTritKey, Vec<usize>) {
    // Deterministic fixtures for stable benches
    let mut rng = StdRng::seed_from_u64(seed);
    let a: Vec<i64> = (0..n).map(|_| rng.gen()).collect();

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);
    let mut support = indices[..w].to_vec();
    support.sort_unstable();

    let mut key = PackedTritKey::new_zero(n);
    for &idx in &support {
        key.set(idx, if rng.gen::<bool>() { Trit::P } else { Trit::N });
    }
    (a, key, support)
}

fn bench_fma_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("fma_paths");
    let (a, key, support) = fixture(1, 2048, 128);
    let mut out = vec![0i64; 2048];

    group.bench_function("scalar", |bencher| {
        bencher.iter(|| fma_scalar(black_box(&a), black_box(&key), black_box(&mut out)))
    });

    group.bench_function("batched", |bencher| {
        bencher.iter(|| fma(black_box(&a), black_box(&key), black_box(&mut out)))
    });

    group.bench_function("parallel", |bencher| {
        bencher.iter(|| fma_par(black_box(&a), black_box(&key), black_box(&mut out)))
    });

    group.bench_function("sparse_w128", |bencher| {
        bencher.iter(|| {
            fma_sparse(
                black_box(&a),
                black_box(&key),
                black_box(&support),
                black_box(&mut out),
            )
        })
    });

    group.finish();
}

/// The defining property of the sparse path: work tracks w, not n. Holding
/// w fixed while n spans two orders of magnitude should leave the sparse
/// timings flat while the dense timings grow linearly.
fn bench_sparse_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_scaling");
    let w = 128;

    for n in [4096usize, 65536, 524288] {
        let (a, key, support) = fixture(n as u64, n, w);
        let mut out = vec![0i64; n];

        group.bench_with_input(BenchmarkId::new("sparse_w128", n), &n, |bencher, _| {
            bencher.iter(|| {
                fma_sparse(
                    black_box(&a),
                    black_box(&key),
                    black_box(&support),
                    black_box(&mut out),
                )
            })
        });

        group.bench_with_input(BenchmarkId::new("dense_w128", n), &n, |bencher, _| {
            bencher.iter(|| fma(black_box(&a), black_box(&key), black_box(&mut out)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fma_paths, bench_sparse_scaling);
criterion_main!(benches);
