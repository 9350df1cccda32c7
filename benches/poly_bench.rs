//! Benchmarks for generic polynomial algorithms over `Z/p`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use genring::core::Structure;
use genring::poly::poly::{self, GrPoly};
use genring::poly::{compose, mul, powmod};
use genring::rings::ModularRing;

const P: u64 = 1_000_000_007;

fn field() -> ModularRing {
    ModularRing::new(P).expect("prime modulus")
}

/// Random polynomial of exactly `len` coefficients.
fn random_poly(ctx: &dyn Structure, rng: &mut ChaCha8Rng, len: usize) -> GrPoly {
    let mut p = GrPoly::new();
    let _ = poly::randtest(ctx, &mut p, rng, len);
    let _ = poly::set_coeff_si(ctx, &mut p, len, 1);
    p
}

fn bench_poly_mul(c: &mut Criterion) {
    let ctx = field();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut group = c.benchmark_group("poly_mul");

    for size in [16, 64, 256, 1024] {
        let a = random_poly(&ctx, &mut rng, size);
        let b = random_poly(&ctx, &mut rng, size);
        let mut res = GrPoly::new();

        group.bench_with_input(BenchmarkId::new("classical", size), &size, |bench, _| {
            bench.iter(|| black_box(mul::mul_classical(&ctx, &mut res, &a, &b)));
        });
        group.bench_with_input(BenchmarkId::new("karatsuba", size), &size, |bench, _| {
            bench.iter(|| black_box(mul::mul_karatsuba(&ctx, &mut res, &a, &b, 16)));
        });
    }

    group.finish();
}

fn bench_compose_mod(c: &mut Criterion) {
    let ctx = field();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut group = c.benchmark_group("compose_mod");

    for size in [8, 32, 128] {
        let h = random_poly(&ctx, &mut rng, size);
        let f = random_poly(&ctx, &mut rng, size - 1);
        let g = random_poly(&ctx, &mut rng, size - 1);
        let mut res = GrPoly::new();

        group.bench_with_input(BenchmarkId::new("horner", size), &size, |bench, _| {
            bench.iter(|| black_box(compose::compose_mod_horner(&ctx, &mut res, &f, &g, &h)));
        });
        group.bench_with_input(BenchmarkId::new("brent_kung", size), &size, |bench, _| {
            bench.iter(|| black_box(compose::compose_mod_brent_kung(&ctx, &mut res, &f, &g, &h)));
        });
    }

    group.finish();
}

fn bench_powmod(c: &mut Criterion) {
    let ctx = field();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let modulus = random_poly(&ctx, &mut rng, 64);
    let base = random_poly(&ctx, &mut rng, 63);
    let mut group = c.benchmark_group("powmod");

    for e in [1_000u64, 1_000_000, P] {
        let mut res = GrPoly::new();
        group.bench_with_input(BenchmarkId::new("x^e mod f", e), &e, |bench, &e| {
            bench.iter(|| black_box(powmod::powmod_ui(&ctx, &mut res, &base, e, &modulus)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_poly_mul, bench_compose_mod, bench_powmod);
criterion_main!(benches);
