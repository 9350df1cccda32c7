//! Laws of the generic algorithms: reductions, vectors, matrices and
//! polynomials over the structure under test.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use genring_core::reduce::{self, ReduceConfig, ReduceOp};
use genring_core::{Status, Structure, Truth};
use genring_linalg::dense_matrix::{self, GrMat};
use genring_linalg::vector;
use genring_poly::poly::{self, GrPoly};
use genring_poly::{div, mul};

use crate::check::{additive, commutative, equal_elems, field, judge, ring};
use crate::flags::TestFlags;

fn reduction_matches(ctx: &dyn Structure, rng: &mut ChaCha8Rng, op: ReduceOp, max_len: usize) -> Status {
    let n = rng.gen_range(0..=max_len);
    let mut v = vector::init(ctx, n);
    let status = vector::randtest(ctx, &mut v, rng);
    if !status.is_success() {
        return status;
    }

    let config = ReduceConfig {
        basecase_cutoff: rng.gen_range(1..8),
        parallel_cutoff: 8,
        thread_limit: Some(rng.gen_range(1..=4)),
    };
    let (mut sequential, mut parallel) = (ctx.init(), ctx.init());
    let seq_status = reduce::basecase(ctx, op, &mut sequential, &v);
    let par_status = reduce::parallel_reduce(ctx, op, &mut parallel, &v, &config);

    let same_status = judge(ctx, "parallel status", Truth::True, Truth::from(seq_status == par_status), || {
        format!("{op:?} of {n}: sequential {seq_status}, parallel {par_status}, {config:?}")
    });
    if !seq_status.is_success() {
        return same_status | seq_status;
    }
    let claim = match op {
        ReduceOp::Sum => additive(ctx),
        ReduceOp::Product => ring(ctx),
    };
    same_status | equal_elems(ctx, "parallel reduction", claim, &parallel, &sequential)
}

/// Parallel and sequential sums agree, status included.
pub fn vec_sum_parallel(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    reduction_matches(ctx, rng, ReduceOp::Sum, 200)
}

/// Parallel and sequential products agree, status included.
pub fn vec_product_parallel(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    reduction_matches(ctx, rng, ReduceOp::Product, 24)
}

/// `dot(a + b, c) = dot(a, c) + dot(b, c)`, and the subtracting form
/// with an initial value is `s - dot(a, c)`.
pub fn vec_dot_linearity(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let n = rng.gen_range(0..8);
    let (mut a, mut b, mut c) = (vector::init(ctx, n), vector::init(ctx, n), vector::init(ctx, n));
    let mut status = vector::randtest(ctx, &mut a, rng) | vector::randtest(ctx, &mut b, rng);
    status |= vector::randtest(ctx, &mut c, rng);
    let mut s = ctx.init();
    status |= ctx.randtest(&mut s, rng);

    let mut ab = vector::init(ctx, n);
    status |= vector::add(ctx, &mut ab, &a, &b);
    let (mut lhs, mut ac, mut bc, mut rhs) = (ctx.init(), ctx.init(), ctx.init(), ctx.init());
    status |= vector::dot(ctx, &mut lhs, None, false, &ab, &c);
    status |= vector::dot(ctx, &mut ac, None, false, &a, &c);
    status |= vector::dot(ctx, &mut bc, None, false, &b, &c);
    status |= ctx.add(&mut rhs, &ac, &bc);

    let (mut fused, mut expected) = (ctx.init(), ctx.init());
    status |= vector::dot(ctx, &mut fused, Some(&s), true, &a, &c);
    status |= ctx.sub(&mut expected, &s, &ac);
    if !status.is_success() {
        return status;
    }
    let claim = ring(ctx);
    equal_elems(ctx, "dot linear", claim, &lhs, &rhs) | equal_elems(ctx, "dot with initial value", claim, &fused, &expected)
}

fn random_matrix(ctx: &dyn Structure, rng: &mut ChaCha8Rng, rows: usize, cols: usize, status: &mut Status) -> GrMat {
    let mut m = GrMat::zeros(ctx, rows, cols);
    *status |= dense_matrix::randtest(ctx, &mut m, rng);
    m
}

fn show_matrix(ctx: &dyn Structure, m: &GrMat) -> String {
    let mut s = String::new();
    if !dense_matrix::write(ctx, &mut s, m).is_success() {
        s.push_str("<?>");
    }
    s
}

/// `(A B) C = A (B C)` for random compatible shapes.
pub fn mat_mul_associative(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let [m, k, l, p] = [(); 4].map(|()| rng.gen_range(1..=3usize));
    let mut status = Status::SUCCESS;
    let a = random_matrix(ctx, rng, m, k, &mut status);
    let b = random_matrix(ctx, rng, k, l, &mut status);
    let c = random_matrix(ctx, rng, l, p, &mut status);

    let (mut ab, mut bc) = (GrMat::zeros(ctx, m, l), GrMat::zeros(ctx, k, p));
    let (mut lhs, mut rhs) = (GrMat::zeros(ctx, m, p), GrMat::zeros(ctx, m, p));
    status |= dense_matrix::mul(ctx, &mut ab, &a, &b);
    status |= dense_matrix::mul(ctx, &mut lhs, &ab, &c);
    status |= dense_matrix::mul(ctx, &mut bc, &b, &c);
    status |= dense_matrix::mul(ctx, &mut rhs, &a, &bc);
    if !status.is_success() {
        return status;
    }
    judge(ctx, "matrix product associative", ring(ctx), dense_matrix::equal(ctx, &lhs, &rhs), || {
        format!("{} != {}", show_matrix(ctx, &lhs), show_matrix(ctx, &rhs))
    })
}

/// `L U` equals the row-permuted input.
pub fn lu_reconstruction(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let m = rng.gen_range(1..=4usize);
    let n = rng.gen_range(1..=4usize);
    let mut status = Status::SUCCESS;
    let a = random_matrix(ctx, rng, m, n, &mut status);
    if !status.is_success() {
        return status;
    }

    let mut rank = 0;
    let mut perm = Vec::new();
    let mut lu = GrMat::zeros(ctx, m, n);
    let status = dense_matrix::lu(ctx, &mut rank, &mut perm, &mut lu, &a, false);
    if !status.is_success() {
        return status;
    }

    let (mut l, mut u) = (GrMat::zeros(ctx, m, m), GrMat::zeros(ctx, m, n));
    let (mut prod, mut pa) = (GrMat::zeros(ctx, m, n), GrMat::zeros(ctx, m, n));
    let mut status = dense_matrix::lu_unpack(ctx, &mut l, &mut u, &lu, rank);
    status |= dense_matrix::mul(ctx, &mut prod, &l, &u);
    status |= dense_matrix::permute_rows(ctx, &mut pa, &a, &perm);
    if !status.is_success() {
        return status;
    }
    judge(ctx, "L U = P A", field(ctx), dense_matrix::equal(ctx, &prod, &pa), || {
        format!("A = {}, rank {rank}", show_matrix(ctx, &a))
    })
}

fn random_poly(ctx: &dyn Structure, rng: &mut ChaCha8Rng, max_len: usize, status: &mut Status) -> GrPoly {
    let mut p = GrPoly::new();
    *status |= poly::randtest(ctx, &mut p, rng, max_len);
    p
}

fn show_poly(ctx: &dyn Structure, p: &GrPoly) -> String {
    let mut s = String::new();
    if !poly::write(ctx, &mut s, p, "x").is_success() {
        s.push_str("<?>");
    }
    s
}

/// `a b = b a`, with classical and Karatsuba products agreeing.
pub fn poly_mul_commutative(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let a = random_poly(ctx, rng, 12, &mut status);
    let b = random_poly(ctx, rng, 12, &mut status);
    let (mut ab, mut ba, mut kara) = (GrPoly::new(), GrPoly::new(), GrPoly::new());
    status |= mul::mul_classical(ctx, &mut ab, &a, &b);
    status |= mul::mul_classical(ctx, &mut ba, &b, &a);
    status |= mul::mul_karatsuba(ctx, &mut kara, &a, &b, 2);
    if !status.is_success() {
        return status;
    }
    let claim = commutative(ctx);
    let show = || format!("a = {}, b = {}", show_poly(ctx, &a), show_poly(ctx, &b));
    judge(ctx, "polynomial product commutative", claim, poly::equal(ctx, &ab, &ba), show)
        | judge(ctx, "Karatsuba = classical", claim, poly::equal(ctx, &kara, &ab), show)
}

/// `a = q b + r` with `len r < len b` for a monic divisor `b`.
pub fn poly_divrem_reconstruction(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let a = random_poly(ctx, rng, 10, &mut status);
    let mut b = random_poly(ctx, rng, 5, &mut status);
    let len = b.length();
    status |= poly::set_coeff_si(ctx, &mut b, len, 1);
    if !status.is_success() {
        return status;
    }

    let (mut q, mut r) = (GrPoly::new(), GrPoly::new());
    let status = div::divrem(ctx, &mut q, &mut r, &a, &b);
    if !status.is_success() {
        return status;
    }
    let (mut qb, mut back) = (GrPoly::new(), GrPoly::new());
    let status = mul::mul(ctx, &mut qb, &q, &b) | poly::add(ctx, &mut back, &qb, &r);
    if !status.is_success() {
        return status;
    }
    let claim = commutative(ctx);
    let show = || format!("a = {}, b = {}", show_poly(ctx, &a), show_poly(ctx, &b));
    judge(ctx, "a = q b + r", claim, poly::equal(ctx, &back, &a), show)
        | judge(ctx, "len r < len b", claim, Truth::from(r.length() < b.length()), show)
}
