//! Polynomial multiplication.
//!
//! Classical multiplication computes each output coefficient as one
//! reversed dot product. Karatsuba splits both operands at half the
//! longer length and recurses until an operand drops below the cutoff.

use genring_core::{Elem, Status, Structure};
use genring_linalg::vector;

use crate::poly::{self, GrPoly, PolyConfig};

/// Classical product of coefficient slices, truncated to `len` terms.
///
/// `res` must hold exactly `min(len, a.len() + b.len() - 1)` elements.
fn mullow_classical(ctx: &dyn Structure, res: &mut [Elem], a: &[Elem], b: &[Elem]) -> Status {
    let (la, lb) = (a.len(), b.len());
    let mut status = Status::SUCCESS;
    for (k, r) in res.iter_mut().enumerate() {
        let lo = k.saturating_sub(lb - 1);
        let hi = k.min(la - 1);
        status |= vector::dot_rev(ctx, r, None, false, &a[lo..=hi], &b[k - hi..=k - lo]);
    }
    status
}

fn add_into(ctx: &dyn Structure, res: &mut [Elem], offset: usize, src: &[Elem]) -> Status {
    res[offset..offset + src.len()]
        .iter_mut()
        .zip(src)
        .map(|(r, s)| ctx.add_assign(r, s))
        .collect()
}

/// `a + b` with the shorter operand padded by zeros.
fn add_padded(ctx: &dyn Structure, a: &[Elem], b: &[Elem]) -> (Vec<Elem>, Status) {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut res = vector::clone_all(ctx, long);
    let status = add_into(ctx, &mut res, 0, short);
    (res, status)
}

/// Karatsuba product of two non-empty coefficient slices.
///
/// Returns all `a.len() + b.len() - 1` coefficients.
fn karatsuba(ctx: &dyn Structure, a: &[Elem], b: &[Elem], cutoff: usize) -> (Vec<Elem>, Status) {
    let (n, m) = (a.len(), b.len());
    let len = n + m - 1;
    if n < cutoff.max(2) || m < cutoff.max(2) {
        let mut res = vector::init(ctx, len);
        let status = mullow_classical(ctx, &mut res, a, b);
        return (res, status);
    }

    // a = a0 + a1 x^half, b = b0 + b1 x^half
    let half = n.max(m).div_ceil(2);
    let (a0, a1) = a.split_at(half.min(n));
    let (b0, b1) = b.split_at(half.min(m));

    let (z0, mut status) = karatsuba(ctx, a0, b0, cutoff);
    let (z2, s) = if a1.is_empty() || b1.is_empty() {
        (Vec::new(), Status::SUCCESS)
    } else {
        karatsuba(ctx, a1, b1, cutoff)
    };
    status |= s;

    // z1 = (a0 + a1)(b0 + b1) - z0 - z2
    let (a01, s) = add_padded(ctx, a0, a1);
    status |= s;
    let (b01, s) = add_padded(ctx, b0, b1);
    status |= s;
    let (mut z1, s) = karatsuba(ctx, &a01, &b01, cutoff);
    status |= s;
    for z in [&z0, &z2] {
        for (r, x) in z1.iter_mut().zip(z.iter()) {
            status |= ctx.sub_assign(r, x);
        }
    }

    // Padding may leave a few high terms past `len`; they are zero.
    let full = len.max(half + z1.len()).max(2 * half + z2.len());
    let mut res = vector::init(ctx, full);
    status |= add_into(ctx, &mut res, 0, &z0);
    status |= add_into(ctx, &mut res, half, &z1);
    status |= add_into(ctx, &mut res, 2 * half, &z2);
    res.truncate(len);
    (res, status)
}

/// `res = a * b` by the classical algorithm.
pub fn mul_classical(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, b: &GrPoly) -> Status {
    mullow(ctx, res, a, b, usize::MAX)
}

/// `res = a * b` by Karatsuba's algorithm, with the classical
/// algorithm below `cutoff`.
pub fn mul_karatsuba(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, b: &GrPoly, cutoff: usize) -> Status {
    if a.is_empty() || b.is_empty() {
        return poly::zero(res);
    }
    let (coeffs, status) = karatsuba(ctx, a.coeffs(), b.coeffs(), cutoff);
    *res = GrPoly::from_coeffs(ctx, coeffs);
    status
}

/// `res = a * b`, choosing the algorithm from `config`.
///
/// Karatsuba is used only over commutative rings, where its reordered
/// cross terms are known to agree with the classical product.
pub fn mul_with(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, b: &GrPoly, config: &PolyConfig) -> Status {
    let shortest = a.length().min(b.length());
    if shortest >= config.karatsuba_cutoff && ctx.is_commutative_ring().is_true() {
        tracing::trace!(len_a = a.length(), len_b = b.length(), "poly mul: karatsuba");
        mul_karatsuba(ctx, res, a, b, config.karatsuba_cutoff)
    } else {
        mul_classical(ctx, res, a, b)
    }
}

/// `res = a * b` with the default configuration.
pub fn mul(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, b: &GrPoly) -> Status {
    mul_with(ctx, res, a, b, &PolyConfig::default())
}

/// `res = a * b mod x^n`.
pub fn mullow(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, b: &GrPoly, n: usize) -> Status {
    if a.is_empty() || b.is_empty() || n == 0 {
        return poly::zero(res);
    }
    let len = n.min(a.length() + b.length() - 1);
    let mut coeffs = vector::init(ctx, len);
    let status = mullow_classical(ctx, &mut coeffs, a.coeffs(), b.coeffs());
    *res = GrPoly::from_coeffs(ctx, coeffs);
    status
}

/// `res = a^e` by repeated squaring.
pub fn pow_ui(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, e: u64) -> Status {
    let mut status = poly::one(ctx, res);
    if e == 0 {
        return status;
    }

    let mut base = a.clone_in(ctx);
    let mut t = GrPoly::new();
    let mut e = e;
    loop {
        if e & 1 == 1 {
            status |= mul(ctx, &mut t, res, &base);
            std::mem::swap(res, &mut t);
        }
        e >>= 1;
        if e == 0 {
            break;
        }
        status |= mul(ctx, &mut t, &base, &base);
        std::mem::swap(&mut base, &mut t);
    }
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use genring_rings::{IntegerRing, ModularRing, RationalField};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_mul_classical() {
        let q = RationalField::new();
        let a = GrPoly::from_coeffs_si(&q, &[1, 2]);
        let b = GrPoly::from_coeffs_si(&q, &[3, 4]);
        let mut c = GrPoly::new();
        // (1 + 2x)(3 + 4x) = 3 + 10x + 8x^2
        assert!(mul(&q, &mut c, &a, &b).is_success());
        assert!(poly::equal(&q, &c, &GrPoly::from_coeffs_si(&q, &[3, 10, 8])).is_true());

        assert!(mul(&q, &mut c, &a, &GrPoly::new()).is_success());
        assert!(c.is_empty());
    }

    #[test]
    fn test_karatsuba_matches_classical() {
        let z = IntegerRing::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for (la, lb) in [(40, 40), (37, 100), (100, 33), (64, 65), (5, 80)] {
            let a = GrPoly::from_coeffs(&z, (0..la).map(|_| {
                let mut c = z.init();
                assert!(z.randtest(&mut c, &mut rng).is_success());
                c
            }).collect());
            let b = GrPoly::from_coeffs(&z, (0..lb).map(|i| z.elem_from_si(i - 7)).collect());

            let (mut school, mut kara) = (GrPoly::new(), GrPoly::new());
            assert!(mul_classical(&z, &mut school, &a, &b).is_success());
            assert!(mul_karatsuba(&z, &mut kara, &a, &b, 4).is_success());
            assert!(poly::equal(&z, &school, &kara).is_true(), "mismatch for {la} x {lb}");
            assert_eq!(school.length(), kara.length());
        }
    }

    #[test]
    fn test_mullow() {
        let z = IntegerRing::new();
        let a = GrPoly::from_coeffs_si(&z, &[1, 1, 1]);
        let mut c = GrPoly::new();
        assert!(mullow(&z, &mut c, &a, &a, 3).is_success());
        assert!(poly::equal(&z, &c, &GrPoly::from_coeffs_si(&z, &[1, 2, 3])).is_true());
    }

    #[test]
    fn test_pow_ui() {
        let f = ModularRing::new(5).expect("valid modulus");
        let a = GrPoly::from_coeffs_si(&f, &[1, 1]);
        let mut c = GrPoly::new();
        // (1 + x)^5 = 1 + x^5 in characteristic 5
        assert!(pow_ui(&f, &mut c, &a, 5).is_success());
        assert!(poly::equal(&f, &c, &GrPoly::from_coeffs_si(&f, &[1, 0, 0, 0, 0, 1])).is_true());

        assert!(pow_ui(&f, &mut c, &a, 0).is_success());
        assert!(poly::is_one(&f, &c).is_true());
    }
}
