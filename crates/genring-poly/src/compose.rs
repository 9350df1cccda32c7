//! Composition and modular composition.
//!
//! `compose_mod` computes `f(g) mod h`. The Horner variant performs one
//! modular multiplication per coefficient of `f`. Brent–Kung writes `f`
//! in blocks of `m ≈ sqrt(len f)` coefficients, evaluates every block at
//! `g` at once as a matrix product against the table `g^0..g^(m-1)`, and
//! finishes with a Horner pass in `g^m` over the blocks, so only about
//! `2 sqrt(len f)` modular multiplications remain.

use genring_core::{Status, Structure};
use genring_linalg::dense_matrix::{self, GrMat};
use genring_linalg::vector;

use crate::div::{self, ModulusPreinv};
use crate::mul;
use crate::poly::{self, GrPoly, PolyConfig};

/// `res = f(g)` by Horner's rule.
pub fn compose(ctx: &dyn Structure, res: &mut GrPoly, f: &GrPoly, g: &GrPoly) -> Status {
    let Some((top, rest)) = f.coeffs().split_last() else {
        return poly::zero(res);
    };

    let mut status = poly::set_scalar(ctx, res, top);
    let mut t = GrPoly::new();
    let mut c = GrPoly::new();
    for coeff in rest.iter().rev() {
        status |= mul::mul(ctx, &mut t, res, g);
        status |= poly::set_scalar(ctx, &mut c, coeff);
        status |= poly::add(ctx, res, &t, &c);
    }
    status
}

/// `res = f(g) mod h` by Horner's rule, using a precomputed inverse.
pub fn compose_mod_horner_preinv(
    ctx: &dyn Structure,
    res: &mut GrPoly,
    f: &GrPoly,
    g: &GrPoly,
    hinv: &ModulusPreinv,
) -> Status {
    let Some((top, rest)) = f.coeffs().split_last() else {
        return poly::zero(res);
    };

    let mut gr = GrPoly::new();
    let mut status = div::rem_preinv(ctx, &mut gr, g, hinv);
    let mut t = GrPoly::new();
    let mut c = GrPoly::new();
    status |= poly::set_scalar(ctx, &mut t, top);
    status |= div::rem_preinv(ctx, res, &t, hinv);
    for coeff in rest.iter().rev() {
        status |= div::mulmod_preinv(ctx, &mut t, res, &gr, hinv);
        status |= poly::set_scalar(ctx, &mut c, coeff);
        status |= poly::add(ctx, res, &t, &c);
    }
    // A constant modulus leaves the added coefficient unreduced.
    if hinv.length() == 1 {
        status |= poly::zero(res);
    }
    status
}

/// `res = f(g) mod h` by Horner's rule.
pub fn compose_mod_horner(ctx: &dyn Structure, res: &mut GrPoly, f: &GrPoly, g: &GrPoly, h: &GrPoly) -> Status {
    match ModulusPreinv::new(ctx, h) {
        Ok(hinv) => compose_mod_horner_preinv(ctx, res, f, g, &hinv),
        Err(status) => status,
    }
}

/// `res = f(g) mod h` by the Brent–Kung baby-step giant-step algorithm,
/// using a precomputed inverse.
pub fn compose_mod_brent_kung_preinv(
    ctx: &dyn Structure,
    res: &mut GrPoly,
    f: &GrPoly,
    g: &GrPoly,
    hinv: &ModulusPreinv,
) -> Status {
    let n = hinv.length().saturating_sub(1);
    let lf = f.length();
    if lf == 0 || n == 0 {
        return poly::zero(res);
    }

    // m baby steps, `blocks` giant steps
    let mut m = 1;
    while m * m < lf {
        m += 1;
    }
    let blocks = lf.div_ceil(m);

    // Rows of B are g^0, ..., g^(m-1) mod h, padded to n coefficients.
    let mut powers: Vec<GrPoly> = Vec::with_capacity(m + 1);
    let mut status = Status::SUCCESS;
    let mut p = GrPoly::new();
    status |= poly::one(ctx, &mut p);
    powers.push(p);
    let mut gr = GrPoly::new();
    status |= div::rem_preinv(ctx, &mut gr, g, hinv);
    for i in 1..=m {
        let mut next = GrPoly::new();
        status |= div::mulmod_preinv(ctx, &mut next, &powers[i - 1], &gr, hinv);
        powers.push(next);
    }

    let mut b = GrMat::zeros(ctx, m, n);
    for (i, pw) in powers.iter().take(m).enumerate() {
        status |= vector::set(ctx, &mut b.row_mut(i)[..pw.length()], pw.coeffs());
    }

    // Row j of A holds the coefficients f[j m .. (j + 1) m].
    let mut a = GrMat::zeros(ctx, blocks, m);
    for (j, chunk) in f.coeffs().chunks(m).enumerate() {
        status |= vector::set(ctx, &mut a.row_mut(j)[..chunk.len()], chunk);
    }

    let mut c = GrMat::zeros(ctx, blocks, n);
    status |= dense_matrix::mul(ctx, &mut c, &a, &b);
    if !status.is_success() {
        return status;
    }

    // Horner in g^m over the block values.
    let giant = &powers[m];
    let row_poly = |j: usize| GrPoly::from_coeffs(ctx, vector::clone_all(ctx, c.row(j)));
    *res = row_poly(blocks - 1);
    let mut t = GrPoly::new();
    for j in (0..blocks - 1).rev() {
        status |= div::mulmod_preinv(ctx, &mut t, res, giant, hinv);
        status |= poly::add(ctx, res, &t, &row_poly(j));
    }

    tracing::trace!(len_f = lf, len_h = n + 1, baby = m, giant = blocks, "compose_mod: brent-kung");
    status
}

/// `res = f(g) mod h` by the Brent–Kung algorithm.
pub fn compose_mod_brent_kung(ctx: &dyn Structure, res: &mut GrPoly, f: &GrPoly, g: &GrPoly, h: &GrPoly) -> Status {
    match ModulusPreinv::new(ctx, h) {
        Ok(hinv) => compose_mod_brent_kung_preinv(ctx, res, f, g, &hinv),
        Err(status) => status,
    }
}

/// `res = f(g) mod h`, choosing Horner or Brent–Kung by the length of `h`.
pub fn compose_mod_with(
    ctx: &dyn Structure,
    res: &mut GrPoly,
    f: &GrPoly,
    g: &GrPoly,
    h: &GrPoly,
    config: &PolyConfig,
) -> Status {
    if h.length() >= config.compose_mod_brent_kung_cutoff {
        compose_mod_brent_kung(ctx, res, f, g, h)
    } else {
        compose_mod_horner(ctx, res, f, g, h)
    }
}

/// `res = f(g) mod h` with the default configuration.
pub fn compose_mod(ctx: &dyn Structure, res: &mut GrPoly, f: &GrPoly, g: &GrPoly, h: &GrPoly) -> Status {
    compose_mod_with(ctx, res, f, g, h, &PolyConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use genring_rings::{IntegerRing, ModularRing};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_compose() {
        let z = IntegerRing::new();
        // f = 1 + x^2, g = x + 1: f(g) = 2 + 2x + x^2
        let f = GrPoly::from_coeffs_si(&z, &[1, 0, 1]);
        let g = GrPoly::from_coeffs_si(&z, &[1, 1]);
        let mut r = GrPoly::new();
        assert!(compose(&z, &mut r, &f, &g).is_success());
        assert!(poly::equal(&z, &r, &GrPoly::from_coeffs_si(&z, &[2, 2, 1])).is_true());
    }

    #[test]
    fn test_compose_mod_variants_agree() {
        let fp = ModularRing::new(10_007).expect("valid modulus");
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        for _ in 0..10 {
            let (mut f, mut g, mut h) = (GrPoly::new(), GrPoly::new(), GrPoly::new());
            assert!(poly::randtest(&fp, &mut f, &mut rng, 30).is_success());
            assert!(poly::randtest(&fp, &mut g, &mut rng, 12).is_success());
            assert!(poly::randtest(&fp, &mut h, &mut rng, 12).is_success());
            assert!(poly::set_coeff_si(&fp, &mut h, 12, 1).is_success());

            // Reference: full composition, then one reduction.
            let (mut full, mut expected) = (GrPoly::new(), GrPoly::new());
            assert!(compose(&fp, &mut full, &f, &g).is_success());
            assert!(div::rem(&fp, &mut expected, &full, &h).is_success());

            let (mut horner, mut bk) = (GrPoly::new(), GrPoly::new());
            assert!(compose_mod_horner(&fp, &mut horner, &f, &g, &h).is_success());
            assert!(compose_mod_brent_kung(&fp, &mut bk, &f, &g, &h).is_success());
            assert!(poly::equal(&fp, &horner, &expected).is_true());
            assert!(poly::equal(&fp, &bk, &expected).is_true());
        }
    }

    #[test]
    fn test_compose_mod_non_invertible_modulus() {
        let z = IntegerRing::new();
        let f = GrPoly::from_coeffs_si(&z, &[1, 1]);
        let h = GrPoly::from_coeffs_si(&z, &[1, 0, 2]);
        let mut r = GrPoly::new();
        assert_eq!(compose_mod(&z, &mut r, &f, &f, &h), Status::DOMAIN);
        assert_eq!(compose_mod(&z, &mut r, &f, &f, &GrPoly::new()), Status::DOMAIN);
    }
}
