//! Exponentiation modulo a polynomial.
//!
//! Every variant reduces through [`ModulusPreinv`], so the inverse of the
//! reversed modulus is computed once per call rather than once per
//! multiplication. The sliding window variant precomputes the odd powers
//! `a, a^3, ..., a^(2^k - 1)` and consumes up to `k` exponent bits per
//! multiplication.

use dashu::base::BitTest;
use dashu::integer::{IBig, UBig};

use genring_core::{Status, Structure};

use crate::div::{self, ModulusPreinv};
use crate::poly::{self, GrPoly, PolyConfig};

/// Picks a sliding window width from the exponent's bit length.
#[must_use]
pub fn window_for_bits(bits: usize) -> usize {
    match bits {
        0..=8 => 1,
        9..=24 => 2,
        25..=80 => 3,
        81..=240 => 4,
        241..=672 => 5,
        _ => 6,
    }
}

/// Sets `res` to one reduced modulo the modulus.
fn one_mod(ctx: &dyn Structure, res: &mut GrPoly, finv: &ModulusPreinv) -> Status {
    if finv.length() <= 1 {
        return poly::zero(res);
    }
    poly::one(ctx, res)
}

/// `res = a^e mod f` by left-to-right binary exponentiation, using a
/// precomputed inverse.
pub fn powmod_binexp_preinv(
    ctx: &dyn Structure,
    res: &mut GrPoly,
    a: &GrPoly,
    e: &UBig,
    finv: &ModulusPreinv,
) -> Status {
    let mut base = GrPoly::new();
    let mut status = div::rem_preinv(ctx, &mut base, a, finv);
    status |= one_mod(ctx, res, finv);

    let mut t = GrPoly::new();
    for i in (0..e.bit_len()).rev() {
        status |= div::mulmod_preinv(ctx, &mut t, res, res, finv);
        std::mem::swap(res, &mut t);
        if e.bit(i) {
            status |= div::mulmod_preinv(ctx, &mut t, res, &base, finv);
            std::mem::swap(res, &mut t);
        }
    }
    status
}

/// `res = a^e mod f` by binary exponentiation.
pub fn powmod_binexp(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, e: &UBig, f: &GrPoly) -> Status {
    match ModulusPreinv::new(ctx, f) {
        Ok(finv) => powmod_binexp_preinv(ctx, res, a, e, &finv),
        Err(status) => status,
    }
}

/// `res = a^e mod f` by sliding window exponentiation with window `k`,
/// using a precomputed inverse.
pub fn powmod_sliding_preinv(
    ctx: &dyn Structure,
    res: &mut GrPoly,
    a: &GrPoly,
    e: &UBig,
    finv: &ModulusPreinv,
    k: usize,
) -> Status {
    let k = k.clamp(1, 16);
    let mut status = one_mod(ctx, res, finv);
    let bits = e.bit_len();
    if bits == 0 {
        return status;
    }

    // table[i] = a^(2i + 1) mod f
    let mut a_red = GrPoly::new();
    let mut a_sqr = GrPoly::new();
    status |= div::rem_preinv(ctx, &mut a_red, a, finv);
    status |= div::mulmod_preinv(ctx, &mut a_sqr, &a_red, &a_red, finv);
    let mut table = Vec::with_capacity(1 << (k - 1));
    table.push(a_red);
    for i in 1..1usize << (k - 1) {
        let mut next = GrPoly::new();
        status |= div::mulmod_preinv(ctx, &mut next, &table[i - 1], &a_sqr, finv);
        table.push(next);
    }

    let mut t = GrPoly::new();
    let mut i = bits;
    while i > 0 {
        let top = i - 1;
        if !e.bit(top) {
            status |= div::mulmod_preinv(ctx, &mut t, res, res, finv);
            std::mem::swap(res, &mut t);
            i -= 1;
            continue;
        }

        // Longest window of at most k bits ending in a set bit.
        let mut low = top.saturating_sub(k - 1);
        while !e.bit(low) {
            low += 1;
        }
        let mut window = 0usize;
        for j in (low..=top).rev() {
            window = (window << 1) | usize::from(e.bit(j));
            status |= div::mulmod_preinv(ctx, &mut t, res, res, finv);
            std::mem::swap(res, &mut t);
        }
        status |= div::mulmod_preinv(ctx, &mut t, res, &table[window >> 1], finv);
        std::mem::swap(res, &mut t);
        i = low;
    }
    status
}

/// `res = a^e mod f` for a signed exponent, choosing the window from the
/// exponent size unless `config` fixes one. DOMAIN for negative `e`.
pub fn powmod_int_with(
    ctx: &dyn Structure,
    res: &mut GrPoly,
    a: &GrPoly,
    e: &IBig,
    f: &GrPoly,
    config: &PolyConfig,
) -> Status {
    let Ok(e) = UBig::try_from(e.clone()) else {
        return Status::DOMAIN;
    };
    let finv = match ModulusPreinv::new(ctx, f) {
        Ok(finv) => finv,
        Err(status) => return status,
    };

    let k = config.powmod_window.unwrap_or_else(|| window_for_bits(e.bit_len()));
    tracing::trace!(bits = e.bit_len(), window = k, "powmod");
    if k <= 1 {
        powmod_binexp_preinv(ctx, res, a, &e, &finv)
    } else {
        powmod_sliding_preinv(ctx, res, a, &e, &finv, k)
    }
}

/// `res = a^e mod f` with the default configuration.
pub fn powmod_int(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, e: &IBig, f: &GrPoly) -> Status {
    powmod_int_with(ctx, res, a, e, f, &PolyConfig::default())
}

/// `res = a^e mod f` for a machine exponent.
pub fn powmod_ui(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, e: u64, f: &GrPoly) -> Status {
    powmod_int(ctx, res, a, &IBig::from(e), f)
}
