//! Division with remainder, power series inversion and reduction modulo
//! a fixed polynomial.
//!
//! Reduction modulo `f` is the shared primitive of modular composition
//! and modular exponentiation. [`ModulusPreinv`] precomputes the inverse
//! series of the reversed modulus once, after which each reduction costs
//! two truncated products instead of a full long division.

use genring_core::{Elem, Status, Structure, Truth};
use genring_linalg::vector;

use crate::mul;
use crate::poly::{self, GrPoly};

/// Power series inversion switches from the basecase recurrence to
/// Newton iteration above this length.
const INV_SERIES_NEWTON_CUTOFF: usize = 16;

/// Inverts the leading coefficient of a divisor.
///
/// DOMAIN for the zero polynomial, otherwise the status of the base
/// inversion (DOMAIN for a zero divisor, UNABLE if undecidable).
fn leading_inverse(ctx: &dyn Structure, b: &GrPoly) -> Result<Elem, Status> {
    let Some(lead) = b.leading() else {
        return Err(Status::DOMAIN);
    };
    let mut linv = ctx.init();
    let status = ctx.inv(&mut linv, lead);
    if status.is_success() {
        Ok(linv)
    } else {
        Err(status)
    }
}

/// `a = q b + r` with `deg r < deg b`, by long division.
///
/// The leading coefficient of `b` must be invertible.
pub fn divrem(ctx: &dyn Structure, q: &mut GrPoly, r: &mut GrPoly, a: &GrPoly, b: &GrPoly) -> Status {
    let linv = match leading_inverse(ctx, b) {
        Ok(linv) => linv,
        Err(status) => return status,
    };
    divrem_with_inverse(ctx, q, r, a, b, &linv)
}

fn divrem_with_inverse(
    ctx: &dyn Structure,
    q: &mut GrPoly,
    r: &mut GrPoly,
    a: &GrPoly,
    b: &GrPoly,
    linv: &Elem,
) -> Status {
    let (la, lb) = (a.length(), b.length());
    if la < lb {
        let status = poly::set(ctx, r, a);
        return status | poly::zero(q);
    }

    let mut rem = vector::clone_all(ctx, a.coeffs());
    let mut quo = vector::init(ctx, la - lb + 1);
    let mut status = Status::SUCCESS;
    let low = &b.coeffs()[..lb - 1];
    for i in (0..quo.len()).rev() {
        status |= ctx.mul(&mut quo[i], &rem[i + lb - 1], linv);
        status |= vector::submul_scalar_left(ctx, &mut rem[i..i + lb - 1], &quo[i], low);
    }
    rem.truncate(lb - 1);

    *q = GrPoly::from_coeffs(ctx, quo);
    *r = GrPoly::from_coeffs(ctx, rem);
    status
}

/// Quotient of `a` by `b`.
pub fn div(ctx: &dyn Structure, q: &mut GrPoly, a: &GrPoly, b: &GrPoly) -> Status {
    let mut r = GrPoly::new();
    divrem(ctx, q, &mut r, a, b)
}

/// Remainder of `a` by `b`.
pub fn rem(ctx: &dyn Structure, r: &mut GrPoly, a: &GrPoly, b: &GrPoly) -> Status {
    let mut q = GrPoly::new();
    divrem(ctx, &mut q, r, a, b)
}

/// `q = a / b` when `b` divides `a` exactly.
///
/// With an invertible leading coefficient this is long division plus a
/// remainder test. Otherwise each quotient coefficient comes from an
/// exact division in the base by the leading coefficient of `b`, so
/// `(2x + 2) / 2` works over `Z[x]`. A failed step proves `b` does not
/// divide `a` (DOMAIN) only over an integral domain; elsewhere it is
/// UNABLE.
pub fn divexact(ctx: &dyn Structure, q: &mut GrPoly, a: &GrPoly, b: &GrPoly) -> Status {
    let Some(lead) = b.leading() else {
        return Status::DOMAIN;
    };
    let verdict = |zero: Truth| match zero {
        Truth::True => Status::SUCCESS,
        Truth::False => Status::DOMAIN,
        Truth::Unknown => Status::UNABLE,
    };

    if let Ok(linv) = leading_inverse(ctx, b) {
        let (mut quo, mut r) = (GrPoly::new(), GrPoly::new());
        let status = divrem_with_inverse(ctx, &mut quo, &mut r, a, b, &linv);
        if !status.is_success() {
            return status;
        }
        let status = verdict(poly::is_zero(ctx, &r));
        if status.is_success() {
            *q = quo;
        }
        return status;
    }

    let (la, lb) = (a.length(), b.length());
    if la < lb {
        let status = verdict(poly::is_zero(ctx, a));
        if status.is_success() {
            return poly::zero(q);
        }
        return status;
    }

    let domain = ctx.is_integral_domain();
    let mut rem = vector::clone_all(ctx, a.coeffs());
    let mut quo = vector::init(ctx, la - lb + 1);
    let low = &b.coeffs()[..lb - 1];
    for i in (0..quo.len()).rev() {
        let step = ctx.div(&mut quo[i], &rem[i + lb - 1], lead);
        if !step.is_success() {
            return if step == Status::DOMAIN && !domain.is_true() {
                Status::UNABLE
            } else {
                step
            };
        }
        let status = vector::submul_scalar_left(ctx, &mut rem[i..i + lb - 1], &quo[i], low);
        if !status.is_success() {
            return status;
        }
    }
    rem.truncate(lb - 1);

    let status = verdict(vector::is_zero(ctx, &rem));
    if status.is_success() {
        *q = GrPoly::from_coeffs(ctx, quo);
    } else if status == Status::DOMAIN && !domain.is_true() {
        return Status::UNABLE;
    }
    status
}

/// Divides by the leading coefficient. DOMAIN for zero.
pub fn make_monic(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly) -> Status {
    match leading_inverse(ctx, a) {
        Ok(linv) => poly::mul_scalar(ctx, res, a, &linv),
        Err(status) => status,
    }
}

/// `res = 1/a mod x^n`. The constant term of `a` must be invertible.
pub fn inv_series(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, n: usize) -> Status {
    let Some(a0) = a.coeff(0) else {
        return Status::DOMAIN;
    };
    let mut c = ctx.init();
    let status = ctx.inv(&mut c, a0);
    if !status.is_success() {
        return status;
    }
    if n == 0 {
        return poly::zero(res);
    }
    inv_series_newton(ctx, res, a, &c, n)
}

fn inv_series_basecase(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, a0_inv: &Elem, n: usize) -> Status {
    let ac = a.coeffs();
    let mut b = vector::init(ctx, n);
    let mut status = ctx.set(&mut b[0], a0_inv);
    let mut t = ctx.init();
    for k in 1..n {
        // b_k = -a0^-1 * sum_{i=1}^{k} a_i b_{k-i}
        let hi = k.min(ac.len() - 1);
        if hi == 0 {
            continue;
        }
        let (done, rest) = b.split_at_mut(k);
        status |= vector::dot_rev(ctx, &mut t, None, false, &ac[1..=hi], &done[k - hi..]);
        status |= ctx.mul(&mut rest[0], a0_inv, &t);
        status |= ctx.neg_assign(&mut rest[0]);
    }
    *res = GrPoly::from_coeffs(ctx, b);
    status
}

fn inv_series_newton(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, a0_inv: &Elem, n: usize) -> Status {
    if n <= INV_SERIES_NEWTON_CUTOFF {
        return inv_series_basecase(ctx, res, a, a0_inv, n);
    }

    // b' = b + b (1 - a b) mod x^n, doubling the precision of b
    let m = n.div_ceil(2);
    let mut status = inv_series_newton(ctx, res, a, a0_inv, m);
    let mut e = GrPoly::new();
    let mut t = GrPoly::new();
    let mut one = GrPoly::new();
    status |= mul::mullow(ctx, &mut e, a, res, n);
    status |= poly::one(ctx, &mut one);
    status |= poly::sub(ctx, &mut t, &one, &e);
    status |= mul::mullow(ctx, &mut e, res, &t, n);
    status |= poly::add(ctx, &mut t, res, &e);
    *res = t;
    status
}

/// A modulus together with the inverse series of its reversal.
#[derive(Debug)]
pub struct ModulusPreinv {
    modulus: GrPoly,
    rev_inv: GrPoly,
    precision: usize,
}

impl ModulusPreinv {
    /// Precomputes the reduction data for `f`.
    ///
    /// # Errors
    ///
    /// Returns the failing status when `f` is zero (DOMAIN) or its
    /// leading coefficient is not invertible.
    pub fn new(ctx: &dyn Structure, f: &GrPoly) -> Result<Self, Status> {
        let lead_inv = leading_inverse(ctx, f)?;
        let precision = f.length();

        let mut rev = GrPoly::new();
        let mut rev_inv = GrPoly::new();
        let mut status = poly::reverse(ctx, &mut rev, f, precision);
        status |= inv_series_newton(ctx, &mut rev_inv, &rev, &lead_inv, precision);
        if !status.is_success() {
            return Err(status);
        }

        tracing::trace!(len = precision, "modulus preinverse");
        Ok(Self {
            modulus: f.clone_in(ctx),
            rev_inv,
            precision,
        })
    }

    /// Returns the modulus.
    #[must_use]
    pub fn modulus(&self) -> &GrPoly {
        &self.modulus
    }

    /// Returns the length of the modulus.
    #[must_use]
    pub fn length(&self) -> usize {
        self.modulus.length()
    }
}

/// `a = q f + r` using a precomputed inverse of the reversed modulus.
///
/// Falls back to long division when `a` is longer than the
/// precomputed precision supports.
pub fn divrem_preinv(
    ctx: &dyn Structure,
    q: &mut GrPoly,
    r: &mut GrPoly,
    a: &GrPoly,
    finv: &ModulusPreinv,
) -> Status {
    let f = &finv.modulus;
    let (la, lf) = (a.length(), f.length());
    if la < lf {
        let status = poly::set(ctx, r, a);
        return status | poly::zero(q);
    }

    let lq = la - lf + 1;
    if lq > finv.precision {
        return divrem(ctx, q, r, a, f);
    }

    // rev(q) = rev(a) * rev(f)^-1 mod x^lq
    let mut arev = GrPoly::new();
    let mut qrev = GrPoly::new();
    let mut status = poly::reverse(ctx, &mut arev, a, la);
    status |= poly::truncate(ctx, &mut qrev, &arev, lq);
    status |= mul::mullow(ctx, &mut arev, &qrev, &finv.rev_inv, lq);
    status |= poly::reverse(ctx, q, &arev, lq);

    // r = a - q f, which vanishes above degree lf - 2
    let mut qf = GrPoly::new();
    let mut low = GrPoly::new();
    status |= mul::mullow(ctx, &mut qf, q, f, lf - 1);
    status |= poly::truncate(ctx, &mut low, a, lf - 1);
    status |= poly::sub(ctx, r, &low, &qf);
    status
}

/// `r = a mod f` using a precomputed inverse.
pub fn rem_preinv(ctx: &dyn Structure, r: &mut GrPoly, a: &GrPoly, finv: &ModulusPreinv) -> Status {
    if a.length() < finv.length() {
        return poly::set(ctx, r, a);
    }
    let mut q = GrPoly::new();
    divrem_preinv(ctx, &mut q, r, a, finv)
}

/// `res = a b mod f`.
pub fn mulmod(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, b: &GrPoly, f: &GrPoly) -> Status {
    let mut t = GrPoly::new();
    let status = mul::mul(ctx, &mut t, a, b);
    status | rem(ctx, res, &t, f)
}

/// `res = a b mod f` using a precomputed inverse.
pub fn mulmod_preinv(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, b: &GrPoly, finv: &ModulusPreinv) -> Status {
    let mut t = GrPoly::new();
    let status = mul::mul(ctx, &mut t, a, b);
    status | rem_preinv(ctx, res, &t, finv)
}
