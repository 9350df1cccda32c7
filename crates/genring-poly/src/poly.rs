//! Dense univariate polynomials over a runtime structure.
//!
//! Coefficients are stored in ascending degree order. Every public
//! operation leaves its output normalised: no trailing coefficient whose
//! zero test is TRUE. A trailing coefficient whose zero test is UNKNOWN
//! is kept, so the stored length is an upper bound on the true length
//! over inexact structures.

use std::fmt;

use rand::{Rng, RngCore};

use genring_core::{Elem, Status, Structure, Truth};
use genring_linalg::vector;

/// Algorithm selection thresholds for polynomial arithmetic.
#[derive(Clone, Debug)]
pub struct PolyConfig {
    /// Minimum operand length for Karatsuba multiplication.
    pub karatsuba_cutoff: usize,
    /// Minimum modulus length for Brent–Kung modular composition.
    pub compose_mod_brent_kung_cutoff: usize,
    /// Fixed sliding window for modular exponentiation; `None` picks
    /// one from the exponent size.
    pub powmod_window: Option<usize>,
}

impl Default for PolyConfig {
    fn default() -> Self {
        Self {
            karatsuba_cutoff: 16,
            compose_mod_brent_kung_cutoff: 8,
            powmod_window: None,
        }
    }
}

/// A dense univariate polynomial.
///
/// The polynomial does not hold its coefficient structure; callers pass
/// the structure the coefficients belong to.
#[derive(Debug, Default)]
pub struct GrPoly {
    /// Coefficients in ascending degree order.
    coeffs: Vec<Elem>,
}

impl GrPoly {
    /// Creates the zero polynomial.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a polynomial from coefficients in ascending order.
    #[must_use]
    pub fn from_coeffs(ctx: &dyn Structure, coeffs: Vec<Elem>) -> Self {
        let mut p = Self { coeffs };
        p.normalise(ctx);
        p
    }

    /// Creates a polynomial from machine integer coefficients.
    #[must_use]
    pub fn from_coeffs_si(ctx: &dyn Structure, coeffs: &[i64]) -> Self {
        Self::from_coeffs(ctx, coeffs.iter().map(|&c| ctx.elem_from_si(c)).collect())
    }

    /// Returns a copy made through the coefficient structure.
    #[must_use]
    pub fn clone_in(&self, ctx: &dyn Structure) -> Self {
        Self {
            coeffs: vector::clone_all(ctx, &self.coeffs),
        }
    }

    /// Returns the number of stored coefficients.
    #[must_use]
    pub fn length(&self) -> usize {
        self.coeffs.len()
    }

    /// Returns the degree, or `None` for the zero polynomial.
    #[must_use]
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Returns true if no coefficient is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns the coefficients in ascending order.
    #[must_use]
    pub fn coeffs(&self) -> &[Elem] {
        &self.coeffs
    }

    /// Returns the coefficient of `x^i`, if stored.
    #[must_use]
    pub fn coeff(&self, i: usize) -> Option<&Elem> {
        self.coeffs.get(i)
    }

    /// Returns the leading coefficient, if any.
    #[must_use]
    pub fn leading(&self) -> Option<&Elem> {
        self.coeffs.last()
    }

    /// Consumes the polynomial and returns its coefficients.
    #[must_use]
    pub fn into_coeffs(self) -> Vec<Elem> {
        self.coeffs
    }

    /// Sets the stored length, zero-filling on growth and dropping on
    /// shrink. The result may need [`GrPoly::normalise`].
    pub fn set_length(&mut self, ctx: &dyn Structure, len: usize) {
        if len <= self.coeffs.len() {
            self.coeffs.truncate(len);
        } else {
            let extra = len - self.coeffs.len();
            self.coeffs.extend((0..extra).map(|_| ctx.init()));
        }
    }

    /// Grows the stored length to at least `len`.
    pub fn fit_length(&mut self, ctx: &dyn Structure, len: usize) {
        if len > self.coeffs.len() {
            self.set_length(ctx, len);
        }
    }

    /// Drops trailing coefficients whose zero test is TRUE.
    pub fn normalise(&mut self, ctx: &dyn Structure) {
        let len = vector::normalise_len(ctx, &self.coeffs);
        self.coeffs.truncate(len);
    }
}

/// Returns the coefficient at `i`, or `zero` past the stored length.
fn coeff_or_zero<'a>(p: &'a GrPoly, i: usize, zero: &'a Elem) -> &'a Elem {
    p.coeffs.get(i).unwrap_or(zero)
}

// ----------------------------------------------------------------------
// Assignment and predicates
// ----------------------------------------------------------------------

/// `res = a`.
pub fn set(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly) -> Status {
    res.set_length(ctx, a.length());
    vector::set(ctx, &mut res.coeffs, &a.coeffs)
}

/// Sets `res` to zero.
pub fn zero(res: &mut GrPoly) -> Status {
    res.coeffs.clear();
    Status::SUCCESS
}

/// Sets `res` to the constant one.
pub fn one(ctx: &dyn Structure, res: &mut GrPoly) -> Status {
    set_coeff_si_only(ctx, res, 0, 1)
}

/// Sets `res` to the generator `x`.
pub fn gen(ctx: &dyn Structure, res: &mut GrPoly) -> Status {
    set_coeff_si_only(ctx, res, 1, 1)
}

/// Sets `res` to the constant `c`.
pub fn set_scalar(ctx: &dyn Structure, res: &mut GrPoly, c: &Elem) -> Status {
    res.set_length(ctx, 1);
    let status = ctx.set(&mut res.coeffs[0], c);
    res.normalise(ctx);
    status
}

fn set_coeff_si_only(ctx: &dyn Structure, res: &mut GrPoly, i: usize, v: i64) -> Status {
    res.coeffs.clear();
    res.set_length(ctx, i + 1);
    let status = ctx.set_si(&mut res.coeffs[i], v);
    res.normalise(ctx);
    status
}

/// Sets the coefficient of `x^i` to `c`.
pub fn set_coeff(ctx: &dyn Structure, p: &mut GrPoly, i: usize, c: &Elem) -> Status {
    p.fit_length(ctx, i + 1);
    let status = ctx.set(&mut p.coeffs[i], c);
    p.normalise(ctx);
    status
}

/// Sets the coefficient of `x^i` to the machine integer `v`.
pub fn set_coeff_si(ctx: &dyn Structure, p: &mut GrPoly, i: usize, v: i64) -> Status {
    p.fit_length(ctx, i + 1);
    let status = ctx.set_si(&mut p.coeffs[i], v);
    p.normalise(ctx);
    status
}

/// Tests whether `a` is zero.
#[must_use]
pub fn is_zero(ctx: &dyn Structure, a: &GrPoly) -> Truth {
    vector::is_zero(ctx, &a.coeffs)
}

/// Tests whether `a` is the constant one.
#[must_use]
pub fn is_one(ctx: &dyn Structure, a: &GrPoly) -> Truth {
    match a.coeffs.split_first() {
        None => ctx.is_zero_ring(),
        Some((c0, rest)) => ctx.is_one(c0) & vector::is_zero(ctx, rest),
    }
}

/// Tests `a == b`, treating missing coefficients as zero.
#[must_use]
pub fn equal(ctx: &dyn Structure, a: &GrPoly, b: &GrPoly) -> Truth {
    let (long, short) = if a.length() >= b.length() { (a, b) } else { (b, a) };
    let n = short.length();
    vector::equal(ctx, &long.coeffs[..n], &short.coeffs) & vector::is_zero(ctx, &long.coeffs[n..])
}

// ----------------------------------------------------------------------
// Additive operations
// ----------------------------------------------------------------------

/// `res = -a`.
pub fn neg(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly) -> Status {
    res.set_length(ctx, a.length());
    vector::neg(ctx, &mut res.coeffs, &a.coeffs)
}

fn add_sub(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, b: &GrPoly, subtract: bool) -> Status {
    let len = a.length().max(b.length());
    let zero = ctx.init();
    res.set_length(ctx, len);
    let mut status = Status::SUCCESS;
    for (i, r) in res.coeffs.iter_mut().enumerate() {
        let (x, y) = (coeff_or_zero(a, i, &zero), coeff_or_zero(b, i, &zero));
        status |= if subtract { ctx.sub(r, x, y) } else { ctx.add(r, x, y) };
    }
    res.normalise(ctx);
    status
}

/// `res = a + b`.
pub fn add(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, b: &GrPoly) -> Status {
    add_sub(ctx, res, a, b, false)
}

/// `res = a - b`.
pub fn sub(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, b: &GrPoly) -> Status {
    add_sub(ctx, res, a, b, true)
}

/// `res = a * c` for a coefficient `c`.
pub fn mul_scalar(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, c: &Elem) -> Status {
    res.set_length(ctx, a.length());
    let status = vector::mul_scalar(ctx, &mut res.coeffs, &a.coeffs, c);
    res.normalise(ctx);
    status
}

/// `res = c * a` for a coefficient `c`.
pub fn scalar_mul(ctx: &dyn Structure, res: &mut GrPoly, c: &Elem, a: &GrPoly) -> Status {
    res.set_length(ctx, a.length());
    let status = vector::scalar_mul(ctx, &mut res.coeffs, c, &a.coeffs);
    res.normalise(ctx);
    status
}

// ----------------------------------------------------------------------
// Shifts and truncation
// ----------------------------------------------------------------------

/// `res = a * x^n`.
pub fn shift_left(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, n: usize) -> Status {
    if a.is_empty() {
        return zero(res);
    }
    res.coeffs.clear();
    res.set_length(ctx, a.length() + n);
    vector::set(ctx, &mut res.coeffs[n..], &a.coeffs)
}

/// `res = a div x^n`, dropping the low `n` coefficients.
pub fn shift_right(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, n: usize) -> Status {
    if n >= a.length() {
        return zero(res);
    }
    res.set_length(ctx, a.length() - n);
    vector::set(ctx, &mut res.coeffs, &a.coeffs[n..])
}

/// `res = a mod x^n`.
pub fn truncate(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, n: usize) -> Status {
    let len = n.min(a.length());
    res.set_length(ctx, len);
    let status = vector::set(ctx, &mut res.coeffs, &a.coeffs[..len]);
    res.normalise(ctx);
    status
}

/// Reverses `a` as a polynomial of length `n`: `res = x^(n-1) a(1/x)`.
///
/// Coefficients of `a` past `n` are ignored.
pub fn reverse(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, n: usize) -> Status {
    res.coeffs.clear();
    res.set_length(ctx, n);
    let mut status = Status::SUCCESS;
    for (i, c) in a.coeffs.iter().take(n).enumerate() {
        status |= ctx.set(&mut res.coeffs[n - 1 - i], c);
    }
    res.normalise(ctx);
    status
}

// ----------------------------------------------------------------------
// Calculus and evaluation
// ----------------------------------------------------------------------

/// Formal derivative.
pub fn derivative(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly) -> Status {
    if a.length() <= 1 {
        return zero(res);
    }
    res.set_length(ctx, a.length() - 1);
    let mut status = Status::SUCCESS;
    for (i, r) in res.coeffs.iter_mut().enumerate() {
        status |= match i64::try_from(i + 1) {
            Ok(k) => ctx.mul_si(r, &a.coeffs[i + 1], k),
            Err(_) => Status::UNABLE,
        };
    }
    res.normalise(ctx);
    status
}

/// `res = a(x)` by Horner's rule.
pub fn evaluate(ctx: &dyn Structure, res: &mut Elem, a: &GrPoly, x: &Elem) -> Status {
    let Some((top, rest)) = a.coeffs.split_last() else {
        return ctx.zero(res);
    };
    let mut status = ctx.set(res, top);
    let mut t = ctx.init();
    for c in rest.iter().rev() {
        status |= ctx.mul(&mut t, res, x);
        status |= ctx.add(res, &t, c);
    }
    status
}

// ----------------------------------------------------------------------
// Random generation and output
// ----------------------------------------------------------------------

/// Sets `res` to a random polynomial of length at most `max_len`.
pub fn randtest(ctx: &dyn Structure, res: &mut GrPoly, rng: &mut dyn RngCore, max_len: usize) -> Status {
    let len = rng.gen_range(0..=max_len);
    res.coeffs.clear();
    res.set_length(ctx, len);
    let status = vector::randtest(ctx, &mut res.coeffs, rng);
    res.normalise(ctx);
    status
}

fn needs_parens(s: &str) -> bool {
    !s.starts_with('[') && s.chars().skip(1).any(|c| matches!(c, ' ' | '+' | '-' | '/' | '*'))
}

/// Writes `a` in ascending order, e.g. `1 + 2*x + x^3`.
pub fn write(ctx: &dyn Structure, out: &mut dyn fmt::Write, a: &GrPoly, var: &str) -> Status {
    let mut terms = Vec::new();
    for (i, c) in a.coeffs.iter().enumerate() {
        if ctx.is_zero(c).is_true() {
            continue;
        }
        let s = ctx.format_elem(c);
        let coeff = if needs_parens(&s) { format!("({s})") } else { s };
        let term = match (i, ctx.is_one(c).is_true()) {
            (0, _) => coeff,
            (1, true) => var.to_string(),
            (1, false) => format!("{coeff}*{var}"),
            (_, true) => format!("{var}^{i}"),
            (_, false) => format!("{coeff}*{var}^{i}"),
        };
        terms.push(term);
    }

    let text = if terms.is_empty() { "0".to_string() } else { terms.join(" + ") };
    Status::check(out.write_str(&text).is_ok(), Status::UNABLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use genring_rings::{IntegerRing, ModularRing, RationalField};

    fn show(ctx: &dyn Structure, p: &GrPoly) -> String {
        let mut s = String::new();
        assert!(write(ctx, &mut s, p, "x").is_success());
        s
    }

    #[test]
    fn test_normalised_construction() {
        let z = IntegerRing::new();
        let p = GrPoly::from_coeffs_si(&z, &[1, 2, 0, 0]);
        assert_eq!(p.length(), 2);
        assert_eq!(p.degree(), Some(1));
        assert_eq!(GrPoly::from_coeffs_si(&z, &[0, 0]).degree(), None);

        // 7 vanishes mod 7
        let f = ModularRing::new(7).expect("valid modulus");
        assert_eq!(GrPoly::from_coeffs_si(&f, &[1, 7]).length(), 1);
    }

    #[test]
    fn test_add_sub_cancel() {
        let z = IntegerRing::new();
        let a = GrPoly::from_coeffs_si(&z, &[1, 2, 3]);
        let b = GrPoly::from_coeffs_si(&z, &[4, 5, -3]);
        let mut c = GrPoly::new();
        assert!(add(&z, &mut c, &a, &b).is_success());
        assert!(equal(&z, &c, &GrPoly::from_coeffs_si(&z, &[5, 7])).is_true());
        assert_eq!(c.length(), 2);

        assert!(sub(&z, &mut c, &a, &a).is_success());
        assert!(c.is_empty());
    }

    #[test]
    fn test_set_coeff_and_gen() {
        let q = RationalField::new();
        let mut p = GrPoly::new();
        assert!(gen(&q, &mut p).is_success());
        assert_eq!(p.degree(), Some(1));
        assert!(set_coeff_si(&q, &mut p, 4, -2).is_success());
        assert_eq!(p.degree(), Some(4));
        assert!(set_coeff_si(&q, &mut p, 4, 0).is_success());
        assert_eq!(p.degree(), Some(1));
        assert!(one(&q, &mut p).is_success());
        assert!(is_one(&q, &p).is_true());
    }

    #[test]
    fn test_shifts_reverse_truncate() {
        let z = IntegerRing::new();
        let a = GrPoly::from_coeffs_si(&z, &[1, 2, 3]);
        let mut r = GrPoly::new();

        assert!(shift_left(&z, &mut r, &a, 2).is_success());
        assert!(equal(&z, &r, &GrPoly::from_coeffs_si(&z, &[0, 0, 1, 2, 3])).is_true());
        assert!(shift_right(&z, &mut r, &a, 1).is_success());
        assert!(equal(&z, &r, &GrPoly::from_coeffs_si(&z, &[2, 3])).is_true());
        assert!(reverse(&z, &mut r, &a, 4).is_success());
        assert!(equal(&z, &r, &GrPoly::from_coeffs_si(&z, &[0, 3, 2, 1])).is_true());
        assert!(truncate(&z, &mut r, &a, 2).is_success());
        assert!(equal(&z, &r, &GrPoly::from_coeffs_si(&z, &[1, 2])).is_true());
    }

    #[test]
    fn test_derivative_and_evaluate() {
        let z = IntegerRing::new();
        let a = GrPoly::from_coeffs_si(&z, &[1, 2, 3]);
        let mut d = GrPoly::new();
        assert!(derivative(&z, &mut d, &a).is_success());
        assert!(equal(&z, &d, &GrPoly::from_coeffs_si(&z, &[2, 6])).is_true());

        let mut v = z.init();
        assert!(evaluate(&z, &mut v, &a, &z.elem_from_si(2)).is_success());
        assert_eq!(IntegerRing::value(&v), &dashu::integer::IBig::from(17));

        // d/dx x^3 = 3x^2 = 0 over Z/3
        let f = ModularRing::new(3).expect("valid modulus");
        let cube = GrPoly::from_coeffs_si(&f, &[0, 0, 0, 1]);
        assert!(derivative(&f, &mut d, &cube).is_success());
        assert!(d.is_empty());
    }

    #[test]
    fn test_write() {
        let z = IntegerRing::new();
        assert_eq!(show(&z, &GrPoly::new()), "0");
        assert_eq!(show(&z, &GrPoly::from_coeffs_si(&z, &[1, 1, 0, -2])), "1 + x + -2*x^3");
        let q = RationalField::new();
        let mut p = GrPoly::new();
        assert!(set_coeff(&q, &mut p, 1, &{
            let mut h = q.init();
            assert!(q.div(&mut h, &q.elem_from_si(1), &q.elem_from_si(2)).is_success());
            h
        })
        .is_success());
        assert_eq!(show(&q, &p), "(1/2)*x");
    }
}
