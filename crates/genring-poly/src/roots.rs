//! Roots of polynomials over finite structures.
//!
//! Over a prime field of odd characteristic the distinct roots are the
//! roots of `gcd(f, x^p - x)`, which splits into linear factors by the
//! Cantor–Zassenhaus equal-degree step: for random `δ`, the gcd with
//! `(x + δ)^((p-1)/2) - 1` separates roots whose shifts are quadratic
//! residues from those that are not. Small rings `Z/n` (including
//! characteristic 2) are searched exhaustively. Exact domains of
//! characteristic zero such as `ZZ` and `QQ` test the candidates `±p/q`
//! of the rational root theorem, keeping those the structure contains.
//! Multiplicities come from repeated division by `x - r`.

use dashu::base::{Gcd, UnsignedAbs};
use dashu::integer::{IBig, UBig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use genring_core::{Elem, Status, Structure};

use crate::div;
use crate::gcd;
use crate::poly::{self, GrPoly};
use crate::powmod;

/// Largest ring order searched by enumeration.
pub const ENUMERATION_LIMIT: u64 = 1 << 12;

/// Largest trailing or leading coefficient whose divisors are listed as
/// rational root candidates.
pub const DIVISOR_LIMIT: u64 = 1 << 40;

/// Random splitting attempts per factor before giving up.
const MAX_SPLIT_ATTEMPTS: usize = 64;

/// How roots are found over a given structure.
enum Strategy {
    /// Odd prime field of the given order.
    CantorZassenhaus(IBig),
    /// `Z/n` small enough to try every residue.
    Enumerate(u64),
    /// Exact integral domain of characteristic zero.
    RationalRoot,
    /// Only linear polynomials over a field.
    Linear,
    Unsupported,
}

fn strategy(ctx: &dyn Structure) -> Strategy {
    let is_field = ctx.is_field().is_true();
    if ctx.is_finite().is_true() && ctx.is_canonical().is_true() && ctx.is_commutative_ring().is_true() {
        let (mut order, mut chr) = (IBig::ZERO, IBig::ZERO);
        let status = ctx.cardinality(&mut order) | ctx.characteristic(&mut chr);
        // Rings generated by their integers: every element is some set_ui(i).
        if status.is_success() && order == chr {
            if is_field && order > IBig::from(2u8) {
                return Strategy::CantorZassenhaus(order);
            }
            if let Ok(n) = u64::try_from(order.clone()) {
                if n <= ENUMERATION_LIMIT {
                    return Strategy::Enumerate(n);
                }
            }
        }
    }
    if ctx.is_integral_domain().is_true()
        && ctx.is_exact().is_true()
        && ctx.is_finite_characteristic().is_false()
    {
        Strategy::RationalRoot
    } else if is_field {
        Strategy::Linear
    } else {
        Strategy::Unsupported
    }
}

/// Multiplicity of `r` as a root of `f`, by repeated division.
fn multiplicity(ctx: &dyn Structure, f: &GrPoly, r: &Elem) -> Result<usize, Status> {
    let mut lin = GrPoly::new();
    let mut neg_r = ctx.init();
    let status = ctx.neg(&mut neg_r, r) | poly::gen(ctx, &mut lin) | poly::set_coeff(ctx, &mut lin, 0, &neg_r);
    if !status.is_success() {
        return Err(status);
    }

    let mut cur = f.clone_in(ctx);
    let (mut q, mut rem) = (GrPoly::new(), GrPoly::new());
    let mut count = 0;
    while cur.length() >= 2 {
        let status = div::divrem(ctx, &mut q, &mut rem, &cur, &lin);
        if !status.is_success() {
            return Err(status);
        }
        if !rem.is_empty() {
            break;
        }
        count += 1;
        std::mem::swap(&mut cur, &mut q);
    }
    Ok(count)
}

fn enumerate_roots(ctx: &dyn Structure, found: &mut Vec<Elem>, f: &GrPoly, order: u64) -> Status {
    let mut x = ctx.init();
    let mut value = ctx.init();
    for i in 0..order {
        let status = ctx.set_ui(&mut x, i) | poly::evaluate(ctx, &mut value, f, &x);
        if !status.is_success() {
            return status;
        }
        match ctx.is_zero(&value).to_option() {
            Some(true) => found.push(ctx.clone_elem(&x)),
            Some(false) => {}
            None => return Status::UNABLE,
        }
    }
    Status::SUCCESS
}

/// `-c0 / c1` for a linear polynomial over a field.
fn linear_root(ctx: &dyn Structure, found: &mut Vec<Elem>, f: &GrPoly) -> Status {
    let mut r = ctx.init();
    let c = f.coeffs();
    let status = ctx.div(&mut r, &c[0], &c[1]) | ctx.neg_assign(&mut r);
    found.push(r);
    status
}

/// The coefficients of `f` scaled by the lcm of their denominators.
fn integer_coefficients(ctx: &dyn Structure, f: &GrPoly) -> Option<Vec<IBig>> {
    let mut fractions = Vec::with_capacity(f.length());
    let mut lcm = UBig::ONE;
    for c in f.coeffs() {
        let (mut num, mut den) = (IBig::ZERO, IBig::ONE);
        if !ctx.get_fraction(&mut num, &mut den, c).is_success() {
            return None;
        }
        let den = den.unsigned_abs();
        let g = lcm.clone().gcd(den.clone());
        lcm = lcm / g * &den;
        fractions.push((num, den));
    }
    Some(
        fractions
            .into_iter()
            .map(|(num, den)| num * IBig::from(&lcm / den))
            .collect(),
    )
}

/// Positive divisors of `v` in increasing order, if `|v|` is small enough
/// to factor by trial division.
fn divisors(v: &IBig) -> Option<Vec<u64>> {
    let n = u64::try_from(v.unsigned_abs()).ok().filter(|&n| n <= DIVISOR_LIMIT)?;
    let (mut low, mut high) = (Vec::new(), Vec::new());
    let mut d = 1;
    while d * d <= n {
        if n % d == 0 {
            low.push(d);
            if d != n / d {
                high.push(n / d);
            }
        }
        d += 1;
    }
    low.extend(high.into_iter().rev());
    Some(low)
}

fn coprime(mut a: u64, mut b: u64) -> bool {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a == 1
}

/// Tests every `±p/q` with `p` dividing the trailing and `q` the leading
/// coefficient. Candidates the structure cannot represent (DOMAIN from
/// `div`, e.g. 1/2 in `ZZ`) are skipped.
fn rational_roots(ctx: &dyn Structure, found: &mut Vec<Elem>, f: &GrPoly) -> Status {
    if f.length() == 2 && ctx.is_field().is_true() {
        return linear_root(ctx, found, f);
    }
    let Some(ints) = integer_coefficients(ctx, f) else {
        return Status::UNABLE;
    };
    let Some(low) = ints.iter().position(|c| *c != IBig::ZERO) else {
        return Status::DOMAIN;
    };
    let high = ints.len() - 1;

    let mut status = Status::SUCCESS;
    if low > 0 {
        let mut zero = ctx.init();
        status |= ctx.zero(&mut zero);
        found.push(zero);
    }
    if low == high {
        return status;
    }
    let (Some(ps), Some(qs)) = (divisors(&ints[low]), divisors(&ints[high])) else {
        tracing::debug!(degree = high, "coefficients too large for rational root search");
        return Status::UNABLE;
    };

    let (mut num, mut den, mut r, mut value) = (ctx.init(), ctx.init(), ctx.init(), ctx.init());
    for &q in &qs {
        for &p in ps.iter().filter(|&&p| coprime(p, q)) {
            for negate in [false, true] {
                status |= ctx.set_ui(&mut num, p) | ctx.set_ui(&mut den, q);
                if negate {
                    status |= ctx.neg_assign(&mut num);
                }
                let step = ctx.div(&mut r, &num, &den);
                if step == Status::DOMAIN {
                    continue;
                }
                status |= step;
                status |= poly::evaluate(ctx, &mut value, f, &r);
                if !status.is_success() {
                    return status;
                }
                match ctx.is_zero(&value).to_option() {
                    Some(true) => found.push(ctx.clone_elem(&r)),
                    Some(false) => {}
                    None => return Status::UNABLE,
                }
            }
        }
    }
    status
}

/// Splits a monic squarefree product of distinct linear factors.
fn split_linear(ctx: &dyn Structure, found: &mut Vec<Elem>, g: &GrPoly, half: &IBig, rng: &mut ChaCha8Rng) -> Status {
    match g.length() {
        0 | 1 => return Status::SUCCESS,
        2 => {
            let mut r = ctx.init();
            let status = ctx.neg(&mut r, &g.coeffs()[0]);
            found.push(r);
            return status;
        }
        _ => {}
    }

    let mut shift = GrPoly::new();
    let mut h = GrPoly::new();
    let mut one = GrPoly::new();
    let mut d = GrPoly::new();
    let mut delta = ctx.init();
    let mut status = poly::one(ctx, &mut one);
    for _ in 0..MAX_SPLIT_ATTEMPTS {
        // d = gcd(g, (x + δ)^((p-1)/2) - 1)
        status |= ctx.randtest(&mut delta, rng);
        status |= poly::gen(ctx, &mut shift) | poly::set_coeff(ctx, &mut shift, 0, &delta);
        status |= powmod::powmod_int(ctx, &mut h, &shift, half, g);
        status |= poly::sub(ctx, &mut shift, &h, &one);
        status |= gcd::gcd(ctx, &mut d, g, &shift);
        if !status.is_success() {
            return status;
        }

        if d.length() > 1 && d.length() < g.length() {
            let mut cofactor = GrPoly::new();
            status |= div::div(ctx, &mut cofactor, g, &d);
            status |= split_linear(ctx, found, &d, half, rng);
            return status | split_linear(ctx, found, &cofactor, half, rng);
        }
    }

    tracing::debug!(degree = g.length() - 1, "root splitting made no progress");
    Status::UNABLE
}

fn cantor_zassenhaus(ctx: &dyn Structure, found: &mut Vec<Elem>, f: &GrPoly, p: &IBig) -> Status {
    let mut monic = GrPoly::new();
    let mut status = div::make_monic(ctx, &mut monic, f);

    // g = gcd(f, x^p - x) is the product of the distinct linear factors.
    let (mut x, mut xp, mut diff, mut g) = (GrPoly::new(), GrPoly::new(), GrPoly::new(), GrPoly::new());
    status |= poly::gen(ctx, &mut x);
    status |= powmod::powmod_int(ctx, &mut xp, &x, p, &monic);
    status |= poly::sub(ctx, &mut diff, &xp, &x);
    status |= gcd::gcd(ctx, &mut g, &monic, &diff);
    if !status.is_success() {
        return status;
    }

    let half: IBig = (p - IBig::ONE) / IBig::from(2u8);
    let mut rng = ChaCha8Rng::seed_from_u64(123);
    split_linear(ctx, found, &g, &half, &mut rng)
}

/// Finds the roots of `f` in its coefficient structure, with
/// multiplicities.
///
/// Roots with an integer representative (all roots over `Z/n` and `ZZ`)
/// come out in increasing order of it. DOMAIN for the zero polynomial;
/// UNABLE when no root finding method applies to the structure.
pub fn roots(ctx: &dyn Structure, roots: &mut Vec<Elem>, mults: &mut Vec<usize>, f: &GrPoly) -> Status {
    roots.clear();
    mults.clear();
    if f.is_empty() {
        return Status::DOMAIN;
    }
    if f.length() == 1 {
        return Status::SUCCESS;
    }

    let mut found = Vec::new();
    let status = match strategy(ctx) {
        Strategy::CantorZassenhaus(p) => cantor_zassenhaus(ctx, &mut found, f, &p),
        Strategy::Enumerate(n) => enumerate_roots(ctx, &mut found, f, n),
        Strategy::RationalRoot => rational_roots(ctx, &mut found, f),
        Strategy::Linear if f.length() == 2 => linear_root(ctx, &mut found, f),
        Strategy::Linear | Strategy::Unsupported => Status::UNABLE,
    };
    if !status.is_success() {
        return status;
    }

    // Sort by integer representative where one exists.
    let mut keyed: Vec<(Option<IBig>, Elem)> = found
        .into_iter()
        .map(|r| {
            let mut key = IBig::ZERO;
            let key = ctx.get_int(&mut key, &r).is_success().then_some(key);
            (key, r)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    for (_, r) in keyed {
        match multiplicity(ctx, f, &r) {
            Ok(m) => {
                roots.push(r);
                mults.push(m);
            }
            Err(status) => return status,
        }
    }
    tracing::trace!(degree = f.length() - 1, roots = roots.len(), "roots");
    Status::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mul;
    use genring_rings::{IntegerRing, ModularRing, RationalField};

    fn product_of_linear(ctx: &dyn Structure, rs: &[i64]) -> GrPoly {
        let mut f = GrPoly::new();
        let mut t = GrPoly::new();
        assert!(poly::one(ctx, &mut f).is_success());
        for &r in rs {
            assert!(mul::mul(ctx, &mut t, &f, &GrPoly::from_coeffs_si(ctx, &[-r, 1])).is_success());
            std::mem::swap(&mut f, &mut t);
        }
        f
    }

    fn as_ints(ctx: &dyn Structure, rs: &[Elem]) -> Vec<IBig> {
        rs.iter()
            .map(|r| {
                let mut v = IBig::ZERO;
                assert!(ctx.get_int(&mut v, r).is_success());
                v
            })
            .collect()
    }

    #[test]
    fn test_roots_mod_seven() {
        let f7 = ModularRing::new(7).expect("valid modulus");
        // (x - 1)^2 (x - 3)(x^2 + 1), and x^2 + 1 is irreducible mod 7
        let mut f = product_of_linear(&f7, &[1, 1, 3]);
        let mut t = GrPoly::new();
        assert!(mul::mul(&f7, &mut t, &f, &GrPoly::from_coeffs_si(&f7, &[1, 0, 1])).is_success());
        f = t;

        let (mut rs, mut ms) = (Vec::new(), Vec::new());
        assert!(roots(&f7, &mut rs, &mut ms, &f).is_success());
        assert_eq!(as_ints(&f7, &rs), vec![IBig::from(1), IBig::from(3)]);
        assert_eq!(ms, vec![2, 1]);
    }

    #[test]
    fn test_roots_large_prime() {
        let p = 1_000_000_007;
        let fp = ModularRing::new(p).expect("valid modulus");
        let f = product_of_linear(&fp, &[5, 123_456, -1, -1, -1, 99_999_999]);
        let (mut rs, mut ms) = (Vec::new(), Vec::new());
        assert!(roots(&fp, &mut rs, &mut ms, &f).is_success());
        let expected: Vec<IBig> = [5u64, 123_456, 99_999_999, p - 1].iter().map(|&v| IBig::from(v)).collect();
        assert_eq!(as_ints(&fp, &rs), expected);
        assert_eq!(ms, vec![1, 1, 1, 3]);
    }

    #[test]
    fn test_roots_by_enumeration() {
        let z8 = ModularRing::new(8).expect("valid modulus");
        let f = GrPoly::from_coeffs_si(&z8, &[-1, 0, 1]);
        let (mut rs, mut ms) = (Vec::new(), Vec::new());
        assert!(roots(&z8, &mut rs, &mut ms, &f).is_success());
        let expected: Vec<IBig> = [1, 3, 5, 7].iter().map(|&v: &i32| IBig::from(v)).collect();
        assert_eq!(as_ints(&z8, &rs), expected);
        assert_eq!(ms, vec![1; 4]);

        let f2 = ModularRing::new(2).expect("valid modulus");
        let g = GrPoly::from_coeffs_si(&f2, &[0, 1, 0, 1]);
        assert!(roots(&f2, &mut rs, &mut ms, &g).is_success());
        // x^3 + x = x (x + 1)^2 over F_2
        assert_eq!(as_ints(&f2, &rs), vec![IBig::ZERO, IBig::ONE]);
        assert_eq!(ms, vec![1, 2]);
    }

    #[test]
    fn test_roots_elsewhere() {
        let q = RationalField::new();
        let (mut rs, mut ms) = (Vec::new(), Vec::new());
        assert!(roots(&q, &mut rs, &mut ms, &GrPoly::from_coeffs_si(&q, &[-1, 2])).is_success());
        let (mut num, mut den) = (IBig::ZERO, IBig::ZERO);
        assert!(q.get_fraction(&mut num, &mut den, &rs[0]).is_success());
        assert_eq!((num, den), (IBig::ONE, IBig::from(2)));
        assert_eq!(ms, vec![1]);

        // x^2 - 2 has no rational roots.
        assert!(roots(&q, &mut rs, &mut ms, &GrPoly::from_coeffs_si(&q, &[-2, 0, 1])).is_success());
        assert!(rs.is_empty());

        let z = IntegerRing::new();
        assert_eq!(roots(&z, &mut rs, &mut ms, &GrPoly::new()), Status::DOMAIN);

        assert!(roots(&z, &mut rs, &mut ms, &GrPoly::from_coeffs_si(&z, &[5])).is_success());
        assert!(rs.is_empty());
    }

    #[test]
    fn test_integer_roots() {
        let z = IntegerRing::new();
        let (mut rs, mut ms) = (Vec::new(), Vec::new());
        // (x - 1)(x + 2)^2
        let f = product_of_linear(&z, &[1, -2, -2]);
        assert!(roots(&z, &mut rs, &mut ms, &f).is_success());
        assert_eq!(as_ints(&z, &rs), vec![IBig::from(-2), IBig::ONE]);
        assert_eq!(ms, vec![2, 1]);

        // x^3 - x
        assert!(roots(&z, &mut rs, &mut ms, &GrPoly::from_coeffs_si(&z, &[0, -1, 0, 1])).is_success());
        assert_eq!(as_ints(&z, &rs), vec![IBig::from(-1), IBig::ZERO, IBig::ONE]);
        assert_eq!(ms, vec![1; 3]);

        // 2x + 1 and (2x + 1)(3x - 2) have no integer roots.
        assert!(roots(&z, &mut rs, &mut ms, &GrPoly::from_coeffs_si(&z, &[1, 2])).is_success());
        assert!(rs.is_empty());
        assert!(roots(&z, &mut rs, &mut ms, &GrPoly::from_coeffs_si(&z, &[-2, -1, 6])).is_success());
        assert!(rs.is_empty());

        // 3x - 6 = 3(x - 2)
        assert!(roots(&z, &mut rs, &mut ms, &GrPoly::from_coeffs_si(&z, &[-6, 3])).is_success());
        assert_eq!(as_ints(&z, &rs), vec![IBig::from(2)]);
    }

    #[test]
    fn test_rational_roots() {
        let q = RationalField::new();
        let (mut rs, mut ms) = (Vec::new(), Vec::new());
        // (2x + 1)(3x - 2)^2 = 18x^3 - 15x^2 - 4x + 4
        let f = GrPoly::from_coeffs_si(&q, &[4, -4, -15, 18]);
        assert!(roots(&q, &mut rs, &mut ms, &f).is_success());
        let mut shown: Vec<(String, usize)> = rs.iter().map(|r| q.format_elem(r)).zip(ms.iter().copied()).collect();
        shown.sort();
        assert_eq!(shown, [("-1/2".to_string(), 1), ("2/3".to_string(), 2)]);

        // Coefficients past the divisor limit are not searched.
        let big = i64::try_from(DIVISOR_LIMIT).unwrap() * 2 + 1;
        let g = GrPoly::from_coeffs_si(&q, &[big, 0, 1]);
        assert_eq!(roots(&q, &mut rs, &mut ms, &g), Status::UNABLE);
    }
}
