//! Element-level laws: lifecycle, conversions, ring axioms, inverses,
//! powers and ordering.

use std::cmp::Ordering;

use dashu::integer::IBig;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use genring_core::{Elem, Status, Structure, Truth};

use crate::check::{additive, commutative, equal_elems, judge, ordered, ring, sample};
use crate::flags::TestFlags;

/// `init` yields zero; `set` copies; `swap` exchanges.
pub fn init_set_swap(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let y = sample(ctx, rng, &mut status);
    let mut a = ctx.init();
    let mut b = ctx.init();
    let fresh = ctx.init();
    status |= ctx.set(&mut a, &x);
    status |= ctx.set(&mut b, &y);
    if !status.is_success() {
        return status;
    }

    let mut verdict = judge(ctx, "init is zero", Truth::True, ctx.is_zero(&fresh), || {
        ctx.format_elem(&fresh)
    });
    verdict |= equal_elems(ctx, "set copies", Truth::True, &a, &x);
    a.swap(&mut b);
    verdict |= equal_elems(ctx, "swap", Truth::True, &a, &y);
    verdict |= equal_elems(ctx, "swap", Truth::True, &b, &x);
    verdict
}

/// `zero`, `one` and `neg_one` satisfy their predicates.
pub fn zero_one(ctx: &dyn Structure, _rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut z = ctx.init();
    let status = ctx.zero(&mut z);
    if !status.is_success() {
        return status;
    }
    let mut verdict = judge(ctx, "zero is zero", Truth::True, ctx.is_zero(&z), || ctx.format_elem(&z));

    let claim = ring(ctx);
    if claim.is_false() {
        return verdict;
    }
    let (mut one, mut neg_one, mut sum) = (ctx.init(), ctx.init(), ctx.init());
    let mut status = ctx.one(&mut one) | ctx.neg_one(&mut neg_one);
    status |= ctx.add(&mut sum, &one, &neg_one);
    if !status.is_success() {
        return status;
    }
    verdict |= judge(ctx, "one is one", claim, ctx.is_one(&one), || ctx.format_elem(&one));
    verdict |= judge(ctx, "1 + (-1) = 0", claim, ctx.is_zero(&sum), || ctx.format_elem(&sum));
    let zero_ring = ctx.is_zero_ring();
    if !zero_ring.is_unknown() {
        verdict |= judge(ctx, "1 = 0 only in the zero ring", claim, Truth::from(ctx.is_zero(&one) == zero_ring), || {
            ctx.format_elem(&one)
        });
    }
    verdict
}

/// `set_si`, `set_ui` and `set_int` agree, and integers map additively.
pub fn set_integers(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let m = rng.gen_range(-1_000_000i64..1_000_000);
    let n = rng.gen_range(-1_000_000i64..1_000_000);

    let (mut a, mut b, mut c) = (ctx.init(), ctx.init(), ctx.init());
    let mut status = ctx.set_si(&mut a, m) | ctx.set_int(&mut b, &IBig::from(m));
    if let Ok(u) = u64::try_from(m) {
        status |= ctx.set_ui(&mut c, u);
    } else {
        status |= ctx.set(&mut c, &a);
    }

    // (2^100 + m) - 2^100 = m
    let big = IBig::from(1u128 << 100);
    let (mut d, mut e, mut f) = (ctx.init(), ctx.init(), ctx.init());
    status |= ctx.set_int(&mut d, &(big.clone() + IBig::from(m)));
    status |= ctx.set_int(&mut e, &big);
    status |= ctx.sub(&mut f, &d, &e);

    let (mut sm, mut sn, mut sum, mut direct) = (ctx.init(), ctx.init(), ctx.init(), ctx.init());
    status |= ctx.set_si(&mut sm, m) | ctx.set_si(&mut sn, n);
    status |= ctx.add(&mut sum, &sm, &sn);
    status |= ctx.set_si(&mut direct, m + n);
    if !status.is_success() {
        return status;
    }

    let claim = additive(ctx);
    equal_elems(ctx, "set_si = set_int", Truth::True, &a, &b)
        | equal_elems(ctx, "set_si = set_ui", Truth::True, &a, &c)
        | equal_elems(ctx, "set_int of a large integer", claim, &f, &a)
        | equal_elems(ctx, "integers map additively", claim, &sum, &direct)
}

/// `get_int` and `get_fraction` invert `set_int`.
pub fn get_int_round_trip(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let mut v = IBig::ZERO;
    status |= ctx.get_int(&mut v, &x);
    if !status.is_success() {
        return status;
    }
    let mut y = ctx.init();
    let status = ctx.set_int(&mut y, &v);
    if !status.is_success() {
        return status;
    }

    let (mut num, mut den) = (IBig::ZERO, IBig::ZERO);
    let status = ctx.get_fraction(&mut num, &mut den, &x);
    if !status.is_success() {
        return status;
    }
    equal_elems(ctx, "set_int(get_int(x)) = x", Truth::True, &y, &x)
        | judge(ctx, "integral fraction", Truth::True, Truth::from(num == v && den == IBig::ONE), || {
            format!("{num}/{den} for {v}")
        })
}

/// Converting from the structure itself is the identity.
pub fn set_other_identity(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let mut y = ctx.init();
    status |= ctx.set_other(&mut y, &x, ctx);
    if !status.is_success() {
        return status;
    }
    equal_elems(ctx, "set_other from itself", Truth::True, &y, &x)
}

#[derive(Clone, Copy)]
enum BinOp {
    Add,
    Sub,
    Mul,
}

impl BinOp {
    fn apply(self, ctx: &dyn Structure, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        match self {
            BinOp::Add => ctx.add(res, x, y),
            BinOp::Sub => ctx.sub(res, x, y),
            BinOp::Mul => ctx.mul(res, x, y),
        }
    }

    fn apply_assign(self, ctx: &dyn Structure, res: &mut Elem, y: &Elem) -> Status {
        match self {
            BinOp::Add => ctx.add_assign(res, y),
            BinOp::Sub => ctx.sub_assign(res, y),
            BinOp::Mul => ctx.mul_assign(res, y),
        }
    }

    fn claim(self, ctx: &dyn Structure) -> Truth {
        match self {
            BinOp::Add | BinOp::Sub => additive(ctx),
            BinOp::Mul => ring(ctx),
        }
    }
}

/// The in-place form and the equal-inputs form match the plain call.
fn aliasing(ctx: &dyn Structure, rng: &mut ChaCha8Rng, op: BinOp) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let y = sample(ctx, rng, &mut status);

    let mut plain = ctx.init();
    status |= op.apply(ctx, &mut plain, &x, &y);
    let mut in_place = ctx.clone_elem(&x);
    status |= op.apply_assign(ctx, &mut in_place, &y);

    let x_copy = ctx.clone_elem(&x);
    let (mut same, mut copied) = (ctx.init(), ctx.init());
    status |= op.apply(ctx, &mut same, &x, &x);
    status |= op.apply(ctx, &mut copied, &x, &x_copy);
    if !status.is_success() {
        return status;
    }

    let claim = op.claim(ctx);
    equal_elems(ctx, "output aliases the left input", claim, &in_place, &plain)
        | equal_elems(ctx, "both inputs alias", claim, &same, &copied)
}

/// Aliasing for `add`.
pub fn add_aliasing(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    aliasing(ctx, rng, BinOp::Add)
}

/// Aliasing for `sub`.
pub fn sub_aliasing(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    aliasing(ctx, rng, BinOp::Sub)
}

/// Aliasing for `mul`.
pub fn mul_aliasing(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    aliasing(ctx, rng, BinOp::Mul)
}

/// `(x + y) + z = x + (y + z)`.
pub fn add_associative(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let y = sample(ctx, rng, &mut status);
    let z = sample(ctx, rng, &mut status);
    let (mut xy, mut yz, mut lhs, mut rhs) = (ctx.init(), ctx.init(), ctx.init(), ctx.init());
    status |= ctx.add(&mut xy, &x, &y);
    status |= ctx.add(&mut lhs, &xy, &z);
    status |= ctx.add(&mut yz, &y, &z);
    status |= ctx.add(&mut rhs, &x, &yz);
    if !status.is_success() {
        return status;
    }
    equal_elems(ctx, "add associative", additive(ctx), &lhs, &rhs)
}

/// `x + y = y + x`.
pub fn add_commutative(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let y = sample(ctx, rng, &mut status);
    let (mut xy, mut yx) = (ctx.init(), ctx.init());
    status |= ctx.add(&mut xy, &x, &y);
    status |= ctx.add(&mut yx, &y, &x);
    if !status.is_success() {
        return status;
    }
    equal_elems(ctx, "add commutative", additive(ctx), &xy, &yx)
}

/// `-(-x) = x`, out of place and in place.
pub fn neg_involution(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let (mut n, mut nn) = (ctx.init(), ctx.init());
    status |= ctx.neg(&mut n, &x);
    status |= ctx.neg(&mut nn, &n);
    let mut in_place = ctx.clone_elem(&x);
    status |= ctx.neg_assign(&mut in_place);
    let once = ctx.clone_elem(&in_place);
    status |= ctx.neg_assign(&mut in_place);
    if !status.is_success() {
        return status;
    }
    let claim = additive(ctx);
    equal_elems(ctx, "neg involution", claim, &nn, &x)
        | equal_elems(ctx, "neg in place", claim, &once, &n)
        | equal_elems(ctx, "neg involution in place", claim, &in_place, &x)
}

/// `x + (-x) = 0`.
pub fn add_neg_identity(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let (mut n, mut s) = (ctx.init(), ctx.init());
    status |= ctx.neg(&mut n, &x);
    status |= ctx.add(&mut s, &x, &n);
    if !status.is_success() {
        return status;
    }
    judge(ctx, "x + (-x) = 0", additive(ctx), ctx.is_zero(&s), || {
        format!("x = {}, x + (-x) = {}", ctx.format_elem(&x), ctx.format_elem(&s))
    })
}

/// `x - y = x + (-y)`.
pub fn sub_is_add_neg(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let y = sample(ctx, rng, &mut status);
    let (mut d, mut n, mut s) = (ctx.init(), ctx.init(), ctx.init());
    status |= ctx.sub(&mut d, &x, &y);
    status |= ctx.neg(&mut n, &y);
    status |= ctx.add(&mut s, &x, &n);
    if !status.is_success() {
        return status;
    }
    equal_elems(ctx, "x - y = x + (-y)", additive(ctx), &d, &s)
}

/// `(x y) z = x (y z)`.
pub fn mul_associative(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let y = sample(ctx, rng, &mut status);
    let z = sample(ctx, rng, &mut status);
    let (mut xy, mut yz, mut lhs, mut rhs) = (ctx.init(), ctx.init(), ctx.init(), ctx.init());
    status |= ctx.mul(&mut xy, &x, &y);
    status |= ctx.mul(&mut lhs, &xy, &z);
    status |= ctx.mul(&mut yz, &y, &z);
    status |= ctx.mul(&mut rhs, &x, &yz);
    if !status.is_success() {
        return status;
    }
    equal_elems(ctx, "mul associative", ring(ctx), &lhs, &rhs)
}

/// `x y = y x`.
pub fn mul_commutative(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let y = sample(ctx, rng, &mut status);
    let (mut xy, mut yx) = (ctx.init(), ctx.init());
    status |= ctx.mul(&mut xy, &x, &y);
    status |= ctx.mul(&mut yx, &y, &x);
    if !status.is_success() {
        return status;
    }
    equal_elems(ctx, "mul commutative", commutative(ctx), &xy, &yx)
}

/// `x (y + z) = x y + x z` and `(y + z) x = y x + z x`.
pub fn distributive(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let y = sample(ctx, rng, &mut status);
    let z = sample(ctx, rng, &mut status);

    let mut yz = ctx.init();
    status |= ctx.add(&mut yz, &y, &z);
    let (mut left, mut xy, mut xz, mut left_sum) = (ctx.init(), ctx.init(), ctx.init(), ctx.init());
    status |= ctx.mul(&mut left, &x, &yz);
    status |= ctx.mul(&mut xy, &x, &y);
    status |= ctx.mul(&mut xz, &x, &z);
    status |= ctx.add(&mut left_sum, &xy, &xz);
    let (mut right, mut yx, mut zx, mut right_sum) = (ctx.init(), ctx.init(), ctx.init(), ctx.init());
    status |= ctx.mul(&mut right, &yz, &x);
    status |= ctx.mul(&mut yx, &y, &x);
    status |= ctx.mul(&mut zx, &z, &x);
    status |= ctx.add(&mut right_sum, &yx, &zx);
    if !status.is_success() {
        return status;
    }
    let claim = ring(ctx);
    equal_elems(ctx, "left distributive", claim, &left, &left_sum)
        | equal_elems(ctx, "right distributive", claim, &right, &right_sum)
}

/// `sqr(x) = x x`, `mul_two(x) = x + x`, `mul_si(x, c) = x c`.
pub fn derived_products(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let c = rng.gen_range(-100i64..100);

    let (mut sqr, mut xx) = (ctx.init(), ctx.init());
    status |= ctx.sqr(&mut sqr, &x);
    status |= ctx.mul(&mut xx, &x, &x);
    let (mut two, mut xpx) = (ctx.init(), ctx.init());
    status |= ctx.mul_two(&mut two, &x);
    status |= ctx.add(&mut xpx, &x, &x);
    let (mut scaled, mut cc, mut xc) = (ctx.init(), ctx.init(), ctx.init());
    status |= ctx.mul_si(&mut scaled, &x, c);
    status |= ctx.set_si(&mut cc, c);
    status |= ctx.mul(&mut xc, &x, &cc);
    if !status.is_success() {
        return status;
    }
    let claim = ring(ctx);
    equal_elems(ctx, "sqr(x) = x x", claim, &sqr, &xx)
        | equal_elems(ctx, "mul_two(x) = x + x", claim, &two, &xpx)
        | equal_elems(ctx, "mul_si(x, c) = x c", claim, &scaled, &xc)
}

/// `addmul` and `submul` match a product followed by `add` / `sub`.
pub fn addmul_submul(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let y = sample(ctx, rng, &mut status);
    let z = sample(ctx, rng, &mut status);

    let mut xy = ctx.init();
    status |= ctx.mul(&mut xy, &x, &y);
    let (mut plus, mut minus) = (ctx.init(), ctx.init());
    status |= ctx.add(&mut plus, &z, &xy);
    status |= ctx.sub(&mut minus, &z, &xy);

    let mut fused_plus = ctx.clone_elem(&z);
    status |= ctx.addmul(&mut fused_plus, &x, &y);
    let mut fused_minus = ctx.clone_elem(&z);
    status |= ctx.submul(&mut fused_minus, &x, &y);
    if !status.is_success() {
        return status;
    }
    let claim = ring(ctx);
    equal_elems(ctx, "addmul", claim, &fused_plus, &plus) | equal_elems(ctx, "submul", claim, &fused_minus, &minus)
}

/// `(x y) / y` times `y` gives back `x y`, and so does `x / y` times `y`.
///
/// Over an integral domain `x y` is a multiple of every nonzero `y`, so
/// DOMAIN for it is a violation.
pub fn div_then_mul(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let y = sample(ctx, rng, &mut status);
    let mut p = ctx.init();
    status |= ctx.mul(&mut p, &x, &y);
    if !status.is_success() {
        return status;
    }

    let claim = ring(ctx);
    let mut outcome = Status::SUCCESS;
    for (multiple, dividend) in [(true, &p), (false, &x)] {
        let (mut q, mut back) = (ctx.init(), ctx.init());
        let status = ctx.div(&mut q, dividend, &y);
        if multiple && status == Status::DOMAIN {
            let verdict = judge(ctx, "(x y) / y exists", ctx.is_integral_domain(), ctx.is_zero(&y), || {
                format!("x = {}, y = {}", ctx.format_elem(&x), ctx.format_elem(&y))
            });
            outcome |= if verdict.is_success() { status } else { verdict };
            continue;
        }
        if !status.is_success() {
            outcome |= status;
            continue;
        }
        let status = ctx.mul(&mut back, &q, &y);
        outcome |= if status.is_success() {
            equal_elems(ctx, "(a / y) y = a", claim, &back, dividend)
        } else {
            status
        };
    }
    outcome
}

/// `x x^-1 = x^-1 x = 1` and `(x^-1)^-1 = x` for units.
pub fn inv_laws(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let mut xi = ctx.init();
    status |= ctx.inv(&mut xi, &x);
    if !status.is_success() {
        return status;
    }
    let (mut right, mut left, mut xii) = (ctx.init(), ctx.init(), ctx.init());
    let status = ctx.mul(&mut right, &x, &xi) | ctx.mul(&mut left, &xi, &x) | ctx.inv(&mut xii, &xi);
    if !status.is_success() {
        return status;
    }
    let claim = ring(ctx);
    let show = || format!("x = {}, inv(x) = {}", ctx.format_elem(&x), ctx.format_elem(&xi));
    judge(ctx, "x inv(x) = 1", claim, ctx.is_one(&right), show)
        | judge(ctx, "inv(x) x = 1", claim, ctx.is_one(&left), show)
        | equal_elems(ctx, "inv(inv(x)) = x", claim, &xii, &x)
}

/// `is_invertible` agrees with the outcome of `inv`.
pub fn invertible_matches_inv(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    if !status.is_success() {
        return status;
    }
    let predicate = ctx.is_invertible(&x);
    let mut xi = ctx.init();
    let computed = ctx.inv(&mut xi, &x);
    if computed.has_unable() || predicate.is_unknown() {
        return Status::UNABLE;
    }
    let agrees = match predicate {
        Truth::True => computed.is_success(),
        _ => computed == Status::DOMAIN,
    };
    judge(ctx, "is_invertible agrees with inv", ring(ctx), Truth::from(agrees), || {
        format!("x = {}, is_invertible = {predicate}, inv = {computed}", ctx.format_elem(&x))
    })
}

fn exponent_bound(ctx: &dyn Structure) -> u64 {
    if ctx.is_finite().is_true() {
        1000
    } else {
        6
    }
}

/// `x^a x^b = x^(a + b)` through `pow_ui` and `pow_int`; finite
/// structures also get exponents beyond 64 bits.
pub fn pow_exponent_law(ctx: &dyn Structure, rng: &mut ChaCha8Rng, flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let bound = exponent_bound(ctx);
    let a = rng.gen_range(0..bound);
    let b = rng.gen_range(0..bound);

    let (mut xa, mut xb, mut prod, mut xab, mut via_int) = (ctx.init(), ctx.init(), ctx.init(), ctx.init(), ctx.init());
    status |= ctx.pow_ui(&mut xa, &x, a);
    status |= ctx.pow_ui(&mut xb, &x, b);
    status |= ctx.mul(&mut prod, &xa, &xb);
    status |= ctx.pow_ui(&mut xab, &x, a + b);
    status |= ctx.pow_int(&mut via_int, &x, &IBig::from(a + b));
    if !status.is_success() {
        return status;
    }
    let claim = ring(ctx);
    let mut verdict = equal_elems(ctx, "x^a x^b = x^(a+b)", claim, &prod, &xab)
        | equal_elems(ctx, "pow_int = pow_ui", claim, &via_int, &xab);

    if ctx.is_finite().is_true() {
        let big = IBig::from(1u128 << 70);
        let (mut x_big, mut x_big_a, mut split) = (ctx.init(), ctx.init(), ctx.init());
        let mut status = ctx.pow_int(&mut x_big, &x, &big);
        status |= ctx.pow_int(&mut x_big_a, &x, &(big + IBig::from(a)));
        status |= ctx.mul(&mut split, &x_big, &xa);
        if flags.contains(TestFlags::VERBOSE) {
            tracing::debug!(structure = %ctx.name(), a, %status, "pow_int beyond 64 bits");
        }
        verdict |= if status.is_success() {
            equal_elems(ctx, "x^(2^70 + a) = x^(2^70) x^a", claim, &x_big_a, &split)
        } else {
            status
        };
    }
    verdict
}

/// `pow_si` agrees with `pow_ui` and inverts for negative exponents.
pub fn pow_si_law(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let e = rng.gen_range(-4i64..=4);
    let (mut signed, mut unsigned) = (ctx.init(), ctx.init());
    status |= ctx.pow_ui(&mut unsigned, &x, e.unsigned_abs());
    if !status.is_success() {
        return status;
    }
    let status = ctx.pow_si(&mut signed, &x, e);
    if !status.is_success() {
        return status;
    }

    let claim = ring(ctx);
    if e >= 0 {
        return equal_elems(ctx, "pow_si = pow_ui", claim, &signed, &unsigned);
    }
    let mut prod = ctx.init();
    let status = ctx.mul(&mut prod, &signed, &unsigned);
    if !status.is_success() {
        return status;
    }
    judge(ctx, "x^-e x^e = 1", claim, ctx.is_one(&prod), || {
        format!("x = {}, e = {e}, product = {}", ctx.format_elem(&x), ctx.format_elem(&prod))
    })
}

/// `cmp` is antisymmetric, reflexive and translation invariant.
pub fn cmp_antisymmetry(ctx: &dyn Structure, rng: &mut ChaCha8Rng, _flags: TestFlags) -> Status {
    let mut status = Status::SUCCESS;
    let x = sample(ctx, rng, &mut status);
    let y = sample(ctx, rng, &mut status);
    let z = sample(ctx, rng, &mut status);
    let (mut xy, mut yx, mut xx, mut shifted) = (Ordering::Equal, Ordering::Equal, Ordering::Less, Ordering::Equal);
    status |= ctx.cmp(&mut xy, &x, &y);
    status |= ctx.cmp(&mut yx, &y, &x);
    status |= ctx.cmp(&mut xx, &x, &x);
    let (mut xz, mut yz) = (ctx.init(), ctx.init());
    status |= ctx.add(&mut xz, &x, &z);
    status |= ctx.add(&mut yz, &y, &z);
    status |= ctx.cmp(&mut shifted, &xz, &yz);
    if !status.is_success() {
        return status;
    }
    let claim = ordered(ctx);
    let show = || format!("x = {}, y = {}, z = {}", ctx.format_elem(&x), ctx.format_elem(&y), ctx.format_elem(&z));
    judge(ctx, "cmp antisymmetric", claim, Truth::from(xy == yx.reverse()), show)
        | judge(ctx, "cmp reflexive", claim, Truth::from(xx == Ordering::Equal), show)
        | judge(ctx, "cmp translation invariant", claim, Truth::from(shifted == xy), show)
}
