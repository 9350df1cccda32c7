//! Polynomial GCD over fields.
//!
//! The Euclidean algorithm needs an invertible leading coefficient at every
//! step, so bases that are known not to be fields return UNABLE. Over a
//! structure whose field property is UNKNOWN the algorithm is attempted
//! and any failed inversion propagates.

use genring_core::{Status, Structure};

use crate::div;
use crate::mul;
use crate::poly::{self, GrPoly};

fn require_field(ctx: &dyn Structure) -> Status {
    Status::check(!ctx.is_field().is_false(), Status::UNABLE)
}

/// Monic greatest common divisor. `gcd(0, 0) = 0`.
pub fn gcd(ctx: &dyn Structure, res: &mut GrPoly, a: &GrPoly, b: &GrPoly) -> Status {
    let status = require_field(ctx);
    if !status.is_success() {
        return status;
    }

    let mut p = a.clone_in(ctx);
    let mut q = b.clone_in(ctx);
    let mut r = GrPoly::new();
    let mut status = Status::SUCCESS;
    while !q.is_empty() {
        status |= div::rem(ctx, &mut r, &p, &q);
        if !status.is_success() {
            return status;
        }
        p = std::mem::replace(&mut q, std::mem::take(&mut r));
    }

    if p.is_empty() {
        return poly::zero(res);
    }
    status | div::make_monic(ctx, res, &p)
}

/// Extended GCD: `g = s a + t b` with `g` monic.
///
/// When both inputs are zero, `g`, `s` and `t` are zero.
pub fn xgcd(
    ctx: &dyn Structure,
    g: &mut GrPoly,
    s: &mut GrPoly,
    t: &mut GrPoly,
    a: &GrPoly,
    b: &GrPoly,
) -> Status {
    let status = require_field(ctx);
    if !status.is_success() {
        return status;
    }

    // Invariants: r0 = s0 a + t0 b, r1 = s1 a + t1 b.
    let mut r0 = a.clone_in(ctx);
    let mut r1 = b.clone_in(ctx);
    let (mut s0, mut s1, mut t0, mut t1) = (GrPoly::new(), GrPoly::new(), GrPoly::new(), GrPoly::new());
    let mut status = poly::one(ctx, &mut s0) | poly::one(ctx, &mut t1);

    let (mut quo, mut rem, mut prod, mut next) = (GrPoly::new(), GrPoly::new(), GrPoly::new(), GrPoly::new());
    while !r1.is_empty() {
        status |= div::divrem(ctx, &mut quo, &mut rem, &r0, &r1);
        if !status.is_success() {
            return status;
        }
        r0 = std::mem::replace(&mut r1, std::mem::take(&mut rem));

        status |= mul::mul(ctx, &mut prod, &quo, &s1);
        status |= poly::sub(ctx, &mut next, &s0, &prod);
        s0 = std::mem::replace(&mut s1, std::mem::take(&mut next));

        status |= mul::mul(ctx, &mut prod, &quo, &t1);
        status |= poly::sub(ctx, &mut next, &t0, &prod);
        t0 = std::mem::replace(&mut t1, std::mem::take(&mut next));
    }

    let Some(lead) = r0.leading() else {
        return status | poly::zero(g) | poly::zero(s) | poly::zero(t);
    };
    let mut linv = ctx.init();
    status |= ctx.inv(&mut linv, lead);
    if !status.is_success() {
        return status;
    }
    status |= poly::mul_scalar(ctx, g, &r0, &linv);
    status |= poly::mul_scalar(ctx, s, &s0, &linv);
    status |= poly::mul_scalar(ctx, t, &t0, &linv);
    status
}
