//! Check descriptors, capability gates and verdict helpers.
//!
//! A check runs one randomized instance of a law and returns a status.
//! Operation failures (DOMAIN, UNABLE) pass through unchanged. A law that
//! does not hold becomes TEST_FAIL when the structure claims the law's
//! capability, and UNABLE when the claim is UNKNOWN.

use rand_chacha::ChaCha8Rng;

use genring_core::{Elem, Status, Structure, Truth};

use crate::flags::TestFlags;

/// One randomized instance of a law.
pub type CheckFn = fn(&dyn Structure, &mut ChaCha8Rng, TestFlags) -> Status;

/// The capability a check depends on. FALSE skips the check.
pub type Requirement = fn(&dyn Structure) -> Truth;

/// A named check with its capability gate.
#[derive(Clone, Copy, Debug)]
pub struct Check {
    /// Name used in reports and logs.
    pub name: &'static str,
    /// Capability gate, evaluated once per run.
    pub requires: Requirement,
    /// The check itself.
    pub run: CheckFn,
}

impl Check {
    /// A check that applies to every structure.
    #[must_use]
    pub fn new(name: &'static str, run: CheckFn) -> Self {
        Self::requiring(name, always, run)
    }

    /// A check gated by a capability.
    #[must_use]
    pub fn requiring(name: &'static str, requires: Requirement, run: CheckFn) -> Self {
        Self { name, requires, run }
    }
}

/// No requirement.
#[must_use]
pub fn always(_: &dyn Structure) -> Truth {
    Truth::True
}

/// Additive group laws: rings, and exact structures such as rectangular
/// matrices that only add.
#[must_use]
pub fn additive(ctx: &dyn Structure) -> Truth {
    ctx.is_ring() | ctx.is_exact()
}

/// Associative ring laws.
#[must_use]
pub fn ring(ctx: &dyn Structure) -> Truth {
    ctx.is_ring()
}

/// Commutative ring laws.
#[must_use]
pub fn commutative(ctx: &dyn Structure) -> Truth {
    ctx.is_commutative_ring()
}

/// Field laws.
#[must_use]
pub fn field(ctx: &dyn Structure) -> Truth {
    ctx.is_field()
}

/// Ordered ring laws.
#[must_use]
pub fn ordered(ctx: &dyn Structure) -> Truth {
    ctx.is_ordered_ring()
}

/// Draws a random element, accumulating the sampling status.
pub fn sample(ctx: &dyn Structure, rng: &mut ChaCha8Rng, status: &mut Status) -> Elem {
    let mut x = ctx.init();
    *status |= ctx.randtest(&mut x, rng);
    x
}

/// Turns the outcome of one law instance into a status.
///
/// A law the structure does not claim (`claim` FALSE) never fails.
pub fn judge(
    ctx: &dyn Structure,
    law: &str,
    claim: Truth,
    holds: Truth,
    detail: impl FnOnce() -> String,
) -> Status {
    match (holds, claim) {
        (Truth::True, _) | (Truth::False, Truth::False) => Status::SUCCESS,
        (Truth::Unknown, _) | (Truth::False, Truth::Unknown) => Status::UNABLE,
        (Truth::False, Truth::True) => {
            tracing::error!(structure = %ctx.name(), law, detail = %detail(), "law violated");
            Status::TEST_FAIL
        }
    }
}

/// Judges `lhs == rhs`.
pub fn equal_elems(ctx: &dyn Structure, law: &str, claim: Truth, lhs: &Elem, rhs: &Elem) -> Status {
    judge(ctx, law, claim, ctx.equal(lhs, rhs), || {
        format!("{} != {}", ctx.format_elem(lhs), ctx.format_elem(rhs))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use genring_rings::{IntegerRing, RealFloat};

    #[test]
    fn test_judge_table() {
        let z = IntegerRing::new();
        let none = String::new;
        assert_eq!(judge(&z, "law", Truth::True, Truth::True, none), Status::SUCCESS);
        assert_eq!(judge(&z, "law", Truth::True, Truth::False, none), Status::TEST_FAIL);
        assert_eq!(judge(&z, "law", Truth::Unknown, Truth::False, none), Status::UNABLE);
        assert_eq!(judge(&z, "law", Truth::True, Truth::Unknown, none), Status::UNABLE);
        assert_eq!(judge(&z, "law", Truth::False, Truth::False, none), Status::SUCCESS);
    }

    #[test]
    fn test_gates() {
        assert!(ring(&IntegerRing::new()).is_true());
        assert!(field(&IntegerRing::new()).is_false());
        assert!(additive(&RealFloat::new()).is_unknown());
    }
}
