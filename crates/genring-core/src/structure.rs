//! The runtime structure interface.
//!
//! A [`Structure`] describes one concrete algebraic structure instance to
//! the generic algorithms: how to create elements, which capabilities it
//! claims, and how to compute with its elements. The trait's vtable is the
//! per-kind method table: it is built once by the compiler for each
//! implementing type and shared by every instance of that kind.
//!
//! Slots fall into three groups:
//!
//! - required slots every plugin must provide (`init`, `set`, `add`, ...)
//! - slots with a generic fallback written in terms of other slots
//!   (`sub` from `neg` + `add`, `sqr` from `mul`, `pow_ui` by binary
//!   exponentiation, ...)
//! - slots without a generic formula, which report `UNABLE` by default
//!   (`gcd`, `cmp`, `gen`, ...)
//!
//! All element operations write their result into a caller-provided
//! output element and return a [`Status`]; predicates return a [`Truth`].

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use dashu::base::{BitTest, UnsignedAbs};
use dashu::integer::{IBig, UBig};
use rand::RngCore;

use crate::method::{unimplemented, Method};
use crate::{reduce, Elem, Status, Truth};

/// A shared handle to a structure chosen at run time.
pub type Ctx = Arc<dyn Structure>;

/// A concrete algebraic structure, selected at run time.
pub trait Structure: Send + Sync + fmt::Debug {
    // ------------------------------------------------------------------
    // Descriptor
    // ------------------------------------------------------------------

    /// Upcast used for compatibility checks between structure instances.
    fn as_any(&self) -> &dyn Any;

    /// Human readable description, e.g. `Integers mod 7`.
    fn name(&self) -> String;

    /// Size in bytes of the element payload.
    fn elem_size(&self) -> usize;

    /// Returns true if `other` describes the same structure instance,
    /// so that elements of one may be used with the other.
    fn same_as(&self, other: &dyn Structure) -> bool;

    // ------------------------------------------------------------------
    // Capabilities
    // ------------------------------------------------------------------

    /// The structure is a (unital, associative) ring.
    fn is_ring(&self) -> Truth {
        Truth::Unknown
    }

    /// The structure is a commutative ring.
    fn is_commutative_ring(&self) -> Truth {
        Truth::Unknown
    }

    /// The structure is an integral domain.
    fn is_integral_domain(&self) -> Truth {
        Truth::Unknown
    }

    /// The structure is a field.
    fn is_field(&self) -> Truth {
        Truth::Unknown
    }

    /// The structure is a unique factorization domain.
    fn is_unique_factorization_domain(&self) -> Truth {
        Truth::Unknown
    }

    /// The structure has finitely many elements.
    fn is_finite(&self) -> Truth {
        Truth::Unknown
    }

    /// The structure has positive characteristic.
    fn is_finite_characteristic(&self) -> Truth {
        Truth::Unknown
    }

    /// Elements are represented exactly.
    fn is_exact(&self) -> Truth {
        Truth::Unknown
    }

    /// Equal elements have identical representations.
    fn is_canonical(&self) -> Truth {
        Truth::Unknown
    }

    /// The structure is an ordered ring and `cmp` is meaningful.
    fn is_ordered_ring(&self) -> Truth {
        Truth::Unknown
    }

    /// The structure is the zero ring (0 = 1).
    fn is_zero_ring(&self) -> Truth {
        let one = self.elem_from_si(1);
        self.is_zero(&one)
    }

    /// Distinct elements of this structure may be used concurrently
    /// from several threads.
    fn is_threadsafe(&self) -> Truth {
        Truth::False
    }

    /// Writes the characteristic into `res`.
    fn characteristic(&self, res: &mut IBig) -> Status {
        let _ = res;
        unimplemented(Method::Characteristic, &self.name())
    }

    /// Writes the number of elements into `res`; DOMAIN if infinite.
    fn cardinality(&self, res: &mut IBig) -> Status {
        let _ = res;
        unimplemented(Method::Cardinality, &self.name())
    }

    // ------------------------------------------------------------------
    // Element lifecycle and conversions
    // ------------------------------------------------------------------

    /// Creates a new element holding zero.
    fn init(&self) -> Elem;

    /// Sets `res` to a copy of `x`.
    fn set(&self, res: &mut Elem, x: &Elem) -> Status;

    /// Sets `res` to a pseudo-random element, biased towards edge cases.
    fn randtest(&self, res: &mut Elem, rng: &mut dyn RngCore) -> Status;

    /// Writes a textual representation of `x`.
    fn write(&self, out: &mut dyn fmt::Write, x: &Elem) -> Status;

    /// Sets `res` to the image of the integer `v`.
    fn set_si(&self, res: &mut Elem, v: i64) -> Status;

    /// Sets `res` to the image of the integer `v`.
    fn set_ui(&self, res: &mut Elem, v: u64) -> Status {
        match i64::try_from(v) {
            Ok(v) => self.set_si(res, v),
            Err(_) => self.set_int(res, &IBig::from(v)),
        }
    }

    /// Sets `res` to the image of the integer `v`.
    ///
    /// The generic version evaluates the base 2^32 expansion of `v`
    /// with `mul` and `add`.
    fn set_int(&self, res: &mut Elem, v: &IBig) -> Status {
        if let Ok(small) = i64::try_from(v.clone()) {
            return self.set_si(res, small);
        }

        let mut digits = Vec::new();
        let mut mag: UBig = v.clone().unsigned_abs();
        let radix = UBig::from(1u64 << 32);
        while !mag.is_zero() {
            let d = &mag % &radix;
            digits.push(u64::try_from(d).unwrap_or_default());
            mag >>= 32;
        }

        let mut status = Status::SUCCESS;
        let mut b = self.init();
        let mut t = self.init();
        status |= self.set_si(&mut b, 1i64 << 32);
        status |= self.zero(res);
        for &d in digits.iter().rev() {
            status |= self.mul(&mut t, res, &b);
            status |= self.add_si(res, &t, d as i64);
        }
        if *v < IBig::ZERO {
            status |= self.neg_assign(res);
        }
        status
    }

    /// Converts `x`, an element of `x_ctx`, into this structure.
    ///
    /// Returns DOMAIN if the value has no image here (e.g. 1/2 into the
    /// integers), UNABLE if no conversion between the structures is known.
    fn set_other(&self, res: &mut Elem, x: &Elem, x_ctx: &dyn Structure) -> Status {
        if self.same_as(x_ctx) {
            return self.set(res, x);
        }

        // Unless the source has characteristic zero, values only map to
        // structures of the same characteristic, and both must report it.
        if !x_ctx.is_finite_characteristic().is_false() {
            let mut ours = IBig::ZERO;
            let mut theirs = IBig::ZERO;
            let status = self.characteristic(&mut ours) | x_ctx.characteristic(&mut theirs);
            if !status.is_success() {
                return Status::UNABLE;
            }
            if ours != theirs {
                return Status::DOMAIN;
            }
        }

        let mut num = IBig::ZERO;
        let mut den = IBig::ONE;
        let status = x_ctx.get_fraction(&mut num, &mut den, x);
        if !status.is_success() {
            return status;
        }

        let mut status = self.set_int(res, &num);
        if den != IBig::ONE {
            let mut d = self.init();
            let mut n = self.init();
            status |= self.set_int(&mut d, &den);
            std::mem::swap(&mut n, res);
            status |= self.div(res, &n, &d);
        }
        status
    }

    /// Writes `x` into `res` if it is an integer.
    fn get_int(&self, res: &mut IBig, x: &Elem) -> Status {
        let _ = (res, x);
        unimplemented(Method::GetInt, &self.name())
    }

    /// Writes `x` as a reduced fraction `num / den` with `den > 0`.
    fn get_fraction(&self, num: &mut IBig, den: &mut IBig, x: &Elem) -> Status {
        let status = self.get_int(num, x);
        if status.is_success() {
            *den = IBig::ONE;
        }
        status
    }

    /// Sets `res` to zero.
    fn zero(&self, res: &mut Elem) -> Status {
        self.set_si(res, 0)
    }

    /// Sets `res` to one.
    fn one(&self, res: &mut Elem) -> Status {
        self.set_si(res, 1)
    }

    /// Sets `res` to minus one.
    fn neg_one(&self, res: &mut Elem) -> Status {
        self.set_si(res, -1)
    }

    /// Sets `res` to the distinguished generator (e.g. `x` in a
    /// polynomial ring).
    fn gen(&self, res: &mut Elem) -> Status {
        let _ = res;
        unimplemented(Method::Gen, &self.name())
    }

    /// Returns a copy of `x`.
    fn clone_elem(&self, x: &Elem) -> Elem {
        let mut res = self.init();
        let status = self.set(&mut res, x);
        debug_assert!(status.is_success(), "set failed: {status}");
        res
    }

    /// Returns a new element holding the image of `v`.
    fn elem_from_si(&self, v: i64) -> Elem {
        let mut res = self.init();
        let status = self.set_si(&mut res, v);
        debug_assert!(status.is_success(), "set_si failed: {status}");
        res
    }

    /// Renders `x` as a string.
    fn format_elem(&self, x: &Elem) -> String {
        let mut s = String::new();
        if !self.write(&mut s, x).is_success() {
            s.push_str("<?>");
        }
        s
    }

    // ------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------

    /// Tests `x == y`.
    fn equal(&self, x: &Elem, y: &Elem) -> Truth;

    /// Tests `x == 0`.
    fn is_zero(&self, x: &Elem) -> Truth {
        let t = self.init();
        self.equal(x, &t)
    }

    /// Tests `x == 1`.
    fn is_one(&self, x: &Elem) -> Truth {
        let mut t = self.init();
        if !self.one(&mut t).is_success() {
            return Truth::Unknown;
        }
        self.equal(x, &t)
    }

    /// Tests `x == -1`.
    fn is_neg_one(&self, x: &Elem) -> Truth {
        let mut t = self.init();
        if !self.neg_one(&mut t).is_success() {
            return Truth::Unknown;
        }
        self.equal(x, &t)
    }

    /// Writes the ordering of `x` and `y` into `res`.
    fn cmp(&self, res: &mut Ordering, x: &Elem, y: &Elem) -> Status {
        let _ = (res, x, y);
        unimplemented(Method::Cmp, &self.name())
    }

    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    /// `res = x + y`.
    fn add(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status;

    /// `res = -x`.
    fn neg(&self, res: &mut Elem, x: &Elem) -> Status;

    /// `res = x * y`.
    fn mul(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status;

    /// `res = x - y`.
    fn sub(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        let mut t = self.init();
        let status = self.neg(&mut t, y);
        status | self.add(res, x, &t)
    }

    /// `res = x * x`.
    fn sqr(&self, res: &mut Elem, x: &Elem) -> Status {
        self.mul(res, x, x)
    }

    /// `res = 2 * x`.
    fn mul_two(&self, res: &mut Elem, x: &Elem) -> Status {
        self.add(res, x, x)
    }

    /// `res = x * c`.
    fn mul_si(&self, res: &mut Elem, x: &Elem, c: i64) -> Status {
        let mut t = self.init();
        let status = self.set_si(&mut t, c);
        status | self.mul(res, x, &t)
    }

    /// `res = x * c`.
    fn mul_ui(&self, res: &mut Elem, x: &Elem, c: u64) -> Status {
        let mut t = self.init();
        let status = self.set_ui(&mut t, c);
        status | self.mul(res, x, &t)
    }

    /// `res = x + c`.
    fn add_si(&self, res: &mut Elem, x: &Elem, c: i64) -> Status {
        let mut t = self.init();
        let status = self.set_si(&mut t, c);
        status | self.add(res, x, &t)
    }

    /// `res = x - c`.
    fn sub_si(&self, res: &mut Elem, x: &Elem, c: i64) -> Status {
        let mut t = self.init();
        let status = self.set_si(&mut t, c);
        status | self.sub(res, x, &t)
    }

    /// `res = res + x`.
    fn add_assign(&self, res: &mut Elem, x: &Elem) -> Status {
        let mut t = self.init();
        std::mem::swap(&mut t, res);
        self.add(res, &t, x)
    }

    /// `res = res - x`.
    fn sub_assign(&self, res: &mut Elem, x: &Elem) -> Status {
        let mut t = self.init();
        std::mem::swap(&mut t, res);
        self.sub(res, &t, x)
    }

    /// `res = res * x`.
    fn mul_assign(&self, res: &mut Elem, x: &Elem) -> Status {
        let mut t = self.init();
        std::mem::swap(&mut t, res);
        self.mul(res, &t, x)
    }

    /// `res = -res`.
    fn neg_assign(&self, res: &mut Elem) -> Status {
        let mut t = self.init();
        std::mem::swap(&mut t, res);
        self.neg(res, &t)
    }

    /// `res = res + x * y`.
    fn addmul(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        let mut t = self.init();
        let status = self.mul(&mut t, x, y);
        status | self.add_assign(res, &t)
    }

    /// `res = res - x * y`.
    fn submul(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        let mut t = self.init();
        let status = self.mul(&mut t, x, y);
        status | self.sub_assign(res, &t)
    }

    /// `res = x / y`.
    ///
    /// The generic version computes `x * y^-1` in fields and reports
    /// UNABLE elsewhere; rings with exact division override it.
    fn div(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        match self.is_field() {
            Truth::True => {
                let mut t = self.init();
                let status = self.inv(&mut t, y);
                if !status.is_success() {
                    return status;
                }
                self.mul(res, x, &t)
            }
            _ => unimplemented(Method::Div, &self.name()),
        }
    }

    /// `res = x / y`, where the division is known to be exact.
    fn divexact(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        self.div(res, x, y)
    }

    /// `res = x^-1`.
    ///
    /// The generic version only handles units that are recognisable
    /// without a division algorithm (±1) and zero.
    fn inv(&self, res: &mut Elem, x: &Elem) -> Status {
        if self.is_one(x).is_true() {
            return self.one(res);
        }
        if self.is_neg_one(x).is_true() {
            return self.neg_one(res);
        }
        if self.is_zero(x).is_true() && self.is_zero_ring().is_false() {
            return Status::DOMAIN;
        }
        unimplemented(Method::Inv, &self.name())
    }

    /// Tests whether `x` is a unit.
    fn is_invertible(&self, x: &Elem) -> Truth {
        let mut t = self.init();
        let status = self.inv(&mut t, x);
        if status.is_success() {
            Truth::True
        } else if status == Status::DOMAIN {
            Truth::False
        } else {
            Truth::Unknown
        }
    }

    /// `res = x^e` by left-to-right binary exponentiation.
    fn pow_ui(&self, res: &mut Elem, x: &Elem, e: u64) -> Status {
        if e == 0 {
            return self.one(res);
        }
        if e == 1 {
            return self.set(res, x);
        }
        if e == 2 {
            return self.sqr(res, x);
        }

        let mut status = self.set(res, x);
        let mut t = self.init();
        let top = 63 - e.leading_zeros();
        for bit in (0..top).rev() {
            status |= self.sqr(&mut t, res);
            if (e >> bit) & 1 == 1 {
                status |= self.mul(res, &t, x);
            } else {
                std::mem::swap(res, &mut t);
            }
        }
        status
    }

    /// `res = x^e`; negative exponents invert first.
    fn pow_si(&self, res: &mut Elem, x: &Elem, e: i64) -> Status {
        if e >= 0 {
            return self.pow_ui(res, x, e.unsigned_abs());
        }
        let mut t = self.init();
        let status = self.inv(&mut t, x);
        if !status.is_success() {
            return status;
        }
        self.pow_ui(res, &t, e.unsigned_abs())
    }

    /// `res = x^e` for an arbitrary precision exponent.
    fn pow_int(&self, res: &mut Elem, x: &Elem, e: &IBig) -> Status {
        if let Ok(small) = i64::try_from(e.clone()) {
            return self.pow_si(res, x, small);
        }

        let mut status = Status::SUCCESS;
        let mut base = self.init();
        if *e < IBig::ZERO {
            status |= self.inv(&mut base, x);
            if !status.is_success() {
                return status;
            }
        } else {
            status |= self.set(&mut base, x);
        }

        let mag: UBig = e.clone().unsigned_abs();
        let mut t = self.init();
        status |= self.set(res, &base);
        for bit in (0..mag.bit_len() - 1).rev() {
            status |= self.sqr(&mut t, res);
            if mag.bit(bit) {
                status |= self.mul(res, &t, &base);
            } else {
                std::mem::swap(res, &mut t);
            }
        }
        status
    }

    /// `res = gcd(x, y)`.
    fn gcd(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        let _ = (res, x, y);
        unimplemented(Method::Gcd, &self.name())
    }

    // ------------------------------------------------------------------
    // Vector slots
    // ------------------------------------------------------------------

    /// `res = v[0] + ... + v[n-1]`; zero for an empty slice.
    fn vec_sum(&self, res: &mut Elem, v: &[Elem]) -> Status {
        reduce::sum_bsplit(self, res, v, reduce::ReduceConfig::default().basecase_cutoff)
    }

    /// `res = v[0] * ... * v[n-1]`; one for an empty slice.
    fn vec_product(&self, res: &mut Elem, v: &[Elem]) -> Status {
        reduce::product_bsplit(self, res, v, reduce::ReduceConfig::default().basecase_cutoff)
    }

    /// `res = initial ± sum(a[i] * b[i])`. DOMAIN if lengths differ.
    fn vec_dot(
        &self,
        res: &mut Elem,
        initial: Option<&Elem>,
        subtract: bool,
        a: &[Elem],
        b: &[Elem],
    ) -> Status {
        if a.len() != b.len() {
            return Status::DOMAIN;
        }

        let mut status = match initial {
            Some(s) => self.set(res, s),
            None => self.zero(res),
        };
        let mut t = self.init();
        for (x, y) in a.iter().zip(b) {
            status |= self.mul(&mut t, x, y);
            status |= if subtract {
                self.sub_assign(res, &t)
            } else {
                self.add_assign(res, &t)
            };
        }
        status
    }
}

impl fmt::Display for dyn Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_ring::Zn;

    #[test]
    fn test_generic_sub_and_pow() {
        let r = Zn::new(7);
        let a = r.elem_from_si(3);
        let b = r.elem_from_si(5);
        let mut c = r.init();

        assert!(r.sub(&mut c, &a, &b).is_success());
        assert_eq!(r.value(&c), 5);

        assert!(r.pow_ui(&mut c, &a, 6).is_success());
        assert_eq!(r.value(&c), 1);

        assert!(r.pow_ui(&mut c, &a, 0).is_success());
        assert!(r.is_one(&c).is_true());
    }

    #[test]
    fn test_generic_pow_int_matches_pow_ui() {
        let r = Zn::new(1_000_003);
        let a = r.elem_from_si(12345);
        let big = IBig::from(1u64 << 40) * IBig::from(3) + IBig::from(7);
        let mut x = r.init();
        let mut y = r.init();
        let mut s = r.pow_int(&mut x, &a, &big);
        s |= r.pow_ui(&mut y, &a, (1u64 << 40) * 3 + 7);
        assert!(s.is_success());
        assert!(r.equal(&x, &y).is_true());
    }

    #[test]
    fn test_generic_set_int_large() {
        let r = Zn::new(1_000_003);
        let big = IBig::from(u64::MAX) * IBig::from(u64::MAX) + IBig::from(5);
        let expected = (big.clone() % IBig::from(1_000_003u64)).unsigned_abs();
        let mut x = r.init();
        assert!(r.set_int(&mut x, &big).is_success());
        assert_eq!(UBig::from(r.value(&x)), expected);

        let mut y = r.init();
        assert!(r.set_int(&mut y, &(-big)).is_success());
        let mut z = r.init();
        assert!(r.add(&mut z, &x, &y).is_success());
        assert!(r.is_zero(&z).is_true());
    }

    #[test]
    fn test_generic_inv_and_div() {
        let r = Zn::new(6);
        let mut c = r.init();
        // Zn only recognises ±1 through the generic inverse.
        assert_eq!(r.inv(&mut c, &r.elem_from_si(5)), Status::SUCCESS);
        assert_eq!(r.value(&c), 5);
        assert_eq!(r.inv(&mut c, &r.elem_from_si(0)), Status::DOMAIN);
        assert_eq!(r.inv(&mut c, &r.elem_from_si(2)), Status::UNABLE);
        assert!(r.is_invertible(&r.elem_from_si(2)).is_unknown());
        assert_eq!(r.div(&mut c, &r.elem_from_si(1), &r.elem_from_si(5)), Status::UNABLE);
    }

    #[test]
    fn test_vec_dot_default() {
        let r = Zn::new(11);
        let a: Vec<Elem> = [1, 2, 3].iter().map(|&v| r.elem_from_si(v)).collect();
        let b: Vec<Elem> = [4, 5, 6].iter().map(|&v| r.elem_from_si(v)).collect();
        let mut res = r.init();
        assert!(r.vec_dot(&mut res, None, false, &a, &b).is_success());
        assert_eq!(r.value(&res), 32 % 11);

        let init = r.elem_from_si(1);
        assert!(r.vec_dot(&mut res, Some(&init), true, &a, &b).is_success());
        assert_eq!(r.value(&res), (1 + 11 * 3 - 32) as u64 % 11);

        assert_eq!(r.vec_dot(&mut res, None, false, &a, &b[..2]), Status::DOMAIN);
    }

    #[test]
    fn test_in_place_variants() {
        let r = Zn::new(13);
        let mut x = r.elem_from_si(4);
        let y = r.elem_from_si(10);
        assert!(r.add_assign(&mut x, &y).is_success());
        assert_eq!(r.value(&x), 1);
        assert!(r.mul_assign(&mut x, &y).is_success());
        assert_eq!(r.value(&x), 10);
        assert!(r.neg_assign(&mut x).is_success());
        assert_eq!(r.value(&x), 3);
        assert!(r.submul(&mut x, &y, &y).is_success());
        assert_eq!(r.value(&x), (3 + 13 * 8 - 100) as u64 % 13);
    }

    #[test]
    fn test_set_other_needs_matching_characteristic() {
        let a = Zn::new(7);
        let b = Zn::new(5);
        let x = b.elem_from_si(3);
        let mut y = a.init();
        // Neither side reports a characteristic, so the residue has no
        // known image.
        assert_eq!(a.set_other(&mut y, &x, &b), Status::UNABLE);
        assert!(a.set_other(&mut y, &a.elem_from_si(3), &Zn::new(7)).is_success());
        assert_eq!(a.value(&y), 3);
        assert!(a.same_as(&Zn::new(7)));
        assert!(!a.same_as(&b));
    }
}
