//! The field of rational numbers Q.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use dashu::base::UnsignedAbs;
use dashu::integer::{IBig, UBig};
use dashu::rational::RBig;
use rand::{Rng, RngCore};

use genring_core::{Elem, Status, Structure, Truth};

use crate::random_ibig;

/// The rational field, elements kept in lowest terms by `dashu`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RationalField;

impl RationalField {
    /// Creates the rational field.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the value of an element.
    #[must_use]
    pub fn value(x: &Elem) -> &RBig {
        x.payload::<RBig>()
    }

    fn put(res: &mut Elem, v: RBig) -> Status {
        *res.payload_mut::<RBig>() = v;
        Status::SUCCESS
    }
}

impl Structure for RationalField {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> String {
        "Rational field (QQ)".to_string()
    }

    fn elem_size(&self) -> usize {
        std::mem::size_of::<RBig>()
    }

    fn same_as(&self, other: &dyn Structure) -> bool {
        other.as_any().is::<Self>()
    }

    fn is_ring(&self) -> Truth {
        Truth::True
    }

    fn is_commutative_ring(&self) -> Truth {
        Truth::True
    }

    fn is_integral_domain(&self) -> Truth {
        Truth::True
    }

    fn is_field(&self) -> Truth {
        Truth::True
    }

    fn is_unique_factorization_domain(&self) -> Truth {
        Truth::True
    }

    fn is_finite(&self) -> Truth {
        Truth::False
    }

    fn is_finite_characteristic(&self) -> Truth {
        Truth::False
    }

    fn is_exact(&self) -> Truth {
        Truth::True
    }

    fn is_canonical(&self) -> Truth {
        Truth::True
    }

    fn is_ordered_ring(&self) -> Truth {
        Truth::True
    }

    fn is_zero_ring(&self) -> Truth {
        Truth::False
    }

    fn is_threadsafe(&self) -> Truth {
        Truth::True
    }

    fn characteristic(&self, res: &mut IBig) -> Status {
        *res = IBig::ZERO;
        Status::SUCCESS
    }

    fn cardinality(&self, _res: &mut IBig) -> Status {
        Status::DOMAIN
    }

    fn init(&self) -> Elem {
        Elem::new(RBig::ZERO)
    }

    fn set(&self, res: &mut Elem, x: &Elem) -> Status {
        Self::put(res, Self::value(x).clone())
    }

    fn randtest(&self, res: &mut Elem, rng: &mut dyn RngCore) -> Status {
        let (num, den) = if rng.gen_bool(0.5) {
            (IBig::from(rng.gen_range(-10i64..=10)), UBig::from(rng.gen_range(1u64..=6)))
        } else {
            let (num_bits, den_bits) = (rng.gen_range(1..=100), rng.gen_range(1..=100));
            let num = random_ibig(rng, num_bits);
            let den = random_ibig(rng, den_bits).unsigned_abs() + UBig::ONE;
            (num, den)
        };
        Self::put(res, RBig::from_parts(num, den))
    }

    fn write(&self, out: &mut dyn fmt::Write, x: &Elem) -> Status {
        Status::check(write!(out, "{}", Self::value(x)).is_ok(), Status::UNABLE)
    }

    fn set_si(&self, res: &mut Elem, v: i64) -> Status {
        Self::put(res, RBig::from(IBig::from(v)))
    }

    fn set_ui(&self, res: &mut Elem, v: u64) -> Status {
        Self::put(res, RBig::from(IBig::from(v)))
    }

    fn set_int(&self, res: &mut Elem, v: &IBig) -> Status {
        Self::put(res, RBig::from(v.clone()))
    }

    fn get_int(&self, res: &mut IBig, x: &Elem) -> Status {
        let q = Self::value(x);
        if !q.denominator().is_one() {
            return Status::DOMAIN;
        }
        *res = q.numerator().clone();
        Status::SUCCESS
    }

    fn get_fraction(&self, num: &mut IBig, den: &mut IBig, x: &Elem) -> Status {
        let q = Self::value(x);
        *num = q.numerator().clone();
        *den = IBig::from(q.denominator().clone());
        Status::SUCCESS
    }

    fn equal(&self, x: &Elem, y: &Elem) -> Truth {
        Truth::from(Self::value(x) == Self::value(y))
    }

    fn is_zero(&self, x: &Elem) -> Truth {
        Truth::from(Self::value(x).is_zero())
    }

    fn is_one(&self, x: &Elem) -> Truth {
        Truth::from(Self::value(x).is_one())
    }

    fn cmp(&self, res: &mut Ordering, x: &Elem, y: &Elem) -> Status {
        *res = Self::value(x).cmp(Self::value(y));
        Status::SUCCESS
    }

    fn add(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        Self::put(res, Self::value(x) + Self::value(y))
    }

    fn sub(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        Self::put(res, Self::value(x) - Self::value(y))
    }

    fn neg(&self, res: &mut Elem, x: &Elem) -> Status {
        Self::put(res, -Self::value(x))
    }

    fn mul(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        Self::put(res, Self::value(x) * Self::value(y))
    }

    fn div(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        let b = Self::value(y);
        if b.is_zero() {
            return Status::DOMAIN;
        }
        Self::put(res, Self::value(x) / b)
    }

    fn divexact(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        self.div(res, x, y)
    }

    fn inv(&self, res: &mut Elem, x: &Elem) -> Status {
        let a = Self::value(x);
        if a.is_zero() {
            return Status::DOMAIN;
        }
        Self::put(res, RBig::ONE / a)
    }

    fn is_invertible(&self, x: &Elem) -> Truth {
        Truth::from(!Self::value(x).is_zero())
    }
}
