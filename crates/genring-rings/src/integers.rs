//! The ring of integers Z.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use dashu::base::Gcd;
use dashu::integer::IBig;
use rand::{Rng, RngCore};

use genring_core::{Elem, Status, Structure, Truth};

use crate::random_ibig;

/// The ring of integers, with arbitrary precision `dashu` elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntegerRing;

impl IntegerRing {
    /// Creates the ring of integers.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the value of an element.
    #[must_use]
    pub fn value(x: &Elem) -> &IBig {
        x.payload::<IBig>()
    }

    fn put(res: &mut Elem, v: IBig) -> Status {
        *res.payload_mut::<IBig>() = v;
        Status::SUCCESS
    }
}

impl Structure for IntegerRing {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> String {
        "Integer ring (ZZ)".to_string()
    }

    fn elem_size(&self) -> usize {
        std::mem::size_of::<IBig>()
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
        Truth::False
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
        Elem::new(IBig::ZERO)
    }

    fn set(&self, res: &mut Elem, x: &Elem) -> Status {
        Self::put(res, Self::value(x).clone())
    }

    fn randtest(&self, res: &mut Elem, rng: &mut dyn RngCore) -> Status {
        let v = if rng.gen_bool(0.5) {
            IBig::from(rng.gen_range(-10i64..=10))
        } else {
            let bits = rng.gen_range(1..=200);
            random_ibig(rng, bits)
        };
        Self::put(res, v)
    }

    fn write(&self, out: &mut dyn fmt::Write, x: &Elem) -> Status {
        Status::check(write!(out, "{}", Self::value(x)).is_ok(), Status::UNABLE)
    }

    fn set_si(&self, res: &mut Elem, v: i64) -> Status {
        Self::put(res, IBig::from(v))
    }

    fn set_ui(&self, res: &mut Elem, v: u64) -> Status {
        Self::put(res, IBig::from(v))
    }

    fn set_int(&self, res: &mut Elem, v: &IBig) -> Status {
        Self::put(res, v.clone())
    }

    fn get_int(&self, res: &mut IBig, x: &Elem) -> Status {
        *res = Self::value(x).clone();
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

    fn is_neg_one(&self, x: &Elem) -> Truth {
        Truth::from(*Self::value(x) == IBig::NEG_ONE)
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

    fn mul_si(&self, res: &mut Elem, x: &Elem, c: i64) -> Status {
        Self::put(res, Self::value(x) * IBig::from(c))
    }

    fn add_si(&self, res: &mut Elem, x: &Elem, c: i64) -> Status {
        Self::put(res, Self::value(x) + IBig::from(c))
    }

    fn add_assign(&self, res: &mut Elem, x: &Elem) -> Status {
        *res.payload_mut::<IBig>() += Self::value(x);
        Status::SUCCESS
    }

    fn sub_assign(&self, res: &mut Elem, x: &Elem) -> Status {
        *res.payload_mut::<IBig>() -= Self::value(x);
        Status::SUCCESS
    }

    fn div(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        let (a, b) = (Self::value(x), Self::value(y));
        if b.is_zero() {
            return Status::DOMAIN;
        }
        let r = a % b;
        if !r.is_zero() {
            return Status::DOMAIN;
        }
        Self::put(res, a / b)
    }

    fn divexact(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        let b = Self::value(y);
        if b.is_zero() {
            return Status::DOMAIN;
        }
        Self::put(res, Self::value(x) / b)
    }

    fn inv(&self, res: &mut Elem, x: &Elem) -> Status {
        let a = Self::value(x);
        if a.is_one() || *a == IBig::NEG_ONE {
            Self::put(res, a.clone())
        } else {
            Status::DOMAIN
        }
    }

    fn is_invertible(&self, x: &Elem) -> Truth {
        let a = Self::value(x);
        Truth::from(a.is_one() || *a == IBig::NEG_ONE)
    }

    fn pow_ui(&self, res: &mut Elem, x: &Elem, e: u64) -> Status {
        let a = Self::value(x);
        if a.is_zero() || a.is_one() {
            let v = if e == 0 { IBig::ONE } else { a.clone() };
            return Self::put(res, v);
        }
        if *a == IBig::NEG_ONE {
            let v = if e % 2 == 0 { IBig::ONE } else { IBig::NEG_ONE };
            return Self::put(res, v);
        }
        match usize::try_from(e) {
            Ok(e) => Self::put(res, a.pow(e)),
            Err(_) => Status::UNABLE,
        }
    }

    fn gcd(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        let g = Self::value(x).clone().gcd(Self::value(y).clone());
        Self::put(res, IBig::from(g))
    }
}
