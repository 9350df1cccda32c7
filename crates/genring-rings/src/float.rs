//! Machine floating point reals.
//!
//! RR64 is the builtin example of an inexact structure. Values are
//! treated as approximations: two values count as equal only when they
//! are identical, as different only when they differ by more than a
//! relative tolerance, and as undecided in between. Capability
//! predicates that floating point violates in corner cases (associativity,
//! distributivity) report UNKNOWN so the harness abstains instead of
//! failing.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use dashu::integer::IBig;
use num_traits::ToPrimitive;
use rand::{Rng, RngCore};

use genring_core::{Elem, Status, Structure, Truth};

/// Default relative tolerance for equality decisions.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Double precision reals with tolerance-based equality.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RealFloat {
    tolerance: f64,
}

impl Default for RealFloat {
    fn default() -> Self {
        Self::new()
    }
}

impl RealFloat {
    /// Creates RR64 with the default tolerance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Creates RR64 with a custom relative tolerance.
    #[must_use]
    pub const fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Returns the relative tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the value of an element.
    #[must_use]
    pub fn value(x: &Elem) -> f64 {
        *x.payload::<f64>()
    }

    fn put(res: &mut Elem, v: f64) -> Status {
        *res.payload_mut::<f64>() = v;
        Status::SUCCESS
    }

    #[allow(clippy::float_cmp)]
    fn compare(&self, a: f64, b: f64) -> Truth {
        if a.is_nan() || b.is_nan() {
            return Truth::Unknown;
        }
        if a == b {
            return Truth::True;
        }
        let scale = a.abs().max(b.abs()).max(1.0);
        if (a - b).abs() > self.tolerance * scale {
            Truth::False
        } else {
            Truth::Unknown
        }
    }

    /// DOMAIN for an exact zero, UNABLE when too close to zero to tell.
    fn check_divisor(&self, b: f64) -> Status {
        if b == 0.0 {
            Status::DOMAIN
        } else if b.is_nan() || b.abs() <= self.tolerance {
            Status::UNABLE
        } else {
            Status::SUCCESS
        }
    }
}

impl Structure for RealFloat {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> String {
        "Real numbers (RR64, double precision)".to_string()
    }

    fn elem_size(&self) -> usize {
        std::mem::size_of::<f64>()
    }

    fn same_as(&self, other: &dyn Structure) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }

    fn is_finite(&self) -> Truth {
        Truth::False
    }

    fn is_finite_characteristic(&self) -> Truth {
        Truth::False
    }

    fn is_exact(&self) -> Truth {
        Truth::False
    }

    fn is_canonical(&self) -> Truth {
        Truth::False
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
        Elem::new(0.0f64)
    }

    fn set(&self, res: &mut Elem, x: &Elem) -> Status {
        Self::put(res, Self::value(x))
    }

    /// Dyadic values with few bits, so that sums and short products of
    /// sampled values are exact.
    fn randtest(&self, res: &mut Elem, rng: &mut dyn RngCore) -> Status {
        let v = match rng.gen_range(0..8) {
            0 => 0.0,
            1 => 1.0,
            2 => -1.0,
            _ => f64::from(rng.gen_range(-(1i32 << 20)..=(1 << 20))) / 1024.0,
        };
        Self::put(res, v)
    }

    fn write(&self, out: &mut dyn fmt::Write, x: &Elem) -> Status {
        Status::check(write!(out, "{}", Self::value(x)).is_ok(), Status::UNABLE)
    }

    #[allow(clippy::cast_precision_loss)]
    fn set_si(&self, res: &mut Elem, v: i64) -> Status {
        Self::put(res, v as f64)
    }

    #[allow(clippy::cast_precision_loss)]
    fn set_ui(&self, res: &mut Elem, v: u64) -> Status {
        Self::put(res, v as f64)
    }

    fn set_int(&self, res: &mut Elem, v: &IBig) -> Status {
        Self::put(res, v.to_f64().value())
    }

    fn get_int(&self, res: &mut IBig, x: &Elem) -> Status {
        let v = Self::value(x);
        if !v.is_finite() {
            return Status::UNABLE;
        }
        if v.fract() != 0.0 {
            return Status::DOMAIN;
        }
        match v.to_i64() {
            Some(i) => {
                *res = IBig::from(i);
                Status::SUCCESS
            }
            None => Status::UNABLE,
        }
    }

    fn equal(&self, x: &Elem, y: &Elem) -> Truth {
        self.compare(Self::value(x), Self::value(y))
    }

    fn is_zero(&self, x: &Elem) -> Truth {
        self.compare(Self::value(x), 0.0)
    }

    fn is_one(&self, x: &Elem) -> Truth {
        self.compare(Self::value(x), 1.0)
    }

    fn is_neg_one(&self, x: &Elem) -> Truth {
        self.compare(Self::value(x), -1.0)
    }

    fn cmp(&self, res: &mut Ordering, x: &Elem, y: &Elem) -> Status {
        let (a, b) = (Self::value(x), Self::value(y));
        match self.compare(a, b) {
            Truth::True => *res = Ordering::Equal,
            Truth::False => match a.partial_cmp(&b) {
                Some(o) => *res = o,
                None => return Status::UNABLE,
            },
            Truth::Unknown => return Status::UNABLE,
        }
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
        let status = self.check_divisor(b);
        if !status.is_success() {
            return status;
        }
        Self::put(res, Self::value(x) / b)
    }

    fn inv(&self, res: &mut Elem, x: &Elem) -> Status {
        let a = Self::value(x);
        let status = self.check_divisor(a);
        if !status.is_success() {
            return status;
        }
        Self::put(res, 1.0 / a)
    }
}
