//! A minimal integers-mod-n structure used by this crate's unit tests.
//!
//! It implements only the required slots, so every other operation goes
//! through the generic fallbacks under test.

use std::any::Any;
use std::fmt;

use dashu::integer::IBig;
use rand::{Rng, RngCore};

use crate::{Elem, Status, Structure, Truth};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Zn {
    n: u64,
}

impl Zn {
    pub(crate) fn new(n: u64) -> Self {
        assert!(n > 0);
        Self { n }
    }

    pub(crate) fn value(&self, x: &Elem) -> u64 {
        *x.payload::<u64>()
    }

    fn reduce_si(&self, v: i64) -> u64 {
        (i128::from(v)).rem_euclid(i128::from(self.n)) as u64
    }
}

impl Structure for Zn {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> String {
        format!("Zn({})", self.n)
    }

    fn elem_size(&self) -> usize {
        std::mem::size_of::<u64>()
    }

    fn same_as(&self, other: &dyn Structure) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }

    fn is_ring(&self) -> Truth {
        Truth::True
    }

    fn is_commutative_ring(&self) -> Truth {
        Truth::True
    }

    fn is_threadsafe(&self) -> Truth {
        Truth::True
    }

    fn init(&self) -> Elem {
        Elem::new(0u64)
    }

    fn set(&self, res: &mut Elem, x: &Elem) -> Status {
        *res.payload_mut::<u64>() = self.value(x);
        Status::SUCCESS
    }

    fn randtest(&self, res: &mut Elem, rng: &mut dyn RngCore) -> Status {
        *res.payload_mut::<u64>() = rng.gen_range(0..self.n);
        Status::SUCCESS
    }

    fn write(&self, out: &mut dyn fmt::Write, x: &Elem) -> Status {
        Status::check(write!(out, "{}", self.value(x)).is_ok(), Status::UNABLE)
    }

    fn set_si(&self, res: &mut Elem, v: i64) -> Status {
        *res.payload_mut::<u64>() = self.reduce_si(v);
        Status::SUCCESS
    }

    fn get_int(&self, res: &mut IBig, x: &Elem) -> Status {
        *res = IBig::from(self.value(x));
        Status::SUCCESS
    }

    fn equal(&self, x: &Elem, y: &Elem) -> Truth {
        Truth::from(self.value(x) == self.value(y))
    }

    fn add(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        let s = (u128::from(self.value(x)) + u128::from(self.value(y))) % u128::from(self.n);
        *res.payload_mut::<u64>() = s as u64;
        Status::SUCCESS
    }

    fn neg(&self, res: &mut Elem, x: &Elem) -> Status {
        let v = self.value(x);
        *res.payload_mut::<u64>() = if v == 0 { 0 } else { self.n - v };
        Status::SUCCESS
    }

    fn mul(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        let p = (u128::from(self.value(x)) * u128::from(self.value(y))) % u128::from(self.n);
        *res.payload_mut::<u64>() = p as u64;
        Status::SUCCESS
    }
}
