//! Vectors over a base structure, as a structure of their own.
//!
//! Operations are entrywise, so a fixed-length vector space is the
//! product ring `S^n`. The any-length variant allows elements of every
//! length; it has no distinguished zero or one, so `zero`, `one` and the
//! integer conversions return DOMAIN there.

use std::any::Any;
use std::fmt;

use dashu::integer::IBig;
use rand::{Rng, RngCore};

use genring_core::{Ctx, Elem, Status, Structure, Truth};

use crate::vector::{self, GrVec};

/// Vectors of a fixed length, or of any length, over a base structure.
#[derive(Debug, Clone)]
pub struct VectorRing {
    base: Ctx,
    len: Option<usize>,
}

impl VectorRing {
    /// Vectors of length `len` over `base`.
    #[must_use]
    pub fn new(base: Ctx, len: usize) -> Self {
        Self {
            base,
            len: Some(len),
        }
    }

    /// Vectors of any length over `base`.
    #[must_use]
    pub fn any_length(base: Ctx) -> Self {
        Self { base, len: None }
    }

    /// Returns the base structure.
    #[must_use]
    pub fn base(&self) -> &Ctx {
        &self.base
    }

    /// Returns the fixed length, if any.
    #[must_use]
    pub fn fixed_len(&self) -> Option<usize> {
        self.len
    }

    /// Returns the entries of an element.
    #[must_use]
    pub fn entries(x: &Elem) -> &[Elem] {
        x.payload::<GrVec>().as_slice()
    }

    fn vec_mut(x: &mut Elem) -> &mut GrVec {
        x.payload_mut::<GrVec>()
    }

    /// Entrywise binary operation; the result takes the operands' length.
    fn zip(
        &self,
        res: &mut Elem,
        x: &Elem,
        y: &Elem,
        op: impl FnOnce(&dyn Structure, &mut [Elem], &[Elem], &[Elem]) -> Status,
    ) -> Status {
        let (a, b) = (Self::entries(x), Self::entries(y));
        if a.len() != b.len() {
            return Status::DOMAIN;
        }
        let out = Self::vec_mut(res);
        out.set_length(&*self.base, a.len());
        op(&*self.base, out.as_mut_slice(), a, b)
    }

    /// Fills every entry with `c`; DOMAIN without a fixed length.
    fn broadcast(&self, res: &mut Elem, c: &Elem) -> Status {
        let Some(n) = self.len else {
            return Status::DOMAIN;
        };
        let out = Self::vec_mut(res);
        out.set_length(&*self.base, n);
        out.as_mut_slice()
            .iter_mut()
            .map(|r| self.base.set(r, c))
            .collect()
    }
}

impl Structure for VectorRing {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> String {
        match self.len {
            Some(n) => format!("Vectors (length {n}) over {}", self.base.name()),
            None => format!("Vectors (any length) over {}", self.base.name()),
        }
    }

    fn elem_size(&self) -> usize {
        std::mem::size_of::<GrVec>()
    }

    fn same_as(&self, other: &dyn Structure) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|o| o.len == self.len && self.base.same_as(&*o.base))
    }

    fn is_ring(&self) -> Truth {
        match self.len {
            Some(_) => self.base.is_ring(),
            None => Truth::False,
        }
    }

    fn is_commutative_ring(&self) -> Truth {
        match self.len {
            Some(_) => self.base.is_commutative_ring(),
            None => Truth::False,
        }
    }

    fn is_integral_domain(&self) -> Truth {
        match self.len {
            Some(1) => self.base.is_integral_domain(),
            _ => Truth::False,
        }
    }

    fn is_field(&self) -> Truth {
        match self.len {
            Some(1) => self.base.is_field(),
            _ => Truth::False,
        }
    }

    fn is_finite(&self) -> Truth {
        match self.len {
            Some(0) => Truth::True,
            Some(_) => self.base.is_finite(),
            None => Truth::False,
        }
    }

    fn is_finite_characteristic(&self) -> Truth {
        match self.len {
            Some(0) => Truth::True,
            _ => self.base.is_finite_characteristic(),
        }
    }

    fn is_exact(&self) -> Truth {
        self.base.is_exact()
    }

    fn is_canonical(&self) -> Truth {
        self.base.is_canonical()
    }

    fn is_ordered_ring(&self) -> Truth {
        match self.len {
            Some(1) => self.base.is_ordered_ring(),
            _ => Truth::False,
        }
    }

    fn is_zero_ring(&self) -> Truth {
        match self.len {
            Some(0) => Truth::True,
            Some(_) => self.base.is_zero_ring(),
            None => Truth::False,
        }
    }

    fn is_threadsafe(&self) -> Truth {
        self.base.is_threadsafe()
    }

    fn characteristic(&self, res: &mut IBig) -> Status {
        match self.len {
            Some(0) => {
                *res = IBig::ONE;
                Status::SUCCESS
            }
            Some(_) => self.base.characteristic(res),
            None => Status::UNABLE,
        }
    }

    fn cardinality(&self, res: &mut IBig) -> Status {
        let Some(n) = self.len else {
            return Status::DOMAIN;
        };
        let mut q = IBig::ZERO;
        let status = self.base.cardinality(&mut q);
        if status.is_success() {
            *res = q.pow(n);
        }
        status
    }

    fn init(&self) -> Elem {
        Elem::new(GrVec::zeros(&*self.base, self.len.unwrap_or(0)))
    }

    fn set(&self, res: &mut Elem, x: &Elem) -> Status {
        let src = Self::entries(x);
        let out = Self::vec_mut(res);
        out.set_length(&*self.base, src.len());
        vector::set(&*self.base, out.as_mut_slice(), src)
    }

    fn randtest(&self, res: &mut Elem, rng: &mut dyn RngCore) -> Status {
        let n = self.len.unwrap_or_else(|| rng.gen_range(0..4));
        let out = Self::vec_mut(res);
        out.set_length(&*self.base, n);
        vector::randtest(&*self.base, out.as_mut_slice(), rng)
    }

    fn write(&self, out: &mut dyn fmt::Write, x: &Elem) -> Status {
        vector::write(&*self.base, out, Self::entries(x))
    }

    fn set_si(&self, res: &mut Elem, v: i64) -> Status {
        let mut c = self.base.init();
        let status = self.base.set_si(&mut c, v);
        status | self.broadcast(res, &c)
    }

    fn set_int(&self, res: &mut Elem, v: &IBig) -> Status {
        let mut c = self.base.init();
        let status = self.base.set_int(&mut c, v);
        status | self.broadcast(res, &c)
    }

    /// Converts entrywise from another vector structure, or broadcasts a
    /// scalar of any structure the base converts from.
    fn set_other(&self, res: &mut Elem, x: &Elem, x_ctx: &dyn Structure) -> Status {
        if let Some(other) = x_ctx.as_any().downcast_ref::<Self>() {
            let src = Self::entries(x);
            if self.len.is_some_and(|n| n != src.len()) {
                return Status::DOMAIN;
            }
            let out = Self::vec_mut(res);
            out.set_length(&*self.base, src.len());
            return out
                .as_mut_slice()
                .iter_mut()
                .zip(src)
                .map(|(r, s)| self.base.set_other(r, s, &*other.base))
                .collect();
        }

        let mut c = self.base.init();
        let status = self.base.set_other(&mut c, x, x_ctx);
        if !status.is_success() {
            return status;
        }
        self.broadcast(res, &c)
    }

    fn zero(&self, res: &mut Elem) -> Status {
        match self.len {
            Some(n) => {
                let out = Self::vec_mut(res);
                out.set_length(&*self.base, n);
                vector::zero(&*self.base, out.as_mut_slice())
            }
            None => Status::DOMAIN,
        }
    }

    fn equal(&self, x: &Elem, y: &Elem) -> Truth {
        vector::equal(&*self.base, Self::entries(x), Self::entries(y))
    }

    fn is_zero(&self, x: &Elem) -> Truth {
        vector::is_zero(&*self.base, Self::entries(x))
    }

    fn is_one(&self, x: &Elem) -> Truth {
        Truth::all(Self::entries(x).iter().map(|e| self.base.is_one(e)))
    }

    fn add(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        self.zip(res, x, y, vector::add)
    }

    fn sub(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        self.zip(res, x, y, vector::sub)
    }

    fn mul(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        self.zip(res, x, y, vector::mul)
    }

    fn neg(&self, res: &mut Elem, x: &Elem) -> Status {
        let src = Self::entries(x);
        let out = Self::vec_mut(res);
        out.set_length(&*self.base, src.len());
        vector::neg(&*self.base, out.as_mut_slice(), src)
    }

    fn mul_si(&self, res: &mut Elem, x: &Elem, c: i64) -> Status {
        let src = Self::entries(x);
        let out = Self::vec_mut(res);
        out.set_length(&*self.base, src.len());
        vector::mul_scalar_si(&*self.base, out.as_mut_slice(), src, c)
    }

    fn div(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        let base = &*self.base;
        self.zip(res, x, y, |_, r, a, b| {
            r.iter_mut()
                .zip(a.iter().zip(b))
                .map(|(r, (p, q))| base.div(r, p, q))
                .collect()
        })
    }

    fn inv(&self, res: &mut Elem, x: &Elem) -> Status {
        let src = Self::entries(x);
        let out = Self::vec_mut(res);
        out.set_length(&*self.base, src.len());
        out.as_mut_slice()
            .iter_mut()
            .zip(src)
            .map(|(r, s)| self.base.inv(r, s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use genring_rings::{IntegerRing, ModularRing};

    fn vec_elem(ctx: &dyn Structure, values: &[i64]) -> Elem {
        Elem::new(GrVec::from_si(ctx, values))
    }

    #[test]
    fn test_fixed_length_ring() {
        let base: Ctx = Arc::new(ModularRing::new(7).expect("valid modulus"));
        let v = VectorRing::new(base.clone(), 3);
        let x = vec_elem(&*base, &[1, 2, 3]);
        let y = vec_elem(&*base, &[6, 6, 6]);
        let mut c = v.init();

        assert!(v.add(&mut c, &x, &y).is_success());
        assert!(v.equal(&c, &vec_elem(&*base, &[0, 1, 2])).is_true());

        assert!(v.mul(&mut c, &x, &y).is_success());
        assert!(v.equal(&c, &vec_elem(&*base, &[6, 5, 4])).is_true());

        assert!(v.one(&mut c).is_success());
        assert!(v.is_one(&c).is_true());
        assert!(v.is_ring().is_true());
        assert!(v.is_field().is_false());
    }

    #[test]
    fn test_any_length_has_no_one() {
        let base: Ctx = Arc::new(IntegerRing::new());
        let v = VectorRing::any_length(base.clone());
        let mut c = v.init();
        assert_eq!(v.one(&mut c), Status::DOMAIN);
        assert_eq!(v.zero(&mut c), Status::DOMAIN);

        let x = vec_elem(&*base, &[1, 2]);
        let y = vec_elem(&*base, &[1, 2, 3]);
        assert_eq!(v.add(&mut c, &x, &y), Status::DOMAIN);
        assert!(v.add(&mut c, &x, &x).is_success());
        assert_eq!(VectorRing::entries(&c).len(), 2);
    }

    #[test]
    fn test_entrywise_inverse() {
        let base: Ctx = Arc::new(ModularRing::new(6).expect("valid modulus"));
        let v = VectorRing::new(base.clone(), 2);
        let mut c = v.init();
        assert!(v.inv(&mut c, &vec_elem(&*base, &[1, 5])).is_success());
        assert_eq!(v.inv(&mut c, &vec_elem(&*base, &[1, 2])), Status::DOMAIN);
        assert!(v.is_invertible(&vec_elem(&*base, &[5, 2])).is_false());
    }

    #[test]
    fn test_set_other_broadcasts_scalars() {
        let z: Ctx = Arc::new(IntegerRing::new());
        let base: Ctx = Arc::new(ModularRing::new(5).expect("valid modulus"));
        let v = VectorRing::new(base.clone(), 2);
        let mut c = v.init();
        assert!(v.set_other(&mut c, &z.elem_from_si(7), &*z).is_success());
        assert!(v.equal(&c, &vec_elem(&*base, &[2, 2])).is_true());

        let wide = VectorRing::new(z.clone(), 3);
        let src = vec_elem(&*z, &[1, 2, 3]);
        assert_eq!(v.set_other(&mut c, &src, &wide), Status::DOMAIN);
    }

    #[test]
    fn test_cardinality() {
        let base: Ctx = Arc::new(ModularRing::new(3).expect("valid modulus"));
        let v = VectorRing::new(base, 4);
        let mut n = IBig::ZERO;
        assert!(v.cardinality(&mut n).is_success());
        assert_eq!(n, IBig::from(81));
    }
}
