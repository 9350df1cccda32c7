//! Matrices of a fixed shape over a base structure, as a structure.
//!
//! Square shapes form the ring `M_n(S)`. Rectangular shapes only support
//! the additive operations; `mul`, `one` and `inv` return DOMAIN there.

use std::any::Any;
use std::fmt;

use dashu::integer::IBig;
use rand::RngCore;

use genring_core::{Ctx, Elem, Status, Structure, Truth};

use crate::dense_matrix::{self, GrMat};

/// `nrows × ncols` matrices over a base structure.
#[derive(Debug, Clone)]
pub struct MatrixRing {
    base: Ctx,
    nrows: usize,
    ncols: usize,
}

impl MatrixRing {
    /// Matrices of shape `nrows × ncols` over `base`.
    #[must_use]
    pub fn new(base: Ctx, nrows: usize, ncols: usize) -> Self {
        Self { base, nrows, ncols }
    }

    /// Square `n × n` matrices over `base`.
    #[must_use]
    pub fn square(base: Ctx, n: usize) -> Self {
        Self::new(base, n, n)
    }

    /// Returns the base structure.
    #[must_use]
    pub fn base(&self) -> &Ctx {
        &self.base
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns the matrix held by an element.
    #[must_use]
    pub fn matrix(x: &Elem) -> &GrMat {
        x.payload::<GrMat>()
    }

    fn matrix_mut(x: &mut Elem) -> &mut GrMat {
        x.payload_mut::<GrMat>()
    }

    fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    fn is_empty(&self) -> bool {
        self.nrows == 0 || self.ncols == 0
    }

    /// Sets `res` to `c` times the identity. Rectangular shapes only
    /// accept zero.
    fn set_scalar(&self, res: &mut Elem, c: &Elem) -> Status {
        let out = Self::matrix_mut(res);
        if self.is_square() {
            return dense_matrix::set_scalar(&*self.base, out, Some(c));
        }
        match self.base.is_zero(c) {
            Truth::True => dense_matrix::zero(&*self.base, out),
            Truth::False => Status::DOMAIN,
            Truth::Unknown => Status::UNABLE,
        }
    }
}

impl Structure for MatrixRing {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> String {
        format!("Matrices ({} x {}) over {}", self.nrows, self.ncols, self.base.name())
    }

    fn elem_size(&self) -> usize {
        std::mem::size_of::<GrMat>()
    }

    fn same_as(&self, other: &dyn Structure) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|o| {
            o.nrows == self.nrows && o.ncols == self.ncols && self.base.same_as(&*o.base)
        })
    }

    fn is_ring(&self) -> Truth {
        if self.is_square() {
            self.base.is_ring()
        } else {
            Truth::False
        }
    }

    fn is_commutative_ring(&self) -> Truth {
        match (self.is_square(), self.nrows) {
            (false, _) => Truth::False,
            (true, 0) => Truth::True,
            (true, 1) => self.base.is_commutative_ring(),
            // M_n(S) for n >= 2 is commutative only over the zero ring.
            (true, _) => self.base.is_zero_ring(),
        }
    }

    fn is_integral_domain(&self) -> Truth {
        if self.is_square() && self.nrows == 1 {
            self.base.is_integral_domain()
        } else {
            Truth::False
        }
    }

    fn is_field(&self) -> Truth {
        if self.is_square() && self.nrows == 1 {
            self.base.is_field()
        } else {
            Truth::False
        }
    }

    fn is_finite(&self) -> Truth {
        if self.is_empty() {
            Truth::True
        } else {
            self.base.is_finite()
        }
    }

    fn is_finite_characteristic(&self) -> Truth {
        if self.is_empty() {
            Truth::True
        } else {
            self.base.is_finite_characteristic()
        }
    }

    fn is_exact(&self) -> Truth {
        self.base.is_exact()
    }

    fn is_canonical(&self) -> Truth {
        self.base.is_canonical()
    }

    fn is_ordered_ring(&self) -> Truth {
        if self.is_square() && self.nrows == 1 {
            self.base.is_ordered_ring()
        } else {
            Truth::False
        }
    }

    fn is_zero_ring(&self) -> Truth {
        if self.is_empty() {
            Truth::True
        } else {
            self.base.is_zero_ring()
        }
    }

    fn is_threadsafe(&self) -> Truth {
        self.base.is_threadsafe()
    }

    fn characteristic(&self, res: &mut IBig) -> Status {
        if self.is_empty() {
            *res = IBig::ONE;
            return Status::SUCCESS;
        }
        self.base.characteristic(res)
    }

    fn cardinality(&self, res: &mut IBig) -> Status {
        let mut q = IBig::ZERO;
        let status = self.base.cardinality(&mut q);
        if status.is_success() {
            *res = q.pow(self.nrows * self.ncols);
        }
        status
    }

    fn init(&self) -> Elem {
        Elem::new(GrMat::zeros(&*self.base, self.nrows, self.ncols))
    }

    fn set(&self, res: &mut Elem, x: &Elem) -> Status {
        dense_matrix::set(&*self.base, Self::matrix_mut(res), Self::matrix(x))
    }

    fn randtest(&self, res: &mut Elem, rng: &mut dyn RngCore) -> Status {
        dense_matrix::randtest(&*self.base, Self::matrix_mut(res), rng)
    }

    fn write(&self, out: &mut dyn fmt::Write, x: &Elem) -> Status {
        dense_matrix::write(&*self.base, out, Self::matrix(x))
    }

    fn set_si(&self, res: &mut Elem, v: i64) -> Status {
        let mut c = self.base.init();
        let status = self.base.set_si(&mut c, v);
        status | self.set_scalar(res, &c)
    }

    fn set_int(&self, res: &mut Elem, v: &IBig) -> Status {
        let mut c = self.base.init();
        let status = self.base.set_int(&mut c, v);
        status | self.set_scalar(res, &c)
    }

    /// Converts entrywise from matrices of the same shape, or maps a
    /// scalar to a multiple of the identity.
    fn set_other(&self, res: &mut Elem, x: &Elem, x_ctx: &dyn Structure) -> Status {
        if let Some(other) = x_ctx.as_any().downcast_ref::<Self>() {
            if other.nrows != self.nrows || other.ncols != self.ncols {
                return Status::DOMAIN;
            }
            let src = Self::matrix(x).entries();
            return Self::matrix_mut(res)
                .entries_mut()
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
        self.set_scalar(res, &c)
    }

    fn zero(&self, res: &mut Elem) -> Status {
        dense_matrix::zero(&*self.base, Self::matrix_mut(res))
    }

    fn one(&self, res: &mut Elem) -> Status {
        if !self.is_square() {
            return Status::DOMAIN;
        }
        dense_matrix::one(&*self.base, Self::matrix_mut(res))
    }

    fn equal(&self, x: &Elem, y: &Elem) -> Truth {
        dense_matrix::equal(&*self.base, Self::matrix(x), Self::matrix(y))
    }

    fn is_zero(&self, x: &Elem) -> Truth {
        dense_matrix::is_zero(&*self.base, Self::matrix(x))
    }

    fn is_one(&self, x: &Elem) -> Truth {
        if !self.is_square() {
            return Truth::False;
        }
        dense_matrix::is_one(&*self.base, Self::matrix(x))
    }

    fn add(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        dense_matrix::add(&*self.base, Self::matrix_mut(res), Self::matrix(x), Self::matrix(y))
    }

    fn sub(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        dense_matrix::sub(&*self.base, Self::matrix_mut(res), Self::matrix(x), Self::matrix(y))
    }

    fn neg(&self, res: &mut Elem, x: &Elem) -> Status {
        dense_matrix::neg(&*self.base, Self::matrix_mut(res), Self::matrix(x))
    }

    fn mul(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        dense_matrix::mul(&*self.base, Self::matrix_mut(res), Self::matrix(x), Self::matrix(y))
    }

    fn mul_si(&self, res: &mut Elem, x: &Elem, c: i64) -> Status {
        let base = &*self.base;
        let mut s = base.init();
        let status = base.set_si(&mut s, c);
        status | dense_matrix::mul_scalar(base, Self::matrix_mut(res), Self::matrix(x), &s)
    }

    fn inv(&self, res: &mut Elem, x: &Elem) -> Status {
        dense_matrix::inv(&*self.base, Self::matrix_mut(res), Self::matrix(x))
    }

    /// `x * y^-1`.
    fn div(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        let mut yi = self.init();
        let status = self.inv(&mut yi, y);
        if !status.is_success() {
            return status;
        }
        self.mul(res, x, &yi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use genring_rings::{IntegerRing, ModularRing, RationalField};

    fn mat(ctx: &dyn Structure, n: usize, m: usize, values: &[i64]) -> Elem {
        Elem::new(GrMat::from_si(ctx, n, m, values))
    }

    #[test]
    fn test_square_ring_ops() {
        let base: Ctx = Arc::new(IntegerRing::new());
        let r = MatrixRing::square(base.clone(), 2);
        let a = mat(&*base, 2, 2, &[1, 2, 3, 4]);
        let b = mat(&*base, 2, 2, &[0, 1, 1, 0]);
        let mut c = r.init();

        assert!(r.mul(&mut c, &a, &b).is_success());
        assert!(r.equal(&c, &mat(&*base, 2, 2, &[2, 1, 4, 3])).is_true());
        assert!(r.mul(&mut c, &b, &a).is_success());
        assert!(r.equal(&c, &mat(&*base, 2, 2, &[3, 4, 1, 2])).is_true());

        assert!(r.set_si(&mut c, 5).is_success());
        assert!(r.equal(&c, &mat(&*base, 2, 2, &[5, 0, 0, 5])).is_true());
        assert!(r.is_commutative_ring().is_false());
    }

    #[test]
    fn test_rectangular_has_no_product() {
        let base: Ctx = Arc::new(IntegerRing::new());
        let r = MatrixRing::new(base.clone(), 2, 3);
        let a = mat(&*base, 2, 3, &[1, 2, 3, 4, 5, 6]);
        let mut c = r.init();
        assert_eq!(r.mul(&mut c, &a, &a), Status::DOMAIN);
        assert_eq!(r.one(&mut c), Status::DOMAIN);
        assert!(r.add(&mut c, &a, &a).is_success());
        assert!(r.zero(&mut c).is_success());
        assert_eq!(r.set_si(&mut c, 1), Status::DOMAIN);
        assert!(r.is_ring().is_false());
    }

    #[test]
    fn test_inverse_and_singular() {
        let base: Ctx = Arc::new(RationalField::new());
        let r = MatrixRing::square(base.clone(), 2);
        let a = mat(&*base, 2, 2, &[2, 1, 1, 1]);
        let mut ai = r.init();
        let mut p = r.init();
        assert!(r.inv(&mut ai, &a).is_success());
        assert!(r.mul(&mut p, &a, &ai).is_success());
        assert!(r.is_one(&p).is_true());

        let s = mat(&*base, 2, 2, &[1, 2, 2, 4]);
        assert_eq!(r.inv(&mut ai, &s), Status::DOMAIN);
        assert!(r.is_invertible(&s).is_false());
    }

    #[test]
    fn test_invertibility_over_commutative_rings() {
        let zz: Ctx = Arc::new(IntegerRing::new());
        let r = MatrixRing::square(zz.clone(), 2);
        let a = mat(&*zz, 2, 2, &[2, 1, 1, 1]);
        let two = mat(&*zz, 2, 2, &[2, 0, 0, 2]);
        assert!(r.is_invertible(&a).is_true());
        assert!(r.is_invertible(&two).is_false());

        // a^-1 = [1, -1, -1, 2]
        let mut q = r.init();
        assert!(r.div(&mut q, &mat(&*zz, 2, 2, &[1, 0, 0, 1]), &a).is_success());
        assert!(r.equal(&q, &mat(&*zz, 2, 2, &[1, -1, -1, 2])).is_true());
        assert_eq!(r.div(&mut q, &a, &two), Status::DOMAIN);

        let z6: Ctx = Arc::new(ModularRing::new(6).expect("valid modulus"));
        let r6 = MatrixRing::square(z6.clone(), 2);
        assert!(r6.is_invertible(&mat(&*z6, 2, 2, &[2, 1, 1, 0])).is_true());
        assert!(r6.is_invertible(&mat(&*z6, 2, 2, &[2, 1, 0, 1])).is_false());
    }

    #[test]
    fn test_generic_pow_uses_matrix_mul() {
        let base: Ctx = Arc::new(ModularRing::new(1_000_000_007).expect("valid modulus"));
        let r = MatrixRing::square(base.clone(), 2);
        let fib = mat(&*base, 2, 2, &[1, 1, 1, 0]);
        let mut c = r.init();
        assert!(r.pow_ui(&mut c, &fib, 30).is_success());
        // F(30) = 832040
        assert!(base.equal(&MatrixRing::matrix(&c)[(0, 1)], &base.elem_from_si(832_040)).is_true());
    }
}
