//! Univariate polynomials over a base structure, as a structure.

use std::any::Any;
use std::fmt;

use dashu::integer::IBig;
use rand::RngCore;

use genring_core::{Ctx, Elem, Status, Structure, Truth};

use crate::poly::{self, GrPoly, PolyConfig};
use crate::{div, gcd, mul};

/// Longest polynomial produced by `randtest`.
const RANDTEST_MAX_LEN: usize = 6;

/// The polynomial ring `S[var]` over a base structure.
#[derive(Debug, Clone)]
pub struct PolyRing {
    base: Ctx,
    var: String,
    config: PolyConfig,
}

impl PolyRing {
    /// Polynomials in `x` over `base`.
    #[must_use]
    pub fn new(base: Ctx) -> Self {
        Self::with_var(base, "x")
    }

    /// Polynomials in the named variable over `base`.
    #[must_use]
    pub fn with_var(base: Ctx, var: &str) -> Self {
        Self {
            base,
            var: var.to_string(),
            config: PolyConfig::default(),
        }
    }

    /// Replaces the algorithm selection thresholds.
    #[must_use]
    pub fn with_config(mut self, config: PolyConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the base structure.
    #[must_use]
    pub fn base(&self) -> &Ctx {
        &self.base
    }

    /// Returns the variable name.
    #[must_use]
    pub fn var(&self) -> &str {
        &self.var
    }

    /// Returns the algorithm selection thresholds.
    #[must_use]
    pub fn config(&self) -> &PolyConfig {
        &self.config
    }

    /// Returns the polynomial held by an element.
    #[must_use]
    pub fn poly(x: &Elem) -> &GrPoly {
        x.payload::<GrPoly>()
    }

    fn poly_mut(x: &mut Elem) -> &mut GrPoly {
        x.payload_mut::<GrPoly>()
    }

    fn put(res: &mut Elem, p: GrPoly) {
        *Self::poly_mut(res) = p;
    }

    /// Sets `res` to a constant from a base element.
    fn set_constant(&self, res: &mut Elem, c: &Elem) -> Status {
        poly::set_scalar(&*self.base, Self::poly_mut(res), c)
    }

    /// The constant coefficient of `x`, or DOMAIN if `x` is not constant.
    fn constant_term<'a>(&self, x: &'a Elem, zero: &'a Elem) -> Result<&'a Elem, Status> {
        let p = Self::poly(x);
        match p.length() {
            0 => Ok(zero),
            1 => Ok(&p.coeffs()[0]),
            _ => Err(Status::DOMAIN),
        }
    }
}

impl Structure for PolyRing {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> String {
        format!("Polynomials in {} over {}", self.var, self.base.name())
    }

    fn elem_size(&self) -> usize {
        std::mem::size_of::<GrPoly>()
    }

    fn same_as(&self, other: &dyn Structure) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|o| o.var == self.var && self.base.same_as(&*o.base))
    }

    fn is_ring(&self) -> Truth {
        self.base.is_ring()
    }

    fn is_commutative_ring(&self) -> Truth {
        self.base.is_commutative_ring()
    }

    fn is_integral_domain(&self) -> Truth {
        self.base.is_integral_domain()
    }

    fn is_field(&self) -> Truth {
        Truth::False
    }

    fn is_unique_factorization_domain(&self) -> Truth {
        self.base.is_unique_factorization_domain()
    }

    fn is_finite(&self) -> Truth {
        self.base.is_zero_ring()
    }

    fn is_finite_characteristic(&self) -> Truth {
        self.base.is_finite_characteristic()
    }

    fn is_exact(&self) -> Truth {
        self.base.is_exact()
    }

    fn is_canonical(&self) -> Truth {
        self.base.is_canonical()
    }

    fn is_ordered_ring(&self) -> Truth {
        Truth::False
    }

    fn is_zero_ring(&self) -> Truth {
        self.base.is_zero_ring()
    }

    fn is_threadsafe(&self) -> Truth {
        self.base.is_threadsafe()
    }

    fn characteristic(&self, res: &mut IBig) -> Status {
        self.base.characteristic(res)
    }

    fn cardinality(&self, res: &mut IBig) -> Status {
        match self.base.is_zero_ring() {
            Truth::True => {
                *res = IBig::ONE;
                Status::SUCCESS
            }
            Truth::False => Status::DOMAIN,
            Truth::Unknown => Status::UNABLE,
        }
    }

    fn init(&self) -> Elem {
        Elem::new(GrPoly::new())
    }

    fn set(&self, res: &mut Elem, x: &Elem) -> Status {
        poly::set(&*self.base, Self::poly_mut(res), Self::poly(x))
    }

    fn randtest(&self, res: &mut Elem, rng: &mut dyn RngCore) -> Status {
        poly::randtest(&*self.base, Self::poly_mut(res), rng, RANDTEST_MAX_LEN)
    }

    fn write(&self, out: &mut dyn fmt::Write, x: &Elem) -> Status {
        poly::write(&*self.base, out, Self::poly(x), &self.var)
    }

    fn set_si(&self, res: &mut Elem, v: i64) -> Status {
        let mut c = self.base.init();
        let status = self.base.set_si(&mut c, v);
        status | self.set_constant(res, &c)
    }

    fn set_ui(&self, res: &mut Elem, v: u64) -> Status {
        let mut c = self.base.init();
        let status = self.base.set_ui(&mut c, v);
        status | self.set_constant(res, &c)
    }

    fn set_int(&self, res: &mut Elem, v: &IBig) -> Status {
        let mut c = self.base.init();
        let status = self.base.set_int(&mut c, v);
        status | self.set_constant(res, &c)
    }

    /// Converts coefficientwise from another polynomial structure in the
    /// same variable, or maps anything the base accepts to a constant.
    ///
    /// A polynomial in another variable only converts when the base takes
    /// it whole, as in `ZZ[x]` into `ZZ[x][y]`; otherwise UNABLE.
    fn set_other(&self, res: &mut Elem, x: &Elem, x_ctx: &dyn Structure) -> Status {
        if let Some(other) = x_ctx.as_any().downcast_ref::<Self>() {
            if other.var != self.var {
                let mut c = self.base.init();
                if self.base.set_other(&mut c, x, x_ctx).is_success() {
                    return self.set_constant(res, &c);
                }
                return Status::UNABLE;
            }
            let src = Self::poly(x).coeffs();
            let mut coeffs = Vec::with_capacity(src.len());
            let mut status = Status::SUCCESS;
            for s in src {
                let mut c = self.base.init();
                status |= self.base.set_other(&mut c, s, &*other.base);
                coeffs.push(c);
            }
            if status.is_success() {
                Self::put(res, GrPoly::from_coeffs(&*self.base, coeffs));
            }
            return status;
        }

        let mut c = self.base.init();
        let status = self.base.set_other(&mut c, x, x_ctx);
        if !status.is_success() {
            return status;
        }
        self.set_constant(res, &c)
    }

    /// Constant polynomials only; DOMAIN otherwise.
    fn get_int(&self, res: &mut IBig, x: &Elem) -> Status {
        let zero = self.base.init();
        match self.constant_term(x, &zero) {
            Ok(c) => self.base.get_int(res, c),
            Err(status) => status,
        }
    }

    fn get_fraction(&self, num: &mut IBig, den: &mut IBig, x: &Elem) -> Status {
        let zero = self.base.init();
        match self.constant_term(x, &zero) {
            Ok(c) => self.base.get_fraction(num, den, c),
            Err(status) => status,
        }
    }

    fn zero(&self, res: &mut Elem) -> Status {
        poly::zero(Self::poly_mut(res))
    }

    fn one(&self, res: &mut Elem) -> Status {
        poly::one(&*self.base, Self::poly_mut(res))
    }

    fn gen(&self, res: &mut Elem) -> Status {
        poly::gen(&*self.base, Self::poly_mut(res))
    }

    fn equal(&self, x: &Elem, y: &Elem) -> Truth {
        poly::equal(&*self.base, Self::poly(x), Self::poly(y))
    }

    fn is_zero(&self, x: &Elem) -> Truth {
        poly::is_zero(&*self.base, Self::poly(x))
    }

    fn is_one(&self, x: &Elem) -> Truth {
        poly::is_one(&*self.base, Self::poly(x))
    }

    fn add(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        poly::add(&*self.base, Self::poly_mut(res), Self::poly(x), Self::poly(y))
    }

    fn sub(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        poly::sub(&*self.base, Self::poly_mut(res), Self::poly(x), Self::poly(y))
    }

    fn neg(&self, res: &mut Elem, x: &Elem) -> Status {
        poly::neg(&*self.base, Self::poly_mut(res), Self::poly(x))
    }

    fn mul(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        mul::mul_with(&*self.base, Self::poly_mut(res), Self::poly(x), Self::poly(y), &self.config)
    }

    fn mul_si(&self, res: &mut Elem, x: &Elem, c: i64) -> Status {
        let mut s = self.base.init();
        let status = self.base.set_si(&mut s, c);
        status | poly::mul_scalar(&*self.base, Self::poly_mut(res), Self::poly(x), &s)
    }

    fn pow_ui(&self, res: &mut Elem, x: &Elem, e: u64) -> Status {
        mul::pow_ui(&*self.base, Self::poly_mut(res), Self::poly(x), e)
    }

    /// Exact division; DOMAIN when `y` provably does not divide `x`.
    fn div(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        let mut q = GrPoly::new();
        let status = div::divexact(&*self.base, &mut q, Self::poly(x), Self::poly(y));
        if status.is_success() {
            Self::put(res, q);
        }
        status
    }

    /// Units of `S[x]` over an integral domain are the constant units.
    /// Over other bases a nonconstant unit may exist (`1 + 2x` mod 4), so
    /// nonconstant inputs report UNABLE there.
    fn inv(&self, res: &mut Elem, x: &Elem) -> Status {
        let p = Self::poly(x);
        match p.length() {
            0 => Status::DOMAIN,
            1 => {
                let mut c = self.base.init();
                let status = self.base.inv(&mut c, &p.coeffs()[0]);
                if !status.is_success() {
                    return status;
                }
                self.set_constant(res, &c)
            }
            _ if self.base.is_integral_domain().is_true() => Status::DOMAIN,
            _ => Status::UNABLE,
        }
    }

    fn gcd(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        gcd::gcd(&*self.base, Self::poly_mut(res), Self::poly(x), Self::poly(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use genring_linalg::{dense_matrix, GrMat};
    use genring_rings::{IntegerRing, ModularRing, RationalField};

    fn elem(ring: &PolyRing, coeffs: &[i64]) -> Elem {
        Elem::new(GrPoly::from_coeffs_si(&**ring.base(), coeffs))
    }

    #[test]
    fn test_ring_ops() {
        let zx = PolyRing::new(Arc::new(IntegerRing::new()));
        let a = elem(&zx, &[1, 1]);
        let b = elem(&zx, &[-1, 1]);
        let mut c = zx.init();
        assert!(zx.mul(&mut c, &a, &b).is_success());
        assert!(zx.equal(&c, &elem(&zx, &[-1, 0, 1])).is_true());
        assert_eq!(zx.format_elem(&c), "-1 + x^2");

        assert!(zx.pow_ui(&mut c, &a, 3).is_success());
        assert!(zx.equal(&c, &elem(&zx, &[1, 3, 3, 1])).is_true());

        assert!(zx.gen(&mut c).is_success());
        assert_eq!(zx.format_elem(&c), "x");
        assert!(zx.is_commutative_ring().is_true());
        assert!(zx.is_field().is_false());
    }

    #[test]
    fn test_exact_division() {
        let zx = PolyRing::new(Arc::new(IntegerRing::new()));
        let mut q = zx.init();
        assert!(zx.div(&mut q, &elem(&zx, &[-1, 0, 1]), &elem(&zx, &[1, 1])).is_success());
        assert!(zx.equal(&q, &elem(&zx, &[-1, 1])).is_true());
        assert_eq!(zx.div(&mut q, &elem(&zx, &[1, 0, 1]), &elem(&zx, &[1, 1])), Status::DOMAIN);
    }

    #[test]
    fn test_division_by_non_unit_lead() {
        let zx = PolyRing::new(Arc::new(IntegerRing::new()));
        let mut q = zx.init();
        assert!(zx.div(&mut q, &elem(&zx, &[2, 2]), &elem(&zx, &[2])).is_success());
        assert!(zx.equal(&q, &elem(&zx, &[1, 1])).is_true());
        assert!(zx.divexact(&mut q, &elem(&zx, &[2, 2]), &elem(&zx, &[2])).is_success());
        assert!(zx.equal(&q, &elem(&zx, &[1, 1])).is_true());

        // (2x + 1)(3x - 2) = 6x^2 - x - 2
        assert!(zx.div(&mut q, &elem(&zx, &[-2, -1, 6]), &elem(&zx, &[1, 2])).is_success());
        assert!(zx.equal(&q, &elem(&zx, &[-2, 3])).is_true());

        assert_eq!(zx.div(&mut q, &elem(&zx, &[1, 2]), &elem(&zx, &[2])), Status::DOMAIN);
        assert_eq!(zx.div(&mut q, &elem(&zx, &[1, 0, 6]), &elem(&zx, &[1, 2])), Status::DOMAIN);
        assert_eq!(zx.div(&mut q, &elem(&zx, &[1]), &elem(&zx, &[0, 2])), Status::DOMAIN);
        assert!(zx.div(&mut q, &elem(&zx, &[]), &elem(&zx, &[0, 2])).is_success());
        assert!(zx.is_zero(&q).is_true());
    }

    #[test]
    fn test_division_over_residues_with_zero_divisors() {
        let z6x = PolyRing::new(Arc::new(ModularRing::new(6).expect("valid modulus")));
        let mut q = z6x.init();
        // (2x + 1)(x + 1) = 2x^2 + 3x + 1
        assert!(z6x.div(&mut q, &elem(&z6x, &[1, 3, 2]), &elem(&z6x, &[1, 1])).is_success());
        assert!(z6x.equal(&q, &elem(&z6x, &[1, 2])).is_true());
        // 2 is a zero divisor, so a failed step proves nothing.
        assert_eq!(z6x.div(&mut q, &elem(&z6x, &[1, 1]), &elem(&z6x, &[0, 2])), Status::UNABLE);
    }

    #[test]
    fn test_determinant_over_polynomials() {
        let zx = PolyRing::new(Arc::new(IntegerRing::new()));
        let a = GrMat::from_si(&zx, 3, 3, &[2, 1, 0, 1, 3, 1, 0, 1, 4]);
        let mut d = zx.init();
        assert!(dense_matrix::det(&zx, &mut d, &a).is_success());
        assert!(zx.equal(&d, &elem(&zx, &[18])).is_true());

        // [[x, 1], [1, x]] has determinant x^2 - 1
        let mut b = GrMat::zeros(&zx, 2, 2);
        let entries: [&[i64]; 4] = [&[0, 1], &[1], &[1], &[0, 1]];
        for (i, c) in entries.iter().enumerate() {
            b[(i / 2, i % 2)] = elem(&zx, c);
        }
        assert!(dense_matrix::det(&zx, &mut d, &b).is_success());
        assert!(zx.equal(&d, &elem(&zx, &[-1, 0, 1])).is_true());
    }

    #[test]
    fn test_units() {
        let qx = PolyRing::new(Arc::new(RationalField::new()));
        let mut r = qx.init();
        assert!(qx.inv(&mut r, &elem(&qx, &[4])).is_success());
        assert_eq!(qx.format_elem(&r), "1/4");
        assert_eq!(qx.inv(&mut r, &elem(&qx, &[0, 1])), Status::DOMAIN);
        assert!(qx.is_invertible(&elem(&qx, &[0, 1])).is_false());

        let z4x = PolyRing::new(Arc::new(ModularRing::new(4).expect("valid modulus")));
        assert_eq!(z4x.inv(&mut r, &elem(&z4x, &[1, 2])), Status::UNABLE);
    }

    #[test]
    fn test_conversions() {
        let z: Ctx = Arc::new(IntegerRing::new());
        let zx = PolyRing::new(z.clone());
        let f7x = PolyRing::new(Arc::new(ModularRing::new(7).expect("valid modulus")));

        let p = elem(&zx, &[8, -1, 14]);
        let mut r = f7x.init();
        assert!(f7x.set_other(&mut r, &p, &zx).is_success());
        assert!(f7x.equal(&r, &elem(&f7x, &[1, 6])).is_true());

        // Scalars become constants.
        let mut c = zx.init();
        assert!(zx.set_other(&mut c, &z.elem_from_si(5), &*z).is_success());
        assert!(zx.equal(&c, &elem(&zx, &[5])).is_true());

        let mut v = IBig::ZERO;
        assert!(zx.get_int(&mut v, &elem(&zx, &[5])).is_success());
        assert_eq!(v, IBig::from(5));
        assert_eq!(zx.get_int(&mut v, &p), Status::DOMAIN);

        let yx = PolyRing::with_var(z.clone(), "y");
        let mut s = yx.init();
        assert_eq!(yx.set_other(&mut s, &p, &zx), Status::UNABLE);

        // ZZ[x] sits inside ZZ[x][y] as constants.
        let zx_ctx: Ctx = Arc::new(PolyRing::new(z));
        let zxy = PolyRing::with_var(zx_ctx.clone(), "y");
        let mut t = zxy.init();
        assert!(zxy.set_other(&mut t, &p, &zx).is_success());
        let constant = GrPoly::from_coeffs(&*zx_ctx, vec![zx_ctx.clone_elem(&p)]);
        assert!(zxy.equal(&t, &Elem::new(constant)).is_true());
    }

    #[test]
    fn test_nested() {
        let f5: Ctx = Arc::new(ModularRing::new(5).expect("valid modulus"));
        let f5x: Ctx = Arc::new(PolyRing::new(f5));
        let f5xy = PolyRing::with_var(f5x.clone(), "y");

        let mut y = f5xy.init();
        let mut c = f5xy.init();
        assert!(f5xy.gen(&mut y).is_success());
        assert!(f5xy.set_si(&mut c, 3).is_success());
        let mut s = f5xy.init();
        assert!(f5xy.add(&mut s, &y, &c).is_success());
        assert!(f5xy.pow_ui(&mut c, &s, 5).is_success());
        // (y + 3)^5 = y^5 + 3 in characteristic 5
        assert_eq!(f5xy.format_elem(&c), "3 + y^5");
    }
}
