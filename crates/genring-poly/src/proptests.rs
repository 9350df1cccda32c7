//! Property-based tests for polynomial algorithms.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::poly::{self, GrPoly};
    use crate::{compose, div, gcd, mul, powmod, roots};
    use dashu::integer::UBig;
    use genring_core::Structure;
    use genring_rings::ModularRing;

    const P: u64 = 10_007;

    fn field() -> ModularRing {
        ModularRing::new(P).expect("prime modulus")
    }

    fn small_poly(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
        proptest::collection::vec(-50i64..50, 0..=max_len)
    }

    fn monic_poly(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
        proptest::collection::vec(-50i64..50, 1..max_len).prop_map(|mut v| {
            v.push(1);
            v
        })
    }

    fn build(ctx: &dyn Structure, v: &[i64]) -> GrPoly {
        GrPoly::from_coeffs_si(ctx, v)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn karatsuba_matches_classical(a in small_poly(40), b in small_poly(40)) {
            let f = field();
            let (a, b) = (build(&f, &a), build(&f, &b));
            let (mut classical, mut fast) = (GrPoly::new(), GrPoly::new());
            prop_assert!(mul::mul_classical(&f, &mut classical, &a, &b).is_success());
            prop_assert!(mul::mul_karatsuba(&f, &mut fast, &a, &b, 2).is_success());
            prop_assert!(poly::equal(&f, &classical, &fast).is_true());
        }

        #[test]
        fn divrem_reconstructs(a in small_poly(20), b in monic_poly(8)) {
            let f = field();
            let (a, b) = (build(&f, &a), build(&f, &b));
            let (mut q, mut r) = (GrPoly::new(), GrPoly::new());
            prop_assert!(div::divrem(&f, &mut q, &mut r, &a, &b).is_success());
            prop_assert!(r.length() < b.length());

            let (mut qb, mut back) = (GrPoly::new(), GrPoly::new());
            prop_assert!(mul::mul(&f, &mut qb, &q, &b).is_success());
            prop_assert!(poly::add(&f, &mut back, &qb, &r).is_success());
            prop_assert!(poly::equal(&f, &back, &a).is_true());
        }

        #[test]
        fn compose_mod_variants_agree(
            a in small_poly(30),
            g in small_poly(10),
            h in monic_poly(12),
        ) {
            let f = field();
            let (a, g, h) = (build(&f, &a), build(&f, &g), build(&f, &h));
            let (mut horner, mut bk) = (GrPoly::new(), GrPoly::new());
            prop_assert!(compose::compose_mod_horner(&f, &mut horner, &a, &g, &h).is_success());
            prop_assert!(compose::compose_mod_brent_kung(&f, &mut bk, &a, &g, &h).is_success());
            prop_assert!(poly::equal(&f, &horner, &bk).is_true());
        }

        #[test]
        fn sliding_matches_binexp(a in small_poly(10), m in monic_poly(8), e in 0u64..5000, k in 2usize..6) {
            let f = field();
            let (a, m) = (build(&f, &a), build(&f, &m));
            let finv = div::ModulusPreinv::new(&f, &m).expect("monic modulus");
            let e = UBig::from(e);
            let (mut bin, mut slide) = (GrPoly::new(), GrPoly::new());
            prop_assert!(powmod::powmod_binexp_preinv(&f, &mut bin, &a, &e, &finv).is_success());
            prop_assert!(powmod::powmod_sliding_preinv(&f, &mut slide, &a, &e, &finv, k).is_success());
            prop_assert!(poly::equal(&f, &bin, &slide).is_true());
        }

        #[test]
        fn gcd_divides_both(a in small_poly(12), b in small_poly(12), c in monic_poly(4)) {
            let f = field();
            let c = build(&f, &c);
            let (mut ac, mut bc) = (GrPoly::new(), GrPoly::new());
            prop_assert!(mul::mul(&f, &mut ac, &build(&f, &a), &c).is_success());
            prop_assert!(mul::mul(&f, &mut bc, &build(&f, &b), &c).is_success());

            let mut g = GrPoly::new();
            prop_assert!(gcd::gcd(&f, &mut g, &ac, &bc).is_success());
            let mut r = GrPoly::new();
            if !g.is_empty() {
                prop_assert!(f.is_one(g.leading().expect("nonzero")).is_true());
                prop_assert!(div::rem(&f, &mut r, &ac, &g).is_success());
                prop_assert!(r.is_empty());
                prop_assert!(div::rem(&f, &mut r, &bc, &g).is_success());
                prop_assert!(r.is_empty());
                // The common factor survives.
                prop_assert!(div::rem(&f, &mut r, &g, &c).is_success());
                prop_assert!(r.is_empty());
            }
        }

        #[test]
        fn found_roots_vanish(v in monic_poly(8)) {
            let f = field();
            let p = build(&f, &v);
            let (mut rs, mut ms) = (Vec::new(), Vec::new());
            prop_assert!(roots::roots(&f, &mut rs, &mut ms, &p).is_success());
            prop_assert_eq!(rs.len(), ms.len());
            prop_assert!(ms.iter().sum::<usize>() < p.length());
            let mut val = f.init();
            for r in &rs {
                prop_assert!(poly::evaluate(&f, &mut val, &p, r).is_success());
                prop_assert!(f.is_zero(&val).is_true());
            }
        }
    }
}
