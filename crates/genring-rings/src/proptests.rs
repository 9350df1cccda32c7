//! Property-based tests for the builtin plugins.

#[cfg(test)]
mod tests {
    use dashu::integer::IBig;
    use proptest::prelude::*;

    use genring_core::{Elem, Status, Structure};

    use crate::{IntegerRing, ModularRing};

    fn modulus() -> impl Strategy<Value = u64> {
        prop_oneof![1u64..50, Just(1_000_000_007u64), Just((1u64 << 62) + 135), Just((1u64 << 63) - 25)]
    }

    proptest! {
        #[test]
        fn modular_ops_match_i128(n in modulus(), a in any::<i64>(), b in any::<i64>()) {
            let r = ModularRing::new(n).expect("valid modulus");
            let (x, y) = (r.elem_from_si(a), r.elem_from_si(b));
            let m = i128::from(n);
            let reduce = |v: i128| u64::try_from(v.rem_euclid(m)).expect("reduced");

            let mut c = r.init();
            prop_assert!(r.add(&mut c, &x, &y).is_success());
            prop_assert_eq!(ModularRing::value(&c), reduce(i128::from(a) + i128::from(b)));

            prop_assert!(r.sub(&mut c, &x, &y).is_success());
            prop_assert_eq!(ModularRing::value(&c), reduce(i128::from(a) - i128::from(b)));

            let (ra, rb) = (reduce(i128::from(a)), reduce(i128::from(b)));
            prop_assert!(r.mul(&mut c, &x, &y).is_success());
            let expected = (u128::from(ra) * u128::from(rb)) % u128::from(n);
            prop_assert_eq!(u128::from(ModularRing::value(&c)), expected);
        }

        #[test]
        fn modular_inverse_iff_coprime(n in 2u64..500, a in 0u64..500) {
            let r = ModularRing::new(n).expect("valid modulus");
            let x = r.elem_from_si(i64::try_from(a).expect("small"));
            let mut xi = r.init();
            let status = r.inv(&mut xi, &x);

            let g = gcd(a % n, n);
            if g == 1 {
                prop_assert_eq!(status, Status::SUCCESS);
                let mut p = r.init();
                prop_assert!(r.mul(&mut p, &x, &xi).is_success());
                prop_assert!(r.is_one(&p).is_true());
            } else {
                prop_assert_eq!(status, Status::DOMAIN);
            }
        }

        #[test]
        fn modular_pow_matches_generic(n in 1u64..10_000, a in any::<i64>(), e in 0u64..200) {
            let r = ModularRing::new(n).expect("valid modulus");
            let x = r.elem_from_si(a);
            let mut fast = r.init();
            let mut slow = r.init();
            prop_assert!(r.pow_ui(&mut fast, &x, e).is_success());

            // Repeated multiplication as a reference.
            prop_assert!(r.one(&mut slow).is_success());
            for _ in 0..e {
                let mut t = r.init();
                prop_assert!(r.mul(&mut t, &slow, &x).is_success());
                slow = t;
            }
            prop_assert!(r.equal(&fast, &slow).is_true());
        }

        #[test]
        fn integer_div_exact_iff_divisible(a in any::<i32>(), b in any::<i32>()) {
            let z = IntegerRing::new();
            let (x, y) = (z.elem_from_si(i64::from(a)), z.elem_from_si(i64::from(b)));
            let mut q = z.init();
            let status = z.div(&mut q, &x, &y);
            if b != 0 && i64::from(a) % i64::from(b) == 0 {
                prop_assert_eq!(status, Status::SUCCESS);
                prop_assert_eq!(IntegerRing::value(&q), &IBig::from(i64::from(a) / i64::from(b)));
            } else {
                prop_assert_eq!(status, Status::DOMAIN);
            }
        }

        #[test]
        fn integer_set_other_from_modular_is_rejected(n in 2u64..100, a in any::<i64>()) {
            let r = ModularRing::new(n).expect("valid modulus");
            let z = IntegerRing::new();
            let x: Elem = r.elem_from_si(a);
            let mut c = z.init();
            prop_assert_eq!(z.set_other(&mut c, &x, &r), Status::DOMAIN);
        }
    }

    fn gcd(mut a: u64, mut b: u64) -> u64 {
        while b != 0 {
            (a, b) = (b, a % b);
        }
        a
    }
}
