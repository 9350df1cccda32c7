//! Property-based tests for the status and truth algebras and the
//! reduction engine.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::reduce::{self, ReduceConfig, ReduceOp};
    use crate::test_ring::Zn;
    use crate::{Elem, Status, Structure, Truth};

    fn status() -> impl Strategy<Value = Status> {
        (0u8..8).prop_map(Status::from_bits)
    }

    fn truth() -> impl Strategy<Value = Truth> {
        prop_oneof![Just(Truth::True), Just(Truth::False), Just(Truth::Unknown)]
    }

    proptest! {
        #[test]
        fn status_or_is_a_semilattice(a in status(), b in status(), c in status()) {
            prop_assert_eq!(a | b, b | a);
            prop_assert_eq!((a | b) | c, a | (b | c));
            prop_assert_eq!(a | a, a);
            prop_assert_eq!(a | Status::SUCCESS, a);
        }

        #[test]
        fn status_success_iff_all_success(v in prop::collection::vec(status(), 0..16)) {
            let combined: Status = v.iter().copied().collect();
            prop_assert_eq!(combined.is_success(), v.iter().all(|s| s.is_success()));
        }

        #[test]
        fn truth_and_or_commute(a in truth(), b in truth()) {
            prop_assert_eq!(a & b, b & a);
            prop_assert_eq!(a | b, b | a);
            prop_assert_eq!(!!a, a);
        }

        #[test]
        fn truth_unknown_only_without_determining_operand(a in truth(), b in truth()) {
            if (a & b).is_unknown() {
                prop_assert!(!a.is_false() && !b.is_false());
            }
            if (a | b).is_unknown() {
                prop_assert!(!a.is_true() && !b.is_true());
            }
        }

        #[test]
        fn parallel_sum_equals_sequential(
            values in prop::collection::vec(any::<i64>(), 0..600),
            threads in 1usize..9,
            cutoff in 1usize..40,
        ) {
            let r = Zn::new(1_000_000_007);
            let v: Vec<Elem> = values.iter().map(|&x| r.elem_from_si(x)).collect();
            let config = ReduceConfig {
                basecase_cutoff: cutoff,
                parallel_cutoff: 0,
                thread_limit: Some(threads),
            };

            let mut seq = r.init();
            let mut par = r.init();
            let s1 = reduce::sum_basecase(&r, &mut seq, &v);
            let s2 = reduce::parallel_reduce(&r, ReduceOp::Sum, &mut par, &v, &config);
            prop_assert_eq!(s1, s2);
            prop_assert!(r.equal(&seq, &par).is_true());
        }
    }
}
