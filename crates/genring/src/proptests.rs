//! Property-based tests over parsed structures.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use genring_core::reduce::{self, ReduceConfig, ReduceOp};
    use genring_core::{Elem, Truth};

    use crate::parse_descriptor;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_modulus_round_trips(n in 1u64..(1u64 << 63)) {
            let ctx = parse_descriptor(&format!("nmod({n})")).unwrap();
            prop_assert_eq!(ctx.name(), format!("Integers mod {n} (nmod)"));
            let too_large = format!("nmod({})", n | (1u64 << 63));
            prop_assert!(parse_descriptor(&too_large).is_err());
        }

        #[test]
        fn prop_whitespace_is_insignificant(pad in "[ \t\n]{0,3}", n in 1usize..5) {
            let spaced = format!("{pad}mat({pad}nmod({pad}5{pad}){pad},{pad}{n}{pad}){pad}");
            let a = parse_descriptor(&spaced).unwrap();
            let b = parse_descriptor(&format!("mat(nmod(5),{n})")).unwrap();
            prop_assert_eq!(a.name(), b.name());
        }

        #[test]
        fn prop_parallel_product_matches_sequential(
            values in prop::collection::vec(-50i64..50, 0..300),
            basecase_cutoff in 1usize..32,
            threads in 1usize..6,
        ) {
            let ctx = parse_descriptor("nmod(1000000007)").unwrap();
            let v: Vec<Elem> = values.iter().map(|&x| ctx.elem_from_si(x)).collect();
            let config = ReduceConfig {
                basecase_cutoff,
                parallel_cutoff: 16,
                thread_limit: Some(threads),
            };
            for op in [ReduceOp::Sum, ReduceOp::Product] {
                let (mut seq, mut par) = (ctx.init(), ctx.init());
                let s = reduce::basecase(&*ctx, op, &mut seq, &v);
                let p = reduce::parallel_reduce(&*ctx, op, &mut par, &v, &config);
                prop_assert_eq!(s, p);
                prop_assert_eq!(ctx.equal(&seq, &par), Truth::True);
            }
        }
    }
}
