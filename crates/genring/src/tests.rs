//! End-to-end scenarios over structures built from descriptors.

#[cfg(test)]
mod integration_tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tracing_subscriber::EnvFilter;

    use genring_core::reduce::{self, ReduceConfig, ReduceOp};
    use genring_linalg::{dense_matrix, vector, GrMat};
    use genring_poly::{roots, GrPoly};

    use crate::prelude::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_residue_arithmetic() {
        let f7 = parse_descriptor("nmod(7)").unwrap();
        let (three, five) = (f7.elem_from_si(3), f7.elem_from_si(5));
        let mut x = f7.init();
        assert!(f7.add(&mut x, &three, &five).is_success());
        assert_eq!(f7.format_elem(&x), "1");

        let mut inv = f7.init();
        assert!(f7.inv(&mut inv, &three).is_success());
        assert!(f7.mul(&mut x, &three, &inv).is_success());
        assert_eq!(f7.is_one(&x), Truth::True);
    }

    #[test]
    fn test_non_unit_is_domain() {
        let z6 = parse_descriptor("nmod(6)").unwrap();
        let mut x = z6.init();
        assert_eq!(z6.inv(&mut x, &z6.elem_from_si(2)), Status::DOMAIN);
        assert_eq!(z6.is_invertible(&z6.elem_from_si(2)), Truth::False);
        assert_eq!(z6.is_invertible(&z6.elem_from_si(5)), Truth::True);
    }

    #[test]
    fn test_empty_reductions() {
        let zz = parse_descriptor("ZZ").unwrap();
        let mut x = zz.init();
        assert!(vector::sum(&*zz, &mut x, &[]).is_success());
        assert_eq!(zz.is_zero(&x), Truth::True);
        assert!(vector::product(&*zz, &mut x, &[]).is_success());
        assert_eq!(zz.is_one(&x), Truth::True);
    }

    #[test]
    fn test_parallel_sum_matches_sequential() {
        let zz = parse_descriptor("ZZ").unwrap();
        let v: Vec<Elem> = (1..=5000).map(|i| zz.elem_from_si(i)).collect();
        let config = ReduceConfig {
            parallel_cutoff: 64,
            thread_limit: Some(4),
            ..ReduceConfig::default()
        };
        let (mut seq, mut par) = (zz.init(), zz.init());
        assert!(reduce::basecase(&*zz, ReduceOp::Sum, &mut seq, &v).is_success());
        assert!(reduce::parallel_reduce(&*zz, ReduceOp::Sum, &mut par, &v, &config).is_success());
        assert_eq!(zz.format_elem(&par), "12502500");
        assert_eq!(zz.equal(&seq, &par), Truth::True);
    }

    #[test]
    fn test_integer_determinant() {
        let zz = parse_descriptor("ZZ").unwrap();
        let a = GrMat::from_si(&*zz, 2, 2, &[1, 2, 3, 4]);
        let mut d = zz.init();
        assert!(dense_matrix::det(&*zz, &mut d, &a).is_success());
        assert_eq!(zz.format_elem(&d), "-2");
    }

    #[test]
    fn test_composites_over_integers() {
        let zx = parse_descriptor("poly(ZZ)").unwrap();
        let (mut num, mut den) = (zx.init(), zx.init());
        assert!(zx.set_si(&mut den, 2).is_success());
        let mut x = zx.init();
        assert!(zx.gen(&mut x).is_success());
        assert!(zx.mul_si(&mut num, &x, 2).is_success());
        let t = zx.clone_elem(&num);
        assert!(zx.add_si(&mut num, &t, 2).is_success());

        let mut q = zx.init();
        assert!(zx.div(&mut q, &num, &den).is_success());
        assert_eq!(zx.format_elem(&q), "1 + x");
        assert!(zx.divexact(&mut q, &num, &den).is_success());
        assert_eq!(zx.format_elem(&q), "1 + x");
        assert_eq!(zx.div(&mut q, &x, &den), Status::DOMAIN);

        let a = GrMat::from_si(&*zx, 3, 3, &[2, 1, 0, 1, 3, 1, 0, 1, 4]);
        let mut d = zx.init();
        assert!(dense_matrix::det(&*zx, &mut d, &a).is_success());
        assert_eq!(zx.format_elem(&d), "18");

        let m = parse_descriptor("mat(ZZ, 2)").unwrap();
        let z = parse_descriptor("ZZ").unwrap();
        let unimodular = Elem::new(GrMat::from_si(&*z, 2, 2, &[2, 1, 1, 1]));
        let doubled = Elem::new(GrMat::from_si(&*z, 2, 2, &[2, 0, 0, 2]));
        let mut inv = m.init();
        assert!(m.inv(&mut inv, &unimodular).is_success());
        assert_eq!(m.is_invertible(&unimodular), Truth::True);
        assert_eq!(m.inv(&mut inv, &doubled), Status::DOMAIN);
        assert_eq!(m.is_invertible(&doubled), Truth::False);

        let m6 = parse_descriptor("mat(nmod(6), 2)").unwrap();
        let z6 = parse_descriptor("nmod(6)").unwrap();
        let a6 = Elem::new(GrMat::from_si(&*z6, 2, 2, &[2, 1, 1, 0]));
        assert_eq!(m6.is_invertible(&a6), Truth::True);
    }

    #[test]
    fn test_integer_roots() {
        let zz = parse_descriptor("ZZ").unwrap();
        // (x - 1)(x + 2)^2 = x^3 + 3x^2 - 4
        let f = GrPoly::from_coeffs_si(&*zz, &[-4, 0, 3, 1]);
        let (mut found, mut mults) = (Vec::new(), Vec::new());
        assert!(roots::roots(&*zz, &mut found, &mut mults, &f).is_success());
        let shown: Vec<String> = found.iter().map(|r| zz.format_elem(r)).collect();
        assert_eq!(shown, ["-2", "1"]);
        assert_eq!(mults, [2, 1]);
    }

    #[test]
    fn test_residues_do_not_cross_moduli() {
        let (f5, f7) = (parse_descriptor("nmod(5)").unwrap(), parse_descriptor("nmod(7)").unwrap());
        let mut y = f7.init();
        assert_eq!(f7.set_other(&mut y, &f5.elem_from_si(3), &*f5), Status::DOMAIN);
        let zz = parse_descriptor("ZZ").unwrap();
        assert!(f7.set_other(&mut y, &zz.elem_from_si(10), &*zz).is_success());
        assert_eq!(f7.format_elem(&y), "3");
    }

    #[test]
    fn test_roots_over_prime_field() {
        let f7 = parse_descriptor("nmod(7)").unwrap();
        // (x - 1)(x - 2)^2 = x^3 - 5x^2 + 8x - 4
        let f = GrPoly::from_coeffs_si(&*f7, &[-4, 8, -5, 1]);
        let (mut found, mut mults) = (Vec::new(), Vec::new());
        assert!(roots::roots(&*f7, &mut found, &mut mults, &f).is_success());
        let shown: Vec<String> = found.iter().map(|r| f7.format_elem(r)).collect();
        assert_eq!(shown, ["1", "2"]);
        assert_eq!(mults, [1, 2]);
    }

    #[test]
    fn test_polynomial_ring_from_descriptor() {
        let ring = parse_descriptor("poly(QQ, t)").unwrap();
        let mut t = ring.init();
        assert!(ring.gen(&mut t).is_success());
        let mut sq = ring.init();
        assert!(ring.add_si(&mut sq, &t, 1).is_success());
        let base = ring.clone_elem(&sq);
        assert!(ring.pow_ui(&mut sq, &base, 2).is_success());
        assert_eq!(ring.format_elem(&sq), "1 + 2*t + t^2");
    }

    #[test]
    fn test_harness_over_descriptors() {
        init_tracing();
        for descriptor in [
            "ZZ",
            "QQ",
            "nmod(7)",
            "nmod(12)",
            "vec(nmod(5), 3)",
            "vec(QQ)",
            "mat(QQ, 2)",
            "mat(nmod(4), 2, 3)",
            "poly(nmod(7))",
            "poly(ZZ, t)",
        ] {
            let ctx = parse_descriptor(descriptor).unwrap();
            let report = run_all_checks(&*ctx, 25, TestFlags::NONE);
            assert!(report.total().ran() > 0, "{descriptor}: {report}");
        }
    }

    #[test]
    fn test_harness_seed_is_reproducible() {
        let ctx = parse_descriptor("poly(nmod(6))").unwrap();
        let config = genring_testing::HarnessConfig {
            iterations: 30,
            seed: 7,
            flags: TestFlags::NONE,
        };
        let suite = genring_testing::TestSuite::default();
        let first = suite.run(&*ctx, &config);
        let second = suite.run(&*ctx, &config);
        assert_eq!(first.checks, second.checks);
    }

    #[test]
    fn test_random_elements_are_owned_by_their_structure() {
        let ctx = parse_descriptor("mat(poly(nmod(3)), 2)").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (mut a, mut b) = (ctx.init(), ctx.init());
        assert!(ctx.randtest(&mut a, &mut rng).is_success());
        assert!(ctx.set(&mut b, &a).is_success());
        assert_eq!(ctx.equal(&a, &b), Truth::True);
    }
}
