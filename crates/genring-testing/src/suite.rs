//! The check registry, the run loop and its report.

use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use genring_core::{Status, Structure};

use crate::algorithms;
use crate::check::{self, Check, CheckFn, Requirement};
use crate::flags::TestFlags;
use crate::laws;

/// Settings for one harness run.
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    /// Instances of every check.
    pub iterations: usize,
    /// Seed of the random stream shared by all checks.
    pub seed: u64,
    /// Verbosity and UNABLE handling.
    pub flags: TestFlags,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            seed: 0x5eed,
            flags: TestFlags::NONE,
        }
    }
}

/// Outcome counts of one check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckCounts {
    /// Instances that returned SUCCESS.
    pub success: usize,
    /// Instances that returned DOMAIN.
    pub domain: usize,
    /// Instances that returned UNABLE (possibly with DOMAIN).
    pub unable: usize,
    /// Instances not run because the structure lacks the capability.
    pub skipped: usize,
}

impl CheckCounts {
    fn record(&mut self, status: Status) {
        if status.is_success() {
            self.success += 1;
        } else if status.has_unable() {
            self.unable += 1;
        } else {
            self.domain += 1;
        }
    }

    /// Instances that ran.
    #[must_use]
    pub fn ran(&self) -> usize {
        self.success + self.domain + self.unable
    }
}

/// Per-check results of a run, in registration order.
#[derive(Clone, Debug)]
pub struct TestReport {
    /// Name of the structure under test.
    pub structure: String,
    /// Counts per check name.
    pub checks: Vec<(&'static str, CheckCounts)>,
}

impl TestReport {
    /// Returns the counts of the named check.
    #[must_use]
    pub fn counts(&self, name: &str) -> Option<&CheckCounts> {
        self.checks.iter().find(|(n, _)| *n == name).map(|(_, c)| c)
    }

    /// Sums the counts over all checks.
    #[must_use]
    pub fn total(&self) -> CheckCounts {
        self.checks.iter().fold(CheckCounts::default(), |acc, (_, c)| CheckCounts {
            success: acc.success + c.success,
            domain: acc.domain + c.domain,
            unable: acc.unable + c.unable,
            skipped: acc.skipped + c.skipped,
        })
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.structure)?;
        for (name, c) in &self.checks {
            writeln!(
                f,
                "  {name:<32} success {:>5}  domain {:>5}  unable {:>5}  skipped {:>5}",
                c.success, c.domain, c.unable, c.skipped
            )?;
        }
        Ok(())
    }
}

/// An ordered set of checks.
#[derive(Clone, Debug)]
pub struct TestSuite {
    checks: Vec<Check>,
}

impl Default for TestSuite {
    /// The builtin checks.
    fn default() -> Self {
        use check::{additive, always, commutative, field, ordered, ring};

        let builtin: [(&'static str, Requirement, CheckFn); 31] = [
            ("init_set_swap", always, laws::init_set_swap),
            ("zero_one", always, laws::zero_one),
            ("set_integers", always, laws::set_integers),
            ("get_int_round_trip", always, laws::get_int_round_trip),
            ("set_other_identity", always, laws::set_other_identity),
            ("add_aliasing", additive, laws::add_aliasing),
            ("sub_aliasing", additive, laws::sub_aliasing),
            ("mul_aliasing", ring, laws::mul_aliasing),
            ("add_associative", additive, laws::add_associative),
            ("add_commutative", additive, laws::add_commutative),
            ("neg_involution", additive, laws::neg_involution),
            ("add_neg_identity", additive, laws::add_neg_identity),
            ("sub_is_add_neg", additive, laws::sub_is_add_neg),
            ("mul_associative", ring, laws::mul_associative),
            ("mul_commutative", commutative, laws::mul_commutative),
            ("distributive", ring, laws::distributive),
            ("derived_products", ring, laws::derived_products),
            ("addmul_submul", ring, laws::addmul_submul),
            ("div_then_mul", ring, laws::div_then_mul),
            ("inv_laws", ring, laws::inv_laws),
            ("invertible_matches_inv", ring, laws::invertible_matches_inv),
            ("pow_exponent_law", ring, laws::pow_exponent_law),
            ("pow_si", ring, laws::pow_si_law),
            ("cmp_antisymmetry", ordered, laws::cmp_antisymmetry),
            ("vec_sum_parallel", additive, algorithms::vec_sum_parallel),
            ("vec_product_parallel", ring, algorithms::vec_product_parallel),
            ("vec_dot_linearity", ring, algorithms::vec_dot_linearity),
            ("mat_mul_associative", ring, algorithms::mat_mul_associative),
            ("lu_reconstruction", field, algorithms::lu_reconstruction),
            ("poly_mul_commutative", commutative, algorithms::poly_mul_commutative),
            ("poly_divrem_reconstruction", commutative, algorithms::poly_divrem_reconstruction),
        ];

        Self {
            checks: builtin
                .into_iter()
                .map(|(name, requires, run)| Check::requiring(name, requires, run))
                .collect(),
        }
    }
}

impl TestSuite {
    /// A suite without checks.
    #[must_use]
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// Adds a check after the existing ones.
    pub fn register(&mut self, check: Check) -> &mut Self {
        self.checks.push(check);
        self
    }

    /// Returns the registered checks.
    #[must_use]
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Runs every check `config.iterations` times.
    ///
    /// # Panics
    ///
    /// Panics when an instance returns TEST_FAIL, or UNABLE while
    /// [`TestFlags::ALWAYS_ABLE`] is set.
    #[must_use]
    pub fn run(&self, ctx: &dyn Structure, config: &HarnessConfig) -> TestReport {
        let structure = ctx.name();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut report = TestReport {
            structure: structure.clone(),
            checks: Vec::with_capacity(self.checks.len()),
        };

        for check in &self.checks {
            let mut counts = CheckCounts::default();
            if (check.requires)(ctx).is_false() {
                counts.skipped = config.iterations;
            } else {
                for iteration in 0..config.iterations {
                    let status = (check.run)(ctx, &mut rng, config.flags);
                    let fatal = status.has_test_fail()
                        || (status.has_unable() && config.flags.contains(TestFlags::ALWAYS_ABLE));
                    if fatal {
                        tracing::error!(check = check.name, structure = %structure, iteration, %status, "check failed");
                        panic!("{} failed on {structure} (iteration {iteration}): {status}", check.name);
                    }
                    counts.record(status);
                }
            }

            if config.flags.contains(TestFlags::VERBOSE) {
                tracing::info!(
                    check = check.name,
                    structure = %structure,
                    success = counts.success,
                    domain = counts.domain,
                    unable = counts.unable,
                    skipped = counts.skipped,
                    "check finished"
                );
            }
            report.checks.push((check.name, counts));
        }
        report
    }
}

/// Runs the builtin suite over `ctx`.
///
/// # Panics
///
/// See [`TestSuite::run`].
#[must_use]
pub fn run_all_checks(ctx: &dyn Structure, iterations: usize, flags: TestFlags) -> TestReport {
    let config = HarnessConfig {
        iterations,
        flags,
        ..HarnessConfig::default()
    };
    TestSuite::default().run(ctx, &config)
}
