//! # genring-testing
//!
//! Randomized axiom checks for any runtime structure.
//!
//! This crate provides:
//! - `Check`: a named law instance `(structure, rng, flags) -> Status`
//!   with a capability gate
//! - `TestSuite`: the builtin law sheet plus user registered checks
//! - `run_all_checks`: the one-call entry point used by plugin tests
//!
//! ## Verdicts
//!
//! | Capability claim | Law holds | Law fails |
//! |------------------|-----------|-----------|
//! | TRUE             | SUCCESS   | TEST_FAIL (run aborts) |
//! | UNKNOWN          | SUCCESS   | UNABLE |
//! | FALSE            | check skipped | check skipped |
//!
//! DOMAIN and UNABLE from the operations themselves are counted, not
//! judged. With `TestFlags::ALWAYS_ABLE` an UNABLE also aborts the run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod check;
pub mod flags;
pub mod laws;
pub mod suite;

pub use check::{Check, CheckFn, Requirement};
pub use flags::TestFlags;
pub use suite::{run_all_checks, CheckCounts, HarnessConfig, TestReport, TestSuite};
