//! # genring
//!
//! Generic rings with runtime dispatch.
//!
//! Every structure (integers, rationals, residues, vectors, matrices,
//! polynomials over any of these) is a value implementing one
//! `Structure` trait, so algorithms are written once and run over any
//! ring chosen at runtime.
//!
//! ## Features
//!
//! - **Status Algebra**: OR-composable `SUCCESS | DOMAIN | UNABLE` results
//! - **Three-Valued Predicates**: `True`, `False` and `Unknown`
//! - **Composable Structures**: vectors, matrices and polynomials over
//!   any base, nested arbitrarily
//! - **Parallel Reduction**: balanced splitting under a global worker budget
//! - **Axiom Harness**: randomized law checks gated by capabilities
//! - **Descriptors**: build structures from strings like `poly(nmod(7), t)`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use genring::prelude::*;
//!
//! let ctx = parse_descriptor("nmod(7)")?;
//! let (mut x, three, five) = (ctx.init(), ctx.elem_from_si(3), ctx.elem_from_si(5));
//! ctx.add(&mut x, &three, &five).into_result()?;
//! assert_eq!(ctx.format_elem(&x), "1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod descriptor;
pub mod error;
pub mod registry;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

pub use error::DescriptorError;
pub use registry::{parse_descriptor, Arg, Constructor, Registry};

pub use genring_core as core;
pub use genring_linalg as linalg;
pub use genring_poly as poly;
pub use genring_rings as rings;
pub use genring_testing as testing;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{parse_descriptor, DescriptorError, Registry};
    pub use genring_core::{Ctx, Elem, ReduceConfig, Status, Structure, Truth};
    pub use genring_linalg::{GrMat, MatrixRing, VectorRing};
    pub use genring_poly::{GrPoly, PolyRing};
    pub use genring_rings::{IntegerRing, ModularRing, RationalField, RealFloat};
    pub use genring_testing::{run_all_checks, TestFlags};
}
