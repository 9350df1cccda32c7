//! # genring-poly
//!
//! Dense univariate polynomials over runtime structures.
//!
//! This crate provides:
//! - `GrPoly`: normalised coefficient vectors, with the structure passed
//!   alongside
//! - Classical and Karatsuba multiplication, truncated products, powers
//! - Division with remainder, power series inversion and precomputed
//!   inverses of a modulus
//! - Modular composition (Horner and Brent–Kung) and modular
//!   exponentiation (binary and sliding window)
//! - GCD and extended GCD over fields, root finding over finite rings
//! - `PolyRing`: the polynomial ring over a base, as a structure
//!
//! ## Algorithm Selection
//!
//! Thresholds live in [`PolyConfig`]:
//! - Multiplication: Karatsuba once both operands reach
//!   `karatsuba_cutoff` and the base is known commutative, else schoolbook
//! - Modular composition: Brent–Kung once the modulus reaches
//!   `compose_mod_brent_kung_cutoff`, else Horner
//! - Modular exponentiation: window width grows with the exponent's bit
//!   length unless `powmod_window` fixes it

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod compose;
pub mod div;
pub mod gcd;
pub mod mul;
pub mod poly;
pub mod poly_ring;
pub mod powmod;
pub mod roots;

#[cfg(test)]
mod proptests;

pub use div::ModulusPreinv;
pub use poly::{GrPoly, PolyConfig};
pub use poly_ring::PolyRing;
