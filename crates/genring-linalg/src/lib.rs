//! # genring-linalg
//!
//! Generic vectors and dense matrices over runtime structures.
//!
//! This crate provides:
//! - Vector algorithms over slices of elements of one structure
//! - Dense row-major matrices with LU, rank, RREF, solve and inverse
//! - Determinants with strategy selection by the base's capabilities
//! - `VectorRing` and `MatrixRing`: composite structures that wrap a base
//!
//! ## Algorithm Selection
//!
//! Determinants pick the cheapest exact method the base supports:
//! - Fields: LU decomposition with a permutation sign
//! - Integral domains: Bareiss elimination with exact division
//! - Small commutative rings (n ≤ 4): cofactor expansion
//! - Other commutative rings: Berkowitz, division free

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dense_matrix;
pub mod mat_ring;
pub mod vec_ring;
pub mod vector;

pub use dense_matrix::GrMat;
pub use mat_ring::MatrixRing;
pub use vec_ring::VectorRing;
pub use vector::GrVec;
