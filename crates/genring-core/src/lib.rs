//! # genring-core
//!
//! Runtime-polymorphic algebraic structures for genring.
//!
//! This crate provides:
//! - The status algebra (`Status`): an OR-composable result bit-set
//! - Three-valued logic (`Truth`) for possibly undecidable predicates
//! - Opaque elements (`Elem`) owned by exactly one structure
//! - The `Structure` trait: method table, capability predicates and
//!   generic fallbacks
//! - A process-wide worker budget and the parallel reduction engine
//!
//! ## Dispatch Model
//!
//! ```text
//! Arc<dyn Structure>  ──vtable──▶  per-kind method table
//!        │                            ├── required slots
//!        │                            ├── generic fallbacks
//!        ▼                            └── UNABLE defaults
//!      Elem (opaque payload, interpreted only by its structure)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod elem;
pub mod method;
pub mod pool;
pub mod reduce;
pub mod status;
pub mod structure;
pub mod truth;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod test_ring;

pub use elem::Elem;
pub use method::Method;
pub use pool::{WorkerBudget, WorkerLease};
pub use reduce::{ReduceConfig, ReduceOp};
pub use status::{Status, StatusError};
pub use structure::{Ctx, Structure};
pub use truth::Truth;
