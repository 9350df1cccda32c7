//! # genring-rings
//!
//! Builtin structure plugins for genring.
//!
//! This crate provides:
//! - `IntegerRing` (ZZ): arbitrary precision integers
//! - `RationalField` (QQ): arbitrary precision rationals
//! - `ModularRing` (nmod): integers modulo a word-size n
//! - `RealFloat` (RR64): machine floating point, an inexact structure
//!
//! Each plugin supplies the required slots of `Structure` plus fast
//! overrides where its representation allows; everything else comes from
//! the generic fallbacks in `genring-core`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod float;
pub mod integers;
pub mod modular;
pub mod rationals;

#[cfg(test)]
mod proptests;

pub use float::RealFloat;
pub use integers::IntegerRing;
pub use modular::ModularRing;
pub use rationals::RationalField;

use dashu::integer::{IBig, UBig};
use rand::{Rng, RngCore};

/// Draws a random integer of at most `bits` bits with a random sign.
pub(crate) fn random_ibig(rng: &mut dyn RngCore, bits: usize) -> IBig {
    let mut mag = UBig::ZERO;
    let mut remaining = bits;
    while remaining > 0 {
        let take = remaining.min(64);
        let limb = if take == 64 {
            rng.next_u64()
        } else {
            rng.next_u64() & ((1u64 << take) - 1)
        };
        mag = (mag << take) + UBig::from(limb);
        remaining -= take;
    }
    let v = IBig::from(mag);
    if rng.gen_bool(0.5) {
        -v
    } else {
        v
    }
}
