//! The status algebra.
//!
//! Every fallible operation returns a [`Status`]. Statuses form a small
//! bit-set lattice: results of a sequence of operations are combined with
//! bitwise OR, and a pipeline succeeded iff the combined value is exactly
//! [`Status::SUCCESS`].
//!
//! ```
//! use genring_core::Status;
//!
//! let mut status = Status::SUCCESS;
//! status |= Status::SUCCESS;
//! status |= Status::DOMAIN;
//! assert!(status.has_domain());
//! assert!(!status.has_unable());
//! ```

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use thiserror::Error;

/// Result kind of a generic operation.
///
/// `DOMAIN` and `UNABLE` are distinct on purpose: the first says the
/// mathematical input lies outside the operation's domain, the second says
/// this code path cannot decide or compute an answer that may well exist.
#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status(u8);

impl Status {
    /// The operation succeeded.
    pub const SUCCESS: Self = Self(0);
    /// The input is outside the mathematical domain of the operation.
    pub const DOMAIN: Self = Self(1);
    /// The implementation cannot determine the answer.
    pub const UNABLE: Self = Self(2);
    /// An axiom check observed inconsistent results. Harness only.
    pub const TEST_FAIL: Self = Self(4);

    const MASK: u8 = 0b111;

    /// Builds a status from raw bits, discarding unknown bits.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true iff this is exactly `SUCCESS`.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every bit of `other` is set in `self`.
    ///
    /// Note that every status contains `SUCCESS`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if the DOMAIN bit is set.
    #[must_use]
    pub const fn has_domain(self) -> bool {
        self.0 & Self::DOMAIN.0 != 0
    }

    /// Returns true if the UNABLE bit is set.
    #[must_use]
    pub const fn has_unable(self) -> bool {
        self.0 & Self::UNABLE.0 != 0
    }

    /// Returns true if the TEST_FAIL bit is set.
    #[must_use]
    pub const fn has_test_fail(self) -> bool {
        self.0 & Self::TEST_FAIL.0 != 0
    }

    /// Returns `SUCCESS` if `cond` holds and `otherwise` if not.
    pub const fn check(cond: bool, otherwise: Self) -> Self {
        if cond {
            Self::SUCCESS
        } else {
            otherwise
        }
    }

    /// Converts to a `Result`, keeping the full bit-set in the error.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError`] if the status is not `SUCCESS`.
    pub fn into_result(self) -> Result<(), StatusError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(StatusError(self))
        }
    }
}

impl BitOr for Status {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Status {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<Status> for Status {
    fn from_iter<I: IntoIterator<Item = Status>>(iter: I) -> Self {
        iter.into_iter().fold(Self::SUCCESS, |acc, s| acc | s)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            return write!(f, "SUCCESS");
        }

        let mut first = true;
        for (bit, name) in [
            (Self::DOMAIN, "DOMAIN"),
            (Self::UNABLE, "UNABLE"),
            (Self::TEST_FAIL, "TEST_FAIL"),
        ] {
            if self.0 & bit.0 != 0 {
                if !first {
                    write!(f, " | ")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status({self})")
    }
}

/// A non-success [`Status`] surfaced through `Result`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
#[error("operation failed with status {0}")]
pub struct StatusError(pub Status);

impl StatusError {
    /// Returns the underlying status.
    pub fn status(self) -> Status {
        self.0
    }
}

impl From<StatusError> for Status {
    fn from(err: StatusError) -> Self {
        err.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_combination() {
        let s = Status::SUCCESS | Status::DOMAIN;
        assert_eq!(s, Status::DOMAIN);
        assert!(!s.is_success());

        let s = s | Status::UNABLE;
        assert!(s.has_domain());
        assert!(s.has_unable());
        assert!(!s.has_test_fail());
        assert_eq!(s.bits(), 3);
    }

    #[test]
    fn test_associative_commutative() {
        let all = [
            Status::SUCCESS,
            Status::DOMAIN,
            Status::UNABLE,
            Status::TEST_FAIL,
        ];
        for &a in &all {
            for &b in &all {
                assert_eq!(a | b, b | a);
                for &c in &all {
                    assert_eq!((a | b) | c, a | (b | c));
                }
            }
        }
    }

    #[test]
    fn test_collect() {
        let s: Status = vec![Status::SUCCESS, Status::UNABLE, Status::SUCCESS]
            .into_iter()
            .collect();
        assert_eq!(s, Status::UNABLE);

        let empty: Status = std::iter::empty().collect();
        assert!(empty.is_success());
    }

    #[test]
    fn test_display() {
        assert_eq!(Status::SUCCESS.to_string(), "SUCCESS");
        assert_eq!((Status::DOMAIN | Status::UNABLE).to_string(), "DOMAIN | UNABLE");
        assert_eq!(Status::TEST_FAIL.to_string(), "TEST_FAIL");
    }

    #[test]
    fn test_into_result() {
        assert!(Status::SUCCESS.into_result().is_ok());
        let err = (Status::DOMAIN | Status::UNABLE).into_result().unwrap_err();
        assert!(err.status().has_domain());
        assert!(err.status().has_unable());
    }

    #[test]
    fn test_from_bits_masks() {
        assert_eq!(Status::from_bits(0xff).bits(), 7);
    }
}
