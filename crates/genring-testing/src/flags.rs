//! Harness flags.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Options for a harness run, combined with `|`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TestFlags(u8);

impl TestFlags {
    /// No options.
    pub const NONE: Self = Self(0);
    /// Log a summary line per check.
    pub const VERBOSE: Self = Self(1);
    /// Treat UNABLE as a failure.
    pub const ALWAYS_ABLE: Self = Self(2);

    /// Returns true if every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for TestFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TestFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for TestFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(Self::VERBOSE) {
            names.push("VERBOSE");
        }
        if self.contains(Self::ALWAYS_ABLE) {
            names.push("ALWAYS_ABLE");
        }
        if names.is_empty() {
            f.write_str("NONE")
        } else {
            f.write_str(&names.join(" | "))
        }
    }
}
