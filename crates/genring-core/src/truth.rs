//! Three-valued logic for predicates that may be undecidable.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// Result of a predicate: true, false, or unknown.
///
/// Combinators follow Kleene's strong three-valued logic: `Unknown`
/// propagates unless a determining operand short-circuits it
/// (`False & Unknown == False`, `True | Unknown == True`).
#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Truth {
    /// The predicate holds.
    True,
    /// The predicate does not hold.
    False,
    /// The predicate could not be decided.
    Unknown,
}

impl Truth {
    /// Returns true iff this is `True`.
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    /// Returns true iff this is `False`.
    #[must_use]
    pub const fn is_false(self) -> bool {
        matches!(self, Self::False)
    }

    /// Returns true iff this is `Unknown`.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Three-valued negation.
    pub const fn not(self) -> Self {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Unknown => Self::Unknown,
        }
    }

    /// Three-valued conjunction.
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::False, _) | (_, Self::False) => Self::False,
            (Self::True, Self::True) => Self::True,
            _ => Self::Unknown,
        }
    }

    /// Three-valued disjunction.
    pub const fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::True, _) | (_, Self::True) => Self::True,
            (Self::False, Self::False) => Self::False,
            _ => Self::Unknown,
        }
    }

    /// Returns `Some(bool)` when decided.
    #[must_use]
    pub const fn to_option(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unknown => None,
        }
    }

    /// Conjunction over an iterator. Stops at the first `False`.
    pub fn all<I: IntoIterator<Item = Truth>>(iter: I) -> Self {
        let mut acc = Self::True;
        for t in iter {
            if t.is_false() {
                return Self::False;
            }
            acc = acc.and(t);
        }
        acc
    }

    /// Disjunction over an iterator. Stops at the first `True`.
    pub fn any<I: IntoIterator<Item = Truth>>(iter: I) -> Self {
        let mut acc = Self::False;
        for t in iter {
            if t.is_true() {
                return Self::True;
            }
            acc = acc.or(t);
        }
        acc
    }
}

impl From<bool> for Truth {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl Not for Truth {
    type Output = Self;

    fn not(self) -> Self::Output {
        Truth::not(self)
    }
}

impl BitAnd for Truth {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for Truth {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::True => "T_TRUE",
            Self::False => "T_FALSE",
            Self::Unknown => "T_UNKNOWN",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::Truth::{False as F, True as T, Unknown as U};
    use super::*;

    #[test]
    fn test_and_table() {
        assert_eq!(T & T, T);
        assert_eq!(T & F, F);
        assert_eq!(T & U, U);
        assert_eq!(F & U, F);
        assert_eq!(U & F, F);
        assert_eq!(U & U, U);
    }

    #[test]
    fn test_or_table() {
        assert_eq!(F | F, F);
        assert_eq!(T | F, T);
        assert_eq!(F | U, U);
        assert_eq!(T | U, T);
        assert_eq!(U | T, T);
        assert_eq!(U | U, U);
    }

    #[test]
    fn test_not() {
        assert_eq!(!T, F);
        assert_eq!(!F, T);
        assert_eq!(!U, U);
    }

    #[test]
    fn test_de_morgan() {
        for a in [T, F, U] {
            for b in [T, F, U] {
                assert_eq!(!(a & b), !a | !b);
                assert_eq!(!(a | b), !a & !b);
            }
        }
    }

    #[test]
    fn test_all_any() {
        assert_eq!(Truth::all([T, T]), T);
        assert_eq!(Truth::all([T, U, T]), U);
        assert_eq!(Truth::all([U, F]), F);
        assert_eq!(Truth::all([]), T);
        assert_eq!(Truth::any([F, U]), U);
        assert_eq!(Truth::any([U, T]), T);
        assert_eq!(Truth::any([]), F);
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(Truth::from(true), T);
        assert_eq!(Truth::from(false).to_option(), Some(false));
        assert_eq!(U.to_option(), None);
    }
}
