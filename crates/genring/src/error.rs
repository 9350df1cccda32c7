//! Errors raised while turning a descriptor string into a structure.

use thiserror::Error;

/// A descriptor that does not name a constructible structure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum DescriptorError {
    /// Input ended inside an argument list.
    #[error("unexpected end of descriptor")]
    UnexpectedEnd,

    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("integer literal at offset {0} does not fit in 64 bits")]
    IntegerOverflow(usize),

    /// Input continues after a complete descriptor.
    #[error("trailing input at offset {0}")]
    TrailingInput(usize),

    #[error("unknown structure kind `{0}`")]
    UnknownKind(String),

    /// The descriptor is a bare integer.
    #[error("descriptor does not name a structure")]
    NotAStructure,

    #[error("`{kind}` expects {expected}, got {found} argument(s)")]
    Arity {
        kind: &'static str,
        expected: &'static str,
        found: usize,
    },

    #[error("`{kind}`: argument {index} must be {expected}")]
    ArgumentType {
        kind: &'static str,
        index: usize,
        expected: &'static str,
    },

    /// The constructor rejected an argument's value.
    #[error("`{kind}`: {reason}")]
    InvalidParameter { kind: &'static str, reason: String },
}
