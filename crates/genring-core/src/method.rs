//! Operation identifiers.
//!
//! Every slot of the structure method table has a dense identifier. The
//! identifiers are used for diagnostics when a slot has neither a native
//! implementation nor a generic fallback.

use std::fmt;

use crate::Status;

/// A named slot of the structure method table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Method {
    Init,
    Set,
    Swap,
    Randtest,
    Write,
    Zero,
    One,
    NegOne,
    Gen,
    SetUi,
    SetSi,
    SetInt,
    SetOther,
    GetInt,
    GetFraction,
    Equal,
    IsZero,
    IsOne,
    IsNegOne,
    Cmp,
    Add,
    Sub,
    Neg,
    Mul,
    Sqr,
    MulTwo,
    MulSi,
    AddMul,
    SubMul,
    Div,
    DivExact,
    Inv,
    IsInvertible,
    PowUi,
    PowSi,
    PowInt,
    Gcd,
    Characteristic,
    Cardinality,
    VecSum,
    VecProduct,
    VecDot,
}

impl Method {
    /// Every slot, in table order.
    pub const ALL: [Method; 42] = [
        Method::Init,
        Method::Set,
        Method::Swap,
        Method::Randtest,
        Method::Write,
        Method::Zero,
        Method::One,
        Method::NegOne,
        Method::Gen,
        Method::SetUi,
        Method::SetSi,
        Method::SetInt,
        Method::SetOther,
        Method::GetInt,
        Method::GetFraction,
        Method::Equal,
        Method::IsZero,
        Method::IsOne,
        Method::IsNegOne,
        Method::Cmp,
        Method::Add,
        Method::Sub,
        Method::Neg,
        Method::Mul,
        Method::Sqr,
        Method::MulTwo,
        Method::MulSi,
        Method::AddMul,
        Method::SubMul,
        Method::Div,
        Method::DivExact,
        Method::Inv,
        Method::IsInvertible,
        Method::PowUi,
        Method::PowSi,
        Method::PowInt,
        Method::Gcd,
        Method::Characteristic,
        Method::Cardinality,
        Method::VecSum,
        Method::VecProduct,
        Method::VecDot,
    ];

    /// Dense index of the slot.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case name of the slot.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Method::Init => "init",
            Method::Set => "set",
            Method::Swap => "swap",
            Method::Randtest => "randtest",
            Method::Write => "write",
            Method::Zero => "zero",
            Method::One => "one",
            Method::NegOne => "neg_one",
            Method::Gen => "gen",
            Method::SetUi => "set_ui",
            Method::SetSi => "set_si",
            Method::SetInt => "set_int",
            Method::SetOther => "set_other",
            Method::GetInt => "get_int",
            Method::GetFraction => "get_fraction",
            Method::Equal => "equal",
            Method::IsZero => "is_zero",
            Method::IsOne => "is_one",
            Method::IsNegOne => "is_neg_one",
            Method::Cmp => "cmp",
            Method::Add => "add",
            Method::Sub => "sub",
            Method::Neg => "neg",
            Method::Mul => "mul",
            Method::Sqr => "sqr",
            Method::MulTwo => "mul_two",
            Method::MulSi => "mul_si",
            Method::AddMul => "addmul",
            Method::SubMul => "submul",
            Method::Div => "div",
            Method::DivExact => "divexact",
            Method::Inv => "inv",
            Method::IsInvertible => "is_invertible",
            Method::PowUi => "pow_ui",
            Method::PowSi => "pow_si",
            Method::PowInt => "pow_int",
            Method::Gcd => "gcd",
            Method::Characteristic => "characteristic",
            Method::Cardinality => "cardinality",
            Method::VecSum => "vec_sum",
            Method::VecProduct => "vec_product",
            Method::VecDot => "vec_dot",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reports a slot that has no implementation for `structure`.
///
/// Always returns [`Status::UNABLE`].
pub fn unimplemented(method: Method, structure: &str) -> Status {
    tracing::trace!(method = %method, structure, "operation not implemented");
    Status::UNABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_indices() {
        for (i, m) in Method::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
        }
    }

    #[test]
    fn test_unimplemented_is_unable() {
        assert_eq!(unimplemented(Method::Gcd, "test"), Status::UNABLE);
        assert_eq!(Method::AddMul.to_string(), "addmul");
    }
}
