//! Named structure constructors.
//!
//! A [`Registry`] maps a kind name such as `nmod` or `poly` to a
//! [`Constructor`] that builds the structure from parsed arguments. The
//! builtin kinds are:
//!
//! | Kind   | Arguments            | Structure                          |
//! |--------|----------------------|------------------------------------|
//! | `ZZ`   | none                 | [`IntegerRing`]                    |
//! | `QQ`   | none                 | [`RationalField`]                  |
//! | `RR64` | none                 | [`RealFloat`]                      |
//! | `nmod` | `n`                  | [`ModularRing`], `1 <= n < 2^63`   |
//! | `vec`  | `S` or `S, n`        | [`VectorRing`], any or fixed length |
//! | `mat`  | `S, n` or `S, r, c`  | [`MatrixRing`]                     |
//! | `poly` | `S` or `S, var`      | [`PolyRing`]                       |

use std::ops::RangeInclusive;
use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;

use genring_core::Ctx;
use genring_linalg::{MatrixRing, VectorRing};
use genring_poly::PolyRing;
use genring_rings::{IntegerRing, ModularRing, RationalField, RealFloat};

use crate::descriptor::Parser;
use crate::error::DescriptorError;

/// A parsed constructor argument.
#[derive(Clone, Debug)]
pub enum Arg {
    /// A nested structure, e.g. the `QQ` in `mat(QQ, 2, 2)`.
    Structure(Ctx),
    /// A non-negative integer literal.
    Int(u64),
    /// A bare identifier that names no registered kind.
    Ident(String),
}

impl Arg {
    fn describe(&self) -> &'static str {
        match self {
            Self::Structure(_) => "a structure",
            Self::Int(_) => "an integer",
            Self::Ident(_) => "an identifier",
        }
    }
}

/// Builds a structure from its arguments.
pub type Constructor = fn(&[Arg]) -> Result<Ctx, DescriptorError>;

/// Kind name to constructor table.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    kinds: FxHashMap<String, Constructor>,
}

static BUILTIN: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the builtin kinds.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register("ZZ", build_zz)
            .register("QQ", build_qq)
            .register("RR64", build_rr64)
            .register("nmod", build_nmod)
            .register("vec", build_vec)
            .register("mat", build_mat)
            .register("poly", build_poly);
        registry
    }

    /// The process-wide builtin registry, built on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        BUILTIN.get_or_init(Self::builtin)
    }

    /// Registers `ctor` under `kind`, replacing any previous entry.
    pub fn register(&mut self, kind: &str, ctor: Constructor) -> &mut Self {
        if self.kinds.insert(kind.to_string(), ctor).is_some() {
            tracing::debug!(kind, "replaced structure kind");
        }
        self
    }

    /// Returns true if `kind` is registered.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// The registered kind names, sorted.
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Builds `kind` from already-parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::UnknownKind`] for an unregistered kind,
    /// or whatever the constructor rejects.
    pub fn build(&self, kind: &str, args: &[Arg]) -> Result<Ctx, DescriptorError> {
        let ctor = self
            .kinds
            .get(kind)
            .ok_or_else(|| DescriptorError::UnknownKind(kind.to_string()))?;
        let ctx = ctor(args)?;
        tracing::trace!(kind, structure = %ctx, "built structure");
        Ok(ctx)
    }

    /// Parses a descriptor such as `poly(nmod(7), t)` into a structure.
    ///
    /// # Errors
    ///
    /// Returns a [`DescriptorError`] for malformed input, unknown kinds
    /// and rejected arguments.
    pub fn parse(&self, descriptor: &str) -> Result<Ctx, DescriptorError> {
        let ctx = Parser::new(self, descriptor).parse()?;
        tracing::debug!(descriptor, structure = %ctx, "parsed descriptor");
        Ok(ctx)
    }
}

/// Parses `descriptor` against the builtin registry.
///
/// # Errors
///
/// See [`Registry::parse`].
pub fn parse_descriptor(descriptor: &str) -> Result<Ctx, DescriptorError> {
    Registry::global().parse(descriptor)
}

fn arity(
    kind: &'static str,
    expected: &'static str,
    args: &[Arg],
    range: RangeInclusive<usize>,
) -> Result<(), DescriptorError> {
    if range.contains(&args.len()) {
        Ok(())
    } else {
        Err(DescriptorError::Arity {
            kind,
            expected,
            found: args.len(),
        })
    }
}

fn mismatch(kind: &'static str, index: usize, expected: &'static str, found: &Arg) -> DescriptorError {
    tracing::trace!(kind, index, found = found.describe(), "argument type mismatch");
    DescriptorError::ArgumentType { kind, index, expected }
}

fn structure_arg(kind: &'static str, args: &[Arg], index: usize) -> Result<Ctx, DescriptorError> {
    match &args[index] {
        Arg::Structure(ctx) => Ok(ctx.clone()),
        other => Err(mismatch(kind, index, "a structure", other)),
    }
}

fn size_arg(kind: &'static str, args: &[Arg], index: usize) -> Result<usize, DescriptorError> {
    match &args[index] {
        Arg::Int(n) => usize::try_from(*n).map_err(|_| DescriptorError::InvalidParameter {
            kind,
            reason: format!("size {n} is too large"),
        }),
        other => Err(mismatch(kind, index, "an integer", other)),
    }
}

fn build_zz(args: &[Arg]) -> Result<Ctx, DescriptorError> {
    arity("ZZ", "no arguments", args, 0..=0)?;
    Ok(Arc::new(IntegerRing::new()))
}

fn build_qq(args: &[Arg]) -> Result<Ctx, DescriptorError> {
    arity("QQ", "no arguments", args, 0..=0)?;
    Ok(Arc::new(RationalField::new()))
}

fn build_rr64(args: &[Arg]) -> Result<Ctx, DescriptorError> {
    arity("RR64", "no arguments", args, 0..=0)?;
    Ok(Arc::new(RealFloat::new()))
}

fn build_nmod(args: &[Arg]) -> Result<Ctx, DescriptorError> {
    arity("nmod", "a modulus", args, 1..=1)?;
    let n = match &args[0] {
        Arg::Int(n) => *n,
        other => return Err(mismatch("nmod", 0, "an integer", other)),
    };
    let ring = ModularRing::new(n).ok_or_else(|| DescriptorError::InvalidParameter {
        kind: "nmod",
        reason: format!("modulus must be in [1, 2^63), got {n}"),
    })?;
    Ok(Arc::new(ring))
}

fn build_vec(args: &[Arg]) -> Result<Ctx, DescriptorError> {
    arity("vec", "a base and an optional length", args, 1..=2)?;
    let base = structure_arg("vec", args, 0)?;
    if args.len() == 1 {
        return Ok(Arc::new(VectorRing::any_length(base)));
    }
    let len = size_arg("vec", args, 1)?;
    Ok(Arc::new(VectorRing::new(base, len)))
}

fn build_mat(args: &[Arg]) -> Result<Ctx, DescriptorError> {
    arity("mat", "a base with one or two dimensions", args, 2..=3)?;
    let base = structure_arg("mat", args, 0)?;
    let nrows = size_arg("mat", args, 1)?;
    let ncols = if args.len() == 3 { size_arg("mat", args, 2)? } else { nrows };
    Ok(Arc::new(MatrixRing::new(base, nrows, ncols)))
}

fn build_poly(args: &[Arg]) -> Result<Ctx, DescriptorError> {
    arity("poly", "a base and an optional variable", args, 1..=2)?;
    let base = structure_arg("poly", args, 0)?;
    match args.get(1) {
        None => Ok(Arc::new(PolyRing::new(base))),
        Some(Arg::Ident(var)) => Ok(Arc::new(PolyRing::with_var(base, var))),
        Some(other) => Err(mismatch("poly", 1, "a variable name", other)),
    }
}
