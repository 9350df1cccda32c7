//! Vectors of elements over a runtime structure.
//!
//! The free functions operate on slices and dispatch every entry through
//! the base structure. Length mismatches are reported as DOMAIN. The
//! owned [`GrVec`] wraps a `Vec<Elem>` and is the only place where a
//! vector's length changes, through [`GrVec::set_length`].

use std::fmt;

use rand::RngCore;

use genring_core::{Elem, Status, Structure, Truth};

/// Returns `len` fresh zero elements.
#[must_use]
pub fn init(ctx: &dyn Structure, len: usize) -> Vec<Elem> {
    (0..len).map(|_| ctx.init()).collect()
}

/// Returns copies of `src`.
#[must_use]
pub fn clone_all(ctx: &dyn Structure, src: &[Elem]) -> Vec<Elem> {
    src.iter().map(|x| ctx.clone_elem(x)).collect()
}

/// `res[i] = src[i]`.
pub fn set(ctx: &dyn Structure, res: &mut [Elem], src: &[Elem]) -> Status {
    if res.len() != src.len() {
        return Status::DOMAIN;
    }
    res.iter_mut()
        .zip(src)
        .map(|(r, x)| ctx.set(r, x))
        .collect()
}

/// Sets every entry to zero.
pub fn zero(ctx: &dyn Structure, res: &mut [Elem]) -> Status {
    res.iter_mut().map(|r| ctx.zero(r)).collect()
}

/// `res[i] = -src[i]`.
pub fn neg(ctx: &dyn Structure, res: &mut [Elem], src: &[Elem]) -> Status {
    if res.len() != src.len() {
        return Status::DOMAIN;
    }
    res.iter_mut()
        .zip(src)
        .map(|(r, x)| ctx.neg(r, x))
        .collect()
}

/// `res[i] = -res[i]`.
pub fn neg_assign(ctx: &dyn Structure, res: &mut [Elem]) -> Status {
    res.iter_mut().map(|r| ctx.neg_assign(r)).collect()
}

fn zip_with(
    res: &mut [Elem],
    a: &[Elem],
    b: &[Elem],
    mut op: impl FnMut(&mut Elem, &Elem, &Elem) -> Status,
) -> Status {
    if res.len() != a.len() || a.len() != b.len() {
        return Status::DOMAIN;
    }
    let mut status = Status::SUCCESS;
    for ((r, x), y) in res.iter_mut().zip(a).zip(b) {
        status |= op(r, x, y);
    }
    status
}

/// `res[i] = a[i] + b[i]`.
pub fn add(ctx: &dyn Structure, res: &mut [Elem], a: &[Elem], b: &[Elem]) -> Status {
    zip_with(res, a, b, |r, x, y| ctx.add(r, x, y))
}

/// `res[i] = a[i] - b[i]`.
pub fn sub(ctx: &dyn Structure, res: &mut [Elem], a: &[Elem], b: &[Elem]) -> Status {
    zip_with(res, a, b, |r, x, y| ctx.sub(r, x, y))
}

/// `res[i] = a[i] * b[i]`.
pub fn mul(ctx: &dyn Structure, res: &mut [Elem], a: &[Elem], b: &[Elem]) -> Status {
    zip_with(res, a, b, |r, x, y| ctx.mul(r, x, y))
}

/// `res[i] += a[i]`.
pub fn add_assign(ctx: &dyn Structure, res: &mut [Elem], a: &[Elem]) -> Status {
    if res.len() != a.len() {
        return Status::DOMAIN;
    }
    res.iter_mut()
        .zip(a)
        .map(|(r, x)| ctx.add_assign(r, x))
        .collect()
}

/// `res[i] -= a[i]`.
pub fn sub_assign(ctx: &dyn Structure, res: &mut [Elem], a: &[Elem]) -> Status {
    if res.len() != a.len() {
        return Status::DOMAIN;
    }
    res.iter_mut()
        .zip(a)
        .map(|(r, x)| ctx.sub_assign(r, x))
        .collect()
}

/// `res[i] = a[i] * c`.
pub fn mul_scalar(ctx: &dyn Structure, res: &mut [Elem], a: &[Elem], c: &Elem) -> Status {
    if res.len() != a.len() {
        return Status::DOMAIN;
    }
    res.iter_mut()
        .zip(a)
        .map(|(r, x)| ctx.mul(r, x, c))
        .collect()
}

/// `res[i] = c * a[i]`.
pub fn scalar_mul(ctx: &dyn Structure, res: &mut [Elem], c: &Elem, a: &[Elem]) -> Status {
    if res.len() != a.len() {
        return Status::DOMAIN;
    }
    res.iter_mut()
        .zip(a)
        .map(|(r, x)| ctx.mul(r, c, x))
        .collect()
}

/// `res[i] = a[i] * c` for a machine integer `c`.
pub fn mul_scalar_si(ctx: &dyn Structure, res: &mut [Elem], a: &[Elem], c: i64) -> Status {
    if res.len() != a.len() {
        return Status::DOMAIN;
    }
    res.iter_mut()
        .zip(a)
        .map(|(r, x)| ctx.mul_si(r, x, c))
        .collect()
}

/// `res[i] += a[i] * c`.
pub fn addmul_scalar(ctx: &dyn Structure, res: &mut [Elem], a: &[Elem], c: &Elem) -> Status {
    if res.len() != a.len() {
        return Status::DOMAIN;
    }
    res.iter_mut()
        .zip(a)
        .map(|(r, x)| ctx.addmul(r, x, c))
        .collect()
}

/// `res[i] -= a[i] * c`.
pub fn submul_scalar(ctx: &dyn Structure, res: &mut [Elem], a: &[Elem], c: &Elem) -> Status {
    if res.len() != a.len() {
        return Status::DOMAIN;
    }
    res.iter_mut()
        .zip(a)
        .map(|(r, x)| ctx.submul(r, x, c))
        .collect()
}

/// `res[i] -= c * a[i]`, multiplying from the left.
pub fn submul_scalar_left(ctx: &dyn Structure, res: &mut [Elem], c: &Elem, a: &[Elem]) -> Status {
    if res.len() != a.len() {
        return Status::DOMAIN;
    }
    let mut t = ctx.init();
    let mut status = Status::SUCCESS;
    for (r, x) in res.iter_mut().zip(a) {
        status |= ctx.mul(&mut t, c, x);
        status |= ctx.sub_assign(r, &t);
    }
    status
}

/// Entrywise equality. Vectors of different lengths are not equal.
pub fn equal(ctx: &dyn Structure, a: &[Elem], b: &[Elem]) -> Truth {
    if a.len() != b.len() {
        return Truth::False;
    }
    Truth::all(a.iter().zip(b).map(|(x, y)| ctx.equal(x, y)))
}

/// Tests whether every entry is zero. The empty vector is zero.
pub fn is_zero(ctx: &dyn Structure, a: &[Elem]) -> Truth {
    Truth::all(a.iter().map(|x| ctx.is_zero(x)))
}

/// `res = initial ± sum(a[i] * b[i])`.
pub fn dot(
    ctx: &dyn Structure,
    res: &mut Elem,
    initial: Option<&Elem>,
    subtract: bool,
    a: &[Elem],
    b: &[Elem],
) -> Status {
    ctx.vec_dot(res, initial, subtract, a, b)
}

/// `res = initial ± sum(a[i] * b[n - 1 - i])`.
///
/// This is the inner loop of classical polynomial multiplication.
pub fn dot_rev(
    ctx: &dyn Structure,
    res: &mut Elem,
    initial: Option<&Elem>,
    subtract: bool,
    a: &[Elem],
    b: &[Elem],
) -> Status {
    if a.len() != b.len() {
        return Status::DOMAIN;
    }

    let mut status = match initial {
        Some(s) => ctx.set(res, s),
        None => ctx.zero(res),
    };
    let mut t = ctx.init();
    for (x, y) in a.iter().zip(b.iter().rev()) {
        status |= ctx.mul(&mut t, x, y);
        status |= if subtract {
            ctx.sub_assign(res, &t)
        } else {
            ctx.add_assign(res, &t)
        };
    }
    status
}

/// `res = sum(v)`; zero for the empty vector.
pub fn sum(ctx: &dyn Structure, res: &mut Elem, v: &[Elem]) -> Status {
    ctx.vec_sum(res, v)
}

/// `res = prod(v)`; one for the empty vector.
pub fn product(ctx: &dyn Structure, res: &mut Elem, v: &[Elem]) -> Status {
    ctx.vec_product(res, v)
}

/// Sets every entry to a random element.
pub fn randtest(ctx: &dyn Structure, res: &mut [Elem], rng: &mut dyn RngCore) -> Status {
    res.iter_mut().map(|r| ctx.randtest(r, rng)).collect()
}

/// Exchanges the contents of two vectors of equal length.
pub fn swap(a: &mut [Elem], b: &mut [Elem]) -> Status {
    if a.len() != b.len() {
        return Status::DOMAIN;
    }
    a.swap_with_slice(b);
    Status::SUCCESS
}

/// Length of `v` once trailing zeros are dropped.
///
/// Only entries whose zero test is TRUE are dropped; an undecidable
/// entry stops the scan.
#[must_use]
pub fn normalise_len(ctx: &dyn Structure, v: &[Elem]) -> usize {
    v.iter()
        .rposition(|x| !ctx.is_zero(x).is_true())
        .map_or(0, |i| i + 1)
}

/// Writes `[a, b, c]`.
pub fn write(ctx: &dyn Structure, out: &mut dyn fmt::Write, v: &[Elem]) -> Status {
    let mut status = Status::check(out.write_char('[').is_ok(), Status::UNABLE);
    for (i, x) in v.iter().enumerate() {
        if i > 0 {
            status |= Status::check(out.write_str(", ").is_ok(), Status::UNABLE);
        }
        status |= ctx.write(out, x);
    }
    status | Status::check(out.write_char(']').is_ok(), Status::UNABLE)
}

/// An owned vector of elements of one structure.
///
/// The vector does not hold its structure; callers pass the structure
/// the entries belong to.
#[derive(Debug, Default)]
pub struct GrVec {
    entries: Vec<Elem>,
}

impl GrVec {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a zero vector of length `len`.
    #[must_use]
    pub fn zeros(ctx: &dyn Structure, len: usize) -> Self {
        Self {
            entries: init(ctx, len),
        }
    }

    /// Creates a vector from machine integers.
    #[must_use]
    pub fn from_si(ctx: &dyn Structure, values: &[i64]) -> Self {
        Self {
            entries: values.iter().map(|&v| ctx.elem_from_si(v)).collect(),
        }
    }

    /// Returns a copy, made through the structure.
    #[must_use]
    pub fn clone_in(&self, ctx: &dyn Structure) -> Self {
        Self {
            entries: clone_all(ctx, &self.entries),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the vector has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Changes the length. New entries are zero; removed entries are
    /// released.
    pub fn set_length(&mut self, ctx: &dyn Structure, len: usize) {
        if len <= self.entries.len() {
            self.entries.truncate(len);
        } else {
            let extra = len - self.entries.len();
            self.entries.extend((0..extra).map(|_| ctx.init()));
        }
    }

    /// Appends a copy of `x`, made through the structure.
    pub fn push(&mut self, ctx: &dyn Structure, x: &Elem) -> Status {
        let n = self.entries.len();
        self.set_length(ctx, n + 1);
        ctx.set(&mut self.entries[n], x)
    }

    /// Returns the entries.
    #[must_use]
    pub fn as_slice(&self) -> &[Elem] {
        &self.entries
    }

    /// Returns the entries mutably.
    pub fn as_mut_slice(&mut self) -> &mut [Elem] {
        &mut self.entries
    }

    /// Returns the entry at `i`.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&Elem> {
        self.entries.get(i)
    }

    /// Returns the entry at `i` mutably.
    pub fn get_mut(&mut self, i: usize) -> Option<&mut Elem> {
        self.entries.get_mut(i)
    }

    /// Consumes the vector, returning its entries.
    #[must_use]
    pub fn into_vec(self) -> Vec<Elem> {
        self.entries
    }
}

impl std::ops::Index<usize> for GrVec {
    type Output = Elem;

    fn index(&self, i: usize) -> &Elem {
        &self.entries[i]
    }
}

impl std::ops::IndexMut<usize> for GrVec {
    fn index_mut(&mut self, i: usize) -> &mut Elem {
        &mut self.entries[i]
    }
}
