//! Dense matrices over a runtime structure.
//!
//! Matrices are stored in row-major order. Any shape is allowed,
//! including empty ones. Every operation reports shape mismatches as
//! DOMAIN, singular inputs to `solve`/`inv` as DOMAIN, and undecidable
//! pivots (a zero test returning UNKNOWN) as UNABLE.

use std::fmt;
use std::ops::{Index, IndexMut};

use rand::RngCore;

use genring_core::{Elem, Status, Structure, Truth};

use crate::vector;

/// Dense matrix stored in row-major order.
#[derive(Debug)]
pub struct GrMat {
    /// Matrix entries in row-major order.
    data: Vec<Elem>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl GrMat {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(ctx: &dyn Structure, num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vector::init(ctx, num_rows * num_cols),
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from machine integers in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have `num_rows * num_cols` entries.
    #[must_use]
    pub fn from_si(ctx: &dyn Structure, num_rows: usize, num_cols: usize, values: &[i64]) -> Self {
        assert_eq!(values.len(), num_rows * num_cols);
        Self {
            data: values.iter().map(|&v| ctx.elem_from_si(v)).collect(),
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from entries in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if `data` does not have `num_rows * num_cols` entries.
    #[must_use]
    pub fn from_entries(num_rows: usize, num_cols: usize, data: Vec<Elem>) -> Self {
        assert_eq!(data.len(), num_rows * num_cols);
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Returns a copy, made through the structure.
    #[must_use]
    pub fn clone_in(&self, ctx: &dyn Structure) -> Self {
        Self {
            data: vector::clone_all(ctx, &self.data),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Checks if the matrix has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if both matrices have the same shape.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.num_rows == other.num_rows && self.num_cols == other.num_cols
    }

    /// Returns a reference to the entry at (row, col).
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Elem> {
        if row < self.num_rows && col < self.num_cols {
            Some(&self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a mutable reference to the entry at (row, col).
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Elem> {
        if row < self.num_rows && col < self.num_cols {
            Some(&mut self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Elem] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns a mutable slice of the specified row.
    pub fn row_mut(&mut self, row: usize) -> &mut [Elem] {
        let start = row * self.num_cols;
        &mut self.data[start..start + self.num_cols]
    }

    /// Returns all entries in row-major order.
    #[must_use]
    pub fn entries(&self) -> &[Elem] {
        &self.data
    }

    /// Returns all entries mutably.
    pub fn entries_mut(&mut self) -> &mut [Elem] {
        &mut self.data
    }

    /// Swaps two rows.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let n = self.num_cols;
        let (upper, lower) = self.data.split_at_mut(hi * n);
        upper[lo * n..lo * n + n].swap_with_slice(&mut lower[..n]);
    }

    /// Returns `target` mutably and `source` immutably.
    ///
    /// # Panics
    ///
    /// Panics if `target == source`.
    fn row_pair(&mut self, target: usize, source: usize) -> (&mut [Elem], &[Elem]) {
        assert_ne!(target, source);
        let n = self.num_cols;
        if target < source {
            let (upper, lower) = self.data.split_at_mut(source * n);
            (&mut upper[target * n..target * n + n], &lower[..n])
        } else {
            let (upper, lower) = self.data.split_at_mut(target * n);
            (&mut lower[..n], &upper[source * n..source * n + n])
        }
    }
}

impl Index<(usize, usize)> for GrMat {
    type Output = Elem;

    fn index(&self, (row, col): (usize, usize)) -> &Elem {
        &self.data[row * self.num_cols + col]
    }
}

impl IndexMut<(usize, usize)> for GrMat {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Elem {
        &mut self.data[row * self.num_cols + col]
    }
}

// ----------------------------------------------------------------------
// Basic operations
// ----------------------------------------------------------------------

/// Sets every entry to zero.
pub fn zero(ctx: &dyn Structure, res: &mut GrMat) -> Status {
    vector::zero(ctx, &mut res.data)
}

/// Sets `res` to the identity (ones on the main diagonal, rectangular
/// shapes allowed).
pub fn one(ctx: &dyn Structure, res: &mut GrMat) -> Status {
    set_scalar(ctx, res, None)
}

/// Sets `res` to `c` times the identity; `None` means one.
pub fn set_scalar(ctx: &dyn Structure, res: &mut GrMat, c: Option<&Elem>) -> Status {
    let mut status = zero(ctx, res);
    for i in 0..res.num_rows.min(res.num_cols) {
        status |= match c {
            Some(c) => ctx.set(&mut res[(i, i)], c),
            None => ctx.one(&mut res[(i, i)]),
        };
    }
    status
}

/// `res = a`. DOMAIN if the shapes differ.
pub fn set(ctx: &dyn Structure, res: &mut GrMat, a: &GrMat) -> Status {
    if !res.same_shape(a) {
        return Status::DOMAIN;
    }
    vector::set(ctx, &mut res.data, &a.data)
}

/// Entrywise equality. Matrices of different shapes are not equal.
pub fn equal(ctx: &dyn Structure, a: &GrMat, b: &GrMat) -> Truth {
    if !a.same_shape(b) {
        return Truth::False;
    }
    vector::equal(ctx, &a.data, &b.data)
}

/// Tests whether every entry is zero.
pub fn is_zero(ctx: &dyn Structure, a: &GrMat) -> Truth {
    vector::is_zero(ctx, &a.data)
}

/// Tests whether `a` is the identity.
pub fn is_one(ctx: &dyn Structure, a: &GrMat) -> Truth {
    let mut result = Truth::True;
    for i in 0..a.num_rows {
        for j in 0..a.num_cols {
            let t = if i == j {
                ctx.is_one(&a[(i, j)])
            } else {
                ctx.is_zero(&a[(i, j)])
            };
            result = result & t;
            if result.is_false() {
                return result;
            }
        }
    }
    result
}

/// `res = a + b`.
pub fn add(ctx: &dyn Structure, res: &mut GrMat, a: &GrMat, b: &GrMat) -> Status {
    if !res.same_shape(a) || !a.same_shape(b) {
        return Status::DOMAIN;
    }
    vector::add(ctx, &mut res.data, &a.data, &b.data)
}

/// `res = a - b`.
pub fn sub(ctx: &dyn Structure, res: &mut GrMat, a: &GrMat, b: &GrMat) -> Status {
    if !res.same_shape(a) || !a.same_shape(b) {
        return Status::DOMAIN;
    }
    vector::sub(ctx, &mut res.data, &a.data, &b.data)
}

/// `res = -a`.
pub fn neg(ctx: &dyn Structure, res: &mut GrMat, a: &GrMat) -> Status {
    if !res.same_shape(a) {
        return Status::DOMAIN;
    }
    vector::neg(ctx, &mut res.data, &a.data)
}

/// `res = a * c` for a scalar `c`.
pub fn mul_scalar(ctx: &dyn Structure, res: &mut GrMat, a: &GrMat, c: &Elem) -> Status {
    if !res.same_shape(a) {
        return Status::DOMAIN;
    }
    vector::mul_scalar(ctx, &mut res.data, &a.data, c)
}

/// `res = a^T`.
pub fn transpose(ctx: &dyn Structure, res: &mut GrMat, a: &GrMat) -> Status {
    if res.num_rows != a.num_cols || res.num_cols != a.num_rows {
        return Status::DOMAIN;
    }
    let mut status = Status::SUCCESS;
    for i in 0..a.num_rows {
        for j in 0..a.num_cols {
            status |= ctx.set(&mut res[(j, i)], &a[(i, j)]);
        }
    }
    status
}

fn transposed(ctx: &dyn Structure, a: &GrMat) -> (GrMat, Status) {
    let mut t = GrMat::zeros(ctx, a.num_cols, a.num_rows);
    let status = transpose(ctx, &mut t, a);
    (t, status)
}

/// `res = a * b` by dot products of rows of `a` with columns of `b`.
pub fn mul(ctx: &dyn Structure, res: &mut GrMat, a: &GrMat, b: &GrMat) -> Status {
    if a.num_cols != b.num_rows || res.num_rows != a.num_rows || res.num_cols != b.num_cols {
        return Status::DOMAIN;
    }

    let (bt, mut status) = transposed(ctx, b);
    let n = res.num_cols;
    for i in 0..a.num_rows {
        for j in 0..n {
            status |= ctx.vec_dot(&mut res.data[i * n + j], None, false, a.row(i), bt.row(j));
        }
    }
    status
}

/// `res = a * v` for a column vector `v`.
pub fn mul_vec(ctx: &dyn Structure, res: &mut [Elem], a: &GrMat, v: &[Elem]) -> Status {
    if res.len() != a.num_rows || v.len() != a.num_cols {
        return Status::DOMAIN;
    }
    res.iter_mut()
        .enumerate()
        .map(|(i, r)| ctx.vec_dot(r, None, false, a.row(i), v))
        .collect()
}

/// `res[i] = a[perm[i]]`.
pub fn permute_rows(ctx: &dyn Structure, res: &mut GrMat, a: &GrMat, perm: &[usize]) -> Status {
    if !res.same_shape(a) || perm.len() != a.num_rows {
        return Status::DOMAIN;
    }
    let mut status = Status::SUCCESS;
    for (i, &p) in perm.iter().enumerate() {
        status |= vector::set(ctx, res.row_mut(i), a.row(p));
    }
    status
}

/// `res = a[0][0] + ... + a[n-1][n-1]`. DOMAIN for non-square input.
pub fn trace(ctx: &dyn Structure, res: &mut Elem, a: &GrMat) -> Status {
    if !a.is_square() {
        return Status::DOMAIN;
    }
    let mut status = ctx.zero(res);
    for i in 0..a.num_rows {
        status |= ctx.add_assign(res, &a[(i, i)]);
    }
    status
}

/// Sets every entry to a random element.
pub fn randtest(ctx: &dyn Structure, res: &mut GrMat, rng: &mut dyn RngCore) -> Status {
    vector::randtest(ctx, &mut res.data, rng)
}

/// Writes `[[a, b], [c, d]]`.
pub fn write(ctx: &dyn Structure, out: &mut dyn fmt::Write, a: &GrMat) -> Status {
    let mut status = Status::check(out.write_char('[').is_ok(), Status::UNABLE);
    for i in 0..a.num_rows {
        if i > 0 {
            status |= Status::check(out.write_str(", ").is_ok(), Status::UNABLE);
        }
        status |= vector::write(ctx, out, a.row(i));
    }
    status | Status::check(out.write_char(']').is_ok(), Status::UNABLE)
}

// ----------------------------------------------------------------------
// Elimination
// ----------------------------------------------------------------------

enum Pivot {
    Found(usize),
    Missing,
    Undecidable,
}

/// Row `r >= start` to pivot on in `col`.
///
/// Over a field this is the first certainly nonzero entry. Elsewhere a
/// certain unit is preferred, falling back to the first nonzero entry.
fn find_pivot(ctx: &dyn Structure, a: &GrMat, start: usize, col: usize) -> Pivot {
    let mut undecided = false;
    let mut nonzero = None;
    let prefer_units = !ctx.is_field().is_true();
    for r in start..a.num_rows {
        match ctx.is_zero(&a[(r, col)]) {
            Truth::False if !prefer_units => return Pivot::Found(r),
            Truth::False => {
                if ctx.is_invertible(&a[(r, col)]).is_true() {
                    return Pivot::Found(r);
                }
                nonzero.get_or_insert(r);
            }
            Truth::Unknown => undecided = true,
            Truth::True => {}
        }
    }
    match nonzero {
        Some(r) => Pivot::Found(r),
        None if undecided => Pivot::Undecidable,
        None => Pivot::Missing,
    }
}

/// LU decomposition with row pivoting.
///
/// On success `perm` holds the row permutation and `lu` holds `U` on and
/// above the diagonal and the multipliers of `L` (unit lower triangular)
/// below it, so that `A[perm[i]] = (L U)[i]`. The multipliers of pivot
/// `k` are stored in column `k`, also when columns were skipped.
///
/// With `rank_check`, a column without a pivot returns DOMAIN at once. A
/// pivot that cannot be inverted (in a ring that is not a field) or an
/// undecidable zero test returns UNABLE.
pub fn lu(
    ctx: &dyn Structure,
    rank: &mut usize,
    perm: &mut Vec<usize>,
    lu: &mut GrMat,
    a: &GrMat,
    rank_check: bool,
) -> Status {
    let (m, n) = (a.num_rows, a.num_cols);
    perm.clear();
    perm.extend(0..m);
    *rank = 0;

    let mut status = set(ctx, lu, a);
    if !status.is_success() || m == 0 || n == 0 {
        return status;
    }

    let mut d = ctx.init();
    let mut e = ctx.init();
    let (mut row, mut col) = (0, 0);
    while row < m && col < n {
        let pivot = match find_pivot(ctx, lu, row, col) {
            Pivot::Found(r) => r,
            Pivot::Missing if rank_check => return status | Status::DOMAIN,
            Pivot::Missing => {
                col += 1;
                continue;
            }
            Pivot::Undecidable => return status | Status::UNABLE,
        };

        if pivot != row {
            lu.swap_rows(pivot, row);
            perm.swap(pivot, row);
        }

        if !ctx.inv(&mut d, &lu[(row, col)]).is_success() {
            return status | Status::UNABLE;
        }

        for i in row + 1..m {
            status |= ctx.mul(&mut e, &lu[(i, col)], &d);
            let (target, source) = lu.row_pair(i, row);
            status |= vector::submul_scalar_left(ctx, &mut target[col + 1..], &e, &source[col + 1..]);
            status |= ctx.zero(&mut target[col]);
            status |= ctx.set(&mut target[*rank], &e);
        }

        *rank += 1;
        row += 1;
        col += 1;
    }

    tracing::trace!(rows = m, cols = n, rank = *rank, "lu");
    status
}

/// Splits an LU decomposition into `L` (m × m, unit lower triangular)
/// and `U` (m × n).
pub fn lu_unpack(
    ctx: &dyn Structure,
    l: &mut GrMat,
    u: &mut GrMat,
    lu: &GrMat,
    rank: usize,
) -> Status {
    let (m, n) = (lu.num_rows, lu.num_cols);
    if l.num_rows != m || l.num_cols != m || !u.same_shape(lu) {
        return Status::DOMAIN;
    }

    let mut status = one(ctx, l) | zero(ctx, u);
    for i in 0..m {
        for j in 0..i.min(rank) {
            status |= ctx.set(&mut l[(i, j)], &lu[(i, j)]);
        }
        if i < rank {
            for j in i..n {
                status |= ctx.set(&mut u[(i, j)], &lu[(i, j)]);
            }
        }
    }
    status
}

fn is_odd_permutation(perm: &[usize]) -> bool {
    let mut seen = vec![false; perm.len()];
    let mut odd = false;
    for start in 0..perm.len() {
        if seen[start] {
            continue;
        }
        let mut len = 0;
        let mut k = start;
        while !seen[k] {
            seen[k] = true;
            k = perm[k];
            len += 1;
        }
        if len % 2 == 0 {
            odd = !odd;
        }
    }
    odd
}

/// Determinant of a square matrix.
///
/// Uses LU decomposition over fields, fraction-free Bareiss elimination
/// over integral domains, cofactor expansion for small matrices and the
/// division-free Berkowitz algorithm otherwise. Requires a commutative
/// ring for n >= 2.
pub fn det(ctx: &dyn Structure, res: &mut Elem, a: &GrMat) -> Status {
    if !a.is_square() {
        return Status::DOMAIN;
    }

    let n = a.num_rows;
    match n {
        0 => return ctx.one(res),
        1 => return ctx.set(res, &a[(0, 0)]),
        _ => {}
    }
    if !ctx.is_commutative_ring().is_true() {
        return Status::UNABLE;
    }

    if ctx.is_field().is_true() {
        det_lu(ctx, res, a)
    } else if ctx.is_integral_domain().is_true() {
        det_bareiss(ctx, res, a)
    } else if n <= 4 {
        let cols: Vec<usize> = (0..n).collect();
        det_cofactor(ctx, res, a, 0, &cols)
    } else {
        det_berkowitz(ctx, res, a)
    }
}

fn det_lu(ctx: &dyn Structure, res: &mut Elem, a: &GrMat) -> Status {
    let n = a.num_rows;
    let mut rank = 0;
    let mut perm = Vec::new();
    let mut lu_mat = GrMat::zeros(ctx, n, n);

    let status = lu(ctx, &mut rank, &mut perm, &mut lu_mat, a, true);
    if status == Status::DOMAIN {
        return ctx.zero(res);
    }
    if !status.is_success() {
        return status;
    }

    let mut status = ctx.set(res, &lu_mat[(0, 0)]);
    for i in 1..n {
        status |= ctx.mul_assign(res, &lu_mat[(i, i)]);
    }
    if is_odd_permutation(&perm) {
        status |= ctx.neg_assign(res);
    }
    status
}

fn det_bareiss(ctx: &dyn Structure, res: &mut Elem, a: &GrMat) -> Status {
    let n = a.num_rows;
    let mut m = a.clone_in(ctx);
    let mut negate = false;
    let mut prev = ctx.init();
    let mut t = ctx.init();
    let mut u = ctx.init();
    let mut status = ctx.one(&mut prev);

    for k in 0..n - 1 {
        match find_pivot(ctx, &m, k, k) {
            Pivot::Found(r) => {
                if r != k {
                    m.swap_rows(r, k);
                    negate = !negate;
                }
            }
            Pivot::Missing => return status | ctx.zero(res),
            Pivot::Undecidable => return status | Status::UNABLE,
        }

        for i in k + 1..n {
            for j in k + 1..n {
                status |= ctx.mul(&mut t, &m[(i, j)], &m[(k, k)]);
                status |= ctx.mul(&mut u, &m[(i, k)], &m[(k, j)]);
                status |= ctx.sub_assign(&mut t, &u);
                status |= ctx.divexact(&mut m[(i, j)], &t, &prev);
            }
        }
        status |= ctx.set(&mut prev, &m[(k, k)]);
    }

    status |= ctx.set(res, &m[(n - 1, n - 1)]);
    if negate {
        status |= ctx.neg_assign(res);
    }
    status
}

fn det_cofactor(ctx: &dyn Structure, res: &mut Elem, a: &GrMat, row: usize, cols: &[usize]) -> Status {
    if let [c] = cols {
        return ctx.set(res, &a[(row, *c)]);
    }

    let mut status = ctx.zero(res);
    let mut minor = ctx.init();
    let mut t = ctx.init();
    for (k, &c) in cols.iter().enumerate() {
        let rest: Vec<usize> = cols.iter().copied().filter(|&x| x != c).collect();
        status |= det_cofactor(ctx, &mut minor, a, row + 1, &rest);
        status |= ctx.mul(&mut t, &a[(row, c)], &minor);
        status |= if k % 2 == 0 {
            ctx.add_assign(res, &t)
        } else {
            ctx.sub_assign(res, &t)
        };
    }
    status
}

/// Berkowitz: builds the characteristic polynomial of each leading
/// submatrix from the previous one with a Toeplitz product; only ring
/// operations are used.
fn det_berkowitz(ctx: &dyn Structure, res: &mut Elem, a: &GrMat) -> Status {
    let n = a.num_rows;
    let mut status = Status::SUCCESS;

    // Coefficients of det(xI - A_k), highest degree first.
    let mut p = vector::init(ctx, 1);
    status |= ctx.one(&mut p[0]);

    let mut t = ctx.init();
    for k in 0..n {
        // Toeplitz column: 1, -a_kk, -R S, -R M S, ..., -R M^(k-1) S.
        let mut col = vector::init(ctx, k + 2);
        status |= ctx.one(&mut col[0]);
        status |= ctx.neg(&mut col[1], &a[(k, k)]);

        let r = &a.row(k)[..k];
        let mut v: Vec<Elem> = (0..k).map(|i| ctx.clone_elem(&a[(i, k)])).collect();
        let mut w = vector::init(ctx, k);
        for slot in col.iter_mut().skip(2) {
            status |= ctx.vec_dot(slot, None, true, r, &v);
            for (i, wi) in w.iter_mut().enumerate() {
                status |= ctx.vec_dot(wi, None, false, &a.row(i)[..k], &v);
            }
            std::mem::swap(&mut v, &mut w);
        }

        let mut next = vector::init(ctx, k + 2);
        for (i, out) in next.iter_mut().enumerate() {
            for (j, pj) in p.iter().enumerate().take(i + 1) {
                status |= ctx.mul(&mut t, &col[i - j], pj);
                status |= ctx.add_assign(out, &t);
            }
        }
        p = next;
    }

    status |= ctx.set(res, &p[n]);
    if n % 2 == 1 {
        status |= ctx.neg_assign(res);
    }
    status
}

/// Rank of `a`, computed by LU decomposition.
pub fn rank(ctx: &dyn Structure, res: &mut usize, a: &GrMat) -> Status {
    let mut perm = Vec::new();
    let mut lu_mat = GrMat::zeros(ctx, a.num_rows, a.num_cols);
    lu(ctx, res, &mut perm, &mut lu_mat, a, false)
}

/// Reduced row echelon form by Gauss–Jordan elimination.
///
/// Pivots are scaled to one, so every pivot must be invertible; a pivot
/// that is not returns UNABLE.
pub fn rref(ctx: &dyn Structure, rank: &mut usize, res: &mut GrMat, a: &GrMat) -> Status {
    *rank = 0;
    let mut status = set(ctx, res, a);
    if !status.is_success() {
        return status;
    }

    let (m, n) = (a.num_rows, a.num_cols);
    let mut d = ctx.init();
    let mut e = ctx.init();
    let mut t = ctx.init();
    for col in 0..n {
        if *rank == m {
            break;
        }
        let pivot = match find_pivot(ctx, res, *rank, col) {
            Pivot::Found(r) => r,
            Pivot::Missing => continue,
            Pivot::Undecidable => return status | Status::UNABLE,
        };
        let r = *rank;
        res.swap_rows(pivot, r);

        if !ctx.inv(&mut d, &res[(r, col)]).is_success() {
            return status | Status::UNABLE;
        }
        for entry in &mut res.row_mut(r)[col..] {
            status |= ctx.mul(&mut t, &d, entry);
            std::mem::swap(entry, &mut t);
        }

        for i in (0..m).filter(|&i| i != r) {
            if ctx.is_zero(&res[(i, col)]).is_true() {
                continue;
            }
            status |= ctx.set(&mut e, &res[(i, col)]);
            let (target, source) = res.row_pair(i, r);
            status |= vector::submul_scalar_left(ctx, &mut target[col..], &e, &source[col..]);
        }
        *rank += 1;
    }
    status
}

/// Solves `a x = b` for square nonsingular `a`.
///
/// DOMAIN if `a` is not square, shapes disagree, or `a` is singular.
pub fn solve(ctx: &dyn Structure, x: &mut GrMat, a: &GrMat, b: &GrMat) -> Status {
    let n = a.num_rows;
    if !a.is_square() || b.num_rows != n || !x.same_shape(b) {
        return Status::DOMAIN;
    }

    let mut rank = 0;
    let mut perm = Vec::new();
    let mut lu_mat = GrMat::zeros(ctx, n, n);
    let mut status = lu(ctx, &mut rank, &mut perm, &mut lu_mat, a, true);
    if !status.is_success() {
        return status;
    }

    let mut pivot_inv = vector::init(ctx, n);
    for (i, slot) in pivot_inv.iter_mut().enumerate() {
        if !ctx.inv(slot, &lu_mat[(i, i)]).is_success() {
            return status | Status::UNABLE;
        }
    }

    let mut y = vector::init(ctx, n);
    let mut xs = vector::init(ctx, n);
    let mut t = ctx.init();
    for c in 0..b.num_cols {
        // Forward substitution with the unit lower factor.
        for i in 0..n {
            let (done, rest) = y.split_at_mut(i);
            status |= ctx.vec_dot(&mut rest[0], Some(&b[(perm[i], c)]), true, &lu_mat.row(i)[..i], done);
        }
        // Back substitution with the upper factor.
        for i in (0..n).rev() {
            status |= ctx.vec_dot(&mut t, Some(&y[i]), true, &lu_mat.row(i)[i + 1..], &xs[i + 1..]);
            status |= ctx.mul(&mut xs[i], &pivot_inv[i], &t);
        }
        for (i, xi) in xs.iter().enumerate() {
            status |= ctx.set(&mut x[(i, c)], xi);
        }
    }
    status
}

/// `res = a^-1`. DOMAIN if `a` is not square or provably not invertible.
///
/// Fields go through [`solve`] against the identity. Other commutative
/// rings use the adjugate: `a` is invertible exactly when its
/// determinant is a unit, so a non-unit determinant is DOMAIN.
pub fn inv(ctx: &dyn Structure, res: &mut GrMat, a: &GrMat) -> Status {
    if !a.is_square() || !res.same_shape(a) {
        return Status::DOMAIN;
    }
    if ctx.is_field().is_true() || !ctx.is_commutative_ring().is_true() {
        let mut identity = GrMat::zeros(ctx, a.num_rows, a.num_rows);
        let status = one(ctx, &mut identity);
        return status | solve(ctx, res, a, &identity);
    }
    inv_adjugate(ctx, res, a)
}

fn inv_adjugate(ctx: &dyn Structure, res: &mut GrMat, a: &GrMat) -> Status {
    let n = a.num_rows;
    let mut d = ctx.init();
    let status = det(ctx, &mut d, a);
    if !status.is_success() {
        return status;
    }
    let mut d_inv = ctx.init();
    let status = ctx.inv(&mut d_inv, &d);
    if !status.is_success() || n == 0 {
        return status;
    }

    // res[j][i] = (-1)^(i+j) det(a without row i and column j) / det(a)
    let mut status = Status::SUCCESS;
    let mut minor = GrMat::zeros(ctx, n - 1, n - 1);
    let mut cofactor = ctx.init();
    for i in 0..n {
        for j in 0..n {
            for (mr, r) in (0..n).filter(|&r| r != i).enumerate() {
                for (mc, c) in (0..n).filter(|&c| c != j).enumerate() {
                    status |= ctx.set(&mut minor[(mr, mc)], &a[(r, c)]);
                }
            }
            status |= det(ctx, &mut cofactor, &minor);
            if (i + j) % 2 == 1 {
                status |= ctx.neg_assign(&mut cofactor);
            }
            status |= ctx.mul(&mut res[(j, i)], &cofactor, &d_inv);
        }
    }
    status
}
