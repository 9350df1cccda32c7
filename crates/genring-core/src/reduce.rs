//! Associative reductions (sum, product) over vectors of elements.
//!
//! Three variants are provided:
//!
//! - basecase: a left-to-right loop
//! - binary splitting: recursively halve the range down to a cutoff and
//!   combine the halves with the structure's operator
//! - parallel: split the range into contiguous chunks, one per leased
//!   worker plus the caller, reduce each chunk by binary splitting, join,
//!   then combine the partial results sequentially
//!
//! Partial results are combined in index order, so products over
//! non-commutative structures are computed correctly.

use crate::pool::WorkerBudget;
use crate::{Elem, Status, Structure};

/// Tuning knobs for reductions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReduceConfig {
    /// Ranges of at most this many elements are reduced by a plain loop.
    pub basecase_cutoff: usize,
    /// Minimum length before threads are used at all.
    pub parallel_cutoff: usize,
    /// Upper bound on threads (caller included). `None` uses the global
    /// worker budget.
    pub thread_limit: Option<usize>,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            basecase_cutoff: 16,
            parallel_cutoff: 1024,
            thread_limit: None,
        }
    }
}

/// The binary operator of a reduction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReduceOp {
    /// Addition, identity zero.
    Sum,
    /// Multiplication, identity one.
    Product,
}

impl ReduceOp {
    fn identity<S: Structure + ?Sized>(self, ctx: &S, res: &mut Elem) -> Status {
        match self {
            ReduceOp::Sum => ctx.zero(res),
            ReduceOp::Product => ctx.one(res),
        }
    }

    fn combine_assign<S: Structure + ?Sized>(self, ctx: &S, res: &mut Elem, x: &Elem) -> Status {
        match self {
            ReduceOp::Sum => ctx.add_assign(res, x),
            ReduceOp::Product => ctx.mul_assign(res, x),
        }
    }
}

/// Left-to-right reduction.
pub fn basecase<S: Structure + ?Sized>(ctx: &S, op: ReduceOp, res: &mut Elem, v: &[Elem]) -> Status {
    let Some((first, rest)) = v.split_first() else {
        return op.identity(ctx, res);
    };

    let mut status = ctx.set(res, first);
    for x in rest {
        status |= op.combine_assign(ctx, res, x);
    }
    status
}

/// Binary-splitting reduction with a sequential basecase.
pub fn bsplit<S: Structure + ?Sized>(
    ctx: &S,
    op: ReduceOp,
    res: &mut Elem,
    v: &[Elem],
    cutoff: usize,
) -> Status {
    if v.len() <= cutoff.max(1) {
        return basecase(ctx, op, res, v);
    }

    let mid = v.len() / 2;
    let mut status = bsplit(ctx, op, res, &v[..mid], cutoff);
    let mut right = ctx.init();
    status |= bsplit(ctx, op, &mut right, &v[mid..], cutoff);
    status | op.combine_assign(ctx, res, &right)
}

/// `res = sum(v)` by a plain loop.
pub fn sum_basecase<S: Structure + ?Sized>(ctx: &S, res: &mut Elem, v: &[Elem]) -> Status {
    basecase(ctx, ReduceOp::Sum, res, v)
}

/// `res = prod(v)` by a plain loop.
pub fn product_basecase<S: Structure + ?Sized>(ctx: &S, res: &mut Elem, v: &[Elem]) -> Status {
    basecase(ctx, ReduceOp::Product, res, v)
}

/// `res = sum(v)` by binary splitting.
pub fn sum_bsplit<S: Structure + ?Sized>(ctx: &S, res: &mut Elem, v: &[Elem], cutoff: usize) -> Status {
    bsplit(ctx, ReduceOp::Sum, res, v, cutoff)
}

/// `res = prod(v)` by binary splitting.
pub fn product_bsplit<S: Structure + ?Sized>(
    ctx: &S,
    res: &mut Elem,
    v: &[Elem],
    cutoff: usize,
) -> Status {
    bsplit(ctx, ReduceOp::Product, res, v, cutoff)
}

/// Reduces `v` using up to `config.thread_limit` threads.
///
/// Threads are only used when the structure reports itself thread-safe,
/// the limit allows more than one thread, the vector is at least
/// `parallel_cutoff` long and the global budget has workers to lend;
/// otherwise this is [`bsplit`]. Every chunk runs to completion before the
/// chunk statuses are combined.
pub fn parallel_reduce<S: Structure + ?Sized>(
    ctx: &S,
    op: ReduceOp,
    res: &mut Elem,
    v: &[Elem],
    config: &ReduceConfig,
) -> Status {
    let budget = WorkerBudget::global();
    let cutoff = config.basecase_cutoff.max(1);
    let thread_limit = config
        .thread_limit
        .unwrap_or_else(|| budget.capacity() + 1);

    if thread_limit <= 1 || v.len() < config.parallel_cutoff || !ctx.is_threadsafe().is_true() {
        return bsplit(ctx, op, res, v, cutoff);
    }

    let max_chunks = (v.len() / cutoff).max(1).min(thread_limit);
    let lease = budget.request(max_chunks - 1);
    let num_chunks = lease.count() + 1;
    if num_chunks == 1 {
        return bsplit(ctx, op, res, v, cutoff);
    }

    let chunk_len = v.len().div_ceil(num_chunks);
    let chunks: Vec<&[Elem]> = v.chunks(chunk_len).collect();
    let mut partial: Vec<Elem> = chunks.iter().map(|_| ctx.init()).collect();
    let mut statuses = vec![Status::SUCCESS; chunks.len()];

    tracing::debug!(
        len = v.len(),
        chunks = chunks.len(),
        workers = lease.count(),
        op = ?op,
        "parallel reduction"
    );

    rayon::scope(|s| {
        let mut jobs = partial.iter_mut().zip(statuses.iter_mut()).zip(&chunks);
        let own = jobs.next();
        for ((slot, st), chunk) in jobs {
            s.spawn(move |_| *st = bsplit(ctx, op, slot, chunk, cutoff));
        }
        if let Some(((slot, st), chunk)) = own {
            *st = bsplit(ctx, op, slot, chunk, cutoff);
        }
    });
    drop(lease);

    let mut status: Status = statuses.into_iter().collect();
    let mut parts = partial.into_iter();
    match parts.next() {
        Some(first) => *res = first,
        None => return status | op.identity(ctx, res),
    }
    for part in parts {
        status |= op.combine_assign(ctx, res, &part);
    }
    status
}

/// `res = sum(v)` using at most `thread_limit` threads.
pub fn vec_sum_parallel<S: Structure + ?Sized>(
    ctx: &S,
    res: &mut Elem,
    v: &[Elem],
    thread_limit: usize,
) -> Status {
    let config = ReduceConfig {
        thread_limit: Some(thread_limit),
        ..ReduceConfig::default()
    };
    parallel_reduce(ctx, ReduceOp::Sum, res, v, &config)
}

/// `res = prod(v)` using at most `thread_limit` threads.
pub fn vec_product_parallel<S: Structure + ?Sized>(
    ctx: &S,
    res: &mut Elem,
    v: &[Elem],
    thread_limit: usize,
) -> Status {
    let config = ReduceConfig {
        thread_limit: Some(thread_limit),
        ..ReduceConfig::default()
    };
    parallel_reduce(ctx, ReduceOp::Product, res, v, &config)
}
