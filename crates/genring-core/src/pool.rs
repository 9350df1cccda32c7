//! Process-wide worker budget.
//!
//! The generic algorithms run their parallel work on rayon's global pool.
//! `WorkerBudget` bounds how many helper threads algorithms may occupy at
//! once: an algorithm requests workers for the duration of one call and
//! the returned [`WorkerLease`] gives them back when dropped, on every
//! exit path.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Environment variable overriding the global worker count.
pub const NUM_THREADS_ENV: &str = "GENRING_NUM_THREADS";

static GLOBAL_BUDGET: OnceLock<WorkerBudget> = OnceLock::new();

/// A bounded pool of worker slots.
#[derive(Debug)]
pub struct WorkerBudget {
    capacity: usize,
    available: AtomicUsize,
}

impl WorkerBudget {
    /// Creates a budget with `capacity` helper workers.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            available: AtomicUsize::new(capacity),
        }
    }

    /// Returns the process-wide budget.
    ///
    /// Its capacity is `GENRING_NUM_THREADS - 1` when the variable is set,
    /// and one less than rayon's thread count otherwise (the calling
    /// thread always takes part in the work).
    pub fn global() -> &'static WorkerBudget {
        GLOBAL_BUDGET.get_or_init(|| {
            let threads = std::env::var(NUM_THREADS_ENV)
                .ok()
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|&n| n > 0)
                .unwrap_or_else(rayon::current_num_threads);
            tracing::debug!(threads, "initialised global worker budget");
            WorkerBudget::new(threads.saturating_sub(1))
        })
    }

    /// Total number of helper workers.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of helper workers not currently leased.
    #[must_use]
    pub fn available(&self) -> usize {
        self.available.load(Ordering::Acquire)
    }

    /// Leases up to `wanted` workers. The lease may hold fewer, or none.
    pub fn request(&self, wanted: usize) -> WorkerLease<'_> {
        let mut current = self.available.load(Ordering::Acquire);
        loop {
            let granted = current.min(wanted);
            match self.available.compare_exchange_weak(
                current,
                current - granted,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    return WorkerLease {
                        budget: self,
                        count: granted,
                    }
                }
                Err(actual) => current = actual,
            }
        }
    }
}

/// Workers leased from a [`WorkerBudget`]; returned on drop.
#[derive(Debug)]
#[must_use = "dropping the lease returns the workers immediately"]
pub struct WorkerLease<'a> {
    budget: &'a WorkerBudget,
    count: usize,
}

impl WorkerLease<'_> {
    /// Number of helper workers held.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Drop for WorkerLease<'_> {
    fn drop(&mut self) {
        if self.count > 0 {
            self.budget.available.fetch_add(self.count, Ordering::AcqRel);
        }
    }
}
