use std::sync::atomic::{AtomicU64, Ordering};

static GLOBAL: IdentityGenerator = IdentityGenerator::new();

/// Source of process-unique, strictly increasing event sequence numbers.
///
/// A single atomic counter. [`next_id`](Self::next_id) is one `fetch_add`, so
/// it never locks, never allocates, and no two callers can observe the same
/// value. The order of returned values is the modification order of the
/// counter, which agrees with happens-before between callers.
///
/// Production code draws from [`IdentityGenerator::global`]. Tests build
/// their own generator so they do not couple through shared state.
#[derive(Debug)]
pub struct IdentityGenerator {
    next: AtomicU64,
}

impl IdentityGenerator {
    /// A generator whose first id is 0.
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// A generator whose first id is `first`.
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// The process-wide generator. Starts at 0, is never reset and is not
    /// persisted across restarts.
    pub fn global() -> &'static IdentityGenerator {
        &GLOBAL
    }

    /// Take the next unused sequence number.
    pub fn next_id(&self) -> u64 {
        // Uniqueness and per-counter order only need the RMW to be atomic.
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// The id the next call to [`next_id`](Self::next_id) would return.
    /// Racy under concurrent callers; diagnostics only.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for IdentityGenerator {
    fn default() -> Self {
        Self::new()
    }
}
