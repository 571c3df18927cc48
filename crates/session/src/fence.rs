//! Staleness fence for asynchronous view loads.
//!
//! Responses are not guaranteed to arrive in request order, and nothing
//! is ever cancelled: a view that fires a second load (or whose session
//! is replaced) must discard the first response when it eventually
//! resolves. Each view owns one [`LoadFence`]; every load start takes a
//! ticket, and a completion is applied only while its ticket is still
//! the latest.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing ticket counter, one per view.
#[derive(Debug, Default)]
pub struct LoadFence {
    current: AtomicU64,
}

impl LoadFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, invalidating every ticket issued before.
    pub fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Invalidate all outstanding tickets without starting a load (used
    /// when a view resets on session replacement).
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::AcqRel);
    }

    /// Whether a completion holding `ticket` is still the latest and may
    /// be applied.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.current.load(Ordering::Acquire) == ticket
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
