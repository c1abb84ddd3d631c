//! Recursion depth accounting for graph traversals.
//!
//! Every recursive step of the equality and representation walks enters a
//! [`DepthGuard`]. The guard releases its level when dropped, so early
//! returns and `?` propagation leave the counter balanced.

use crate::error::{Error, Result};
use std::cell::Cell;

/// Per-walk recursion counter.
#[derive(Debug)]
pub(crate) struct DepthCounter {
    depth: Cell<u32>,
    limit: u32,
}

/// One level of recursion; decrements the counter on drop.
#[derive(Debug)]
pub(crate) struct DepthGuard<'a> {
    depth: &'a Cell<u32>,
}

impl DepthCounter {
    pub(crate) fn new(limit: u32) -> Self {
        Self {
            depth: Cell::new(0),
            limit,
        }
    }

    /// Enter one level, failing once `limit` levels are already active.
    pub(crate) fn enter(&self) -> Result<DepthGuard<'_>> {
        let current = self.depth.get();
        if current >= self.limit {
            log::warn!("Recursion depth limit exceeded ({})", self.limit);
            return Err(Error::RecursionLimitExceeded(self.limit));
        }
        self.depth.set(current + 1);
        Ok(DepthGuard { depth: &self.depth })
    }

    /// Levels currently held.
    #[cfg(test)]
    pub(crate) fn current(&self) -> u32 {
        self.depth.get()
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}
