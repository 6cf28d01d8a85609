// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commit watermark: the highest offset the consumer has fully processed
//!
//! The value only moves forward. `advance` is a lock-free compare-and-retry
//! loop so commits from the consumer's hot path never block producers or
//! the background flush.

use mj_core::Offset;
use std::sync::atomic::{AtomicI64, Ordering};

/// Raw value of a watermark that has never been set
pub const UNSET: i64 = i64::MIN;

/// Retries within one `advance` beyond which contention is reported
pub const CONTENTION_WARN_RETRIES: u32 = 10;

/// Atomically advanced, monotonically non-decreasing offset
#[derive(Debug)]
pub struct CommitWatermark {
    value: AtomicI64,
}

impl CommitWatermark {
    /// A watermark with no committed offset
    pub fn new() -> Self {
        Self {
            value: AtomicI64::new(UNSET),
        }
    }

    /// Seed from a recovered value, or leave unset
    pub fn recovered(value: Option<Offset>) -> Self {
        let watermark = Self::new();
        if let Some(offset) = value {
            watermark.advance(offset);
        }
        watermark
    }

    /// Raise the watermark to `max(current, candidate)`.
    ///
    /// Returns the watermark after the call.
    pub fn advance(&self, candidate: Offset) -> Offset {
        self.advance_counting(candidate, || {}).0
    }

    /// `advance` that also reports how many CAS attempts lost a race.
    /// `before_swap` runs ahead of every attempt.
    fn advance_counting(&self, candidate: Offset, mut before_swap: impl FnMut()) -> (Offset, u32) {
        // Offsets never reach i64::MAX in practice; clamp rather than wrap
        let candidate_raw = i64::try_from(candidate).unwrap_or(i64::MAX);

        let mut current = self.value.load(Ordering::Acquire);
        let mut retries = 0u32;
        let result = loop {
            if candidate_raw <= current {
                break current;
            }
            before_swap();
            match self.value.compare_exchange_weak(
                current,
                candidate_raw,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break candidate_raw,
                Err(actual) => {
                    current = actual;
                    retries += 1;
                }
            }
        };

        if retries > CONTENTION_WARN_RETRIES {
            tracing::warn!(candidate, retries, "commit watermark under heavy contention");
        }

        (to_offset(result).unwrap_or(candidate), retries)
    }

    /// Current watermark, or `None` if nothing has been committed
    pub fn current(&self) -> Option<Offset> {
        to_offset(self.value.load(Ordering::Acquire))
    }
}

impl Default for CommitWatermark {
    fn default() -> Self {
        Self::new()
    }
}

fn to_offset(raw: i64) -> Option<Offset> {
    if raw == UNSET {
        None
    } else {
        u64::try_from(raw).ok()
    }
}

#[cfg(test)]
#[path = "watermark_tests.rs"]
mod tests;
