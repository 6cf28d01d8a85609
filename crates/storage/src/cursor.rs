// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read cursor: the next offset the consumer has not yet seen
//!
//! The cursor runs independently of the commit watermark. Reading is cheap
//! and may run ahead; committing means "fully processed".

use crate::log::{LogError, LogPrimitive};
use mj_core::{Offset, Record};

/// Sequential, resumable read position into a log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadCursor {
    next_offset: Offset,
}

impl ReadCursor {
    pub fn new(next_offset: Offset) -> Self {
        Self { next_offset }
    }

    /// Cursor resuming just past a recovered watermark, or at the start
    pub fn after_watermark(watermark: Option<Offset>) -> Self {
        Self::new(watermark.map_or(0, |w| w.saturating_add(1)))
    }

    pub fn next_offset(&self) -> Offset {
        self.next_offset
    }

    /// Read from the cursor position and advance past what was returned.
    ///
    /// An out-of-range position means no data is available yet: the cursor
    /// stays put and the result is empty. Other log errors propagate.
    pub fn pull<L>(&mut self, log: &L, max_bytes: usize) -> Result<Vec<Record>, LogError>
    where
        L: LogPrimitive + ?Sized,
    {
        let records = match log.read(self.next_offset, max_bytes) {
            Ok(records) => records,
            Err(LogError::OffsetOutOfRange {
                requested,
                first,
                next,
            }) => {
                tracing::debug!(requested, first, next, "read cursor outside retained log");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        for record in &records {
            self.next_offset = self.next_offset.max(record.next_offset());
        }
        Ok(records)
    }
}

#[cfg(test)]
#[path = "cursor_tests.rs"]
mod tests;
