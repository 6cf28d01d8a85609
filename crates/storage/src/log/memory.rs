// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory log primitive for tests
//!
//! Supports simulating retention (`truncate_before`) and injected append
//! failures, neither of which the file log can produce on demand.

use super::{fits_budget, LogError, LogPrimitive};
use mj_core::{Entry, Offset, Record};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct MemoryLogState {
    records: Vec<Record>,
    /// Oldest retained offset
    first: Offset,
    next: Offset,
}

/// Vec-backed log primitive
#[derive(Default)]
pub struct MemoryLog {
    state: Mutex<MemoryLogState>,
    fail_next_append: AtomicBool,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every record below `offset`, as retention would
    pub fn truncate_before(&self, offset: Offset) {
        let mut state = self.lock();
        let offset = offset.min(state.next);
        state.records.retain(|r| r.offset >= offset);
        state.first = state.first.max(offset);
    }

    /// Make the next append fail with an IO error
    pub fn fail_next_append(&self) {
        self.fail_next_append.store(true, Ordering::SeqCst);
    }

    /// Oldest retained offset
    pub fn first_offset(&self) -> Offset {
        self.lock().first
    }

    fn lock(&self) -> MutexGuard<'_, MemoryLogState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LogPrimitive for MemoryLog {
    fn append(&self, entries: Vec<Entry>) -> Result<Offset, LogError> {
        if entries.is_empty() {
            return Err(LogError::EmptyBatch);
        }
        if self.fail_next_append.swap(false, Ordering::SeqCst) {
            return Err(LogError::Io(std::io::Error::other("injected append failure")));
        }

        let mut state = self.lock();
        for entry in entries {
            let (id, payload) = entry.into_parts();
            let offset = state.next;
            state.records.push(Record {
                offset,
                id,
                payload,
            });
            state.next += 1;
        }
        Ok(state.next - 1)
    }

    fn read(&self, from: Offset, max_bytes: usize) -> Result<Vec<Record>, LogError> {
        let state = self.lock();
        if from < state.first || from > state.next {
            return Err(LogError::OffsetOutOfRange {
                requested: from,
                first: state.first,
                next: state.next,
            });
        }

        let mut records = Vec::new();
        let mut used = 0usize;
        for record in state.records.iter().filter(|r| r.offset >= from) {
            if !fits_budget(records.len(), used, record.payload.len(), max_bytes) {
                break;
            }
            used += record.payload.len();
            records.push(record.clone());
        }
        Ok(records)
    }

    fn next_offset(&self) -> Offset {
        self.lock().next
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
