// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log primitive: durable append and sequential read by offset
//!
//! ## Contract
//!
//! - `append` writes a whole batch or nothing, and returns the offset of
//!   the batch's last entry once the batch is durable
//! - offsets are strictly increasing and never reused
//! - `read` from the next unwritten offset returns an empty batch
//! - `read` from a position outside the retained range fails with
//!   `LogError::OffsetOutOfRange`, which callers treat as "no data yet"

mod file;
#[cfg(any(test, feature = "test-support"))]
mod memory;
mod record;

pub use file::{FileLog, LOG_FILE_NAME};
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryLog;
pub use record::LogRecord;

use crate::lock::LockError;
use mj_core::{Entry, Offset, Record};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from log operations
#[derive(Debug, Error)]
pub enum LogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("cannot create storage directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot append an empty batch")]
    EmptyBatch,

    #[error("offset {requested} out of range (retained {first}..{next})")]
    OffsetOutOfRange {
        requested: Offset,
        first: Offset,
        next: Offset,
    },

    #[error("corrupted record at offset {offset}: {reason}")]
    Corrupted { offset: Offset, reason: String },

    #[error("log {path} has an unrecovered partial write; reopen it to repair")]
    NeedsRepair { path: PathBuf },
}

/// Durable, offset-addressed append log
pub trait LogPrimitive: Send + Sync {
    /// Append `entries` as one batch; returns the offset of the last entry
    fn append(&self, entries: Vec<Entry>) -> Result<Offset, LogError>;

    /// Read records starting at `from`, stopping once `max_bytes` of payload
    /// have been collected. A record larger than the budget is still
    /// returned when it is the first one.
    fn read(&self, from: Offset, max_bytes: usize) -> Result<Vec<Record>, LogError>;

    /// Offset the next appended entry will receive
    fn next_offset(&self) -> Offset;
}

/// Whether one more payload of `len` bytes fits in a read budget.
///
/// The first record always fits so an oversized record cannot stall a reader.
pub(crate) fn fits_budget(taken: usize, used: usize, len: usize, max_bytes: usize) -> bool {
    taken == 0 || used.saturating_add(len) <= max_bytes
}
