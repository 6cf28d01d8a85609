// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable storage for the mj journal
//!
//! - `log`: the append/read log primitive and its file-backed implementation
//! - `watermark`: the in-memory commit watermark
//! - `watermark_file`: durable single-value store for the watermark
//! - `cursor`: resumable read position into the log
//! - `lock`: exclusive ownership of a storage directory

pub mod cursor;
pub mod lock;
pub mod log;
pub mod watermark;
pub mod watermark_file;

pub use cursor::ReadCursor;
pub use lock::{LockError, StorageLock};
pub use log::{FileLog, LogError, LogPrimitive};
pub use watermark::CommitWatermark;
pub use watermark_file::{WatermarkError, WatermarkFile};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use log::MemoryLog;
