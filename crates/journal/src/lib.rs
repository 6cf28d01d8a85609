// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mj journal: append, read and commit over a durable log
//!
//! ```text
//! producers ──append──▶ Journal ──▶ LogPrimitive (journal.jsonl)
//! consumer  ◀──read──── Journal ◀── ReadCursor
//! consumer  ───commit─▶ CommitWatermark ──flush task──▶ commit.offset
//! ```

mod error;
mod flush;
mod journal;
mod state;

pub use error::JournalError;
pub use journal::{Journal, JournalStatus};
pub use state::JournalState;
