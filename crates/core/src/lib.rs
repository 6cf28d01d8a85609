// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mj-core: shared types for the mj message journal
//!
//! This crate provides:
//! - `Entry` and `Record`, the values appended to and read from the journal
//! - `Offset`, the position type assigned by the log
//! - `JournalConfig`, loadable from TOML

pub mod config;
pub mod entry;

pub use config::{ConfigError, JournalConfig, RawJournalConfig};
pub use entry::{Entry, Offset, Record};
