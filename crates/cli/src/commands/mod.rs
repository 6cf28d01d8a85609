// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations
//!
//! Each command acts on an already-running journal and writes its report to
//! the given writer; `main` owns opening and stopping the journal.

pub mod append;
pub mod commit;
pub mod read;
pub mod status;

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
