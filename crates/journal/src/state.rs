// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Journal lifecycle: Stopped → Starting → Running → Stopping → Stopped

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

impl JournalState {
    fn as_u8(self) -> u8 {
        match self {
            JournalState::Stopped => 0,
            JournalState::Starting => 1,
            JournalState::Running => 2,
            JournalState::Stopping => 3,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => JournalState::Starting,
            2 => JournalState::Running,
            3 => JournalState::Stopping,
            _ => JournalState::Stopped,
        }
    }
}

impl fmt::Display for JournalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JournalState::Stopped => "stopped",
            JournalState::Starting => "starting",
            JournalState::Running => "running",
            JournalState::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

/// Lifecycle state shared between the facade's `&self` methods
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn new(state: JournalState) -> Self {
        Self(AtomicU8::new(state.as_u8()))
    }

    pub(crate) fn get(&self) -> JournalState {
        JournalState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn set(&self, state: JournalState) {
        self.0.store(state.as_u8(), Ordering::Release);
    }

    /// Move `from` → `to`; false if the state was not `from`
    pub(crate) fn transition(&self, from: JournalState, to: JournalState) -> bool {
        self.0
            .compare_exchange(from.as_u8(), to.as_u8(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
