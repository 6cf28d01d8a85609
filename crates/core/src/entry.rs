// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Journal entries and the records read back from the log

/// Position of a record in the log.
///
/// Assigned by the log on append. Strictly increasing and never reused.
pub type Offset = u64;

/// A unit of data handed to the journal for appending.
///
/// The id is caller-supplied (idempotency keys, tracing); it plays no part
/// in ordering. Both fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: Vec<u8>,
    payload: Vec<u8>,
}

impl Entry {
    pub fn new(id: impl Into<Vec<u8>>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            payload: payload.into(),
        }
    }

    pub fn id(&self) -> &[u8] {
        &self.id
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Split into `(id, payload)`
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.id, self.payload)
    }
}

/// A record returned by a read, with the offset the log assigned to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub offset: Offset,
    pub id: Vec<u8>,
    pub payload: Vec<u8>,
}

impl Record {
    /// Offset the next sequential read should start from
    pub fn next_offset(&self) -> Offset {
        self.offset.saturating_add(1)
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
