// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk log record with checksum verification
//!
//! Each record is one line of JSON carrying its offset, the entry's id and
//! payload, a batch terminator flag and a CRC32 checksum over all of them.

use mj_core::{Offset, Record};
use serde::{Deserialize, Serialize};

/// A single line in the log file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub offset: Offset,
    pub id: Vec<u8>,
    pub payload: Vec<u8>,
    /// Set on the last record of each appended batch
    pub batch_end: bool,
    pub checksum: u32,
}

impl LogRecord {
    /// Create a record with computed checksum
    pub fn new(offset: Offset, id: Vec<u8>, payload: Vec<u8>, batch_end: bool) -> Self {
        let checksum = Self::calculate_checksum(offset, &id, &payload, batch_end);
        Self {
            offset,
            id,
            payload,
            batch_end,
            checksum,
        }
    }

    fn calculate_checksum(offset: Offset, id: &[u8], payload: &[u8], batch_end: bool) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&offset.to_le_bytes());
        hasher.update(&(id.len() as u64).to_le_bytes());
        hasher.update(id);
        hasher.update(&(payload.len() as u64).to_le_bytes());
        hasher.update(payload);
        hasher.update(&[u8::from(batch_end)]);
        hasher.finalize()
    }

    /// Verify the checksum matches the contents
    pub fn verify(&self) -> bool {
        self.checksum
            == Self::calculate_checksum(self.offset, &self.id, &self.payload, self.batch_end)
    }

    /// Serialize to one line of JSON, newline included
    pub fn to_line(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }

    /// Parse from a single line of JSON
    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    pub fn into_record(self) -> Record {
        Record {
            offset: self.offset,
            id: self.id,
            payload: self.payload,
        }
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
