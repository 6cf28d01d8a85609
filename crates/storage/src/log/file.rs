// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed log primitive
//!
//! Records live in `journal.jsonl`, one JSON line each. Every append is
//! fsync'd before it returns. On open the file is scanned and a torn tail
//! (a corrupted line, or a batch whose closing record never reached disk)
//! is truncated, so each batch is either wholly present or absent.

use super::record::LogRecord;
use super::{fits_budget, LogError, LogPrimitive};
use crate::lock::StorageLock;
use mj_core::{Entry, Offset, Record};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Name of the log file inside a storage directory
pub const LOG_FILE_NAME: &str = "journal.jsonl";

/// Single-file append log with an in-memory offset index
pub struct FileLog {
    path: PathBuf,
    writer: Mutex<LogWriter>,
    /// Mirror of `positions.len()` readable without the writer lock
    next_offset: AtomicU64,
    // NOTE(lifetime): Held to maintain exclusive directory lock; released on drop
    _lock: StorageLock,
}

struct LogWriter {
    file: File,
    /// Byte position of each record, indexed by offset
    positions: Vec<u64>,
    len_bytes: u64,
    /// Set when a failed batch could not be truncated away; the file then
    /// no longer matches `positions` until it is reopened and repaired
    needs_repair: bool,
}

/// Valid prefix of an existing log file
struct Scan {
    positions: Vec<u64>,
    valid_len: u64,
    stop_reason: Option<String>,
}

impl FileLog {
    /// Open or create the log in `dir`, taking the directory lock
    pub fn open(dir: &Path) -> Result<Self, LogError> {
        std::fs::create_dir_all(dir).map_err(|source| LogError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        // Lock FIRST - a second journal must not even scan the file
        let lock = StorageLock::acquire(dir)?;

        let path = dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)?;

        let scan = scan(&path)?;
        let file_len = file.metadata()?.len();
        if file_len > scan.valid_len {
            tracing::warn!(
                path = %path.display(),
                dropped_bytes = file_len - scan.valid_len,
                recovered_records = scan.positions.len(),
                reason = scan.stop_reason.as_deref().unwrap_or("incomplete batch"),
                "truncating torn log tail"
            );
            file.set_len(scan.valid_len)?;
            file.sync_all()?;
        }

        let next_offset = scan.positions.len() as u64;
        tracing::info!(
            path = %path.display(),
            lock = %lock.path().display(),
            next_offset,
            "opened log"
        );

        Ok(Self {
            path,
            writer: Mutex::new(LogWriter {
                file,
                positions: scan.positions,
                len_bytes: scan.valid_len,
                needs_repair: false,
            }),
            next_offset: AtomicU64::new(next_offset),
            _lock: lock,
        })
    }

    /// Path to the log file
    #[cfg(test)]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Offset of the most recently appended record
    #[cfg(test)]
    pub(crate) fn last_offset(&self) -> Option<Offset> {
        self.next_offset().checked_sub(1)
    }

    /// Size of the valid log contents in bytes
    #[cfg(test)]
    pub(crate) fn len_bytes(&self) -> u64 {
        self.lock_writer().len_bytes
    }

    fn lock_writer(&self) -> MutexGuard<'_, LogWriter> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LogPrimitive for FileLog {
    fn append(&self, entries: Vec<Entry>) -> Result<Offset, LogError> {
        if entries.is_empty() {
            return Err(LogError::EmptyBatch);
        }

        let mut writer = self.lock_writer();
        if writer.needs_repair {
            return Err(LogError::NeedsRepair {
                path: self.path.clone(),
            });
        }
        let first = writer.positions.len() as u64;
        let last_index = entries.len() - 1;

        let mut buf = Vec::new();
        let mut positions = Vec::with_capacity(entries.len());
        for (i, entry) in entries.into_iter().enumerate() {
            let (id, payload) = entry.into_parts();
            let record = LogRecord::new(first + i as u64, id, payload, i == last_index);
            positions.push(writer.len_bytes + buf.len() as u64);
            buf.extend_from_slice(&record.to_line()?);
        }

        // One write, one sync: the batch is durable before the offset is visible
        if let Err(e) = writer
            .file
            .write_all(&buf)
            .and_then(|()| writer.file.sync_all())
        {
            let len = writer.len_bytes;
            if let Err(rollback) = writer.file.set_len(len) {
                tracing::error!(
                    path = %self.path.display(),
                    error = %rollback,
                    "failed to roll back partial batch; refusing appends until reopened"
                );
                writer.needs_repair = true;
            }
            return Err(e.into());
        }

        writer.len_bytes += buf.len() as u64;
        writer.positions.extend(positions);
        let next = writer.positions.len() as u64;
        self.next_offset.store(next, Ordering::Release);

        Ok(next - 1)
    }

    fn read(&self, from: Offset, max_bytes: usize) -> Result<Vec<Record>, LogError> {
        let (start, end) = {
            let writer = self.lock_writer();
            let next = writer.positions.len() as u64;
            if from == next {
                return Ok(Vec::new());
            }
            let start = usize::try_from(from)
                .ok()
                .and_then(|i| writer.positions.get(i).copied())
                .ok_or(LogError::OffsetOutOfRange {
                    requested: from,
                    first: 0,
                    next,
                })?;
            (start, writer.len_bytes)
        };

        // Reads use their own handle so appends are not held up by read I/O
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(start))?;
        let reader = BufReader::new(file.take(end - start));

        let mut records = Vec::new();
        let mut used = 0usize;
        for line in reader.lines() {
            let line = line?;
            let record = LogRecord::from_line(&line).map_err(|e| LogError::Corrupted {
                offset: from + records.len() as u64,
                reason: e.to_string(),
            })?;
            if !record.verify() {
                return Err(LogError::Corrupted {
                    offset: record.offset,
                    reason: "checksum mismatch".to_string(),
                });
            }
            if !fits_budget(records.len(), used, record.payload.len(), max_bytes) {
                break;
            }
            used += record.payload.len();
            records.push(record.into_record());
        }

        Ok(records)
    }

    fn next_offset(&self) -> Offset {
        self.next_offset.load(Ordering::Acquire)
    }
}

/// Scan a log file for its longest prefix of complete, valid batches
fn scan(path: &Path) -> Result<Scan, LogError> {
    let mut reader = BufReader::new(File::open(path)?);

    let mut positions = Vec::new();
    let mut pending = Vec::new();
    let mut position = 0u64;
    let mut valid_len = 0u64;
    let mut stop_reason = None;
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                stop_reason = Some(format!("read error: {}", e));
                break;
            }
        };
        let start = position;
        position += bytes_read as u64;

        if !line.ends_with('\n') {
            stop_reason = Some("truncated record".to_string());
            break;
        }

        let record = match LogRecord::from_line(line.trim_end()) {
            Ok(r) => r,
            Err(e) => {
                stop_reason = Some(format!("unparseable record: {}", e));
                break;
            }
        };
        if !record.verify() {
            stop_reason = Some(format!("checksum mismatch at offset {}", record.offset));
            break;
        }
        let expected = (positions.len() + pending.len()) as u64;
        if record.offset != expected {
            stop_reason = Some(format!(
                "offset {} where {} was expected",
                record.offset, expected
            ));
            break;
        }

        pending.push(start);
        if record.batch_end {
            positions.append(&mut pending);
            valid_len = position;
        }
    }

    Ok(Scan {
        positions,
        valid_len,
        stop_reason,
    })
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
