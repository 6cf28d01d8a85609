// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable single-value store for the commit watermark
//!
//! The file holds one decimal integer, the last persisted committed offset.
//! Surrounding whitespace is tolerated on load. Stores go through a temp
//! file that is synced and renamed into place, so a crash leaves either the
//! old value or the new one.
//!
//! Clones share one store lock. Stores are serialized through it and a
//! value lower than one already stored is not written, so the file never
//! moves backwards while several tasks flush the same watermark.

use mj_core::Offset;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Name of the watermark file inside a storage directory
pub const WATERMARK_FILE_NAME: &str = "commit.offset";

/// Errors from loading or storing the watermark
#[derive(Debug, Error)]
pub enum WatermarkError {
    #[error("IO error on watermark file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("watermark file {path} is corrupt: {content:?} is not an offset")]
    Malformed { path: PathBuf, content: String },
}

/// Watermark persistence backed by `commit.offset`
#[derive(Debug, Clone)]
pub struct WatermarkFile {
    path: PathBuf,
    tmp_path: PathBuf,
    /// Highest value stored through this handle or its clones
    stored: Arc<Mutex<Option<Offset>>>,
}

impl WatermarkFile {
    /// Watermark file inside storage directory `dir`
    pub fn in_dir(dir: &Path) -> Self {
        let path = dir.join(WATERMARK_FILE_NAME);
        let tmp_path = path.with_extension("offset.tmp");
        Self {
            path,
            tmp_path,
            stored: Arc::new(Mutex::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted watermark.
    ///
    /// A missing or empty file means nothing was ever committed. Anything
    /// else that isn't a non-negative integer is an error: resuming from
    /// offset 0 over a corrupt file would silently reprocess the log.
    pub fn load(&self) -> Result<Option<Offset>, WatermarkError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(WatermarkError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        parse_watermark(&content).ok_or_else(|| WatermarkError::Malformed {
            path: self.path.clone(),
            content: content.trim().chars().take(64).collect(),
        })
    }

    /// Durably store `value`, returning any failure.
    ///
    /// A value below one already stored is skipped and reported as success.
    pub fn try_store(&self, value: Offset) -> Result<(), WatermarkError> {
        let mut stored = self.stored.lock().unwrap_or_else(|e| e.into_inner());
        if (*stored).is_some_and(|prev| value < prev) {
            tracing::trace!(value, stored = ?*stored, "skipping stale watermark store");
            return Ok(());
        }
        self.write_file(value)?;
        *stored = Some(value);
        Ok(())
    }

    fn write_file(&self, value: Offset) -> Result<(), WatermarkError> {
        let io_err = |source: std::io::Error| WatermarkError::Io {
            path: self.path.clone(),
            source,
        };

        let mut writer = BufWriter::new(File::create(&self.tmp_path).map_err(io_err)?);
        write!(writer, "{}", value).map_err(io_err)?;
        let file = writer.into_inner().map_err(|e| io_err(e.into_error()))?;
        file.sync_all().map_err(io_err)?;
        drop(file);

        std::fs::rename(&self.tmp_path, &self.path).map_err(io_err)?;
        self.sync_dir();
        Ok(())
    }

    /// Durably store `value`; failures are logged, not raised.
    ///
    /// Returns whether the value reached disk.
    pub fn store(&self, value: Offset) -> bool {
        match self.try_store(value) {
            Ok(()) => {
                tracing::debug!(value, path = %self.path.display(), "persisted commit watermark");
                true
            }
            Err(e) => {
                tracing::error!(value, error = %e, "failed to persist commit watermark");
                false
            }
        }
    }

    /// Make the rename durable; not every platform can fsync a directory
    fn sync_dir(&self) {
        let Some(dir) = self.path.parent() else {
            return;
        };
        if let Err(e) = File::open(dir).and_then(|d| d.sync_all()) {
            tracing::debug!(dir = %dir.display(), error = %e, "directory sync unavailable");
        }
    }
}

/// Parse watermark file content: `Some(None)` when empty, `None` when malformed
fn parse_watermark(content: &str) -> Option<Option<Offset>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<Offset>().ok().map(Some)
}

#[cfg(test)]
#[path = "watermark_file_tests.rs"]
mod tests;
