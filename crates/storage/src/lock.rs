// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exclusive ownership of a storage directory
//!
//! One journal per directory. The lock is an advisory exclusive lock on
//! `journal.lock`, which also records the owner's PID for operators.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the lock file inside a storage directory
pub const LOCK_FILE_NAME: &str = "journal.lock";

/// Errors from acquiring a storage lock
#[derive(Debug, Error)]
pub enum LockError {
    #[error("storage directory is locked by another journal ({path})")]
    Held {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error on lock file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Held exclusive lock on a storage directory; released on drop
#[derive(Debug)]
pub struct StorageLock {
    path: PathBuf,
    file: File,
}

impl StorageLock {
    /// Lock `dir`, failing fast if another holder exists
    pub fn acquire(dir: &Path) -> Result<Self, LockError> {
        let path = dir.join(LOCK_FILE_NAME);
        let io_err = |source: std::io::Error| LockError::Io {
            path: path.clone(),
            source,
        };

        // Don't truncate before the lock is ours: the PID belongs to the holder
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(io_err)?;

        if let Err(source) = file.try_lock_exclusive() {
            if source.kind() == fs2::lock_contended_error().kind() {
                return Err(LockError::Held {
                    path: path.clone(),
                    source,
                });
            }
            return Err(io_err(source));
        }

        file.set_len(0).map_err(io_err)?;
        writeln!(file, "{}", std::process::id()).map_err(io_err)?;

        tracing::debug!(path = %path.display(), "acquired storage lock");
        Ok(Self { path, file })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StorageLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release storage lock");
        }
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
