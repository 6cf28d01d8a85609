// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Journal facade: append, sequential read, commit, and lifecycle

use crate::flush::{flush_watermark, FlushTask};
use crate::state::StateCell;
use crate::{JournalError, JournalState};
use mj_core::{Entry, JournalConfig, Offset, Record};
use mj_storage::{CommitWatermark, FileLog, LogError, LogPrimitive, ReadCursor, WatermarkFile};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

/// Point-in-time view of a journal's positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalStatus {
    pub state: JournalState,
    /// Highest committed offset, `None` if nothing was ever committed
    pub committed: Option<Offset>,
    /// Offset the next `read` starts from
    pub next_read: Offset,
    /// Offset the next `append` will receive; `None` once the log is released
    pub next_offset: Option<Offset>,
}

/// Durable message journal over a log primitive
///
/// Producers may `append` concurrently. `read` serves one logical consumer;
/// `commit` is safe from any thread and never blocks or fails.
pub struct Journal<L: LogPrimitive = FileLog> {
    config: JournalConfig,
    state: StateCell,
    log: RwLock<Option<Arc<L>>>,
    watermark: Arc<CommitWatermark>,
    watermark_file: WatermarkFile,
    cursor: Mutex<ReadCursor>,
    flush_task: Mutex<Option<FlushTask>>,
}

impl Journal<FileLog> {
    /// Start a journal over the file log in `config.dir`.
    ///
    /// Must be called inside a tokio runtime, which hosts the flush task.
    pub fn open(config: JournalConfig) -> Result<Self, JournalError> {
        config.validate()?;
        // FileLog::open creates the directory
        let log = FileLog::open(&config.dir).map_err(|e| match e {
            LogError::CreateDir { path, source } => storage_dir_error(path, source),
            other => other.into(),
        })?;
        Self::startup(config, log)
    }
}

impl<L: LogPrimitive> Journal<L> {
    /// Start a journal over an already-open log: recover the watermark,
    /// seed the read cursor and schedule the periodic flush.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(config: JournalConfig, log: L) -> Result<Self, JournalError> {
        config.validate()?;
        create_storage_dir(&config)?;
        Self::startup(config, log)
    }

    fn startup(config: JournalConfig, log: L) -> Result<Self, JournalError> {
        let state = StateCell::new(JournalState::Starting);
        let runtime = Handle::try_current().map_err(|_| JournalError::NoRuntime)?;

        let watermark_file = WatermarkFile::in_dir(&config.dir);
        let recovered = watermark_file.load()?;
        let watermark = Arc::new(CommitWatermark::recovered(recovered));
        let cursor = ReadCursor::after_watermark(recovered);

        info!(
            watermark_file = %watermark_file.path().display(),
            committed = ?recovered,
            next_read = cursor.next_offset(),
            next_offset = log.next_offset(),
            "recovered journal positions"
        );

        let flush_task = FlushTask::spawn(
            &runtime,
            Arc::clone(&watermark),
            watermark_file.clone(),
            config.flush_interval,
        );

        state.set(JournalState::Running);
        info!(
            dir = %config.dir.display(),
            flush_interval = ?config.flush_interval,
            "journal running"
        );

        Ok(Self {
            config,
            state,
            log: RwLock::new(Some(Arc::new(log))),
            watermark,
            watermark_file,
            cursor: Mutex::new(cursor),
            flush_task: Mutex::new(Some(flush_task)),
        })
    }

    /// Append a batch; returns the offset of its last entry
    pub fn append(&self, entries: Vec<Entry>) -> Result<Offset, JournalError> {
        let log = self.running_log()?;
        Ok(log.append(entries)?)
    }

    /// Append a single entry
    pub fn append_one(
        &self,
        id: impl Into<Vec<u8>>,
        payload: impl Into<Vec<u8>>,
    ) -> Result<Offset, JournalError> {
        self.append(vec![Entry::new(id, payload)])
    }

    /// Read up to `max_bytes` of payload from the read cursor.
    ///
    /// An empty result means the consumer is caught up (or the cursor is
    /// outside the retained log); retry later.
    pub fn read(&self, max_bytes: usize) -> Result<Vec<Record>, JournalError> {
        let log = self.running_log()?;
        let mut cursor = self.cursor.lock().unwrap_or_else(|e| e.into_inner());
        Ok(cursor.pull(log.as_ref(), max_bytes)?)
    }

    /// Read with the configured per-read byte budget
    pub fn read_default(&self) -> Result<Vec<Record>, JournalError> {
        self.read(self.config.read_budget_bytes)
    }

    /// Declare everything up to and including `offset` fully processed.
    ///
    /// Offsets are not checked against the log; committing past the end
    /// moves the watermark anyway.
    pub fn commit(&self, offset: Offset) {
        let committed = self.watermark.advance(offset);

        // try_read: commit must not wait on a concurrent stop
        if let Ok(guard) = self.log.try_read() {
            if let Some(log) = guard.as_ref() {
                if offset >= log.next_offset() {
                    debug!(
                        offset,
                        next_offset = log.next_offset(),
                        "commit beyond the end of the log"
                    );
                }
            }
        }

        let state = self.state.get();
        if state != JournalState::Running {
            warn!(offset, committed, %state, "commit on a journal that is not running will not be persisted");
        }
    }

    /// Highest committed offset
    pub fn committed(&self) -> Option<Offset> {
        self.watermark.current()
    }

    /// Offset the next `read` starts from
    pub fn next_read_offset(&self) -> Offset {
        self.cursor
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .next_offset()
    }

    pub fn state(&self) -> JournalState {
        self.state.get()
    }

    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    pub fn status(&self) -> JournalStatus {
        let next_offset = self
            .log
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|log| log.next_offset());
        JournalStatus {
            state: self.state(),
            committed: self.committed(),
            next_read: self.next_read_offset(),
            next_offset,
        }
    }

    /// Persist the watermark now instead of waiting for the next interval
    pub fn flush_now(&self) -> Result<(), JournalError> {
        if let Some(value) = self.watermark.current() {
            self.watermark_file.try_store(value)?;
        }
        Ok(())
    }

    /// Stop the journal: cancel the flush task, persist the watermark one
    /// last time, and release the log. Calling it again is a no-op.
    pub async fn stop(&self) {
        if !self
            .state
            .transition(JournalState::Running, JournalState::Stopping)
        {
            debug!(state = %self.state.get(), "stop on a journal that is not running");
            return;
        }
        info!(dir = %self.config.dir.display(), "stopping journal");

        let task = self
            .flush_task
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(task) = task {
            task.cancel(self.config.stop_timeout).await;
        }

        // Sole writer of the watermark file from here on
        let persisted = flush_watermark(&self.watermark, &self.watermark_file);

        self.log.write().unwrap_or_else(|e| e.into_inner()).take();
        self.state.set(JournalState::Stopped);
        info!(committed = ?persisted, "journal stopped");
    }

    /// The log, if the journal is running
    fn running_log(&self) -> Result<Arc<L>, JournalError> {
        let state = self.state.get();
        if state != JournalState::Running {
            return Err(JournalError::NotRunning { state });
        }
        self.log
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(JournalError::NotRunning { state })
    }
}

impl<L: LogPrimitive> Drop for Journal<L> {
    fn drop(&mut self) {
        if self.state.get() != JournalState::Running {
            return;
        }
        warn!(dir = %self.config.dir.display(), "journal dropped without stop; flushing watermark");

        let task = self
            .flush_task
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(task) = task {
            task.abort();
        }
        flush_watermark(&self.watermark, &self.watermark_file);
        self.state.set(JournalState::Stopped);
    }
}

fn create_storage_dir(config: &JournalConfig) -> Result<(), JournalError> {
    std::fs::create_dir_all(&config.dir)
        .map_err(|source| storage_dir_error(config.dir.clone(), source))
}

fn storage_dir_error(path: PathBuf, source: std::io::Error) -> JournalError {
    tracing::error!(path = %path.display(), error = %source, "cannot create storage directory");
    JournalError::StorageDir { path, source }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
