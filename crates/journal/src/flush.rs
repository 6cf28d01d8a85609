// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background watermark flush
//!
//! The flush task owns nothing but clones of the watermark and its file.
//! It only reads the watermark atomic, so it never blocks the append,
//! read or commit paths.

use mj_core::Offset;
use mj_storage::{CommitWatermark, WatermarkFile};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Persist the current watermark.
///
/// Returns the stored value, or `None` when nothing was stored (unset
/// watermark, or a failure that has already been logged).
pub(crate) fn flush_watermark(
    watermark: &CommitWatermark,
    file: &WatermarkFile,
) -> Option<Offset> {
    let value = watermark.current()?;
    file.store(value).then_some(value)
}

/// Handle to the periodic flush task; cancel it to stop flushing
pub(crate) struct FlushTask {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl FlushTask {
    pub(crate) fn spawn(
        runtime: &Handle,
        watermark: Arc<CommitWatermark>,
        file: WatermarkFile,
        interval: Duration,
    ) -> Self {
        let (shutdown, shutdown_rx) = oneshot::channel();
        let handle = runtime.spawn(run(watermark, file, interval, shutdown_rx));
        Self { shutdown, handle }
    }

    /// Stop the task, waiting at most `timeout` for an in-flight flush.
    ///
    /// Returns false if the task had to be aborted.
    pub(crate) async fn cancel(self, timeout: Duration) -> bool {
        // The task may already be gone; nothing to signal then
        let _ = self.shutdown.send(());

        let mut handle = self.handle;
        match tokio::time::timeout(timeout, &mut handle).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "watermark flush task failed");
                true
            }
            Err(_) => {
                tracing::warn!(?timeout, "watermark flush task did not stop in time; aborting");
                handle.abort();
                // Abort lands at the task's next await; a store already
                // under way runs to completion first
                let _ = handle.await;
                false
            }
        }
    }

    /// Abort without waiting (used when a journal is dropped while running).
    ///
    /// An in-flight store may still finish; the watermark file's store lock
    /// orders it against the caller's own flush.
    pub(crate) fn abort(self) {
        self.handle.abort();
    }
}

async fn run(
    watermark: Arc<CommitWatermark>,
    file: WatermarkFile,
    interval: Duration,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately; the first flush is one interval in
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                if let Some(value) = flush_watermark(&watermark, &file) {
                    tracing::trace!(value, "periodic watermark flush");
                }
            }
        }
    }

    tracing::debug!("watermark flush task stopped");
}

#[cfg(test)]
#[path = "flush_tests.rs"]
mod tests;
