// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the journal facade

use crate::JournalState;
use mj_core::ConfigError;
use mj_storage::{LogError, WatermarkError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from journal startup and the append/read path
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot create storage directory {path}: {source}")]
    StorageDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("log error: {0}")]
    Log(#[from] LogError),

    #[error("watermark error: {0}")]
    Watermark(#[from] WatermarkError),

    #[error("journal is {state}, not running")]
    NotRunning { state: JournalState },

    #[error("journal must be started inside a tokio runtime")]
    NoRuntime,
}
