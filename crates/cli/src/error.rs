// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.

use mj_journal::JournalError;
use mj_storage::{LockError, LogError, WatermarkError};
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct MjError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl MjError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Another process holds the storage directory lock.
    pub fn lock_held(lock_path: &Path) -> Self {
        MjError::new("journal directory is already in use")
            .with_context(format!("Lock file {} is held", lock_path.display()))
            .with_context("Only one journal may use a storage directory at a time")
            .with_suggestion("Wait for the other mj process to finish")
            .with_suggestion("Use a different directory with --dir")
    }

    /// The persisted commit watermark could not be parsed.
    pub fn corrupt_watermark(path: &Path, content: &str) -> Self {
        MjError::new(format!("commit watermark {} is corrupt", path.display()))
            .with_context(format!("File contains '{}'", content))
            .with_suggestion("Restore the file from a backup")
            .with_suggestion(format!(
                "Delete {} to restart reading from offset 0",
                path.display()
            ))
    }

    /// Build a display error from whatever bubbled up to `main`.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<JournalError>() {
            Some(JournalError::Log(LogError::Lock(LockError::Held { path, .. }))) => {
                MjError::lock_held(path)
            }
            Some(JournalError::Watermark(WatermarkError::Malformed { path, content })) => {
                MjError::corrupt_watermark(path, content)
            }
            _ => MjError::new(format!("{:#}", err)),
        }
    }
}

impl fmt::Display for MjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for MjError {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
