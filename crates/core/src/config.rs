// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Journal configuration
//!
//! A config file is TOML; every key is optional:
//!
//! ```toml
//! dir = "/var/lib/mj"
//! flush_interval = "1s"
//! read_budget_bytes = 10240
//! stop_timeout = "1s"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default period between background watermark flushes
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(1);
/// Default payload byte budget for a single read
pub const DEFAULT_READ_BUDGET_BYTES: usize = 10 * 1024;
/// Default bound on waiting for an in-flight flush during stop
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(1);

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("no journal directory configured")]
    MissingDir,

    #[error("invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Resolved journal configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    /// Storage directory holding the log, lock and watermark files
    pub dir: PathBuf,
    /// Period of the background watermark flush
    pub flush_interval: Duration,
    /// Payload byte budget used by `read_default`
    pub read_budget_bytes: usize,
    /// How long stop waits for an in-flight flush
    pub stop_timeout: Duration,
}

impl JournalConfig {
    /// Config for `dir` with default tuning
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            read_budget_bytes: DEFAULT_READ_BUDGET_BYTES,
            stop_timeout: DEFAULT_STOP_TIMEOUT,
        }
    }

    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    pub fn with_read_budget(mut self, bytes: usize) -> Self {
        self.read_budget_bytes = bytes;
        self
    }

    pub fn with_stop_timeout(mut self, timeout: Duration) -> Self {
        self.stop_timeout = timeout;
        self
    }

    /// Load a TOML config file.
    ///
    /// `dir_override` wins over the file's `dir` key.
    pub fn load(path: &Path, dir_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        RawJournalConfig::load(path)?.resolve(dir_override)
    }

    /// Parse TOML config content
    pub fn from_toml(content: &str, dir_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let raw: RawJournalConfig = toml::from_str(content)?;
        raw.resolve(dir_override)
    }

    /// Reject settings the journal cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flush_interval.is_zero() {
            return Err(ConfigError::Invalid {
                field: "flush_interval",
                reason: "must be greater than zero",
            });
        }
        if self.read_budget_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "read_budget_bytes",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }
}

/// Config as written in TOML, before defaults are applied
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawJournalConfig {
    pub dir: Option<PathBuf>,
    #[serde(with = "humantime_serde", default)]
    pub flush_interval: Option<Duration>,
    pub read_budget_bytes: Option<usize>,
    #[serde(with = "humantime_serde", default)]
    pub stop_timeout: Option<Duration>,
}

impl RawJournalConfig {
    /// Read and parse a TOML file without applying defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply defaults and validate
    pub fn resolve(self, dir_override: Option<PathBuf>) -> Result<JournalConfig, ConfigError> {
        let dir = dir_override.or(self.dir).ok_or(ConfigError::MissingDir)?;
        let config = JournalConfig {
            dir,
            flush_interval: self.flush_interval.unwrap_or(DEFAULT_FLUSH_INTERVAL),
            read_budget_bytes: self.read_budget_bytes.unwrap_or(DEFAULT_READ_BUDGET_BYTES),
            stop_timeout: self.stop_timeout.unwrap_or(DEFAULT_STOP_TIMEOUT),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
