//! Configuration
//!
//! Fixed policy values for a clipman2 run. There is no config file; the
//! binary always uses [`Config::default`], other values exist so tests and
//! embedders can point the program at a scratch directory or a fake
//! clipboard utility.

use std::path::PathBuf;

use crate::error::{ClipmanError, Result};

pub mod types;

pub use types::*;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Snapshot and lock flag location
    pub storage: StorageConfig,
    /// stdin capture policy
    pub capture: CaptureConfig,
    /// Clipboard-set utility
    pub publisher: PublisherConfig,
}

impl Config {
    /// Configuration rooted at a different runtime folder
    pub fn with_runtime_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.runtime_dir = dir.into();
        self
    }

    /// Configuration using a different clipboard-set utility
    pub fn with_publisher(mut self, program: impl Into<String>, args: Vec<String>) -> Self {
        self.publisher = PublisherConfig {
            program: program.into(),
            args,
        };
        self
    }

    /// Full path of the snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.storage.runtime_dir.join(&self.storage.snapshot_name)
    }

    /// Full path of the lock flag file
    pub fn lock_path(&self) -> PathBuf {
        self.storage
            .runtime_dir
            .join(format!("{}{}", self.storage.snapshot_name, LOCK_SUFFIX))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.capture.idle_timeout.is_zero() {
            return Err(ClipmanError::InvalidConfig(
                "idle timeout must be non-zero".to_string(),
            ));
        }

        if self.capture.initial_capacity == 0 {
            return Err(ClipmanError::InvalidConfig(
                "initial capture capacity must be non-zero".to_string(),
            ));
        }

        if self.storage.snapshot_name.is_empty() {
            return Err(ClipmanError::InvalidConfig(
                "snapshot file name is empty".to_string(),
            ));
        }

        if self.publisher.program.trim().is_empty() {
            return Err(ClipmanError::InvalidConfig(
                "publisher program is empty".to_string(),
            ));
        }

        Ok(())
    }
}
