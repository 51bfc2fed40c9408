//! Filesystem-backed state store

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::{BestEffort, StateKey, StateStore};
use crate::config::Config;

/// Stores each key in its own file inside the runtime folder
#[derive(Debug)]
pub struct FileStore {
    snapshot_path: PathBuf,
    lock_path: PathBuf,
    policy: BestEffort,
}

impl FileStore {
    /// Store using the paths from `config`
    pub fn new(config: &Config) -> Self {
        Self::with_paths(config.snapshot_path(), config.lock_path())
    }

    /// Store using explicit snapshot and lock flag paths
    pub fn with_paths(snapshot_path: impl Into<PathBuf>, lock_path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
            lock_path: lock_path.into(),
            policy: BestEffort::default(),
        }
    }

    /// File backing `key`
    pub fn path(&self, key: StateKey) -> &Path {
        match key {
            StateKey::LastText => &self.snapshot_path,
            StateKey::EchoPending => &self.lock_path,
        }
    }

    /// Write or removal failures swallowed so far
    pub fn failed_writes(&self) -> usize {
        self.policy.failures()
    }
}

impl StateStore for FileStore {
    fn load(&self, key: StateKey) -> Option<Vec<u8>> {
        let path = self.path(key);
        match fs::read(path) {
            // An empty file reads the same as a missing one
            Ok(bytes) if bytes.is_empty() => None,
            Ok(bytes) => {
                trace!("Loaded {} bytes of {} from {:?}", bytes.len(), key, path);
                Some(bytes)
            }
            Err(e) => {
                debug!("No {} at {:?}: {}", key, path, e);
                None
            }
        }
    }

    fn contains(&self, key: StateKey) -> bool {
        self.path(key).exists()
    }

    fn store(&mut self, key: StateKey, value: &[u8]) {
        let result = fs::write(self.path(key), value);
        self.policy.absorb("write", key, result);
    }

    fn remove(&mut self, key: StateKey) {
        let result = fs::remove_file(self.path(key));
        self.policy.absorb("remove", key, result);
    }
}
