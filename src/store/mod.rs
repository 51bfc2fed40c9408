//! Cross-invocation state
//!
//! Every clipman2 run is a fresh process, so the only state carried from
//! one clipboard notification to the next lives here, under two keys:
//!
//! | Key | Meaning | File backend |
//! |-----|---------|--------------|
//! | [`StateKey::LastText`] | last captured clipboard text | `<runtime>/clipman2.txt` |
//! | [`StateKey::EchoPending`] | our own republish is still to be observed | `<runtime>/clipman2.txt.lock` (existence only) |
//!
//! # Write policy
//!
//! Writes and removals are best-effort: failures are logged and counted by
//! [`BestEffort`] but never returned to the caller, so a full or read-only
//! runtime folder does not change the exit code.
//!
//! # Concurrency
//!
//! No file lock is taken. Two overlapping invocations can interleave their
//! read-modify-write of both keys, which either republishes an echo twice or
//! swallows a real change. `wl-paste --watch` fires rarely enough that this
//! is accepted.

use std::fmt;
use std::io;

use tracing::warn;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::{MemoryStore, StoreOp};

/// The two persisted values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    /// Snapshot of the last captured text
    LastText,
    /// One-shot "ignore the next notification" flag
    EchoPending,
}

impl StateKey {
    /// Stable key name
    pub fn as_str(self) -> &'static str {
        match self {
            StateKey::LastText => "last-text",
            StateKey::EchoPending => "echo-pending",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistent key-value store holding clipman2 state between runs
pub trait StateStore {
    /// Value under `key`, or `None` when absent, unreadable or empty
    fn load(&self, key: StateKey) -> Option<Vec<u8>>;

    /// Whether `key` is present at all (an empty value counts)
    fn contains(&self, key: StateKey) -> bool;

    /// Replace the value under `key` (best-effort)
    fn store(&mut self, key: StateKey, value: &[u8]);

    /// Delete `key` (best-effort)
    fn remove(&mut self, key: StateKey);
}

/// Records best-effort write failures without propagating them
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BestEffort {
    failures: usize,
}

impl BestEffort {
    /// Swallow `result`, logging and counting a failure
    pub fn absorb(&mut self, op: &str, key: StateKey, result: io::Result<()>) {
        if let Err(e) = result {
            self.failures += 1;
            warn!("Best-effort {} of {} failed: {}", op, key, e);
        }
    }

    /// Number of swallowed failures
    pub fn failures(&self) -> usize {
        self.failures
    }
}
