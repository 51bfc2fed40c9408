//! Configuration type definitions

use std::path::PathBuf;
use std::time::Duration;

/// Shared-memory folder holding the snapshot and lock flag.
///
/// Contents are lost on reboot, so persistence is per session.
pub const DEFAULT_RUNTIME_DIR: &str = "/dev/shm";

/// Snapshot file name inside the runtime folder
pub const DEFAULT_SNAPSHOT_NAME: &str = "clipman2.txt";

/// Suffix appended to the snapshot name to form the lock flag name
pub const LOCK_SUFFIX: &str = ".lock";

/// Idle timeout for each stdin poll
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(200);

/// Initial capacity of the capture buffer in bytes
pub const DEFAULT_INITIAL_CAPACITY: usize = 4096;

/// Clipboard-set utility
pub const DEFAULT_PUBLISHER_PROGRAM: &str = "wl-copy";

/// Where the snapshot and lock flag live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Runtime folder
    pub runtime_dir: PathBuf,
    /// Snapshot file name
    pub snapshot_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            runtime_dir: PathBuf::from(DEFAULT_RUNTIME_DIR),
            snapshot_name: DEFAULT_SNAPSHOT_NAME.to_string(),
        }
    }
}

/// stdin capture policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Maximum wait per poll before the producer is considered idle
    pub idle_timeout: Duration,
    /// Starting buffer size; doubled whenever it fills
    pub initial_capacity: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

/// Clipboard-set utility invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    /// Program name, resolved through `PATH` when not absolute
    pub program: String,
    /// Argument vector passed verbatim (no shell involved)
    pub args: Vec<String>,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PUBLISHER_PROGRAM.to_string(),
            args: vec!["--type".to_string(), "text/plain".to_string()],
        }
    }
}
