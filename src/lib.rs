//! # clipman2
//!
//! Clipboard persistence for Wayland. Run by `wl-paste --watch` once per
//! clipboard change, it keeps copied text alive after the application that
//! owned it exits.
//!
//! # Architecture
//!
//! ```text
//! clipman2 (one process per clipboard change)
//!   ├─> BoundedReader   (stdin until idle for 200 ms)
//!   ├─> EchoGuard       (snapshot compare + one-shot echo flag)
//!   │     ├─> StateStore         (/dev/shm/clipman2.txt, clipman2.txt.lock)
//!   │     └─> ClipboardPublisher (wl-copy --type text/plain)
//!   └─> exit code       (0 handled, 1 no input / publisher failure)
//! ```
//!
//! # Data Flow
//!
//! **Change:** wl-paste → stdin → snapshot written → flag set → wl-copy
//!
//! **Echo:** wl-copy → wl-paste → stdin → snapshot unchanged → flag consumed

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Bounded stdin capture
pub mod capture;

/// Fixed policy values
pub mod config;

/// Echo-suppression protocol
pub mod echo;

/// Error types
pub mod error;

/// Single-run orchestration
pub mod invocation;

/// Clipboard-set subprocess
pub mod publish;

/// Persistent state between runs
pub mod store;

/// Utility functions
pub mod utils;

pub use capture::{BoundedReader, Captured, FdSource, PollRead, PollingSource};
pub use config::Config;
pub use echo::{Action, EchoGuard, EchoState, Outcome, SnapshotChange};
pub use error::{ClipmanError, Result};
pub use invocation::{Invocation, Report};
pub use publish::{ClipboardPublisher, CommandPublisher};
pub use store::{FileStore, MemoryStore, StateKey, StateStore};
