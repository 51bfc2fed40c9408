//! Echo suppression
//!
//! Republishing text with `wl-copy` makes `wl-paste --watch` fire again with
//! the very same text. Without suppression every republish would trigger
//! another republish, forever. A one-shot flag breaks the loop: it is set
//! right before we publish and consumed by the next notification, which
//! then does nothing.
//!
//! # State Machine
//!
//! ```text
//!            publish (flag set)
//!   ┌──────┐ ─────────────────> ┌──────────────┐
//!   │ Idle │                    │ AwaitingEcho │
//!   └──────┘ <───────────────── └──────────────┘
//!            echo consumed (flag removed, nothing published)
//! ```
//!
//! Each invocation with text `T` and stored snapshot `S`:
//!
//! 1. If `T != S` (or there is no snapshot): store `T`, and drop a pending
//!    flag if one is set. A real change must never be swallowed by a stale
//!    flag.
//! 2. Look at the flag (after step 1):
//!    - absent: set it, then publish `T`
//!    - present: remove it, publish nothing

use tracing::{debug, info};

use crate::error::Result;
use crate::publish::ClipboardPublisher;
use crate::store::{StateKey, StateStore};

/// Echo state as recorded by the lock flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoState {
    /// No republish is waiting to be observed
    Idle,
    /// We just republished; the next notification is our own echo
    AwaitingEcho,
}

/// What happened to the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotChange {
    /// Captured text matched the snapshot; nothing written
    Unchanged,
    /// Snapshot overwritten with the captured text
    Updated {
        /// A pending echo flag was discarded because content changed
        stale_echo_cleared: bool,
    },
}

/// Whether the text went out to the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Text was handed to the clipboard publisher
    Published,
    /// This notification was our own echo and was swallowed
    EchoSuppressed,
}

/// Result of handling one notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Snapshot update
    pub snapshot: SnapshotChange,
    /// Publish decision
    pub action: Action,
    /// Echo state after this notification
    pub state: EchoState,
}

/// Applies the echo-suppression protocol over a store and a publisher
#[derive(Debug)]
pub struct EchoGuard<S, P> {
    store: S,
    publisher: P,
}

impl<S: StateStore, P: ClipboardPublisher> EchoGuard<S, P> {
    /// Guard over `store`, publishing through `publisher`
    pub fn new(store: S, publisher: P) -> Self {
        Self { store, publisher }
    }

    /// Current echo state
    pub fn state(&self) -> EchoState {
        if self.store.contains(StateKey::EchoPending) {
            EchoState::AwaitingEcho
        } else {
            EchoState::Idle
        }
    }

    /// Handle one clipboard notification carrying `text`.
    ///
    /// Only a publisher failure is returned as an error. If the publisher
    /// cannot be started the flag stays set, exactly as if it had run.
    pub fn handle(&mut self, text: &[u8]) -> Result<Outcome> {
        let snapshot = self.update_snapshot(text);

        let action = match self.state() {
            EchoState::Idle => {
                self.store.store(StateKey::EchoPending, b"");
                info!("Republishing {} bytes to clipboard", text.len());
                self.publisher.publish(text)?;
                Action::Published
            }
            EchoState::AwaitingEcho => {
                self.store.remove(StateKey::EchoPending);
                debug!("Swallowed clipboard echo ({} bytes)", text.len());
                Action::EchoSuppressed
            }
        };

        Ok(Outcome {
            snapshot,
            action,
            state: self.state(),
        })
    }

    fn update_snapshot(&mut self, text: &[u8]) -> SnapshotChange {
        let previous = self.store.load(StateKey::LastText);
        if previous.as_deref() == Some(text) {
            debug!("Clipboard text unchanged ({} bytes)", text.len());
            return SnapshotChange::Unchanged;
        }

        self.store.store(StateKey::LastText, text);
        debug!(
            "Snapshot updated: {} -> {} bytes",
            previous.map_or(0, |p| p.len()),
            text.len()
        );

        let stale_echo_cleared = self.store.contains(StateKey::EchoPending);
        if stale_echo_cleared {
            debug!("Content changed while an echo was pending; dropping stale flag");
            self.store.remove(StateKey::EchoPending);
        }

        SnapshotChange::Updated { stale_echo_cleared }
    }

    /// Borrow the store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Borrow the publisher
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Take the store and publisher back
    pub fn into_parts(self) -> (S, P) {
        (self.store, self.publisher)
    }
}
