//! One clipman2 run
//!
//! `wl-paste --watch` starts a fresh process per clipboard change:
//!
//! ```text
//! stdin ─> BoundedReader ─> Captured ─┬─ NoData ─> exit 1, no state touched
//!                                     └─ bytes ──> EchoGuard ─> (wl-copy) ─> exit 0
//! ```

use tracing::{debug, error, warn};

use crate::capture::{BoundedReader, Captured, FdSource, PollingSource};
use crate::config::Config;
use crate::echo::{Action, EchoGuard, Outcome};
use crate::error::{ClipmanError, Result};
use crate::publish::{ClipboardPublisher, CommandPublisher};
use crate::store::{FileStore, StateStore};

/// Summary of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Bytes captured from the input stream
    pub captured_bytes: usize,
    /// The read stopped on a poll/read failure rather than idle or close
    pub interrupted: bool,
    /// Protocol outcome
    pub outcome: Outcome,
}

impl Report {
    /// Whether text was handed to the clipboard publisher
    pub fn published(&self) -> bool {
        self.outcome.action == Action::Published
    }
}

/// Wires a source, store and publisher for a single run
#[derive(Debug)]
pub struct Invocation<S, P> {
    reader: BoundedReader,
    guard: EchoGuard<S, P>,
}

impl<S: StateStore, P: ClipboardPublisher> Invocation<S, P> {
    /// Run with the given reader policy, store and publisher
    pub fn new(reader: BoundedReader, store: S, publisher: P) -> Self {
        Self {
            reader,
            guard: EchoGuard::new(store, publisher),
        }
    }

    /// Capture from `source` and apply the echo protocol.
    ///
    /// Returns [`ClipmanError::NoInput`] without touching the store when
    /// nothing was read.
    pub fn run_with<I: PollingSource + ?Sized>(&mut self, source: &mut I) -> Result<Report> {
        let captured = self.reader.read_to_idle(source);

        let (text, interrupted) = match captured {
            Captured::NoData => return Err(ClipmanError::NoInput),
            Captured::Complete(bytes) => (bytes, false),
            Captured::Interrupted { bytes, error } => {
                error!("Input stream failed after {} bytes: {}", bytes.len(), error);
                (bytes, true)
            }
        };

        let outcome = self.guard.handle(&text)?;
        debug!("Invocation outcome: {:?}", outcome);

        Ok(Report {
            captured_bytes: text.len(),
            interrupted,
            outcome,
        })
    }

    /// Borrow the echo guard
    pub fn guard(&self) -> &EchoGuard<S, P> {
        &self.guard
    }

    /// Take the echo guard back
    pub fn into_guard(self) -> EchoGuard<S, P> {
        self.guard
    }
}

/// Production run: stdin, files under the runtime folder, `wl-copy`.
pub fn run(config: &Config) -> Result<Report> {
    config.validate()?;

    let mut source = FdSource::stdin()?;
    let store = FileStore::new(config);
    let publisher = CommandPublisher::new(config.publisher.clone());

    let mut invocation = Invocation::new(BoundedReader::new(config.capture), store, publisher);
    let report = invocation.run_with(&mut source)?;

    let failed = invocation.guard().store().failed_writes();
    if failed > 0 {
        warn!("{} state file writes failed; state may be stale", failed);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{ScriptedSource, Step};
    use crate::echo::SnapshotChange;
    use crate::publish::MockClipboardPublisher;
    use crate::store::{MemoryStore, StateKey};
    use std::io;

    fn invocation(
        store: MemoryStore,
        publishes: usize,
    ) -> Invocation<MemoryStore, MockClipboardPublisher> {
        let mut publisher = MockClipboardPublisher::new();
        publisher
            .expect_publish()
            .times(publishes)
            .returning(|_| Ok(()));
        Invocation::new(BoundedReader::default(), store, publisher)
    }

    #[test]
    fn test_no_data_touches_nothing() {
        let store = MemoryStore::with_state(Some(b"old"), true);
        let mut run = invocation(store, 0);

        let result = run.run_with(&mut ScriptedSource::new(vec![Step::Close]));
        assert!(matches!(result, Err(ClipmanError::NoInput)));

        let store = run.guard().store();
        assert!(store.ops().is_empty());
        assert_eq!(store.load(StateKey::LastText), Some(b"old".to_vec()));
        assert!(store.contains(StateKey::EchoPending));
    }

    #[test]
    fn test_capture_and_publish() {
        let mut run = invocation(MemoryStore::new(), 1);

        let report = run
            .run_with(&mut ScriptedSource::from_bytes("hello"))
            .unwrap();
        assert_eq!(report.captured_bytes, 5);
        assert!(!report.interrupted);
        assert!(report.published());
    }

    #[test]
    fn test_interrupted_read_still_processed() {
        let mut run = invocation(MemoryStore::new(), 1);
        let mut source = ScriptedSource::new(vec![
            Step::Chunk(b"part".to_vec()),
            Step::Fail(io::ErrorKind::Other),
        ]);

        let report = run.run_with(&mut source).unwrap();
        assert!(report.interrupted);
        assert_eq!(report.captured_bytes, 4);
        assert_eq!(
            report.outcome.snapshot,
            SnapshotChange::Updated {
                stale_echo_cleared: false
            }
        );
    }

    #[test]
    fn test_echo_run_publishes_nothing() {
        let store = MemoryStore::with_state(Some(b"hello"), true);
        let mut run = invocation(store, 0);

        let report = run
            .run_with(&mut ScriptedSource::from_bytes("hello"))
            .unwrap();
        assert!(!report.published());
        assert!(!run.guard().store().contains(StateKey::EchoPending));
    }
}
