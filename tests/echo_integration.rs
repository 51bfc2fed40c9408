//! Echo suppression integration tests
//!
//! Runs whole invocations against a real runtime folder (tempdir) with a
//! recording clipboard publisher in place of wl-copy.

use std::fs;
use std::path::Path;

use clipman2::capture::{BoundedReader, ScriptedSource, Step};
use clipman2::config::Config;
use clipman2::echo::{Action, SnapshotChange};
use clipman2::error::{ClipmanError, Result};
use clipman2::invocation::{Invocation, Report};
use clipman2::publish::ClipboardPublisher;
use clipman2::store::FileStore;
use tempfile::TempDir;

/// Publisher that remembers what it was asked to publish
#[derive(Debug, Default)]
struct RecordingPublisher {
    published: Vec<Vec<u8>>,
}

impl ClipboardPublisher for RecordingPublisher {
    fn publish(&mut self, text: &[u8]) -> Result<()> {
        self.published.push(text.to_vec());
        Ok(())
    }
}

fn config_in(dir: &TempDir) -> Config {
    Config::default().with_runtime_dir(dir.path())
}

/// One full invocation with `steps` on stdin; returns the report and
/// everything the publisher received.
fn invoke(config: &Config, steps: Vec<Step>) -> (Result<Report>, Vec<Vec<u8>>) {
    let mut invocation = Invocation::new(
        BoundedReader::new(config.capture),
        FileStore::new(config),
        RecordingPublisher::default(),
    );
    let report = invocation.run_with(&mut ScriptedSource::new(steps));
    let (_, publisher) = invocation.into_guard().into_parts();
    (report, publisher.published)
}

fn invoke_text(config: &Config, text: &str) -> (Report, Vec<Vec<u8>>) {
    let (report, published) = invoke(config, vec![Step::Chunk(text.as_bytes().to_vec())]);
    (report.unwrap(), published)
}

fn snapshot(config: &Config) -> Option<Vec<u8>> {
    fs::read(config.snapshot_path()).ok()
}

fn modified(path: &Path) -> std::time::SystemTime {
    fs::metadata(path).unwrap().modified().unwrap()
}

#[test]
fn test_echo_suppression_cycle() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    fs::write(config.snapshot_path(), b"").unwrap();

    let (report, published) = invoke_text(&config, "hello");
    assert_eq!(report.outcome.action, Action::Published);
    assert_eq!(published, vec![b"hello".to_vec()]);
    assert_eq!(snapshot(&config), Some(b"hello".to_vec()));
    assert!(config.lock_path().exists());

    // wl-paste reports our own wl-copy back to us
    let (report, published) = invoke_text(&config, "hello");
    assert_eq!(report.outcome.action, Action::EchoSuppressed);
    assert_eq!(report.outcome.snapshot, SnapshotChange::Unchanged);
    assert!(published.is_empty());
    assert_eq!(snapshot(&config), Some(b"hello".to_vec()));
    assert!(!config.lock_path().exists());
}

#[test]
fn test_new_content_during_pending_echo() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    fs::write(config.snapshot_path(), b"hello").unwrap();
    fs::write(config.lock_path(), b"").unwrap();

    let (report, published) = invoke_text(&config, "world");
    assert_eq!(
        report.outcome.snapshot,
        SnapshotChange::Updated {
            stale_echo_cleared: true
        }
    );
    assert_eq!(published, vec![b"world".to_vec()]);
    assert_eq!(snapshot(&config), Some(b"world".to_vec()));
    assert!(config.lock_path().exists());
    assert_eq!(fs::metadata(config.lock_path()).unwrap().len(), 0);
}

#[test]
fn test_unchanged_input_does_not_rewrite_snapshot() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    invoke_text(&config, "same");
    let first_write = modified(&config.snapshot_path());

    std::thread::sleep(std::time::Duration::from_millis(50));
    invoke_text(&config, "same");

    assert_eq!(modified(&config.snapshot_path()), first_write);
    assert_eq!(snapshot(&config), Some(b"same".to_vec()));
}

#[test]
fn test_no_data_leaves_state_alone() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let (result, published) = invoke(&config, vec![Step::Close]);
    assert!(matches!(result, Err(ClipmanError::NoInput)));
    assert!(published.is_empty());
    assert!(!config.snapshot_path().exists());
    assert!(!config.lock_path().exists());
}

#[test]
fn test_large_chunked_text_roundtrips() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let text: Vec<u8> = (0..10_000u32).map(|i| b' ' + (i % 90) as u8).collect();
    let steps = text.chunks(333).map(|c| Step::Chunk(c.to_vec())).collect();

    let (report, published) = invoke(&config, steps);
    assert_eq!(report.unwrap().captured_bytes, 10_000);
    assert_eq!(published, vec![text.clone()]);
    assert_eq!(snapshot(&config), Some(text));
}

#[test]
fn test_snapshot_roundtrip_for_any_new_text() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    for text in ["first", "multi\nline\ntext\n", "ünïcödé", "first"] {
        invoke_text(&config, text);
        assert_eq!(snapshot(&config), Some(text.as_bytes().to_vec()));
    }
}

#[test]
fn test_unwritable_runtime_dir_is_best_effort() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir).with_runtime_dir(dir.path().join("missing"));

    // state writes fail silently; the text is still published
    let (report, published) = invoke_text(&config, "text");
    assert!(report.published());
    assert_eq!(published, vec![b"text".to_vec()]);
}
