//! Bounded stdin capture
//!
//! Reads everything a slow or bursty producer writes, stopping once the
//! producer has been idle for one poll window.
//!
//! # Algorithm
//!
//! ```text
//! buffer = 4096 bytes, filled = 0
//! while !source.at_end():
//!     poll(timeout) ──> Data(n)  ─> filled += n, double buffer when full
//!                   ──> Idle / Closed ─> filled == 0 ? NoData : stop
//!                   ──> error    ─> stop, report Interrupted(filled bytes)
//! ```
//!
//! Growth is by doubling, so total copying stays linear in the input size
//! and there is no upper bound other than memory.
//!
//! `NoData` (nothing at all arrived) is deliberately distinct from an
//! empty capture: `wl-paste --watch` may fire without ever writing, and
//! that invocation must not touch any state.

use std::time::Duration;

use tracing::{debug, trace};

use crate::config::CaptureConfig;
use crate::error::ClipmanError;

mod fd;
pub mod scripted;

pub use fd::FdSource;
pub use scripted::{ScriptedSource, Step};

/// Result of one timed poll on a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollRead {
    /// `n > 0` bytes were written into the buffer
    Data(usize),
    /// Nothing arrived within the timeout
    Idle,
    /// The producer closed the stream
    Closed,
}

/// An input stream that can be read with a per-call timeout
pub trait PollingSource {
    /// Wait up to `timeout` for input, then read at most `buf.len()` bytes.
    fn poll_read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<PollRead, ClipmanError>;

    /// Whether end-of-stream has already been observed.
    fn at_end(&self) -> bool;
}

/// What a capture produced
#[derive(Debug)]
pub enum Captured {
    /// The stream produced no bytes at all
    NoData,
    /// The producer went idle or closed after sending `bytes`
    Complete(Vec<u8>),
    /// A poll or read failed; `bytes` is what had arrived before that
    Interrupted {
        /// Bytes accumulated before the failure (possibly empty)
        bytes: Vec<u8>,
        /// The failure that stopped the read
        error: ClipmanError,
    },
}

impl Captured {
    /// Captured bytes, or `None` for [`Captured::NoData`]
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Captured::NoData => None,
            Captured::Complete(bytes) | Captured::Interrupted { bytes, .. } => Some(bytes),
        }
    }

    /// Consume into the captured bytes
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Captured::NoData => None,
            Captured::Complete(bytes) | Captured::Interrupted { bytes, .. } => Some(bytes),
        }
    }
}

/// Reads a [`PollingSource`] until it goes idle
#[derive(Debug, Clone, Copy)]
pub struct BoundedReader {
    idle_timeout: Duration,
    initial_capacity: usize,
}

impl Default for BoundedReader {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}

impl BoundedReader {
    /// Create a reader with the given policy
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            idle_timeout: config.idle_timeout,
            initial_capacity: config.initial_capacity.max(1),
        }
    }

    /// Idle timeout applied to each poll
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Read until the source is idle for one window, closes or fails.
    pub fn read_to_idle<S: PollingSource + ?Sized>(&self, source: &mut S) -> Captured {
        let mut buffer = vec![0u8; self.initial_capacity];
        let mut filled = 0usize;

        while !source.at_end() {
            match source.poll_read(&mut buffer[filled..], self.idle_timeout) {
                Ok(PollRead::Data(n)) => {
                    filled += n;
                    trace!("Captured {} bytes ({} total)", n, filled);

                    if filled == buffer.len() {
                        let grown = buffer.len() * 2;
                        debug!("Capture buffer full, growing {} -> {}", buffer.len(), grown);
                        buffer.resize(grown, 0);
                    }
                }
                Ok(PollRead::Idle) | Ok(PollRead::Closed) if filled == 0 => {
                    debug!("No data on input stream");
                    return Captured::NoData;
                }
                Ok(_) => break,
                Err(error) => {
                    buffer.truncate(filled);
                    return Captured::Interrupted {
                        bytes: buffer,
                        error,
                    };
                }
            }
        }

        if filled == 0 {
            return Captured::NoData;
        }

        buffer.truncate(filled);
        debug!("Capture complete: {} bytes", filled);
        Captured::Complete(buffer)
    }
}
