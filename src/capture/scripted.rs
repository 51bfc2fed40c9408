//! In-memory source driven by a fixed script, for tests and benchmarks

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use super::{PollRead, PollingSource};
use crate::error::ClipmanError;

/// One scripted poll result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Bytes become available. Split across polls if the reader's
    /// buffer has less room than the chunk.
    Chunk(Vec<u8>),
    /// The poll window expires with nothing to read
    Idle,
    /// The producer closes the stream
    Close,
    /// The poll primitive fails
    Fail(io::ErrorKind),
}

/// A [`PollingSource`] that replays a list of [`Step`]s.
///
/// Once the script runs out the source reports [`PollRead::Closed`].
#[derive(Debug, Default)]
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    ended: bool,
    polls: usize,
}

impl ScriptedSource {
    /// Source replaying `steps` in order
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            ended: false,
            polls: 0,
        }
    }

    /// Source that already reports end-of-stream
    pub fn ended() -> Self {
        Self {
            ended: true,
            ..Self::default()
        }
    }

    /// Source delivering `data` in one chunk and then closing
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::new(vec![Step::Chunk(data.into()), Step::Close])
    }

    /// Number of polls performed so far
    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl PollingSource for ScriptedSource {
    fn poll_read(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<PollRead, ClipmanError> {
        self.polls += 1;

        match self.steps.pop_front() {
            Some(Step::Chunk(mut chunk)) => {
                if chunk.is_empty() {
                    return Ok(PollRead::Idle);
                }
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                if n < chunk.len() {
                    self.steps.push_front(Step::Chunk(chunk.split_off(n)));
                }
                Ok(PollRead::Data(n))
            }
            Some(Step::Idle) => Ok(PollRead::Idle),
            Some(Step::Fail(kind)) => Err(ClipmanError::Poll(io::Error::from(kind))),
            Some(Step::Close) | None => {
                self.ended = true;
                Ok(PollRead::Closed)
            }
        }
    }

    fn at_end(&self) -> bool {
        self.ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_chunk_to_buffer_size() {
        let mut source = ScriptedSource::new(vec![Step::Chunk(b"abcdef".to_vec())]);
        let mut buf = [0u8; 4];

        let timeout = Duration::from_millis(1);
        assert_eq!(source.poll_read(&mut buf, timeout).unwrap(), PollRead::Data(4));
        assert_eq!(&buf, b"abcd");
        assert_eq!(source.poll_read(&mut buf, timeout).unwrap(), PollRead::Data(2));
        assert_eq!(&buf[..2], b"ef");
        assert_eq!(source.poll_read(&mut buf, timeout).unwrap(), PollRead::Closed);
        assert!(source.at_end());
        assert_eq!(source.polls(), 3);
    }
}
