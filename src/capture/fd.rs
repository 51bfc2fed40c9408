//! File-descriptor backed source (stdin in production)

use std::fs::File;
use std::io::{self, Read};
use std::os::fd::AsFd;
use std::time::Duration;

use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use tracing::trace;

use super::{PollRead, PollingSource};
use crate::error::ClipmanError;

/// Polls a descriptor with `poll(2)` and reads with a plain `read(2)`.
///
/// `F` must be unbuffered: bytes sitting in a user-space buffer are invisible
/// to `poll`, and would be dropped when the stream goes idle.
#[derive(Debug)]
pub struct FdSource<F> {
    inner: F,
    ended: bool,
}

impl FdSource<File> {
    /// Source over a duplicate of the process stdin descriptor.
    ///
    /// `std::io::Stdin` buffers internally, so the descriptor is cloned into
    /// an unbuffered `File` instead.
    pub fn stdin() -> io::Result<Self> {
        let fd = io::stdin().as_fd().try_clone_to_owned()?;
        Ok(Self::new(File::from(fd)))
    }
}

impl<F: AsFd + Read> FdSource<F> {
    /// Wrap an unbuffered, readable descriptor
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            ended: false,
        }
    }

    /// Returns true once the descriptor is readable (data, hangup or error).
    fn wait_readable(&self, timeout: Duration) -> Result<bool, ClipmanError> {
        let millis = u16::try_from(timeout.as_millis()).unwrap_or(u16::MAX);
        let mut fds = [PollFd::new(self.inner.as_fd(), PollFlags::POLLIN)];

        let ready = poll(&mut fds, PollTimeout::from(millis))
            .map_err(|errno| ClipmanError::Poll(io::Error::from(errno)))?;

        Ok(ready > 0)
    }
}

impl<F: AsFd + Read> PollingSource for FdSource<F> {
    fn poll_read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<PollRead, ClipmanError> {
        if !self.wait_readable(timeout)? {
            trace!("poll: idle for {:?}", timeout);
            return Ok(PollRead::Idle);
        }

        match self.inner.read(buf).map_err(ClipmanError::Read)? {
            0 => {
                self.ended = true;
                Ok(PollRead::Closed)
            }
            n => Ok(PollRead::Data(n)),
        }
    }

    fn at_end(&self) -> bool {
        self.ended
    }
}
