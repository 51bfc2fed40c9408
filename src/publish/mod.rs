//! Republishing text to the system clipboard
//!
//! Text is handed to an external clipboard-set utility (`wl-copy` by
//! default) on its stdin. The utility is spawned directly with an argument
//! vector; no shell is involved, so clipboard content and paths never need
//! quoting.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::config::PublisherConfig;
use crate::error::{ClipmanError, Result};

/// Pushes text to the system clipboard
#[cfg_attr(test, mockall::automock)]
pub trait ClipboardPublisher {
    /// Publish `text`, blocking until the publisher has consumed it.
    fn publish(&mut self, text: &[u8]) -> Result<()>;
}

/// Runs the configured clipboard-set command once per publish
#[derive(Debug, Clone)]
pub struct CommandPublisher {
    config: PublisherConfig,
}

impl CommandPublisher {
    /// Publisher for the given command
    pub fn new(config: PublisherConfig) -> Self {
        Self { config }
    }

    /// Program that will be spawned
    pub fn program(&self) -> &str {
        &self.config.program
    }
}

impl Default for CommandPublisher {
    fn default() -> Self {
        Self::new(PublisherConfig::default())
    }
}

impl ClipboardPublisher for CommandPublisher {
    fn publish(&mut self, text: &[u8]) -> Result<()> {
        debug!(
            "Publishing {} bytes via {} {:?}",
            text.len(),
            self.config.program,
            self.config.args
        );

        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|source| ClipmanError::PublisherSpawn {
                program: self.config.program.clone(),
                source,
            })?;

        // Dropping stdin closes the pipe so the child sees end-of-input
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(text) {
                match e.kind() {
                    io::ErrorKind::BrokenPipe => {
                        warn!("{} closed stdin early", self.config.program)
                    }
                    _ => warn!("Failed to write to {}: {}", self.config.program, e),
                }
            }
        }

        let status = child.wait().map_err(ClipmanError::PublisherWait)?;
        if !status.success() {
            warn!("{} exited with {}", self.config.program, status);
        }

        Ok(())
    }
}
