//! Error Types
//!
//! Error handling for a single clipboard capture run.

use std::io;
use thiserror::Error;

/// Result type for clipman2 operations
pub type Result<T> = std::result::Result<T, ClipmanError>;

/// Exit code reported for any failed invocation
pub const EXIT_FAILURE: u8 = 1;

/// clipman2 error types
#[derive(Error, Debug)]
pub enum ClipmanError {
    /// Standard input delivered nothing before going idle or closing
    #[error("No clipboard data received on stdin")]
    NoInput,

    /// The readiness wait on the input stream failed
    #[error("Polling stdin failed: {0}")]
    Poll(#[source] io::Error),

    /// Reading from the input stream failed after it reported readiness
    #[error("Reading stdin failed: {0}")]
    Read(#[source] io::Error),

    /// The clipboard-set utility could not be started
    #[error("Failed to launch {program}: {source}")]
    PublisherSpawn {
        /// Program that failed to start
        program: String,
        /// Underlying spawn error
        #[source]
        source: io::Error,
    },

    /// Waiting for the clipboard-set utility failed
    #[error("Failed to wait for clipboard publisher: {0}")]
    PublisherWait(#[source] io::Error),

    /// Configuration values are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Error classification, used for user-facing hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Nothing arrived on stdin
    Input,
    /// stdin polling or reading broke down
    Stream,
    /// wl-copy (or its replacement) misbehaved
    Publisher,
    /// Bad configuration
    Config,
    /// Anything else
    Unknown,
}

impl ClipmanError {
    /// Classify this error
    pub fn kind(&self) -> ErrorType {
        match self {
            ClipmanError::NoInput => ErrorType::Input,
            ClipmanError::Poll(_) | ClipmanError::Read(_) => ErrorType::Stream,
            ClipmanError::PublisherSpawn { .. } | ClipmanError::PublisherWait(_) => {
                ErrorType::Publisher
            }
            ClipmanError::InvalidConfig(_) => ErrorType::Config,
            ClipmanError::Io(_) => ErrorType::Unknown,
        }
    }

    /// Process exit code for this error.
    ///
    /// Only success and failure are distinguished.
    pub fn exit_code(&self) -> u8 {
        EXIT_FAILURE
    }
}
