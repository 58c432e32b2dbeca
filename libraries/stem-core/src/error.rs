/// Core error types for Stem Checker
use thiserror::Error;

/// Result type alias using `StemError`
pub type Result<T> = std::result::Result<T, StemError>;

/// Core error type for Stem Checker
#[derive(Error, Debug)]
pub enum StemError {
    /// Audio decoding errors (open/probe/decode)
    #[error("Audio error: {0}")]
    Audio(String),

    /// Mix bus / output device errors
    #[error("Output error: {0}")]
    Output(String),

    /// Playback orchestration errors
    #[error("Playback error: {0}")]
    Playback(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl StemError {
    /// Create an audio error
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Create an output error
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Create a playback error
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
