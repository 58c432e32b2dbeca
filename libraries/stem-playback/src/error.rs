//! Error types for playback orchestration

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// `play()` was called with a zero-channel graph
    #[error("No stems loaded")]
    NoStemsLoaded,

    /// A new graph build was attempted while the previous one was still
    /// connected
    #[error("Previous graph is still connected")]
    GraphStillConnected,

    /// The hardware connection failed to start; the engine is left unloaded
    #[error("Hardware start failed: {0}")]
    HardwareStart(String),

    /// Mix bus failure outside of hardware start
    #[error("Mix bus error: {0}")]
    Bus(String),
}

impl From<stem_core::StemError> for PlaybackError {
    fn from(err: stem_core::StemError) -> Self {
        Self::Bus(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
