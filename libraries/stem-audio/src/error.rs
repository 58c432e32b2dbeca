/// Audio-specific errors
use thiserror::Error;

/// Result type alias using `AudioError`
pub type Result<T> = std::result::Result<T, AudioError>;

/// Errors opening or decoding a single stem
///
/// These are per-file: the engine absorbs them during a batch load and
/// records them in the load report instead of aborting the batch.
#[derive(Error, Debug)]
pub enum AudioError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Container/codec not recognized as audio
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Container opened but holds no audio track
    #[error("No audio track in: {0}")]
    NoAudioTrack(String),

    /// Decoding error
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Symphonia error
    #[error("Symphonia error: {0}")]
    Symphonia(String),
}

impl From<AudioError> for stem_core::StemError {
    fn from(err: AudioError) -> Self {
        stem_core::StemError::audio(err.to_string())
    }
}
