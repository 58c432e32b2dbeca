/// Mix bus / output device errors
use thiserror::Error;

/// Result type for output operations
pub type Result<T> = std::result::Result<T, AudioError>;

/// Output-side errors
#[derive(Debug, Error)]
pub enum AudioError {
    /// No output device available
    #[error("Audio device not found")]
    DeviceNotFound,

    /// Failed to build the output stream
    #[error("Failed to build output stream: {0}")]
    StreamBuild(String),

    /// Failed to start the output stream
    #[error("Failed to start stream: {0}")]
    Play(String),

    /// Sample rate conversion failed
    #[error("Sample rate conversion error: {0}")]
    Resample(String),

    /// A channel slot index outside the installed set
    #[error("Slot {0} out of range")]
    SlotOutOfRange(usize),

    /// The audio thread is gone
    #[error("Audio thread channel closed")]
    ChannelClosed,
}

impl From<cpal::BuildStreamError> for AudioError {
    fn from(err: cpal::BuildStreamError) -> Self {
        AudioError::StreamBuild(err.to_string())
    }
}

impl From<cpal::PlayStreamError> for AudioError {
    fn from(err: cpal::PlayStreamError) -> Self {
        AudioError::Play(err.to_string())
    }
}

impl From<cpal::DefaultStreamConfigError> for AudioError {
    fn from(err: cpal::DefaultStreamConfigError) -> Self {
        AudioError::StreamBuild(err.to_string())
    }
}

impl From<AudioError> for stem_core::StemError {
    fn from(err: AudioError) -> Self {
        stem_core::StemError::output(err.to_string())
    }
}
