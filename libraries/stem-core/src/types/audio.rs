/// Audio-related types
use serde::{Deserialize, Serialize};

/// Sample rate in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleRate(pub u32);

impl SampleRate {
    /// 44.1 kHz (CD)
    pub const CD_QUALITY: Self = Self(44_100);
    /// 48 kHz (DVD / most interfaces)
    pub const DVD_QUALITY: Self = Self(48_000);
    /// 96 kHz high resolution
    pub const HIGH_RES_96: Self = Self(96_000);

    /// Create a new sample rate
    #[must_use]
    pub fn new(hz: u32) -> Self {
        Self(hz)
    }

    /// Get the sample rate as Hz
    pub fn as_hz(&self) -> u32 {
        self.0
    }
}

/// Native format of an audio source
///
/// Determined at open time from the file's headers and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    /// Sample rate
    pub sample_rate: SampleRate,

    /// Number of channels (1 = mono, 2 = stereo, etc.)
    pub channels: u16,

    /// Bits per sample, when the container reports it (compressed codecs
    /// often don't)
    pub bits_per_sample: Option<u16>,
}

impl AudioFormat {
    /// Create a new audio format
    pub fn new(sample_rate: SampleRate, channels: u16, bits_per_sample: Option<u16>) -> Self {
        Self {
            sample_rate,
            channels,
            bits_per_sample,
        }
    }

    /// CD quality stereo (44.1 kHz, 16-bit)
    pub fn cd_quality() -> Self {
        Self::new(SampleRate::CD_QUALITY, 2, Some(16))
    }
}

/// Decoded audio samples
///
/// Samples are stored as interleaved f32 in the range [-1.0, 1.0]:
/// [L, R, L, R, ...] for stereo.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Audio samples (f32, interleaved)
    pub samples: Vec<f32>,

    /// Format of the decoded samples
    pub format: AudioFormat,
}

impl AudioBuffer {
    /// Create a new audio buffer
    pub fn new(samples: Vec<f32>, format: AudioFormat) -> Self {
        Self { samples, format }
    }

    /// Get the number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.format.channels.max(1) as usize
    }

    /// Get the duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.format.sample_rate.as_hz() as f64
    }

    /// Get the length in samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_rate_common_values() {
        assert_eq!(SampleRate::CD_QUALITY.as_hz(), 44_100);
        assert_eq!(SampleRate::DVD_QUALITY.as_hz(), 48_000);
    }

    #[test]
    fn audio_buffer_frames_calculation() {
        let format = AudioFormat::new(SampleRate::CD_QUALITY, 2, Some(16));
        // 8 samples with 2 channels = 4 frames
        let buffer = AudioBuffer::new(vec![0.0; 8], format);
        assert_eq!(buffer.frames(), 4);
    }

    #[test]
    fn audio_buffer_duration() {
        let format = AudioFormat::new(SampleRate::new(44_100), 2, None);
        // 88200 samples with 2 channels = 44100 frames = 1 second
        let buffer = AudioBuffer::new(vec![0.0; 88_200], format);
        assert!((buffer.duration_secs() - 1.0).abs() < 0.01);
    }
}
