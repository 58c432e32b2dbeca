/// Platform seams for Stem Checker
use crate::error::Result;
use crate::types::{AudioBuffer, SampleRate, Stem};
use std::path::Path;

/// Stem decoder trait
///
/// Implementers open audio files and decode them into `AudioBuffer` format.
///
/// Opening and decoding are split so that `load` latency is bounded by file
/// count rather than file size: `probe` reads headers only, the full decode
/// happens when a channel is primed for playback.
pub trait StemDecoder: Send {
    /// Open a file and read its native format from the headers
    ///
    /// Does not decode any sample data.
    ///
    /// # Errors
    /// Returns an error if the path does not exist, is not readable, or its
    /// contents are not a supported audio container/codec.
    fn probe(&self, path: &Path) -> Result<Stem>;

    /// Decode an entire file into memory
    ///
    /// The returned buffer is interleaved stereo f32 at the file's native
    /// sample rate.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or decoded.
    fn decode(&mut self, path: &Path) -> Result<AudioBuffer>;
}

/// Mix bus trait
///
/// The single shared output sink that combines all channels' audio into one
/// output stream. Channel slots are addressed by index in load order; the
/// engine's graph holds the slot index of each channel.
///
/// Rate conversion is the bus's responsibility: `prime` accepts buffers at
/// their native sample rate and converts to the output rate internally.
pub trait MixBus: Send {
    /// Output sample rate of the underlying device
    fn sample_rate(&self) -> SampleRate;

    /// Atomically replace the whole slot set with `count` empty slots
    ///
    /// There is never a window where the bus holds a mix of old and new
    /// slots. `install(0)` tears the previous set down.
    ///
    /// # Errors
    /// Returns an error if the bus is shutting down.
    fn install(&mut self, count: usize) -> Result<()>;

    /// Hand a slot its decoded audio, scheduled for the next coordinated
    /// start signal
    ///
    /// Priming does not begin audible output.
    ///
    /// # Errors
    /// Returns an error if the slot index is out of range or conversion to
    /// the output rate fails.
    fn prime(&mut self, slot: usize, buffer: AudioBuffer) -> Result<()>;

    /// Start every primed slot at one shared future timestamp on the bus's
    /// sample clock
    ///
    /// All slots begin rendering at the same output frame; the real start is
    /// driven by the shared hardware clock, not control-thread scheduling.
    ///
    /// # Errors
    /// Returns an error if the hardware connection is not running.
    fn start_all(&mut self) -> Result<()>;

    /// Halt every slot and rewind its read cursor to the beginning
    ///
    /// A subsequent `start_all` replays from the start rather than resuming.
    ///
    /// # Errors
    /// Returns an error if the bus is shutting down.
    fn stop_all(&mut self) -> Result<()>;

    /// Start the hardware connection
    ///
    /// Synchronous: resolves only once the underlying stream transition
    /// completes.
    ///
    /// # Errors
    /// Returns an error if no output device is available or the stream fails
    /// to start.
    fn start(&mut self) -> Result<()>;

    /// Stop the hardware connection
    ///
    /// # Errors
    /// Returns an error if the bus is shutting down.
    fn stop(&mut self) -> Result<()>;

    /// Whether the hardware connection is active
    fn is_running(&self) -> bool;
}
