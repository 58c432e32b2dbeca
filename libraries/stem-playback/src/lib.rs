//! Stem Checker - Playback Engine
//!
//! Platform-agnostic multi-stem playback orchestration.
//!
//! This crate provides:
//! - Playback graph (one channel per stem, all fanned into one mix bus)
//! - Channel state machine (idle -> primed -> playing -> stopped)
//! - Coordinated start: every channel begins at one shared timestamp
//! - Engine lifecycle (load / play / stop) with structured per-file results
//!
//! # Architecture
//!
//! `stem-playback` is completely platform-agnostic:
//! - No dependency on CPAL (desktop audio)
//! - No dependency on Symphonia (decoding)
//!
//! Platform-specific code (the output mix bus, file decoding) is provided via
//! the `MixBus` and `StemDecoder` traits from `stem-core`.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//! use stem_core::{AudioBuffer, AudioFormat, MixBus, Result, SampleRate, Stem, StemDecoder};
//! use stem_playback::Engine;
//!
//! // Implement the platform seams for your target
//! struct NullBus {
//!     running: bool,
//! }
//!
//! impl MixBus for NullBus {
//!     fn sample_rate(&self) -> SampleRate {
//!         SampleRate::CD_QUALITY
//!     }
//!     fn install(&mut self, _count: usize) -> Result<()> {
//!         Ok(())
//!     }
//!     fn prime(&mut self, _slot: usize, _buffer: AudioBuffer) -> Result<()> {
//!         Ok(())
//!     }
//!     fn start_all(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn stop_all(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn start(&mut self) -> Result<()> {
//!         self.running = true;
//!         Ok(())
//!     }
//!     fn stop(&mut self) -> Result<()> {
//!         self.running = false;
//!         Ok(())
//!     }
//!     fn is_running(&self) -> bool {
//!         self.running
//!     }
//! }
//!
//! struct NullDecoder;
//!
//! impl StemDecoder for NullDecoder {
//!     fn probe(&self, path: &Path) -> Result<Stem> {
//!         Ok(Stem::new(path.to_path_buf(), AudioFormat::cd_quality(), None))
//!     }
//!     fn decode(&mut self, _path: &Path) -> Result<AudioBuffer> {
//!         Ok(AudioBuffer::new(vec![0.0; 88_200], AudioFormat::cd_quality()))
//!     }
//! }
//!
//! # fn main() -> std::result::Result<(), stem_playback::PlaybackError> {
//! let mut engine = Engine::new(Box::new(NullBus { running: false }), Box::new(NullDecoder));
//!
//! let report = engine.load(&[PathBuf::from("/session/drums.wav")])?;
//! assert_eq!(report.loaded_count(), 1);
//!
//! engine.play()?;
//! engine.stop()?;
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;
mod graph;
mod scheduler;
pub mod types;

// Public exports
pub use engine::Engine;
pub use error::{PlaybackError, Result};
pub use graph::{Channel, PlaybackGraph};
pub use types::{ChannelState, LoadOutcome, LoadReport};
