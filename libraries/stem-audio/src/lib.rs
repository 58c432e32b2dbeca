//! Stem Checker Audio
//!
//! Audio file probing and decoding for the Stem Checker engine.
//!
//! This crate provides:
//! - Header probing via Symphonia (native format without decoding samples)
//! - Full decoding to interleaved stereo f32 at the native sample rate
//!
//! Probing and decoding are split on purpose: `load` probes every file so its
//! latency is bounded by file count, and the full decode is deferred until a
//! channel is primed for playback.
//!
//! # Example
//!
//! ```rust,no_run
//! use stem_audio::SymphoniaStemDecoder;
//! use stem_core::StemDecoder;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut decoder = SymphoniaStemDecoder::new();
//! let stem = decoder.probe(Path::new("/session/drums.wav"))?;
//! println!("{} @ {} Hz", stem.name, stem.format.sample_rate.as_hz());
//!
//! let buffer = decoder.decode(&stem.path)?;
//! println!("{} frames decoded", buffer.frames());
//! # Ok(())
//! # }
//! ```

mod decoder;
mod error;
mod loader;

pub use error::{AudioError, Result};
pub use loader::SymphoniaStemDecoder;
