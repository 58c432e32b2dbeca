//! Stem Checker Core
//!
//! Platform-agnostic core types, traits, and error handling for the Stem
//! Checker playback engine.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Stem`, `AudioFormat`, `AudioBuffer`
//! - **Platform Seams**: `StemDecoder` (file probing/decoding), `MixBus`
//!   (the shared output sink every channel feeds into)
//! - **Error Handling**: Unified `StemError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use stem_core::{AudioFormat, SampleRate, Stem};
//! use std::path::PathBuf;
//!
//! let format = AudioFormat::new(SampleRate::CD_QUALITY, 2, Some(16));
//! let stem = Stem::new(PathBuf::from("/session/drums.wav"), format, None);
//! assert_eq!(stem.name, "drums");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, StemError};
pub use traits::{MixBus, StemDecoder};
pub use types::{AudioBuffer, AudioFormat, SampleRate, Stem};
