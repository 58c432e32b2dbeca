//! Stem Checker - Desktop Audio
//!
//! Desktop assembly of the Stem Checker engine: the CPAL-backed mix bus, the
//! Symphonia decoder wiring, and batching of OS file-open events.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = stem_audio_desktop::desktop_engine()?;
//!
//! let report = engine.load(&[
//!     PathBuf::from("/session/drums.wav"),
//!     PathBuf::from("/session/bass.flac"),
//! ])?;
//! println!("{} stems loaded", report.loaded_count());
//!
//! engine.play()?;
//! // ...
//! engine.stop()?;
//! # Ok(())
//! # }
//! ```

mod batcher;
mod error;
mod output;

pub use batcher::{BatchConfig, OpenBatcher};
pub use error::{AudioError, Result};
pub use output::{BusConfig, CpalMixBus};

use stem_audio::SymphoniaStemDecoder;
use stem_playback::Engine;

/// Build an engine on the default output device with the Symphonia decoder
///
/// # Errors
/// Returns an error if no output device is available.
pub fn desktop_engine() -> stem_core::Result<Engine> {
    let bus = CpalMixBus::new()?;
    Ok(Engine::new(
        Box::new(bus),
        Box::new(SymphoniaStemDecoder::new()),
    ))
}
