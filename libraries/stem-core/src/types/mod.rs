//! Core domain types

mod audio;
mod stem;

pub use audio::{AudioBuffer, AudioFormat, SampleRate};
pub use stem::Stem;
