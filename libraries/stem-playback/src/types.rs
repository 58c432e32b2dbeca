//! Core types for playback orchestration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stem_core::Stem;

/// State of one playback channel
///
/// Transitions: `Idle -> Primed -> Playing -> Stopped -> Primed` (on replay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelState {
    /// Connected but not yet given data to play
    Idle,

    /// Decoded audio scheduled for the next coordinated start
    Primed,

    /// Audible output in progress
    Playing,

    /// Halted with the read cursor rewound to the beginning
    Stopped,
}

/// Per-file outcome of a batch load
///
/// Open failures are absorbed per file: they exclude that stem from the graph
/// but never abort the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadOutcome {
    /// The path that was opened
    pub path: PathBuf,

    /// The opened stem, or the open error rendered as a message
    pub result: Result<Stem, String>,
}

/// Structured result of `Engine::load`
///
/// Callers needing per-file diagnostics read them from here rather than from
/// log output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    /// One outcome per requested path, in request order
    pub outcomes: Vec<LoadOutcome>,
}

impl LoadReport {
    /// Stems that opened successfully, in load order
    pub fn loaded(&self) -> impl Iterator<Item = &Stem> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Paths that failed to open, with their error messages
    pub fn failed(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.outcomes.iter().filter_map(|o| {
            o.result
                .as_ref()
                .err()
                .map(|msg| (o.path.as_path(), msg.as_str()))
        })
    }

    /// Number of stems that opened successfully
    pub fn loaded_count(&self) -> usize {
        self.loaded().count()
    }

    /// Number of paths that failed to open
    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    /// Whether some paths loaded and some failed
    pub fn is_partial(&self) -> bool {
        self.loaded_count() > 0 && self.failed_count() > 0
    }
}
