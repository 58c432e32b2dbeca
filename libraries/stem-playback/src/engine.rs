//! Engine lifecycle - load, play, stop
//!
//! The engine is an owned value: whoever owns the control thread constructs
//! it with its mix bus and decoder and keeps it for the session. Control
//! operations are synchronous and must be serialized by the caller; the
//! real-time audio path lives behind the `MixBus` implementation.

use crate::error::{PlaybackError, Result};
use crate::graph::PlaybackGraph;
use crate::scheduler;
use crate::types::{ChannelState, LoadOutcome, LoadReport};
use std::path::PathBuf;
use stem_core::{MixBus, Stem, StemDecoder};

/// Process-wide playback session
pub struct Engine {
    bus: Box<dyn MixBus>,
    decoder: Box<dyn StemDecoder>,
    graph: PlaybackGraph,
}

impl Engine {
    /// Create an engine over a mix bus and a stem decoder
    pub fn new(bus: Box<dyn MixBus>, decoder: Box<dyn StemDecoder>) -> Self {
        Self {
            bus,
            decoder,
            graph: PlaybackGraph::empty(),
        }
    }

    /// Replace the loaded stem set
    ///
    /// Tears down the previous graph completely (halt, hardware stop, slot
    /// release) before opening anything, then probes each path, builds the
    /// new graph from the stems that opened, and restarts the hardware
    /// connection. Per-file open failures are absorbed: they are logged,
    /// recorded in the returned report, and excluded from the graph, but the
    /// batch itself still succeeds.
    ///
    /// # Errors
    /// `HardwareStart` if the hardware connection fails to come back up; the
    /// engine is then explicitly unloaded (`is_loaded()` is false) rather
    /// than left half-built. The previous graph is not restored.
    pub fn load(&mut self, paths: &[PathBuf]) -> Result<LoadReport> {
        scheduler::stop_all(&mut self.graph, self.bus.as_mut())?;
        if self.bus.is_running() {
            self.bus.stop()?;
        }
        self.bus.install(0)?;
        self.graph = PlaybackGraph::empty();

        let mut outcomes = Vec::with_capacity(paths.len());
        let mut stems = Vec::new();

        for path in paths {
            match self.decoder.probe(path) {
                Ok(stem) => {
                    stems.push(stem.clone());
                    outcomes.push(LoadOutcome {
                        path: path.clone(),
                        result: Ok(stem),
                    });
                }
                Err(e) => {
                    tracing::warn!("skipping stem {}: {}", path.display(), e);
                    outcomes.push(LoadOutcome {
                        path: path.clone(),
                        result: Err(e.to_string()),
                    });
                }
            }
        }

        self.graph = PlaybackGraph::build(stems, self.bus.as_mut())?;

        if let Err(e) = self.bus.start() {
            // The previous graph is already gone; leave the engine in a
            // clearly unloaded state instead of half-built.
            self.graph = PlaybackGraph::empty();
            let _ = self.bus.install(0);
            return Err(PlaybackError::HardwareStart(e.to_string()));
        }

        Ok(LoadReport { outcomes })
    }

    /// Start all channels at one coordinated timestamp
    ///
    /// # Errors
    /// `NoStemsLoaded` if the graph has zero channels.
    pub fn play(&mut self) -> Result<()> {
        if self.graph.is_empty() {
            return Err(PlaybackError::NoStemsLoaded);
        }
        scheduler::start_all(&mut self.graph, self.bus.as_mut(), self.decoder.as_mut())
    }

    /// Halt all channels and rewind them to the beginning
    ///
    /// Safe to call at any time, including before the first `load`. The
    /// graph stays wired for replay.
    ///
    /// # Errors
    /// Propagates bus failures; a stop on an idle engine is a no-op.
    pub fn stop(&mut self) -> Result<()> {
        scheduler::stop_all(&mut self.graph, self.bus.as_mut())
    }

    /// Loaded stems in load order (for UI listings)
    pub fn stems(&self) -> impl Iterator<Item = &Stem> {
        self.graph.channels().iter().map(|c| c.stem())
    }

    /// Number of channels in the current graph
    pub fn channel_count(&self) -> usize {
        self.graph.len()
    }

    /// Channel states in load order
    pub fn channel_states(&self) -> Vec<ChannelState> {
        self.graph.channels().iter().map(|c| c.state()).collect()
    }

    /// Whether any stems are loaded (drives UI control enablement)
    pub fn is_loaded(&self) -> bool {
        !self.graph.is_empty()
    }

    /// Whether the hardware connection is active
    pub fn is_running(&self) -> bool {
        self.bus.is_running()
    }
}
