//! Playback graph - channel topology
//!
//! One player channel per stem, all channels fanned into the single shared
//! mix bus. The graph exclusively owns its channels; nothing else holds a
//! reference to one once attached.

use crate::error::{PlaybackError, Result};
use crate::types::ChannelState;
use stem_core::{MixBus, Stem};

/// Runtime binding of one stem into the playback graph
///
/// Created together with its stem during `load`, released on the next `load`
/// or on engine teardown.
#[derive(Debug, Clone)]
pub struct Channel {
    pub(crate) stem: Stem,
    /// Slot index on the mix bus (load order)
    pub(crate) slot: usize,
    pub(crate) state: ChannelState,
}

impl Channel {
    /// The stem this channel plays
    pub fn stem(&self) -> &Stem {
        &self.stem
    }

    /// Current state in the channel state machine
    pub fn state(&self) -> ChannelState {
        self.state
    }
}

/// The full topology for one loaded set of stems
#[derive(Debug, Clone, Default)]
pub struct PlaybackGraph {
    channels: Vec<Channel>,
}

impl PlaybackGraph {
    /// A graph with no channels (nothing loaded)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a graph from opened stems, one connected channel per stem
    ///
    /// Installs one bus slot per stem as a single atomic replacement, so the
    /// bus never holds a mix of old and new channels. An empty stem sequence
    /// yields a valid zero-channel graph.
    ///
    /// # Errors
    /// Returns `GraphStillConnected` if the previous graph has not been torn
    /// down (hardware connection still running).
    pub fn build(stems: Vec<Stem>, bus: &mut dyn MixBus) -> Result<Self> {
        if bus.is_running() {
            return Err(PlaybackError::GraphStillConnected);
        }

        bus.install(stems.len())?;

        let channels = stems
            .into_iter()
            .enumerate()
            .map(|(slot, stem)| Channel {
                stem,
                slot,
                state: ChannelState::Idle,
            })
            .collect();

        Ok(Self { channels })
    }

    /// Channels in load order
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub(crate) fn channels_mut(&mut self) -> &mut [Channel] {
        &mut self.channels
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the graph holds no channels
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
