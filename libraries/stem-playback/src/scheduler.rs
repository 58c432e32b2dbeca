//! Coordinated start/stop across all channels
//!
//! Priming decodes a channel's full audio and hands it to the bus slot
//! without beginning audible output. The actual start is one bus-level
//! command carrying a single shared timestamp, so every channel's first
//! audible frame lands on the same output frame of the hardware clock rather
//! than drifting with control-thread scheduling.

use crate::error::Result;
use crate::graph::PlaybackGraph;
use crate::types::ChannelState;
use stem_core::{MixBus, StemDecoder};

/// Prime every channel that needs it, then start all primed channels at one
/// shared timestamp
///
/// - `Idle` channels are decoded and primed here (first play); a decode
///   failure is logged and leaves that channel `Idle` without blocking the
///   rest of the graph.
/// - `Stopped` channels already hold samples with their cursor rewound, so
///   they re-prime without another decode.
/// - A zero-channel graph is a no-op, and if nothing ends up primed no start
///   command is issued at all.
pub(crate) fn start_all(
    graph: &mut PlaybackGraph,
    bus: &mut dyn MixBus,
    decoder: &mut dyn StemDecoder,
) -> Result<()> {
    for channel in graph.channels_mut() {
        match channel.state {
            ChannelState::Idle => match decoder.decode(&channel.stem.path) {
                Ok(buffer) => {
                    bus.prime(channel.slot, buffer)?;
                    channel.state = ChannelState::Primed;
                }
                Err(e) => {
                    tracing::warn!(
                        "failed to prime {}: {}",
                        channel.stem.path.display(),
                        e
                    );
                }
            },
            ChannelState::Stopped => {
                // Slot still holds the decoded samples, cursor already rewound
                channel.state = ChannelState::Primed;
            }
            ChannelState::Primed | ChannelState::Playing => {}
        }
    }

    if !graph
        .channels()
        .iter()
        .any(|c| c.state == ChannelState::Primed)
    {
        return Ok(());
    }

    bus.start_all()?;

    for channel in graph.channels_mut() {
        if channel.state == ChannelState::Primed {
            channel.state = ChannelState::Playing;
        }
    }

    Ok(())
}

/// Halt every playing or primed channel and rewind its cursor
///
/// A no-op on an already-stopped or idle graph, including before the first
/// load.
pub(crate) fn stop_all(graph: &mut PlaybackGraph, bus: &mut dyn MixBus) -> Result<()> {
    let any_active = graph
        .channels()
        .iter()
        .any(|c| matches!(c.state, ChannelState::Playing | ChannelState::Primed));

    if !any_active {
        return Ok(());
    }

    bus.stop_all()?;

    for channel in graph.channels_mut() {
        if matches!(channel.state, ChannelState::Playing | ChannelState::Primed) {
            channel.state = ChannelState::Stopped;
        }
    }

    Ok(())
}
