//! Property-based tests for batch loading and the channel state machine

use proptest::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;
use stem_core::{AudioBuffer, AudioFormat, MixBus, SampleRate, Stem, StemDecoder};
use stem_playback::{ChannelState, Engine, PlaybackError};

/// Minimal bus that accepts everything
struct AcceptingBus {
    slots: usize,
    running: bool,
}

impl AcceptingBus {
    fn new() -> Self {
        Self {
            slots: 0,
            running: false,
        }
    }
}

impl MixBus for AcceptingBus {
    fn sample_rate(&self) -> SampleRate {
        SampleRate::CD_QUALITY
    }

    fn install(&mut self, count: usize) -> stem_core::Result<()> {
        self.slots = count;
        Ok(())
    }

    fn prime(&mut self, slot: usize, _buffer: AudioBuffer) -> stem_core::Result<()> {
        if slot >= self.slots {
            return Err(stem_core::StemError::output("slot out of range"));
        }
        Ok(())
    }

    fn start_all(&mut self) -> stem_core::Result<()> {
        Ok(())
    }

    fn stop_all(&mut self) -> stem_core::Result<()> {
        Ok(())
    }

    fn start(&mut self) -> stem_core::Result<()> {
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> stem_core::Result<()> {
        self.running = false;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Decoder that fails on any path with a `.bad` extension
struct FlakyDecoder;

impl StemDecoder for FlakyDecoder {
    fn probe(&self, path: &Path) -> stem_core::Result<Stem> {
        if path.extension().and_then(|e| e.to_str()) == Some("bad") {
            return Err(stem_core::StemError::audio("unsupported"));
        }
        Ok(Stem::new(
            path.to_path_buf(),
            AudioFormat::new(SampleRate::CD_QUALITY, 2, Some(16)),
            Some(Duration::from_secs(1)),
        ))
    }

    fn decode(&mut self, _path: &Path) -> stem_core::Result<AudioBuffer> {
        Ok(AudioBuffer::new(
            vec![0.1; 1024],
            AudioFormat::new(SampleRate::CD_QUALITY, 2, Some(32)),
        ))
    }
}

fn path_for(index: usize, good: bool) -> PathBuf {
    if good {
        PathBuf::from(format!("/session/stem-{}.wav", index))
    } else {
        PathBuf::from(format!("/session/stem-{}.bad", index))
    }
}

proptest! {
    /// Channel count equals the number of openable paths, with exactly the
    /// failures excluded, for any mix of good and bad paths
    #[test]
    fn load_counts_match_openable_paths(flags in prop::collection::vec(any::<bool>(), 0..16)) {
        let mut engine = Engine::new(Box::new(AcceptingBus::new()), Box::new(FlakyDecoder));

        let paths: Vec<_> = flags
            .iter()
            .enumerate()
            .map(|(i, &good)| path_for(i, good))
            .collect();
        let good_count = flags.iter().filter(|&&g| g).count();

        let report = engine.load(&paths).unwrap();

        prop_assert_eq!(engine.channel_count(), good_count);
        prop_assert_eq!(report.loaded_count(), good_count);
        prop_assert_eq!(report.failed_count(), flags.len() - good_count);
        prop_assert_eq!(report.outcomes.len(), flags.len());
    }

    /// Every loaded stem appears in the graph in request order
    #[test]
    fn load_preserves_request_order(flags in prop::collection::vec(any::<bool>(), 0..16)) {
        let mut engine = Engine::new(Box::new(AcceptingBus::new()), Box::new(FlakyDecoder));

        let paths: Vec<_> = flags
            .iter()
            .enumerate()
            .map(|(i, &good)| path_for(i, good))
            .collect();

        engine.load(&paths).unwrap();

        let expected: Vec<_> = paths
            .iter()
            .filter(|p| p.extension().and_then(|e| e.to_str()) != Some("bad"))
            .cloned()
            .collect();
        let actual: Vec<_> = engine.stems().map(|s| s.path.clone()).collect();
        prop_assert_eq!(actual, expected);
    }

    /// After any sequence of play/stop calls, every channel is in the same
    /// state, and that state is one the sequence can explain
    #[test]
    fn play_stop_sequences_keep_channels_in_lockstep(
        stem_count in 1usize..6,
        ops in prop::collection::vec(any::<bool>(), 0..12),
    ) {
        let mut engine = Engine::new(Box::new(AcceptingBus::new()), Box::new(FlakyDecoder));

        let paths: Vec<_> = (0..stem_count).map(|i| path_for(i, true)).collect();
        engine.load(&paths).unwrap();

        let mut expected = ChannelState::Idle;
        for &play in &ops {
            if play {
                engine.play().unwrap();
                expected = ChannelState::Playing;
            } else {
                engine.stop().unwrap();
                if expected == ChannelState::Playing {
                    expected = ChannelState::Stopped;
                }
            }
        }

        let states = engine.channel_states();
        prop_assert_eq!(states.len(), stem_count);
        for state in states {
            prop_assert_eq!(state, expected);
        }
    }

    /// play on an unloaded engine always reports NoStemsLoaded, never panics
    #[test]
    fn play_without_load_reports_nothing_loaded(bad_count in 0usize..8) {
        let mut engine = Engine::new(Box::new(AcceptingBus::new()), Box::new(FlakyDecoder));

        let paths: Vec<_> = (0..bad_count).map(|i| path_for(i, false)).collect();
        engine.load(&paths).unwrap();

        prop_assert!(matches!(engine.play(), Err(PlaybackError::NoStemsLoaded)));
    }
}
