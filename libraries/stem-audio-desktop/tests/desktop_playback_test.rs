//! End-to-end playback through the CPAL mix bus
//!
//! These tests drive real files through the full engine. They skip in
//! headless environments without an output device.

use std::io::Write;
use std::path::Path;
use std::time::Duration;
use stem_playback::ChannelState;
use tempfile::TempDir;

fn write_wav(path: &Path, sample_rate: u32, channels: u16, seconds: f32) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let frames = (sample_rate as f32 * seconds) as usize;
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let sample = ((i as f32 * 0.05).sin() * 8000.0) as i16;
        for _ in 0..channels {
            writer.write_sample(sample).unwrap();
        }
    }
    writer.finalize().unwrap();
}

#[test]
fn load_play_stop_replay_with_mixed_rates() {
    let Ok(mut engine) = stem_audio_desktop::desktop_engine() else {
        return; // No output device
    };

    let dir = TempDir::new().unwrap();
    let drums = dir.path().join("drums.wav");
    let bass = dir.path().join("bass.wav");
    write_wav(&drums, 44_100, 2, 0.5);
    write_wav(&bass, 48_000, 1, 0.5);

    let report = engine.load(&[drums, bass]).unwrap();
    assert_eq!(report.loaded_count(), 2);
    assert_eq!(engine.channel_count(), 2);
    assert!(engine.is_running());

    engine.play().unwrap();
    assert_eq!(engine.channel_states(), vec![ChannelState::Playing; 2]);
    std::thread::sleep(Duration::from_millis(150));

    engine.stop().unwrap();
    assert_eq!(engine.channel_states(), vec![ChannelState::Stopped; 2]);

    // Replay restarts from the beginning without re-decoding
    engine.play().unwrap();
    assert_eq!(engine.channel_states(), vec![ChannelState::Playing; 2]);
    engine.stop().unwrap();
}

#[test]
fn load_skips_undecodable_files() {
    let Ok(mut engine) = stem_audio_desktop::desktop_engine() else {
        return;
    };

    let dir = TempDir::new().unwrap();
    let good = dir.path().join("vocals.wav");
    write_wav(&good, 44_100, 2, 0.25);

    let junk = dir.path().join("junk.wav");
    let mut file = std::fs::File::create(&junk).unwrap();
    file.write_all(b"not a wav at all").unwrap();
    drop(file);

    let report = engine.load(&[good, junk]).unwrap();
    assert_eq!(report.loaded_count(), 1);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(engine.channel_count(), 1);
}

#[test]
fn reload_replaces_previous_set() {
    let Ok(mut engine) = stem_audio_desktop::desktop_engine() else {
        return;
    };

    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.wav");
    let second = dir.path().join("second.wav");
    write_wav(&first, 44_100, 2, 0.25);
    write_wav(&second, 44_100, 2, 0.25);

    engine.load(&[first]).unwrap();
    engine.play().unwrap();

    engine.load(&[second]).unwrap();
    let names: Vec<_> = engine.stems().map(|s| s.name.clone()).collect();
    assert_eq!(names, vec!["second"]);
    assert_eq!(engine.channel_states(), vec![ChannelState::Idle]);
}
