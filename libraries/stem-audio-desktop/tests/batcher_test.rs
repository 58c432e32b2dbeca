//! Batching behavior of OS open events

use std::path::PathBuf;
use std::time::{Duration, Instant};
use stem_audio_desktop::{BatchConfig, OpenBatcher};

fn batcher(debounce_ms: u64) -> OpenBatcher {
    OpenBatcher::with_config(BatchConfig {
        debounce: Duration::from_millis(debounce_ms),
        queue_depth: 16,
    })
}

/// Poll until a batch arrives or the deadline passes
fn wait_for_batch(batcher: &OpenBatcher, deadline: Duration) -> Option<Vec<PathBuf>> {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if let Some(batch) = batcher.poll_batch() {
            return Some(batch);
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    None
}

#[test]
fn burst_collapses_into_one_batch() {
    let batcher = batcher(30);

    assert!(batcher.submit(vec![PathBuf::from("/s/drums.wav")]));
    assert!(batcher.submit(vec![PathBuf::from("/s/bass.wav")]));
    assert!(batcher.submit(vec![PathBuf::from("/s/vocals.wav")]));

    let batch = wait_for_batch(&batcher, Duration::from_secs(2)).expect("one batch");
    assert_eq!(batch.len(), 3);

    // The burst produced exactly one batch
    std::thread::sleep(Duration::from_millis(100));
    assert!(batcher.poll_batch().is_none());
}

#[test]
fn duplicates_are_dropped_preserving_first_seen_order() {
    let batcher = batcher(30);

    batcher.submit(vec![
        PathBuf::from("/s/drums.wav"),
        PathBuf::from("/s/bass.wav"),
    ]);
    batcher.submit(vec![
        PathBuf::from("/s/bass.wav"),
        PathBuf::from("/s/drums.wav"),
        PathBuf::from("/s/vocals.wav"),
    ]);

    let batch = wait_for_batch(&batcher, Duration::from_secs(2)).expect("one batch");
    assert_eq!(
        batch,
        vec![
            PathBuf::from("/s/drums.wav"),
            PathBuf::from("/s/bass.wav"),
            PathBuf::from("/s/vocals.wav"),
        ]
    );
}

#[test]
fn separate_bursts_produce_separate_batches() {
    let batcher = batcher(30);

    batcher.submit(vec![PathBuf::from("/s/take1.wav")]);
    let first = wait_for_batch(&batcher, Duration::from_secs(2)).expect("first batch");
    assert_eq!(first, vec![PathBuf::from("/s/take1.wav")]);

    batcher.submit(vec![PathBuf::from("/s/take2.wav")]);
    let second = wait_for_batch(&batcher, Duration::from_secs(2)).expect("second batch");
    assert_eq!(second, vec![PathBuf::from("/s/take2.wav")]);
}

#[test]
fn poll_is_non_blocking() {
    let batcher = batcher(30);

    let start = Instant::now();
    let result = batcher.poll_batch();
    assert!(result.is_none());
    assert!(start.elapsed() < Duration::from_millis(5));
}
