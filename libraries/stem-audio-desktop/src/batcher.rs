//! Open-event batching
//!
//! OS file-open events arrive in bursts: opening several files at once from
//! a file manager can deliver one event per file within a few milliseconds.
//! The engine's `load` must be called exactly once per batch, so this module
//! buffers events on a background thread, deduplicates them, and emits one
//! combined batch after a quiet window.
//!
//! ```text
//! OS integration thread            Batcher thread
//!        │                              │
//!        │  submit([a.wav])             │
//!        │─────────────────────────────>│ buffer, wait for quiet window
//!        │  submit([b.wav, a.wav])      │
//!        │─────────────────────────────>│ merge + dedup
//!        │                              │ ...window elapses...
//!        │  poll_batch()                │
//!        │  -> [a.wav, b.wav]           │
//!        │<─────────────────────────────│
//! ```

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Batcher configuration
#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    /// Quiet window after the last event before the batch is emitted
    pub debounce: Duration,

    /// Depth of the incoming event queue
    pub queue_depth: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(100),
            queue_depth: 16,
        }
    }
}

/// Debouncing, deduplicating collector of open-file events
pub struct OpenBatcher {
    event_tx: Sender<Vec<PathBuf>>,
    batch_rx: Receiver<Vec<PathBuf>>,
    shutdown: Arc<Mutex<bool>>,
    _thread: JoinHandle<()>,
}

impl OpenBatcher {
    /// Create a batcher with the default 100 ms quiet window
    pub fn new() -> Self {
        Self::with_config(BatchConfig::default())
    }

    /// Create a batcher with explicit configuration
    pub fn with_config(config: BatchConfig) -> Self {
        let (event_tx, event_rx) = bounded::<Vec<PathBuf>>(config.queue_depth);
        let (batch_tx, batch_rx) = bounded::<Vec<PathBuf>>(config.queue_depth);
        let shutdown = Arc::new(Mutex::new(false));
        let shutdown_clone = Arc::clone(&shutdown);

        let thread = thread::Builder::new()
            .name("open-batcher".to_string())
            .spawn(move || {
                batcher_thread(event_rx, batch_tx, config.debounce, shutdown_clone);
            })
            .expect("Failed to spawn open batcher thread");

        Self {
            event_tx,
            batch_rx,
            shutdown,
            _thread: thread,
        }
    }

    /// Submit one open event (non-blocking)
    ///
    /// Returns true if the event was queued, false if the queue is full or
    /// the batcher has shut down.
    pub fn submit(&self, paths: Vec<PathBuf>) -> bool {
        match self.event_tx.try_send(paths) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("open event queue full, dropping event");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Poll for a completed batch (non-blocking)
    ///
    /// Returns Some(paths) once a burst has gone quiet, None otherwise.
    pub fn poll_batch(&self) -> Option<Vec<PathBuf>> {
        self.batch_rx.try_recv().ok()
    }

    /// Ask the batcher thread to exit
    pub fn shutdown(&self) {
        *self.shutdown.lock().unwrap() = true;
    }
}

impl Default for OpenBatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for OpenBatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Append new paths, skipping ones already buffered
///
/// First-seen order is preserved; bursts are small, so a linear scan beats
/// a set here.
fn merge(batch: &mut Vec<PathBuf>, paths: Vec<PathBuf>) {
    for path in paths {
        if !batch.contains(&path) {
            batch.push(path);
        }
    }
}

/// Background thread: collect a burst, wait out the quiet window, emit once
fn batcher_thread(
    event_rx: Receiver<Vec<PathBuf>>,
    batch_tx: Sender<Vec<PathBuf>>,
    debounce: Duration,
    shutdown: Arc<Mutex<bool>>,
) {
    loop {
        if *shutdown.lock().unwrap() {
            break;
        }

        // Wait for the first event of a burst (with timeout so shutdown is
        // noticed)
        let first = match event_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(paths) => paths,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let mut batch = Vec::new();
        merge(&mut batch, first);

        // Keep absorbing until the burst goes quiet
        loop {
            match event_rx.recv_timeout(debounce) {
                Ok(paths) => merge(&mut batch, paths),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        if !batch.is_empty() && batch_tx.send(batch).is_err() {
            break;
        }
    }
}
