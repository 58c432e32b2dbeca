/// CPAL-based mix bus with a dedicated audio thread
///
/// **Architecture**: a dedicated audio thread owns the CPAL `Stream`; the
/// control thread talks to it over a bounded command channel. This keeps the
/// non-`Send` stream on one thread across platforms, and it keeps the
/// control thread away from the callback's lock: only the audio thread and
/// the real-time callback ever touch the slot state.
///
/// **Coordinated start**: `start_all` picks one future frame on the bus's
/// own sample clock and arms every loaded slot with it. The callback
/// compares the running frame counter against that shared frame, so every
/// slot's first audible sample lands on the same output frame regardless of
/// control-thread scheduling. If the command arrives late the comparison is
/// already true for all slots at the same instant, which still starts them
/// together.
use crate::error::{AudioError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use stem_core::{AudioBuffer, MixBus, SampleRate};

/// Sentinel for "no start scheduled"
const NO_START: u64 = u64::MAX;

/// Mix bus configuration
#[derive(Debug, Clone, Copy)]
pub struct BusConfig {
    /// How far ahead of the current clock the shared start frame is placed.
    /// Must cover the command-channel hop to the audio thread; starts remain
    /// aligned even if it doesn't, they just happen immediately.
    pub start_lead: Duration,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            start_lead: Duration::from_millis(50),
        }
    }
}

/// Commands sent to the audio thread
enum BusCommand {
    /// Replace the whole slot set with `count` empty slots
    Install { count: usize },
    /// Hand a slot its samples (already at the device rate)
    Prime {
        slot: usize,
        samples: Arc<Vec<f32>>,
    },
    /// Arm every loaded slot to begin at the shared frame
    StartAt { frame: u64 },
    /// Disarm all slots and rewind their cursors
    StopAll,
    /// Bring the hardware connection up (synchronous)
    Start {
        done: Sender<std::result::Result<(), String>>,
    },
    /// Take the hardware connection down (synchronous)
    Stop { done: Sender<()> },
    /// Exit the audio thread
    Shutdown,
}

/// One channel's playback slot
#[derive(Default)]
struct Slot {
    /// Interleaved stereo samples at the device rate
    samples: Arc<Vec<f32>>,
    /// Read position in samples (not frames)
    cursor: usize,
    /// Armed to start at the shared start frame
    armed: bool,
}

/// State shared between the audio thread and the real-time callback
///
/// The control thread only reads the atomics; it never takes the slots
/// lock.
struct BusShared {
    slots: Mutex<Vec<Slot>>,
    /// Frames rendered since the stream was built
    clock_frames: AtomicU64,
    /// Shared start frame, or `NO_START`
    start_frame: AtomicU64,
    /// Hardware connection state
    running: AtomicBool,
}

impl BusShared {
    fn new() -> Self {
        Self {
            slots: Mutex::new(Vec::new()),
            clock_frames: AtomicU64::new(0),
            start_frame: AtomicU64::new(NO_START),
            running: AtomicBool::new(false),
        }
    }
}

/// CPAL mix bus
///
/// Implements the `MixBus` trait: one slot per channel, all summed into the
/// default output device's stream.
pub struct CpalMixBus {
    command_tx: Sender<BusCommand>,
    shared: Arc<BusShared>,
    sample_rate: SampleRate,
    slot_count: usize,
    config: BusConfig,
    _audio_thread: Option<JoinHandle<()>>,
}

impl CpalMixBus {
    /// Create a mix bus on the default output device
    ///
    /// # Errors
    /// Returns an error if no output device is found or it has no usable
    /// configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(BusConfig::default())
    }

    /// Create a mix bus with explicit configuration
    pub fn with_config(config: BusConfig) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::DeviceNotFound)?;

        let supported = device.default_output_config()?;
        let sample_rate = supported.sample_rate();
        let stream_config: StreamConfig = supported.config();

        let shared = Arc::new(BusShared::new());
        let (command_tx, command_rx) = bounded::<BusCommand>(32);

        let shared_clone = Arc::clone(&shared);
        let audio_thread = thread::Builder::new()
            .name("mix-bus".to_string())
            .spawn(move || {
                audio_thread_run(device, stream_config, shared_clone, command_rx);
            })
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        Ok(Self {
            command_tx,
            shared,
            sample_rate: SampleRate::new(sample_rate),
            slot_count: 0,
            config,
            _audio_thread: Some(audio_thread),
        })
    }

    fn send(&self, command: BusCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| AudioError::ChannelClosed)
    }
}

impl MixBus for CpalMixBus {
    fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    fn install(&mut self, count: usize) -> stem_core::Result<()> {
        self.send(BusCommand::Install { count })?;
        self.slot_count = count;
        Ok(())
    }

    fn prime(&mut self, slot: usize, buffer: AudioBuffer) -> stem_core::Result<()> {
        if slot >= self.slot_count {
            return Err(AudioError::SlotOutOfRange(slot).into());
        }

        // Rate conversion is the bus's responsibility: channels hand over
        // native-rate audio and the device gets device-rate audio.
        let samples = if buffer.format.sample_rate == self.sample_rate {
            buffer.samples
        } else {
            resample_stereo(
                &buffer.samples,
                buffer.format.sample_rate.as_hz(),
                self.sample_rate.as_hz(),
            )?
        };

        self.send(BusCommand::Prime {
            slot,
            samples: Arc::new(samples),
        })?;
        Ok(())
    }

    fn start_all(&mut self) -> stem_core::Result<()> {
        if !self.is_running() {
            return Err(stem_core::StemError::output("output not running"));
        }

        let lead_frames = (self.config.start_lead.as_secs_f64()
            * f64::from(self.sample_rate.as_hz())) as u64;
        let frame = self.shared.clock_frames.load(Ordering::Acquire) + lead_frames;

        self.send(BusCommand::StartAt { frame })?;
        Ok(())
    }

    fn stop_all(&mut self) -> stem_core::Result<()> {
        self.send(BusCommand::StopAll)?;
        Ok(())
    }

    fn start(&mut self) -> stem_core::Result<()> {
        let (done_tx, done_rx) = bounded(1);
        self.send(BusCommand::Start { done: done_tx })?;

        // Synchronous: resolves once the stream transition completes. A hung
        // hardware start blocks here, as documented.
        match done_rx.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(msg)) => Err(AudioError::Play(msg).into()),
            Err(_) => Err(AudioError::ChannelClosed.into()),
        }
    }

    fn stop(&mut self) -> stem_core::Result<()> {
        let (done_tx, done_rx) = bounded(1);
        self.send(BusCommand::Stop { done: done_tx })?;
        done_rx.recv().map_err(|_| AudioError::ChannelClosed)?;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }
}

impl Drop for CpalMixBus {
    fn drop(&mut self) {
        let _ = self.command_tx.send(BusCommand::Shutdown);
    }
}

/// Audio thread main loop
///
/// Owns the CPAL stream and applies control commands to the shared state.
fn audio_thread_run(
    device: Device,
    config: StreamConfig,
    shared: Arc<BusShared>,
    command_rx: Receiver<BusCommand>,
) {
    let out_channels = config.channels as usize;
    let mut stream: Option<Stream> = None;

    while let Ok(command) = command_rx.recv() {
        match command {
            BusCommand::Install { count } => {
                shared.start_frame.store(NO_START, Ordering::Release);
                let mut slots = shared.slots.lock().unwrap();
                *slots = (0..count).map(|_| Slot::default()).collect();
            }
            BusCommand::Prime { slot, samples } => {
                let mut slots = shared.slots.lock().unwrap();
                if let Some(s) = slots.get_mut(slot) {
                    s.samples = samples;
                    s.cursor = 0;
                    s.armed = false;
                }
            }
            BusCommand::StartAt { frame } => {
                {
                    let mut slots = shared.slots.lock().unwrap();
                    for s in slots.iter_mut() {
                        if !s.samples.is_empty() {
                            s.armed = true;
                        }
                    }
                }
                shared.start_frame.store(frame, Ordering::Release);
            }
            BusCommand::StopAll => {
                shared.start_frame.store(NO_START, Ordering::Release);
                let mut slots = shared.slots.lock().unwrap();
                for s in slots.iter_mut() {
                    s.armed = false;
                    s.cursor = 0;
                }
            }
            BusCommand::Start { done } => {
                let result = if stream.is_some() {
                    Ok(())
                } else {
                    build_stream(&device, &config, &shared, out_channels).map(|s| {
                        stream = Some(s);
                    })
                };
                shared.running.store(result.is_ok(), Ordering::Release);
                let _ = done.send(result);
            }
            BusCommand::Stop { done } => {
                if let Some(s) = stream.take() {
                    drop(s);
                }
                shared.running.store(false, Ordering::Release);
                shared.start_frame.store(NO_START, Ordering::Release);
                shared.clock_frames.store(0, Ordering::Release);
                let _ = done.send(());
            }
            BusCommand::Shutdown => {
                if let Some(s) = stream.take() {
                    drop(s);
                }
                shared.running.store(false, Ordering::Release);
                break;
            }
        }
    }
}

/// Build and start the output stream
fn build_stream(
    device: &Device,
    config: &StreamConfig,
    shared: &Arc<BusShared>,
    out_channels: usize,
) -> std::result::Result<Stream, String> {
    let shared_cb = Arc::clone(shared);
    let stream = device
        .build_output_stream(
            config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                render(data, out_channels, &shared_cb);
            },
            |err| tracing::error!("audio stream error: {}", err),
            None,
        )
        .map_err(|e| e.to_string())?;

    stream.play().map_err(|e| e.to_string())?;
    Ok(stream)
}

/// Real-time mixing callback
///
/// Sums every armed slot into the output, starting each one at the shared
/// start frame. No allocation here; the slots lock is shared only with the
/// audio thread, never the control thread.
fn render(data: &mut [f32], out_channels: usize, shared: &BusShared) {
    data.fill(0.0);

    let frames = data.len() / out_channels.max(1);
    let block_start = shared.clock_frames.load(Ordering::Acquire);
    let start_frame = shared.start_frame.load(Ordering::Acquire);

    if start_frame != NO_START {
        let mut slots = shared.slots.lock().unwrap();
        for slot in slots.iter_mut() {
            if !slot.armed {
                continue;
            }
            for i in 0..frames {
                if block_start + (i as u64) < start_frame {
                    continue;
                }
                if slot.cursor + 1 >= slot.samples.len() {
                    break;
                }
                let left = slot.samples[slot.cursor];
                let right = slot.samples[slot.cursor + 1];
                slot.cursor += 2;

                let out = &mut data[i * out_channels..(i + 1) * out_channels];
                if out_channels == 1 {
                    out[0] += (left + right) * 0.5;
                } else {
                    out[0] += left;
                    out[1] += right;
                }
            }
        }
    }

    // Summing N stems can exceed full scale
    for sample in data.iter_mut() {
        *sample = sample.clamp(-1.0, 1.0);
    }

    shared
        .clock_frames
        .store(block_start + frames as u64, Ordering::Release);
}

/// Resample interleaved stereo to the target rate
pub(crate) fn resample_stereo(samples: &[f32], from_hz: u32, to_hz: u32) -> Result<Vec<f32>> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType,
        WindowFunction,
    };

    let frames = samples.len() / 2;
    if frames == 0 {
        return Ok(Vec::new());
    }

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Cubic,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(
        f64::from(to_hz) / f64::from(from_hz),
        2.0,
        params,
        frames,
        2,
    )
    .map_err(|e| AudioError::Resample(e.to_string()))?;

    // Deinterleave, resample the whole buffer as one chunk, reinterleave
    let mut deinterleaved = vec![Vec::with_capacity(frames); 2];
    for frame in samples.chunks_exact(2) {
        deinterleaved[0].push(frame[0]);
        deinterleaved[1].push(frame[1]);
    }

    let resampled = resampler
        .process(&deinterleaved, None)
        .map_err(|e| AudioError::Resample(e.to_string()))?;

    let out_frames = resampled[0].len();
    let mut interleaved = Vec::with_capacity(out_frames * 2);
    for i in 0..out_frames {
        interleaved.push(resampled[0][i]);
        interleaved.push(resampled[1][i]);
    }

    Ok(interleaved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stem_core::AudioFormat;

    #[test]
    fn resample_scales_frame_count() {
        let input = vec![0.5f32; 44_100 * 2]; // 1 second of stereo
        let output = resample_stereo(&input, 44_100, 48_000).unwrap();

        let out_frames = output.len() / 2;
        // Within 1% of the ideal 48000 frames
        assert!((out_frames as f64 - 48_000.0).abs() < 480.0, "{}", out_frames);
    }

    #[test]
    fn resample_empty_is_empty() {
        assert!(resample_stereo(&[], 44_100, 48_000).unwrap().is_empty());
    }

    #[test]
    fn create_bus() {
        // Expected to fail in headless environments
        let Ok(bus) = CpalMixBus::new() else {
            return;
        };
        assert!(!bus.is_running());
        assert!(bus.sample_rate().as_hz() > 0);
    }

    #[test]
    fn install_prime_start_stop_roundtrip() {
        let Ok(mut bus) = CpalMixBus::new() else {
            return; // Skip without an output device
        };

        bus.install(2).unwrap();

        let rate = bus.sample_rate();
        let format = AudioFormat::new(rate, 2, Some(32));
        let silence = AudioBuffer::new(vec![0.0; rate.as_hz() as usize / 2], format);
        bus.prime(0, silence.clone()).unwrap();
        bus.prime(1, silence).unwrap();

        bus.start().unwrap();
        assert!(bus.is_running());

        bus.start_all().unwrap();
        std::thread::sleep(Duration::from_millis(100));

        bus.stop_all().unwrap();
        bus.stop().unwrap();
        assert!(!bus.is_running());
    }

    #[test]
    fn prime_out_of_range_slot_fails() {
        let Ok(mut bus) = CpalMixBus::new() else {
            return;
        };
        bus.install(1).unwrap();

        let format = AudioFormat::new(bus.sample_rate(), 2, Some(32));
        let buffer = AudioBuffer::new(vec![0.0; 64], format);
        assert!(bus.prime(5, buffer).is_err());
    }
}
