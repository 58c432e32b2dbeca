/// Stem loading via Symphonia (probe stage)
use crate::decoder;
use crate::error::{AudioError, Result};
use std::path::Path;
use std::time::Duration;
use stem_core::{AudioBuffer, AudioFormat, SampleRate, Stem, StemDecoder};
use symphonia::core::codecs::CodecParameters;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Stem decoder backed by Symphonia
///
/// Supports MP3, FLAC, OGG/Vorbis, WAV, AAC, and MP4 containers.
///
/// `probe` reads file headers only; `decode` loads the entire file into an
/// interleaved stereo f32 buffer at the native sample rate.
pub struct SymphoniaStemDecoder;

/// An opened container, positioned at the start of its default audio track
pub(crate) struct OpenedStem {
    /// Format reader (container parser)
    pub reader: Box<dyn FormatReader>,
    /// ID of the default audio track
    pub track_id: u32,
    /// Codec parameters of that track
    pub params: CodecParameters,
}

impl SymphoniaStemDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }
}

impl Default for SymphoniaStemDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Open a file and locate its default audio track
pub(crate) fn open_stem(path: &Path) -> Result<OpenedStem> {
    if !path.exists() {
        return Err(AudioError::FileNotFound(path.display().to_string()));
    }

    let file = std::fs::File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Hint the format registry with the file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AudioError::UnsupportedFormat(format!("{}: {}", path.display(), e)))?;

    let reader = probed.format;
    let track = reader
        .default_track()
        .ok_or_else(|| AudioError::NoAudioTrack(path.display().to_string()))?;

    let track_id = track.id;
    let params = track.codec_params.clone();

    Ok(OpenedStem {
        reader,
        track_id,
        params,
    })
}

/// Read a stem's native format from its headers
fn probe_stem(path: &Path) -> Result<Stem> {
    let opened = open_stem(path)?;
    let params = &opened.params;

    let sample_rate = params.sample_rate.unwrap_or(44_100);
    let channels = params.channels.map(|c| c.count() as u16).unwrap_or(2);
    let bits = params.bits_per_sample.map(|b| b as u16);

    let duration = params
        .n_frames
        .map(|frames| Duration::from_secs_f64(frames as f64 / sample_rate as f64));

    let format = AudioFormat::new(SampleRate::new(sample_rate), channels, bits);
    Ok(Stem::new(path.to_path_buf(), format, duration))
}

impl StemDecoder for SymphoniaStemDecoder {
    fn probe(&self, path: &Path) -> stem_core::Result<Stem> {
        Ok(probe_stem(path)?)
    }

    fn decode(&mut self, path: &Path) -> stem_core::Result<AudioBuffer> {
        Ok(decoder::decode_stem(path)?)
    }
}
