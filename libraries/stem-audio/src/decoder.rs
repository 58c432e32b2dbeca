/// Full-file decoding via Symphonia (prime stage)
use crate::error::{AudioError, Result};
use crate::loader::{self, OpenedStem};
use std::path::Path;
use stem_core::{AudioBuffer, AudioFormat, SampleRate};
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;

/// -3 dB fold-in for center and surround channels (ITU-R BS.775-1)
const FOLD: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Decode an entire stem into interleaved stereo f32 at its native rate
///
/// Multichannel sources are downmixed to stereo; mono is duplicated to both
/// sides. Malformed packets are skipped, per Symphonia conventions.
pub(crate) fn decode_stem(path: &Path) -> Result<AudioBuffer> {
    let OpenedStem {
        mut reader,
        track_id,
        params,
    } = loader::open_stem(path)?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&params, &DecoderOptions::default())
        .map_err(|e| AudioError::Symphonia(format!("Failed to create decoder: {}", e)))?;

    let sample_rate = params.sample_rate.unwrap_or(44_100);

    let mut samples: Vec<f32> = Vec::new();
    if let Some(frames) = params.n_frames {
        samples.reserve(frames as usize * 2);
    }

    loop {
        let packet = match reader.next_packet() {
            Ok(packet) => packet,
            // Normal end of stream
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(AudioError::Symphonia(format!(
                    "Packet read failed in {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => append_stereo(decoded, &mut samples),
            Err(SymphoniaError::DecodeError(e)) => {
                // Malformed packet; skip it and keep decoding
                tracing::warn!("skipping undecodable packet in {}: {}", path.display(), e);
            }
            Err(e) => {
                return Err(AudioError::DecodeError(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        }
    }

    if samples.is_empty() {
        return Err(AudioError::DecodeError(format!(
            "No audio decoded from {}",
            path.display()
        )));
    }

    let format = AudioFormat::new(SampleRate::new(sample_rate), 2, Some(32));
    Ok(AudioBuffer::new(samples, format))
}

/// Normalize one decoded packet to f32 and append it as interleaved stereo
///
/// Signed integers use symmetric scaling (divide by 2^(N-1)) so the
/// [-1.0, 1.0] range stays symmetric; unsigned formats are re-centered
/// around zero.
fn append_stereo(decoded: AudioBufferRef, out: &mut Vec<f32>) {
    match decoded {
        AudioBufferRef::F32(buf) => downmix(&buf, out, |s| s.clamp(-1.0, 1.0)),
        AudioBufferRef::F64(buf) => downmix(&buf, out, |s| (s as f32).clamp(-1.0, 1.0)),
        AudioBufferRef::S32(buf) => downmix(&buf, out, |s| s as f32 / 2_147_483_648.0),
        AudioBufferRef::S24(buf) => downmix(&buf, out, |s| s.inner() as f32 / 8_388_608.0),
        AudioBufferRef::S16(buf) => downmix(&buf, out, |s| s as f32 / 32_768.0),
        AudioBufferRef::S8(buf) => downmix(&buf, out, |s| s as f32 / 128.0),
        AudioBufferRef::U32(buf) => {
            downmix(&buf, out, |s| (s as f32 / u32::MAX as f32) * 2.0 - 1.0);
        }
        AudioBufferRef::U24(buf) => {
            downmix(&buf, out, |s| (s.inner() as f32 / 16_777_215.0) * 2.0 - 1.0);
        }
        AudioBufferRef::U16(buf) => {
            downmix(&buf, out, |s| (s as f32 / u16::MAX as f32) * 2.0 - 1.0);
        }
        AudioBufferRef::U8(buf) => {
            downmix(&buf, out, |s| (s as f32 / u8::MAX as f32) * 2.0 - 1.0);
        }
    }
}

/// Fold an arbitrary channel layout down to interleaved stereo
///
/// Layout assumptions follow common conventions: the first two channels are
/// front L/R; channel 3 is center, channel 4 LFE, channels 5/6 surround
/// L/R. Center and LFE feed both sides at -3 dB; surrounds feed their own
/// side at -3 dB. Channels beyond six are ignored.
fn downmix<T, F>(buf: &symphonia::core::audio::AudioBuffer<T>, out: &mut Vec<f32>, normalize: F)
where
    T: symphonia::core::sample::Sample + Copy,
    F: Fn(T) -> f32,
{
    let frames = buf.frames();
    let channels = buf.spec().channels.count();

    match channels {
        0 => out.extend(std::iter::repeat(0.0).take(frames * 2)),
        1 => {
            let mono = buf.chan(0);
            for i in 0..frames {
                let s = normalize(mono[i]);
                out.push(s);
                out.push(s);
            }
        }
        2 => {
            let left = buf.chan(0);
            let right = buf.chan(1);
            for i in 0..frames {
                out.push(normalize(left[i]));
                out.push(normalize(right[i]));
            }
        }
        _ => {
            for i in 0..frames {
                let mut l = normalize(buf.chan(0)[i]);
                let mut r = normalize(buf.chan(1)[i]);
                match channels {
                    3 => {
                        // L, R, C
                        let c = normalize(buf.chan(2)[i]) * FOLD;
                        l += c;
                        r += c;
                    }
                    4 => {
                        // L, R, SL, SR (quad)
                        l += normalize(buf.chan(2)[i]) * FOLD;
                        r += normalize(buf.chan(3)[i]) * FOLD;
                    }
                    5 => {
                        // L, R, C, SL, SR
                        let c = normalize(buf.chan(2)[i]) * FOLD;
                        l += c + normalize(buf.chan(3)[i]) * FOLD;
                        r += c + normalize(buf.chan(4)[i]) * FOLD;
                    }
                    _ => {
                        // L, R, C, LFE, SL, SR (5.1 and up)
                        let c = normalize(buf.chan(2)[i]) * FOLD;
                        let lfe = normalize(buf.chan(3)[i]) * FOLD;
                        l += c + lfe + normalize(buf.chan(4)[i]) * FOLD;
                        r += c + lfe + normalize(buf.chan(5)[i]) * FOLD;
                    }
                }
                out.push(l.clamp(-1.0, 1.0));
                out.push(r.clamp(-1.0, 1.0));
            }
        }
    }
}
