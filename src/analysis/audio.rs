use std::path::Path;

use crate::error::FeatureError;

/// Offset into the file where the analysis window starts.
pub(crate) const CLIP_OFFSET_SECONDS: f32 = 0.5;
/// Length of the analysis window.
pub(crate) const CLIP_SECONDS: f32 = 3.0;

/// Decoded mono clip ready for analysis, at the file's native sample rate.
#[derive(Debug)]
pub(crate) struct ClipAudio {
    pub(crate) mono: Vec<f32>,
    pub(crate) sample_rate: u32,
}

/// Decode `path` and cut the fixed analysis window.
///
/// Files shorter than offset + window yield the available tail; files
/// shorter than the offset yield an empty clip, which downstream analysis
/// turns into a single all-zero frame. No padding, resampling or gain is
/// applied.
pub(crate) fn decode_clip(path: &Path) -> Result<ClipAudio, FeatureError> {
    let decoded = super::audio_decode::decode_audio(path, CLIP_OFFSET_SECONDS + CLIP_SECONDS)?;
    let mono = downmix_to_mono(&decoded.samples, decoded.channels);
    let mono = clip_window(&mono, decoded.sample_rate);
    Ok(ClipAudio {
        mono,
        sample_rate: decoded.sample_rate,
    })
}

fn clip_window(samples: &[f32], sample_rate: u32) -> Vec<f32> {
    let start = seconds_to_samples(CLIP_OFFSET_SECONDS, sample_rate).min(samples.len());
    let len = seconds_to_samples(CLIP_SECONDS, sample_rate);
    let end = start.saturating_add(len).min(samples.len());
    samples[start..end].to_vec()
}

fn seconds_to_samples(seconds: f32, sample_rate: u32) -> usize {
    (seconds * sample_rate.max(1) as f32).round() as usize
}

fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    let channels = channels.max(1) as usize;
    if channels == 1 {
        return samples.iter().copied().map(sanitize_sample).collect();
    }
    let frames = samples.len() / channels;
    let mut mono = Vec::with_capacity(frames);
    for frame in 0..frames {
        let start = frame * channels;
        let end = start + channels;
        let slice = &samples[start..end.min(samples.len())];
        let mut sum = 0.0_f32;
        for &sample in slice {
            sum += sanitize_sample(sample);
        }
        mono.push(sum / channels as f32);
    }
    mono
}

pub(crate) fn sanitize_sample(sample: f32) -> f32 {
    if !sample.is_finite() {
        return 0.0;
    }
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped != 0.0 && clamped.abs() < f32::MIN_POSITIVE {
        0.0
    } else {
        clamped
    }
}
