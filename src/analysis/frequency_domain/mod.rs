//! Frequency-domain feature extraction (STFT + MFCC + chroma + centroid).
//!
//! Frame parameters follow the analysis defaults the training corpus was
//! produced with: 2048-sample Hann frames, 512-sample hop, 128 mel bands
//! reduced to 40 cepstral coefficients, 12 chroma pitch classes. MFCC
//! values are sensitive to these parameters, so they are fixed here rather
//! than configurable.

mod chroma;
mod mel;
mod stft;

use chroma::ChromaBank;
use mel::MelBank;

pub(crate) const STFT_FRAME_SIZE: usize = 2048;
pub(crate) const STFT_HOP_SIZE: usize = 512;
pub(crate) const MEL_BANDS: usize = 128;
pub(crate) const N_MFCC: usize = 40;
pub(crate) const CHROMA_BINS: usize = 12;

/// Time-averaged spectral descriptors for one clip.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FrequencyDomainFeatures {
    /// Per-coefficient MFCC means, coefficient index order, length [`N_MFCC`].
    pub(crate) mfcc_mean: Vec<f32>,
    /// Grand mean over the full bins-by-frames chroma array.
    pub(crate) chroma_mean: f32,
    /// Mean per-frame spectral centroid in Hz.
    pub(crate) centroid_hz_mean: f32,
    pub(crate) frame_count: usize,
}

/// Extract frequency-domain features from a mono clip at its native rate.
pub(crate) fn extract_frequency_domain_features(
    samples: &[f32],
    sample_rate: u32,
) -> FrequencyDomainFeatures {
    let nyquist = sample_rate.max(1) as f32 * 0.5;
    let mel = MelBank::new(sample_rate, STFT_FRAME_SIZE, MEL_BANDS, N_MFCC, 0.0, nyquist);
    let chroma = ChromaBank::new(sample_rate, STFT_FRAME_SIZE);
    let frames = stft::compute_frames(
        samples,
        sample_rate,
        STFT_FRAME_SIZE,
        STFT_HOP_SIZE,
        &mel,
        &chroma,
    );
    FrequencyDomainFeatures {
        mfcc_mean: mean_per_coefficient(&frames.mfcc, N_MFCC),
        chroma_mean: grand_mean(&frames.chroma),
        centroid_hz_mean: mean(&frames.centroid_hz),
        frame_count: frames.centroid_hz.len(),
    }
}

fn mean_per_coefficient(frames: &[Vec<f32>], width: usize) -> Vec<f32> {
    if frames.is_empty() {
        return vec![0.0; width];
    }
    let mut sum = vec![0.0_f64; width];
    for frame in frames {
        for (i, &v) in frame.iter().enumerate().take(width) {
            sum[i] += v as f64;
        }
    }
    sum.into_iter()
        .map(|v| (v / frames.len() as f64) as f32)
        .collect()
}

fn grand_mean(frames: &[Vec<f32>]) -> f32 {
    let count: usize = frames.iter().map(Vec::len).sum();
    if count == 0 {
        return 0.0;
    }
    let sum: f64 = frames
        .iter()
        .flat_map(|frame| frame.iter())
        .map(|&v| v as f64)
        .sum();
    (sum / count as f64) as f32
}

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: f64 = values.iter().map(|&v| v as f64).sum();
    (sum / values.len() as f64) as f32
}
