use std::f32::consts::PI;

use rustfft::num_complex::Complex32;
use rustfft::{Fft, FftPlanner};

use super::chroma::ChromaBank;
use super::mel::MelBank;
use super::{CHROMA_BINS, N_MFCC};

pub(super) struct FrameSet {
    pub(super) mfcc: Vec<Vec<f32>>,
    pub(super) chroma: Vec<Vec<f32>>,
    pub(super) centroid_hz: Vec<f32>,
}

pub(super) fn compute_frames(
    samples: &[f32],
    sample_rate: u32,
    frame_size: usize,
    hop_size: usize,
    mel: &MelBank,
    chroma: &ChromaBank,
) -> FrameSet {
    let frame_size = frame_size.max(1);
    let hop_size = hop_size.max(1);
    let window = hann_window(frame_size);
    let fft = FftPlanner::<f32>::new().plan_fft_forward(frame_size);
    let mut buffer = vec![Complex32::default(); frame_size];
    let mut scratch = vec![Complex32::default(); fft.get_inplace_scratch_len()];
    let mut frames = FrameSet {
        mfcc: Vec::new(),
        chroma: Vec::new(),
        centroid_hz: Vec::new(),
    };
    let mut start = 0usize;
    while start < samples.len() {
        process_frame(
            fft.as_ref(),
            &mut buffer,
            &mut scratch,
            &window,
            samples,
            start,
            sample_rate,
            frame_size,
            mel,
            chroma,
            &mut frames,
        );
        start = start.saturating_add(hop_size);
        if samples.len() <= frame_size {
            break;
        }
    }

    ensure_minimum_frame(&mut frames);
    frames
}

#[allow(clippy::too_many_arguments)]
fn process_frame(
    fft: &dyn Fft<f32>,
    buffer: &mut [Complex32],
    scratch: &mut [Complex32],
    window: &[f32],
    samples: &[f32],
    start: usize,
    sample_rate: u32,
    frame_size: usize,
    mel: &MelBank,
    chroma: &ChromaBank,
    frames: &mut FrameSet,
) {
    fill_windowed(buffer, samples, start, window);
    fft.process_with_scratch(buffer, scratch);
    let power = power_spectrum(buffer);
    frames.mfcc.push(mel.mfcc_from_power(&power));
    frames.chroma.push(chroma.frame_from_power(&power));
    frames
        .centroid_hz
        .push(centroid_hz(&power, sample_rate, frame_size));
}

/// Empty input still produces one frame so every aggregate is defined.
fn ensure_minimum_frame(frames: &mut FrameSet) {
    if !frames.centroid_hz.is_empty() {
        return;
    }
    frames.mfcc.push(vec![0.0_f32; N_MFCC]);
    frames.chroma.push(vec![0.0_f32; CHROMA_BINS]);
    frames.centroid_hz.push(0.0);
}

fn fill_windowed(target: &mut [Complex32], samples: &[f32], start: usize, window: &[f32]) {
    for (i, cell) in target.iter_mut().enumerate() {
        let src = samples.get(start + i).copied().unwrap_or(0.0);
        let win = window.get(i).copied().unwrap_or(1.0);
        *cell = Complex32::new(crate::analysis::audio::sanitize_sample(src) * win, 0.0);
    }
}

fn hann_window(length: usize) -> Vec<f32> {
    if length <= 1 {
        return vec![1.0_f32; length.max(1)];
    }
    let denom = (length - 1) as f32;
    (0..length)
        .map(|n| 0.5_f32 * (1.0 - (2.0 * PI * n as f32 / denom).cos()))
        .collect()
}

fn power_spectrum(fft: &[Complex32]) -> Vec<f32> {
    let bins = fft.len() / 2 + 1;
    let mut power = Vec::with_capacity(bins);
    for bin in 0..bins {
        power.push(fft[bin].norm_sqr().max(0.0));
    }
    power
}

/// Power-weighted mean bin frequency; 0 for an all-zero spectrum.
fn centroid_hz(power: &[f32], sample_rate: u32, fft_len: usize) -> f32 {
    let mut sum = 0.0_f64;
    let mut sum_freq = 0.0_f64;
    let sr = sample_rate.max(1) as f64;
    for (bin, &p) in power.iter().enumerate() {
        let p = p.max(0.0) as f64;
        sum += p;
        sum_freq += p * (bin as f64 * sr / fft_len as f64);
    }
    if sum <= 0.0 {
        return 0.0;
    }
    (sum_freq / sum) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::frequency_domain::{MEL_BANDS, STFT_FRAME_SIZE, STFT_HOP_SIZE};

    fn banks(sample_rate: u32) -> (MelBank, ChromaBank) {
        let nyquist = sample_rate as f32 * 0.5;
        (
            MelBank::new(
                sample_rate,
                STFT_FRAME_SIZE,
                MEL_BANDS,
                N_MFCC,
                0.0,
                nyquist,
            ),
            ChromaBank::new(sample_rate, STFT_FRAME_SIZE),
        )
    }

    #[test]
    fn compute_frames_returns_at_least_one_frame() {
        let (mel, chroma) = banks(22_050);
        let frames = compute_frames(&[], 22_050, STFT_FRAME_SIZE, STFT_HOP_SIZE, &mel, &chroma);
        assert_eq!(frames.mfcc.len(), 1);
        assert_eq!(frames.chroma.len(), 1);
        assert_eq!(frames.centroid_hz.len(), 1);
        assert_eq!(frames.mfcc[0].len(), N_MFCC);
        assert_eq!(frames.chroma[0].len(), CHROMA_BINS);
    }

    #[test]
    fn frame_count_follows_the_hop_grid() {
        let (mel, chroma) = banks(22_050);
        let samples = vec![0.1_f32; STFT_FRAME_SIZE * 2];
        let frames = compute_frames(
            &samples,
            22_050,
            STFT_FRAME_SIZE,
            STFT_HOP_SIZE,
            &mel,
            &chroma,
        );
        // Frames start on every hop while the start lies inside the signal.
        assert_eq!(frames.centroid_hz.len(), STFT_FRAME_SIZE * 2 / STFT_HOP_SIZE);
    }

    #[test]
    fn hann_window_is_symmetric_and_zero_at_edges() {
        let w = hann_window(8);
        assert!(w[0].abs() < 1e-6);
        assert!(w[7].abs() < 1e-6);
        assert!((w[1] - w[6]).abs() < 1e-6);
    }

    #[test]
    fn centroid_of_single_bin_matches_bin_frequency() {
        let fft_len = 2048usize;
        let sr = 22_050u32;
        let mut power = vec![0.0_f32; fft_len / 2 + 1];
        power[100] = 1.0;
        let expected = 100.0 * sr as f32 / fft_len as f32;
        assert!((centroid_hz(&power, sr, fft_len) - expected).abs() < 0.5);
    }

    #[test]
    fn silent_spectrum_has_zero_centroid() {
        let power = vec![0.0_f32; 1_025];
        assert_eq!(centroid_hz(&power, 22_050, 2_048), 0.0);
    }
}
