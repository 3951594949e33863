//! Chroma filterbank over the magnitude spectrum.
//!
//! Each FFT bin below Nyquist is assigned to the pitch class of its nearest
//! MIDI note (C = 0, A440 = class 9); bin magnitudes accumulate into the 12
//! pitch-class slots and each frame is normalized by its peak value, so
//! frame entries lie in `[0, 1]`.

use super::CHROMA_BINS;

pub(super) struct ChromaBank {
    /// Pitch class per power-spectrum bin; `None` for DC and sub-audible bins.
    classes: Vec<Option<usize>>,
}

impl ChromaBank {
    pub(super) fn new(sample_rate: u32, fft_len: usize) -> Self {
        let fft_len = fft_len.max(2);
        let bins = fft_len / 2 + 1;
        let sr = sample_rate.max(1) as f32;
        let mut classes = Vec::with_capacity(bins);
        classes.push(None);
        for bin in 1..bins {
            let freq = bin as f32 * sr / fft_len as f32;
            classes.push(pitch_class(freq));
        }
        Self { classes }
    }

    /// 12 pitch-class magnitudes for one frame, peak-normalized.
    pub(super) fn frame_from_power(&self, power: &[f32]) -> Vec<f32> {
        let mut out = vec![0.0_f32; CHROMA_BINS];
        for (bin, &p) in power.iter().enumerate() {
            if let Some(class) = self.classes.get(bin).copied().flatten() {
                out[class] += p.max(0.0).sqrt();
            }
        }
        let peak = out.iter().copied().fold(0.0_f32, f32::max);
        if peak > 0.0 {
            for value in &mut out {
                *value /= peak;
            }
        }
        out
    }
}

fn pitch_class(freq_hz: f32) -> Option<usize> {
    if freq_hz <= 0.0 {
        return None;
    }
    // MIDI note number; 69 = A4 = 440 Hz.
    let midi = 69.0 + 12.0 * (freq_hz / 440.0).log2();
    let note = midi.round();
    if note < 0.0 {
        return None;
    }
    Some(note as usize % CHROMA_BINS)
}
