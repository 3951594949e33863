use super::audio::sanitize_sample;

/// Frame length for zero-crossing analysis, matching the STFT grid.
pub(crate) const ZCR_FRAME_SIZE: usize = 2048;
pub(crate) const ZCR_HOP_SIZE: usize = 512;

/// Mean per-frame zero-crossing rate.
///
/// Each frame's rate is the fraction of adjacent sample pairs whose sign
/// differs; zero-to-zero transitions do not count. Empty input yields 0.
pub(crate) fn zero_crossing_rate_mean(samples: &[f32]) -> f32 {
    let mut rates = Vec::new();
    let mut start = 0usize;
    while start < samples.len() {
        let end = (start + ZCR_FRAME_SIZE).min(samples.len());
        rates.push(frame_rate(&samples[start..end]));
        start = start.saturating_add(ZCR_HOP_SIZE);
        if samples.len() <= ZCR_FRAME_SIZE {
            break;
        }
    }
    if rates.is_empty() {
        return 0.0;
    }
    rates.iter().copied().sum::<f32>() / rates.len() as f32
}

fn frame_rate(frame: &[f32]) -> f32 {
    if frame.len() < 2 {
        return 0.0;
    }
    let mut crossings = 0u32;
    let mut prev = sanitize_sample(frame[0]);
    for &sample in &frame[1..] {
        let current = sanitize_sample(sample);
        let crossed = (prev >= 0.0 && current < 0.0) || (prev < 0.0 && current >= 0.0);
        if crossed && (prev != 0.0 || current != 0.0) {
            crossings += 1;
        }
        prev = current;
    }
    crossings as f32 / frame.len() as f32
}
