//! Feature extraction helpers (decoding, windowing, acoustic descriptors).

pub(crate) mod audio;
pub(crate) mod audio_decode;
pub mod features;
pub(crate) mod frequency_domain;
pub(crate) mod time_domain;

use std::path::Path;

use crate::error::FeatureError;
use features::{EmotionFeatures, ExtraFeatures};

/// Extract aggregated acoustic descriptors for one clip.
///
/// Decodes `path`, cuts the fixed 3.0 s window starting 0.5 s in, and
/// averages per-frame descriptors over time. With `extra` set, chroma,
/// zero-crossing rate and spectral centroid means are computed alongside
/// the MFCC means.
pub fn extract_emotion_features(
    path: &Path,
    extra: bool,
) -> Result<EmotionFeatures, FeatureError> {
    let clip = audio::decode_clip(path)?;
    let freq = frequency_domain::extract_frequency_domain_features(&clip.mono, clip.sample_rate);
    let extras = extra.then(|| ExtraFeatures {
        chroma_mean: freq.chroma_mean,
        zcr_mean: time_domain::zero_crossing_rate_mean(&clip.mono),
        centroid_hz_mean: freq.centroid_hz_mean,
    });
    tracing::debug!(
        path = %path.display(),
        sample_rate = clip.sample_rate,
        frames = freq.frame_count,
        extra,
        "extracted clip features"
    );
    Ok(EmotionFeatures {
        mfcc_mean: freq.mfcc_mean,
        extras,
    })
}

/// Extract the flat feature vector for one clip.
///
/// Element order is fixed and significant: MFCC means 1..40, then, when
/// `extra` is set, chroma mean, zero-crossing-rate mean and spectral
/// centroid mean. No normalization or scaling is applied.
pub fn extract_features(path: &Path, extra: bool) -> Result<Vec<f32>, FeatureError> {
    Ok(extract_emotion_features(path, extra)?.to_vector())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FEATURE_LEN_BASE, FEATURE_LEN_EXTENDED};
    use hound::{SampleFormat, WavSpec, WavWriter};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_tone(dir: &TempDir, name: &str, seconds: f32, freq: f32) -> PathBuf {
        let path = dir.path().join(name);
        let sample_rate = 22_050u32;
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        let frames = (seconds * sample_rate as f32).round() as usize;
        for i in 0..frames {
            let t = i as f32 / sample_rate as f32;
            writer
                .write_sample::<f32>(0.5 * (2.0 * std::f32::consts::PI * freq * t).sin())
                .unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    #[test]
    fn base_vector_has_exactly_40_elements() {
        let dir = TempDir::new().unwrap();
        let path = write_tone(&dir, "tone.wav", 4.0, 440.0);
        let vector = extract_features(&path, false).unwrap();
        assert_eq!(vector.len(), FEATURE_LEN_BASE);
    }

    #[test]
    fn extended_vector_has_exactly_43_elements() {
        let dir = TempDir::new().unwrap();
        let path = write_tone(&dir, "tone.wav", 4.0, 440.0);
        let vector = extract_features(&path, true).unwrap();
        assert_eq!(vector.len(), FEATURE_LEN_EXTENDED);
    }

    #[test]
    fn mfcc_prefix_is_identical_regardless_of_extra() {
        let dir = TempDir::new().unwrap();
        let path = write_tone(&dir, "tone.wav", 4.0, 440.0);
        let base = extract_features(&path, false).unwrap();
        let extended = extract_features(&path, true).unwrap();
        assert_eq!(base, extended[..FEATURE_LEN_BASE]);
    }

    #[test]
    fn extraction_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let path = write_tone(&dir, "tone.wav", 4.0, 440.0);
        let first = extract_features(&path, true).unwrap();
        let second = extract_features(&path, true).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn short_clip_still_yields_full_length_vector() {
        let dir = TempDir::new().unwrap();
        let path = write_tone(&dir, "short.wav", 1.0, 440.0);
        let vector = extract_features(&path, true).unwrap();
        assert_eq!(vector.len(), FEATURE_LEN_EXTENDED);
    }

    #[test]
    fn clip_shorter_than_the_offset_still_yields_full_length_vector() {
        let dir = TempDir::new().unwrap();
        // Shorter than the 0.5 s window offset: the analysis window is empty
        // and aggregates come from the single all-zero frame.
        let path = write_tone(&dir, "tiny.wav", 0.2, 440.0);
        let vector = extract_features(&path, true).unwrap();
        assert_eq!(vector.len(), FEATURE_LEN_EXTENDED);
        let base = extract_features(&path, false).unwrap();
        assert_eq!(base.len(), FEATURE_LEN_BASE);
        assert_eq!(base, vector[..FEATURE_LEN_BASE]);
    }

    #[test]
    fn nonexistent_path_fails_with_decode_error() {
        let err = extract_features(Path::new("/no/such/file.wav"), true).unwrap_err();
        let FeatureError::Decode { path, .. } = err;
        assert_eq!(path, Path::new("/no/such/file.wav"));
    }

    #[test]
    fn features_serialize_to_json() {
        let dir = TempDir::new().unwrap();
        let path = write_tone(&dir, "tone.wav", 4.0, 440.0);
        let features = extract_emotion_features(&path, true).unwrap();
        let json = serde_json::to_string(&features).unwrap();
        let back: crate::EmotionFeatures = serde_json::from_str(&json).unwrap();
        assert_eq!(features, back);
    }
}
