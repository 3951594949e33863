use serde::{Deserialize, Serialize};

/// Vector length with `extra = false` (MFCC means only).
pub const FEATURE_LEN_BASE: usize = 40;
/// Vector length with `extra = true` (MFCC means + chroma, ZCR, centroid).
pub const FEATURE_LEN_EXTENDED: usize = 43;

/// Aggregated acoustic descriptors for one clip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmotionFeatures {
    /// Per-coefficient MFCC means, coefficient index order, length 40.
    pub mfcc_mean: Vec<f32>,
    /// Additional descriptors, present when requested at extraction time.
    pub extras: Option<ExtraFeatures>,
}

/// Descriptors beyond the MFCC means.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ExtraFeatures {
    /// Grand mean over the 12-by-frames chroma array.
    pub chroma_mean: f32,
    /// Mean per-frame zero-crossing fraction.
    pub zcr_mean: f32,
    /// Mean per-frame spectral centroid in Hz.
    pub centroid_hz_mean: f32,
}

impl EmotionFeatures {
    /// Flatten in the fixed significant order: MFCC 1..40, then chroma,
    /// zero-crossing rate and centroid means when present.
    pub fn to_vector(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(FEATURE_LEN_EXTENDED);
        out.extend_from_slice(&self.mfcc_mean);
        if let Some(extras) = &self.extras {
            out.push(extras.chroma_mean);
            out.push(extras.zcr_mean);
            out.push(extras.centroid_hz_mean);
        }
        debug_assert!(out.len() == FEATURE_LEN_BASE || out.len() == FEATURE_LEN_EXTENDED);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_features(extras: Option<ExtraFeatures>) -> EmotionFeatures {
        EmotionFeatures {
            mfcc_mean: (0..FEATURE_LEN_BASE).map(|i| i as f32).collect(),
            extras,
        }
    }

    #[test]
    fn base_vector_is_mfcc_only() {
        let vector = sample_features(None).to_vector();
        assert_eq!(vector.len(), FEATURE_LEN_BASE);
        assert_eq!(vector[0], 0.0);
        assert_eq!(vector[39], 39.0);
    }

    #[test]
    fn extended_vector_appends_extras_in_order() {
        let vector = sample_features(Some(ExtraFeatures {
            chroma_mean: 0.25,
            zcr_mean: 0.125,
            centroid_hz_mean: 1_500.0,
        }))
        .to_vector();
        assert_eq!(vector.len(), FEATURE_LEN_EXTENDED);
        assert_eq!(&vector[..FEATURE_LEN_BASE], &sample_features(None).to_vector()[..]);
        assert_eq!(vector[40], 0.25);
        assert_eq!(vector[41], 0.125);
        assert_eq!(vector[42], 1_500.0);
    }

    #[test]
    fn features_round_trip_through_serde_json() {
        let features = sample_features(Some(ExtraFeatures {
            chroma_mean: 0.5,
            zcr_mean: 0.1,
            centroid_hz_mean: 800.0,
        }));
        let json = serde_json::to_string(&features).unwrap();
        let back: EmotionFeatures = serde_json::from_str(&json).unwrap();
        assert_eq!(features, back);
    }
}
