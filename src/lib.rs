//! Acoustic feature extraction for emotion classification.
//!
//! Two stateless components. [`label`] decodes the emotion encoded in a
//! RAVDESS-style filename. [`analysis`] decodes a short audio clip and
//! reduces it to a fixed-order feature vector: 40 time-averaged MFCCs,
//! optionally followed by chroma, zero-crossing rate and spectral centroid
//! means.

pub mod analysis;
pub mod error;
pub mod label;
pub mod logging;

pub use analysis::features::{
    EmotionFeatures, ExtraFeatures, FEATURE_LEN_BASE, FEATURE_LEN_EXTENDED,
};
pub use analysis::{extract_emotion_features, extract_features};
pub use error::FeatureError;
pub use label::{Emotion, emotion_from_filename};
