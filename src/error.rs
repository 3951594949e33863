use std::path::{Path, PathBuf};

/// Errors that may occur while turning an audio file into features.
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    /// The file could not be opened, probed, or decoded into samples.
    #[error("Audio decode failed for {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

impl FeatureError {
    pub(crate) fn decode(path: &Path, reason: impl Into<String>) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
