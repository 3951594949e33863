//! Emotion labels derived from filename conventions.
//!
//! RAVDESS-style filenames encode metadata in dash-separated segments; the
//! third segment is a two-character emotion code.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Categorical emotion, one variant per filename code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Neutral,
    Calm,
    Happy,
    Sad,
    Angry,
    Fearful,
    Disgust,
    Surprised,
}

impl Emotion {
    /// Lowercase name as used in dataset manifests.
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Calm => "calm",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Fearful => "fearful",
            Emotion::Disgust => "disgust",
            Emotion::Surprised => "surprised",
        }
    }

    /// Look up a two-character filename code.
    pub fn from_code(code: &str) -> Option<Self> {
        code_table().get(code).copied()
    }
}

fn code_table() -> &'static HashMap<&'static str, Emotion> {
    static TABLE: OnceLock<HashMap<&'static str, Emotion>> = OnceLock::new();
    TABLE.get_or_init(|| {
        HashMap::from([
            ("01", Emotion::Neutral),
            ("02", Emotion::Calm),
            ("03", Emotion::Happy),
            ("04", Emotion::Sad),
            ("05", Emotion::Angry),
            ("06", Emotion::Fearful),
            ("07", Emotion::Disgust),
            ("08", Emotion::Surprised),
        ])
    })
}

/// Emotion encoded in the third dash-separated segment of `filename`.
///
/// A filename with fewer than three segments and an unknown code both
/// resolve to `None`; malformed input never panics.
pub fn emotion_from_filename(filename: &str) -> Option<Emotion> {
    let code = filename.split('-').nth(2)?;
    Emotion::from_code(code)
}
