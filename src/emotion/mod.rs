//! Heuristic emotion detection for images and free text.
//!
//! Images are reduced to a handful of pixel statistics which are mapped onto
//! the seven FER2013 emotion classes with fixed linear formulas. Text is
//! scored by counting keyword hits from a static lexicon.

pub mod decode;
pub mod features;
pub mod vision;
pub mod text;

pub use decode::decode_base64_image;
pub use features::{extract_features, ImageFeatureVector, RasterImage, TARGET_SIZE};
pub use vision::{classify_image, score_image_emotion, ImageClassification};
pub use text::{score_text_emotion, TextEmotionResult, EMOTION_KEYWORDS};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised by the emotion detection core
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EmotionError {
    #[error("Invalid image format: {0}")]
    InvalidImageFormat(String),
}

/// One of the seven emotion classes.
///
/// Declaration order is the canonical order used for argmax tie-breaking
/// and for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Neutral,
    Sad,
    Surprise,
}

impl Emotion {
    /// All emotions in canonical order
    pub const ALL: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Neutral,
        Emotion::Sad,
        Emotion::Surprise,
    ];

    /// Lowercase label as used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Neutral => "neutral",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the seven labels
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown emotion label: {0}")]
pub struct UnknownEmotion(pub String);

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == lower)
            .ok_or_else(|| UnknownEmotion(s.to_string()))
    }
}

/// Weight per emotion label.
///
/// Weights sum to 1.0 when built with [`EmotionDistribution::normalized`]
/// from scores with a positive sum; otherwise the distribution is uniform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionDistribution(BTreeMap<Emotion, f64>);

impl EmotionDistribution {
    /// Uniform distribution (1/7 per label)
    pub fn uniform() -> Self {
        let weight = 1.0 / Emotion::ALL.len() as f64;
        Self(Emotion::ALL.iter().map(|e| (*e, weight)).collect())
    }

    /// Normalize raw scores by their sum, falling back to uniform when the
    /// sum is not positive.
    pub fn normalized(raw: &BTreeMap<Emotion, f64>) -> Self {
        let total: f64 = raw.values().sum();
        if total > 0.0 {
            Self(raw.iter().map(|(e, v)| (*e, v / total)).collect())
        } else {
            Self::uniform()
        }
    }

    /// Weight for a single label (0.0 if absent)
    pub fn get(&self, emotion: Emotion) -> f64 {
        self.0.get(&emotion).copied().unwrap_or(0.0)
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Label with the highest weight.
    ///
    /// Iterates in canonical order and keeps the first maximum, so ties go
    /// to the label declared first in [`Emotion`].
    pub fn argmax(&self) -> Emotion {
        let mut best = Emotion::ALL[0];
        let mut best_weight = f64::NEG_INFINITY;
        for emotion in Emotion::ALL {
            let weight = self.get(emotion);
            if weight > best_weight {
                best = emotion;
                best_weight = weight;
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        self.0.iter().map(|(e, w)| (*e, *w))
    }
}
