//! API request and response types for emotion prediction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::RegionSettings;
use crate::emotion::{Emotion, EmotionDistribution};

/// Request to detect emotion from an image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Base64 encoded image bytes (a `data:` URL is accepted)
    pub image: String,
    /// Region for display metadata (defaults to the configured region)
    #[serde(default)]
    pub region: Option<String>,
}

/// Request to detect emotion from text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRequest {
    pub text: String,
    #[serde(default)]
    pub region: Option<String>,
}

/// Per-emotion scores attached to a prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EmotionScores {
    /// Normalized weights from image scoring
    Distribution(EmotionDistribution),
    /// Keyword hit counts from text scoring
    Counts(BTreeMap<Emotion, u32>),
}

/// Response from either prediction endpoint
#[derive(Debug, Clone, Serialize)]
pub struct EmotionResponse {
    /// Detected emotion
    pub emotion: Emotion,
    /// Songs matching the emotion
    pub recommended_music: Vec<String>,
    /// Emotion label used for the recommendation
    pub mood: String,
    /// Display metadata for the requested region
    pub region_settings: &'static RegionSettings,
    /// Keyword confidence (text requests only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion_scores: Option<EmotionScores>,
    /// Set when image scoring could not run and `neutral` was substituted
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

/// Response listing known regions
#[derive(Debug, Clone, Serialize)]
pub struct RegionsResponse {
    pub regions: Vec<&'static str>,
}

/// Response listing emotion labels
#[derive(Debug, Clone, Serialize)]
pub struct EmotionsResponse {
    pub emotions: Vec<Emotion>,
}
