//! Image emotion scoring from pixel statistics.
//!
//! Seven fixed linear formulas turn an [`ImageFeatureVector`] into raw
//! per-emotion scores. The weights are hand-tuned constants, not learned.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::features::{extract_features, ImageFeatureVector, RasterImage};
use super::{Emotion, EmotionDistribution};

/// Outcome of classifying an image.
///
/// Scoring never fails outright: anything that prevents a meaningful score
/// yields [`ImageClassification::Fallback`], which reports `neutral`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ImageClassification {
    Scored {
        emotion: Emotion,
        distribution: EmotionDistribution,
    },
    Fallback {
        reason: String,
    },
}

impl ImageClassification {
    /// Predicted label (`neutral` for the fallback)
    pub fn emotion(&self) -> Emotion {
        match self {
            Self::Scored { emotion, .. } => *emotion,
            Self::Fallback { .. } => Emotion::Neutral,
        }
    }

    /// Normalized distribution (uniform for the fallback)
    pub fn distribution(&self) -> EmotionDistribution {
        match self {
            Self::Scored { distribution, .. } => distribution.clone(),
            Self::Fallback { .. } => EmotionDistribution::uniform(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Raw, unnormalized score for every emotion.
pub fn raw_scores(f: &ImageFeatureVector) -> BTreeMap<Emotion, f64> {
    let edges = f.edge_intensity / 1000.0;

    let mut scores = BTreeMap::new();
    // Bright, smooth, good contrast
    scores.insert(
        Emotion::Happy,
        f.brightness * 0.3 + f.contrast * 0.3 + (1.0 - edges) * 0.4,
    );
    // Darker with dominant vertical gradients
    scores.insert(
        Emotion::Sad,
        (1.0 - f.brightness) * 0.3
            + (f.v_gradient / (f.h_gradient + 1.0)) * 0.4
            + (1.0 - f.contrast) * 0.3,
    );
    // Strong edges, high contrast, dark
    scores.insert(
        Emotion::Angry,
        edges * 0.4 + f.contrast * 0.3 + (1.0 - f.brightness) * 0.3,
    );
    // Dominant horizontal gradients
    scores.insert(
        Emotion::Disgust,
        (f.h_gradient / (f.v_gradient + 1.0)) * 0.5
            + (1.0 - f.brightness) * 0.3
            + f.contrast * 0.2,
    );
    scores.insert(
        Emotion::Fear,
        f.brightness_variance * 0.4 + edges * 0.3 + f.contrast * 0.3,
    );
    scores.insert(
        Emotion::Surprise,
        f.brightness * 0.4 + (f.edge_intensity / 1500.0) * 0.3 + f.contrast * 0.3,
    );
    // Peaks at mid brightness with low contrast
    scores.insert(
        Emotion::Neutral,
        (0.5 - (f.brightness - 0.5).abs()) * (1.0 - f.contrast / 0.5),
    );
    scores
}

/// Score a feature vector.
pub fn score_image_emotion(features: &ImageFeatureVector) -> ImageClassification {
    if !features.is_finite() {
        return fallback(format!("non-finite image features: {features:?}"));
    }

    let raw = raw_scores(features);
    if let Some((emotion, score)) = raw.iter().find(|(_, s)| !s.is_finite()) {
        return fallback(format!("non-finite score {score} for {emotion}"));
    }

    let distribution = EmotionDistribution::normalized(&raw);
    let emotion = distribution.argmax();
    debug!(%emotion, ?features, "Image emotion scored");

    ImageClassification::Scored {
        emotion,
        distribution,
    }
}

/// Extract features from a raster and score them.
pub fn classify_image(image: &RasterImage) -> ImageClassification {
    match extract_features(image) {
        Ok(features) => score_image_emotion(&features),
        Err(e) => fallback(e.to_string()),
    }
}

fn fallback(reason: String) -> ImageClassification {
    warn!(%reason, "Image emotion detection failed, defaulting to neutral");
    ImageClassification::Fallback { reason }
}
