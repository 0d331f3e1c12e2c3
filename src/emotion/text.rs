//! Keyword-based text emotion scoring.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Emotion;

/// Keyword lexicon, in scoring order.
///
/// Ties between categories go to the one listed first here.
pub const EMOTION_KEYWORDS: &[(Emotion, &[&str])] = &[
    (
        Emotion::Happy,
        &["happy", "joy", "excited", "wonderful", "great", "awesome"],
    ),
    (
        Emotion::Sad,
        &["sad", "unhappy", "depressed", "crying", "lonely"],
    ),
    (
        Emotion::Angry,
        &["angry", "furious", "mad", "rage", "hate", "frustrated"],
    ),
    (
        Emotion::Disgust,
        &["disgusted", "gross", "yuck", "revolting"],
    ),
    (
        Emotion::Fear,
        &["scared", "afraid", "terrified", "anxiety", "worried"],
    ),
    (
        Emotion::Surprise,
        &["surprised", "amazed", "shocked", "astonished"],
    ),
    (Emotion::Neutral, &["ok", "fine", "normal", "regular"]),
];

/// Result of scoring a text snippet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEmotionResult {
    /// Dominant emotion (`neutral` when nothing matched)
    pub emotion: Emotion,
    /// Share of keyword hits belonging to the dominant emotion (0.0 to 1.0)
    pub confidence: f64,
    /// Keyword hits per emotion
    pub scores: BTreeMap<Emotion, u32>,
}

/// Score free text against the keyword lexicon.
///
/// Matching is by case-insensitive substring, so each keyword counts at most
/// once no matter how often it occurs.
pub fn score_text_emotion(text: &str) -> TextEmotionResult {
    let lowered = text.to_lowercase();

    let mut scores = BTreeMap::new();
    for (emotion, keywords) in EMOTION_KEYWORDS {
        let hits = keywords.iter().filter(|kw| lowered.contains(*kw)).count() as u32;
        scores.insert(*emotion, hits);
    }

    let total: u32 = scores.values().sum();

    let mut dominant = Emotion::Neutral;
    if total > 0 {
        let mut best = 0;
        for (emotion, _) in EMOTION_KEYWORDS {
            let hits = scores[emotion];
            if hits > best {
                best = hits;
                dominant = *emotion;
            }
        }
    }

    let confidence = (f64::from(scores[&dominant]) / f64::from(total.max(1))).min(1.0);

    TextEmotionResult {
        emotion: dominant,
        confidence,
        scores,
    }
}
