//! MoodMate
//!
//! A small HTTP service that detects emotion from a face image or a text
//! snippet and recommends music for the detected mood, with region-specific
//! display metadata.

pub mod catalog;
pub mod config;
pub mod emotion;
pub mod error;
pub mod math;
pub mod server;
pub mod types;

pub use crate::config::AppConfig;
pub use crate::error::{AppError, Result};

pub use catalog::{lookup_region, recommend, MusicRecommendation, RegionSettings};
pub use emotion::{
    classify_image, extract_features, score_image_emotion, score_text_emotion, Emotion,
    EmotionDistribution, EmotionError, ImageClassification, ImageFeatureVector, RasterImage,
    TextEmotionResult,
};
