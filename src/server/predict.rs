//! Emotion prediction route handlers.

use axum::extract::State;
use tracing::{error, info};

use crate::catalog::{lookup_region, recommend};
use crate::emotion::{classify_image, decode_base64_image, score_text_emotion, Emotion};
use crate::error::AppError;
use crate::types::{EmotionResponse, EmotionScores, ImageRequest, TextRequest};

use super::extractors::{ApiPayload, ResponseFormat};
use super::routes::Negotiated;
use super::AppState;

/// POST /predict/image
///
/// Detect emotion from a base64 encoded image and recommend music for it.
pub async fn predict_image(
    State(state): State<AppState>,
    format: ResponseFormat,
    ApiPayload(req): ApiPayload<ImageRequest>,
) -> Result<Negotiated<EmotionResponse>, AppError> {
    let region = req
        .region
        .unwrap_or_else(|| state.default_region().to_string());

    info!(payload_len = req.image.len(), %region, "Predicting emotion from image");

    // Decoding and resampling are CPU bound
    let image = req.image;
    let classification = tokio::task::spawn_blocking(move || {
        decode_base64_image(&image).map(|raster| classify_image(&raster))
    })
    .await
    .map_err(|e| {
        error!(error = %e, "Image classification task panicked");
        AppError::Internal(e.to_string())
    })??;

    let emotion = classification.emotion();
    info!(%emotion, degraded = classification.is_fallback(), "Image emotion detected");

    let mut response = build_response(emotion, &region);
    response.emotion_scores = Some(EmotionScores::Distribution(classification.distribution()));
    response.degraded = classification.is_fallback();

    Ok(format.respond(response))
}

/// POST /predict/text
///
/// Detect emotion from free text and recommend music for it.
pub async fn predict_text(
    State(state): State<AppState>,
    format: ResponseFormat,
    ApiPayload(req): ApiPayload<TextRequest>,
) -> Result<Negotiated<EmotionResponse>, AppError> {
    let region = req
        .region
        .unwrap_or_else(|| state.default_region().to_string());

    info!(text_len = req.text.len(), %region, "Predicting emotion from text");

    let result = score_text_emotion(&req.text);
    info!(emotion = %result.emotion, confidence = result.confidence, "Text emotion detected");

    let mut response = build_response(result.emotion, &region);
    response.confidence = Some(result.confidence);
    response.emotion_scores = Some(EmotionScores::Counts(result.scores));

    Ok(format.respond(response))
}

fn build_response(emotion: Emotion, region: &str) -> EmotionResponse {
    let music = recommend(emotion.as_str(), region);

    EmotionResponse {
        emotion,
        recommended_music: music.recommended_songs,
        mood: music.emotion,
        region_settings: lookup_region(region),
        confidence: None,
        emotion_scores: None,
        degraded: false,
    }
}
