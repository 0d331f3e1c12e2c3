//! Catalog listing route handlers.

use crate::catalog::region_names;
use crate::emotion::Emotion;
use crate::types::{EmotionsResponse, RegionsResponse};

use super::extractors::ResponseFormat;
use super::routes::Negotiated;

/// GET /regions
///
/// List region names accepted by the prediction endpoints.
pub async fn list_regions(format: ResponseFormat) -> Negotiated<RegionsResponse> {
    format.respond(RegionsResponse {
        regions: region_names(),
    })
}

/// GET /emotions
///
/// List the emotion labels the classifiers can return.
pub async fn list_emotions(format: ResponseFormat) -> Negotiated<EmotionsResponse> {
    format.respond(EmotionsResponse {
        emotions: Emotion::ALL.to_vec(),
    })
}
