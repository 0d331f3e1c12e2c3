//! HTTP route handlers and response encoders.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::types::{HealthResponse, HealthStatus, RootResponse};

use super::extractors::ResponseFormat;
use super::{AppState, ROUTES};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const SERVICE: &str = "MoodMate";

/// `MessagePack` response wrapper
pub struct MsgPack<T>(pub T);

impl<T: serde::Serialize> IntoResponse for MsgPack<T> {
    fn into_response(self) -> Response {
        match rmp_serde::to_vec_named(&self.0) {
            Ok(bytes) => (
                StatusCode::OK,
                [("content-type", "application/msgpack")],
                bytes,
            )
                .into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialize response: {e}"),
            )
                .into_response(),
        }
    }
}

/// Response body encoded in the format the client asked for
pub struct Negotiated<T> {
    format: ResponseFormat,
    body: T,
}

impl ResponseFormat {
    pub fn respond<T>(self, body: T) -> Negotiated<T> {
        Negotiated { format: self, body }
    }
}

impl<T: serde::Serialize> IntoResponse for Negotiated<T> {
    fn into_response(self) -> Response {
        match self.format {
            ResponseFormat::Json => Json(self.body).into_response(),
            ResponseFormat::MsgPack => MsgPack(self.body).into_response(),
        }
    }
}

/// Health check endpoint
///
/// GET /health
pub async fn health(
    State(state): State<AppState>,
    format: ResponseFormat,
) -> Negotiated<HealthResponse> {
    format.respond(HealthResponse {
        status: HealthStatus::Healthy,
        service: SERVICE.to_string(),
        version: VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Service banner
///
/// GET /
pub async fn root(format: ResponseFormat) -> Negotiated<RootResponse> {
    format.respond(RootResponse {
        name: "MoodMate API",
        version: VERSION,
        routes: ROUTES.to_vec(),
    })
}
