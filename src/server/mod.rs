//! HTTP server setup and routing.

mod catalog;
mod extractors;
mod predict;
mod routes;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::{AppConfig, CorsConfig};

pub use extractors::{ApiPayload, ResponseFormat};
pub use routes::{MsgPack, Negotiated};

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Region to use when a request does not name one
    pub fn default_region(&self) -> &str {
        &self.config.defaults.region
    }
}

/// Paths served by the router, listed by `GET /`
pub const ROUTES: &[&str] = &[
    "POST /predict/image",
    "POST /predict/text",
    "GET /regions",
    "GET /emotions",
    "GET /health",
];

/// Creates the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);
    let body_limit = DefaultBodyLimit::max(state.config.limits.max_body_bytes);

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        // Prediction endpoints
        .route("/predict/image", post(predict::predict_image))
        .route("/predict/text", post(predict::predict_text))
        // Static catalogs
        .route("/regions", get(catalog::list_regions))
        .route("/emotions", get(catalog::list_emotions))
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
