//! Custom extractors for the HTTP server.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        request::Parts,
    },
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;

use crate::error::AppError;

fn is_msgpack(mime: &str) -> bool {
    mime.contains("msgpack")
}

/// Extractor for request bodies in either JSON or `MessagePack`.
///
/// `application/msgpack` and `application/x-msgpack` bodies are decoded as
/// `MessagePack`; anything else (including a missing content type) is
/// decoded as JSON. Malformed bodies and missing fields are rejected with
/// `INVALID_INPUT`.
pub struct ApiPayload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiPayload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let msgpack = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_msgpack);

        // Keeps the 413 status when the body limit is exceeded
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let decoded: Result<T, String> = if msgpack {
            rmp_serde::from_slice(&bytes)
                .map_err(|e| format!("Failed to deserialize MessagePack: {e}"))
        } else {
            serde_json::from_slice(&bytes).map_err(|e| format!("Failed to deserialize JSON: {e}"))
        };

        decoded
            .map(ApiPayload)
            .map_err(|message| AppError::InvalidInput(message).into_response())
    }
}

/// Response encoding requested by the client's `Accept` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    MsgPack,
}

impl ResponseFormat {
    pub fn from_accept(accept: Option<&str>) -> Self {
        match accept {
            Some(value) if is_msgpack(value) => Self::MsgPack,
            _ => Self::Json,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts.headers.get(ACCEPT).and_then(|v| v.to_str().ok());
        Ok(Self::from_accept(accept))
    }
}
