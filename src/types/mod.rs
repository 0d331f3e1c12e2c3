//! Shared types for the MoodMate API.
//!
//! These types are used across the application for request/response handling.

pub mod api;

use serde::{Deserialize, Serialize};

pub use api::*;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    #[serde(default)]
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Service banner returned from `/`
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub routes: Vec<&'static str>,
}
