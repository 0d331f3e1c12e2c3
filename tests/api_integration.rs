//! Integration tests for API endpoints.
//!
//! Images are generated in memory, so no fixtures are needed on disk.

use axum::http::{
    header::{ACCEPT, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN},
    HeaderValue, Method, StatusCode,
};
use axum_test::TestServer;
use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use serde_json::{json, Value};
use std::io::Cursor;

use moodmate::config::AppConfig;
use moodmate::server::{create_router, AppState};

/// Create a test server with default configuration
fn create_test_server() -> TestServer {
    create_test_server_with(AppConfig::default())
}

fn create_test_server_with(config: AppConfig) -> TestServer {
    let state = AppState::new(config);
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

/// Base64 PNG of a uniform grey image
fn png_base64(width: u32, height: u32, value: u8) -> String {
    let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    general_purpose::STANDARD.encode(bytes)
}

/// Helper to create msgpack bytes
fn msgpack_bytes<T: serde::Serialize>(value: &T) -> Bytes {
    Bytes::from(rmp_serde::to_vec_named(value).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "MoodMate");
}

#[tokio::test]
async fn test_root_endpoint() {
    let server = create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "MoodMate API");
    assert!(body["routes"].as_array().unwrap().len() >= 5);
}

#[tokio::test]
async fn test_regions_endpoint() {
    let server = create_test_server();

    let response = server.get("/regions").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let regions = body["regions"].as_array().unwrap();
    assert_eq!(regions.len(), 8);
    assert!(regions.contains(&json!("Global")));
    assert!(regions.contains(&json!("Japan")));
}

#[tokio::test]
async fn test_emotions_endpoint() {
    let server = create_test_server();

    let response = server.get("/emotions").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body["emotions"],
        json!(["angry", "disgust", "fear", "happy", "neutral", "sad", "surprise"])
    );
}

#[tokio::test]
async fn test_predict_text_happy() {
    let server = create_test_server();

    let response = server
        .post("/predict/text")
        .json(&json!({
            "text": "I am so happy and excited today",
            "region": "Korea"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["emotion"], "happy");
    assert_eq!(body["mood"], "happy");
    assert_eq!(body["confidence"], 1.0);
    assert_eq!(body["emotion_scores"]["happy"], 2);
    assert_eq!(body["emotion_scores"]["sad"], 0);
    assert_eq!(body["region_settings"]["genre"], "K-Pop");
    assert_eq!(body["region_settings"]["popular"], "BTS");
    assert_eq!(body["recommended_music"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_predict_text_without_keywords_is_neutral() {
    let server = create_test_server();

    let response = server
        .post("/predict/text")
        .json(&json!({ "text": "the weather today" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["emotion"], "neutral");
    assert_eq!(body["confidence"], 0.0);
    // Region defaults to Global
    assert_eq!(body["region_settings"]["popular"], "Universal");
}

#[tokio::test]
async fn test_predict_text_unknown_region_falls_back() {
    let server = create_test_server();

    let response = server
        .post("/predict/text")
        .json(&json!({ "text": "so sad", "region": "Atlantis" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["emotion"], "sad");
    assert_eq!(body["region_settings"]["language"], "English");
    assert_eq!(body["region_settings"]["popular"], "Universal");
}

#[tokio::test]
async fn test_predict_text_missing_field() {
    let server = create_test_server();

    let response = server
        .post("/predict/text")
        .json(&json!({ "region": "UK" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_predict_text_malformed_json() {
    let server = create_test_server();

    let response = server
        .post("/predict/text")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{not json"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_predict_image_black_square() {
    let server = create_test_server();

    let response = server
        .post("/predict/image")
        .json(&json!({ "image": png_base64(48, 48, 0) }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["emotion"], "sad");
    assert_eq!(body["mood"], "sad");
    assert!(body.get("confidence").is_none());
    assert!(body.get("degraded").is_none());

    let scores = body["emotion_scores"].as_object().unwrap();
    assert_eq!(scores.len(), 7);
    let total: f64 = scores.values().map(|v| v.as_f64().unwrap()).sum();
    assert!((total - 1.0).abs() < 1e-9);
    let neutral = scores["neutral"].as_f64().unwrap();
    assert!((neutral - 0.5 / 2.1).abs() < 1e-9);
}

#[tokio::test]
async fn test_predict_image_any_size() {
    let server = create_test_server();

    let response = server
        .post("/predict/image")
        .json(&json!({ "image": png_base64(120, 80, 128), "region": "India" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let emotion = body["emotion"].as_str().unwrap();
    assert!(["angry", "disgust", "fear", "happy", "neutral", "sad", "surprise"].contains(&emotion));
    assert_eq!(body["region_settings"]["genre"], "Bollywood");
}

#[tokio::test]
async fn test_predict_image_accepts_data_url() {
    let server = create_test_server();

    let payload = format!("data:image/png;base64,{}", png_base64(16, 16, 200));
    let response = server
        .post("/predict/image")
        .json(&json!({ "image": payload }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_predict_image_invalid_base64() {
    let server = create_test_server();

    let response = server
        .post("/predict/image")
        .json(&json!({ "image": "%%% not base64 %%%" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_IMAGE_FORMAT");
}

#[tokio::test]
async fn test_predict_image_not_an_image() {
    let server = create_test_server();

    let response = server
        .post("/predict/image")
        .json(&json!({ "image": general_purpose::STANDARD.encode(b"hello world") }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_IMAGE_FORMAT");
}

#[tokio::test]
async fn test_predict_image_missing_field() {
    let server = create_test_server();

    let response = server
        .post("/predict/image")
        .json(&json!({ "region": "UK" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_msgpack_request_and_response() {
    let server = create_test_server();

    let response = server
        .post("/predict/text")
        .content_type("application/msgpack")
        .add_header(ACCEPT, HeaderValue::from_static("application/msgpack"))
        .bytes(msgpack_bytes(&json!({ "text": "I feel great" })))
        .await;

    response.assert_status_ok();
    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("msgpack"));

    let body: Value = rmp_serde::from_slice(&response.as_bytes()[..]).unwrap();
    assert_eq!(body["emotion"], "happy");
}

#[tokio::test]
async fn test_body_limit() {
    let mut config = AppConfig::default();
    config.limits.max_body_bytes = 1024;
    let server = create_test_server_with(config);

    let response = server
        .post("/predict/image")
        .json(&json!({ "image": "A".repeat(4096) }))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_cors_preflight() {
    let server = create_test_server();

    let response = server
        .method(Method::OPTIONS, "/predict/text")
        .add_header(ORIGIN, HeaderValue::from_static("http://localhost:5173"))
        .add_header(
            ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .await;

    response.assert_status_ok();
    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .unwrap();
    assert_eq!(allow_origin, "*");
}

#[tokio::test]
async fn test_unknown_route() {
    let server = create_test_server();

    let response = server.get("/predict/audio").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_predictions_are_idempotent() {
    let server = create_test_server();
    let image = png_base64(64, 64, 90);

    let first: Value = server
        .post("/predict/image")
        .json(&json!({ "image": image }))
        .await
        .json();
    let second: Value = server
        .post("/predict/image")
        .json(&json!({ "image": image }))
        .await
        .json();

    assert_eq!(first, second);
}
