//! Decoding of base64 image payloads into rasters.

use base64::{engine::general_purpose, Engine as _};
use image::DynamicImage;

use super::features::RasterImage;
use super::EmotionError;

/// Decode a base64 payload (optionally a `data:` URL) into a raster.
///
/// The source's channel layout and sample depth are kept as-is, so a 16-bit
/// PNG yields samples up to 65535.
pub fn decode_base64_image(payload: &str) -> Result<RasterImage, EmotionError> {
    // MIME-style payloads wrap lines; whitespace carries no data
    let encoded: String = strip_data_url(payload.trim())
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if encoded.is_empty() {
        return Err(EmotionError::InvalidImageFormat(
            "image payload is empty".to_string(),
        ));
    }

    let bytes = general_purpose::STANDARD
        .decode(&encoded)
        .map_err(|e| EmotionError::InvalidImageFormat(format!("invalid base64: {e}")))?;

    decode_image_bytes(&bytes)
}

/// Decode encoded image bytes (PNG, JPEG, GIF, BMP, WebP) into a raster.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<RasterImage, EmotionError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| EmotionError::InvalidImageFormat(format!("cannot decode image: {e}")))?;
    raster_from_dynamic(image)
}

fn strip_data_url(payload: &str) -> &str {
    if payload.starts_with("data:") {
        if let Some((_, data)) = payload.split_once(',') {
            return data.trim();
        }
    }
    payload
}

fn raster_from_dynamic(image: DynamicImage) -> Result<RasterImage, EmotionError> {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let channels = usize::from(image.color().channel_count());

    let samples: Vec<f32> = match image {
        DynamicImage::ImageLuma8(buf) => widen(buf.as_raw()),
        DynamicImage::ImageLumaA8(buf) => widen(buf.as_raw()),
        DynamicImage::ImageRgb8(buf) => widen(buf.as_raw()),
        DynamicImage::ImageRgba8(buf) => widen(buf.as_raw()),
        DynamicImage::ImageLuma16(buf) => widen(buf.as_raw()),
        DynamicImage::ImageLumaA16(buf) => widen(buf.as_raw()),
        DynamicImage::ImageRgb16(buf) => widen(buf.as_raw()),
        DynamicImage::ImageRgba16(buf) => widen(buf.as_raw()),
        DynamicImage::ImageRgb32F(buf) => buf.into_raw(),
        DynamicImage::ImageRgba32F(buf) => buf.into_raw(),
        other => {
            let rgb = other.to_rgb8();
            return RasterImage::new(width, height, 3, widen(rgb.as_raw()));
        }
    };

    RasterImage::new(width, height, channels, samples)
}

fn widen<T: Copy + Into<f32>>(raw: &[T]) -> Vec<f32> {
    raw.iter().map(|v| (*v).into()).collect()
}
