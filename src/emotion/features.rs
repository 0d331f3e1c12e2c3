//! Raster preprocessing and scalar feature extraction.
//!
//! Every input is reduced to a 48×48 grayscale grid (the FER2013 input size)
//! before any statistic is computed, so features are comparable across
//! source resolutions.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};
use imageproc::filter::filter3x3;
use serde::{Deserialize, Serialize};

use super::EmotionError;
use crate::math;

/// Side length of the preprocessed grid
pub const TARGET_SIZE: usize = 48;

/// Divisor applied to every sample (assumes 8-bit source depth)
const SAMPLE_SCALE: f64 = 255.0;

/// A raw raster: `height × width × channels` samples, row major with
/// interleaved channels.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    channels: usize,
    samples: Vec<f32>,
}

impl RasterImage {
    /// Build a raster, validating that the sample count matches the shape.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        samples: Vec<f32>,
    ) -> Result<Self, EmotionError> {
        if width == 0 || height == 0 {
            return Err(EmotionError::InvalidImageFormat(format!(
                "image has no pixels ({width}x{height})"
            )));
        }
        if channels == 0 {
            return Err(EmotionError::InvalidImageFormat(
                "image has no channels".to_string(),
            ));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| {
                EmotionError::InvalidImageFormat(format!(
                    "image dimensions overflow ({width}x{height}x{channels})"
                ))
            })?;
        if samples.len() != expected {
            return Err(EmotionError::InvalidImageFormat(format!(
                "expected {expected} samples for {width}x{height}x{channels}, got {}",
                samples.len()
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Single-channel raster
    pub fn gray(width: usize, height: usize, samples: Vec<f32>) -> Result<Self, EmotionError> {
        Self::new(width, height, 1, samples)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Collapse channels by their plain mean (not luminance weighted).
    fn to_grayscale(&self) -> Vec<f32> {
        if self.channels == 1 {
            return self.samples.clone();
        }
        let n = self.channels as f32;
        self.samples
            .chunks_exact(self.channels)
            .map(|px| px.iter().sum::<f32>() / n)
            .collect()
    }
}

/// Six scalar statistics describing a preprocessed face image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageFeatureVector {
    /// Signed sum of the axis-1 Sobel response over the grid
    pub edge_intensity: f64,
    /// Mean sample value
    pub brightness: f64,
    /// Population variance of the samples
    pub brightness_variance: f64,
    /// Population standard deviation of the samples
    pub contrast: f64,
    /// Sum of |axis-0 Sobel response|
    pub h_gradient: f64,
    /// Sum of |axis-1 Sobel response|
    pub v_gradient: f64,
}

impl ImageFeatureVector {
    /// True when every feature is a finite number
    pub fn is_finite(&self) -> bool {
        [
            self.edge_intensity,
            self.brightness,
            self.brightness_variance,
            self.contrast,
            self.h_gradient,
            self.v_gradient,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Grayscale, resize to 48×48 and scale by 1/255.
///
/// Values are not clamped, so sources deeper than 8 bits end up above 1.0.
pub fn preprocess(image: &RasterImage) -> Result<Vec<f64>, EmotionError> {
    let gray = image.to_grayscale();
    let resized = resize_to_target(gray, image.width, image.height)?;
    Ok(resized
        .into_iter()
        .map(|v| f64::from(v) / SAMPLE_SCALE)
        .collect())
}

fn resize_to_target(gray: Vec<f32>, width: usize, height: usize) -> Result<Vec<f32>, EmotionError> {
    if width == TARGET_SIZE && height == TARGET_SIZE {
        return Ok(gray);
    }

    let too_large =
        || EmotionError::InvalidImageFormat(format!("image too large ({width}x{height})"));
    let w = u32::try_from(width).map_err(|_| too_large())?;
    let h = u32::try_from(height).map_err(|_| too_large())?;

    // The resampler clamps f32 samples to [0, 1]; scale into that range and back.
    let peak = gray.iter().fold(1.0f32, |acc, v| acc.max(v.abs()));
    let scaled: Vec<f32> = gray.into_iter().map(|v| v / peak).collect();

    let buffer = ImageBuffer::<Luma<f32>, Vec<f32>>::from_raw(w, h, scaled).ok_or_else(|| {
        EmotionError::InvalidImageFormat("sample buffer does not match dimensions".to_string())
    })?;
    let target = TARGET_SIZE as u32;
    let resized = imageops::resize(&buffer, target, target, FilterType::CatmullRom);

    Ok(resized.into_raw().into_iter().map(|v| v * peak).collect())
}

type GrayF32 = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Row-major 3×3 Sobel kernels, applied as a correlation
const K_SOBEL_ROWS: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];
const K_SOBEL_COLS: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    /// Derivative across rows
    Rows,
    /// Derivative across columns
    Cols,
}

fn gray_buffer(grid: &[f64], size: usize) -> Result<GrayF32, EmotionError> {
    let side = u32::try_from(size)
        .map_err(|_| EmotionError::InvalidImageFormat(format!("grid too large ({size})")))?;
    let samples = grid.iter().map(|v| *v as f32).collect();
    GrayF32::from_raw(side, side, samples).ok_or_else(|| {
        EmotionError::InvalidImageFormat("grid does not match its side length".to_string())
    })
}

/// 3×3 Sobel response along `axis`. Borders repeat the edge sample.
fn sobel(gray: &GrayF32, axis: Axis) -> Vec<f64> {
    let kernel = match axis {
        Axis::Rows => &K_SOBEL_ROWS,
        Axis::Cols => &K_SOBEL_COLS,
    };
    filter3x3::<_, f32, f32>(gray, kernel)
        .into_raw()
        .into_iter()
        .map(f64::from)
        .collect()
}

/// Compute the six scalar features of an image.
pub fn extract_features(image: &RasterImage) -> Result<ImageFeatureVector, EmotionError> {
    let grid = preprocess(image)?;
    features_from_grid(&grid, TARGET_SIZE)
}

fn features_from_grid(grid: &[f64], size: usize) -> Result<ImageFeatureVector, EmotionError> {
    let gray = gray_buffer(grid, size)?;

    // Signed sum of a separate column-derivative pass
    let edge_intensity = sobel(&gray, Axis::Cols).iter().sum::<f64>();

    let brightness = math::mean(grid);
    let brightness_variance = math::variance(grid);
    let contrast = math::std_dev(grid);

    let h_gradient = math::abs_sum(&sobel(&gray, Axis::Rows));
    let v_gradient = math::abs_sum(&sobel(&gray, Axis::Cols));

    Ok(ImageFeatureVector {
        edge_intensity,
        brightness,
        brightness_variance,
        contrast,
        h_gradient,
        v_gradient,
    })
}
