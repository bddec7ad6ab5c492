//! Image transform engine.
//!
//! Pure in-memory pipeline: decode source bytes, scale to the target width
//! preserving aspect ratio, re-encode in the negotiated output format. No
//! cache or filesystem awareness, which keeps it unit-testable with byte
//! buffers.
//!
//! Quality applies to JPEG output. The WebP encoder here is lossless, so for
//! WebP the quality parameter is accepted but has no effect (it still
//! participates in cache keys, keeping keys uniform across formats).

use std::io::Cursor;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType};

use crate::error::TransformError;

use super::OutputFormat;

/// Default target width in pixels when the request does not specify one.
pub const DEFAULT_WIDTH: u32 = 400;

/// Default encoding quality (1-100).
pub const DEFAULT_QUALITY: u8 = 80;

/// Minimum allowed quality.
pub const MIN_QUALITY: u8 = 1;

/// Maximum allowed quality.
pub const MAX_QUALITY: u8 = 100;

/// Clamp quality to the valid 1-100 range.
#[inline]
pub fn clamp_quality(quality: u8) -> u8 {
    quality.clamp(MIN_QUALITY, MAX_QUALITY)
}

/// Decodes, resizes, and re-encodes images.
#[derive(Debug, Clone, Default)]
pub struct ResizeEngine {
    // Stateless; the struct leaves room for encoder settings later
}

impl ResizeEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self {}
    }

    /// Transform source bytes into a derivative at `width` in `format`.
    ///
    /// The output width equals `width` exactly; height is computed
    /// proportionally (rounded, at least 1). Images narrower than `width`
    /// are scaled up, matching the behavior of the upstream ingestion
    /// pipeline's consumers.
    ///
    /// # Errors
    ///
    /// [`TransformError::Decode`] if the bytes are not a decodable image,
    /// [`TransformError::Encode`] if the derivative cannot be produced.
    pub fn transform(
        &self,
        source: &[u8],
        width: u32,
        format: OutputFormat,
        quality: u8,
    ) -> Result<Bytes, TransformError> {
        let quality = clamp_quality(quality);

        let img = image::load_from_memory(source).map_err(|e| TransformError::Decode {
            message: e.to_string(),
        })?;

        let resized = scale_to_width(&img, width);

        match format {
            OutputFormat::Jpeg => encode_jpeg(&resized, quality),
            OutputFormat::Webp => encode_webp(&resized),
        }
    }

    /// Dimensions of an image without transforming it. Useful for tests and
    /// validation.
    pub fn dimensions(&self, source: &[u8]) -> Result<(u32, u32), TransformError> {
        let img = image::load_from_memory(source).map_err(|e| TransformError::Decode {
            message: e.to_string(),
        })?;
        Ok((img.width(), img.height()))
    }
}

/// Scale so the output width equals `width`, height proportional.
fn scale_to_width(img: &DynamicImage, width: u32) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    if w == width {
        return img.clone();
    }

    let height = ((width as u64 * h as u64 + w as u64 / 2) / w as u64).max(1) as u32;
    // Lanczos3 matches the default filter of the original pipeline
    img.resize_exact(width, height, FilterType::Lanczos3)
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Bytes, TransformError> {
    // JPEG has no alpha channel; flatten first
    let rgb = img.to_rgb8();

    let mut output = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut output, quality);
    encoder
        .encode_image(&rgb)
        .map_err(|e| TransformError::Encode {
            message: e.to_string(),
        })?;

    Ok(Bytes::from(output))
}

fn encode_webp(img: &DynamicImage) -> Result<Bytes, TransformError> {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    let mut output = Cursor::new(Vec::new());
    WebPEncoder::new_lossless(&mut output)
        .encode(rgba.as_raw(), w, h, ExtendedColorType::Rgba8)
        .map_err(|e| TransformError::Encode {
            message: e.to_string(),
        })?;

    Ok(Bytes::from(output.into_inner()))
}
