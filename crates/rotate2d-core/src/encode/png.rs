//! PNG export of normalized previews.
//!
//! This module quantizes a normalized [`PreviewImage`] to 8-bit RGB and
//! encodes it with the `image` crate's PNG encoder, so a chosen alignment
//! can be saved alongside its parameter file.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::render::PreviewImage;

/// Errors that can occur during preview export.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: usize, height: usize },

    /// Dimensions don't fit the encoder's 32-bit size fields
    #[error("Preview too large to encode: {width}x{height}")]
    TooLarge { width: usize, height: usize },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Quantize normalized `[0, 1]` values to bytes, clamping anything outside.
pub fn to_rgb8(preview: &PreviewImage) -> Vec<u8> {
    preview
        .data
        .iter()
        .map(|&v| {
            if v.is_nan() {
                0
            } else {
                (v.clamp(0.0, 1.0) * 255.0).round() as u8
            }
        })
        .collect()
}

/// Convert to an `image::RgbImage` for further processing.
///
/// Returns `None` if the dimensions don't fit in `u32`.
pub fn to_rgb_image(preview: &PreviewImage) -> Option<image::RgbImage> {
    let width = u32::try_from(preview.width).ok()?;
    let height = u32::try_from(preview.height).ok()?;
    image::RgbImage::from_raw(width, height, to_rgb8(preview))
}

/// Encode a normalized preview as PNG bytes.
///
/// # Example
///
/// ```ignore
/// let rendering = session.render(Plane::XY)?;
/// let png = encode_png(&rendering.image)?;
/// std::fs::write("preview.png", png)?;
/// ```
pub fn encode_png(preview: &PreviewImage) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (preview.width, preview.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(EncodeError::TooLarge { width, height });
    };

    let pixels = to_rgb8(preview);
    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(&pixels, w, h, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
