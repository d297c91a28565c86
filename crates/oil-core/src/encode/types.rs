//! Error type shared by the encoders.

use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

/// Errors that can occur while encoding a raster.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the raster
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: &'static str,
        message: String,
    },
}

/// Check that `pixels` holds exactly `width * height` RGB pixels.
fn validate_rgb(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}

/// Validate `pixels` and write them through `encoder` as 8-bit RGB.
pub(super) fn write_rgb8<E: ImageEncoder>(
    encoder: E,
    format: &'static str,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<(), EncodeError> {
    validate_rgb(pixels, width, height)?;
    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format,
            message: e.to_string(),
        })
}
