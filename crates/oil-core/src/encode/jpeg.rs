//! JPEG encoding of resized output.
//!
//! Baseline JPEG from the `image` crate's encoder. Quality defaults to 90
//! (see [`crate::options::DEFAULT_JPEG_QUALITY`]).

use image::codecs::jpeg::JpegEncoder;

use super::types::{write_rgb8, EncodeError};

/// Encode packed RGB pixels as JPEG.
///
/// `quality` is clamped to 1..=100. `pixels` must hold exactly
/// `width * height * 3` bytes.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100));
    write_rgb8(encoder, "JPEG", pixels, width, height)?;
    Ok(out)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
