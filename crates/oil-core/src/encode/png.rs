//! PNG encoding of resized output.
//!
//! Output is always 8-bit RGB: the resizer never writes an alpha channel.

use image::codecs::png::{FilterType as PngFilter, PngEncoder};

use super::types::{write_rgb8, EncodeError};
use crate::options::PngCompression;

/// Encode RGB pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `compression` - Deflate effort
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    compression: PngCompression,
) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        &mut out,
        compression.to_image_compression(),
        PngFilter::Adaptive,
    );
    write_rgb8(encoder, "PNG", pixels, width, height)?;
    Ok(out)
}
