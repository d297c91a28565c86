//! Image encoding for resize output.
//!
//! This module provides functionality for:
//! - Encoding RGB rasters to JPEG with configurable quality
//! - Encoding RGB rasters to PNG with configurable deflate effort
//! - Dispatching on the detected source format, so output mirrors input
//!
//! All encoders write into an in-memory buffer; nothing is streamed.
//!
//! # Examples
//!
//! ```ignore
//! use oil_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;
mod png;
mod types;

pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use types::EncodeError;

use image::RgbImage;

use crate::options::ResizeOptions;
use crate::ImageFormat;

/// Encode an RGB raster in `format`, taking quality settings from `options`.
pub fn encode_rgb(
    image: &RgbImage,
    format: ImageFormat,
    options: &ResizeOptions,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = image.dimensions();
    match format {
        ImageFormat::Jpeg => encode_jpeg(image.as_raw(), width, height, options.jpeg_quality),
        ImageFormat::Png => encode_png(image.as_raw(), width, height, options.png_compression),
    }
}
