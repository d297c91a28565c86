//! Tunables for the resample and encode stages.

use serde::{Deserialize, Serialize};

/// Default JPEG quality used when re-encoding.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Default size of the chunks pulled from the input stream.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Largest chunk pulled from the input stream in one read.
pub const MAX_BUFFER_SIZE: usize = 1 << 20;

/// Filter type for resampling.
///
/// Every variant is a smoothing kernel; pixel replication is not offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterType {
    /// Bilinear (tent) interpolation, widened to cover the source area when
    /// downscaling.
    #[default]
    Bilinear,
    /// Catmull-Rom cubic interpolation (sharper than bilinear).
    CatmullRom,
    /// Lanczos3 windowed sinc (slowest, sharpest).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::CatmullRom => image::imageops::FilterType::CatmullRom,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// PNG deflate effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PngCompression {
    Fast,
    #[default]
    Default,
    Best,
}

impl PngCompression {
    pub fn to_image_compression(self) -> image::codecs::png::CompressionType {
        match self {
            PngCompression::Fast => image::codecs::png::CompressionType::Fast,
            PngCompression::Default => image::codecs::png::CompressionType::Default,
            PngCompression::Best => image::codecs::png::CompressionType::Best,
        }
    }
}

/// Options applied by a job when it emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeOptions {
    /// Resampling kernel.
    pub filter: FilterType,
    /// JPEG quality (1-100), only used for JPEG sources.
    pub jpeg_quality: u8,
    /// Deflate effort, only used for PNG sources.
    pub png_compression: PngCompression,
    /// RGB colour that transparent pixels are composited onto.
    pub background: [u8; 3],
    /// Bytes pulled from the input stream per read.
    pub buffer_size: usize,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            filter: FilterType::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            png_compression: PngCompression::default(),
            background: [0, 0, 0],
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ResizeOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Set the JPEG quality; values outside 1-100 are clamped.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn with_png_compression(mut self, compression: PngCompression) -> Self {
        self.png_compression = compression;
        self
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    /// Set the read chunk size, kept within 1..=`MAX_BUFFER_SIZE`.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.clamp(1, MAX_BUFFER_SIZE);
        self
    }
}
