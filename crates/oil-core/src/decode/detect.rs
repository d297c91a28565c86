//! Format detection and decoder binding.

use std::io::{BufRead, Read, Seek};

use image::codecs::jpeg::JpegDecoder;
use image::codecs::png::PngDecoder;
use image::{ColorType, DynamicImage, ImageDecoder, ImageReader, Limits};

use super::{CachedInput, ImageFormat};
use crate::OilError;

/// A decoder bound to its input, positioned after the image header.
///
/// Width and height are known as soon as the decoder exists; pixel data is
/// only read by [`SourceDecoder::decode`].
pub enum SourceDecoder<R: BufRead + Seek> {
    Jpeg(JpegDecoder<R>),
    Png(PngDecoder<R>),
}

impl<R: BufRead + Seek> SourceDecoder<R> {
    /// Bind the decoder for `format` to `input` and parse the header.
    pub fn bind(format: ImageFormat, input: R) -> Result<Self, OilError> {
        let mut decoder = match format {
            ImageFormat::Jpeg => SourceDecoder::Jpeg(JpegDecoder::new(input)?),
            ImageFormat::Png => SourceDecoder::Png(PngDecoder::new(input)?),
        };
        decoder.set_limits(Limits::default())?;
        Ok(decoder)
    }

    pub fn format(&self) -> ImageFormat {
        match self {
            SourceDecoder::Jpeg(_) => ImageFormat::Jpeg,
            SourceDecoder::Png(_) => ImageFormat::Png,
        }
    }

    /// Native (width, height) as reported by the header.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            SourceDecoder::Jpeg(d) => d.dimensions(),
            SourceDecoder::Png(d) => d.dimensions(),
        }
    }

    pub fn color_type(&self) -> ColorType {
        match self {
            SourceDecoder::Jpeg(d) => d.color_type(),
            SourceDecoder::Png(d) => d.color_type(),
        }
    }

    fn set_limits(&mut self, limits: Limits) -> Result<(), OilError> {
        match self {
            SourceDecoder::Jpeg(d) => d.set_limits(limits)?,
            SourceDecoder::Png(d) => d.set_limits(limits)?,
        }
        Ok(())
    }

    /// Read the full raster.
    pub fn decode(self) -> Result<DynamicImage, OilError> {
        let image = match self {
            SourceDecoder::Jpeg(d) => DynamicImage::from_decoder(d)?,
            SourceDecoder::Png(d) => DynamicImage::from_decoder(d)?,
        };
        Ok(image)
    }
}

impl<R: BufRead + Seek> std::fmt::Debug for SourceDecoder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (width, height) = self.dimensions();
        f.debug_struct("SourceDecoder")
            .field("format", &self.format())
            .field("width", &width)
            .field("height", &height)
            .finish()
    }
}

/// Identify the format of `stream` and bind a decoder to it.
///
/// The stream is wrapped in a [`CachedInput`] pulling `chunk` bytes at a
/// time. Probing is delegated to the image crate's signature detection; only
/// JPEG and PNG are accepted.
///
/// # Errors
///
/// Returns `OilError::UnrecognizedFormat` if no supported format claims the
/// stream, `OilError::IoFailure` if the stream fails while the header is read,
/// and `OilError::Processing` if the header of a recognized format is corrupt.
pub fn detect<R: Read>(stream: R, chunk: usize) -> Result<SourceDecoder<CachedInput<R>>, OilError> {
    let input = CachedInput::new(stream, chunk);

    let reader = ImageReader::new(input).with_guessed_format()?;
    let format = reader
        .format()
        .and_then(ImageFormat::from_image_format)
        .ok_or(OilError::UnrecognizedFormat)?;

    let decoder = SourceDecoder::bind(format, reader.into_inner())?;
    let (width, height) = decoder.dimensions();
    let color = decoder.color_type();
    tracing::debug!(%format, width, height, ?color, "detected image format");

    Ok(decoder)
}
