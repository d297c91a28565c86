//! Resampling to the fitted size and flattening onto an opaque raster.
//!
//! Sources with an alpha channel are composited onto the background colour
//! before resampling. Compositing is linear in the colour values, so this
//! gives the same result as resampling premultiplied pixels and compositing
//! afterwards, without letting the colour of fully transparent pixels bleed
//! into their neighbours.

use image::imageops;
use image::{DynamicImage, RgbImage, RgbaImage};

use crate::options::FilterType;
use crate::OilError;

/// Resample `image` to exactly `width` x `height` as opaque RGB.
///
/// # Errors
///
/// Returns `OilError::InvalidArgument` if either target dimension is zero.
pub fn resample(
    image: DynamicImage,
    width: u32,
    height: u32,
    filter: FilterType,
    background: [u8; 3],
) -> Result<RgbImage, OilError> {
    if width == 0 || height == 0 {
        return Err(OilError::InvalidArgument(format!(
            "target dimensions must be > 0, got {}x{}",
            width, height
        )));
    }

    let rgb = if image.color().has_alpha() {
        flatten_alpha(&image.into_rgba8(), background)
    } else {
        image.into_rgb8()
    };

    // Fast path: nothing to resample
    if rgb.dimensions() == (width, height) {
        return Ok(rgb);
    }

    Ok(imageops::resize(&rgb, width, height, filter.to_image_filter()))
}

/// Bytes held at once while resampling a raster `native_width` wide to
/// `width` x `height`: the RGBA f32 intermediate of the vertical pass plus
/// the RGB output.
pub fn resample_footprint(native_width: u32, width: u32, height: u32) -> u64 {
    let intermediate = (native_width as u64 * height as u64).saturating_mul(16);
    let output = (width as u64 * height as u64).saturating_mul(3);
    intermediate.saturating_add(output)
}

/// Composite an RGBA raster over a solid background, dropping alpha.
pub fn flatten_alpha(rgba: &RgbaImage, background: [u8; 3]) -> RgbImage {
    let (width, height) = rgba.dimensions();

    RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let a = a as u32;
        let blend = |c: u8, bg: u8| ((c as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8;
        image::Rgb([
            blend(r, background[0]),
            blend(g, background[1]),
            blend(b, background[2]),
        ])
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
