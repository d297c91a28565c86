//! Aspect-preserving fit of an image inside a bounding box.

use crate::OilError;

/// Calculate output dimensions that fit `native` inside the `requested` box.
///
/// The axis with the smaller scale factor wins and is set to the requested
/// size; the other axis is scaled by the same factor. When both factors are
/// equal the height drives the width. The scaled axis is truncated toward
/// zero (not rounded) and both axes are clamped to at least one pixel.
///
/// The result never exceeds the box. Upscaling is allowed: a small image is
/// grown until it touches the box.
///
/// # Errors
///
/// Returns `OilError::InvalidArgument` if any input dimension is zero.
///
/// # Example
///
/// ```
/// use oil_core::fit;
///
/// assert_eq!(fit(200, 100, 100, 50).unwrap(), (100, 50));
/// assert_eq!(fit(10000, 1, 10, 10).unwrap(), (10, 1));
/// ```
pub fn fit(
    native_width: u32,
    native_height: u32,
    requested_width: u32,
    requested_height: u32,
) -> Result<(u32, u32), OilError> {
    if requested_width == 0 || requested_height == 0 {
        return Err(OilError::InvalidArgument(format!(
            "requested dimensions must be > 0, got {}x{}",
            requested_width, requested_height
        )));
    }
    if native_width == 0 || native_height == 0 {
        return Err(OilError::InvalidArgument(format!(
            "native dimensions must be > 0, got {}x{}",
            native_width, native_height
        )));
    }

    let scale_x = requested_width as f64 / native_width as f64;
    let scale_y = requested_height as f64 / native_height as f64;

    let (width, height) = if scale_x < scale_y {
        (requested_width, (native_height as f64 * scale_x) as u32)
    } else {
        ((native_width as f64 * scale_y) as u32, requested_height)
    };

    Ok((width.max(1), height.max(1)))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
