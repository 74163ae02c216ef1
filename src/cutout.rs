//! Mask-crop-center pipeline for cutout images.
//!
//! Takes a source image and a paired mask, replaces the source alpha with the
//! mask luminance, binarizes the alpha at a threshold, crops to the remaining
//! content, and re-centers that content on a transparent canvas of the
//! original size. Output canvas dimensions therefore never vary across a
//! batch, which downstream consumers rely on.

use image::{DynamicImage, RgbaImage};
use thiserror::Error;

/// Error when running the cutout pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CutoutError {
    /// Input buffer cannot be coerced to the required channel mode
    #[error("cannot use {what}: buffer has zero area")]
    Format { what: &'static str },

    /// Mask and source pixel dimensions differ
    #[error("mask dimensions {mask_w}x{mask_h} do not match image dimensions {image_w}x{image_h}", mask_w = mask.0, mask_h = mask.1, image_w = image.0, image_h = image.1)]
    DimensionMismatch { image: (u32, u32), mask: (u32, u32) },
}

/// Inclusive pixel bounds of the non-transparent content of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentBounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl ContentBounds {
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

/// Result of the cutout pipeline.
///
/// `content_bounds` is `None` when the thresholded mask left no opaque pixel.
/// That case is not an error: `image` is then the all-transparent canvas and
/// callers may want to log it as an empty-content warning.
#[derive(Debug, Clone)]
pub struct CutoutOutcome {
    /// RGBA image, same dimensions as the input, alpha strictly 0 or 255.
    pub image: RgbaImage,
    /// Bounds of the content that was cropped and re-centered.
    pub content_bounds: Option<ContentBounds>,
}

/// Apply a mask to an image, binarize the alpha, crop to content, and
/// re-center the content on a transparent canvas of the original size.
///
/// The mask is coerced to 8-bit luminance and replaces the source alpha
/// channel wholesale. Alpha values at or above `threshold` become 255,
/// everything below becomes 0 - a hard cut with no intermediate values.
/// This quantization is intentionally lossy: consumers depend on hard-edged
/// cutouts, so graded mask transparency is deliberately not preserved.
///
/// # Errors
///
/// * [`CutoutError::Format`] if either buffer has zero area
/// * [`CutoutError::DimensionMismatch`] if mask and image dimensions differ
pub fn apply_mask_crop_center(
    image: &DynamicImage,
    mask: &DynamicImage,
    threshold: u8,
) -> Result<CutoutOutcome, CutoutError> {
    let mut rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(CutoutError::Format { what: "source image" });
    }

    let luma = mask.to_luma8();
    if luma.dimensions() == (0, 0) {
        return Err(CutoutError::Format { what: "mask image" });
    }
    if luma.dimensions() != (width, height) {
        return Err(CutoutError::DimensionMismatch {
            image: (width, height),
            mask: luma.dimensions(),
        });
    }

    // Replace the alpha channel with the mask luminance, then binarize
    for (pixel, mask_pixel) in rgba.pixels_mut().zip(luma.pixels()) {
        pixel[3] = mask_pixel[0];
    }
    threshold_alpha(&mut rgba, threshold);

    let bounds = content_bounds(&rgba);
    let Some(b) = bounds else {
        // Nothing survived the threshold: pass the all-transparent canvas
        // through unchanged
        return Ok(CutoutOutcome { image: rgba, content_bounds: None });
    };

    let cropped = image::imageops::crop_imm(&rgba, b.left, b.top, b.width(), b.height()).to_image();

    // Fresh fully-transparent canvas of the *original* size, content centered
    // with floor integer offsets
    let mut canvas = RgbaImage::new(width, height);
    let offset_x = (width - cropped.width()) / 2;
    let offset_y = (height - cropped.height()) / 2;
    for y in 0..cropped.height() {
        for x in 0..cropped.width() {
            canvas.put_pixel(offset_x + x, offset_y + y, *cropped.get_pixel(x, y));
        }
    }

    Ok(CutoutOutcome { image: canvas, content_bounds: Some(b) })
}

/// Binarize the alpha channel in place: `alpha >= threshold` becomes 255,
/// everything below becomes 0.
///
/// Idempotent for any threshold in 1..=255. Note that `threshold == 0` makes
/// every pixel fully opaque, since every alpha value satisfies `a >= 0`.
pub fn threshold_alpha(image: &mut RgbaImage, threshold: u8) {
    for pixel in image.pixels_mut() {
        pixel[3] = if pixel[3] >= threshold { 255 } else { 0 };
    }
}

/// Compute the minimal rectangle containing all non-transparent pixels.
///
/// Returns `None` when every pixel has alpha 0.
pub fn content_bounds(image: &RgbaImage) -> Option<ContentBounds> {
    let mut bounds: Option<ContentBounds> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        match &mut bounds {
            None => {
                bounds = Some(ContentBounds { left: x, top: y, right: x, bottom: y });
            }
            Some(b) => {
                b.left = b.left.min(x);
                b.top = b.top.min(y);
                b.right = b.right.max(x);
                b.bottom = b.bottom.max(y);
            }
        }
    }
    bounds
}
