//! Pixel-level paste and clear primitives for sprite sheets.
//!
//! The sheet keeps its native channel mode: RGBA sources are composited into
//! it per pixel, converting to luminance where the sheet is grayscale.

use image::{DynamicImage, Luma, LumaA, Pixel, Rgb, Rgba, RgbaImage};

/// Fill a rectangle of the sheet with zero-valued pixels.
///
/// Zero is fully transparent in alpha-capable modes and black in opaque
/// modes. The rectangle is clipped to the sheet bounds.
pub(crate) fn clear_rect(sheet: &mut DynamicImage, left: u32, top: u32, width: u32, height: u32) {
    let (sheet_w, sheet_h) = match sheet {
        DynamicImage::ImageRgba8(img) => img.dimensions(),
        DynamicImage::ImageRgb8(img) => img.dimensions(),
        DynamicImage::ImageLumaA8(img) => img.dimensions(),
        DynamicImage::ImageLuma8(img) => img.dimensions(),
        _ => return,
    };
    let right = (left + width).min(sheet_w);
    let bottom = (top + height).min(sheet_h);

    for y in top..bottom {
        for x in left..right {
            match sheet {
                DynamicImage::ImageRgba8(img) => img.put_pixel(x, y, Rgba([0, 0, 0, 0])),
                DynamicImage::ImageRgb8(img) => img.put_pixel(x, y, Rgb([0, 0, 0])),
                DynamicImage::ImageLumaA8(img) => img.put_pixel(x, y, LumaA([0, 0])),
                DynamicImage::ImageLuma8(img) => img.put_pixel(x, y, Luma([0])),
                _ => {}
            }
        }
    }
}

/// Paste an RGBA image onto the sheet at a signed offset, respecting the
/// source's per-pixel transparency.
///
/// Fully opaque source pixels overwrite, partially transparent ones are
/// composited source-over, fully transparent ones leave the sheet untouched.
/// Pixels falling outside the sheet are clipped.
pub(crate) fn blit_rgba(sheet: &mut DynamicImage, src: &RgbaImage, offset_x: i64, offset_y: i64) {
    for (sx, sy, pixel) in src.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        let dest_x = offset_x + sx as i64;
        let dest_y = offset_y + sy as i64;
        if dest_x < 0 || dest_y < 0 {
            continue;
        }
        let (dest_x, dest_y) = (dest_x as u32, dest_y as u32);

        match sheet {
            DynamicImage::ImageRgba8(img) => {
                if dest_x < img.width() && dest_y < img.height() {
                    let dst = *img.get_pixel(dest_x, dest_y);
                    img.put_pixel(dest_x, dest_y, src_over(*pixel, dst));
                }
            }
            DynamicImage::ImageRgb8(img) => {
                if dest_x < img.width() && dest_y < img.height() {
                    let dst = *img.get_pixel(dest_x, dest_y);
                    let alpha = pixel[3] as f32 / 255.0;
                    let mix = |s: u8, d: u8| -> u8 {
                        (s as f32 * alpha + d as f32 * (1.0 - alpha)).round() as u8
                    };
                    img.put_pixel(
                        dest_x,
                        dest_y,
                        Rgb([mix(pixel[0], dst[0]), mix(pixel[1], dst[1]), mix(pixel[2], dst[2])]),
                    );
                }
            }
            DynamicImage::ImageLumaA8(img) => {
                if dest_x < img.width() && dest_y < img.height() {
                    let src_la = pixel.to_luma_alpha();
                    let dst = *img.get_pixel(dest_x, dest_y);
                    img.put_pixel(dest_x, dest_y, luma_over(src_la, dst));
                }
            }
            DynamicImage::ImageLuma8(img) => {
                if dest_x < img.width() && dest_y < img.height() {
                    let src_luma = pixel.to_luma_alpha();
                    let dst = *img.get_pixel(dest_x, dest_y);
                    let alpha = src_luma[1] as f32 / 255.0;
                    let value =
                        (src_luma[0] as f32 * alpha + dst[0] as f32 * (1.0 - alpha)).round() as u8;
                    img.put_pixel(dest_x, dest_y, Luma([value]));
                }
            }
            _ => {}
        }
    }
}

/// Porter-Duff source-over for a single RGBA pixel pair.
pub(crate) fn src_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let src_alpha = src[3] as f32 / 255.0;
    let dst_alpha = dst[3] as f32 / 255.0;

    // out_alpha = src_alpha + dst_alpha * (1 - src_alpha)
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    // out_color = (src_color * src_alpha + dst_color * dst_alpha * (1 - src_alpha)) / out_alpha
    let composite = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let result = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        (result.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    Rgba([
        composite(src[0], dst[0]),
        composite(src[1], dst[1]),
        composite(src[2], dst[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}

/// Same compositing in luma-alpha space.
fn luma_over(src: LumaA<u8>, dst: LumaA<u8>) -> LumaA<u8> {
    let src_alpha = src[1] as f32 / 255.0;
    let dst_alpha = dst[1] as f32 / 255.0;

    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha == 0.0 {
        return LumaA([0, 0]);
    }

    let s = src[0] as f32 / 255.0;
    let d = dst[0] as f32 / 255.0;
    let value = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;

    LumaA([
        (value.clamp(0.0, 1.0) * 255.0).round() as u8,
        (out_alpha * 255.0).round() as u8,
    ])
}
