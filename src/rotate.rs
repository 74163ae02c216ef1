//! Arbitrary-angle image rotation with canvas expansion.
//!
//! Rotation is counter-clockwise, in degrees. The output canvas is expanded
//! to the bounding box of the rotated image so no corner is ever clipped;
//! uncovered pixels are fully transparent. Quarter turns map to the exact
//! lossless rotations, everything else is inverse-mapped with bilinear
//! sampling in premultiplied alpha.

use image::{Rgba, RgbaImage};

/// Dimensions of the axis-aligned bounding box of a `width` x `height` image
/// rotated counter-clockwise by `degrees`.
pub fn rotated_bounds(width: u32, height: u32, degrees: f64) -> (u32, u32) {
    let radians = degrees.to_radians();
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
    let w = width as f64;
    let h = height as f64;
    let out_w = (w * cos + h * sin).round() as u32;
    let out_h = (w * sin + h * cos).round() as u32;
    (out_w.max(1), out_h.max(1))
}

/// Rotate an image counter-clockwise by `degrees`, expanding the canvas to
/// fit the whole rotated image.
pub fn rotate_expand(image: &RgbaImage, degrees: f64) -> RgbaImage {
    let turn = degrees.rem_euclid(360.0);
    if turn == 0.0 {
        return image.clone();
    }
    // Exact quarter turns: imageops names its rotations clockwise, so a
    // counter-clockwise quarter turn is rotate270
    if turn == 90.0 {
        return image::imageops::rotate270(image);
    }
    if turn == 180.0 {
        return image::imageops::rotate180(image);
    }
    if turn == 270.0 {
        return image::imageops::rotate90(image);
    }

    let (width, height) = image.dimensions();
    let (out_w, out_h) = rotated_bounds(width, height, turn);
    let radians = turn.to_radians();
    let (sin, cos) = radians.sin_cos();

    let src_cx = width as f64 / 2.0;
    let src_cy = height as f64 / 2.0;
    let out_cx = out_w as f64 / 2.0;
    let out_cy = out_h as f64 / 2.0;

    let mut out = RgbaImage::new(out_w, out_h);
    for y in 0..out_h {
        for x in 0..out_w {
            let dx = x as f64 + 0.5 - out_cx;
            let dy = y as f64 + 0.5 - out_cy;
            // Inverse mapping: rotate the output offset clockwise back into
            // source space (screen y grows downward)
            let src_x = src_cx + dx * cos - dy * sin;
            let src_y = src_cy + dx * sin + dy * cos;
            let pixel = sample_bilinear(image, src_x - 0.5, src_y - 0.5);
            if pixel[3] != 0 {
                out.put_pixel(x, y, pixel);
            }
        }
    }
    out
}

/// Bilinear sample at fractional pixel-index coordinates.
///
/// Interpolates in premultiplied alpha so transparent neighbors do not bleed
/// their (meaningless) color into the result. Coordinates outside the image
/// contribute fully transparent pixels.
fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let x0 = x.floor();
    let y0 = y.floor();
    let tx = x - x0;
    let ty = y - y0;

    let fetch = |ix: i64, iy: i64| -> [f64; 4] {
        if ix < 0 || iy < 0 || ix >= image.width() as i64 || iy >= image.height() as i64 {
            return [0.0; 4];
        }
        let p = image.get_pixel(ix as u32, iy as u32);
        let a = p[3] as f64 / 255.0;
        // Premultiplied channels
        [p[0] as f64 * a, p[1] as f64 * a, p[2] as f64 * a, a]
    };

    let p00 = fetch(x0 as i64, y0 as i64);
    let p10 = fetch(x0 as i64 + 1, y0 as i64);
    let p01 = fetch(x0 as i64, y0 as i64 + 1);
    let p11 = fetch(x0 as i64 + 1, y0 as i64 + 1);

    let mut blended = [0.0f64; 4];
    for c in 0..4 {
        let top = p00[c] * (1.0 - tx) + p10[c] * tx;
        let bottom = p01[c] * (1.0 - tx) + p11[c] * tx;
        blended[c] = top * (1.0 - ty) + bottom * ty;
    }

    let alpha = blended[3];
    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    // Unpremultiply
    Rgba([
        (blended[0] / alpha).clamp(0.0, 255.0).round() as u8,
        (blended[1] / alpha).clamp(0.0, 255.0).round() as u8,
        (blended[2] / alpha).clamp(0.0, 255.0).round() as u8,
        (alpha * 255.0).clamp(0.0, 255.0).round() as u8,
    ])
}
