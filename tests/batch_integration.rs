//! End-to-end tests for the batch cutout driver.
//!
//! Writes real PNG files into a scratch directory, runs the batch, and
//! checks the written outputs plus the report accounting.

use std::fs;
use std::path::Path;

use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};

use cutsheet::batch::{run_batch, PairSource, SuffixPairing};
use cutsheet::cutout::content_bounds;

fn write_png(path: &Path, image: &RgbaImage) {
    image.save(path).expect("write png");
}

fn write_mask(path: &Path, mask: &GrayImage) {
    mask.save(path).expect("write mask");
}

/// Mask with an opaque rectangle on a zero background.
fn square_mask(size: u32, left: u32, top: u32, side: u32) -> GrayImage {
    let mut mask = GrayImage::new(size, size);
    for y in top..top + side {
        for x in left..left + side {
            mask.put_pixel(x, y, Luma([255]));
        }
    }
    mask
}

#[test]
fn test_batch_processes_pairs_and_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("output");

    let white = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
    write_png(&dir.path().join("ship.png"), &white);
    write_mask(&dir.path().join("ship_mask.png"), &square_mask(64, 0, 0, 16));

    write_png(&dir.path().join("rock.png"), &white);
    write_mask(&dir.path().join("rock_mask.png"), &square_mask(64, 40, 40, 8));

    // No mask for this one: skipped, not failed
    write_png(&dir.path().join("cloud.png"), &white);

    let report = run_batch(&SuffixPairing::new(dir.path()), &out, 128).unwrap();

    assert_eq!(report.processed, vec!["rock".to_string(), "ship".to_string()]);
    assert_eq!(report.skipped, vec!["cloud".to_string()]);
    assert!(report.failed.is_empty());
    assert!(report.empty.is_empty());

    assert!(out.join("ship.png").exists());
    assert!(out.join("rock.png").exists());
    assert!(!out.join("cloud.png").exists());

    // Content is re-centered: the 16x16 corner square of "ship" now sits at
    // (24,24)-(39,39) on the unchanged 64x64 canvas
    let ship = image::open(out.join("ship.png")).unwrap().to_rgba8();
    assert_eq!(ship.dimensions(), (64, 64));
    let b = content_bounds(&ship).unwrap();
    assert_eq!((b.left, b.top, b.right, b.bottom), (24, 24, 39, 39));
    assert!(ship.pixels().all(|p| p[3] == 0 || p[3] == 255));
}

#[test]
fn test_batch_isolates_per_image_failures() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("output");

    let white = RgbaImage::from_pixel(32, 32, Rgba([255, 255, 255, 255]));

    // Good pair
    write_png(&dir.path().join("good.png"), &white);
    write_mask(&dir.path().join("good_mask.png"), &square_mask(32, 8, 8, 8));

    // Mask with wrong dimensions: pipeline error for this pair only
    write_png(&dir.path().join("bad.png"), &white);
    write_mask(&dir.path().join("bad_mask.png"), &square_mask(16, 0, 0, 8));

    // Corrupt "PNG": decode error for this pair only
    fs::write(dir.path().join("corrupt.png"), b"not a png").unwrap();
    write_mask(&dir.path().join("corrupt_mask.png"), &square_mask(32, 0, 0, 8));

    let report = run_batch(&SuffixPairing::new(dir.path()), &out, 128).unwrap();

    assert_eq!(report.processed, vec!["good".to_string()]);
    assert_eq!(report.failed.len(), 2);
    let failed_ids: Vec<&str> = report.failed.iter().map(|f| f.id.as_str()).collect();
    assert!(failed_ids.contains(&"bad"));
    assert!(failed_ids.contains(&"corrupt"));
    assert!(out.join("good.png").exists());
}

#[test]
fn test_batch_all_zero_mask_is_empty_not_failed() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("output");

    let white = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]));
    write_png(&dir.path().join("blank.png"), &white);
    write_mask(&dir.path().join("blank_mask.png"), &GrayImage::new(16, 16));

    let report = run_batch(&SuffixPairing::new(dir.path()), &out, 128).unwrap();

    assert_eq!(report.processed, vec!["blank".to_string()]);
    assert_eq!(report.empty, vec!["blank".to_string()]);
    assert!(report.failed.is_empty());

    let written = image::open(out.join("blank.png")).unwrap().to_rgba8();
    assert_eq!(written.dimensions(), (16, 16));
    assert!(written.pixels().all(|p| p[3] == 0));
}

#[test]
fn test_paired_scan_via_trait_object() {
    // The pairing policy is an abstraction; the driver only sees the trait
    let dir = tempfile::tempdir().unwrap();
    let white = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]));
    write_png(&dir.path().join("a.png"), &white);
    write_mask(&dir.path().join("a_mask.png"), &square_mask(8, 0, 0, 4));

    let source: Box<dyn PairSource> = Box::new(SuffixPairing::new(dir.path()));
    let scan = source.scan().unwrap();
    assert_eq!(scan.pairs.len(), 1);
    assert_eq!(scan.pairs[0].id, "a");
}

#[test]
fn test_grayscale_mask_file_round_trip() {
    // Masks saved as RGBA PNGs still coerce to luminance correctly
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("output");

    let white = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]));
    write_png(&dir.path().join("s.png"), &white);

    let mut rgba_mask = RgbaImage::new(16, 16);
    for y in 4..12 {
        for x in 4..12 {
            rgba_mask.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
    write_png(&dir.path().join("s_mask.png"), &rgba_mask);

    let report = run_batch(&SuffixPairing::new(dir.path()), &out, 128).unwrap();
    assert_eq!(report.processed, vec!["s".to_string()]);

    let result = image::open(out.join("s.png")).unwrap().to_rgba8();
    let b = content_bounds(&result).unwrap();
    assert_eq!((b.width(), b.height()), (8, 8));
}

#[test]
fn test_decoded_luma_input_is_coerced() {
    // A grayscale source image goes through the RGBA coercion path
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("output");

    let gray = GrayImage::from_pixel(8, 8, Luma([100]));
    DynamicImage::ImageLuma8(gray).save(dir.path().join("g.png")).unwrap();
    write_mask(&dir.path().join("g_mask.png"), &square_mask(8, 2, 2, 4));

    let report = run_batch(&SuffixPairing::new(dir.path()), &out, 200).unwrap();
    assert_eq!(report.processed, vec!["g".to_string()]);

    let result = image::open(out.join("g.png")).unwrap().to_rgba8();
    let b = content_bounds(&result).unwrap();
    assert_eq!((b.width(), b.height()), (4, 4));
    // Luma 100 expands to gray RGB
    let center = result.get_pixel(b.left + 1, b.top + 1);
    assert_eq!(*center, Rgba([100, 100, 100, 255]));
}
