//! Criterion benchmarks for Cutsheet critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Cutout: mask application, thresholding, bounds, re-centering
//! - Sheet: cell compositing with scaling and rotation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};

use cutsheet::cutout::apply_mask_crop_center;
use cutsheet::sheet::{composite, CellGrid, CompositeOptions};

/// Source image with an off-center opaque blob in the mask.
fn make_pair(size: u32) -> (DynamicImage, DynamicImage) {
    let image = RgbaImage::from_pixel(size, size, Rgba([180, 90, 40, 255]));
    let mut mask = GrayImage::new(size, size);
    for y in size / 8..size / 2 {
        for x in size / 8..size / 2 {
            mask.put_pixel(x, y, Luma([255]));
        }
    }
    (DynamicImage::ImageRgba8(image), DynamicImage::ImageLuma8(mask))
}

fn bench_cutout(c: &mut Criterion) {
    let mut group = c.benchmark_group("cutout");
    for size in [128u32, 512] {
        let (image, mask) = make_pair(size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| apply_mask_crop_center(black_box(&image), black_box(&mask), 128).unwrap());
        });
    }
    group.finish();
}

fn bench_sheet(c: &mut Criterion) {
    let grid = CellGrid::new(1024, 1024, 8, 8).unwrap();
    let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        256,
        64,
        Rgba([20, 200, 60, 255]),
    ));

    let mut group = c.benchmark_group("sheet");
    for rotation in [0.0f64, 90.0, 37.5] {
        let opts = CompositeOptions { rotation_degrees: rotation, clear_cell: true };
        group.bench_with_input(
            BenchmarkId::new("composite", format!("rot{}", rotation)),
            &opts,
            |b, opts| {
                b.iter_batched(
                    || DynamicImage::ImageRgba8(RgbaImage::new(1024, 1024)),
                    |sheet| composite(sheet, black_box(&source), 3, 3, grid, *opts).unwrap(),
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_cutout, bench_sheet);
criterion_main!(benches);
