//! Sprite sheet cell placement - compositing images into a fixed grid.
//!
//! A sheet is a single raster subdivided into `cols` x `rows` cells. One
//! composite call places one source image into one cell: optionally clears
//! the cell, optionally rotates the source, scales it to fit the cell while
//! preserving aspect ratio, centers it, and pastes it respecting
//! transparency.
//!
//! The sheet buffer is moved into [`composite`] and returned mutated. Taking
//! ownership makes the sequential dependency between placements explicit:
//! callers compositing several images into one sheet must thread the buffer
//! through each call, which rules out concurrent lost updates by
//! construction.

mod blend;
mod error;

pub use error::SheetError;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::rotate::rotate_expand;

/// Result type alias for sheet operations.
pub type Result<T> = std::result::Result<T, SheetError>;

/// Fixed grid over a sprite sheet.
///
/// Cell width and height are real-valued (`sheet_w / cols` need not divide
/// evenly) and are only truncated to integers at pixel-placement time, so
/// rounding error never compounds across cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGrid {
    sheet_w: u32,
    sheet_h: u32,
    cols: u32,
    rows: u32,
}

impl CellGrid {
    /// Create a grid over a `sheet_w` x `sheet_h` sheet with `cols` x `rows`
    /// cells.
    pub fn new(sheet_w: u32, sheet_h: u32, cols: u32, rows: u32) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(SheetError::InvalidGrid { cols, rows });
        }
        if sheet_w == 0 || sheet_h == 0 {
            return Err(SheetError::Format { what: "sheet" });
        }
        Ok(CellGrid { sheet_w, sheet_h, cols, rows })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Real-valued cell width in pixels.
    pub fn cell_width(&self) -> f64 {
        self.sheet_w as f64 / self.cols as f64
    }

    /// Real-valued cell height in pixels.
    pub fn cell_height(&self) -> f64 {
        self.sheet_h as f64 / self.rows as f64
    }

    /// Real-valued top-left corner of a cell.
    pub fn cell_origin(&self, cell_x: u32, cell_y: u32) -> (f64, f64) {
        (cell_x as f64 * self.cell_width(), cell_y as f64 * self.cell_height())
    }

    fn matches(&self, sheet: &DynamicImage) -> bool {
        sheet.width() == self.sheet_w && sheet.height() == self.sheet_h
    }
}

/// Per-request placement options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeOptions {
    /// Counter-clockwise rotation applied to the source before scaling,
    /// in degrees.
    pub rotation_degrees: f64,
    /// Clear the target cell before drawing.
    pub clear_cell: bool,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        CompositeOptions { rotation_degrees: 0.0, clear_cell: false }
    }
}

/// Composite `source` into cell (`cell_x`, `cell_y`) of `sheet`.
///
/// The sheet keeps its native channel mode when it is one of Rgba8, Rgb8,
/// LumaA8, or Luma8; any other mode is coerced to Rgba8 first. Clearing
/// fills the cell with transparent pixels in alpha-capable modes and zero
/// values otherwise, and always happens before drawing.
///
/// The source is scaled by `min(cell_w / w, cell_h / h)` so it fits the cell
/// on both axes without aspect distortion, resized with Lanczos resampling,
/// and centered in the cell with truncated integer offsets.
///
/// # Errors
///
/// * [`SheetError::GridMismatch`] if `grid` was built for other sheet
///   dimensions
/// * [`SheetError::CellOutOfRange`] if the cell indices fall outside the grid
/// * [`SheetError::Format`] if the source has zero area
pub fn composite(
    sheet: DynamicImage,
    source: &DynamicImage,
    cell_x: u32,
    cell_y: u32,
    grid: CellGrid,
    opts: CompositeOptions,
) -> Result<DynamicImage> {
    if !grid.matches(&sheet) {
        return Err(SheetError::GridMismatch {
            cols: grid.cols,
            rows: grid.rows,
            expected: (grid.sheet_w, grid.sheet_h),
            actual: (sheet.width(), sheet.height()),
        });
    }
    if cell_x >= grid.cols || cell_y >= grid.rows {
        return Err(SheetError::CellOutOfRange {
            cell_x,
            cell_y,
            cols: grid.cols,
            rows: grid.rows,
        });
    }

    let src = source.to_rgba8();
    if src.width() == 0 || src.height() == 0 {
        return Err(SheetError::Format { what: "source image" });
    }

    // Normalize exotic sheet modes once; the four common modes are kept
    let mut sheet = match sheet {
        s @ (DynamicImage::ImageRgba8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma8(_)) => s,
        other => DynamicImage::ImageRgba8(other.to_rgba8()),
    };

    let cell_w = grid.cell_width();
    let cell_h = grid.cell_height();
    let (cell_left, cell_top) = grid.cell_origin(cell_x, cell_y);

    // Clearing must precede drawing so it can never erase fresh content
    if opts.clear_cell {
        blend::clear_rect(
            &mut sheet,
            cell_left.trunc() as u32,
            cell_top.trunc() as u32,
            cell_w.trunc() as u32,
            cell_h.trunc() as u32,
        );
    }

    let src = if opts.rotation_degrees != 0.0 {
        rotate_expand(&src, opts.rotation_degrees)
    } else {
        src
    };

    // Uniform scale: fits the cell on both axes, preserves aspect ratio
    let (src_w, src_h) = src.dimensions();
    let scale = (cell_w / src_w as f64).min(cell_h / src_h as f64);
    let new_w = ((src_w as f64 * scale).round() as u32).max(1);
    let new_h = ((src_h as f64 * scale).round() as u32).max(1);
    let resized = if (new_w, new_h) == (src_w, src_h) {
        src
    } else {
        image::imageops::resize(&src, new_w, new_h, FilterType::Lanczos3)
    };

    let offset_x = (cell_left + (cell_w - new_w as f64) / 2.0).trunc() as i64;
    let offset_y = (cell_top + (cell_h - new_h as f64) / 2.0).trunc() as i64;
    blend::blit_rgba(&mut sheet, &resized, offset_x, offset_y);

    Ok(sheet)
}
