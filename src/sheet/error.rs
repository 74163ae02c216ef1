//! Error types for sprite sheet placement

use thiserror::Error;

/// Error when compositing into a sprite sheet cell.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SheetError {
    /// Input buffer cannot be used as a pixel source
    #[error("cannot use {what}: buffer has zero area")]
    Format { what: &'static str },

    /// Grid does not describe the sheet
    #[error("grid {cols}x{rows} for a {expected_w}x{expected_h} sheet does not match sheet dimensions {actual_w}x{actual_h}", expected_w = expected.0, expected_h = expected.1, actual_w = actual.0, actual_h = actual.1)]
    GridMismatch { cols: u32, rows: u32, expected: (u32, u32), actual: (u32, u32) },

    /// Grid counts must both be at least 1
    #[error("invalid grid: {cols}x{rows} cells")]
    InvalidGrid { cols: u32, rows: u32 },

    /// Cell indices outside the grid
    #[error("cell ({cell_x}, {cell_y}) is outside the {cols}x{rows} grid")]
    CellOutOfRange { cell_x: u32, cell_y: u32, cols: u32, rows: u32 },
}
