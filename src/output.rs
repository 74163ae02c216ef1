//! PNG decode/encode for the pipelines.
//!
//! PNG keeps the alpha channel lossless on the round trip, which the cutout
//! pipeline depends on (its outputs are meaningless without the binary
//! alpha).

use std::path::Path;

use image::{DynamicImage, RgbaImage};
use thiserror::Error;

/// Error type for codec operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode a raster file into a pixel buffer.
pub fn load_image(path: &Path) -> Result<DynamicImage, OutputError> {
    Ok(image::open(path)?)
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    ensure_parent(path)?;
    image.save(path)?;
    Ok(())
}

/// Save a sheet buffer in its native channel mode, creating parent
/// directories as needed.
pub fn save_sheet(sheet: &DynamicImage, path: &Path) -> Result<(), OutputError> {
    ensure_parent(path)?;
    sheet.save(path)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
