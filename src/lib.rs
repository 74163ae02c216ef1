//! Cutsheet - asset-preparation transforms for sprite pipelines
//!
//! This library provides functionality to:
//! - Apply mask images to sources, threshold the alpha, and re-center the
//!   cropped content on the original canvas (cutouts)
//! - Composite images into cells of a fixed-grid sprite sheet, with optional
//!   rotation, aspect-preserving scaling, and cell clearing
//! - Batch-process folders of (image, mask) PNG pairs

pub mod batch;
pub mod cli;
pub mod cutout;
pub mod output;
pub mod rotate;
pub mod sheet;
