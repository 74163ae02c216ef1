//! Batch cutout driver - pairs images with masks and processes a folder.
//!
//! Pairing is an explicit abstraction ([`PairSource`]) rather than filename
//! string matching baked into the pixel pipeline: the bundled
//! [`SuffixPairing`] implements the `<stem>.png` / `<stem>_mask.png`
//! convention, and alternative policies can be swapped in without touching
//! the pipeline.
//!
//! Failure isolation is the driver's contract: one undecodable or mismatched
//! image is recorded in the report and must never abort the rest of the
//! batch. Pairs are independent, so they are processed in parallel.

use std::path::{Path, PathBuf};

use glob::glob;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::cutout::{apply_mask_crop_center, CutoutError};
use crate::output::{load_image, save_png, OutputError};

/// Filename suffix that marks a mask file.
const MASK_SUFFIX: &str = "_mask";

/// Error for batch-level operations.
///
/// Per-pair occurrences are caught by the driver and recorded in the
/// [`BatchReport`]; only scan-level failures (unreadable input directory)
/// propagate to the caller.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot scan directory: {0}")]
    Scan(#[from] glob::PatternError),

    #[error(transparent)]
    Codec(#[from] OutputError),

    #[error(transparent)]
    Pipeline(#[from] CutoutError),
}

/// One source image paired with its mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    /// Stable identifier, also the output file stem.
    pub id: String,
    pub image_path: PathBuf,
    pub mask_path: PathBuf,
}

/// Result of scanning for pairs: what was paired, and what was skipped
/// because no mask was found.
#[derive(Debug, Clone, Default)]
pub struct PairScan {
    pub pairs: Vec<ImagePair>,
    pub skipped: Vec<String>,
}

/// Supplies (image, mask) pairs to the batch driver.
pub trait PairSource {
    fn scan(&self) -> Result<PairScan, BatchError>;
}

/// Pairs `<stem>.png` with `<stem>_mask.png` in a single directory.
///
/// Mask files themselves are never treated as sources; images without a
/// matching mask are reported as skips, not errors.
#[derive(Debug, Clone)]
pub struct SuffixPairing {
    dir: PathBuf,
}

impl SuffixPairing {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SuffixPairing { dir: dir.into() }
    }
}

impl PairSource for SuffixPairing {
    fn scan(&self) -> Result<PairScan, BatchError> {
        let pattern = format!("{}/*.png", self.dir.display());
        let mut scan = PairScan::default();

        let mut paths: Vec<PathBuf> = glob(&pattern)?.filter_map(Result::ok).collect();
        paths.sort();

        for path in paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem.ends_with(MASK_SUFFIX) {
                continue;
            }
            let mask_path = path.with_file_name(format!("{}{}.png", stem, MASK_SUFFIX));
            if mask_path.exists() {
                scan.pairs.push(ImagePair {
                    id: stem.to_string(),
                    image_path: path,
                    mask_path,
                });
            } else {
                scan.skipped.push(stem.to_string());
            }
        }

        Ok(scan)
    }
}

/// A per-item failure captured by the driver.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub id: String,
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Pairs processed and written successfully.
    pub processed: Vec<String>,
    /// Processed pairs whose thresholded mask had no opaque pixel (the
    /// all-transparent output was still written).
    pub empty: Vec<String>,
    /// Images with no matching mask.
    pub skipped: Vec<String>,
    /// Pairs that failed to decode, transform, or encode.
    pub failed: Vec<BatchFailure>,
}

/// Run the cutout pipeline over every pair from `source`, writing
/// `<id>.png` files into `out_dir`.
///
/// Pairs are processed in parallel; each is fully independent. Per-pair
/// failures land in the report's `failed` list and never abort the run.
pub fn run_batch<S: PairSource>(
    source: &S,
    out_dir: &Path,
    threshold: u8,
) -> Result<BatchReport, BatchError> {
    let scan = source.scan()?;
    std::fs::create_dir_all(out_dir)?;

    let results: Vec<(String, Result<bool, BatchError>)> = scan
        .pairs
        .par_iter()
        .map(|pair| (pair.id.clone(), process_pair(pair, out_dir, threshold)))
        .collect();

    let mut report = BatchReport { skipped: scan.skipped, ..Default::default() };
    for (id, result) in results {
        match result {
            Ok(had_content) => {
                if !had_content {
                    report.empty.push(id.clone());
                }
                report.processed.push(id);
            }
            Err(e) => report.failed.push(BatchFailure { id, reason: e.to_string() }),
        }
    }
    Ok(report)
}

/// Process one pair. Returns whether any content survived the threshold.
fn process_pair(pair: &ImagePair, out_dir: &Path, threshold: u8) -> Result<bool, BatchError> {
    let image = load_image(&pair.image_path)?;
    let mask = load_image(&pair.mask_path)?;
    let outcome = apply_mask_crop_center(&image, &mask, threshold)?;
    save_png(&outcome.image, &out_dir.join(format!("{}.png", pair.id)))?;
    Ok(outcome.content_bounds.is_some())
}
