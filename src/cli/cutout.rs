//! CLI dispatch for the `cutsheet cutout` command.

use std::path::Path;
use std::process::ExitCode;

use crate::batch::{run_batch, BatchReport, SuffixPairing};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the cutout batch command.
pub fn run_cutout(input: &Path, output: &Path, threshold: u8, json: bool) -> ExitCode {
    if !input.is_dir() {
        eprintln!("Error: input '{}' is not a directory", input.display());
        return ExitCode::from(EXIT_ERROR);
    }

    let source = SuffixPairing::new(input);
    let report = match run_batch(&source, output, threshold) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print_report_text(&report);
    }

    // Per-item failures do not fail the run; an entirely failed batch does
    if report.processed.is_empty() && !report.failed.is_empty() {
        return ExitCode::from(EXIT_ERROR);
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn print_report_text(report: &BatchReport) {
    for id in &report.processed {
        println!("Processed {}", id);
    }
    for id in &report.empty {
        eprintln!("Warning: {} has no content above the threshold", id);
    }
    for id in &report.skipped {
        eprintln!("Skipping {} as no corresponding mask was found", id);
    }
    for failure in &report.failed {
        eprintln!("Failed to process {}: {}", failure.id, failure.reason);
    }
    println!(
        "{} processed, {} skipped, {} failed",
        report.processed.len(),
        report.skipped.len(),
        report.failed.len()
    );
}
