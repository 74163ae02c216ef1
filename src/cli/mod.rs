//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for the two pipeline commands.

mod cutout;
mod sheet;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Cutsheet - mask cutouts and fixed-grid sprite sheet placement
#[derive(Parser)]
#[command(name = "cutsheet")]
#[command(about = "Cutsheet - apply mask cutouts and place images into sprite sheet cells")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply masks to a folder of images: threshold, crop to content, and
    /// re-center on the original canvas
    Cutout {
        /// Folder containing `<name>.png` images and `<name>_mask.png` masks
        input: PathBuf,

        /// Output folder for the processed PNGs
        #[arg(short, long)]
        output: PathBuf,

        /// Alpha cutoff: mask values at or above become fully opaque
        #[arg(long, default_value = "128")]
        threshold: u8,

        /// Print the batch report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Composite an image into one or more cells of a sprite sheet
    Sheet {
        /// The sprite sheet image to update
        sheet: PathBuf,

        /// The image to place
        image: PathBuf,

        /// Grid layout as COLSxROWS (e.g. "10x10")
        #[arg(long)]
        grid: String,

        /// Target cell as X,Y; repeat to fill several cells with the same
        /// image
        #[arg(long = "cell", required = true)]
        cells: Vec<String>,

        /// Counter-clockwise rotation in degrees applied before scaling
        #[arg(long, default_value = "0")]
        rotation: f64,

        /// Clear each target cell before drawing
        #[arg(long)]
        clear: bool,

        /// Output path. Defaults to `<sheet stem>_out.png` next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI and return the process exit code.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Cutout { input, output, threshold, json } => {
            cutout::run_cutout(&input, &output, threshold, json)
        }
        Commands::Sheet { sheet, image, grid, cells, rotation, clear, output } => {
            sheet::run_sheet(&sheet, &image, &grid, &cells, rotation, clear, output.as_deref())
        }
    }
}
