//! CLI dispatch for the `cutsheet sheet` command.
//!
//! Repeated `--cell` flags fill a range of cells with the same image; the
//! composites are applied sequentially to one sheet buffer.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::output::{load_image, save_sheet};
use crate::sheet::{composite, CellGrid, CompositeOptions};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the sheet command.
pub fn run_sheet(
    sheet_path: &Path,
    image_path: &Path,
    grid_arg: &str,
    cell_args: &[String],
    rotation: f64,
    clear: bool,
    output: Option<&Path>,
) -> ExitCode {
    let (cols, rows) = match parse_grid(grid_arg) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let cells: Vec<(u32, u32)> = match cell_args.iter().map(|c| parse_cell(c)).collect() {
        Ok(cells) => cells,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut sheet = match load_image(sheet_path) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error: cannot open sheet '{}': {}", sheet_path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let source = match load_image(image_path) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error: cannot open image '{}': {}", image_path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let grid = match CellGrid::new(sheet.width(), sheet.height(), cols, rows) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let opts = CompositeOptions { rotation_degrees: rotation, clear_cell: clear };
    for (cell_x, cell_y) in cells {
        sheet = match composite(sheet, &source, cell_x, cell_y, grid, opts) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        };
    }

    let out_path = output.map(Path::to_path_buf).unwrap_or_else(|| default_output(sheet_path));
    if let Err(e) = save_sheet(&sheet, &out_path) {
        eprintln!("Error: cannot write '{}': {}", out_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Wrote {}", out_path.display());
    ExitCode::from(EXIT_SUCCESS)
}

/// Parse a COLSxROWS grid argument like "10x10".
fn parse_grid(arg: &str) -> Result<(u32, u32), String> {
    let (cols, rows) = arg
        .split_once(&['x', 'X'][..])
        .ok_or_else(|| format!("invalid grid '{}': expected COLSxROWS", arg))?;
    let cols = cols.trim().parse::<u32>().map_err(|_| format!("invalid grid columns '{}'", cols))?;
    let rows = rows.trim().parse::<u32>().map_err(|_| format!("invalid grid rows '{}'", rows))?;
    Ok((cols, rows))
}

/// Parse an X,Y cell argument like "0,3".
fn parse_cell(arg: &str) -> Result<(u32, u32), String> {
    let (x, y) =
        arg.split_once(',').ok_or_else(|| format!("invalid cell '{}': expected X,Y", arg))?;
    let x = x.trim().parse::<u32>().map_err(|_| format!("invalid cell x '{}'", x))?;
    let y = y.trim().parse::<u32>().map_err(|_| format!("invalid cell y '{}'", y))?;
    Ok((x, y))
}

/// Default output path: `<stem>_out.png` next to the input sheet.
fn default_output(sheet_path: &Path) -> PathBuf {
    let stem = sheet_path.file_stem().and_then(|s| s.to_str()).unwrap_or("sheet");
    sheet_path.with_file_name(format!("{}_out.png", stem))
}
