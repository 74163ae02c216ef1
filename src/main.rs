//! Cutsheet - command-line tool for mask cutouts and sprite sheet placement

use std::process::ExitCode;

use cutsheet::cli;

fn main() -> ExitCode {
    cli::run()
}
