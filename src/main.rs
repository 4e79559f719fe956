//! Batch Image Resize CLI Tool
//!
//! Resizes images to a target width or height by delegating to ImageMagick's
//! `convert`, writing each result next to its original.

use imgresize::cli::{run, usage_exit_code, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_exit_code(&e));
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
