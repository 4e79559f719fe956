//! Command-line interface for the batch resize tool.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, ArgGroup, CommandFactory, FromArgMatches, Parser};

use crate::batch::BatchResizer;
use crate::config::{Dimension, ResizeConfig, DEFAULT_CONVERTER, DEFAULT_SUFFIX};
use crate::error::{ResizeError, Result};
use crate::pipeline::ResizePipeline;
use crate::progress::{CallbackProgress, ProgressEvent, ProgressPhase};
use crate::report::RunReport;

/// Batch image resizer
///
/// Writes a resized copy of every image next to the original, as
/// `<name>_resized.<ext>`, using ImageMagick's `convert`. The aspect ratio
/// is always preserved.
#[derive(Parser, Debug)]
#[command(name = "imgresize")]
#[command(version)]
#[command(about = "Batch-resize images to a target width or height")]
#[command(disable_help_flag = true, arg_required_else_help = true)]
#[command(args_override_self = true)]
#[command(group(
    ArgGroup::new("dimension")
        .required(true)
        .multiple(true)
        .args(["width", "height"])
))]
pub struct Cli {
    /// Target width in pixels
    #[arg(short = 'w', long, value_name = "WIDTH", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Target height in pixels
    #[arg(short = 'h', long, value_name = "HEIGHT", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Image files or directories to resize
    #[arg(value_name = "PATH", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Scan directory arguments recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Follow symbolic links while scanning directories
    #[arg(short = 'L', long)]
    pub follow_symlinks: bool,

    /// Print the planned outputs without running the converter
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Converter program invoked as `<PROGRAM> <in> -resize <spec> <out>`
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_CONVERTER)]
    pub converter: String,

    /// Suffix inserted before the extension of each output
    #[arg(long, default_value = DEFAULT_SUFFIX, allow_hyphen_values = true)]
    pub suffix: String,

    /// Write a JSON summary to FILE after a successful run
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl Cli {
    /// Parse arguments, resolving `-w`/`-h` so the flag given last wins.
    pub fn parse_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let mut cli = Self::from_arg_matches(&matches)?;

        let last_index = |id: &str| matches.indices_of(id).and_then(|indices| indices.max());
        if let (Some(w), Some(h)) = (last_index("width"), last_index("height")) {
            if w > h {
                cli.height = None;
            } else {
                cli.width = None;
            }
        }

        Ok(cli)
    }

    /// The requested target dimension.
    pub fn dimension(&self) -> Option<Dimension> {
        match (self.width, self.height) {
            (Some(w), _) => Some(Dimension::Width(w)),
            (None, Some(h)) => Some(Dimension::Height(h)),
            (None, None) => None,
        }
    }

    /// Build the run configuration from the parsed flags.
    pub fn config(&self) -> Result<ResizeConfig> {
        let dimension = self.dimension().ok_or_else(|| {
            ResizeError::Validation("one of --width or --height is required".into())
        })?;

        Ok(ResizeConfig::new(dimension)
            .converter(self.converter.clone())
            .suffix(self.suffix.clone())
            .dry_run(self.dry_run))
    }
}

/// Exit code for an argument parsing failure.
///
/// Help and version requests succeed; every usage error exits with 1.
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Run the CLI application.
pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.quiet);

    let config = cli.config()?;
    let quiet = cli.quiet;

    let progress = CallbackProgress::new(move |event: &ProgressEvent| print_event(event, quiet))
        .on_complete(|stats| {
            log::info!(
                "Resized {} file(s) in {} ms ({} planned)",
                stats.converted,
                stats.total_time_ms,
                stats.planned
            );
            if stats.converted > 0 {
                log::debug!("Output/input size ratio: {:.2}", stats.size_ratio());
            }
        });

    let pipeline = ResizePipeline::new(config);
    log::debug!("Using converter: {:?}", pipeline.converter_info());

    let resizer = BatchResizer::new(pipeline, progress)
        .recursive(cli.recursive)
        .follow_symlinks(cli.follow_symlinks);
    let outcome = resizer.process(&cli.inputs)?;

    if let Some(ref path) = cli.report {
        RunReport::new(resizer.pipeline().config(), &outcome).save(path)?;
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };

    // A logger may already be installed when embedded or under test.
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn print_event(event: &ProgressEvent, quiet: bool) {
    match event_line(event, quiet) {
        Some(line) => println!("{}", line),
        None if !event.phase.is_terminal() => log::debug!("{}", event),
        None => {}
    }
}

/// Console line for a progress event, if it has one.
///
/// A written file prints `→ <output>` unless `quiet`; a dry-run plan always
/// prints `<input> → <output> (<spec>)`.
fn event_line(event: &ProgressEvent, quiet: bool) -> Option<String> {
    match event.phase {
        ProgressPhase::Converted if !quiet => event
            .output_file
            .as_ref()
            .map(|output| format!("→ {}", output.display())),
        ProgressPhase::Planned => {
            let input = event.current_file.as_ref()?;
            let output = event.output_file.as_ref()?;
            let spec = event.resize_spec.as_ref()?;
            Some(format!("{} → {} ({})", input.display(), output.display(), spec))
        }
        _ => None,
    }
}
