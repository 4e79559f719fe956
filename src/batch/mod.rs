//! Batch processing for multiple image files.
//!
//! Files are resized strictly one after another. The first failure aborts
//! the batch; outputs written before it stay on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use imgresize::batch::BatchResizer;
//! use imgresize::config::{Dimension, ResizeConfig};
//! use imgresize::pipeline::ResizePipeline;
//! use imgresize::progress::NullProgress;
//!
//! let pipeline = ResizePipeline::new(ResizeConfig::new(Dimension::Width(800)));
//! let outcome = BatchResizer::new(pipeline, NullProgress)
//!     .recursive(true)
//!     .process(&["photos".into()])?;
//! println!("Resized {} files", outcome.stats.converted);
//! ```

mod file_discovery;

pub use file_discovery::{FileDiscovery, DEFAULT_PATTERNS};

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{ResizeError, Result};
use crate::pipeline::{is_output_name, BatchStats, ResizePipeline, ResizeResult};
use crate::progress::{NullProgress, ProgressEvent, ProgressHandler};

/// Outcome of a fully successful batch.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Per-file results in processing order.
    pub results: Vec<ResizeResult>,
    /// Aggregate statistics.
    pub stats: BatchStats,
}

/// Batch resizer driving a pipeline over a list of inputs.
pub struct BatchResizer<P: ProgressHandler> {
    /// Per-file pipeline.
    pipeline: ResizePipeline,

    /// Progress handler.
    progress: P,

    /// Whether to scan directory inputs recursively.
    recursive: bool,

    /// Whether to follow symbolic links inside directory inputs.
    follow_symlinks: bool,
}

impl<P: ProgressHandler> BatchResizer<P> {
    /// Create a new batch resizer.
    pub fn new(pipeline: ResizePipeline, progress: P) -> Self {
        Self {
            pipeline,
            progress,
            recursive: false,
            follow_symlinks: false,
        }
    }

    /// Enable recursive directory scanning.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Follow symbolic links while scanning directory inputs.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// The underlying pipeline.
    pub fn pipeline(&self) -> &ResizePipeline {
        &self.pipeline
    }

    /// Expand inputs into the ordered list of files to resize.
    ///
    /// Directory inputs are replaced by the images they contain, leaving out
    /// files that already carry the output suffix. Every other input is kept
    /// as given, even if it does not exist; the converter reports that.
    pub fn expand_inputs(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        if inputs.is_empty() {
            return Err(ResizeError::Validation("No files to process".into()));
        }

        let suffix = &self.pipeline.config().suffix;
        let discovery = FileDiscovery::new()
            .recursive(self.recursive)
            .follow_symlinks(self.follow_symlinks);

        let mut files = Vec::with_capacity(inputs.len());
        for input in inputs {
            if !input.is_dir() {
                files.push(input.clone());
                continue;
            }

            self.progress.on_progress(&ProgressEvent::discovery(format!(
                "Scanning {}",
                input.display()
            )));

            let found: Vec<PathBuf> = discovery
                .discover(input)?
                .into_iter()
                .filter(|path| !is_output_name(path, suffix))
                .collect();

            if found.is_empty() {
                return Err(ResizeError::Validation(format!(
                    "No matching images found in {}",
                    input.display()
                )));
            }

            log::debug!("{}: {} images", input.display(), found.len());
            files.extend(found);
        }

        Ok(files)
    }

    /// Resize every input in order, stopping at the first failure.
    pub fn process(&self, inputs: &[PathBuf]) -> Result<BatchOutcome> {
        let start_time = Instant::now();

        let config = self.pipeline.config();
        config.validate()?;

        let files = self.expand_inputs(inputs)?;
        let total_files = files.len();

        log::info!(
            "Resizing {} file(s) to {} ({})",
            total_files,
            config.dimension,
            config.resize_spec()
        );

        let mut stats = BatchStats {
            total_files,
            ..Default::default()
        };
        let mut results = Vec::with_capacity(total_files);

        for (idx, file) in files.iter().enumerate() {
            let result = self.process_single_file(idx, file, total_files)?;
            stats.record(&result);
            results.push(result);
        }

        stats.total_time_ms = start_time.elapsed().as_millis() as u64;

        self.progress.on_progress(&ProgressEvent::complete(total_files));
        self.progress.on_complete(&stats);

        Ok(BatchOutcome { results, stats })
    }

    fn process_single_file(&self, idx: usize, file: &Path, total: usize) -> Result<ResizeResult> {
        self.progress
            .on_progress(&ProgressEvent::converting(file).with_batch_progress(idx, total));

        match self.pipeline.resize_file(file) {
            Ok(result) => {
                self.progress.on_progress(
                    &ProgressEvent::finished(&result).with_batch_progress(idx + 1, total),
                );
                Ok(result)
            }
            Err(e) => {
                log::error!("Aborting after {} of {} file(s)", idx, total);
                self.progress
                    .on_progress(&ProgressEvent::failed(file, &e).with_batch_progress(idx, total));
                self.progress.on_error(&e, Some(file));
                Err(e)
            }
        }
    }
}

impl BatchResizer<NullProgress> {
    /// Create a batch resizer without progress reporting.
    pub fn without_progress(pipeline: ResizePipeline) -> Self {
        Self::new(pipeline, NullProgress)
    }
}
