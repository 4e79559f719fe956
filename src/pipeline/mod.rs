//! Resize pipeline module.
//!
//! This module handles a single file: it derives the output path, hands the
//! file to the converter and collects the result.

mod naming;

pub use naming::{is_output_name, output_path, split_extension};

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use crate::config::ResizeConfig;
use crate::converter::{Converter, ConverterFactory, ConverterInfo};
use crate::error::Result;

/// Result of resizing one file.
#[derive(Debug, Clone, Serialize)]
pub struct ResizeResult {
    /// Original file path.
    pub source_path: PathBuf,
    /// Output file path.
    pub output_path: PathBuf,
    /// Geometry string passed to the converter.
    pub resize_spec: String,
    /// Size of the input in bytes (0 if it could not be read).
    pub input_bytes: u64,
    /// Size of the output in bytes, if it exists.
    pub output_bytes: Option<u64>,
    /// Time spent in the converter in milliseconds.
    pub duration_ms: u64,
    /// Whether the converter actually ran (false in dry-run mode).
    pub converted: bool,
}

/// Statistics for a batch run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct BatchStats {
    /// Total files in the batch.
    pub total_files: usize,
    /// Files converted.
    pub converted: usize,
    /// Files only planned (dry-run).
    pub planned: usize,
    /// Total input size.
    pub total_input_bytes: u64,
    /// Total output size.
    pub total_output_bytes: u64,
    /// Total processing time in milliseconds.
    pub total_time_ms: u64,
}

impl BatchStats {
    /// Accumulate a per-file result.
    pub fn record(&mut self, result: &ResizeResult) {
        if result.converted {
            self.converted += 1;
        } else {
            self.planned += 1;
        }
        self.total_input_bytes += result.input_bytes;
        self.total_output_bytes += result.output_bytes.unwrap_or(0);
    }

    /// Overall output/input size ratio.
    pub fn size_ratio(&self) -> f64 {
        if self.total_input_bytes == 0 {
            0.0
        } else {
            self.total_output_bytes as f64 / self.total_input_bytes as f64
        }
    }
}

/// Resize pipeline for processing image files one at a time.
pub struct ResizePipeline {
    /// Run configuration.
    config: ResizeConfig,
    /// Converter backend.
    converter: Box<dyn Converter>,
}

impl ResizePipeline {
    /// Create a pipeline using the converter named in the configuration.
    pub fn new(config: ResizeConfig) -> Self {
        let converter = ConverterFactory::for_config(&config);
        Self { config, converter }
    }

    /// Replace the converter backend.
    pub fn with_converter(mut self, converter: Box<dyn Converter>) -> Self {
        self.converter = converter;
        self
    }

    /// The run configuration.
    pub fn config(&self) -> &ResizeConfig {
        &self.config
    }

    /// Information about the converter in use.
    pub fn converter_info(&self) -> ConverterInfo {
        self.converter.info()
    }

    /// Output path this pipeline would write for `input`.
    pub fn plan<P: AsRef<Path>>(&self, input: P) -> Result<PathBuf> {
        output_path(input.as_ref(), &self.config.suffix)
    }

    /// Resize a single file.
    pub fn resize_file<P: AsRef<Path>>(&self, input_path: P) -> Result<ResizeResult> {
        let input_path = input_path.as_ref();
        let output_path = self.plan(input_path)?;
        let resize_spec = self.config.resize_spec();
        let input_bytes = std::fs::metadata(input_path).map(|m| m.len()).unwrap_or(0);

        if self.config.dry_run {
            log::debug!(
                "Dry run: {} -> {} ({})",
                input_path.display(),
                output_path.display(),
                resize_spec
            );
            return Ok(ResizeResult {
                source_path: input_path.to_path_buf(),
                output_path,
                resize_spec,
                input_bytes,
                output_bytes: None,
                duration_ms: 0,
                converted: false,
            });
        }

        log::info!("Processing: {}", input_path.display());
        let start = Instant::now();

        self.converter.resize(input_path, &resize_spec, &output_path)?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let output_bytes = std::fs::metadata(&output_path).map(|m| m.len()).ok();

        Ok(ResizeResult {
            source_path: input_path.to_path_buf(),
            output_path,
            resize_spec,
            input_bytes,
            output_bytes,
            duration_ms,
            converted: true,
        })
    }
}
