//! Error types for the batch resize library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, ResizeError>;

/// Main error type for the batch resize library.
#[derive(Error, Debug)]
pub enum ResizeError {
    /// The output file name could not be derived from the input path.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error (e.g., nothing to process).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The converter program could not be launched.
    #[error("Converter not found: {0} (is ImageMagick installed and on PATH?)")]
    ConverterNotFound(String),

    /// The converter ran but reported a failure.
    #[error("Conversion failed for {}: {}", .input.display(), describe_failure(.code, .stderr))]
    ConversionFailed {
        /// Input file being converted.
        input: PathBuf,
        /// Converter exit code, `None` when it was killed by a signal.
        code: Option<i32>,
        /// Trimmed standard error of the converter.
        stderr: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the run report.
    #[error("Report error: {0}")]
    Report(#[from] serde_json::Error),
}

impl ResizeError {
    /// Process exit code for this error.
    ///
    /// A converter exit code in `1..=255` is passed through unchanged so the
    /// caller sees the same status the converter produced; everything else
    /// maps to `1`.
    pub fn exit_code(&self) -> u8 {
        match self {
            ResizeError::ConversionFailed {
                code: Some(code), ..
            } if (1..=255).contains(code) => *code as u8,
            _ => 1,
        }
    }
}

fn describe_failure(code: &Option<i32>, stderr: &str) -> String {
    let status = match *code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    };
    if stderr.is_empty() {
        status
    } else {
        format!("{} ({})", status, stderr)
    }
}
