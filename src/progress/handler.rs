//! Progress handler trait and related types.

use std::path::{Path, PathBuf};

use crate::error::ResizeError;
use crate::pipeline::{BatchStats, ResizeResult};

/// Phase of a resize run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    /// Expanding inputs into files to process.
    Discovery,
    /// Converter is running on the current file.
    Converting,
    /// Current file was written.
    Converted,
    /// Current file was planned but not converted (dry-run).
    Planned,
    /// Run completed successfully.
    Complete,
    /// Run aborted.
    Failed,
}

impl ProgressPhase {
    /// Get a human-readable description of the phase.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Discovery => "Discovering files",
            Self::Converting => "Resizing",
            Self::Converted => "Written",
            Self::Planned => "Planned",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Check if this is a terminal phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

impl std::fmt::Display for ProgressPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Progress event emitted during a resize run.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// Current phase of operation.
    pub phase: ProgressPhase,

    /// File being processed.
    pub current_file: Option<PathBuf>,

    /// Output written (or planned) for the current file.
    pub output_file: Option<PathBuf>,

    /// Geometry string used for the current file.
    pub resize_spec: Option<String>,

    /// Total files in the batch (once known).
    pub total_files: Option<usize>,

    /// Number of files completed so far.
    pub completed_files: usize,

    /// Status message.
    pub message: String,
}

impl Default for ProgressEvent {
    fn default() -> Self {
        Self {
            phase: ProgressPhase::Discovery,
            current_file: None,
            output_file: None,
            resize_spec: None,
            total_files: None,
            completed_files: 0,
            message: String::new(),
        }
    }
}

impl ProgressEvent {
    /// Create a discovery phase event.
    pub fn discovery(message: impl Into<String>) -> Self {
        Self {
            phase: ProgressPhase::Discovery,
            message: message.into(),
            ..Default::default()
        }
    }

    /// Create a converting phase event.
    pub fn converting(file: &Path) -> Self {
        Self {
            phase: ProgressPhase::Converting,
            current_file: Some(file.to_path_buf()),
            message: format!("Resizing {}", file.display()),
            ..Default::default()
        }
    }

    /// Create a per-file completion event from a result.
    pub fn finished(result: &ResizeResult) -> Self {
        let phase = if result.converted {
            ProgressPhase::Converted
        } else {
            ProgressPhase::Planned
        };
        Self {
            phase,
            current_file: Some(result.source_path.clone()),
            output_file: Some(result.output_path.clone()),
            resize_spec: Some(result.resize_spec.clone()),
            message: format!("{} {}", phase, result.output_path.display()),
            ..Default::default()
        }
    }

    /// Create a failure event for the file that aborted the run.
    pub fn failed(file: &Path, error: &ResizeError) -> Self {
        Self {
            phase: ProgressPhase::Failed,
            current_file: Some(file.to_path_buf()),
            message: error.to_string(),
            ..Default::default()
        }
    }

    /// Create a completion event.
    pub fn complete(files_processed: usize) -> Self {
        Self {
            phase: ProgressPhase::Complete,
            completed_files: files_processed,
            total_files: Some(files_processed),
            message: format!("Completed {} files", files_processed),
            ..Default::default()
        }
    }

    /// Set batch position.
    pub fn with_batch_progress(mut self, completed: usize, total: usize) -> Self {
        self.completed_files = completed;
        self.total_files = Some(total);
        self
    }
}

impl std::fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(total) = self.total_files {
            write!(
                f,
                "[{}/{}] {}: {}",
                self.completed_files, total, self.phase, self.message
            )
        } else {
            write!(f, "{}: {}", self.phase, self.message)
        }
    }
}

/// Trait for handling progress updates during a resize run.
///
/// The command-line front end uses this to print one line per written file;
/// library users can hook in their own reporting.
pub trait ProgressHandler {
    /// Called when progress is updated.
    fn on_progress(&self, event: &ProgressEvent);

    /// Called when a file fails. The run aborts right after.
    ///
    /// # Arguments
    ///
    /// * `error` - The error that occurred
    /// * `file` - The file being processed when the error occurred (if applicable)
    fn on_error(&self, error: &ResizeError, file: Option<&Path>) {
        let _ = (error, file);
    }

    /// Called when every file was processed.
    fn on_complete(&self, stats: &BatchStats) {
        let _ = stats;
    }
}

/// A no-op progress handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressHandler for NullProgress {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(converted: bool) -> ResizeResult {
        ResizeResult {
            source_path: PathBuf::from("photos/a.jpg"),
            output_path: PathBuf::from("photos/a_resized.jpg"),
            resize_spec: "800x".into(),
            input_bytes: 0,
            output_bytes: None,
            duration_ms: 0,
            converted,
        }
    }

    #[test]
    fn test_progress_phase_display() {
        assert_eq!(ProgressPhase::Converting.to_string(), "Resizing");
        assert_eq!(ProgressPhase::Complete.to_string(), "Complete");
    }

    #[test]
    fn test_progress_phase_is_terminal() {
        assert!(ProgressPhase::Complete.is_terminal());
        assert!(ProgressPhase::Failed.is_terminal());
        assert!(!ProgressPhase::Converted.is_terminal());
    }

    #[test]
    fn test_finished_event_phase() {
        let written = ProgressEvent::finished(&result(true));
        assert_eq!(written.phase, ProgressPhase::Converted);
        assert_eq!(written.output_file, Some(PathBuf::from("photos/a_resized.jpg")));
        assert_eq!(written.resize_spec.as_deref(), Some("800x"));

        let planned = ProgressEvent::finished(&result(false));
        assert_eq!(planned.phase, ProgressPhase::Planned);
    }

    #[test]
    fn test_progress_event_display() {
        let event = ProgressEvent::converting(Path::new("a.jpg")).with_batch_progress(2, 3);

        let display = format!("{}", event);
        assert!(display.contains("[2/3]"));
        assert!(display.contains("Resizing"));
    }
}
