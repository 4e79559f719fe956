//! Batch Image Resize Library
//!
//! Resizes image files to a target width or height through an external
//! ImageMagick-compatible converter. Each output is written next to its
//! input as `<stem>_resized.<ext>`.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use imgresize::{BatchResizer, Dimension, ResizeConfig, ResizePipeline};
//!
//! let config = ResizeConfig::new(Dimension::Width(800));
//! let resizer = BatchResizer::without_progress(ResizePipeline::new(config));
//!
//! let outcome = resizer.process(&["a.jpg".into(), "photos/img.JPEG".into()])?;
//! for result in &outcome.results {
//!     println!("→ {}", result.output_path.display());
//! }
//! ```
//!
//! # Processing Model
//!
//! Files are handled strictly in order, one blocking converter call each.
//! The first failure aborts the batch and outputs already written are kept.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod report;

// Re-export commonly used types
pub use batch::{BatchOutcome, BatchResizer, FileDiscovery};
pub use config::{Dimension, ResizeConfig};
pub use converter::{Converter, ConverterInfo, ExternalConverter};
pub use error::{ResizeError, Result};
pub use pipeline::{output_path, BatchStats, ResizePipeline, ResizeResult};
pub use report::RunReport;

/// Library version information.
pub mod version {
    /// Library version string.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Library name.
    pub const NAME: &str = env!("CARGO_PKG_NAME");

    /// Get full version string.
    pub fn full_version() -> String {
        format!("{} {}", NAME, VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_resize_spec_convention() {
        assert_eq!(ResizeConfig::new(Dimension::Width(800)).resize_spec(), "800x");
        assert_eq!(ResizeConfig::new(Dimension::Height(600)).resize_spec(), "x600");
    }

    #[test]
    fn test_output_naming() {
        assert_eq!(
            output_path(Path::new("photos/img.JPEG"), "_resized").unwrap(),
            PathBuf::from("photos/img_resized.JPEG")
        );
    }

    #[test]
    fn test_full_version() {
        assert!(version::full_version().starts_with("imgresize "));
    }
}
