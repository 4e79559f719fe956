//! Configuration types for a resize run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ResizeError, Result};

/// Default converter program (ImageMagick).
pub const DEFAULT_CONVERTER: &str = "convert";

/// Default suffix inserted between the stem and the extension.
pub const DEFAULT_SUFFIX: &str = "_resized";

/// Target dimension for a resize. The other axis is left free so the
/// converter preserves the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Target width in pixels.
    Width(u32),
    /// Target height in pixels.
    Height(u32),
}

impl Dimension {
    /// Geometry string understood by the converter: `"<W>x"` or `"x<H>"`.
    pub fn resize_spec(&self) -> String {
        match self {
            Dimension::Width(w) => format!("{}x", w),
            Dimension::Height(h) => format!("x{}", h),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Width(w) => write!(f, "width {}px", w),
            Dimension::Height(h) => write!(f, "height {}px", h),
        }
    }
}

/// Configuration for a resize run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeConfig {
    /// Target dimension.
    pub dimension: Dimension,
    /// Converter program name or path.
    pub converter: String,
    /// Suffix appended to the output file stem.
    pub suffix: String,
    /// Plan outputs without invoking the converter.
    pub dry_run: bool,
}

impl ResizeConfig {
    /// Create a configuration for the given dimension with default settings.
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            converter: DEFAULT_CONVERTER.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            dry_run: false,
        }
    }

    /// Set the converter program.
    pub fn converter(mut self, converter: impl Into<String>) -> Self {
        self.converter = converter.into();
        self
    }

    /// Set the output suffix.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Enable or disable dry-run mode.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Geometry string for the configured dimension.
    pub fn resize_spec(&self) -> String {
        self.dimension.resize_spec()
    }

    /// Validate the configuration before any file is touched.
    pub fn validate(&self) -> Result<()> {
        // An empty suffix would make every output overwrite its input.
        if self.suffix.is_empty() {
            return Err(ResizeError::Config("suffix must not be empty".into()));
        }
        if self.suffix.contains(std::path::is_separator) {
            return Err(ResizeError::Config(format!(
                "suffix must not contain a path separator: {:?}",
                self.suffix
            )));
        }
        if self.converter.trim().is_empty() {
            return Err(ResizeError::Config("converter must not be empty".into()));
        }
        match self.dimension {
            Dimension::Width(0) | Dimension::Height(0) => Err(ResizeError::Config(
                "target dimension must be at least 1 pixel".into(),
            )),
            _ => Ok(()),
        }
    }
}
