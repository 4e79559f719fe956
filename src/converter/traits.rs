//! Converter trait definitions.

use std::path::Path;

use crate::error::Result;

/// Information about a converter backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterInfo {
    /// Human-readable converter name.
    pub name: String,
    /// Program invoked for each file (empty for in-process backends).
    pub program: String,
}

/// Trait for anything that can write a resized copy of an image.
pub trait Converter: Send + Sync {
    /// Resize `input` according to the geometry `spec` and write the result
    /// to `output`, overwriting it if it exists.
    ///
    /// # Arguments
    /// * `input` - Source image path
    /// * `spec` - Geometry string, `"<W>x"` or `"x<H>"`
    /// * `output` - Destination path
    ///
    /// Blocks until the conversion finished.
    fn resize(&self, input: &Path, spec: &str, output: &Path) -> Result<()>;

    /// Get converter information.
    fn info(&self) -> ConverterInfo;
}

impl<C: Converter + ?Sized> Converter for std::sync::Arc<C> {
    fn resize(&self, input: &Path, spec: &str, output: &Path) -> Result<()> {
        (**self).resize(input, spec, output)
    }

    fn info(&self) -> ConverterInfo {
        (**self).info()
    }
}
