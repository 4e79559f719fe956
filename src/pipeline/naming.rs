//! Output path construction.

use std::path::{Path, PathBuf};

use crate::error::{ResizeError, Result};

/// Split a file name at its last `.` into stem and extension.
///
/// A name without a dot, or whose only dot is the leading one of a hidden
/// file (`.face`), has no extension. A trailing dot yields an empty one.
pub fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rfind('.') {
        None | Some(0) => (file_name, None),
        Some(idx) => (&file_name[..idx], Some(&file_name[idx + 1..])),
    }
}

/// Derive `<dir>/<stem><suffix>.<ext>` for `input`.
///
/// The directory part is kept exactly as given, so relative inputs produce
/// relative outputs, and the extension keeps its case.
pub fn output_path(input: &Path, suffix: &str) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .ok_or_else(|| {
            ResizeError::InvalidPath(format!("no file name in {}", input.display()))
        })?
        .to_str()
        .ok_or_else(|| {
            ResizeError::InvalidPath(format!("file name is not UTF-8: {}", input.display()))
        })?;

    let name = match split_extension(file_name) {
        (stem, Some(ext)) => format!("{}{}.{}", stem, suffix, ext),
        (stem, None) => format!("{}{}", stem, suffix),
    };

    Ok(input.with_file_name(name))
}

/// Whether `path` already looks like an output produced with `suffix`.
pub fn is_output_name(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| split_extension(name).0.ends_with(suffix))
        .unwrap_or(false)
}
