//! File discovery for directory inputs.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{ResizeError, Result};

/// Image patterns matched by default (case-insensitive).
pub const DEFAULT_PATTERNS: &[&str] = &[
    "*.jpg", "*.jpeg", "*.png", "*.gif", "*.bmp", "*.tif", "*.tiff", "*.webp",
];

/// File discovery for finding images inside a directory.
#[derive(Debug, Default)]
pub struct FileDiscovery {
    recursive: bool,
    follow_symlinks: bool,
}

impl FileDiscovery {
    /// Create a new file discovery matching [`DEFAULT_PATTERNS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable recursive scanning.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Follow symbolic links found while scanning. Off by default.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Discover files in the given directory, sorted by path.
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(ResizeError::Validation(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }

        let mut files = Vec::new();
        let mut visited = HashSet::new();
        self.discover_recursive(dir, &mut visited, &mut files)?;

        files.sort();

        Ok(files)
    }

    fn discover_recursive(
        &self,
        dir: &Path,
        visited: &mut HashSet<PathBuf>,
        files: &mut Vec<PathBuf>,
    ) -> Result<()> {
        // Each real directory is scanned at most once, whatever links lead to it.
        if !visited.insert(std::fs::canonicalize(dir)?) {
            log::debug!("Skipping {}: already scanned", dir.display());
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| {
            ResizeError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read directory {}: {}", dir.display(), e),
            ))
        })?;

        for entry in entries {
            let path = entry?.path();

            let metadata = if self.follow_symlinks {
                std::fs::metadata(&path)
            } else {
                std::fs::symlink_metadata(&path)
            };
            let metadata = match metadata {
                Ok(m) => m,
                Err(e) => {
                    log::debug!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            if metadata.is_dir() {
                if self.recursive {
                    self.discover_recursive(&path, visited, files)?;
                }
            } else if metadata.is_file() && matches_pattern(&path) {
                files.push(path);
            } else if metadata.file_type().is_symlink() {
                log::debug!("Skipping symlink {}", path.display());
            }
        }

        Ok(())
    }
}

/// Check if a path matches any of the default image patterns.
fn matches_pattern(path: &Path) -> bool {
    let file_name = match path.file_name() {
        Some(name) => name.to_string_lossy().to_lowercase(),
        None => return false,
    };

    DEFAULT_PATTERNS
        .iter()
        .any(|pattern| glob_match(&file_name, pattern))
}

/// Simple glob matching (supports `*` and `?`).
fn glob_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let (mut ti, mut pi) = (0, 0);
    // Position of the last `*` seen and the text index it was tried at.
    let mut star: Option<(usize, usize)> = None;

    while ti < text.len() {
        if pi < pattern.len() && (pattern[pi] == '?' || pattern[pi] == text[ti]) {
            ti += 1;
            pi += 1;
        } else if pi < pattern.len() && pattern[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((star_pi, star_ti)) = star {
            pi = star_pi + 1;
            ti = star_ti + 1;
            star = Some((star_pi, star_ti + 1));
        } else {
            return false;
        }
    }

    pattern[pi..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_directory() -> TempDir {
        let dir = TempDir::new().unwrap();

        fs::write(dir.path().join("b.jpg"), "content").unwrap();
        fs::write(dir.path().join("a.PNG"), "content").unwrap();
        fs::write(dir.path().join("notes.txt"), "content").unwrap();

        let subdir = dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("nested.webp"), "content").unwrap();

        dir
    }

    #[test]
    fn test_discovery_non_recursive() {
        let dir = create_test_directory();

        let files = FileDiscovery::new().discover(dir.path()).unwrap();

        assert_eq!(files, vec![dir.path().join("a.PNG"), dir.path().join("b.jpg")]);
    }

    #[test]
    fn test_discovery_recursive() {
        let dir = create_test_directory();

        let files = FileDiscovery::new().recursive(true).discover(dir.path()).unwrap();

        assert_eq!(files.len(), 3);
        assert!(files.contains(&dir.path().join("subdir").join("nested.webp")));
    }

    #[cfg(unix)]
    #[test]
    fn test_discovery_skips_symlinks_by_default() {
        let dir = create_test_directory();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("b.jpg"), dir.path().join("link.jpg"))
            .unwrap();

        let files = FileDiscovery::new().recursive(true).discover(dir.path()).unwrap();

        assert_eq!(files.len(), 3);
        assert!(!files.iter().any(|f| f.starts_with(dir.path().join("loop"))));
        assert!(!files.contains(&dir.path().join("link.jpg")));
    }

    #[cfg(unix)]
    #[test]
    fn test_discovery_follows_symlink_cycle_once() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.jpg"), "content").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let files = FileDiscovery::new()
            .recursive(true)
            .follow_symlinks(true)
            .discover(dir.path())
            .unwrap();

        assert_eq!(files, vec![dir.path().join("a.jpg")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discovery_follows_linked_directory() {
        let dir = create_test_directory();
        let other = TempDir::new().unwrap();
        fs::write(other.path().join("far.gif"), "content").unwrap();
        std::os::unix::fs::symlink(other.path(), dir.path().join("linked")).unwrap();

        let skipped = FileDiscovery::new().recursive(true).discover(dir.path()).unwrap();
        assert!(!skipped.contains(&dir.path().join("linked").join("far.gif")));

        let followed = FileDiscovery::new()
            .recursive(true)
            .follow_symlinks(true)
            .discover(dir.path())
            .unwrap();
        assert!(followed.contains(&dir.path().join("linked").join("far.gif")));
        assert_eq!(followed.len(), 4);
    }

    #[test]
    fn test_discovery_not_a_directory() {
        let dir = create_test_directory();
        let result = FileDiscovery::new().discover(&dir.path().join("b.jpg"));
        assert!(matches!(result, Err(ResizeError::Validation(_))));

        assert!(FileDiscovery::new()
            .discover(Path::new("/nonexistent/path"))
            .is_err());
    }

    #[test]
    fn test_glob_match() {
        assert!(glob_match("test.jpg", "*.jpg"));
        assert!(glob_match("test.jpg", "test.jpg"));
        assert!(glob_match("test.jpg", "test.*"));
        assert!(glob_match("test.jpg", "*.*"));
        assert!(glob_match("test.jpg", "t?st.jpg"));
        assert!(glob_match("a.b.jpg", "*.jpg"));
        assert!(!glob_match("test.jpg", "*.png"));
        assert!(!glob_match("test.jpg", "foo.jpg"));
        assert!(!glob_match("test.jpgx", "*.jpg"));
    }
}
