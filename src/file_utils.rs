use globset::{GlobBuilder, GlobMatcher};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::{AppError, ConfigError};

// @module: Catalog discovery utilities

/// A compiled filename glob
///
/// Patterns without a `/` are matched against the file name; patterns with
/// one are matched against the path relative to the search root. `*` never
/// crosses a `/`, `**/` matches any number of directories.
#[derive(Debug, Clone)]
pub struct FilePattern {
    pattern: String,
    matcher: GlobMatcher,
    match_path: bool,
}

impl FilePattern {
    /// Compile a glob pattern
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        if pattern.trim().is_empty() {
            return Err(ConfigError::EmptyPattern);
        }

        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.kind().to_string(),
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
            match_path: pattern.contains('/'),
        })
    }

    /// The glob as written
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Check `path` (relative to the search root) against the pattern
    pub fn matches(&self, relative: &Path) -> bool {
        if self.match_path {
            let normalized = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            self.matcher.is_match(normalized)
        } else {
            relative
                .file_name()
                .map(|name| self.matcher.is_match(name))
                .unwrap_or(false)
        }
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    /// Find catalog files under a directory whose names match a pattern
    ///
    /// The walk follows symlinks and the result is sorted by path. Entries
    /// below the root that cannot be read (dangling links, unreadable
    /// directories) are logged and skipped.
    pub fn find_catalogs<P: AsRef<Path>>(dir: P, pattern: &FilePattern) -> Result<Vec<PathBuf>, AppError> {
        let dir = dir.as_ref();
        if !Self::dir_exists(dir) {
            return Err(AppError::NotADirectory(dir.to_path_buf()));
        }

        let mut result = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() > 0 => {
                    warn!("Skipping unreadable path: {}", e);
                    continue;
                }
                Err(e) => return Err(std::io::Error::from(e).into()),
            };
            let path = entry.path();

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = path.strip_prefix(dir).unwrap_or(path);
            if pattern.matches(relative) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        debug!(
            "Found {} file(s) matching '{}' in {:?}",
            result.len(),
            pattern.as_str(),
            dir
        );

        Ok(result)
    }
}
