/*!
 * Error types for the icu-po-lint application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions. Grammar violations
 * inside messages are not errors at this level: they become findings.
 */

use std::path::PathBuf;
use thiserror::Error;

pub use crate::icu::error::UnknownErrorKind;

/// Errors that can occur while reading a PO catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The PO parser rejected the catalog
    #[error("{0}")]
    Parse(String),

    /// `msgstr[N]` with a non-numeric or out of range index
    #[error("line {line}: invalid msgstr index")]
    InvalidPluralIndex {
        /// 1-based line number
        line: usize,
    },
}

/// Errors in the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file pattern is empty
    #[error("File pattern must not be empty")]
    EmptyPattern,

    /// The file pattern could not be compiled
    #[error("Invalid file pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending glob
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// An ignore-list entry is not a known error kind
    #[error(transparent)]
    UnknownErrorKind(#[from] UnknownErrorKind),
}

/// Errors that abort a whole run
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// The directory to scan does not exist or is not a directory
    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
