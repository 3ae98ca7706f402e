//! Error types for a fix run.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Conditions that abort a run before any file is touched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FixError {
    /// The resolved scan root does not exist.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The resolved scan root exists but is not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// No explicit root was given and the home directory is unknown.
    #[error("Cannot determine home directory; pass a directory explicitly")]
    NoHomeDirectory,

    /// The scan root could not be canonicalized.
    #[error("Failed to resolve {}: {source}", path.display())]
    Canonicalize {
        /// The root as given.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The scan root exists but its entries could not be listed.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        /// Canonical scan root.
        path: PathBuf,
        /// Underlying traversal error.
        #[source]
        source: walkdir::Error,
    },
}

/// The kind of per-file problem recorded in a report.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum FailureKind {
    /// The file could not be read or written.
    Io,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
}

/// A per-file problem. Recorded and skipped, never fatal.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct FileFailure {
    /// The file (or pattern) involved.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: FailureKind,
    /// Human-readable description.
    pub message: String,
}

impl FileFailure {
    pub(crate) fn io(file: PathBuf, err: &std::io::Error) -> Self {
        Self {
            file,
            kind: FailureKind::Io,
            message: err.to_string(),
        }
    }

    /// Format the failure for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: {}", self.file.display(), self.message)
    }
}
