//! Fix run report types.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::FileFailure;

/// Summary of a fix run.
///
/// Per-file failures do not abort a run; check `failures` to find files that
/// could not be inspected.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct FixReport {
    /// Canonical scan root.
    pub root: PathBuf,
    /// Number of unique files inspected.
    pub scanned_files: usize,
    /// Number of files rewritten.
    pub changed_files: usize,
    /// Number of files that could not be inspected or rewritten.
    pub failed_files: usize,
    /// Canonical paths of the rewritten files, in discovery order.
    pub changed: Vec<PathBuf>,
    /// Per-file problems, including invalid exclude patterns.
    pub failures: Vec<FileFailure>,
}

impl FixReport {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self {
            root,
            scanned_files: 0,
            changed_files: 0,
            failed_files: 0,
            changed: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Whether every discovered file was inspected without error.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of inspected files left as they were.
    #[must_use]
    pub fn unchanged_files(&self) -> usize {
        self.scanned_files - self.changed_files
    }
}
