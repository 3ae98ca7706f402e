//! # bao
//!
//! Rewrites the `#!/usr/bin/env node` interpreter line of installed scripts
//! to `#!/usr/bin/env bun`, so globally installed packages published for
//! Node run under Bun.
//!
//! The crate is split into **discovery** (which files to look at, including
//! symlink resolution and scan-root policy) and the **rewriter** (what to do
//! with one file). [`fix_shebang`] drives both and guarantees each physical
//! file is attempted at most once per run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use bao::{fix_shebang, ScanOptions};
//!
//! let options = ScanOptions::default().recursive(true);
//! let report = fix_shebang(Some(Path::new("/usr/local/share/bun/bin")), &options).unwrap();
//! println!("Files scanned: {}", report.scanned_files);
//! println!("Files changed: {}", report.changed_files);
//! ```

mod config;
pub mod discovery;
mod error;
pub mod output;
mod report;
mod rewrite;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub use config::{
    DEFAULT_BIN_DIR, SOURCE_SHEBANG, ScanOptions, TARGET_SHEBANG, resolve_root,
    resolve_root_with_home,
};
pub use discovery::{Candidate, Discovery};
pub use error::{FailureKind, FileFailure, FixError};
pub use report::FixReport;
pub use rewrite::{RewriteOutcome, rewrite_shebang};

/// Fix shebangs under `root`, or under `~/.bun/bin` when `root` is `None`.
///
/// This is the primary public API.
///
/// # Errors
///
/// Returns an error if no root is given and the home directory is unknown,
/// or if the resolved root does not exist, is not a directory, cannot be
/// canonicalized, or cannot be listed. Nothing is modified in that case.
/// Per-file problems never abort the run; they are collected in
/// [`FixReport::failures`].
pub fn fix_shebang(root: Option<&Path>, options: &ScanOptions) -> Result<FixReport, FixError> {
    let root = resolve_root(root)?;
    fix_shebang_in(&root, options)
}

/// Fix shebangs under an already resolved root.
///
/// # Errors
///
/// Same as [`fix_shebang`], minus home directory resolution.
pub fn fix_shebang_in(root: &Path, options: &ScanOptions) -> Result<FixReport, FixError> {
    if !root.exists() {
        return Err(FixError::DirectoryNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(FixError::NotADirectory(root.to_path_buf()));
    }
    let canonical_root = root.canonicalize().map_err(|source| FixError::Canonicalize {
        path: root.to_path_buf(),
        source,
    })?;

    let (exclude, pattern_failures) = discovery::compile_excludes(&options.exclude);
    let mut report = FixReport::new(canonical_root.clone());
    for failure in pattern_failures {
        tracing::warn!(pattern = %failure.file.display(), "{}", failure.message);
        report.failures.push(failure);
    }

    tracing::debug!(
        root = %canonical_root.display(),
        recursive = options.recursive,
        skip_outside = options.skip_outside,
        "Scanning for node shebangs"
    );

    // Keyed by canonical path: several links may name the same file.
    let mut visited: HashSet<PathBuf> = HashSet::new();

    let mut discovery = Discovery::new(canonical_root, options, exclude);
    for candidate in discovery.by_ref() {
        if !visited.insert(candidate.path.clone()) {
            tracing::debug!(path = %candidate.path.display(), "Already processed; skipping");
            continue;
        }
        process_candidate(candidate, options.verbose, &mut report);
    }
    // The root is listed before anything is yielded, so nothing was touched.
    if let Some(source) = discovery.take_root_error() {
        return Err(FixError::ReadDir {
            path: report.root,
            source,
        });
    }

    tracing::debug!(
        scanned = report.scanned_files,
        changed = report.changed_files,
        failed = report.failed_files,
        "Scan finished"
    );
    Ok(report)
}

fn process_candidate(candidate: Candidate, verbose: bool, report: &mut FixReport) {
    let Candidate {
        path,
        link,
        inside_root,
    } = candidate;

    if verbose {
        match &link {
            Some(link) => tracing::info!(
                path = %path.display(),
                link = %link.display(),
                inside_root,
                "Opening file"
            ),
            None => tracing::info!(path = %path.display(), "Opening file"),
        }
    }

    match rewrite_shebang(&path) {
        Ok(RewriteOutcome::Changed) => {
            tracing::info!(
                path = %path.display(),
                from = SOURCE_SHEBANG,
                to = TARGET_SHEBANG,
                "Rewrote shebang"
            );
            report.scanned_files += 1;
            report.changed_files += 1;
            report.changed.push(path);
        }
        Ok(RewriteOutcome::Unchanged) => {
            if verbose {
                tracing::info!(path = %path.display(), "Skipped; no node shebang");
            }
            report.scanned_files += 1;
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Failed to fix shebang");
            report.failed_files += 1;
            report.failures.push(FileFailure::io(path, &err));
        }
    }
}
