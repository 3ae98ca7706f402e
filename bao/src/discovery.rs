//! Candidate discovery.
//!
//! Walks the scan root depth-first and yields every regular file reachable
//! under the configured policy:
//! - Directories are descended into only when `recursive` is set
//! - Symlinks are resolved to their canonical target and never descended into
//! - Broken links, link loops and non-regular targets are skipped silently
//! - Targets outside the canonical root are skipped when `skip_outside` is set
//! - Devices, pipes and sockets are skipped

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use crate::config::ScanOptions;
use crate::error::{FailureKind, FileFailure};

/// A regular file eligible for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Canonical path of the file.
    pub path: PathBuf,
    /// The symlink this file was reached through, if any.
    pub link: Option<PathBuf>,
    /// Whether `path` lies inside the canonical scan root.
    pub inside_root: bool,
}

/// Lazy iterator over the candidates below a scan root.
///
/// Not restartable; build a new one for another pass.
///
/// Failing to list the root itself ends the iteration early; the error is
/// kept for [`Discovery::take_root_error`]. Errors below the root are skipped.
pub struct Discovery {
    root: PathBuf,
    skip_outside: bool,
    exclude: Vec<Pattern>,
    walker: walkdir::IntoIter,
    root_error: Option<walkdir::Error>,
}

impl Discovery {
    /// Start discovery at `root`, which must already be canonical.
    ///
    /// Regular files are yielded under `root` as-is, so a non-canonical root
    /// would break the canonical-path guarantee of [`Candidate::path`].
    #[must_use]
    pub fn new(root: PathBuf, options: &ScanOptions, exclude: Vec<Pattern>) -> Self {
        let mut walk = WalkDir::new(&root)
            .follow_links(false)
            .min_depth(1)
            .sort_by_file_name();
        if !options.recursive {
            walk = walk.max_depth(1);
        }
        Self {
            root,
            skip_outside: options.skip_outside,
            exclude,
            walker: walk.into_iter(),
            root_error: None,
        }
    }

    /// The canonical scan root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The error from listing the root directory, if that failed.
    pub fn take_root_error(&mut self) -> Option<walkdir::Error> {
        self.root_error.take()
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        matches_exclude(relative, &self.exclude)
    }

    fn follow_link(&self, link: &Path) -> Option<Candidate> {
        let Some(target) = resolve_link_target(link) else {
            tracing::debug!(link = %link.display(), "Skipping symlink without a regular file target");
            return None;
        };
        let inside_root = target.starts_with(&self.root);
        if self.skip_outside && !inside_root {
            tracing::debug!(
                link = %link.display(),
                target = %target.display(),
                "Skipping symlink that resolves outside the scan root"
            );
            return None;
        }
        Some(Candidate {
            path: target,
            link: Some(link.to_path_buf()),
            inside_root,
        })
    }
}

impl Iterator for Discovery {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    self.root_error = Some(err);
                    return None;
                }
                Err(err) => {
                    tracing::debug!(
                        path = ?err.path(),
                        error = %err,
                        "Skipping unreadable directory entry"
                    );
                    continue;
                }
            };

            let file_type = entry.file_type();
            if self.is_excluded(entry.path()) {
                tracing::debug!(path = %entry.path().display(), "Skipping excluded entry");
                if file_type.is_dir() {
                    self.walker.skip_current_dir();
                }
                continue;
            }

            if file_type.is_file() {
                return Some(Candidate {
                    path: entry.into_path(),
                    link: None,
                    inside_root: true,
                });
            }

            if file_type.is_symlink()
                && let Some(candidate) = self.follow_link(entry.path())
            {
                return Some(candidate);
            }
        }
    }
}

/// Resolve a symlink to its canonical target.
///
/// Returns `None` when the link is broken, loops, cannot be read, or points
/// at anything other than a regular file.
#[must_use]
pub fn resolve_link_target(link: &Path) -> Option<PathBuf> {
    let target = std::fs::canonicalize(link).ok()?;
    let metadata = std::fs::metadata(&target).ok()?;
    metadata.is_file().then_some(target)
}

/// Compile exclude globs. Invalid patterns are returned as failures and
/// otherwise ignored.
#[must_use]
pub fn compile_excludes(patterns: &[String]) -> (Vec<Pattern>, Vec<FileFailure>) {
    let mut compiled = Vec::with_capacity(patterns.len());
    let mut failures = Vec::new();
    for pat_str in patterns {
        match Pattern::new(pat_str) {
            Ok(pat) => compiled.push(pat),
            Err(e) => failures.push(FileFailure {
                file: PathBuf::from(pat_str),
                kind: FailureKind::InvalidExcludePattern,
                message: format!("Invalid exclude glob pattern '{pat_str}': {e}"),
            }),
        }
    }
    (compiled, failures)
}

/// Check if a root-relative path or its file name matches any of the
/// exclude patterns. `*` does not cross `/`.
fn matches_exclude(relative: &Path, exclude: &[Pattern]) -> bool {
    if exclude.is_empty() {
        return false;
    }
    let options = MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::new()
    };
    let path_str = relative.to_string_lossy();
    exclude.iter().any(|pattern| {
        pattern.matches_with(&path_str, options)
            || relative
                .file_name()
                .is_some_and(|name| pattern.matches_with(&name.to_string_lossy(), options))
    })
}
