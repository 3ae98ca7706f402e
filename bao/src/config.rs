//! Scan options and scan root resolution.
//!
//! Flag parsing is a CLI concern; the library only sees the resolved
//! [`ScanOptions`] and an optional explicit root.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::FixError;

/// Interpreter line that gets replaced.
pub const SOURCE_SHEBANG: &str = "#!/usr/bin/env node";

/// Interpreter line written in its place.
pub const TARGET_SHEBANG: &str = "#!/usr/bin/env bun";

/// Scan root used when none is given, relative to the home directory.
pub const DEFAULT_BIN_DIR: &str = ".bun/bin";

/// Options controlling a single fix run.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct ScanOptions {
    /// Descend into subdirectories of the scan root.
    pub recursive: bool,
    /// Trace every file as it is opened, not only the ones that change.
    pub verbose: bool,
    /// Skip symlinks whose resolved target lies outside the scan root.
    ///
    /// **Defaults to `false`**: global installs are usually symlinks into a
    /// package store elsewhere on disk, and those targets are exactly what
    /// needs fixing.
    pub skip_outside: bool,
    /// Glob patterns matched against each entry's file name and its path
    /// relative to the scan root (`sub/*.js`). `*` does not cross `/`.
    /// Matching files are not inspected; matching directories are pruned.
    pub exclude: Vec<String>,
}

impl ScanOptions {
    /// Set [`ScanOptions::recursive`].
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set [`ScanOptions::verbose`].
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set [`ScanOptions::skip_outside`].
    #[must_use]
    pub fn skip_outside(mut self, skip_outside: bool) -> Self {
        self.skip_outside = skip_outside;
        self
    }

    /// Replace the exclude patterns.
    #[must_use]
    pub fn exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }
}

/// Resolve the scan root: the explicit path if given, otherwise
/// [`DEFAULT_BIN_DIR`] under `home`.
///
/// Existence is not checked here.
///
/// # Errors
///
/// Returns [`FixError::NoHomeDirectory`] when no explicit root is given and
/// `home` is `None`.
pub fn resolve_root_with_home(
    explicit: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, FixError> {
    if let Some(root) = explicit {
        return Ok(normalize(root));
    }
    let home = home.ok_or(FixError::NoHomeDirectory)?;
    Ok(normalize(&home.join(DEFAULT_BIN_DIR)))
}

/// Resolve the scan root against the current user's home directory.
///
/// # Errors
///
/// Returns [`FixError::NoHomeDirectory`] when no explicit root is given and
/// the platform reports no home directory.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf, FixError> {
    let dirs = BaseDirs::new();
    resolve_root_with_home(explicit, dirs.as_ref().map(BaseDirs::home_dir))
}

/// Lexical cleanup only (`.` components and repeated separators); symlinks
/// are resolved later by canonicalization.
fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}
