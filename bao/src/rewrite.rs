//! Single-file shebang rewrite.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use crate::config::{SOURCE_SHEBANG, TARGET_SHEBANG};

/// What [`rewrite_shebang`] did to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The first line was the source shebang and has been replaced.
    Changed,
    /// The file was left untouched.
    Unchanged,
}

/// Replace a leading `#!/usr/bin/env node` line with `#!/usr/bin/env bun`.
///
/// Only the first line (up to the first `\n`) is compared, byte for byte;
/// everything after it is written back unchanged. The existing file is
/// truncated and rewritten in place, so its mode and ownership survive.
///
/// At most `SOURCE_SHEBANG.len() + 1` bytes are read from files that do not
/// match, and those files are never opened for writing.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, read or written. A write
/// error after the truncating open can leave the file empty or partially
/// written.
pub fn rewrite_shebang(path: &Path) -> std::io::Result<RewriteOutcome> {
    let mut file = File::open(path)?;

    let mut head = Vec::with_capacity(SOURCE_SHEBANG.len() + 1);
    (&mut file)
        .take(SOURCE_SHEBANG.len() as u64 + 1)
        .read_to_end(&mut head)?;

    let Some(line_end) = source_line_end(&head) else {
        return Ok(RewriteOutcome::Unchanged);
    };

    let mut content = Vec::with_capacity(TARGET_SHEBANG.len() + line_end.len());
    content.extend_from_slice(TARGET_SHEBANG.as_bytes());
    content.extend_from_slice(line_end);
    file.read_to_end(&mut content)?;
    drop(file);

    let mut out = OpenOptions::new().write(true).truncate(true).open(path)?;
    out.write_all(&content)?;
    out.flush()?;
    Ok(RewriteOutcome::Changed)
}

/// If `head` starts with the complete source shebang line, return the line
/// terminator that followed it (`"\n"`, or empty at end of file).
fn source_line_end(head: &[u8]) -> Option<&[u8]> {
    let rest = head.strip_prefix(SOURCE_SHEBANG.as_bytes())?;
    match rest {
        [] | [b'\n'] => Some(rest),
        _ => None,
    }
}
