//! Shared output formatting for fix reports.
//!
//! Colour/terminal formatting stays in the CLI.

use std::io::Write;

use crate::report::FixReport;

/// Format a `FixReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &FixReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `FixReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &FixReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer, "Scanned {}", report.root.display())?;
    writeln!(writer, "  Files scanned:  {}", report.scanned_files)?;
    writeln!(writer, "  Files changed:  {}", report.changed_files)?;
    writeln!(writer, "  Files failed:   {}", report.failed_files)?;

    if !report.changed.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Changed:")?;
        for path in &report.changed {
            writeln!(writer, "  {}", path.display())?;
        }
    }

    if !report.failures.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Failures:")?;
        for failure in &report.failures {
            writeln!(writer, "  {}", failure.format_human_readable())?;
        }
    }

    Ok(())
}
