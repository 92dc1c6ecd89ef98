//! Output formatting for validation reports.
//!
//! Provides JSON and plain-text formatters for `ValidationReport`.

use std::io::Write;

use crate::report::{Status, ValidationReport};

/// Format a `ValidationReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `ValidationReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    match report.status {
        Status::Success => writeln!(writer, "OpenAPI validation: SUCCESS")?,
        Status::Failed => {
            writeln!(writer, "OpenAPI validation: FAILED")?;
            for violation in &report.violations {
                writeln!(writer, "{violation}")?;
            }
        }
        Status::NotFound => {
            writeln!(writer, "ERROR: OpenAPI file not found. Tried:")?;
            for path in &report.tried {
                writeln!(writer, " - {}", path.display())?;
            }
        }
        Status::LoadError => {
            writeln!(writer, "ERROR: Failed to load YAML:")?;
            if let Some(error) = &report.error {
                writeln!(writer, "{error}")?;
            }
        }
    }
    Ok(())
}
