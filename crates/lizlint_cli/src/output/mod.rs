//! Output formatting module

mod json;
mod text;

use miette::Result;

use crate::cli::OutputFormat;
use crate::commands::scan::FileReport;

/// Prints the reports and returns true if any finding was produced.
pub fn output_results(reports: &[FileReport], format: OutputFormat) -> Result<bool> {
    let has_findings = reports.iter().any(|r| r.report.has_findings());

    match format {
        OutputFormat::Json => json::output_json(reports)?,
        OutputFormat::Text => text::output_text(reports),
    }

    Ok(has_findings)
}
