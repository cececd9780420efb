//! Analysis of a complete scanner report.

use serde::Serialize;
use tracing::{debug, warn};

use crate::builder::build_findings;
use crate::diagnostic::{Finding, SOURCE};
use crate::document::DocumentView;
use crate::limits::ScanLimits;
use crate::record::{ReportLine, parse_line};

/// Findings and operator-facing warnings from one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Findings for the scanned document, in report order.
    pub findings: Vec<Finding>,
    /// Advisories from the scanner and lines that could not be parsed.
    pub warnings: Vec<String>,
}

impl ScanReport {
    /// Returns true if the scan produced any finding.
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// Parses the standard output of a scan and maps it onto `document`.
///
/// Unparseable lines become warnings and contribute no findings. Every
/// finding carries the [`SOURCE`] tag.
pub fn analyze_output<D: DocumentView + ?Sized>(
    output: &str,
    limits: &ScanLimits,
    document: &D,
) -> ScanReport {
    let mut report = ScanReport::default();

    for line in output.trim().lines() {
        match parse_line(line) {
            ReportLine::Function(record) => {
                debug!(
                    "{} at line {}: {} CCN, {} length, {} PARAM",
                    record.qualified_name,
                    record.line + 1,
                    record.ccn,
                    record.length,
                    record.parameters
                );
                report
                    .findings
                    .extend(build_findings(&record, limits, document));
            }
            ReportLine::Warning(message) => report.warnings.push(message),
            ReportLine::Ignored => {}
            ReportLine::Unparseable(line) => {
                warn!("Failed to parse report line: {}", line);
                report.warnings.push(format!("failed to parse '{}'", line));
            }
        }
    }

    for finding in &mut report.findings {
        finding.source = Some(SOURCE.to_string());
    }

    report
}
