//! Text output formatter

use lizlint_core::Finding;

use crate::commands::scan::FileReport;

pub fn output_text(reports: &[FileReport]) {
    for file in reports {
        if file.report.findings.is_empty() {
            continue;
        }

        println!("\n{}:", file.path.display());
        for finding in &file.report.findings {
            println!("  {}", format_finding(finding));
        }
    }

    let total_issues: usize = reports.iter().map(|r| r.report.findings.len()).sum();

    println!();
    println!(
        "Scanned {} files, found {} issues",
        reports.len(),
        total_issues
    );
}

/// One finding as `line:column severity [category]: message`, 1-indexed.
fn format_finding(finding: &Finding) -> String {
    format!(
        "{}:{} {} [{}]: {}",
        finding.range.start.line + 1,
        finding.range.start.character + 1,
        finding.severity.as_str(),
        finding.category,
        finding.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lizlint_core::{Metric, Position, Range};

    #[test]
    fn test_format_finding_is_one_indexed() {
        let finding = Finding::new(
            Metric::Length,
            "draw has 80 length; the maximum is 60.",
            Range::new(Position::new(9, 4), Position::new(9, 8)),
        );
        assert_eq!(
            format_finding(&finding),
            "10:5 warning [Function Length]: draw has 80 length; the maximum is 60."
        );
    }
}
