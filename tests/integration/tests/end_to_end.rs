//! End-to-end tests for the scan pipeline
//!
//! Runs a stand-in scanner process that replays a canned report, then maps
//! the report onto the scanned document.

use std::fs;
use std::path::{Path, PathBuf};

use lizlint_core::{
    DocumentView, Metric, Position, Range, ScanLimits, ScanReport, Scanner, TextDocument,
    analyze_output, scanner_arguments,
};
use pretty_assertions::assert_eq;

/// A C++ source where `bar` is declared on line 10.
fn source() -> String {
    let mut text = String::new();
    for i in 1..10 {
        text.push_str(&format!("// line {}\n", i));
    }
    text.push_str("int foo::bar(int a, int b) {\n  return a + b;\n}\n");
    text
}

/// Writes a script that records its arguments and prints `report`.
#[cfg(unix)]
fn fake_scanner(dir: &Path, report: &str) -> PathBuf {
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    let report_path = dir.join("report.txt");
    fs::write(&report_path, report).unwrap();

    let path = dir.join("fake-lizard");
    {
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "#!/bin/sh").unwrap();
        writeln!(file, "echo \"$@\" > args.txt").unwrap();
        writeln!(file, "cat '{}'", report_path.display()).unwrap();
        writeln!(file, "exit 1").unwrap();
        file.sync_all().unwrap();
    }
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
fn scan(report: &str, limits: &ScanLimits) -> (ScanReport, String) {
    let dir = tempfile::tempdir().unwrap();
    let scanner = fake_scanner(dir.path(), report);
    let target = dir.path().join("a.cpp");
    fs::write(&target, source()).unwrap();

    let output = Scanner::new(scanner.display().to_string())
        .with_working_dir(dir.path())
        .run(&scanner_arguments(limits, Some(&target)))
        .unwrap();
    assert_eq!(output.exit_code, Some(1));
    assert_eq!(output.exception_message(), None);

    let report = analyze_output(&output.stdout, limits, &TextDocument::new(source()));
    let args = fs::read_to_string(dir.path().join("args.txt")).unwrap();
    (report, args.trim().to_string())
}

const BAR_REPORT: &str = "a.cpp:10:1: foo::bar has 5 NLOC, 12 CCN, 20 token, 2 PARAM, 8 length\n";

#[cfg(unix)]
mod process {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_ccn_violation() {
        let limits = ScanLimits::builder().ccn(10).build().unwrap();
        let (report, args) = scan(BAR_REPORT, &limits);

        assert_eq!(report.findings.len(), 1);
        let finding = &report.findings[0];
        assert_eq!(finding.category, Metric::Ccn);
        assert_eq!(finding.message, "bar has 12 CCN; the maximum is 10.");
        assert_eq!(
            finding.range,
            Range::new(Position::new(9, 9), Position::new(9, 12))
        );
        assert_eq!(finding.source.as_deref(), Some("Lizard"));
        assert!(report.warnings.is_empty());

        assert!(args.starts_with("--warnings_only --CCN=10 "), "{}", args);
        assert!(args.ends_with("a.cpp"), "{}", args);
    }

    #[test]
    fn ccn_and_length_violations() {
        let limits = ScanLimits::builder().ccn(10).length(5).build().unwrap();
        let (report, args) = scan(BAR_REPORT, &limits);

        let categories: Vec<_> = report.findings.iter().map(|f| f.category).collect();
        assert_eq!(categories, [Metric::Ccn, Metric::Length]);
        assert_eq!(
            report.findings[1].message,
            "bar has 8 length; the maximum is 5."
        );
        assert!(args.starts_with("--warnings_only --CCN=10 --length=5 "), "{}", args);
    }

    #[test]
    fn unparseable_output_becomes_warning() {
        let limits = ScanLimits::builder().ccn(10).build().unwrap();
        let (report, _) = scan("garbage text\n", &limits);

        assert!(report.findings.is_empty());
        assert_eq!(report.warnings, ["failed to parse 'garbage text'"]);
    }

    #[test]
    fn global_scope_spans_document() {
        let limits = ScanLimits::builder().length(100).build().unwrap();
        let report_text = "a.cpp:1:1: *global* has 150 NLOC, 1 CCN, 900 token, 0 PARAM, 150 length\n";
        let (report, _) = scan(report_text, &limits);

        assert_eq!(report.findings.len(), 1);
        let finding = &report.findings[0];
        assert!(finding.message.starts_with("The global scope has"));
        let last_line = TextDocument::new(source()).line_count() - 1;
        assert_eq!(
            finding.range,
            Range::new(Position::new(0, 0), Position::new(last_line, 0))
        );
    }

    #[test]
    fn ignorable_warnings_are_dropped() {
        let limits = ScanLimits::builder().ccn(10).build().unwrap();
        let report_text = format!("WARNING: could not parse macro!!!!!\n{}", BAR_REPORT);
        let (report, _) = scan(&report_text, &limits);

        assert_eq!(report.findings.len(), 1);
        assert!(report.warnings.is_empty());
    }
}

#[test]
fn report_is_mapped_onto_edited_document() {
    // `bar` moved one line down after the scan; the reported line no longer
    // names it, so the finding sits at the start of that line.
    let limits = ScanLimits::builder().ccn(10).build().unwrap();
    let edited = format!("\n{}", source());
    let report = analyze_output(BAR_REPORT, &limits, &TextDocument::new(&edited));

    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].range, Range::new(Position::new(9, 0), Position::new(9, 0)));
}
