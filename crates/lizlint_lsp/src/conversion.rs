//! LSP type conversion utilities.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

use lizlint_core::{Finding, Severity};

/// Converts a finding to an LSP diagnostic.
pub fn to_lsp_diagnostic(finding: &Finding) -> Diagnostic {
    let severity = match finding.severity {
        Severity::Warning => DiagnosticSeverity::WARNING,
    };

    Diagnostic {
        range: to_lsp_range(finding.range),
        severity: Some(severity),
        code: Some(NumberOrString::String(finding.category.code().to_string())),
        source: finding.source.clone(),
        message: finding.message.clone(),
        ..Default::default()
    }
}

/// Converts a core range to an LSP range.
pub fn to_lsp_range(range: lizlint_core::Range) -> Range {
    Range::new(
        Position::new(range.start.line, range.start.character),
        Position::new(range.end.line, range.end.character),
    )
}
