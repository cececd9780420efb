//! Scanning of a single document.

use tower_lsp::lsp_types::{Diagnostic, Url};
use tracing::{debug, error};

use lizlint_core::{Language, Scanner, TextDocument, analyze_output, scanner_arguments};

use crate::conversion::to_lsp_diagnostic;
use crate::state::SharedState;

/// Result of scanning one document.
#[derive(Debug, Default)]
pub(crate) struct DocumentScan {
    /// Diagnostics to publish, replacing the previous set.
    pub diagnostics: Vec<Diagnostic>,
    /// Warnings to show to the user.
    pub warnings: Vec<String>,
    /// Scanner failure to show to the user.
    pub error: Option<String>,
    /// Command line that was run, for the client log.
    pub command_line: Option<String>,
}

/// Scans a document and maps the report onto its current text.
///
/// Documents outside a workspace, non-file URIs and unsupported languages
/// produce an empty scan without running the scanner.
pub(crate) async fn scan_document(state: &SharedState, uri: &Url) -> DocumentScan {
    let Ok(path) = uri.to_file_path() else {
        debug!("Skipping scan for non-file URI: {}", uri);
        return DocumentScan::default();
    };

    let Some(root) = state.workspace_root() else {
        debug!("No workspace root, skipping scan: {}", uri);
        return DocumentScan::default();
    };

    let (text, language_id) = match state.document(uri) {
        Some(doc) => (doc.text, doc.language_id),
        None => match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                let language = Language::from_path(&path);
                (text, language.map(Language::language_id).unwrap_or_default().to_string())
            }
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                return DocumentScan::default();
            }
        },
    };

    if Language::from_language_id(&language_id).is_none() {
        debug!("Skipping scan for language '{}': {}", language_id, uri);
        return DocumentScan::default();
    }

    let config = state.config();
    let args = scanner_arguments(&config.limits, Some(&path));
    let scanner = Scanner::new(config.executable.clone()).with_working_dir(root);
    let command_line = format!("> {} {}", scanner.executable(), args.join(" "));

    let run = tokio::task::spawn_blocking(move || scanner.run(&args)).await;
    let output = match run {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            error!("Scan failed: {}", e);
            return DocumentScan {
                error: Some(e.to_string()),
                command_line: Some(command_line),
                ..Default::default()
            };
        }
        Err(e) => {
            error!("Scan task failed: {}", e);
            return DocumentScan {
                error: Some(e.to_string()),
                command_line: Some(command_line),
                ..Default::default()
            };
        }
    };

    let report = analyze_output(&output.stdout, &config.limits, &TextDocument::new(&text));

    DocumentScan {
        diagnostics: report.findings.iter().map(to_lsp_diagnostic).collect(),
        warnings: report.warnings,
        error: output.exception_message().map(str::to_string),
        command_line: Some(command_line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BackendState, DocumentData};
    use std::sync::Arc;

    fn state_with_root(root: &std::path::Path) -> SharedState {
        let state = Arc::new(BackendState::new());
        *state.workspace_root.write().unwrap() = Some(root.to_path_buf());
        state
    }

    fn open(state: &SharedState, uri: &Url, language_id: &str, text: &str) {
        state.documents.write().unwrap().insert(
            uri.clone(),
            DocumentData {
                text: text.to_string(),
                version: 1,
                language_id: language_id.to_string(),
            },
        );
    }

    #[tokio::test]
    async fn test_non_file_uri_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_root(dir.path());
        let uri = Url::parse("untitled:Untitled-1").unwrap();

        let scan = scan_document(&state, &uri).await;

        assert!(scan.diagnostics.is_empty());
        assert!(scan.command_line.is_none());
    }

    #[tokio::test]
    async fn test_unsupported_language_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_root(dir.path());
        let uri = Url::from_file_path(dir.path().join("a.py")).unwrap();
        open(&state, &uri, "python", "def f(): pass\n");

        let scan = scan_document(&state, &uri).await;

        assert!(scan.diagnostics.is_empty());
        assert!(scan.error.is_none());
        assert!(scan.command_line.is_none());
    }

    #[tokio::test]
    async fn test_missing_workspace_root_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let state = Arc::new(BackendState::new());
        let uri = Url::from_file_path(dir.path().join("a.cpp")).unwrap();
        open(&state, &uri, "cpp", "int main() {}\n");

        let scan = scan_document(&state, &uri).await;

        assert!(scan.diagnostics.is_empty());
        assert!(scan.command_line.is_none());
    }

    #[tokio::test]
    async fn test_missing_executable_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_root(dir.path());
        let mut config = state.config();
        config.executable = "lizlint-test-no-such-scanner".to_string();
        state.set_config(config);
        let uri = Url::from_file_path(dir.path().join("a.cpp")).unwrap();
        open(&state, &uri, "cpp", "int main() {}\n");

        let scan = scan_document(&state, &uri).await;

        assert!(scan.diagnostics.is_empty());
        let error = scan.error.unwrap();
        assert!(error.contains("lizlint-test-no-such-scanner"), "{}", error);
        assert!(
            scan.command_line
                .unwrap()
                .starts_with("> lizlint-test-no-such-scanner --warnings_only")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_scanner_exception_keeps_report() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("lizard");
        std::fs::write(
            &script,
            "#!/bin/sh\n\
             echo 'a.cpp:1:1: main has 5 NLOC, 12 CCN, 20 token, 0 PARAM, 8 length'\n\
             echo 'ValueError: bad extension' >&2\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let state = state_with_root(dir.path());
        let mut config = state.config();
        config.executable = script.display().to_string();
        config.limits = lizlint_core::ScanLimits::builder().ccn(10).build().unwrap();
        state.set_config(config);
        let uri = Url::from_file_path(dir.path().join("a.cpp")).unwrap();
        open(&state, &uri, "cpp", "int main() {}\n");

        let scan = scan_document(&state, &uri).await;

        assert_eq!(scan.diagnostics.len(), 1);
        assert_eq!(scan.diagnostics[0].message, "main has 12 CCN; the maximum is 10.");
        assert_eq!(scan.error.as_deref(), Some("ValueError: bad extension"));
    }
}
