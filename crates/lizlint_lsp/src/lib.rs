//! lizlint LSP Server
//!
//! Language Server Protocol implementation for lizlint.
//! Runs Lizard on open and saved C++ documents and publishes its threshold
//! violations as diagnostics.

mod config;
mod conversion;
mod handler;
mod scan;
mod state;

use std::sync::Arc;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, info};

pub use handler::SCAN_ACTIVE_FILE;

use crate::config::{SETTINGS_SECTION, apply_settings};
use crate::state::{BackendState, SharedState};

/// The LSP backend for lizlint.
#[derive(Clone)]
pub struct Backend {
    /// LSP client for sending notifications.
    client: Client,
    /// Shared state
    state: SharedState,
}

impl Backend {
    /// Creates a new backend with the given client.
    ///
    /// Configuration is loaded from the workspace during `initialize`.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(BackendState::new()),
        }
    }

    /// Scans a document and publishes its diagnostics.
    ///
    /// The published set always replaces the previous one for the document,
    /// so a failed scan clears stale findings.
    async fn scan_and_publish(&self, uri: &Url) {
        debug!("Scanning document: {}", uri);

        let version = self.state.document(uri).map(|doc| doc.version);
        let scan = scan::scan_document(&self.state, uri).await;

        if let Some(command_line) = &scan.command_line {
            self.client
                .log_message(MessageType::LOG, command_line.as_str())
                .await;
        }
        for warning in &scan.warnings {
            self.client
                .show_message(MessageType::WARNING, warning.as_str())
                .await;
        }
        if let Some(message) = &scan.error {
            self.client
                .show_message(
                    MessageType::ERROR,
                    format!("Lizard failed; here's the exception message:\n{}", message),
                )
                .await;
        }

        self.client
            .publish_diagnostics(uri.clone(), scan.diagnostics, version)
            .await;
    }

    /// Scans every open document again.
    async fn rescan_open_documents(&self) {
        for uri in self.state.open_documents() {
            self.scan_and_publish(&uri).await;
        }
    }

    /// Pulls the `lizard` settings section from the client.
    async fn pull_settings(&self) -> bool {
        let items = vec![ConfigurationItem {
            scope_uri: None,
            section: Some(SETTINGS_SECTION.to_string()),
        }];
        match self.client.configuration(items).await {
            Ok(values) => values
                .first()
                .is_some_and(|value| apply_settings(&self.state, value)),
            Err(e) => {
                debug!("Client did not provide settings: {}", e);
                false
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handler::handle_initialize(&self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        handler::handle_initialized(&self.state, &self.client).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handler::handle_shutdown().await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = handler::handle_did_open(&self.state, params).await;
        self.scan_and_publish(&uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handler::handle_did_change(&self.state, params).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = handler::handle_did_save(&self.state, params).await;
        self.scan_and_publish(&uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = handler::handle_did_close(&self.state, params).await;

        // Clear diagnostics
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let applied = handler::handle_did_change_configuration(&self.state, &params).await
            || self.pull_settings().await;

        if applied {
            info!("Settings changed, scanning open documents");
            self.rescan_open_documents().await;
        }
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        if handler::handle_did_change_watched_files(&self.state, params).await {
            self.rescan_open_documents().await;
        }
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        match handler::handle_execute_command(&self.state, params).await? {
            Some(uri) => self.scan_and_publish(&uri).await,
            None => debug!("No active document to scan"),
        }
        Ok(None)
    }
}

/// Starts the LSP server.
///
/// This function does not return unless an error occurs or the server shuts down.
pub async fn run() {
    info!("lizlint LSP server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
