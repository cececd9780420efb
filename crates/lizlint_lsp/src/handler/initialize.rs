//! Initialize and shutdown handlers.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::{debug, error, info};

use lizlint_core::LizlintConfig;

use crate::config::reload_config;
use crate::state::{BackendState, SharedState};

/// Command that scans the active document, or the document given as the
/// first argument.
pub const SCAN_ACTIVE_FILE: &str = "lizard.scanActiveFile";

const WATCHER_REGISTRATION_ID: &str = "lizlint-watched-files";

/// Handles the `initialize` LSP request.
pub async fn handle_initialize(
    state: &BackendState,
    params: InitializeParams,
) -> Result<InitializeResult> {
    info!("lizlint LSP server initializing...");

    let watch_files = params
        .capabilities
        .workspace
        .as_ref()
        .and_then(|ws| ws.did_change_watched_files.as_ref())
        .and_then(|caps| caps.dynamic_registration)
        .unwrap_or(false);
    state.set_watch_files(watch_files);

    #[allow(deprecated)]
    let root = params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .map(|folder| folder.uri.clone())
        .or(params.root_uri)
        .and_then(|u| u.to_file_path().ok());

    if let Some(path) = root {
        match state.workspace_root.write() {
            Ok(mut root) => {
                *root = Some(path);
            }
            Err(e) => {
                error!("Workspace root lock poisoned: {}", e);
                return Ok(InitializeResult::default());
            }
        }

        reload_config(state);
    }

    if let Some(options) = params.initialization_options.as_ref() {
        crate::config::apply_settings(state, options);
    }

    Ok(InitializeResult {
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(
                TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::FULL),
                    save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                        include_text: Some(true),
                    })),
                    ..Default::default()
                },
            )),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: vec![SCAN_ACTIVE_FILE.to_string()],
                work_done_progress_options: Default::default(),
            }),
            ..Default::default()
        },
        server_info: Some(ServerInfo {
            name: "lizlint-lsp".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    })
}

/// Handles the `initialized` LSP notification.
///
/// Registers watchers for the configuration files and the whitelist when
/// the client supports it. Registration runs in the background so a client
/// that never answers does not stall the server.
pub async fn handle_initialized(state: &SharedState, client: &tower_lsp::Client) {
    client
        .log_message(MessageType::INFO, "lizlint LSP server initialized!")
        .await;

    if !state.watch_files() {
        return;
    }

    let watchers = watched_file_patterns(&state.config())
        .into_iter()
        .map(|pattern| FileSystemWatcher {
            glob_pattern: GlobPattern::String(pattern),
            kind: None,
        })
        .collect();
    let options = DidChangeWatchedFilesRegistrationOptions { watchers };
    let register_options = match serde_json::to_value(options) {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to encode watcher registration: {}", e);
            return;
        }
    };

    let client = client.clone();
    tokio::spawn(async move {
        let registration = Registration {
            id: WATCHER_REGISTRATION_ID.to_string(),
            method: "workspace/didChangeWatchedFiles".to_string(),
            register_options: Some(register_options),
        };
        if let Err(e) = client.register_capability(vec![registration]).await {
            debug!("File watcher registration failed: {}", e);
        }
    });
}

/// Handles the `shutdown` LSP request.
pub async fn handle_shutdown() -> Result<()> {
    info!("lizlint LSP server shutting down...");
    Ok(())
}

fn watched_file_patterns(config: &LizlintConfig) -> Vec<String> {
    let mut patterns: Vec<String> = LizlintConfig::CONFIG_FILES
        .iter()
        .map(|name| format!("**/{}", name))
        .collect();

    if let Some(name) = config
        .whitelist_path()
        .and_then(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
    {
        patterns.push(format!("**/{}", name));
    }

    patterns
}
