//! Workspace configuration and command handlers.

use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::config::{SETTINGS_SECTION, apply_settings};
use crate::handler::SCAN_ACTIVE_FILE;
use crate::state::BackendState;

/// Handles the `workspace/didChangeConfiguration` notification.
///
/// Returns false when the notification carries no `lizard` section, in
/// which case the caller should pull the section from the client.
pub async fn handle_did_change_configuration(
    state: &BackendState,
    params: &DidChangeConfigurationParams,
) -> bool {
    debug!("Configuration changed: {}", params.settings);

    match params.settings.get(SETTINGS_SECTION) {
        Some(_) => apply_settings(state, &params.settings),
        None => false,
    }
}

/// Handles the `workspace/executeCommand` request.
///
/// Returns the document to scan, taken from the first argument or else the
/// active document.
pub async fn handle_execute_command(
    state: &BackendState,
    params: ExecuteCommandParams,
) -> Result<Option<Url>> {
    if params.command != SCAN_ACTIVE_FILE {
        return Err(Error::invalid_params(format!(
            "Unknown command: {}",
            params.command
        )));
    }

    let requested = params
        .arguments
        .first()
        .and_then(|arg| arg.as_str())
        .map(Url::parse)
        .transpose()
        .map_err(|e| Error::invalid_params(format!("Invalid document URI: {}", e)))?;

    Ok(requested.or_else(|| state.active_document()))
}
