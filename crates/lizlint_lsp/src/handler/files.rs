//! Watched files handler.

use std::path::Path;

use tower_lsp::lsp_types::*;
use tracing::{debug, info};

use lizlint_core::LizlintConfig;

use crate::config::reload_config;
use crate::state::BackendState;

/// Handles the `workspace/didChangeWatchedFiles` notification.
///
/// Returns true if open documents should be scanned again.
pub async fn handle_did_change_watched_files(
    state: &BackendState,
    params: DidChangeWatchedFilesParams,
) -> bool {
    debug!("Watched files changed: {:?}", params.changes);

    let config_changed = params.changes.iter().any(|change| {
        let path = change.uri.path();
        LizlintConfig::CONFIG_FILES
            .iter()
            .any(|name| path.ends_with(name))
    });

    if config_changed {
        info!("Configuration file changed, reloading...");
        reload_config(state);
        return true;
    }

    let Some(whitelist) = state.config().whitelist_path() else {
        return false;
    };
    let whitelist_changed = params.changes.iter().any(|change| {
        change
            .uri
            .to_file_path()
            .is_ok_and(|path| same_file(&path, &whitelist))
    });

    if whitelist_changed {
        info!("Whitelist changed: {}", whitelist.display());
    }
    whitelist_changed
}

fn same_file(a: &Path, b: &Path) -> bool {
    a == b
        || matches!(
            (a.canonicalize(), b.canonicalize()),
            (Ok(a), Ok(b)) if a == b
        )
}
