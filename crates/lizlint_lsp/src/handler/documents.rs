//! Document lifecycle handlers (open, change, save, close).

use tower_lsp::lsp_types::*;
use tracing::{debug, error};

use crate::state::{DocumentData, SharedState};

/// Handles the `textDocument/didOpen` notification.
///
/// Returns the URI to scan.
pub async fn handle_did_open(state: &SharedState, params: DidOpenTextDocumentParams) -> Url {
    let doc = params.text_document;
    debug!("Document opened: {} ({})", doc.uri, doc.language_id);

    {
        let mut docs = match state.documents.write() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                return doc.uri;
            }
        };
        docs.insert(
            doc.uri.clone(),
            DocumentData {
                text: doc.text,
                version: doc.version,
                language_id: doc.language_id,
            },
        );
    }

    state.set_active_document(Some(doc.uri.clone()));
    doc.uri
}

/// Handles the `textDocument/didChange` notification.
///
/// Only the cached text is updated; scans run on open and save.
pub async fn handle_did_change(state: &SharedState, params: DidChangeTextDocumentParams) {
    debug!("Document changed: {}", params.text_document.uri);

    let Some(change) = params.content_changes.into_iter().last() else {
        return;
    };

    let mut docs = match state.documents.write() {
        Ok(guard) => guard,
        Err(e) => {
            error!("Documents lock poisoned: {}", e);
            return;
        }
    };
    if let Some(doc) = docs.get_mut(&params.text_document.uri) {
        doc.text = change.text;
        doc.version = params.text_document.version;
    }
}

/// Handles the `textDocument/didSave` notification.
///
/// Returns the URI to scan.
pub async fn handle_did_save(state: &SharedState, params: DidSaveTextDocumentParams) -> Url {
    let uri = params.text_document.uri;
    debug!("Document saved: {}", uri);

    if let Some(text) = params.text {
        match state.documents.write() {
            Ok(mut docs) => {
                if let Some(doc) = docs.get_mut(&uri) {
                    doc.text = text;
                }
            }
            Err(e) => error!("Documents lock poisoned: {}", e),
        }
    }

    state.set_active_document(Some(uri.clone()));
    uri
}

/// Handles the `textDocument/didClose` notification.
///
/// Returns the URI whose diagnostics should be cleared.
pub async fn handle_did_close(state: &SharedState, params: DidCloseTextDocumentParams) -> Url {
    let uri = params.text_document.uri;
    debug!("Document closed: {}", uri);

    {
        let mut docs = match state.documents.write() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                return uri;
            }
        };
        docs.remove(&uri);
    }

    if state.active_document().as_ref() == Some(&uri) {
        state.set_active_document(None);
    }
    uri
}
