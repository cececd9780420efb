//! LSP Backend state management.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tower_lsp::lsp_types::Url;

use lizlint_core::LizlintConfig;

/// Document content and version cache.
#[derive(Debug, Clone)]
pub(crate) struct DocumentData {
    pub text: String,
    pub version: i32,
    pub language_id: String,
}

/// Shared backend state.
pub(crate) struct BackendState {
    /// Document contents cache.
    pub documents: RwLock<HashMap<Url, DocumentData>>,
    /// Current configuration. Replaced wholesale on change.
    pub config: RwLock<LizlintConfig>,
    /// Workspace root path.
    pub workspace_root: RwLock<Option<PathBuf>>,
    /// Most recently opened or saved document.
    pub active_document: RwLock<Option<Url>>,
    /// Whether the client accepts dynamic file watcher registration.
    pub watch_files: AtomicBool,
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendState")
            .field("documents", &"<HashMap<Url, DocumentData>>")
            .field("config", &self.config)
            .field("workspace_root", &self.workspace_root)
            .field("active_document", &self.active_document)
            .field("watch_files", &self.watch_files)
            .finish()
    }
}

impl BackendState {
    /// Creates a new empty state.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            config: RwLock::new(LizlintConfig::new()),
            workspace_root: RwLock::new(None),
            active_document: RwLock::new(None),
            watch_files: AtomicBool::new(false),
        }
    }

    /// Returns a copy of the current configuration.
    pub fn config(&self) -> LizlintConfig {
        match self.config.read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replaces the current configuration.
    pub fn set_config(&self, config: LizlintConfig) {
        match self.config.write() {
            Ok(mut guard) => *guard = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }

    pub fn workspace_root(&self) -> Option<PathBuf> {
        self.workspace_root.read().ok()?.clone()
    }

    /// Returns a copy of an open document.
    pub fn document(&self, uri: &Url) -> Option<DocumentData> {
        self.documents.read().ok()?.get(uri).cloned()
    }

    /// URIs of every open document.
    pub fn open_documents(&self) -> Vec<Url> {
        match self.documents.read() {
            Ok(docs) => docs.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn active_document(&self) -> Option<Url> {
        self.active_document.read().ok()?.clone()
    }

    pub fn set_active_document(&self, uri: Option<Url>) {
        if let Ok(mut active) = self.active_document.write() {
            *active = uri;
        }
    }

    pub fn watch_files(&self) -> bool {
        self.watch_files.load(Ordering::Relaxed)
    }

    pub fn set_watch_files(&self, enabled: bool) {
        self.watch_files.store(enabled, Ordering::Relaxed);
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<BackendState>;
