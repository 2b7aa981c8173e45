//! RequiemLSP - module-path completion for CommonJS `require()` calls.
//!
//! The engine is deliberately heuristic: a reverse token scanner walks
//! classified tokens backward from the cursor, a small state machine
//! decides whether the position is a valid `require(...)` argument, and
//! a catalog walks ancestor `node_modules` directories plus the current
//! folder for offerable module paths. No AST, no lookahead past the
//! cursor.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tower_lsp::Client;
use tower_lsp::lsp_types::*;

pub mod cache;
pub mod completion;
pub mod config;
pub mod document;
pub mod scanner;
pub mod server;
pub mod tokens;
pub mod types;

use crate::completion::catalog::ModuleCandidateCatalog;
use crate::config::Config;
use crate::document::Snapshot;

pub struct Backend {
    pub(crate) name: String,
    pub(crate) version: String,
    /// Current snapshot of every open document, keyed by URI.
    pub(crate) open_files: Arc<Mutex<HashMap<String, Snapshot>>>,
    /// Workspace root captured during `initialize`.
    pub(crate) workspace_root: Arc<Mutex<Option<PathBuf>>>,
    /// Module candidate discovery with its per-file cache.
    pub(crate) catalog: ModuleCandidateCatalog,
    pub(crate) config: Arc<Mutex<Config>>,
    pub(crate) client: Option<Client>,
}

impl Backend {
    pub fn new(client: Client, config: Config) -> Self {
        Self {
            name: "RequiemLSP".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            catalog: ModuleCandidateCatalog::new(),
            config: Arc::new(Mutex::new(config)),
            client: Some(client),
        }
    }

    pub fn new_test() -> Self {
        Self {
            name: "RequiemLSP".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            catalog: ModuleCandidateCatalog::new(),
            config: Arc::new(Mutex::new(Config::default())),
            client: None,
        }
    }

    pub fn new_test_with_workspace(root: PathBuf) -> Self {
        let backend = Self::new_test();
        if let Ok(mut workspace_root) = backend.workspace_root.lock() {
            *workspace_root = Some(root);
        }
        backend
    }

    /// The stored snapshot for a URI, if the document is open.
    pub(crate) fn snapshot(&self, uri: &str) -> Option<Snapshot> {
        if let Ok(files) = self.open_files.lock() {
            files.get(uri).cloned()
        } else {
            None
        }
    }

    pub(crate) fn store_snapshot(&self, uri: &str, text: &str) {
        if let Ok(mut files) = self.open_files.lock() {
            files.insert(uri.to_string(), Snapshot::new(text));
        }
    }

    pub(crate) fn drop_snapshot(&self, uri: &str) {
        if let Ok(mut files) = self.open_files.lock() {
            files.remove(uri);
        }
    }

    pub(crate) fn workspace_root_path(&self) -> Option<PathBuf> {
        self.workspace_root
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    pub(crate) fn current_config(&self) -> Config {
        self.config
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }
}
