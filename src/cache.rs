//! Per-file candidate cache.
//!
//! Walking ancestor `node_modules` trees is the expensive half of a
//! require completion, so the merged project candidate list is cached by
//! file identity. The cache itself is policy-free: population happens in
//! the catalog, invalidation in the server layer when a file closes or
//! the dependency surface changes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::types::ModuleCandidate;

/// Maps a project file to its previously computed candidate sequence.
#[derive(Debug, Default)]
pub struct CompletionCache {
    entries: Mutex<HashMap<PathBuf, Arc<Vec<ModuleCandidate>>>>,
}

impl CompletionCache {
    pub fn new() -> CompletionCache {
        CompletionCache::default()
    }

    /// The cached candidates for `file`, if any.
    pub fn try_get(&self, file: &Path) -> Option<Arc<Vec<ModuleCandidate>>> {
        if let Ok(entries) = self.entries.lock() {
            entries.get(file).cloned()
        } else {
            None
        }
    }

    /// Remember the candidates for `file`, replacing any previous entry.
    pub fn store(&self, file: &Path, candidates: Arc<Vec<ModuleCandidate>>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(file.to_path_buf(), candidates);
        }
    }

    /// Drop the entry for a single file.
    pub fn invalidate(&self, file: &Path) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(file);
        }
    }

    /// Drop everything, e.g. after a `package.json` change.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
