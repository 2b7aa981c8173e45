//! Module candidate discovery.
//!
//! Builds the list of offerable module specifiers: the fixed runtime
//! module names, packages found by walking ancestor `node_modules`
//! directories, and sibling/child source files of the current file.
//! Project results are cached per file; builtins are rebuilt on every
//! request because they are a handful of static strings.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::cache::CompletionCache;
use crate::types::{CandidateKind, ModuleCandidate};

/// The conventional directory dependency packages are stored under.
pub const MODULES_DIR: &str = "node_modules";
/// A folder containing this file is a package, not a plain folder.
pub const PACKAGE_DESCRIPTOR: &str = "package.json";
/// A folder containing this file is requirable by its folder name alone.
pub const DEFAULT_MAIN: &str = "index.js";
/// The recognized source file extension.
pub const SOURCE_EXT: &str = "js";

/// Module names baked into the Node.js runtime.
pub const NODE_BUILTINS: &[&str] = &[
    "assert",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "https",
    "module",
    "net",
    "os",
    "path",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "timers",
    "tls",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "zlib",
];

/// The fixed runtime modules plus any configured extras.
pub fn builtin_candidates(extra: &[String]) -> Vec<ModuleCandidate> {
    NODE_BUILTINS
        .iter()
        .map(|name| ModuleCandidate::new(*name, "built-in module", CandidateKind::Builtin))
        .chain(
            extra
                .iter()
                .map(|name| ModuleCandidate::new(name.clone(), "configured module", CandidateKind::Builtin)),
        )
        .collect()
}

/// Discovers and caches the project-sourced module candidates for a file.
#[derive(Debug, Default)]
pub struct ModuleCandidateCatalog {
    cache: CompletionCache,
}

impl ModuleCandidateCatalog {
    pub fn new() -> ModuleCandidateCatalog {
        ModuleCandidateCatalog::default()
    }

    /// All module specifiers reachable from `file`: ancestor
    /// `node_modules` contents first, then `./`-relative peers and
    /// children. Results are cached by file identity until invalidated.
    ///
    /// `workspace_root` bounds the ancestor walk when known; without it
    /// the walk continues to the filesystem root.
    pub fn project_candidates(
        &self,
        file: &Path,
        workspace_root: Option<&Path>,
    ) -> Arc<Vec<ModuleCandidate>> {
        if let Some(hit) = self.cache.try_get(file) {
            debug!(file = %file.display(), "candidate cache hit");
            return hit;
        }

        let mut out = Vec::new();
        if let Some(dir) = file.parent() {
            for ancestor in dir.ancestors() {
                if let Some(modules_dir) = find_child_ci(ancestor, MODULES_DIR)
                    && modules_dir.is_dir()
                {
                    collect_modules_dir(&modules_dir, &modules_dir, &mut out);
                }
                if workspace_root.is_some_and(|root| ancestor == root) {
                    break;
                }
            }
            collect_local(dir, dir, file, &mut out);
        }
        debug!(file = %file.display(), count = out.len(), "walked project candidates");

        let candidates = Arc::new(out);
        self.cache.store(file, candidates.clone());
        candidates
    }

    /// Drop the cached candidates for one file.
    pub fn invalidate(&self, file: &Path) {
        self.cache.invalidate(file);
    }

    /// Drop all cached candidates.
    pub fn clear(&self) {
        self.cache.clear();
    }
}

/// Case-insensitive lookup of an immediate child by name.
fn find_child_ci(dir: &Path, name: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        if entry.file_name().to_string_lossy().eq_ignore_ascii_case(name) {
            return Some(entry.path());
        }
    }
    None
}

/// Whether a folder is a self-contained package: it carries a package
/// descriptor or a default main file. Such folders are offered as one
/// candidate and never traversed further.
fn is_package_dir(dir: &Path) -> bool {
    find_child_ci(dir, PACKAGE_DESCRIPTOR).is_some_and(|p| p.is_file())
        || find_child_ci(dir, DEFAULT_MAIN).is_some_and(|p| p.is_file())
}

fn has_source_ext(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(SOURCE_EXT))
}

/// `dir` entries sorted by name, so candidate order does not depend on
/// readdir order.
fn sorted_entries(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(entries) => entries.flatten().map(|e| e.path()).collect(),
        Err(_) => Vec::new(),
    };
    entries.sort();
    entries
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The path of `path` relative to `base`, with forward slashes and the
/// recognized extension stripped - the shape a require argument takes.
fn specifier_relative_to(base: &Path, path: &Path, strip_ext: bool) -> String {
    let path = if strip_ext { path.with_extension("") } else { path.to_path_buf() };
    let relative = path.strip_prefix(base).unwrap_or(&path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// The `description` field of a folder's package descriptor, if readable.
fn package_description(dir: &Path) -> Option<String> {
    let content = std::fs::read_to_string(dir.join(PACKAGE_DESCRIPTOR)).ok()?;
    let json: serde_json::Value = serde_json::from_str(&content).ok()?;
    json.get("description")?.as_str().map(str::to_string)
}

/// Recursively enumerate a `node_modules` directory. Candidate names are
/// relative to `modules_root`; package folders terminate the recursion,
/// plain folders support nested/namespaced layouts.
fn collect_modules_dir(modules_root: &Path, dir: &Path, out: &mut Vec<ModuleCandidate>) {
    for path in sorted_entries(dir) {
        let name = file_name(&path);
        if name.starts_with('.') {
            continue;
        }

        if path.is_file() {
            if has_source_ext(&path) {
                out.push(ModuleCandidate::new(
                    specifier_relative_to(modules_root, &path, true),
                    path.display().to_string(),
                    CandidateKind::File,
                ));
            }
        } else if path.is_dir() {
            // A nested modules directory belongs to some inner package.
            if name.eq_ignore_ascii_case(MODULES_DIR) {
                continue;
            }
            if is_package_dir(&path) {
                let description = package_description(&path)
                    .unwrap_or_else(|| path.display().to_string());
                out.push(ModuleCandidate::new(
                    specifier_relative_to(modules_root, &path, false),
                    description,
                    CandidateKind::Package,
                ));
            } else {
                collect_modules_dir(modules_root, &path, out);
            }
        }
    }
}

/// Enumerate peers and children of the current file's folder. Candidate
/// names carry a `./` prefix relative to `base`. Package-like subfolders
/// are exposed as one candidate; plain subfolders are recursed into.
fn collect_local(base: &Path, dir: &Path, current_file: &Path, out: &mut Vec<ModuleCandidate>) {
    for path in sorted_entries(dir) {
        let name = file_name(&path);
        if name.starts_with('.') || name.eq_ignore_ascii_case(MODULES_DIR) {
            continue;
        }

        if path.is_file() {
            if has_source_ext(&path) && path != current_file {
                out.push(ModuleCandidate::new(
                    format!("./{}", specifier_relative_to(base, &path, true)),
                    path.display().to_string(),
                    CandidateKind::File,
                ));
            }
        } else if path.is_dir() {
            if is_package_dir(&path) {
                let description = package_description(&path)
                    .unwrap_or_else(|| path.display().to_string());
                out.push(ModuleCandidate::new(
                    format!("./{}", specifier_relative_to(base, &path, false)),
                    description,
                    CandidateKind::Folder,
                ));
            } else {
                collect_local(base, &path, current_file, out);
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
