//! Completion request handling.
//!
//! Ties the pipeline together for one request: trigger detection, then
//! candidate discovery and assembly on the require path, or the shared
//! span contract on the general path.

use std::path::PathBuf;

use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::Backend;
use crate::completion::{assembler, catalog, span, trigger};
use crate::document::Snapshot;
use crate::tokens::JsTokenStream;
use crate::types::ReplacementSpan;

impl Backend {
    /// Build the completion response for a cursor position, or `None`
    /// when nothing applies. Every failure along the way (unknown
    /// document, non-file URI, filesystem trouble) degrades rather than
    /// erroring: a require trigger with no project still offers the
    /// runtime builtins.
    pub fn completion_response(&self, uri: &str, position: Position) -> Option<CompletionResponse> {
        let snapshot = self.snapshot(uri)?;
        let cursor = snapshot.position_to_offset(position);
        let stream = JsTokenStream;
        let config = self.current_config();

        if let Some(context) = trigger::require_context(&snapshot, &stream, cursor) {
            debug!(uri, cursor, quote = ?context.quote, "require completion triggered");

            let builtins = catalog::builtin_candidates(&config.extra_builtins);
            let project = file_path_of(uri).map(|file| {
                self.catalog
                    .project_candidates(&file, self.workspace_root_path().as_deref())
            });

            let merged = assembler::assemble(
                builtins,
                project.as_deref().map(Vec::as_slice).unwrap_or(&[]),
            );
            let items = assembler::completion_items(
                &merged,
                &context,
                &snapshot,
                config.quote.quote_char(),
            );
            return Some(CompletionResponse::Array(items));
        }

        self.general_response(&snapshot, cursor)
    }

    /// The general (non-require) path. The real symbol engine lives in
    /// the host; this side only owns the span contract, and uses it to
    /// offer the `require` identifier itself while it is being typed in
    /// a position where the call would be valid.
    fn general_response(&self, snapshot: &Snapshot, cursor: usize) -> Option<CompletionResponse> {
        let stream = JsTokenStream;
        let span = span::applicable_span(snapshot, &stream, cursor)
            .unwrap_or_else(|| ReplacementSpan::empty(cursor));

        let word = snapshot.slice(span.start..span.end());
        if word.is_empty() || !"require".starts_with(word) {
            return None;
        }
        if !trigger::position_allows_require(snapshot, &stream, span.start) {
            return None;
        }

        let range = Range {
            start: snapshot.offset_to_position(span.start),
            end: snapshot.offset_to_position(span.end()),
        };
        Some(CompletionResponse::Array(vec![CompletionItem {
            label: "require".to_string(),
            kind: Some(CompletionItemKind::FUNCTION),
            detail: Some("Load a module".to_string()),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                range,
                new_text: "require".to_string(),
            })),
            ..CompletionItem::default()
        }]))
    }

    /// Invalidate the cached candidates behind a document URI.
    pub(crate) fn invalidate_candidates(&self, uri: &str) {
        if let Some(file) = file_path_of(uri) {
            self.catalog.invalidate(&file);
        }
    }

    /// Drop every cached candidate list, e.g. after watched-file events.
    pub(crate) fn clear_candidates(&self) {
        self.catalog.clear();
    }
}

fn file_path_of(uri: &str) -> Option<PathBuf> {
    Url::parse(uri).ok()?.to_file_path().ok()
}
