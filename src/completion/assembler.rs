//! Completion set assembly.
//!
//! Merges builtin and project candidates, applies the display ordering,
//! and converts everything to LSP `CompletionItem`s carrying the text
//! edit that commits a candidate into the require argument.

use std::cmp::Ordering;

use tower_lsp::lsp_types::*;

use crate::document::Snapshot;
use crate::types::{CandidateKind, ModuleCandidate, QuoteMode, RequireContext};

/// Concatenate builtins and project candidates and sort for display:
/// `./`-relative specifiers after everything else, plain lexicographic
/// order within each group. The sort is stable, so equal names keep
/// their source order (builtins before a shadowing project file).
pub fn assemble(
    builtins: Vec<ModuleCandidate>,
    project: &[ModuleCandidate],
) -> Vec<ModuleCandidate> {
    let mut merged = builtins;
    merged.extend_from_slice(project);
    merged.sort_by(candidate_order);
    merged
}

fn candidate_order(a: &ModuleCandidate, b: &ModuleCandidate) -> Ordering {
    let a_relative = a.display_text.starts_with('.');
    let b_relative = b.display_text.starts_with('.');
    a_relative
        .cmp(&b_relative)
        .then_with(|| a.display_text.cmp(&b.display_text))
}

fn completion_kind(kind: CandidateKind) -> CompletionItemKind {
    match kind {
        CandidateKind::Builtin | CandidateKind::Package => CompletionItemKind::MODULE,
        CandidateKind::File => CompletionItemKind::FILE,
        CandidateKind::Folder => CompletionItemKind::FOLDER,
    }
}

/// The text a commit inserts over the replacement span. With no quote
/// typed yet the candidate is wrapped in the ambient default quote; with
/// an open quote the span swallowed everything up to and including any
/// closing quote, so the insertion restores exactly one.
fn insertion_text(candidate: &ModuleCandidate, quote: QuoteMode, default_quote: char) -> String {
    match quote.quote_char() {
        None => format!("{default_quote}{}{default_quote}", candidate.display_text),
        Some(q) => format!("{}{q}", candidate.display_text),
    }
}

/// Package the sorted candidates into LSP completion items over the
/// resolved replacement span.
pub fn completion_items(
    candidates: &[ModuleCandidate],
    context: &RequireContext,
    snapshot: &Snapshot,
    default_quote: char,
) -> Vec<CompletionItem> {
    let range = Range {
        start: snapshot.offset_to_position(context.span.start),
        end: snapshot.offset_to_position(context.span.end()),
    };

    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| CompletionItem {
            label: candidate.display_text.clone(),
            kind: Some(completion_kind(candidate.kind)),
            detail: Some(candidate.description.clone()),
            filter_text: Some(candidate.display_text.clone()),
            // Clients re-sort by label unless told otherwise; preserve
            // the assembled order.
            sort_text: Some(format!("{index:04}")),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                range,
                new_text: insertion_text(candidate, context.quote, default_quote),
            })),
            ..CompletionItem::default()
        })
        .collect()
}

// ─── Tests ──────────────────────────────────────────────────────────────────
