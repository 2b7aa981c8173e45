//! Replaceable-span resolution for completion commits.
//!
//! Given a cursor position, decide which stretch of existing text a
//! committed completion overwrites. Shared contract: the require path
//! and the general completion path must agree with the scanner's notion
//! of "a token", so this works over the same line-local classification.

use crate::document::Snapshot;
use crate::tokens::TokenStream;
use crate::types::ReplacementSpan;

/// The span a completion commit should replace at `position`, or `None`
/// when the caller must synthesize a zero-length span there (cursor in
/// whitespace, inside a non-completable token, or on an empty line).
pub fn applicable_span(
    snapshot: &Snapshot,
    stream: &dyn TokenStream,
    position: usize,
) -> Option<ReplacementSpan> {
    let position = position.min(snapshot.len());
    let line = snapshot.line_of_offset(position);
    let line_start = snapshot.line_start(line);
    let line_end = snapshot.line_end(line);

    // Extend the classified range one character past the cursor so the
    // token immediately at the cursor is visible.
    let boundary = if position < line_end {
        position
            + snapshot.slice(position..line_end)
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1)
    } else {
        position
    };

    let tokens = stream.classify(snapshot, line_start..boundary);
    let last = tokens.last()?;

    // Cursor in trailing whitespace.
    if position > last.end {
        return None;
    }

    // Cursor strictly inside the last token.
    if position > last.start {
        return last
            .category
            .can_complete()
            .then_some(ReplacementSpan {
                start: last.start,
                length: last.end - last.start,
            });
    }

    // Cursor exactly at the last token's start.
    let second = tokens.len().checked_sub(2).map(|i| &tokens[i]);
    if last.category.can_complete() {
        let detached = match second {
            None => true,
            Some(s) => s.end < position || !s.category.can_complete(),
        };
        if detached {
            return Some(ReplacementSpan {
                start: last.start,
                length: last.end - last.start,
            });
        }
    }

    // Cursor sitting exactly between two adjacent completable tokens:
    // the one just typed wins.
    if let Some(s) = second
        && s.end == position
        && s.category.can_complete()
    {
        return Some(ReplacementSpan {
            start: s.start,
            length: s.end - s.start,
        });
    }

    None
}

// ─── Tests ──────────────────────────────────────────────────────────────────
