//! Backward token scanning.
//!
//! `ReverseTokens` walks classified tokens backward from a cursor offset:
//! most recent token first, ending with the first token of the document.
//! Classification is re-requested per line instead of holding a full
//! document token buffer; lines are cheap to reclassify and the trigger
//! detector gives up after a handful of tokens anyway.

use crate::document::Snapshot;
use crate::tokens::{ClassifiedToken, TokenStream};

/// A finite, lazy backward sequence of classified tokens.
///
/// Not restartable: construct a fresh scanner to walk again.
pub struct ReverseTokens<'a> {
    snapshot: &'a Snapshot,
    stream: &'a dyn TokenStream,
    /// Next line to classify, or `None` once line 0 has been consumed.
    line: Option<usize>,
    /// Classification stops here on the next line: the cursor on the
    /// first line, the line end on every earlier line.
    boundary: usize,
    /// Tokens of the line currently being drained, popped from the back.
    pending: Vec<ClassifiedToken>,
}

impl<'a> ReverseTokens<'a> {
    pub fn new(snapshot: &'a Snapshot, stream: &'a dyn TokenStream, from: usize) -> ReverseTokens<'a> {
        let from = from.min(snapshot.len());
        ReverseTokens {
            snapshot,
            stream,
            line: Some(snapshot.line_of_offset(from)),
            boundary: from,
            pending: Vec::new(),
        }
    }
}

impl Iterator for ReverseTokens<'_> {
    type Item = ClassifiedToken;

    fn next(&mut self) -> Option<ClassifiedToken> {
        loop {
            if let Some(token) = self.pending.pop() {
                return Some(token);
            }

            let line = self.line?;
            let start = self.snapshot.line_start(line);
            self.pending = self
                .stream
                .classify(self.snapshot, start..self.boundary.max(start));

            if line == 0 {
                self.line = None;
            } else {
                self.line = Some(line - 1);
                self.boundary = self.snapshot.line_end(line - 1);
            }
            // A blank line produced no tokens; keep walking up.
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
