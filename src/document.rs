//! Immutable document snapshots.
//!
//! A `Snapshot` is the text of one document version plus a precomputed
//! line index. Cursor offsets are only meaningful against the snapshot
//! they were captured from; an edit produces a fresh snapshot.

use tower_lsp::lsp_types::Position;

/// One immutable version of a document's text.
#[derive(Debug, Clone)]
pub struct Snapshot {
    text: String,
    /// Byte offset of the first character of each line. Always starts
    /// with 0, so there is at least one (possibly empty) line.
    line_starts: Vec<usize>,
}

impl Snapshot {
    pub fn new(text: impl Into<String>) -> Snapshot {
        let text = text.into();
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Snapshot { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn slice(&self, range: std::ops::Range<usize>) -> &str {
        &self.text[range]
    }

    /// The line containing the given byte offset. An offset at the very
    /// end of the text belongs to the last line.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        self.line_starts.partition_point(|&s| s <= offset) - 1
    }

    /// Byte offset of the first character of `line`.
    pub fn line_start(&self, line: usize) -> usize {
        self.line_starts[line.min(self.line_starts.len() - 1)]
    }

    /// Byte offset just past the last content character of `line`,
    /// excluding the line terminator.
    pub fn line_end(&self, line: usize) -> usize {
        let line = line.min(self.line_starts.len() - 1);
        let mut end = match self.line_starts.get(line + 1) {
            Some(&next_start) => next_start - 1,
            None => self.text.len(),
        };
        if end > self.line_starts[line] && self.text.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        end
    }

    /// Convert an LSP Position (line, character) to a byte offset.
    /// Positions past the end of a line clamp to the line end; positions
    /// past the last line clamp to the end of the text.
    pub fn position_to_offset(&self, position: Position) -> usize {
        let line = position.line as usize;
        if line >= self.line_count() {
            return self.text.len();
        }
        let start = self.line_start(line);
        let end = self.line_end(line);
        let line_text = &self.text[start..end];
        // Character offsets are counted in characters, not bytes. This
        // treats LSP UTF-16 columns as scalar values, which matches for
        // everything outside the astral planes.
        line_text
            .char_indices()
            .nth(position.character as usize)
            .map(|(idx, _)| start + idx)
            .unwrap_or(end)
    }

    /// Convert a byte offset back to an LSP Position.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = self.line_of_offset(offset);
        let start = self.line_start(line);
        let character = self.text[start..offset].chars().count();
        Position {
            line: line as u32,
            character: character as u32,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
