//! Data types used throughout the RequiemLSP server.
//!
//! This module contains the "model" structs and enums shared by the
//! completion pipeline: quote state, replacement spans, and the module
//! candidates produced by the catalog.

/// Which quote character, if any, already opens the require argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteMode {
    /// No opening quote has been typed yet.
    None,
    /// The argument opens with `'`.
    Single,
    /// The argument opens with `"`.
    Double,
}

impl QuoteMode {
    /// Map an opening quote character to its mode. Backticks are not
    /// accepted: a template literal never holds a static module path.
    pub fn from_char(c: char) -> Option<QuoteMode> {
        match c {
            '\'' => Some(QuoteMode::Single),
            '"' => Some(QuoteMode::Double),
            _ => None,
        }
    }

    /// The quote character for this mode, if one is already present.
    pub fn quote_char(self) -> Option<char> {
        match self {
            QuoteMode::None => None,
            QuoteMode::Single => Some('\''),
            QuoteMode::Double => Some('"'),
        }
    }
}

/// The stretch of existing text a completion commit will overwrite.
///
/// A zero-length span means "insert at `start`, do not replace".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacementSpan {
    /// Byte offset where the replacement begins.
    pub start: usize,
    /// Number of bytes to overwrite.
    pub length: usize,
}

impl ReplacementSpan {
    /// A zero-length insertion point at `start`.
    pub fn empty(start: usize) -> ReplacementSpan {
        ReplacementSpan { start, length: 0 }
    }

    /// Byte offset just past the replaced text.
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// What kind of thing a module candidate points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// A fixed runtime module (`http`, `fs`, ...).
    Builtin,
    /// A source file, either under `node_modules` or next to the current file.
    File,
    /// A package folder under `node_modules`.
    Package,
    /// A package-like folder next to the current file.
    Folder,
}

/// A single offerable module specifier.
///
/// `display_text` is the string inserted on commit. Uniqueness is not
/// enforced: a project file may shadow a builtin and both will appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCandidate {
    /// The module specifier as it will be inserted (e.g. `http`, `./util`).
    pub display_text: String,
    /// Human-readable detail shown next to the entry.
    pub description: String,
    /// Kind of entry, used to pick the completion icon.
    pub kind: CandidateKind,
}

impl ModuleCandidate {
    pub fn new(
        display_text: impl Into<String>,
        description: impl Into<String>,
        kind: CandidateKind,
    ) -> ModuleCandidate {
        ModuleCandidate {
            display_text: display_text.into(),
            description: description.into(),
            kind,
        }
    }
}

/// Everything the assembler needs after a successful require trigger:
/// the quote state of the argument and the span a commit replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequireContext {
    /// Quote state of the partially-typed argument.
    pub quote: QuoteMode,
    /// Span the committed candidate overwrites.
    pub span: ReplacementSpan,
}
