//! Lexical token classification.
//!
//! The completion engine never parses: it works over classified token
//! spans produced by a `TokenStream`. The trait is the seam where a host
//! editor's own classifier plugs in; `JsTokenStream` is the built-in
//! heuristic classifier for JavaScript-ish source. It only has to be
//! good enough for the backward context heuristics, not a real lexer.

use std::ops::Range;

use crate::document::Snapshot;

/// Reserved words of JavaScript and its close dialects. A token with
/// this text is classified as `Keyword`, and the trigger detector's
/// "bare identifier before require" rule refuses these.
pub const JS_KEYWORDS: &[&str] = &[
    "abstract",
    "async",
    "await",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "double",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "function",
    "goto",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "int",
    "interface",
    "let",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "volatile",
    "while",
    "with",
    "yield",
];

/// Multi-character operators, tried longest-first so `===` never splits
/// into `==` + `=`.
const MULTI_CHAR_OPERATORS: &[&str] = &[
    ">>>=", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "...", "=>", "==", "!=",
    "<=", ">=", "&&", "||", "??", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<",
    ">>", "**", "?.",
];

/// Syntactic category of a classified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Identifier,
    Keyword,
    StringLiteral,
    NumericLiteral,
    Operator,
    Punctuation,
    Comment,
}

impl TokenCategory {
    /// Whether a completion commit may replace a token of this category.
    /// Only identifier-like tokens qualify; punctuation, operators,
    /// literals, and comments never do.
    pub fn can_complete(self) -> bool {
        matches!(self, TokenCategory::Identifier | TokenCategory::Keyword)
    }
}

/// A lexical unit annotated with its category and byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedToken {
    pub text: String,
    pub category: TokenCategory,
    /// Byte offset of the token's first character.
    pub start: usize,
    /// Byte offset just past the token's last character.
    pub end: usize,
}

/// Produces classified token spans for an arbitrary text range on demand.
///
/// Tokens are non-overlapping, ordered by `start`, and confined to the
/// requested range: a token that would extend past the range end is
/// truncated at it. Whitespace produces no token.
pub trait TokenStream {
    fn classify(&self, snapshot: &Snapshot, range: Range<usize>) -> Vec<ClassifiedToken>;
}

/// The built-in heuristic classifier for JavaScript-ish source.
///
/// Strings and comments are handled line-locally: an unterminated string
/// or block comment extends to the end of the requested range. That is
/// exactly the truncation behavior the reverse scanner relies on when it
/// classifies up to the cursor.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsTokenStream;

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

impl TokenStream for JsTokenStream {
    fn classify(&self, snapshot: &Snapshot, range: Range<usize>) -> Vec<ClassifiedToken> {
        let base = range.start;
        let text = snapshot.slice(range);
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        let push = |tokens: &mut Vec<ClassifiedToken>,
                    text: &str,
                    category: TokenCategory,
                    from: usize,
                    to: usize| {
            tokens.push(ClassifiedToken {
                text: text[from..to].to_string(),
                category,
                start: base + from,
                end: base + to,
            });
        };

        while i < chars.len() {
            let (start, c) = chars[i];

            if c.is_whitespace() {
                i += 1;
                continue;
            }

            // Identifiers and keywords
            if is_ident_start(c) {
                while i < chars.len() && is_ident_char(chars[i].1) {
                    i += 1;
                }
                let end = chars.get(i).map(|&(o, _)| o).unwrap_or(text.len());
                let category = if JS_KEYWORDS.contains(&&text[start..end]) {
                    TokenCategory::Keyword
                } else {
                    TokenCategory::Identifier
                };
                push(&mut tokens, text, category, start, end);
                continue;
            }

            // String and template literals. The token includes its quotes;
            // an unterminated literal runs to the end of the range.
            if c == '\'' || c == '"' || c == '`' {
                i += 1;
                while i < chars.len() && chars[i].1 != c {
                    if chars[i].1 == '\\' {
                        i += 1;
                    }
                    i += 1;
                }
                if i < chars.len() {
                    i += 1; // closing quote
                }
                let end = chars.get(i).map(|&(o, _)| o).unwrap_or(text.len());
                push(&mut tokens, text, TokenCategory::StringLiteral, start, end);
                continue;
            }

            // Numbers. Deliberately loose: digits plus anything that can
            // legally continue a numeric literal (hex, exponents, dots).
            if c.is_ascii_digit() {
                while i < chars.len() && (is_ident_char(chars[i].1) || chars[i].1 == '.') {
                    i += 1;
                }
                let end = chars.get(i).map(|&(o, _)| o).unwrap_or(text.len());
                push(&mut tokens, text, TokenCategory::NumericLiteral, start, end);
                continue;
            }

            // Comments
            if c == '/' && chars.get(i + 1).is_some_and(|&(_, n)| n == '/') {
                push(&mut tokens, text, TokenCategory::Comment, start, text.len());
                break;
            }
            if c == '/' && chars.get(i + 1).is_some_and(|&(_, n)| n == '*') {
                i += 2;
                while i < chars.len() {
                    if chars[i].1 == '*' && chars.get(i + 1).is_some_and(|&(_, n)| n == '/') {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
                let end = chars.get(i).map(|&(o, _)| o).unwrap_or(text.len());
                push(&mut tokens, text, TokenCategory::Comment, start, end);
                continue;
            }

            // Multi-character operators, longest first
            let rest = &text[start..];
            if let Some(op) = MULTI_CHAR_OPERATORS.iter().find(|op| rest.starts_with(**op)) {
                push(&mut tokens, text, TokenCategory::Operator, start, start + op.len());
                i += op.chars().count();
                continue;
            }

            // Everything else is a single character
            let end = start + c.len_utf8();
            let category = match c {
                '(' | ')' | '[' | ']' | '{' | '}' | ',' | ';' | '.' | ':' => {
                    TokenCategory::Punctuation
                }
                _ => TokenCategory::Operator,
            };
            push(&mut tokens, text, category, start, end);
            i += 1;
        }

        tokens
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
