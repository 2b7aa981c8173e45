//! Require-call trigger detection.
//!
//! Decides, from a backward token walk alone, whether the cursor sits in
//! a position where `require(...)` module-path completion is valid. This
//! is a small finite-state matcher over classified tokens, not a parser:
//! it has no lookahead past the cursor and reconstructs just enough
//! context to reject member access (`obj.require(`) while accepting
//! partially-typed and mid-edit code.

use crate::document::Snapshot;
use crate::scanner::ReverseTokens;
use crate::tokens::{ClassifiedToken, JS_KEYWORDS, TokenStream};
use crate::types::{QuoteMode, ReplacementSpan, RequireContext};

/// Operators, punctuation, and statement keywords after which an
/// expression may start. A `require` preceded by one of these is a call
/// in expression position, never a member access.
const EXPRESSION_PREFIXES: &[&str] = &[
    // assignment
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "<<=", ">>=", ">>>=", "&=", "|=", "^=", "&&=",
    "||=", "??=",
    // arithmetic, logical, bitwise
    "+", "-", "*", "/", "%", "**", "!", "~", "&", "|", "^", "<<", ">>", ">>>", "&&", "||", "??",
    // comparison
    "==", "!=", "===", "!==", "<", ">", "<=", ">=",
    // punctuation that opens an expression
    "(", "[", "{", ",", ":", ";", "?", "=>",
    // statement keywords
    "return", "throw", "typeof", "new", "in", "case", "delete", "void", "instanceof", "do",
    "else", "yield",
];

/// Outcome of a successful trigger match.
struct Detection {
    /// The partially-typed string argument, when one was peeked and the
    /// caller allowed it. Excluded from the `(`/`require` matching.
    quote_token: Option<ClassifiedToken>,
}

/// Whether the cursor is in a `require(...)` completion position.
///
/// `eat_open_paren` demands that the token immediately before the cursor
/// (or before the peeked string argument) is exactly `(`; pass `false`
/// when the paren is already known to be present. `allow_quote` permits
/// a partially-typed string argument between the cursor and the paren.
pub fn should_trigger(
    snapshot: &Snapshot,
    stream: &dyn TokenStream,
    cursor: usize,
    eat_open_paren: bool,
    allow_quote: bool,
) -> bool {
    detect(snapshot, stream, cursor, eat_open_paren, allow_quote).is_some()
}

fn detect(
    snapshot: &Snapshot,
    stream: &dyn TokenStream,
    cursor: usize,
    eat_open_paren: bool,
    allow_quote: bool,
) -> Option<Detection> {
    let mut tokens = ReverseTokens::new(snapshot, stream, cursor);
    let mut quote_token = None;

    if allow_quote {
        match tokens.next() {
            Some(first) if first.text.starts_with('\'') || first.text.starts_with('"') => {
                // The string argument must not participate in the
                // `(`/`require` matching below.
                quote_token = Some(first);
            }
            _ => {
                // The peeked token (if any) has to participate in the
                // next match; the scanner is not restartable, so start a
                // fresh walk from the original cursor.
                tokens = ReverseTokens::new(snapshot, stream, cursor);
            }
        }
    }

    if eat_open_paren && tokens.next()?.text != "(" {
        return None;
    }

    if tokens.next()?.text != "require" {
        return None;
    }

    let triggered = match tokens.next() {
        // `require` opens the document.
        None => true,
        Some(prev) => {
            let cursor_line = snapshot.line_of_offset(cursor);
            let prev_line = snapshot.line_of_offset(prev.start);
            // A previous-line token means `require` starts a fresh
            // statement. The `;` suffix check covers classifiers that
            // fold a call and its terminator into one trailing token.
            prev_line != cursor_line
                || prev.text.ends_with(';')
                || EXPRESSION_PREFIXES.contains(&prev.text.as_str())
                || is_plain_identifier(&prev.text)
        }
    };

    triggered.then_some(Detection { quote_token })
}

/// Whether `require` at offset `at` would be in a valid call position,
/// judged only by the tokens preceding `at`. Used by the general
/// completion path before offering the bare `require` identifier.
pub fn position_allows_require(snapshot: &Snapshot, stream: &dyn TokenStream, at: usize) -> bool {
    let mut tokens = ReverseTokens::new(snapshot, stream, at);
    match tokens.next() {
        None => true,
        Some(prev) => {
            let prev_line = snapshot.line_of_offset(prev.start);
            prev_line != snapshot.line_of_offset(at)
                || prev.text.ends_with(';')
                || EXPRESSION_PREFIXES.contains(&prev.text.as_str())
                || is_plain_identifier(&prev.text)
        }
    }
}

/// Entirely identifier characters and not a reserved word.
///
/// Deliberately permissive: two adjacent identifiers are not valid
/// JavaScript, but mid-edit code hits that state constantly and the
/// completion should still come up.
fn is_plain_identifier(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !JS_KEYWORDS.contains(&text)
}

/// Full require-trigger detection for the completion path: quote style
/// and the span a committed candidate replaces.
///
/// With a leading quote the span starts just after the opening quote and
/// covers the whole string token on that line - the partial module path
/// and, when present, the closing quote. Without one, the span is a
/// zero-length insertion at the cursor and the assembler wraps the
/// candidate in the ambient default quote.
pub fn require_context(
    snapshot: &Snapshot,
    stream: &dyn TokenStream,
    cursor: usize,
) -> Option<RequireContext> {
    let detection = detect(snapshot, stream, cursor, true, true)?;

    let Some(token) = detection.quote_token else {
        return Some(RequireContext {
            quote: QuoteMode::None,
            span: ReplacementSpan::empty(cursor),
        });
    };

    let quote = QuoteMode::from_char(token.text.chars().next()?)?;

    // The peeked token was truncated at the cursor. Re-classify from the
    // opening quote to the line end to pick up the rest of the argument,
    // closing quote included.
    let line = snapshot.line_of_offset(token.start);
    let full_length = stream
        .classify(snapshot, token.start..snapshot.line_end(line))
        .first()
        .map(|t| t.end - t.start)
        .unwrap_or(token.end - token.start);

    Some(RequireContext {
        quote,
        span: ReplacementSpan {
            // Just after the opening quote.
            start: cursor - (token.text.len() - 1),
            length: full_length - 1,
        },
    })
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::JsTokenStream;

    fn trigger(text: &str, cursor: usize, eat_open_paren: bool, allow_quote: bool) -> bool {
        let snap = Snapshot::new(text);
        should_trigger(&snap, &JsTokenStream, cursor, eat_open_paren, allow_quote)
    }

    fn context(text: &str, cursor: usize) -> Option<RequireContext> {
        let snap = Snapshot::new(text);
        require_context(&snap, &JsTokenStream, cursor)
    }

    #[test]
    fn triggers_at_document_start() {
        let text = "require(";
        assert!(trigger(text, text.len(), true, false));
    }

    #[test]
    fn member_access_never_triggers() {
        let text = "obj.require(";
        assert!(!trigger(text, text.len(), true, false));
        assert!(!trigger(text, text.len(), true, true));
    }

    #[test]
    fn assignment_triggers() {
        let text = "var x = require(";
        assert!(trigger(text, text.len(), true, false));
    }

    #[test]
    fn fresh_line_triggers_after_identifier() {
        // The previous line ends with a bare identifier; the line-number
        // check short-circuits before any token-text rule applies.
        let text = "foo\nrequire(";
        assert!(trigger(text, text.len(), true, false));
    }

    #[test]
    fn trailing_semicolon_token_triggers() {
        let text = "f(x); require(";
        assert!(trigger(text, text.len(), true, false));
    }

    #[test]
    fn preceding_identifier_triggers() {
        // Invalid code, but mid-edit states look like this. Kept
        // permissive on purpose.
        let text = "foo require(";
        assert!(trigger(text, text.len(), true, false));
    }

    #[test]
    fn preceding_keyword_does_not_trigger() {
        let text = "function require(";
        assert!(!trigger(text, text.len(), true, false));
    }

    #[test]
    fn statement_keywords_trigger() {
        for text in ["return require(", "throw require(", "typeof require(", "new require("] {
            assert!(trigger(text, text.len(), true, false), "failed for {text:?}");
        }
    }

    #[test]
    fn without_paren_nothing_matches() {
        let text = "var x = require";
        assert!(!trigger(text, text.len(), true, false));
    }

    #[test]
    fn eat_open_paren_false_matches_require_directly() {
        let text = "var x = require";
        assert!(trigger(text, text.len(), false, false));
    }

    #[test]
    fn quote_must_be_allowed() {
        let text = "require('ht";
        assert!(trigger(text, text.len(), true, true));
        // Without allow_quote the string token fails the `(` match.
        assert!(!trigger(text, text.len(), true, false));
    }

    #[test]
    fn non_quote_first_token_restarts_cleanly() {
        // allow_quote peeks `(`, which is not a quote - the match must
        // restart so the paren still participates.
        let text = "var x = require(";
        assert!(trigger(text, text.len(), true, true));
    }

    #[test]
    fn require_split_across_lines() {
        let text = "var x = require(\n'ht";
        assert!(trigger(text, text.len(), true, true));
    }

    #[test]
    fn context_without_quote_is_empty_insertion() {
        let text = "var x = require(";
        let ctx = context(text, text.len()).expect("should trigger");
        assert_eq!(ctx.quote, QuoteMode::None);
        assert_eq!(ctx.span, ReplacementSpan::empty(text.len()));
    }

    #[test]
    fn context_with_open_quote_spans_partial_path() {
        let text = "var x = require('ht";
        let ctx = context(text, text.len()).expect("should trigger");
        assert_eq!(ctx.quote, QuoteMode::Single);
        // Starts just after the opening quote, covers `ht`.
        assert_eq!(ctx.span, ReplacementSpan { start: 17, length: 2 });
    }

    #[test]
    fn context_with_closing_quote_spans_it_too() {
        let text = "var x = require('ht')";
        // Cursor right after `ht`, before the closing quote.
        let ctx = context(text, 19).expect("should trigger");
        assert_eq!(ctx.quote, QuoteMode::Single);
        // Covers `ht'` so a commit can restore a single closing quote.
        assert_eq!(ctx.span, ReplacementSpan { start: 17, length: 3 });
    }

    #[test]
    fn context_mid_string_spans_whole_argument() {
        let text = "require('html')";
        // Cursor between `h` and `tml`.
        let ctx = context(text, 10).expect("should trigger");
        assert_eq!(ctx.span, ReplacementSpan { start: 9, length: 5 });
    }

    #[test]
    fn double_quote_mode_detected() {
        let text = "require(\"u";
        let ctx = context(text, text.len()).expect("should trigger");
        assert_eq!(ctx.quote, QuoteMode::Double);
    }

    #[test]
    fn no_context_for_member_access_with_quote() {
        let text = "obj.require('ht";
        assert!(context(text, text.len()).is_none());
    }

    #[test]
    fn position_rules_for_general_path() {
        let snap = Snapshot::new("var x = requ");
        assert!(position_allows_require(&snap, &JsTokenStream, 8));
        let snap = Snapshot::new("obj.requ");
        assert!(!position_allows_require(&snap, &JsTokenStream, 4));
        let snap = Snapshot::new("requ");
        assert!(position_allows_require(&snap, &JsTokenStream, 0));
    }
}
