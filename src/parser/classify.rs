//! Character classes and fixed lexical tables
//!
//! Every branching decision in the lexer goes through one of these
//! predicates. The keyword set is built once into a shared read-only
//! `FxHashSet` on first use.

use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Reserved words. `return`, `if` and `else` are reserved but not yet parsed.
pub const KEYWORDS: [&str; 8] = ["true", "false", "def", "return", "const", "mut", "if", "else"];

/// Characters that may appear in an operator run
pub const OPERATOR_CHARS: &str = "+-*/%=<>!&|^.:";

/// Single-character punctuation
pub const PUNCTUATION_CHARS: &str = "()[]{};,";

pub const COMMENT_START: char = '#';
pub const CHAR_QUOTE: char = '\'';
pub const STRING_QUOTE: char = '"';

static KEYWORD_SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();

pub fn is_whitespace(ch: char) -> bool {
    ch.is_whitespace()
}

pub fn is_comment_start(ch: char) -> bool {
    ch == COMMENT_START
}

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub fn is_char_quote(ch: char) -> bool {
    ch == CHAR_QUOTE
}

pub fn is_string_quote(ch: char) -> bool {
    ch == STRING_QUOTE
}

pub fn is_operator_char(ch: char) -> bool {
    OPERATOR_CHARS.contains(ch)
}

pub fn is_punctuation_char(ch: char) -> bool {
    PUNCTUATION_CHARS.contains(ch)
}

/// Exact match against [`KEYWORDS`].
pub fn is_keyword(text: &str) -> bool {
    KEYWORD_SET
        .get_or_init(|| KEYWORDS.iter().copied().collect())
        .contains(text)
}

/// Decode the character following a backslash in a quoted literal.
pub fn unescape(ch: char) -> Option<char> {
    match ch {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{0B}'),
        'b' => Some('\u{08}'),
        'a' => Some('\u{07}'),
        'f' => Some('\u{0C}'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        '0' => Some('\0'),
        _ => None,
    }
}
