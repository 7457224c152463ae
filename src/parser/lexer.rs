//! Lexer (tokenizer) for Leor source code
//!
//! Pulls characters from a [`CharStream`] and turns them into [`Token`]s on
//! demand. The parser drives it through [`Lexer::peek`] and [`Lexer::next`];
//! [`Lexer::tokenize`] drains the whole input for diagnostics.
//!
//! Classification of the first significant character picks the token kind:
//! digits start numbers, identifier characters start identifiers or
//! keywords, quotes start char/string literals, and runs of operator
//! characters form a single operator token (so `->`, `==` and `<=` come out
//! whole). Everything after `#` up to the end of the line is a comment.

use super::ast::SourceLocation;
use super::charstream::CharStream;
use super::classify;
use log::trace;
use std::fmt;
use thiserror::Error;

/// The category of a [`Token`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Int,
    Float,
    Char,
    String,
    Identifier,
    Keyword,
    Operator,
    Punctuation,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Char => "CHAR",
            TokenKind::String => "STRING",
            TokenKind::Identifier => "VAR",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Operator => "OP",
            TokenKind::Punctuation => "PUNC",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexical token: its kind, decoded text and where it started.
///
/// For char and string literals `value` holds the decoded contents without
/// the quotes. The end-of-input token has an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            value: value.into(),
            location,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, '{}', ({})}}",
            self.kind,
            self.value.escape_default(),
            self.location
        )
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("{location}: unexpected character '{}'", .ch.escape_default())]
    UnexpectedCharacter { ch: char, location: SourceLocation },

    #[error("{location}: unterminated {kind} literal")]
    UnterminatedLiteral {
        kind: TokenKind,
        location: SourceLocation,
    },

    #[error("{location}: unknown escape sequence '\\{}'", .ch.escape_default())]
    UnknownEscape { ch: char, location: SourceLocation },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnexpectedCharacter { location, .. }
            | LexError::UnterminatedLiteral { location, .. }
            | LexError::UnknownEscape { location, .. } => *location,
        }
    }
}

/// Pull-based lexer with one token of lookahead
pub struct Lexer {
    stream: CharStream,
    current: Option<Token>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self::from_stream(CharStream::new(input))
    }

    pub fn from_stream(stream: CharStream) -> Self {
        Self {
            stream,
            current: None,
        }
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> Result<&Token, LexError> {
        let token = match self.current.take() {
            Some(token) => token,
            None => self.read_next()?,
        };
        Ok(&*self.current.insert(token))
    }

    /// Consume and return the next token. Keeps returning the end-of-input
    /// token once the source is exhausted.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Token, LexError> {
        match self.current.take() {
            Some(token) => Ok(token),
            None => self.read_next(),
        }
    }

    /// True when the next token is the end-of-input token.
    pub fn is_at_end(&mut self) -> Result<bool, LexError> {
        Ok(self.peek()?.is_eof())
    }

    /// Tokenize the entire remaining input, ending with a single EOF token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Recognise one token starting at the first significant character.
    fn read_next(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();

        let loc = self.stream.pos();
        let Some(ch) = self.stream.peek() else {
            trace!("end of input at {loc}");
            return Ok(Token::new(TokenKind::Eof, "", loc));
        };

        let token = if classify::is_digit(ch) {
            self.number_literal()
        } else if classify::is_identifier_char(ch) {
            self.identifier_or_keyword()
        } else if classify::is_char_quote(ch) {
            self.quoted_literal(TokenKind::Char, classify::CHAR_QUOTE)?
        } else if classify::is_string_quote(ch) {
            self.quoted_literal(TokenKind::String, classify::STRING_QUOTE)?
        } else if classify::is_operator_char(ch) {
            let op = self.stream.read_while(classify::is_operator_char);
            Token::new(TokenKind::Operator, op, loc)
        } else if classify::is_punctuation_char(ch) {
            self.stream.next();
            Token::new(TokenKind::Punctuation, ch, loc)
        } else {
            return Err(LexError::UnexpectedCharacter { ch, location: loc });
        };

        trace!("lexed {token}");
        Ok(token)
    }

    /// Skip whitespace and `#` line comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.stream.read_while(classify::is_whitespace);

            match self.stream.peek() {
                Some(ch) if classify::is_comment_start(ch) => {
                    // stops before the newline, which the next pass eats
                    self.stream.read_while(|c| c != '\n');
                }
                _ => break,
            }
        }
    }

    /// Digits with at most one `.`; a second `.` is left for the next token.
    fn number_literal(&mut self) -> Token {
        let loc = self.stream.pos();
        let mut seen_dot = false;

        let text = self.stream.read_while(|c| {
            if c == '.' {
                if seen_dot {
                    return false;
                }
                seen_dot = true;
                return true;
            }
            classify::is_digit(c)
        });

        let kind = if seen_dot {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        Token::new(kind, text, loc)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        let loc = self.stream.pos();
        let ident = self.stream.read_while(classify::is_identifier_char);

        let kind = if classify::is_keyword(&ident) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, ident, loc)
    }

    /// Read a char or string literal up to an unescaped `quote`.
    fn quoted_literal(&mut self, kind: TokenKind, quote: char) -> Result<Token, LexError> {
        let loc = self.stream.pos();
        self.stream.next(); // opening quote

        let mut value = String::new();
        loop {
            let escape_loc = self.stream.pos();
            match self.stream.next() {
                None => {
                    return Err(LexError::UnterminatedLiteral {
                        kind,
                        location: loc,
                    })
                }
                Some(ch) if ch == quote => break,
                Some('\\') => {
                    let escaped = self.stream.next().ok_or(LexError::UnterminatedLiteral {
                        kind,
                        location: loc,
                    })?;
                    let decoded = classify::unescape(escaped).ok_or(LexError::UnknownEscape {
                        ch: escaped,
                        location: escape_loc,
                    })?;
                    value.push(decoded);
                }
                Some(ch) => value.push(ch),
            }
        }

        Ok(Token::new(kind, value, loc))
    }
}

/// Tokenize a complete source string.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("def main() -> int { 0; };").unwrap();

        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::Keyword,
                TokenKind::Identifier,
                TokenKind::Punctuation,
                TokenKind::Punctuation,
                TokenKind::Operator,
                TokenKind::Identifier,
                TokenKind::Punctuation,
                TokenKind::Int,
                TokenKind::Punctuation,
                TokenKind::Punctuation,
                TokenKind::Punctuation,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].value, "main");
        assert_eq!(tokens[4].value, "->");
    }

    #[test]
    fn test_only_whitespace_and_comments() {
        for source in ["", "   \n\t ", "# just a comment", "  # one\n# two\n\n"] {
            let tokens = tokenize(source).unwrap();
            assert_eq!(tokens.len(), 1, "source {source:?}");
            assert!(tokens[0].is_eof());
        }
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("123").unwrap();
        assert_eq!(tokens[0], Token::new(TokenKind::Int, "123", SourceLocation::new(1, 1)));

        let tokens = tokenize("1.5").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Float);
        assert_eq!(tokens[0].value, "1.5");
    }

    #[test]
    fn test_second_dot_ends_number() {
        let tokens = tokenize("1.2.3").unwrap();

        assert_eq!(tokens[0], Token::new(TokenKind::Float, "1.2", SourceLocation::new(1, 1)));
        assert_eq!(tokens[1], Token::new(TokenKind::Operator, ".", SourceLocation::new(1, 4)));
        assert_eq!(tokens[2], Token::new(TokenKind::Int, "3", SourceLocation::new(1, 5)));
        assert!(tokens[3].is_eof());
    }

    #[test]
    fn test_identifiers_and_keywords() {
        let tokens = tokenize("foo_1 true def const mut iffy").unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].value, "foo_1");
        for token in &tokens[1..5] {
            assert_eq!(token.kind, TokenKind::Keyword, "{token}");
        }
        assert_eq!(tokens[5].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_operator_runs() {
        let tokens = tokenize("a<=b == c->d").unwrap();
        let ops: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Operator)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(ops, ["<=", "==", "->"]);
    }

    #[test]
    fn test_string_literal() {
        let tokens = tokenize(r#""a\nb""#).unwrap();

        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].value, "a\nb");
    }

    #[test]
    fn test_escapes() {
        let tokens = tokenize(r#""\t\"q\"\\\0" '\''"#).unwrap();

        assert_eq!(tokens[0].value, "\t\"q\"\\\0");
        assert_eq!(tokens[1].kind, TokenKind::Char);
        assert_eq!(tokens[1].value, "'");
    }

    #[test]
    fn test_full_escape_table() {
        let tokens = tokenize(r#""\n\r\t\v\b\a\f\\\'\"\0""#).unwrap();

        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(
            tokens[0].value,
            "\n\r\t\u{0B}\u{08}\u{07}\u{0C}\\'\"\0"
        );
    }

    #[test]
    fn test_unterminated_literal() {
        let err = tokenize("x = \"abc").unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedLiteral {
                kind: TokenKind::String,
                location: SourceLocation::new(1, 5),
            }
        );

        let err = tokenize("'\\").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedLiteral { kind: TokenKind::Char, .. }));
    }

    #[test]
    fn test_unknown_escape() {
        let err = tokenize(r#""a\qb""#).unwrap_err();
        assert_eq!(
            err,
            LexError::UnknownEscape {
                ch: 'q',
                location: SourceLocation::new(1, 3),
            }
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("a\n  @").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedCharacter {
                ch: '@',
                location: SourceLocation::new(2, 3),
            }
        );
        assert_eq!(err.to_string(), "2:3: unexpected character '@'");
    }

    #[test]
    fn test_comments() {
        let tokens = tokenize("x; # comment ; y\ny; #trailing").unwrap();
        let values: Vec<_> = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, ["x", ";", "y", ";", ""]);
    }

    #[test]
    fn test_positions_after_newline() {
        let tokens = tokenize("a\nb").unwrap();
        assert_eq!(tokens[1].value, "b");
        assert_eq!(tokens[1].location, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_peek_caches_until_next() {
        let mut lexer = Lexer::new("x y");

        assert_eq!(lexer.peek().unwrap().value, "x");
        assert_eq!(lexer.peek().unwrap().value, "x");
        assert_eq!(lexer.next().unwrap().value, "x");
        assert_eq!(lexer.peek().unwrap().value, "y");
        assert!(!lexer.is_at_end().unwrap());
        lexer.next().unwrap();
        assert!(lexer.is_at_end().unwrap());
        assert!(lexer.next().unwrap().is_eof());
        assert!(lexer.next().unwrap().is_eof());
    }

    #[test]
    fn test_token_display() {
        let tokens = tokenize("  42").unwrap();
        assert_eq!(tokens[0].to_string(), "{INT, '42', (1:3)}");
        assert_eq!(tokens[1].to_string(), "{EOF, '', (1:5)}");
    }
}
