//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, lookahead/skip helpers, delimited lists and
//!   the top-level program
//! - `declarations`: function and variable definitions
//! - `statements`: `{ ... }` program blocks
//! - `expressions`: atoms, call detection and precedence climbing
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state. Tokens are pulled from the
//! [`Lexer`] one at a time; the parser never looks further ahead than the
//! lexer's single cached token.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use log::debug;
use thiserror::Error;

/// Grammar violation found while parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unexpected token {found}")]
    UnexpectedToken { found: Token },

    #[error("unexpected token {found}, expected {expected_kind} '{expected_value}'")]
    ExpectedToken {
        found: Token,
        expected_kind: TokenKind,
        expected_value: String,
    },

    #[error("invalid literal {token}: {reason}")]
    InvalidLiteral { token: Token, reason: String },
}

impl SyntaxError {
    /// The token the parser stopped at.
    pub fn found(&self) -> &Token {
        match self {
            SyntaxError::UnexpectedToken { found }
            | SyntaxError::ExpectedToken { found, .. }
            | SyntaxError::InvalidLiteral { token: found, .. } => found,
        }
    }

    pub fn location(&self) -> SourceLocation {
        self.found().location
    }
}

/// Parser error type: either the lexer or the grammar gave up
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Lexer error at {}", .0)]
    Lex(#[from] LexError),

    #[error("Parse error at {}: {}", .0.location(), .0)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location(),
            ParseError::Syntax(err) => err.location(),
        }
    }
}

/// Recursive descent parser for Leor
pub struct Parser {
    pub(crate) lexer: Lexer,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self::from_lexer(Lexer::new(source))
    }

    pub fn from_lexer(lexer: Lexer) -> Self {
        Self { lexer }
    }

    /// Parse the entire program: `expression ;` repeated until end of input.
    pub fn parse_program(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location()?;
        let mut statements = Vec::new();

        while !self.lexer.is_at_end()? {
            statements.push(self.parse_expression()?);
            self.skip_punc(";")?;
        }

        debug!("parsed program with {} top-level statements", statements.len());
        Ok(AstNode::program(statements, loc))
    }

    // ===== Helper methods =====

    /// The next token if it has `kind` (and, when given, exactly `value`).
    pub(crate) fn check_token(
        &mut self,
        kind: TokenKind,
        value: Option<&str>,
    ) -> Result<Option<&Token>, ParseError> {
        let token = self.lexer.peek()?;
        let matches = token.kind == kind && value.map_or(true, |v| token.value == v);
        Ok(matches.then_some(token))
    }

    pub(crate) fn is_op(&mut self, value: Option<&str>) -> Result<Option<&Token>, ParseError> {
        self.check_token(TokenKind::Operator, value)
    }

    pub(crate) fn is_keyword(&mut self, value: Option<&str>) -> Result<Option<&Token>, ParseError> {
        self.check_token(TokenKind::Keyword, value)
    }

    pub(crate) fn is_punc(&mut self, value: Option<&str>) -> Result<Option<&Token>, ParseError> {
        self.check_token(TokenKind::Punctuation, value)
    }

    /// Consume the next token, which must be `kind` with text `value`.
    pub(crate) fn expect_token(&mut self, kind: TokenKind, value: &str) -> Result<Token, ParseError> {
        if self.check_token(kind, Some(value))?.is_none() {
            let found = self.lexer.peek()?.clone();
            return Err(SyntaxError::ExpectedToken {
                found,
                expected_kind: kind,
                expected_value: value.to_string(),
            }
            .into());
        }
        Ok(self.lexer.next()?)
    }

    pub(crate) fn skip_op(&mut self, value: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Operator, value)
    }

    pub(crate) fn skip_keyword(&mut self, value: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Keyword, value)
    }

    pub(crate) fn skip_punc(&mut self, value: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Punctuation, value)
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if self.check_token(TokenKind::Identifier, None)?.is_none() {
            let found = self.lexer.peek()?.clone();
            return Err(SyntaxError::ExpectedToken {
                found,
                expected_kind: TokenKind::Identifier,
                expected_value: String::new(),
            }
            .into());
        }
        Ok(self.lexer.next()?.value)
    }

    pub(crate) fn current_location(&mut self) -> Result<SourceLocation, ParseError> {
        Ok(self.lexer.peek()?.location)
    }

    /// Parse `open elem (sep elem)* [sep] close`.
    ///
    /// The close marker is checked both before and after each separator, so a
    /// trailing separator is accepted. Running out of input fails on `close`.
    pub(crate) fn delimited<T>(
        &mut self,
        open: &str,
        close: &str,
        separator: &str,
        mut element: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        let mut first = true;

        self.skip_punc(open)?;
        while !self.lexer.is_at_end()? {
            if self.is_punc(Some(close))?.is_some() {
                break;
            }

            if first {
                first = false;
            } else {
                self.skip_punc(separator)?;
            }

            if self.is_punc(Some(close))?.is_some() {
                break;
            }

            items.push(element(self)?);
        }
        self.skip_punc(close)?;

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_syntax_error(source: &str) -> SyntaxError {
        match Parser::new(source).parse_program() {
            Err(ParseError::Syntax(err)) => err,
            other => panic!("Expected syntax error for {source:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_program() {
        let program = Parser::new("  # nothing here\n").parse_program().unwrap();

        match program {
            AstNode::Program {
                statements,
                location,
            } => {
                assert!(statements.is_empty());
                assert_eq!(location, SourceLocation::new(2, 1));
            }
            _ => panic!("Expected program"),
        }
    }

    #[test]
    fn test_program_location_is_first_token() {
        let program = Parser::new("\n  x; y;").parse_program().unwrap();

        assert_eq!(*program.location(), SourceLocation::new(2, 3));
        assert_eq!(program.children().len(), 2);
    }

    #[test]
    fn test_missing_semicolon() {
        let err = expect_syntax_error("x y;");

        match err {
            SyntaxError::ExpectedToken {
                found,
                expected_kind,
                expected_value,
            } => {
                assert_eq!(found.value, "y");
                assert_eq!(expected_kind, TokenKind::Punctuation);
                assert_eq!(expected_value, ";");
            }
            other => panic!("Expected ExpectedToken, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_semicolon_at_eof() {
        let err = expect_syntax_error("x");
        assert!(err.found().is_eof());
        assert_eq!(err.location(), SourceLocation::new(1, 2));
    }

    #[test]
    fn test_lex_error_propagates() {
        let err = Parser::new("x; $").parse_program().unwrap_err();

        assert!(matches!(
            err,
            ParseError::Lex(LexError::UnexpectedCharacter { ch: '$', .. })
        ));
        assert_eq!(err.location(), SourceLocation::new(1, 4));
    }

    #[test]
    fn test_lex_error_display_matches_token_dump() {
        let lex_err = crate::parser::tokenize("x; $").unwrap_err();
        let from_dump = ParseError::from(lex_err).to_string();
        let from_parse = Parser::new("x; $").parse_program().unwrap_err().to_string();

        assert_eq!(from_dump, from_parse);
        assert_eq!(from_parse, "Lexer error at 1:4: unexpected character '$'");
    }

    #[test]
    fn test_lookahead_predicates_do_not_consume() {
        let mut parser = Parser::new("( x");

        assert!(parser.is_punc(Some("(")).unwrap().is_some());
        assert!(parser.is_punc(Some(")")).unwrap().is_none());
        assert!(parser.is_op(None).unwrap().is_none());
        assert!(parser.is_keyword(None).unwrap().is_none());
        assert!(parser.is_punc(None).unwrap().is_some());

        parser.skip_punc("(").unwrap();
        assert_eq!(parser.expect_identifier().unwrap(), "x");
    }

    #[test]
    fn test_delimited_list() {
        let mut parser = Parser::new("(a, b, c)");
        let names = parser
            .delimited("(", ")", ",", |p| p.expect_identifier())
            .unwrap();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(parser.lexer.is_at_end().unwrap());
    }

    #[test]
    fn test_delimited_list_edge_cases() {
        let mut parser = Parser::new("()");
        let names = parser.delimited("(", ")", ",", |p| p.expect_identifier()).unwrap();
        assert!(names.is_empty());

        let mut parser = Parser::new("(a,)");
        let names = parser.delimited("(", ")", ",", |p| p.expect_identifier()).unwrap();
        assert_eq!(names, ["a"]);

        let mut parser = Parser::new("(,)");
        assert!(parser.delimited("(", ")", ",", |p| p.expect_identifier()).is_err());

        let mut parser = Parser::new("(a b)");
        let err = parser
            .delimited("(", ")", ",", |p| p.expect_identifier())
            .unwrap_err();
        assert!(err.to_string().contains("expected PUNC ','"), "{err}");

        let mut parser = Parser::new("(a,");
        let err = parser
            .delimited("(", ")", ",", |p| p.expect_identifier())
            .unwrap_err();
        assert!(matches!(err, ParseError::Syntax(ref e) if e.found().is_eof()));
    }
}
