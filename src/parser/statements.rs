//! Block parsing implementation
//!
//! A block is a `;`-separated list of expressions between braces:
//!
//! ```text
//! block ::= "{" [expression (";" expression)* [";"]] "}"
//! ```
//!
//! Blocks are expressions themselves and produce a [`AstNode::Program`] node,
//! the same kind used for the whole source file.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse `{ ... }` into a program block
    pub(crate) fn parse_block(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location()?;
        let statements = self.delimited("{", "}", ";", Self::parse_expression)?;
        Ok(AstNode::program(statements, loc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::SyntaxError;

    #[test]
    fn test_block_statements() {
        let block = Parser::new("{ a; b = 1; f(a) }").parse_block().unwrap();

        match block {
            AstNode::Program {
                statements,
                location,
            } => {
                let kinds: Vec<_> = statements.iter().map(|s| s.kind_name()).collect();
                assert_eq!(kinds, ["VAR", "ASSIGN", "CALL"]);
                assert_eq!(location, SourceLocation::new(1, 1));
            }
            other => panic!("Expected block, got {other}"),
        }
    }

    #[test]
    fn test_trailing_separator_and_empty_block() {
        let block = Parser::new("{x;}").parse_block().unwrap();
        assert_eq!(block.children().len(), 1);

        let block = Parser::new("{}").parse_block().unwrap();
        assert!(block.children().is_empty());
    }

    #[test]
    fn test_nested_blocks() {
        let program = Parser::new("{ { 1 }; 2 };").parse_program().unwrap();

        let outer = program.children()[0];
        assert_eq!(outer.kind_name(), "PROG");
        assert_eq!(outer.children()[0].kind_name(), "PROG");
        assert_eq!(outer.children()[1].kind_name(), "INT");
    }

    #[test]
    fn test_missing_separator() {
        let err = Parser::new("{ a b }").parse_block().unwrap_err();
        assert!(matches!(
            err,
            ParseError::Syntax(SyntaxError::ExpectedToken { ref found, .. }) if found.value == "b"
        ));
    }

    #[test]
    fn test_unclosed_block() {
        let err = Parser::new("{ a;").parse_block().unwrap_err();
        match err {
            ParseError::Syntax(e) => assert!(e.found().is_eof()),
            other => panic!("Expected syntax error, got {other:?}"),
        }
    }
}
