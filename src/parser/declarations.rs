//! Declaration parsing implementation
//!
//! This module handles the definition forms of Leor:
//!
//! - Function definitions: `def name(params) -> type { ... }`
//! - Variable definitions: `const name: type = value`, `mut name: type`
//! - Function parameters
//! - Boolean literals (`true` / `false` keywords)
//!
//! # Grammar
//!
//! ```text
//! function_def ::= "def" identifier "(" params ")" "->" identifier block
//! params       ::= [param ("," param)* [","]]
//! param        ::= ["const" | "mut"] var_body
//! var_def      ::= ("const" | "mut") var_body
//! var_body     ::= identifier ":" identifier ["=" expression]
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use log::trace;

impl Parser {
    /// Parse function definition: def name(params) -> type { body }
    pub(crate) fn parse_function_definition(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.skip_keyword("def")?.location;
        let name = self.expect_identifier()?;
        trace!("parsing function '{name}' at {loc}");

        let params = self.delimited("(", ")", ",", Self::parse_parameter)?;
        self.skip_op("->")?;
        let return_type = self.expect_identifier()?;
        let body = self.parse_block()?;

        Ok(AstNode::function(name, return_type, params, body, loc))
    }

    /// Parse a parameter; the `const`/`mut` keyword is optional here and
    /// defaults to mutable.
    pub(crate) fn parse_parameter(&mut self) -> Result<AstNode, ParseError> {
        if self.is_keyword(Some("const"))?.is_some() || self.is_keyword(Some("mut"))?.is_some() {
            return self.parse_variable_definition();
        }

        let loc = self.current_location()?;
        self.parse_variable_body(false, loc)
    }

    /// Parse variable definition: (const | mut) name: type [= value]
    pub(crate) fn parse_variable_definition(&mut self) -> Result<AstNode, ParseError> {
        let is_const = self.is_keyword(Some("const"))?.is_some();
        let keyword = if is_const { "const" } else { "mut" };
        let loc = self.skip_keyword(keyword)?.location;

        self.parse_variable_body(is_const, loc)
    }

    fn parse_variable_body(
        &mut self,
        is_const: bool,
        loc: SourceLocation,
    ) -> Result<AstNode, ParseError> {
        let name = self.expect_identifier()?;
        self.skip_op(":")?;
        let type_name = self.expect_identifier()?;

        let value = if self.is_op(Some("="))?.is_some() {
            self.skip_op("=")?;
            self.parse_expression()?
        } else {
            AstNode::none(self.current_location()?)
        };

        Ok(AstNode::var_def(name, type_name, is_const, value, loc))
    }

    /// Parse `true` or `false`
    pub(crate) fn parse_bool(&mut self) -> Result<AstNode, ParseError> {
        let token = self.lexer.next()?;
        Ok(AstNode::boolean(token.value == "true", token.location))
    }
}
