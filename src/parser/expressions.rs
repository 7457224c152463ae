//! Expression parsing implementation
//!
//! This module handles parsing of Leor expressions using precedence climbing
//! for binary operators and recursive descent for atoms.
//!
//! # Supported Expressions
//!
//! - Literals: booleans, integers, floats, characters, strings
//! - Variable references
//! - Parenthesized expressions and `{ ... }` blocks
//! - Function and variable definitions (they are expressions too)
//! - Binary operators and assignment
//! - Calls: `callee(arg, ...)`
//!
//! # Precedence
//!
//! | Operators | Precedence |
//! |---|---|
//! | `=` | 1 |
//! | `\|\|` | 2 |
//! | `&&` | 3 |
//! | `< > <= >= == !=` | 7 |
//! | `+ -` | 10 |
//! | `* / %` | 20 |
//!
//! Operators of equal precedence associate to the left. Operator tokens
//! missing from this table end the expression.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser, SyntaxError};
use log::trace;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// What an operator token builds once it wins a precedence contest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Assign,
    Binary(BinOp),
}

impl InfixOp {
    pub fn precedence(self) -> u8 {
        match self {
            InfixOp::Assign => 1,
            InfixOp::Binary(op) => match op {
                BinOp::Or => 2,
                BinOp::And => 3,
                BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge | BinOp::Eq | BinOp::Ne => 7,
                BinOp::Add | BinOp::Sub => 10,
                BinOp::Mul | BinOp::Div | BinOp::Mod => 20,
            },
        }
    }
}

static INFIX_OPS: OnceLock<FxHashMap<&'static str, InfixOp>> = OnceLock::new();

/// Look up the operator table; `None` for operator text with no infix meaning.
pub fn infix_op(symbol: &str) -> Option<InfixOp> {
    INFIX_OPS
        .get_or_init(|| {
            let mut table = FxHashMap::default();
            table.insert("=", InfixOp::Assign);
            for op in [
                BinOp::Or,
                BinOp::And,
                BinOp::Lt,
                BinOp::Gt,
                BinOp::Le,
                BinOp::Ge,
                BinOp::Eq,
                BinOp::Ne,
                BinOp::Add,
                BinOp::Sub,
                BinOp::Mul,
                BinOp::Div,
                BinOp::Mod,
            ] {
                table.insert(op.symbol(), InfixOp::Binary(op));
            }
            table
        })
        .get(symbol)
        .copied()
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        let atom = self.parse_atom()?;
        let expr = self.maybe_binary(atom, 0)?;
        self.maybe_call(expr)
    }

    /// If a `(` follows, `expr` becomes the callee of a call.
    ///
    /// Only one argument list is consumed here; `f()()` chains only when the
    /// caller runs call detection again on the result.
    pub(crate) fn maybe_call(&mut self, expr: AstNode) -> Result<AstNode, ParseError> {
        if self.is_punc(Some("("))?.is_none() {
            return Ok(expr);
        }

        let loc = *expr.location();
        trace!("parsing call at {loc}");
        let args = self.delimited("(", ")", ",", Self::parse_expression)?;
        Ok(AstNode::call(expr, args, loc))
    }

    /// Precedence climbing over `lhs`, accepting operators binding tighter
    /// than `min_prec`.
    ///
    /// Operators of one level fold into `lhs` in a loop; recursion only
    /// happens for a right operand that binds tighter, so stack depth is
    /// bounded by the number of precedence levels.
    pub(crate) fn maybe_binary(
        &mut self,
        mut lhs: AstNode,
        min_prec: u8,
    ) -> Result<AstNode, ParseError> {
        loop {
            let (op, loc) = match self.is_op(None)? {
                Some(token) => match infix_op(&token.value) {
                    Some(op) => (op, token.location),
                    None => return Ok(lhs),
                },
                None => return Ok(lhs),
            };

            let prec = op.precedence();
            if prec <= min_prec {
                return Ok(lhs);
            }
            self.lexer.next()?;

            let atom = self.parse_atom()?;
            let rhs = self.maybe_binary(atom, prec)?;

            lhs = match op {
                InfixOp::Assign => AstNode::assignment(lhs, rhs, loc),
                InfixOp::Binary(op) => AstNode::binary(op, lhs, rhs, loc),
            };
        }
    }

    /// Parse an atom and any call directly applied to it
    pub(crate) fn parse_atom(&mut self) -> Result<AstNode, ParseError> {
        let atom = self.parse_primary()?;
        self.maybe_call(atom)
    }

    /// Parse primary (parenthesized expressions, blocks, definitions, literals, variables)
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        if self.is_punc(Some("("))?.is_some() {
            self.lexer.next()?;
            let expr = self.parse_expression()?;
            self.skip_punc(")")?;
            return Ok(expr);
        }

        if self.is_punc(Some("{"))?.is_some() {
            return self.parse_block();
        }

        if self.is_keyword(Some("true"))?.is_some() || self.is_keyword(Some("false"))?.is_some() {
            return self.parse_bool();
        }

        if self.is_keyword(Some("def"))?.is_some() {
            return self.parse_function_definition();
        }

        if self.is_keyword(Some("const"))?.is_some() || self.is_keyword(Some("mut"))?.is_some() {
            return self.parse_variable_definition();
        }

        let token = self.lexer.next()?;
        let loc = token.location;
        match token.kind {
            TokenKind::Int => {
                let value = token.value.parse::<i64>().map_err(|e| invalid_literal(&token, e))?;
                Ok(AstNode::int(value, loc))
            }
            TokenKind::Float => {
                let value = token.value.parse::<f64>().map_err(|e| invalid_literal(&token, e))?;
                Ok(AstNode::float(value, loc))
            }
            TokenKind::Char => {
                let mut chars = token.value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(AstNode::char(c, loc)),
                    _ => Err(invalid_literal(&token, "char literal must hold exactly one character")),
                }
            }
            TokenKind::String => Ok(AstNode::string(token.value, loc)),
            TokenKind::Identifier => Ok(AstNode::variable(token.value, loc)),
            _ => Err(SyntaxError::UnexpectedToken { found: token }.into()),
        }
    }
}

fn invalid_literal(token: &Token, reason: impl ToString) -> ParseError {
    SyntaxError::InvalidLiteral {
        token: token.clone(),
        reason: reason.to_string(),
    }
    .into()
}
