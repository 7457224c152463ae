//! Leor source code parser
//!
//! This module transforms Leor source text into an Abstract Syntax Tree (AST):
//! - [`charstream`]: Character cursor with row/column tracking
//! - [`classify`]: Character classes, keywords and escapes
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! Everything in Leor is an expression. A program is a sequence of
//! expressions, each terminated by `;`:
//! - Literals: `true`, `false`, integers, floats, `'c'`, `"text"`
//! - Binary operators and `=` assignment, with precedence climbing
//! - Calls: `f(a, b)`
//! - Blocks: `{ a; b }`
//! - Definitions: `const x: int = 1`, `def f(x: int) -> int { x }`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser pulling tokens on demand from the
//! lexer. No external parser generator dependencies.

pub mod ast;
pub mod charstream;
pub mod classify;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use expressions::{infix_op, InfixOp};
pub use lexer::tokenize;

use ast::AstNode;
use parse::{ParseError, Parser};

/// Parse a whole Leor source text into a program node.
pub fn parse(source: &str) -> Result<AstNode, ParseError> {
    Parser::new(source).parse_program()
}
