//! # Introduction
//!
//! Leor is a small expression language. This crate holds its front end: a
//! streaming lexer and a recursive descent parser producing a
//! position-annotated AST.
//!
//! ## Pipeline
//!
//! ```text
//! Source → CharStream → Lexer → Parser → AST
//! ```
//!
//! 1. [`parser::charstream`] walks the characters and tracks row and column.
//! 2. [`parser::lexer`] groups characters into tokens, one lookahead at a time.
//! 3. [`parser::parse`] consumes the tokens and builds [`parser::ast::AstNode`]s.
//!
//! ```
//! let program = leor::parser::parse("x = 1 + 2;").unwrap();
//! assert_eq!(program.children()[0].kind_name(), "ASSIGN");
//! ```
//!
//! Errors are reported as [`parser::lexer::LexError`] or
//! [`parser::parse::SyntaxError`], wrapped in [`parser::parse::ParseError`],
//! all carrying the source position where processing stopped.

pub mod parser;
