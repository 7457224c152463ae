//! Position-tracking character cursor
//!
//! [`CharStream`] owns the complete source text and hands it to the lexer one
//! character at a time, keeping the line/column of the next unread character.

use super::ast::SourceLocation;

/// Cursor over an immutable source buffer
#[derive(Debug, Clone)]
pub struct CharStream {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl CharStream {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Character under the cursor, or `None` at end of input.
    pub fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Consume the character under the cursor.
    ///
    /// A newline moves to column 1 of the next line; anything else moves one
    /// column right. Returns `None` without moving once the input is exhausted.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    pub fn eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Location of the next character to be consumed.
    pub fn pos(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    /// Consume characters while `pred` holds, returning them.
    pub fn read_while(&mut self, mut pred: impl FnMut(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            out.push(ch);
            self.next();
        }
        out
    }
}
