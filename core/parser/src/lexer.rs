//! FILENAME: core/parser/src/lexer.rs
//! PURPOSE: Cursor over the formula text with a pending-token buffer.
//! CONTEXT: The recursive-descent driver asks the scanner what class of
//! character sits under the cursor, then either skips it or accumulates it
//! into the pending buffer. When an atom is complete the driver takes the
//! buffer as the atom's raw text.
//!
//! CHARACTER CLASSES:
//! - Digits: 0-9
//! - Identifier characters: ASCII letters and '_'
//! - Structure: ( ) [ ] , . - =
//! - Whitespace: a single blank space, skipped between atoms only

use crate::error::{ParseError, ParseErrorKind};

fn is_identifier(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub struct Scanner {
    input: Vec<char>,
    position: usize,
    pending: String,
}

impl Scanner {
    pub fn new(input: &str) -> Self {
        Scanner {
            input: input.chars().collect(),
            position: 0,
            pending: String::new(),
        }
    }

    pub fn input(&self) -> &[char] {
        &self.input
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor back to the start and drops any pending text.
    pub fn rewind(&mut self) {
        self.position = 0;
        self.pending.clear();
    }

    pub fn current(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// The character `offset` places past the cursor.
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    pub fn has_more(&self) -> bool {
        self.position < self.input.len()
    }

    fn current_is(&self, expected: char) -> bool {
        self.current() == Some(expected)
    }

    pub fn is_digit(&self) -> bool {
        self.current().is_some_and(|ch| ch.is_ascii_digit())
    }

    pub fn is_identifier_char(&self) -> bool {
        self.is_identifier_char_at(0)
    }

    /// Whether the character `offset` places past the cursor is an
    /// identifier character.
    pub fn is_identifier_char_at(&self, offset: usize) -> bool {
        self.peek(offset).is_some_and(is_identifier)
    }

    pub fn is_open_paren(&self) -> bool {
        self.current_is('(')
    }

    pub fn is_close_paren(&self) -> bool {
        self.current_is(')')
    }

    pub fn is_open_bracket(&self) -> bool {
        self.current_is('[')
    }

    pub fn is_close_bracket(&self) -> bool {
        self.current_is(']')
    }

    pub fn is_comma(&self) -> bool {
        self.current_is(',')
    }

    pub fn is_dot(&self) -> bool {
        self.current_is('.')
    }

    pub fn is_minus(&self) -> bool {
        self.current_is('-')
    }

    pub fn is_equals(&self) -> bool {
        self.current_is('=')
    }

    pub fn is_whitespace(&self) -> bool {
        self.current_is(' ')
    }

    /// Advances past one character without buffering it.
    pub fn skip(&mut self) {
        if self.has_more() {
            self.position += 1;
        }
    }

    /// Copies the next `count` characters into the pending buffer.
    pub fn accumulate(&mut self, count: usize) {
        for _ in 0..count {
            match self.current() {
                Some(ch) => {
                    self.pending.push(ch);
                    self.position += 1;
                }
                None => break,
            }
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.is_whitespace() {
            self.position += 1;
        }
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Hands the pending buffer over as an atom's text and clears it.
    pub fn take_pending(&mut self) -> String {
        std::mem::take(&mut self.pending)
    }

    /// The input consumed so far.
    pub fn consumed(&self) -> String {
        self.input[..self.position].iter().collect()
    }

    /// Builds an error carrying the consumed text and the current character.
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.consumed(), self.current())
    }
}
