//! Tokenizer for assignment sources
//!
//! The separator and assignment operator are only known at runtime, so this
//! is a hand-written cursor rather than a `logos` lexer. Delimiters are
//! tested in order (separator first, then assignment); everything else
//! accumulates into text runs.

use std::fmt;
use std::iter::FusedIterator;

use crate::config::Delimiters;
use crate::error::Span;

/// A token of an assignment source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of text between delimiters
    Text(String),
    /// The record separator
    Separator(String),
    /// The assignment operator
    Assignment(String),
    /// End of input, emitted exactly once
    End,
}

impl Token {
    /// The matched text; END carries the sentinel `EOF`
    pub fn text(&self) -> &str {
        match self {
            Token::Text(s) | Token::Separator(s) | Token::Assignment(s) => s,
            Token::End => "EOF",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Token::Text(_) => "TEXT",
            Token::Separator(_) => "SEPARATOR",
            Token::Assignment(_) => "ASSIGNMENT",
            Token::End => "END",
        };
        write!(f, "{} {:?}", kind, self.text())
    }
}

/// Streaming tokenizer over one input string
///
/// Yields [`Token::End`] once and then stops.
pub struct Tokenizer<'a> {
    input: &'a str,
    cursor: usize,
    delimiters: &'a Delimiters,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str, delimiters: &'a Delimiters) -> Self {
        Self {
            input,
            cursor: 0,
            delimiters,
            finished: false,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    fn at_delimiter(&self) -> bool {
        let rest = self.rest();
        rest.starts_with(self.delimiters.separator())
            || rest.starts_with(self.delimiters.assignment())
    }

    fn next_token(&mut self) -> (Token, Span) {
        let start = self.cursor;
        let rest = self.rest();

        if rest.is_empty() {
            return (Token::End, start..start);
        }

        let delimiters = self.delimiters;
        let separator = delimiters.separator();
        if rest.starts_with(separator) {
            self.cursor += separator.len();
            return (Token::Separator(separator.to_string()), start..self.cursor);
        }

        let assignment = delimiters.assignment();
        if rest.starts_with(assignment) {
            self.cursor += assignment.len();
            return (Token::Assignment(assignment.to_string()), start..self.cursor);
        }

        // The delimiter that ends the run is left for the next call
        let mut text = String::new();
        while let Some(c) = self.rest().chars().next() {
            if self.at_delimiter() {
                break;
            }
            text.push(c);
            self.cursor += c.len_utf8();
        }
        (Token::Text(text), start..self.cursor)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = (Token, Span);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let (token, span) = self.next_token();
        if token == Token::End {
            self.finished = true;
        }
        Some((token, span))
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Tokenize an assignment source into tokens with spans
pub fn tokenize(input: &str, delimiters: &Delimiters) -> Vec<(Token, Span)> {
    Tokenizer::new(input, delimiters).collect()
}
