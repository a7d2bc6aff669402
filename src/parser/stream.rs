//! Character source with unbounded pushback
//!
//! The lexer reads one character at a time and may return characters it read
//! too far. Pushed-back characters are handed out again, most recent first,
//! before the underlying source is consulted.

use crate::ast::SourceLocation;

#[derive(Debug, Clone)]
pub struct PushBackStream<I: Iterator<Item = char>> {
    input: I,
    pushed: Vec<char>,
    line: usize,
    column: usize,
    after_newline: bool,
}

/// Stream over an owned copy of a source string
pub type SourceStream = PushBackStream<std::vec::IntoIter<char>>;

impl<I: Iterator<Item = char>> PushBackStream<I> {
    pub fn new(input: I) -> Self {
        Self {
            input,
            pushed: Vec::new(),
            line: 1,
            column: 0,
            after_newline: false,
        }
    }

    /// Returns `c` to the stream; it is the next character handed out.
    pub fn push_back(&mut self, c: char) {
        self.pushed.push(c);
    }

    /// Line of the last character read from the underlying source
    pub fn current_line(&self) -> usize {
        self.line
    }

    /// Column of the last character read from the underlying source
    pub fn current_column(&self) -> usize {
        self.column
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    /// Next character without consuming it
    pub fn peek(&mut self) -> Option<char> {
        let c = self.next()?;
        self.push_back(c);
        Some(c)
    }
}

impl SourceStream {
    pub fn from_source(source: &str) -> Self {
        Self::new(source.chars().collect::<Vec<_>>().into_iter())
    }
}

impl<I: Iterator<Item = char>> Iterator for PushBackStream<I> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if let Some(c) = self.pushed.pop() {
            return Some(c);
        }

        let c = self.input.next()?;
        if self.after_newline {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.after_newline = c == '\n';
        Some(c)
    }
}
