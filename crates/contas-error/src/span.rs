//! Span - Input location
//!
//! A Span marks the characters a diagnostic points at. Expressions are
//! read one character at a time, so most spans cover a single column.

use std::fmt;

/// Represents a position in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line (1-indexed)
    pub line: u32,
    /// Column (1-indexed)
    pub column: u32,
    /// Byte offset from the beginning of the input
    pub offset: usize,
}

impl Position {
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Position of the first character of an input
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }

    /// Returns the position right after `ch`
    pub fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self::new(self.line + 1, 1, self.offset + 1)
        } else {
            Self::new(self.line, self.column + 1, self.offset + ch.len_utf8())
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Represents a region in the input (start to end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
    /// Source ID in the `SourceCache`
    pub file_id: u32,
}

impl Span {
    pub fn new(start: Position, end: Position, file_id: u32) -> Self {
        Self { start, end, file_id }
    }

    /// Creates a span covering the single character at `pos`
    pub fn char_at(pos: Position, ch: Option<char>, file_id: u32) -> Self {
        let end = match ch {
            Some(ch) if ch != '\n' => pos.advance(ch),
            _ => Position::new(pos.line, pos.column + 1, pos.offset),
        };
        Self::new(pos, end, file_id)
    }

    /// Returns the length in bytes
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Checks if the span is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
