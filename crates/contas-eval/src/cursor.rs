//! Lookahead cursor
//!
//! Holds exactly one character of lookahead over a `CharSource`.

use crate::error::{ParseError, Reason, Result};
use crate::source::CharSource;
use contas_error::Position;
use tracing::trace;

/// Deepest nesting of groups and `**` chains accepted before giving up.
///
/// Only guards against overflowing the stack: evaluating at this depth
/// needs more than the 8 MiB main-thread default, so callers that accept
/// arbitrary input run the evaluator on a thread with `STACK_SIZE`.
pub const MAX_DEPTH: usize = 10_000;

/// Stack size that fits an evaluation nested `MAX_DEPTH` levels deep
pub const STACK_SIZE: usize = 256 * 1024 * 1024;

/// The single character not yet consumed, plus where it sits in the input
pub struct Cursor<S> {
    source: S,
    lookahead: Option<char>,
    position: Position,
    depth: usize,
}

impl<S: CharSource> Cursor<S> {
    /// Creates a cursor, reading the first character as lookahead
    pub fn new(mut source: S) -> Result<Self> {
        let lookahead = source.next_char()?;
        Ok(Self {
            source,
            lookahead,
            position: Position::start(),
            depth: 0,
        })
    }

    /// Returns the lookahead without consuming it (`None` = end of input)
    pub fn peek(&self) -> Option<char> {
        self.lookahead
    }

    /// Position of the lookahead
    pub fn position(&self) -> Position {
        self.position
    }

    /// Checks if the lookahead is `ch`
    pub fn is_at(&self, ch: char) -> bool {
        self.lookahead == Some(ch)
    }

    /// Checks if the lookahead terminates an expression
    pub fn is_at_end_of_line(&self) -> bool {
        matches!(self.lookahead, None | Some('\n'))
    }

    /// Consumes the lookahead if it is `expected`, reading the next character
    pub fn consume(&mut self, expected: char) -> Result<()> {
        if !self.is_at(expected) {
            return Err(self.error(Reason::Expected(expected)).into());
        }

        trace!(ch = ?expected, column = self.position.column, "consume");
        self.position = self.position.advance(expected);
        self.lookahead = self.source.next_char()?;
        Ok(())
    }

    /// Builds a parse error at the lookahead
    pub fn error(&self, reason: Reason) -> ParseError {
        ParseError::new(reason, self.lookahead, self.position)
    }

    /// Records entry into a nested rule (a group or an exponent chain)
    pub fn enter(&mut self) -> Result<()> {
        if self.depth == MAX_DEPTH {
            return Err(self.error(Reason::TooDeep { limit: MAX_DEPTH }).into());
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
