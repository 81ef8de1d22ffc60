//! Evaluation errors

use contas_error::{Diagnostic, ErrorCode, Position, Span};
use std::fmt;
use std::io;
use thiserror::Error;

/// Standard contas result type
pub type Result<T> = std::result::Result<T, EvalError>;

/// Everything that can stop an evaluation
#[derive(Debug, Error)]
pub enum EvalError {
    /// The character source failed
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    /// The input is not a well-formed expression
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// What the failing grammar rule wanted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// A specific symbol was required. The grammar checks the lookahead
    /// before consuming, so only direct `Cursor::consume` callers see this.
    Expected(char),
    /// A numeral or `(` was required
    ExpectedNumber,
    /// A `(` was never closed
    UnclosedParen { opened: Position },
    /// A `*` not followed by a second `*`
    LoneStar,
    /// Input continues after a complete expression
    TrailingInput,
    /// Groups or `**` chains nested beyond the supported depth
    TooDeep { limit: usize },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Expected(ch) => write!(f, "expected '{}'", ch.escape_debug()),
            Reason::ExpectedNumber => write!(f, "expected a number"),
            Reason::UnclosedParen { .. } => write!(f, "expected ')' to close parenthesis"),
            Reason::LoneStar => write!(f, "expected a second '*' for exponentiation"),
            Reason::TrailingInput => write!(f, "unexpected input after expression"),
            Reason::TooDeep { limit } => {
                write!(f, "expression nested deeper than {} levels", limit)
            }
        }
    }
}

/// The single parse failure: the lookahead did not fit the grammar.
///
/// `reason` and `found` only describe the failure; there is no recovery
/// and no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}, found {} at {at}", describe(.found))]
pub struct ParseError {
    pub reason: Reason,
    /// Lookahead at the point of failure (`None` = end of input)
    pub found: Option<char>,
    /// Position of the lookahead
    pub at: Position,
}

impl ParseError {
    pub fn new(reason: Reason, found: Option<char>, at: Position) -> Self {
        Self { reason, found, at }
    }

    pub fn code(&self) -> ErrorCode {
        match self.reason {
            Reason::Expected(_) => ErrorCode::UNEXPECTED_CHAR,
            Reason::ExpectedNumber => ErrorCode::EXPECTED_NUMBER,
            Reason::UnclosedParen { .. } => ErrorCode::UNCLOSED_PAREN,
            Reason::LoneStar => ErrorCode::LONE_STAR,
            Reason::TrailingInput => ErrorCode::TRAILING_INPUT,
            Reason::TooDeep { .. } => ErrorCode::NESTING_TOO_DEEP,
        }
    }

    /// Builds a diagnostic pointing at the failing character of input `file_id`
    pub fn to_diagnostic(&self, file_id: u32) -> Diagnostic {
        let span = Span::char_at(self.at, self.found, file_id);
        let mut diagnostic = Diagnostic::error(self.reason.to_string())
            .with_code(self.code())
            .with_label(span, format!("found {}", describe(&self.found)));

        match self.reason {
            Reason::UnclosedParen { opened } => {
                diagnostic = diagnostic.with_secondary_label(
                    Span::char_at(opened, Some('('), file_id),
                    "parenthesis opened here",
                );
            }
            Reason::LoneStar => {
                diagnostic = diagnostic
                    .with_note("there is no multiplication operator")
                    .with_help("exponentiation is written `**`");
            }
            Reason::TrailingInput if self.found.is_some_and(|c| c.is_ascii_digit()) => {
                diagnostic = diagnostic.with_note(
                    "`0` is a complete number; digits cannot follow it or a `)`",
                );
            }
            _ => {}
        }

        if self.found.is_some_and(|c| c.is_whitespace() && c != '\n') {
            diagnostic = diagnostic.with_help("remove the whitespace; it is not allowed in expressions");
        }

        diagnostic
    }
}

fn describe(found: &Option<char>) -> String {
    match found {
        None => "end of input".to_string(),
        Some('\n') => "end of line".to_string(),
        Some(ch) => format!("'{}'", ch.escape_debug()),
    }
}
