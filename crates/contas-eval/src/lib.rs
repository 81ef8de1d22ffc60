//! contas-eval - Integer expression evaluator
//!
//! Parses and evaluates in a single pass over the input, one character at
//! a time with one character of lookahead. There is no token stream and no
//! syntax tree: every grammar rule returns the value of what it read.
//!
//! Supported: non-negative decimal integers, `+`, `-`, parentheses and
//! right-associative `**`. One expression per call, ended by a newline or
//! the end of input. Arithmetic wraps around on `i64` overflow.
//!
//! # Example
//!
//! ```rust
//! use contas_eval::evaluate_str;
//!
//! assert_eq!(evaluate_str("2**3**2").unwrap(), 512);
//! assert_eq!(evaluate_str("10-3-2").unwrap(), 5);
//! assert!(evaluate_str("1*2").is_err());
//! ```

pub mod arith;
pub mod cursor;
pub mod error;
pub mod grammar;
pub mod source;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

pub use arith::{pow, Value};
pub use cursor::{Cursor, MAX_DEPTH, STACK_SIZE};
pub use error::{EvalError, ParseError, Reason, Result};
pub use source::{CharSource, ReaderSource};

/// Evaluates one expression read from `source`.
///
/// The whole input line must be consumed: after the expression the
/// lookahead has to be a newline or the end of input. Characters after
/// the newline are never read.
pub fn evaluate<S: CharSource>(source: S) -> Result<Value> {
    let mut cursor = Cursor::new(source)?;

    let value = grammar::expr(&mut cursor).and_then(|value| {
        if cursor.is_at_end_of_line() {
            Ok(value)
        } else {
            Err(cursor.error(Reason::TrailingInput).into())
        }
    });

    match &value {
        Ok(value) => debug!(value, "evaluated expression"),
        Err(error) => debug!(%error, "evaluation failed"),
    }

    value
}

/// Evaluates the first line of `input`
pub fn evaluate_str(input: &str) -> Result<Value> {
    evaluate(input.chars())
}

/// Evaluates the first line available from `reader`
pub fn evaluate_reader<R: BufRead>(reader: R) -> Result<Value> {
    evaluate(ReaderSource::new(reader))
}

/// Evaluates the first line of the file at `path`
pub fn evaluate_file(path: impl AsRef<Path>) -> Result<Value> {
    let file = File::open(path.as_ref())?;
    evaluate_reader(BufReader::new(file))
}
