//! Grammar rules
//!
//! Each rule reads from the shared cursor and returns the value of what
//! it recognised; nothing is built in between.
//!
//! ```text
//! Expr      = Term Expr2
//! Expr2     = '+' Term Expr2 | '-' Term Expr2 | ε
//! Term      = Factor Exponent
//! Exponent  = '*' '*' Factor Exponent | ε
//! Factor    = '(' Expr ')' | Number
//! Number    = '0' | NonZeroDigit Digit*
//! ```

use crate::arith::{pow, push_digit, Value};
use crate::cursor::Cursor;
use crate::error::{Reason, Result};
use crate::source::CharSource;

/// `Expr = Term Expr2`
pub fn expr<S: CharSource>(cursor: &mut Cursor<S>) -> Result<Value> {
    let first = term(cursor)?;
    let rest = expr_tail(cursor)?;
    Ok(first.wrapping_add(rest))
}

/// `Expr2 = ('+' | '-') Term Expr2 | ε`
///
/// Returns the sum of the signed terms that follow, so `-3-2` yields -5.
pub fn expr_tail<S: CharSource>(cursor: &mut Cursor<S>) -> Result<Value> {
    let mut sum: Value = 0;

    while let Some(op @ ('+' | '-')) = cursor.peek() {
        cursor.consume(op)?;
        let value = term(cursor)?;

        sum = if op == '+' {
            sum.wrapping_add(value)
        } else {
            sum.wrapping_sub(value)
        };
    }

    Ok(sum)
}

/// `Term = Factor Exponent`
pub fn term<S: CharSource>(cursor: &mut Cursor<S>) -> Result<Value> {
    let base = factor(cursor)?;
    let power = exponent(cursor)?;
    Ok(pow(base, power))
}

/// `Exponent = '*' '*' Factor Exponent | ε`
///
/// The empty production yields 1. Otherwise the right-hand side is
/// evaluated in full before it is used, which makes `**` right-associative.
pub fn exponent<S: CharSource>(cursor: &mut Cursor<S>) -> Result<Value> {
    if !cursor.is_at('*') {
        return Ok(1);
    }
    cursor.consume('*')?;

    if !cursor.is_at('*') {
        return Err(cursor.error(Reason::LoneStar).into());
    }
    cursor.consume('*')?;

    cursor.enter()?;
    let base = factor(cursor)?;
    let power = exponent(cursor)?;
    cursor.leave();

    Ok(pow(base, power))
}

/// `Factor = '(' Expr ')' | Number`
pub fn factor<S: CharSource>(cursor: &mut Cursor<S>) -> Result<Value> {
    if !cursor.is_at('(') {
        return number(cursor);
    }

    let opened = cursor.position();
    cursor.enter()?;
    cursor.consume('(')?;

    let value = expr(cursor)?;

    if !cursor.is_at(')') {
        return Err(cursor.error(Reason::UnclosedParen { opened }).into());
    }
    cursor.consume(')')?;
    cursor.leave();

    Ok(value)
}

/// `Number = '0' | NonZeroDigit Digit*`
///
/// A leading `0` is a numeral on its own: in `05` the `5` is left as
/// lookahead for whatever rule comes next.
pub fn number<S: CharSource>(cursor: &mut Cursor<S>) -> Result<Value> {
    match cursor.peek() {
        Some('0') => {
            cursor.consume('0')?;
            Ok(0)
        }
        Some(first @ '1'..='9') => {
            cursor.consume(first)?;
            let mut total = push_digit(0, first);

            while let Some(digit @ '0'..='9') = cursor.peek() {
                cursor.consume(digit)?;
                total = push_digit(total, digit);
            }

            Ok(total)
        }
        _ => Err(cursor.error(Reason::ExpectedNumber).into()),
    }
}
