//! Integer arithmetic
//!
//! All operations wrap around on overflow, following two's-complement
//! `i64` semantics. Nothing here can fail.

/// Integer produced by every grammar rule
pub type Value = i64;

/// Raises `base` to `exponent` by repeated squaring.
///
/// A negative exponent yields 0 and a zero exponent yields 1, so
/// `pow(0, 0) == 1`. The grammar has no unary minus, so negative
/// exponents never come from parsed input.
pub fn pow(base: Value, exponent: Value) -> Value {
    match exponent {
        e if e < 0 => 0,
        0 => 1,
        1 => base,
        e if e % 2 == 0 => pow(base.wrapping_mul(base), e / 2),
        e => base.wrapping_mul(pow(base.wrapping_mul(base), e / 2)),
    }
}

/// Appends a decimal digit to a numeral read so far
pub fn push_digit(total: Value, digit: char) -> Value {
    debug_assert!(digit.is_ascii_digit());
    total.wrapping_mul(10).wrapping_add(Value::from(digit as u8 - b'0'))
}
