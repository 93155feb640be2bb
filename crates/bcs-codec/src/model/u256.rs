//! 256-bit unsigned integers for `u256` values.
//!
//! The integer type itself is `primitive_types::U256`; this module adds the
//! text parsing used by [`Value::uint`](crate::Value::uint), mapping
//! overflow to a range error.

pub use primitive_types::U256;

use crate::error::EncodeError;

/// Parses decimal text, or hex text with a `0x` prefix.
pub fn parse_u256(text: &str) -> Result<U256, EncodeError> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => parse_hex(text, digits),
        None => parse_dec(text),
    }
}

fn parse_dec(text: &str) -> Result<U256, EncodeError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(text));
    }
    // Digits are valid, so the only remaining failure is overflow.
    U256::from_dec_str(text).map_err(|_| out_of_range(text))
}

fn parse_hex(text: &str, digits: &str) -> Result<U256, EncodeError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid(text));
    }
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_str_radix(significant, 16).map_err(|_| out_of_range(text))
}

fn invalid(text: &str) -> EncodeError {
    EncodeError::InvalidNumber {
        input: text.to_string(),
    }
}

fn out_of_range(text: &str) -> EncodeError {
    EncodeError::OutOfRange {
        width: "u256",
        value: text.to_string(),
    }
}
