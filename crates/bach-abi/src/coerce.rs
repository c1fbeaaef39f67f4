//! Lenient coercion of loose tokens into the shapes the codecs need
//!
//! Codecs call these and re-raise failures as `AbiError::InvalidArgument`
//! naming the parameter, so the messages here stay parameter-agnostic.

use primitive_types::U256;
use thiserror::Error;

use crate::token::{I256, Token};

/// Coercion failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    /// JSON null has no ABI meaning
    #[error("null is not an abi value")]
    Null,
    /// Not a boolean, `0`/`1`, or their string forms
    #[error("invalid boolean: {0}")]
    InvalidBoolean(String),
    /// Not an integer
    #[error("invalid integer: {0}")]
    InvalidNumber(String),
    /// Integer magnitude does not fit in 256 bits
    #[error("integer does not fit in 256 bits: {0}")]
    NumberTooLarge(String),
    /// Not raw bytes or a 0x-prefixed hex string
    #[error("invalid byte sequence: {0}")]
    InvalidBytes(String),
}

/// Coerce to a strict boolean
pub fn to_bool(token: &Token) -> Result<bool, CoerceError> {
    match token {
        Token::Bool(b) => Ok(*b),
        Token::Uint(v) if *v <= U256::one() => Ok(!v.is_zero()),
        Token::Int(v) if !v.is_negative() && v.abs() <= U256::one() => Ok(!v.is_zero()),
        Token::String(s) => match s.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(CoerceError::InvalidBoolean(token.to_string())),
        },
        _ => Err(CoerceError::InvalidBoolean(token.to_string())),
    }
}

/// Coerce to an exact integer
///
/// Strings may carry a leading sign and be decimal or `0x` hex. A decimal
/// fraction is accepted only when every fractional digit is zero.
pub fn to_integer(token: &Token) -> Result<I256, CoerceError> {
    match token {
        Token::Uint(v) => Ok(I256::from(*v)),
        Token::Int(v) => Ok(*v),
        Token::String(s) => parse_integer(s),
        _ => Err(CoerceError::InvalidNumber(token.to_string())),
    }
}

pub(crate) fn parse_integer(text: &str) -> Result<I256, CoerceError> {
    let invalid = || CoerceError::InvalidNumber(text.to_string());

    let s = text.trim();
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let abs = if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        parse_hex_u256(digits).ok_or_else(|| CoerceError::NumberTooLarge(text.to_string()))?
    } else {
        let digits = match s.split_once('.') {
            Some((whole, fraction)) => {
                if !fraction.bytes().all(|b| b == b'0') {
                    return Err(invalid());
                }
                whole
            }
            None => s,
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // Only digits remain, so any failure is an overflow.
        U256::from_dec_str(digits).map_err(|_| CoerceError::NumberTooLarge(text.to_string()))?
    };

    Ok(I256::new(abs, negative))
}

/// Parse validated hex digits; `None` when more than 256 bits are significant.
fn parse_hex_u256(digits: &str) -> Option<U256> {
    let significant = digits.trim_start_matches('0');
    if significant.len() > 64 {
        return None;
    }
    let bytes = hex::decode(format!("{:0>64}", significant)).ok()?;
    Some(U256::from_big_endian(&bytes))
}

/// Coerce to raw bytes
pub fn to_byte_vec(token: &Token) -> Result<Vec<u8>, CoerceError> {
    match token {
        Token::Bytes(data) | Token::FixedBytes(data) => Ok(data.clone()),
        Token::String(s) => s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .and_then(|digits| hex::decode(digits).ok())
            .ok_or_else(|| CoerceError::InvalidBytes(token.to_string())),
        _ => Err(CoerceError::InvalidBytes(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Boolean coercion ====================

    #[test]
    fn test_to_bool_accepted_forms() {
        assert_eq!(to_bool(&Token::Bool(true)), Ok(true));
        assert_eq!(to_bool(&Token::uint(0)), Ok(false));
        assert_eq!(to_bool(&Token::int(1)), Ok(true));
        assert_eq!(to_bool(&Token::string("true")), Ok(true));
        assert_eq!(to_bool(&Token::string("0")), Ok(false));
    }

    #[test]
    fn test_to_bool_rejects_other_values() {
        assert!(matches!(to_bool(&Token::uint(2)), Err(CoerceError::InvalidBoolean(_))));
        assert!(matches!(to_bool(&Token::int(-1)), Err(CoerceError::InvalidBoolean(_))));
        assert!(matches!(to_bool(&Token::string("yes")), Err(CoerceError::InvalidBoolean(_))));
        assert!(matches!(to_bool(&Token::Bytes(vec![1])), Err(CoerceError::InvalidBoolean(_))));
    }

    // ==================== Integer coercion ====================

    #[test]
    fn test_to_integer_decimal_and_hex() {
        assert_eq!(to_integer(&Token::string("255")), Ok(I256::from_i128(255)));
        assert_eq!(to_integer(&Token::string("-128")), Ok(I256::from_i128(-128)));
        assert_eq!(to_integer(&Token::string("+7")), Ok(I256::from_i128(7)));
        assert_eq!(to_integer(&Token::string("0xdeadbeef")), Ok(I256::from_i128(0xdeadbeef)));
        assert_eq!(to_integer(&Token::string("-0x80")), Ok(I256::from_i128(-128)));
    }

    #[test]
    fn test_to_integer_integral_fraction() {
        assert_eq!(to_integer(&Token::string("7.0")), Ok(I256::from_i128(7)));
        assert!(matches!(
            to_integer(&Token::string("1.5")),
            Err(CoerceError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_to_integer_rejects_garbage() {
        for bad in ["", "-", "abc", "0x", "0xzz", "1e3", "12 34"] {
            assert!(
                matches!(to_integer(&Token::string(bad)), Err(CoerceError::InvalidNumber(_))),
                "{:?} should be rejected",
                bad
            );
        }
        assert!(to_integer(&Token::Bool(true)).is_err());
    }

    #[test]
    fn test_to_integer_overflow() {
        let too_big = format!("0x1{}", "0".repeat(64));
        assert!(matches!(
            to_integer(&Token::string(too_big)),
            Err(CoerceError::NumberTooLarge(_))
        ));
        let max = format!("0x{}", "f".repeat(64));
        assert_eq!(to_integer(&Token::string(max)), Ok(I256::from(U256::MAX)));
        let padded = format!("0x{}1", "0".repeat(70));
        assert_eq!(to_integer(&Token::string(padded)), Ok(I256::from_i128(1)));
    }

    // ==================== Byte coercion ====================

    #[test]
    fn test_to_byte_vec() {
        assert_eq!(to_byte_vec(&Token::string("0xdeadbeef")), Ok(vec![0xde, 0xad, 0xbe, 0xef]));
        assert_eq!(to_byte_vec(&Token::Bytes(vec![1, 2])), Ok(vec![1, 2]));
        assert_eq!(to_byte_vec(&Token::string("0x")), Ok(vec![]));
        assert!(to_byte_vec(&Token::string("deadbeef")).is_err());
        assert!(to_byte_vec(&Token::string("0xabc")).is_err());
        assert!(to_byte_vec(&Token::uint(1)).is_err());
    }
}
