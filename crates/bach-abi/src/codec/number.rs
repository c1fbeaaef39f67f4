//! `uintN` / `intN`: one big-endian word, two's complement for negatives
//!
//! Accepts `Token::Uint`, `Token::Int`, or a decimal/hex string. Every value
//! is range-checked against the limits table in both directions.

use primitive_types::U256;

use crate::coerce::{to_integer, CoerceError};
use crate::error::{AbiError, Result};
use crate::limits::{limits_for, Limits};
use crate::token::{Token, I256};
use crate::types::ParamType;
use crate::word::{read_word, twos_complement, u256_word, Word, WORD_SIZE};

use super::Encoded;

pub(crate) fn encode(ty: &ParamType, name: &str, value: &Token) -> Result<Encoded> {
    let limits = limits_of(ty)?;
    let number = to_integer(value).map_err(|e| match e {
        CoerceError::NumberTooLarge(text) => out_of_range(ty, name, text, limits),
        other => AbiError::invalid_argument(name, ty, value, other.to_string()),
    })?;
    if !limits.contains(&number) {
        return Err(out_of_range(ty, name, number, limits));
    }
    Ok(Encoded::Static(to_word(&number).to_vec()))
}

pub(crate) fn decode(ty: &ParamType, name: &str, data: &[u8]) -> Result<(Token, usize)> {
    let limits = limits_of(ty)?;
    let word = read_word(data, &ty.to_string())?;
    let number = from_word(word, limits.signed);
    if !limits.contains(&number) {
        return Err(out_of_range(ty, name, number, limits));
    }
    let token = if limits.signed {
        Token::Int(number)
    } else {
        Token::Uint(number.abs())
    };
    Ok((token, WORD_SIZE))
}

/// Encode an in-range integer as a 256-bit two's-complement word
pub(crate) fn to_word(number: &I256) -> Word {
    let magnitude = u256_word(&number.abs());
    if number.is_negative() {
        twos_complement(&magnitude)
    } else {
        magnitude
    }
}

/// Interpret a word, reconstructing negatives when the sign bit is set
fn from_word(word: &Word, signed: bool) -> I256 {
    if signed && word[0] & 0x80 != 0 {
        I256::new(U256::from_big_endian(&twos_complement(word)), true)
    } else {
        I256::from(U256::from_big_endian(word))
    }
}

fn limits_of(ty: &ParamType) -> Result<&'static Limits> {
    let name = ty.to_string();
    limits_for(&name).ok_or(AbiError::InvalidAbiType(name))
}

fn out_of_range(ty: &ParamType, name: &str, value: impl ToString, limits: &Limits) -> AbiError {
    AbiError::OutOfRange {
        name: name.to_string(),
        ty: ty.to_string(),
        value: value.to_string(),
        min: limits.min.to_string(),
        max: limits.max.to_string(),
    }
}
