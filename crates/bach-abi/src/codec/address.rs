//! `address`: 20 bytes right-aligned in one word
//!
//! Accepts `Token::Address`, a hex string (with or without `0x`, any case),
//! or exactly 20 raw bytes.

use crate::error::{AbiError, Result};
use crate::token::{Address, Token};
use crate::word::{read_word, right_align, WORD_SIZE};

use super::Encoded;

const TYPE: &str = "address";

pub(crate) fn encode(name: &str, value: &Token) -> Result<Encoded> {
    let address = match value {
        Token::Address(addr) => *addr,
        Token::String(s) => parse(s)
            .ok_or_else(|| AbiError::invalid_argument(name, TYPE, value, "not a 20-byte hex address"))?,
        Token::Bytes(data) | Token::FixedBytes(data) if data.len() == Address::len_bytes() => {
            Address::from_slice(data)
        }
        _ => {
            return Err(AbiError::invalid_argument(
                name,
                TYPE,
                value,
                format!("expected an address, got {}", value.kind()),
            ))
        }
    };
    Ok(Encoded::Static(right_align(address.as_bytes()).to_vec()))
}

pub(crate) fn decode(data: &[u8]) -> Result<(Token, usize)> {
    let word = read_word(data, TYPE)?;
    let address = Address::from_slice(&word[WORD_SIZE - Address::len_bytes()..]);
    Ok((Token::Address(address), WORD_SIZE))
}

/// Lower-case, ensure the `0x` prefix, then require exactly 40 hex digits
fn parse(s: &str) -> Option<Address> {
    let normalized = s.trim().to_ascii_lowercase();
    let normalized = if normalized.starts_with("0x") {
        normalized
    } else {
        format!("0x{}", normalized)
    };
    if !is_address(&normalized) {
        return None;
    }
    let bytes = hex::decode(&normalized[2..]).ok()?;
    Some(Address::from_slice(&bytes))
}

fn is_address(s: &str) -> bool {
    s.len() == 42
        && s[2..]
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
