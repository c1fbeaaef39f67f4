//! `string`: UTF-8 bytes laid out exactly like dynamic `bytes`

use crate::error::{AbiError, Result};
use crate::token::Token;

use super::{bytes, Encoded};

const TYPE: &str = "string";

pub(crate) fn encode(name: &str, value: &Token) -> Result<Encoded> {
    match value {
        Token::String(s) => Ok(bytes::encode_payload(s.as_bytes())),
        _ => Err(AbiError::invalid_argument(
            name,
            TYPE,
            value,
            format!("expected a string, got {}", value.kind()),
        )),
    }
}

pub(crate) fn decode(name: &str, data: &[u8]) -> Result<(Token, usize)> {
    let (payload, used) = bytes::decode_payload(data, TYPE)?;
    let s = std::str::from_utf8(payload).map_err(|e| {
        AbiError::invalid_argument(name, TYPE, format!("0x{}", hex::encode(payload)), format!("invalid UTF-8: {}", e))
    })?;
    Ok((Token::String(s.to_string()), used))
}
