//! `bool`: a `uint8` restricted to 0 and 1

use primitive_types::U256;

use crate::coerce::to_bool;
use crate::error::{AbiError, Result};
use crate::token::Token;
use crate::types::ParamType;

use super::{number, Encoded};

const TYPE: &str = "bool";
const REPR: ParamType = ParamType::Uint(8);

pub(crate) fn encode(name: &str, value: &Token) -> Result<Encoded> {
    let flag = to_bool(value).map_err(|e| AbiError::invalid_argument(name, TYPE, value, e.to_string()))?;
    number::encode(&REPR, name, &Token::Uint(U256::from(flag as u8)))
}

pub(crate) fn decode(name: &str, data: &[u8]) -> Result<(Token, usize)> {
    let (token, used) = number::decode(&REPR, name, data)?;
    match token {
        Token::Uint(v) if v.is_zero() => Ok((Token::Bool(false), used)),
        Token::Uint(v) if v == U256::one() => Ok((Token::Bool(true), used)),
        other => Err(AbiError::invalid_argument(name, TYPE, other, "boolean word must be 0 or 1")),
    }
}
