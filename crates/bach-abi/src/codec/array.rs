//! `T[k]` and `T[]`
//!
//! Elements use the tuple head/tail layout. A fixed array has no length
//! prefix and is dynamic only when `T` is; a dynamic array is always
//! dynamic and starts with its element count.

use crate::dispatch::encode_type;
use crate::error::{AbiError, Result};
use crate::token::Token;
use crate::types::ParamType;
use crate::word::{read_usize, usize_word, WORD_SIZE};

use super::{composite, decode_sequence, encode_sequence, DecodeContext, Encoded};

pub(crate) fn encode_fixed(inner: &ParamType, size: usize, name: &str, value: &Token) -> Result<Encoded> {
    let items = elements(inner, Some(size), name, value)?;
    if items.len() != size {
        return Err(AbiError::invalid_argument(
            name,
            ParamType::FixedArray(Box::new(inner.clone()), size),
            value,
            format!("expected {} elements, got {}", size, items.len()),
        ));
    }
    let parts = encode_elements(inner, name, items)?;
    Ok(composite(&parts))
}

pub(crate) fn encode_dynamic(inner: &ParamType, name: &str, value: &Token) -> Result<Encoded> {
    let items = elements(inner, None, name, value)?;
    let parts = encode_elements(inner, name, items)?;

    let mut data = usize_word(parts.len()).to_vec();
    data.extend(encode_sequence(&parts));
    Ok(Encoded::Dynamic {
        size: parts.len(),
        data,
    })
}

pub(crate) fn decode_fixed(
    inner: &ParamType,
    size: usize,
    name: &str,
    data: &[u8],
    ctx: &mut DecodeContext<'_>,
) -> Result<(Token, usize)> {
    let (tokens, used) = decode_elements(inner, size, name, data, ctx)?;
    Ok((Token::FixedArray(tokens), used))
}

pub(crate) fn decode_dynamic(
    inner: &ParamType,
    name: &str,
    data: &[u8],
    ctx: &mut DecodeContext<'_>,
) -> Result<(Token, usize)> {
    let max_array_len = ctx.config.max_array_len;
    let ty = ParamType::Array(Box::new(inner.clone()));
    let count = read_usize(data, &ty.to_string())?;
    if count > max_array_len {
        return Err(AbiError::invalid_argument(
            name,
            &ty,
            count,
            format!("array length exceeds limit of {}", max_array_len),
        ));
    }

    let body = &data[WORD_SIZE..];
    let needed = count
        .checked_mul(inner.head_len())
        .ok_or_else(|| AbiError::insufficient(&ty, usize::MAX, body.len()))?;
    if body.len() < needed {
        return Err(AbiError::insufficient(&ty, WORD_SIZE + needed, data.len()));
    }

    let (tokens, used) = decode_elements(inner, count, name, body, ctx)?;
    Ok((Token::Array(tokens), WORD_SIZE + used))
}

fn elements<'v>(inner: &ParamType, size: Option<usize>, name: &str, value: &'v Token) -> Result<&'v [Token]> {
    match value {
        Token::Array(items) | Token::FixedArray(items) => Ok(items.as_slice()),
        _ => {
            let ty = match size {
                Some(size) => ParamType::FixedArray(Box::new(inner.clone()), size),
                None => ParamType::Array(Box::new(inner.clone())),
            };
            Err(AbiError::invalid_argument(
                name,
                ty,
                value,
                format!("expected an array, got {}", value.kind()),
            ))
        }
    }
}

fn encode_elements(inner: &ParamType, name: &str, items: &[Token]) -> Result<Vec<Encoded>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| encode_type(inner, &format!("{}[{}]", name, i), item))
        .collect()
}

fn decode_elements(
    inner: &ParamType,
    count: usize,
    name: &str,
    data: &[u8],
    ctx: &mut DecodeContext<'_>,
) -> Result<(Vec<Token>, usize)> {
    let items = (0..count).map(|i| (format!("{}[{}]", name, i), inner));
    let (members, used) = decode_sequence(items, data, ctx)?;
    Ok((members.into_iter().map(|m| m.token).collect(), used))
}
