//! `tuple`: components laid out head-first, tails after
//!
//! Accepts components by position (`Token::Tuple`, or an array token of the
//! right length) or by name (`Token::Map` with exactly one entry per
//! component).

use crate::dispatch::encode_type;
use crate::error::{AbiError, Result};
use crate::token::Token;
use crate::types::{Field, ParamType};

use super::{child_name, composite, decode_sequence, DecodeContext, Encoded};

pub(crate) fn encode(fields: &[Field], name: &str, value: &Token) -> Result<Encoded> {
    let values = components(fields, name, value)?;
    let parts = fields
        .iter()
        .zip(values)
        .map(|(field, v)| encode_type(&field.ty, &child_name(name, &field.name), v))
        .collect::<Result<Vec<_>>>()?;
    Ok(composite(&parts))
}

pub(crate) fn decode(
    fields: &[Field],
    name: &str,
    data: &[u8],
    ctx: &mut DecodeContext<'_>,
) -> Result<(Token, usize)> {
    let items = fields
        .iter()
        .map(|field| (child_name(name, &field.name), &field.ty));
    let (members, used) = decode_sequence(items, data, ctx)?;
    Ok((Token::Tuple(members.into_iter().map(|m| m.token).collect()), used))
}

/// Resolve each component's value in declaration order
fn components<'v>(fields: &[Field], name: &str, value: &'v Token) -> Result<Vec<&'v Token>> {
    let ty = || ParamType::Tuple(fields.to_vec());
    match value {
        Token::Tuple(items) | Token::Array(items) | Token::FixedArray(items) => {
            if items.len() != fields.len() {
                return Err(AbiError::invalid_argument(
                    name,
                    ty(),
                    value,
                    format!("expected {} components, got {}", fields.len(), items.len()),
                ));
            }
            Ok(items.iter().collect())
        }
        Token::Map(map) => {
            if map.len() != fields.len() {
                return Err(AbiError::invalid_argument(
                    name,
                    ty(),
                    value,
                    format!("expected {} named components, got {}", fields.len(), map.len()),
                ));
            }
            fields
                .iter()
                .map(|field| {
                    map.get(&field.name).ok_or_else(|| {
                        AbiError::invalid_argument(
                            name,
                            ty(),
                            value,
                            format!("missing component `{}`", field.name),
                        )
                    })
                })
                .collect()
        }
        _ => Err(AbiError::invalid_argument(
            name,
            ty(),
            value,
            format!("expected a tuple, got {}", value.kind()),
        )),
    }
}
