//! Dispatcher: type string routing and the public codec entry points
//!
//! A descriptor is resolved into a [`ParamType`] exactly once per call,
//! before any value is looked at, so every schema error surfaces ahead of
//! value errors. Routing order: exact names, then the `bytes<N>` and
//! `(u)int<N>` families, then a trailing `[...]` array suffix. Anything
//! else is `UnsupportedType`.

use crate::codec::{address, array, boolean, bytes, number, string, tuple};
use crate::codec::{decode_sequence, encode_sequence, DecodeContext, Decoded, Encoded};
use crate::config::AbiConfig;
use crate::error::{AbiError, Result};
use crate::limits::limits_for;
use crate::param::Param;
use crate::token::Token;
use crate::types::{Field, ParamType};
use crate::word::WORD_SIZE;

/// ABI encoder/decoder bound to a configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    config: AbiConfig,
}

impl Codec {
    /// Create a codec with the given limits
    pub fn new(config: AbiConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &AbiConfig {
        &self.config
    }

    /// Resolve a descriptor into its type shape
    pub fn resolve(&self, param: &Param) -> Result<ParamType> {
        resolve_type(&param.name, &param.kind, param.components(), 0, &self.config)
    }

    /// Encode one value against its descriptor
    pub fn encode_param(&self, param: &Param, value: &Token) -> Result<Encoded> {
        let ty = self.resolve(param)?;
        encode_type(&ty, &param.name, value)
    }

    /// Decode one value whose encoding starts at `data[0]`
    pub fn decode_param<'a>(&self, param: &Param, data: &'a [u8]) -> Result<Decoded<'a>> {
        let ty = self.resolve(param)?;
        let mut ctx = DecodeContext::new(&self.config, data.len());
        let (value, consumed) = decode_type(&ty, &param.name, data, &mut ctx)?;
        Ok(Decoded {
            value,
            remaining: data.get(consumed..).unwrap_or(&[]),
            consumed,
        })
    }

    /// Encode a parameter list: all heads, then all tails
    pub fn encode(&self, params: &[Param], values: &[Token]) -> Result<Vec<u8>> {
        let types = self.resolve_all(params)?;
        if values.len() != params.len() {
            return Err(AbiError::invalid_argument(
                "",
                signature(&types),
                values.len(),
                format!("expected {} values, got {}", params.len(), values.len()),
            ));
        }

        let parts = types
            .iter()
            .zip(params)
            .zip(values)
            .map(|((ty, param), value)| encode_type(ty, &param.name, value))
            .collect::<Result<Vec<_>>>()?;
        Ok(encode_sequence(&parts))
    }

    /// Encode a call: a precomputed 4-byte selector followed by the arguments
    pub fn encode_function_call(&self, selector: [u8; 4], params: &[Param], values: &[Token]) -> Result<Vec<u8>> {
        let mut result = selector.to_vec();
        result.extend(self.encode(params, values)?);
        Ok(result)
    }

    /// Decode a parameter list.
    ///
    /// Each entry reports the head bytes the cursor advanced past for that
    /// parameter and the input remaining after its head slot.
    pub fn decode<'a>(&self, params: &[Param], data: &'a [u8]) -> Result<Vec<Decoded<'a>>> {
        let types = self.resolve_all(params)?;
        let items = params.iter().zip(&types).map(|(p, ty)| (p.name.clone(), ty));
        let mut ctx = DecodeContext::new(&self.config, data.len());
        let (members, _) = decode_sequence(items, data, &mut ctx)?;

        let mut cursor = 0usize;
        Ok(members
            .into_iter()
            .map(|member| {
                cursor += member.head;
                Decoded {
                    value: member.token,
                    remaining: data.get(cursor..).unwrap_or(&[]),
                    consumed: member.head,
                }
            })
            .collect())
    }

    fn resolve_all(&self, params: &[Param]) -> Result<Vec<ParamType>> {
        params.iter().map(|p| self.resolve(p)).collect()
    }
}

fn signature(types: &[ParamType]) -> String {
    let inner: Vec<String> = types.iter().map(ToString::to_string).collect();
    format!("({})", inner.join(","))
}

fn resolve_type(
    name: &str,
    kind: &str,
    components: &[Param],
    depth: usize,
    config: &AbiConfig,
) -> Result<ParamType> {
    if depth > config.max_depth {
        tracing::debug!("Rejecting `{}`: nesting deeper than {}", kind, config.max_depth);
        return Err(AbiError::DepthExceeded {
            ty: kind.to_string(),
            max: config.max_depth,
        });
    }

    match kind {
        "string" => return Ok(ParamType::String),
        "bool" => return Ok(ParamType::Bool),
        "address" => return Ok(ParamType::Address),
        "tuple" => return resolve_tuple(name, components, depth, config),
        _ => {}
    }

    if let Some(width) = kind.strip_prefix("bytes").filter(|w| is_digits(w)) {
        if width.is_empty() {
            return Ok(ParamType::Bytes);
        }
        return match width.parse::<usize>() {
            Ok(size) if (1..=32).contains(&size) && !width.starts_with('0') => Ok(ParamType::FixedBytes(size)),
            _ => Err(AbiError::InvalidAbiType(kind.to_string())),
        };
    }

    let integer = kind
        .strip_prefix("uint")
        .map(|w| (false, w))
        .or_else(|| kind.strip_prefix("int").map(|w| (true, w)));
    if let Some((signed, width)) = integer.filter(|(_, w)| is_digits(w)) {
        let limits = limits_for(kind).ok_or_else(|| AbiError::InvalidAbiType(kind.to_string()))?;
        debug_assert_eq!(limits.signed, signed);
        return Ok(if signed {
            ParamType::Int(limits.bits)
        } else {
            ParamType::Uint(limits.bits)
        });
    }

    if let Some((element, size)) = kind.strip_suffix(']').and_then(|k| k.rsplit_once('[')) {
        let inner = Box::new(resolve_type(name, element, components, depth + 1, config)?);
        if size.is_empty() {
            return Ok(ParamType::Array(inner));
        }
        if !is_digits(size) {
            return Err(unsupported(kind));
        }
        return match size.parse::<usize>() {
            Ok(0) => Err(AbiError::InvalidAbiSchema {
                name: name.to_string(),
                reason: format!("zero-length array `{}`", kind),
            }),
            Ok(len) => Ok(ParamType::FixedArray(inner, len)),
            Err(_) => Err(unsupported(kind)),
        };
    }

    Err(unsupported(kind))
}

fn resolve_tuple(name: &str, components: &[Param], depth: usize, config: &AbiConfig) -> Result<ParamType> {
    if components.is_empty() {
        return Err(AbiError::InvalidAbiSchema {
            name: name.to_string(),
            reason: "tuple has no components".to_string(),
        });
    }
    let fields = components
        .iter()
        .map(|c| -> Result<Field> {
            Ok(Field {
                name: c.name.clone(),
                ty: resolve_type(&c.name, &c.kind, c.components(), depth + 1, config)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ParamType::Tuple(fields))
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn unsupported(kind: &str) -> AbiError {
    tracing::debug!("Unsupported abi type `{}`", kind);
    AbiError::UnsupportedType(kind.to_string())
}

/// Route a resolved type to its encoder
pub(crate) fn encode_type(ty: &ParamType, name: &str, value: &Token) -> Result<Encoded> {
    tracing::trace!("encode {} `{}`", ty, name);
    match ty {
        ParamType::Address => address::encode(name, value),
        ParamType::Bool => boolean::encode(name, value),
        ParamType::Uint(_) | ParamType::Int(_) => number::encode(ty, name, value),
        ParamType::FixedBytes(size) => bytes::encode_fixed(*size, name, value),
        ParamType::Bytes => bytes::encode_dynamic(name, value),
        ParamType::String => string::encode(name, value),
        ParamType::Array(inner) => array::encode_dynamic(inner, name, value),
        ParamType::FixedArray(inner, size) => array::encode_fixed(inner, *size, name, value),
        ParamType::Tuple(fields) => tuple::encode(fields, name, value),
    }
}

/// Route a resolved type to its decoder
pub(crate) fn decode_type(
    ty: &ParamType,
    name: &str,
    data: &[u8],
    ctx: &mut DecodeContext<'_>,
) -> Result<(Token, usize)> {
    tracing::trace!("decode {} `{}` from {} bytes", ty, name, data.len());
    ctx.charge(ty, 1)?;
    let (token, used) = match ty {
        ParamType::Address => address::decode(data)?,
        ParamType::Bool => boolean::decode(name, data)?,
        ParamType::Uint(_) | ParamType::Int(_) => number::decode(ty, name, data)?,
        ParamType::FixedBytes(size) => bytes::decode_fixed(*size, data)?,
        ParamType::Bytes => bytes::decode_dynamic(data)?,
        ParamType::String => string::decode(name, data)?,
        ParamType::Array(inner) => array::decode_dynamic(inner, name, data, ctx)?,
        ParamType::FixedArray(inner, size) => array::decode_fixed(inner, *size, name, data, ctx)?,
        ParamType::Tuple(fields) => tuple::decode(fields, name, data, ctx)?,
    };
    if matches!(ty, ParamType::Bytes | ParamType::String) {
        ctx.charge(ty, used / WORD_SIZE)?;
    }
    Ok((token, used))
}
