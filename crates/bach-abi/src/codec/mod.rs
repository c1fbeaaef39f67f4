//! Per-type codecs and the head/tail layout shared by composite types
//!
//! Every codec encodes to an [`Encoded`] and decodes from a slice that starts
//! at the value's own encoding, returning the token together with the number
//! of bytes it spans. For dynamic types that slice is the value's tail region.

pub(crate) mod address;
pub(crate) mod array;
pub(crate) mod boolean;
pub(crate) mod bytes;
pub(crate) mod number;
pub(crate) mod string;
pub(crate) mod tuple;

use ::bytes::{BufMut, BytesMut};

use crate::config::AbiConfig;
use crate::dispatch::decode_type;
use crate::error::{AbiError, Result};
use crate::token::Token;
use crate::types::ParamType;
use crate::word::{read_usize, usize_word, WORD_SIZE};

/// Result of encoding one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    /// Bytes placed inline at the value's head position
    Static(Vec<u8>),
    /// Self-contained tail region, referenced from the head by an offset
    Dynamic {
        /// Logical content length: byte length for `bytes`/`string`,
        /// element count for `T[]`, total encoded length for tuples and
        /// fixed arrays
        size: usize,
        /// The tail region
        data: Vec<u8>,
    },
}

impl Encoded {
    /// Whether the parent must place this value behind an offset
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Encoded::Dynamic { .. })
    }

    /// Logical size of a dynamic value
    pub fn size(&self) -> Option<usize> {
        match self {
            Encoded::Static(_) => None,
            Encoded::Dynamic { size, .. } => Some(*size),
        }
    }

    /// Encoded bytes
    pub fn bytes(&self) -> &[u8] {
        match self {
            Encoded::Static(data) | Encoded::Dynamic { data, .. } => data,
        }
    }

    /// Take the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Encoded::Static(data) | Encoded::Dynamic { data, .. } => data,
        }
    }

    fn head_len(&self) -> usize {
        match self {
            Encoded::Static(data) => data.len(),
            Encoded::Dynamic { .. } => WORD_SIZE,
        }
    }
}

/// Result of decoding one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<'a> {
    /// Decoded value
    pub value: Token,
    /// Input left after the bytes this value advanced past
    pub remaining: &'a [u8],
    /// Bytes advanced past
    pub consumed: usize,
}

/// Lay out already-encoded members: all heads in order, then all tails.
///
/// Dynamic members get an offset word in the head, measured from the start
/// of the returned buffer.
pub(crate) fn encode_sequence(parts: &[Encoded]) -> Vec<u8> {
    let head_len: usize = parts.iter().map(Encoded::head_len).sum();
    let tail_len: usize = parts
        .iter()
        .filter(|p| p.is_dynamic())
        .map(|p| p.bytes().len())
        .sum();

    let mut head = BytesMut::with_capacity(head_len + tail_len);
    let mut tail = BytesMut::with_capacity(tail_len);
    for part in parts {
        match part {
            Encoded::Static(data) => head.put_slice(data),
            Encoded::Dynamic { data, .. } => {
                head.put_slice(&usize_word(head_len + tail.len()));
                tail.put_slice(data);
            }
        }
    }
    head.unsplit(tail);
    head.to_vec()
}

/// Wrap a laid-out composite, dynamic iff any member is
pub(crate) fn composite(parts: &[Encoded]) -> Encoded {
    let data = encode_sequence(parts);
    if parts.iter().any(Encoded::is_dynamic) {
        Encoded::Dynamic {
            size: data.len(),
            data,
        }
    } else {
        Encoded::Static(data)
    }
}

/// Decode-wide state: the active limits and the remaining value budget.
///
/// Every decoded value charges one unit and `bytes`/`string` payloads one
/// more per word. Offsets may alias, so the budget is what bounds the total
/// output, at `max_decode_expansion` units per input word.
pub(crate) struct DecodeContext<'c> {
    pub config: &'c AbiConfig,
    budget: usize,
    limit: usize,
}

impl<'c> DecodeContext<'c> {
    pub fn new(config: &'c AbiConfig, input_len: usize) -> Self {
        let limit = (input_len / WORD_SIZE + 1).saturating_mul(config.max_decode_expansion);
        Self {
            config,
            budget: limit,
            limit,
        }
    }

    /// Take `units` from the budget
    pub fn charge(&mut self, ty: &ParamType, units: usize) -> Result<()> {
        match self.budget.checked_sub(units) {
            Some(rest) => {
                self.budget = rest;
                Ok(())
            }
            None => {
                tracing::debug!("Decode budget of {} exhausted at {}", self.limit, ty);
                Err(AbiError::DecodeLimitExceeded {
                    ty: ty.to_string(),
                    limit: self.limit,
                })
            }
        }
    }
}

/// One decoded member of a sequence
pub(crate) struct Member {
    pub token: Token,
    /// Bytes the member occupies in the head region
    pub head: usize,
}

/// Decode a head/tail sequence starting at `data[0]`.
///
/// Returns the members and the total bytes the sequence spans: the head
/// region or the end of the furthest tail, whichever is larger.
pub(crate) fn decode_sequence<'t, I>(
    items: I,
    data: &[u8],
    ctx: &mut DecodeContext<'_>,
) -> Result<(Vec<Member>, usize)>
where
    I: IntoIterator<Item = (String, &'t ParamType)>,
{
    let items = items.into_iter();
    let mut members = Vec::with_capacity(items.size_hint().0.min(data.len() / WORD_SIZE));
    let mut cursor = 0usize;
    let mut end = 0usize;

    for (name, ty) in items {
        let at = data.get(cursor..).unwrap_or(&[]);
        if ty.is_dynamic() {
            let offset = read_usize(at, &ty.to_string())?;
            let tail = data
                .get(offset..)
                .ok_or_else(|| AbiError::insufficient(ty, offset, data.len()))?;
            let (token, used) = decode_type(ty, &name, tail, ctx)?;
            end = end.max(offset + used);
            cursor += WORD_SIZE;
            members.push(Member {
                token,
                head: WORD_SIZE,
            });
        } else {
            let (token, used) = decode_type(ty, &name, at, ctx)?;
            cursor += used;
            members.push(Member { token, head: used });
        }
    }

    Ok((members, end.max(cursor)))
}

/// Name of a nested member for diagnostics
pub(crate) fn child_name(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (_, true) => parent.to_string(),
        (true, false) => child.to_string(),
        (false, false) => format!("{}.{}", parent, child),
    }
}
