//! `bytesN` and `bytes`
//!
//! Fixed bytes are left-aligned in a single word, the opposite of numbers
//! and addresses. Dynamic bytes are a length word followed by the data
//! zero-padded to whole words. Both accept raw bytes or a `0x` hex string.

use crate::coerce::to_byte_vec;
use crate::error::{AbiError, Result};
use crate::token::Token;
use crate::word::{left_align, pad_right, padded_len, read_usize, read_word, usize_word, WORD_SIZE};

use super::Encoded;

pub(crate) fn encode_fixed(size: usize, name: &str, value: &Token) -> Result<Encoded> {
    let ty = format!("bytes{}", size);
    let data = to_byte_vec(value).map_err(|e| AbiError::invalid_argument(name, &ty, value, e.to_string()))?;
    if data.len() != size {
        return Err(AbiError::invalid_argument(
            name,
            &ty,
            value,
            format!("expected {} bytes, got {}", size, data.len()),
        ));
    }
    Ok(Encoded::Static(left_align(&data).to_vec()))
}

pub(crate) fn encode_dynamic(name: &str, value: &Token) -> Result<Encoded> {
    let data = to_byte_vec(value).map_err(|e| AbiError::invalid_argument(name, "bytes", value, e.to_string()))?;
    Ok(encode_payload(&data))
}

/// Length word followed by the padded data
pub(crate) fn encode_payload(data: &[u8]) -> Encoded {
    let mut encoded = Vec::with_capacity(WORD_SIZE + padded_len(data.len()));
    encoded.extend_from_slice(&usize_word(data.len()));
    encoded.extend(pad_right(data));
    Encoded::Dynamic {
        size: data.len(),
        data: encoded,
    }
}

pub(crate) fn decode_fixed(size: usize, data: &[u8]) -> Result<(Token, usize)> {
    let word = read_word(data, &format!("bytes{}", size))?;
    Ok((Token::FixedBytes(word[..size].to_vec()), WORD_SIZE))
}

pub(crate) fn decode_dynamic(data: &[u8]) -> Result<(Token, usize)> {
    let (payload, used) = decode_payload(data, "bytes")?;
    Ok((Token::Bytes(payload.to_vec()), used))
}

/// Read a length word and the padded words after it
pub(crate) fn decode_payload<'a>(data: &'a [u8], ty: &str) -> Result<(&'a [u8], usize)> {
    let len = read_usize(data, ty)?;
    let needed = len
        .checked_add(WORD_SIZE - 1)
        .and_then(|n| (n / WORD_SIZE * WORD_SIZE).checked_add(WORD_SIZE))
        .ok_or_else(|| AbiError::insufficient(ty, usize::MAX, data.len()))?;
    if data.len() < needed {
        return Err(AbiError::insufficient(ty, needed, data.len()));
    }
    Ok((&data[WORD_SIZE..WORD_SIZE + len], needed))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Fixed bytes ====================

    #[test]
    fn test_fixed_left_justified() {
        let encoded = encode_fixed(4, "sig", &Token::string("0xdeadbeef")).unwrap();
        let bytes = encoded.bytes();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[..4], &[0xde, 0xad, 0xbe, 0xef]);
        assert!(bytes[4..].iter().all(|&b| b == 0));
        assert!(!encoded.is_dynamic());
    }

    #[test]
    fn test_fixed_size_mismatch() {
        match encode_fixed(4, "sig", &Token::Bytes(vec![1, 2, 3])) {
            Err(AbiError::InvalidArgument { reason, ty, .. }) => {
                assert_eq!(ty, "bytes4");
                assert_eq!(reason, "expected 4 bytes, got 3");
            }
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_fixed_rejects_non_bytes() {
        assert!(matches!(
            encode_fixed(32, "h", &Token::string("hello")),
            Err(AbiError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_decode_fixed_trims() {
        let mut word = [0u8; 32];
        word[..3].copy_from_slice(&[1, 2, 3]);
        assert_eq!(decode_fixed(3, &word).unwrap(), (Token::FixedBytes(vec![1, 2, 3]), 32));
    }

    // ==================== Dynamic bytes ====================

    #[test]
    fn test_dynamic_chunking() {
        let data = vec![0x5a; 33];
        let encoded = encode_dynamic("blob", &Token::Bytes(data.clone())).unwrap();
        assert_eq!(encoded.size(), Some(33));

        let bytes = encoded.bytes();
        assert_eq!(bytes.len(), 96);
        assert_eq!(&bytes[..32], &usize_word(33));
        assert_eq!(&bytes[32..65], &data[..]);
        assert!(bytes[65..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_dynamic_empty() {
        let encoded = encode_dynamic("blob", &Token::Bytes(vec![])).unwrap();
        assert_eq!(encoded.bytes(), &usize_word(0)[..]);
        assert_eq!(decode_dynamic(encoded.bytes()).unwrap(), (Token::Bytes(vec![]), 32));
    }

    #[test]
    fn test_decode_dynamic_consumed() {
        let encoded = encode_dynamic("blob", &Token::Bytes(vec![7; 33])).unwrap();
        let (token, used) = decode_dynamic(encoded.bytes()).unwrap();
        assert_eq!(token, Token::Bytes(vec![7; 33]));
        assert_eq!(used, 96);
    }

    #[test]
    fn test_decode_dynamic_truncated() {
        let mut encoded = encode_dynamic("blob", &Token::Bytes(vec![7; 33])).unwrap().into_bytes();
        encoded.truncate(80);
        assert!(matches!(
            decode_dynamic(&encoded),
            Err(AbiError::InsufficientData { needed: 96, available: 80, .. })
        ));
    }

    #[test]
    fn test_decode_dynamic_absurd_length() {
        let mut data = vec![0xffu8; 32];
        data[..24].fill(0);
        assert!(matches!(decode_dynamic(&data), Err(AbiError::InsufficientData { .. })));
    }
}
