//! Word-level helpers: padding, checked reads, two's complement

use primitive_types::U256;

use crate::error::{AbiError, Result};

/// Size of an ABI word in bytes
pub const WORD_SIZE: usize = 32;

/// One ABI word
pub type Word = [u8; WORD_SIZE];

/// Round `len` up to a whole number of words
pub fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}

/// Place `data` in the low bytes of a zero-filled word (numbers, addresses)
pub fn right_align(data: &[u8]) -> Word {
    debug_assert!(data.len() <= WORD_SIZE);
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - data.len()..].copy_from_slice(data);
    word
}

/// Place `data` in the high bytes of a zero-filled word (`bytesN`)
pub fn left_align(data: &[u8]) -> Word {
    debug_assert!(data.len() <= WORD_SIZE);
    let mut word = [0u8; WORD_SIZE];
    word[..data.len()].copy_from_slice(data);
    word
}

/// Copy `data` and zero-pad it to a whole number of words
pub fn pad_right(data: &[u8]) -> Vec<u8> {
    let mut padded = vec![0u8; padded_len(data.len())];
    padded[..data.len()].copy_from_slice(data);
    padded
}

/// Big-endian word holding `value`
pub fn u256_word(value: &U256) -> Word {
    let mut word = [0u8; WORD_SIZE];
    value.to_big_endian(&mut word);
    word
}

/// Big-endian word holding a length or offset
pub fn usize_word(value: usize) -> Word {
    u256_word(&U256::from(value))
}

/// Read the word at the start of `data`
pub fn read_word<'a>(data: &'a [u8], ty: &str) -> Result<&'a Word> {
    data.get(..WORD_SIZE)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| AbiError::insufficient(ty, WORD_SIZE, data.len()))
}

/// Read the word at the start of `data` as a length or offset.
///
/// Values that cannot address memory are reported as insufficient data:
/// no buffer could hold them.
pub fn read_usize(data: &[u8], ty: &str) -> Result<usize> {
    let value = U256::from_big_endian(read_word(data, ty)?);
    if value > U256::from(usize::MAX) {
        return Err(AbiError::InsufficientData {
            ty: ty.to_string(),
            needed: usize::MAX,
            available: data.len(),
        });
    }
    Ok(value.as_usize())
}

/// 256-bit two's-complement negation of a big-endian word.
///
/// Complements every byte, then adds one with the carry propagated from the
/// least significant byte upwards. Applying it twice yields the input, and it
/// maps `|x|` to the encoding of `-x` as well as the encoding of `-x` back to
/// `|x|`. Zero and `2^255` are their own negations.
pub fn twos_complement(word: &Word) -> Word {
    let mut out = [0u8; WORD_SIZE];
    for (dst, src) in out.iter_mut().zip(word.iter()) {
        *dst = !src;
    }
    let mut carry = 1u16;
    for byte in out.iter_mut().rev() {
        let sum = *byte as u16 + carry;
        *byte = sum as u8;
        carry = sum >> 8;
        if carry == 0 {
            break;
        }
    }
    out
}
