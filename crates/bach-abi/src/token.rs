//! ABI value model

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use primitive_types::{H160, H256, U256};

use crate::coerce::{parse_integer, CoerceError};

/// Ethereum address (20 bytes)
pub type Address = H160;

/// A value handed to or produced by the codec.
///
/// Decoding always yields the canonical variant for the descriptor
/// (`Uint` for `uintN`, `FixedArray` for `T[k]`, `Tuple` for tuples).
/// Encoding is lenient: each codec accepts the loose forms listed on its
/// module, e.g. a hex `String` for an `address` or a `Map` keyed by
/// component name for a `tuple`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Address (20 bytes)
    Address(Address),
    /// Unsigned integer (8-256 bits)
    Uint(U256),
    /// Signed integer (8-256 bits)
    Int(I256),
    /// Boolean
    Bool(bool),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// Fixed-size bytes (1-32)
    FixedBytes(Vec<u8>),
    /// UTF-8 string, or the textual form of another value
    String(String),
    /// Dynamic array
    Array(Vec<Token>),
    /// Fixed-size array
    FixedArray(Vec<Token>),
    /// Tuple given by position
    Tuple(Vec<Token>),
    /// Tuple given by component name
    Map(BTreeMap<String, Token>),
}

impl Token {
    /// Create a uint256 from u128
    pub fn uint(value: u128) -> Self {
        Token::Uint(U256::from(value))
    }

    /// Create a signed integer token from i128
    pub fn int(value: i128) -> Self {
        Token::Int(I256::from_i128(value))
    }

    /// Create a string token
    pub fn string(s: impl Into<String>) -> Self {
        Token::String(s.into())
    }

    /// Create a bytes32 token
    pub fn bytes32(data: H256) -> Self {
        Token::FixedBytes(data.as_bytes().to_vec())
    }

    /// Short name of the variant, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Address(_) => "address",
            Token::Uint(_) => "uint",
            Token::Int(_) => "int",
            Token::Bool(_) => "bool",
            Token::Bytes(_) => "bytes",
            Token::FixedBytes(_) => "fixed bytes",
            Token::String(_) => "string",
            Token::Array(_) => "array",
            Token::FixedArray(_) => "fixed array",
            Token::Tuple(_) => "tuple",
            Token::Map(_) => "map",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Address(addr) => write!(f, "{:#x}", addr),
            Token::Uint(value) => write!(f, "{}", value),
            Token::Int(value) => write!(f, "{}", value),
            Token::Bool(b) => write!(f, "{}", b),
            Token::Bytes(data) | Token::FixedBytes(data) => write!(f, "0x{}", hex::encode(data)),
            Token::String(s) => write!(f, "{:?}", s),
            Token::Array(tokens) | Token::FixedArray(tokens) => {
                write!(f, "[")?;
                write_list(f, tokens)?;
                write!(f, "]")
            }
            Token::Tuple(tokens) => {
                write!(f, "(")?;
                write_list(f, tokens)?;
                write!(f, ")")
            }
            Token::Map(fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, tokens: &[Token]) -> fmt::Result {
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", token)?;
    }
    Ok(())
}

/// Loose conversion from a JSON argument list entry.
///
/// Numbers that are not integers are kept as their textual form so the
/// numeric codec can reject them against the parameter they were meant for.
impl TryFrom<&serde_json::Value> for Token {
    type Error = CoerceError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        Ok(match value {
            Value::Null => return Err(CoerceError::Null),
            Value::Bool(b) => Token::Bool(*b),
            Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    Token::Uint(U256::from(v))
                } else if let Some(v) = n.as_i64() {
                    Token::Int(I256::from_i128(v as i128))
                } else {
                    Token::String(n.to_string())
                }
            }
            Value::String(s) => Token::String(s.clone()),
            Value::Array(items) => Token::Array(
                items
                    .iter()
                    .map(Token::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Value::Object(fields) => Token::Map(
                fields
                    .iter()
                    .map(|(k, v)| -> Result<(String, Token), CoerceError> {
                        Ok((k.clone(), Token::try_from(v)?))
                    })
                    .collect::<Result<BTreeMap<_, _>, CoerceError>>()?,
            ),
        })
    }
}

/// Signed 256-bit integer in sign-magnitude form.
///
/// Covers every signed and unsigned ABI integer: `abs` holds up to
/// `2^256 - 1`, so both `-2^255` and `uint256::MAX` are representable.
/// Zero is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct I256 {
    abs: U256,
    negative: bool,
}

impl I256 {
    /// Zero
    pub const ZERO: I256 = I256 {
        abs: U256::zero(),
        negative: false,
    };

    /// Create a new I256 from magnitude and sign
    pub fn new(abs: U256, negative: bool) -> Self {
        Self {
            abs,
            negative: negative && !abs.is_zero(),
        }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        Self::new(U256::from(value.unsigned_abs()), value < 0)
    }

    /// Absolute value
    pub fn abs(&self) -> U256 {
        self.abs
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }
}

impl From<U256> for I256 {
    fn from(value: U256) -> Self {
        Self::new(value, false)
    }
}

/// Parses the same textual forms numeric parameters accept: optional sign,
/// decimal or `0x` hex.
impl FromStr for I256 {
    type Err = CoerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_integer(s)
    }
}

impl Ord for I256 {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.abs.cmp(&other.abs),
            (true, true) => other.abs.cmp(&self.abs),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl PartialOrd for I256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.abs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_i256_from_i128() {
        let positive = I256::from_i128(100);
        assert!(!positive.is_negative());
        assert_eq!(positive.abs(), U256::from(100));

        let negative = I256::from_i128(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs(), U256::from(100));

        let zero = I256::from_i128(0);
        assert!(zero.is_zero());
        assert_eq!(zero, I256::ZERO);
    }

    #[test]
    fn test_i256_negative_zero_normalized() {
        let z = I256::new(U256::zero(), true);
        assert!(!z.is_negative());
        assert_eq!(z, I256::ZERO);
    }

    #[test]
    fn test_i256_ordering() {
        let values = [
            I256::from_i128(-129),
            I256::from_i128(-128),
            I256::from_i128(-1),
            I256::ZERO,
            I256::from_i128(1),
            I256::from(U256::MAX),
        ];
        for pair in values.windows(2) {
            assert!(pair[0] < pair[1], "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_i256_display() {
        assert_eq!(I256::from_i128(-128).to_string(), "-128");
        assert_eq!(I256::from_i128(42).to_string(), "42");
    }

    #[test]
    fn test_i256_from_str() {
        assert_eq!("-128".parse::<I256>().unwrap(), I256::from_i128(-128));
        assert_eq!("0xff".parse::<I256>().unwrap(), I256::from_i128(255));
        assert!("1.5".parse::<I256>().is_err());
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::uint(7).to_string(), "7");
        assert_eq!(Token::Bytes(vec![0xde, 0xad]).to_string(), "0xdead");
        assert_eq!(
            Token::Tuple(vec![Token::uint(7), Token::string("hi")]).to_string(),
            "(7, \"hi\")"
        );
        assert_eq!(
            Token::Address(Address::repeat_byte(0xab)).to_string(),
            format!("0x{}", "ab".repeat(20))
        );
    }

    #[test]
    fn test_token_from_json() {
        let value = json!([7, -3, "hi", true, {"a": 1}, 1.5]);
        let token = Token::try_from(&value).unwrap();
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), Token::uint(1));
        assert_eq!(
            token,
            Token::Array(vec![
                Token::uint(7),
                Token::int(-3),
                Token::string("hi"),
                Token::Bool(true),
                Token::Map(map),
                Token::string("1.5"),
            ])
        );
    }

    #[test]
    fn test_token_from_json_null() {
        assert!(matches!(
            Token::try_from(&serde_json::Value::Null),
            Err(CoerceError::Null)
        ));
    }
}
