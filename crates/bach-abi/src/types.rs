//! Resolved ABI type shapes

use std::fmt;

use crate::word::WORD_SIZE;

/// A named tuple component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Component name, may be empty
    pub name: String,
    /// Component type
    pub ty: ParamType,
}

/// Solidity parameter types, resolved from a descriptor's type string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// `address`, right-aligned in one word
    Address,
    /// `uintN`, N in 8..=256 by steps of 8
    Uint(usize),
    /// `intN`, two's complement on the wire
    Int(usize),
    /// `bool`
    Bool,
    /// `bytes`, length-prefixed
    Bytes,
    /// `bytesN`, left-aligned, N in 1..=32
    FixedBytes(usize),
    /// `string`, laid out as `bytes`
    String,
    /// `T[]`, count-prefixed
    Array(Box<ParamType>),
    /// `T[k]`, k > 0
    FixedArray(Box<ParamType>, usize),
    /// `tuple`, components in declaration order; names feed diagnostics and
    /// `Token::Map` lookups
    Tuple(Vec<Field>),
}

impl ParamType {
    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            ParamType::Tuple(fields) => fields.iter().any(|f| f.ty.is_dynamic()),
            _ => false,
        }
    }

    /// Bytes this type occupies in its parent's head region.
    ///
    /// Static composites are placed inline and span all their words;
    /// dynamic types take a single offset word.
    pub fn head_len(&self) -> usize {
        if self.is_dynamic() {
            return WORD_SIZE;
        }
        match self {
            ParamType::FixedArray(inner, size) => inner.head_len().saturating_mul(*size),
            ParamType::Tuple(fields) => fields.iter().fold(0, |acc, f| acc.saturating_add(f.ty.head_len())),
            _ => WORD_SIZE,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => write!(f, "address"),
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::Int(bits) => write!(f, "int{}", bits),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Bytes => write!(f, "bytes"),
            ParamType::FixedBytes(size) => write!(f, "bytes{}", size),
            ParamType::String => write!(f, "string"),
            ParamType::Array(inner) => write!(f, "{}[]", inner),
            ParamType::FixedArray(inner, size) => write!(f, "{}[{}]", inner, size),
            ParamType::Tuple(fields) => {
                write!(f, "(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", field.ty)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(ty: ParamType) -> Field {
        Field {
            name: String::new(),
            ty,
        }
    }

    #[test]
    fn test_param_type_is_dynamic() {
        assert!(!ParamType::Address.is_dynamic());
        assert!(!ParamType::Uint(256).is_dynamic());
        assert!(!ParamType::Bool.is_dynamic());
        assert!(!ParamType::FixedBytes(32).is_dynamic());

        assert!(ParamType::Bytes.is_dynamic());
        assert!(ParamType::String.is_dynamic());
        assert!(ParamType::Array(Box::new(ParamType::Uint(256))).is_dynamic());
    }

    #[test]
    fn test_composite_dynamic_is_transitive() {
        let static_tuple = ParamType::Tuple(vec![field(ParamType::Uint(8)), field(ParamType::Address)]);
        assert!(!static_tuple.is_dynamic());
        assert!(!ParamType::FixedArray(Box::new(static_tuple.clone()), 3).is_dynamic());

        let nested = ParamType::Tuple(vec![
            field(static_tuple),
            field(ParamType::FixedArray(Box::new(ParamType::String), 2)),
        ]);
        assert!(nested.is_dynamic());
    }

    #[test]
    fn test_head_len() {
        assert_eq!(ParamType::Uint(8).head_len(), 32);
        assert_eq!(ParamType::String.head_len(), 32);
        assert_eq!(
            ParamType::FixedArray(Box::new(ParamType::FixedBytes(32)), 4).head_len(),
            128
        );
        let tuple = ParamType::Tuple(vec![
            field(ParamType::Uint(256)),
            field(ParamType::FixedArray(Box::new(ParamType::Bool), 2)),
        ]);
        assert_eq!(tuple.head_len(), 96);
        assert_eq!(ParamType::FixedArray(Box::new(ParamType::Bytes), 4).head_len(), 32);
    }

    #[test]
    fn test_display() {
        let ty = ParamType::Array(Box::new(ParamType::Tuple(vec![
            field(ParamType::Uint(256)),
            field(ParamType::FixedArray(Box::new(ParamType::FixedBytes(32)), 4)),
        ])));
        assert_eq!(ty.to_string(), "(uint256,bytes32[4])[]");
        assert_eq!(ParamType::Int(8).to_string(), "int8");
    }
}
