//! ABI codec error types

use thiserror::Error;

/// Result alias used throughout the codec
pub type Result<T> = std::result::Result<T, AbiError>;

/// ABI codec error
///
/// Schema errors (`InvalidAbiSchema`, `UnsupportedType`, `InvalidAbiType`,
/// `DepthExceeded`) describe a malformed descriptor tree and are raised before
/// any value is inspected. The remaining variants describe a value or byte
/// sequence that does not fit an otherwise valid descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// The descriptor tree itself is malformed
    #[error("invalid abi schema for `{name}`: {reason}")]
    InvalidAbiSchema {
        /// Parameter name
        name: String,
        /// What is wrong with the descriptor
        reason: String,
    },

    /// The dispatcher cannot route this type string
    #[error("unsupported abi type: {0}")]
    UnsupportedType(String),

    /// A numeric or fixed-bytes type with a width outside the supported set
    #[error("invalid abi type: {0}")]
    InvalidAbiType(String),

    /// Value does not match its descriptor's shape
    #[error("invalid argument for `{name}` ({ty}): {reason} (value: {value})")]
    InvalidArgument {
        /// Parameter name
        name: String,
        /// Canonical type signature
        ty: String,
        /// Offending value, rendered for diagnostics
        value: String,
        /// What is wrong with the value
        reason: String,
    },

    /// Numeric value outside its type's inclusive range
    #[error("value {value} out of range for `{name}` ({ty}): expected {min} <= value <= {max}")]
    OutOfRange {
        /// Parameter name
        name: String,
        /// Canonical type signature
        ty: String,
        /// Offending value
        value: String,
        /// Inclusive lower bound
        min: String,
        /// Inclusive upper bound
        max: String,
    },

    /// Fewer bytes remain than the type requires
    #[error("insufficient data for {ty}: need {needed} bytes, have {available}")]
    InsufficientData {
        /// Canonical type signature
        ty: String,
        /// Bytes required
        needed: usize,
        /// Bytes available
        available: usize,
    },

    /// Decoding produced more values than the input size allows
    #[error("decode limit exceeded at {ty}: more than {limit} values for this input")]
    DecodeLimitExceeded {
        /// Type being decoded when the budget ran out
        ty: String,
        /// Total values allowed for the input
        limit: usize,
    },

    /// Descriptor nesting deeper than the configured limit
    #[error("type nesting too deep at {ty}: limit is {max}")]
    DepthExceeded {
        /// Type string at which the limit was hit
        ty: String,
        /// Configured maximum depth
        max: usize,
    },
}

impl AbiError {
    /// Whether this error describes the descriptor tree rather than a value
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            AbiError::InvalidAbiSchema { .. }
                | AbiError::UnsupportedType(_)
                | AbiError::InvalidAbiType(_)
                | AbiError::DepthExceeded { .. }
        )
    }

    pub(crate) fn invalid_argument(
        name: &str,
        ty: impl ToString,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        AbiError::InvalidArgument {
            name: name.to_string(),
            ty: ty.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn insufficient(ty: impl ToString, needed: usize, available: usize) -> Self {
        AbiError::InsufficientData {
            ty: ty.to_string(),
            needed,
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_classification() {
        assert!(AbiError::UnsupportedType("notAType".into()).is_schema_error());
        assert!(AbiError::InvalidAbiType("uint7".into()).is_schema_error());
        assert!(!AbiError::insufficient("uint256", 32, 16).is_schema_error());
    }

    #[test]
    fn test_error_messages() {
        let err = AbiError::UnsupportedType("notAType".into());
        assert_eq!(err.to_string(), "unsupported abi type: notAType");

        let err = AbiError::insufficient("address", 32, 4);
        assert_eq!(
            err.to_string(),
            "insufficient data for address: need 32 bytes, have 4"
        );

        let err = AbiError::invalid_argument("to", "address", "0x12", "not a 20-byte address");
        assert!(err.to_string().contains("`to`"));
        assert!(err.to_string().contains("0x12"));
    }
}
