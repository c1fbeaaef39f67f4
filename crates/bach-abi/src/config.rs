//! Codec configuration

use serde::{Deserialize, Serialize};

/// Limits applied while resolving descriptors and decoding untrusted data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiConfig {
    /// Maximum nesting depth of a descriptor tree
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Maximum element count of a decoded dynamic array
    #[serde(default = "default_max_array_len")]
    pub max_array_len: usize,
    /// Decoded values allowed per input word, bounding the total output of
    /// one decode call
    #[serde(default = "default_max_decode_expansion")]
    pub max_decode_expansion: usize,
}

fn default_max_depth() -> usize {
    32
}

fn default_max_array_len() -> usize {
    1 << 20
}

fn default_max_decode_expansion() -> usize {
    64
}

impl Default for AbiConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_array_len: default_max_array_len(),
            max_decode_expansion: default_max_decode_expansion(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AbiConfig = serde_json::from_str(r#"{"max_depth": 4}"#).unwrap();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_array_len, AbiConfig::default().max_array_len);
        assert_eq!(config.max_decode_expansion, 64);
    }
}
