//! Numeric limits table
//!
//! Maps every `uintN`/`intN` type name (N = 8, 16, ..., 256) plus the bare
//! aliases `uint`/`int` to its inclusive range. Built once on first use and
//! read-only afterwards, so concurrent lookups need no coordination.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use primitive_types::U256;

use crate::token::I256;

/// Inclusive range of an ABI integer type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Smallest representable value
    pub min: I256,
    /// Largest representable value
    pub max: I256,
    /// Bit width
    pub bits: usize,
    /// Whether the type is signed
    pub signed: bool,
}

impl Limits {
    fn unsigned(bits: usize) -> Self {
        Self {
            min: I256::ZERO,
            max: I256::from(low_mask(bits)),
            bits,
            signed: false,
        }
    }

    fn signed(bits: usize) -> Self {
        // 2^(N-1): the magnitude of min, one more than max
        let half = U256::one() << (bits - 1);
        Self {
            min: I256::new(half, true),
            max: I256::from(half - U256::one()),
            bits,
            signed: true,
        }
    }

    /// Whether `value` lies in `[min, max]`
    pub fn contains(&self, value: &I256) -> bool {
        self.min <= *value && *value <= self.max
    }
}

/// `2^bits - 1`, computed without overflowing at 256 bits
fn low_mask(bits: usize) -> U256 {
    if bits >= 256 {
        U256::MAX
    } else {
        (U256::one() << bits) - U256::one()
    }
}

static LIMITS: Lazy<HashMap<String, Limits>> = Lazy::new(|| {
    let mut table = HashMap::with_capacity(66);
    for bits in (8..=256).step_by(8) {
        table.insert(format!("uint{}", bits), Limits::unsigned(bits));
        table.insert(format!("int{}", bits), Limits::signed(bits));
    }
    table.insert("uint".to_string(), Limits::unsigned(256));
    table.insert("int".to_string(), Limits::signed(256));
    table
});

/// Look up the inclusive range for an integer type name
pub fn limits_for(type_name: &str) -> Option<&'static Limits> {
    LIMITS.get(type_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        // 32 widths, signed and unsigned, plus two aliases
        assert_eq!(LIMITS.len(), 66);
    }

    #[test]
    fn test_uint8_bounds() {
        let limits = limits_for("uint8").unwrap();
        assert_eq!(limits.min, I256::ZERO);
        assert_eq!(limits.max, I256::from_i128(255));
        assert!(!limits.signed);
    }

    #[test]
    fn test_int8_bounds() {
        let limits = limits_for("int8").unwrap();
        assert_eq!(limits.min, I256::from_i128(-128));
        assert_eq!(limits.max, I256::from_i128(127));
        assert!(limits.contains(&I256::from_i128(-128)));
        assert!(!limits.contains(&I256::from_i128(-129)));
        assert!(!limits.contains(&I256::from_i128(128)));
    }

    #[test]
    fn test_256_bit_bounds() {
        let uint = limits_for("uint256").unwrap();
        assert_eq!(uint.max, I256::from(U256::MAX));

        let int = limits_for("int256").unwrap();
        assert_eq!(int.min.abs(), U256::one() << 255usize);
        assert!(int.min.is_negative());
        assert_eq!(int.max.abs(), (U256::one() << 255usize) - U256::one());
    }

    #[test]
    fn test_aliases() {
        assert_eq!(limits_for("uint"), limits_for("uint256"));
        assert_eq!(limits_for("int"), limits_for("int256"));
    }

    #[test]
    fn test_unsupported_widths() {
        for name in ["uint0", "uint7", "int264", "uint512", "uint08", "bytes32", ""] {
            assert!(limits_for(name).is_none(), "{} should be absent", name);
        }
    }

    #[test]
    fn test_every_width_present() {
        for bits in (8..=256).step_by(8) {
            let limits = limits_for(&format!("int{}", bits)).unwrap();
            assert_eq!(limits.bits, bits);
            assert!(limits_for(&format!("uint{}", bits)).is_some());
        }
    }
}
