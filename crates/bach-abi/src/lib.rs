//! # bach-abi
//!
//! Ethereum contract ABI value codec for BachLedger.
//!
//! This crate provides:
//! - [`Param`] - JSON ABI parameter descriptors (`name`, `type`, `components`)
//! - [`Token`] - Values handed to and produced by the codec
//! - [`Codec`] - Head/tail encoding and decoding of parameter lists
//! - [`limits_for`] - Range table for every `uintN`/`intN`
//!
//! ## Example
//!
//! ```
//! use bach_abi::{decode, encode, Param, Token};
//!
//! let params = vec![Param::new("to", "address"), Param::new("amount", "uint256")];
//! let values = vec![
//!     Token::string("0x00000000000000000000000000000000000000aa"),
//!     Token::uint(1_000),
//! ];
//!
//! let data = encode(&params, &values).unwrap();
//! assert_eq!(data.len(), 64);
//!
//! let decoded = decode(&params, &data).unwrap();
//! assert_eq!(decoded[1].value, Token::uint(1_000));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coerce;
mod codec;
mod config;
mod dispatch;
mod error;
pub mod limits;
mod param;
mod token;
mod types;
pub mod word;

pub use codec::{Decoded, Encoded};
pub use coerce::CoerceError;
pub use config::AbiConfig;
pub use dispatch::Codec;
pub use error::{AbiError, Result};
pub use limits::{limits_for, Limits};
pub use param::Param;
pub use token::{Address, Token, I256};
pub use types::{Field, ParamType};
pub use word::{twos_complement, Word, WORD_SIZE};

pub use primitive_types::{H160, H256, U256};

/// Encode a parameter list with the default configuration
pub fn encode(params: &[Param], values: &[Token]) -> Result<Vec<u8>> {
    Codec::default().encode(params, values)
}

/// Encode one value with the default configuration
pub fn encode_param(param: &Param, value: &Token) -> Result<Encoded> {
    Codec::default().encode_param(param, value)
}

/// Encode a call payload: `selector ++ encode(params, values)`
pub fn encode_function_call(selector: [u8; 4], params: &[Param], values: &[Token]) -> Result<Vec<u8>> {
    Codec::default().encode_function_call(selector, params, values)
}

/// Decode a parameter list with the default configuration
pub fn decode<'a>(params: &[Param], data: &'a [u8]) -> Result<Vec<Decoded<'a>>> {
    Codec::default().decode(params, data)
}

/// Decode one value with the default configuration
pub fn decode_param<'a>(param: &Param, data: &'a [u8]) -> Result<Decoded<'a>> {
    Codec::default().decode_param(param, data)
}
