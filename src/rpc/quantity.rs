//! Hex quantity encoding as used by the Ethereum JSON-RPC API.

use super::error::RpcError;
use serde::de::{Error as _, IgnoredAny};
use serde::{Deserialize, Deserializer};

fn hex_digits(value: &str) -> Result<&str, RpcError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if digits.is_empty() {
        return Err(RpcError::InvalidQuantity {
            value: value.to_string(),
        });
    }
    Ok(digits)
}

pub fn parse_u64(value: &str) -> Result<u64, RpcError> {
    u64::from_str_radix(hex_digits(value)?, 16).map_err(|_| RpcError::InvalidQuantity {
        value: value.to_string(),
    })
}

pub fn parse_u128(value: &str) -> Result<u128, RpcError> {
    u128::from_str_radix(hex_digits(value)?, 16).map_err(|_| RpcError::InvalidQuantity {
        value: value.to_string(),
    })
}

/// Encodes a block number the way `eth_getBlockByNumber` expects it.
pub fn to_hex(value: u64) -> String {
    format!("0x{:x}", value)
}

pub fn deserialize_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_u64(&raw).map_err(D::Error::custom)
}

pub fn deserialize_u128<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_u128(&raw).map_err(D::Error::custom)
}

/// Reduces a JSON array to its length without decoding the elements.
pub fn deserialize_len<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let items = Vec::<IgnoredAny>::deserialize(deserializer)?;
    Ok(items.len())
}
