//! Typed views of the node's JSON-RPC results.

use super::quantity::{self, deserialize_len, deserialize_u64, deserialize_u128};
use serde::Deserialize;
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// A block header plus transaction and uncle counts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(deserialize_with = "deserialize_u64")]
    pub number: u64,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub miner: Option<String>,
    #[serde(deserialize_with = "deserialize_u64")]
    pub gas_used: u64,
    #[serde(default, deserialize_with = "deserialize_u64")]
    pub gas_limit: u64,
    #[serde(default, deserialize_with = "deserialize_u128")]
    pub difficulty: u128,
    /// Number of uncle headers referenced by the block.
    #[serde(rename = "uncles", deserialize_with = "deserialize_len")]
    pub uncle_count: usize,
    /// Number of transactions, whether the node sent hashes or full objects.
    #[serde(rename = "transactions", deserialize_with = "deserialize_len")]
    pub transaction_count: usize,
    #[serde(deserialize_with = "deserialize_u64")]
    pub timestamp: u64,
}

/// Result of `eth_syncing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStatus {
    #[default]
    NotSyncing,
    InProgress {
        current_block: u64,
        highest_block: u64,
    },
}

impl SyncStatus {
    /// Normalizes a raw `eth_syncing` result.
    ///
    /// Anything other than an object with a readable `currentBlock` counts as not
    /// syncing; a missing `highestBlock` reads as 0.
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(fields) = value else {
            return SyncStatus::NotSyncing;
        };
        let read = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .and_then(|raw| quantity::parse_u64(raw).ok())
        };
        match read("currentBlock") {
            Some(current_block) => SyncStatus::InProgress {
                current_block,
                highest_block: read("highestBlock").unwrap_or(0),
            },
            None => SyncStatus::NotSyncing,
        }
    }
}

impl Display for SyncStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncStatus::NotSyncing => write!(f, "No"),
            SyncStatus::InProgress {
                current_block,
                highest_block,
            } => write!(f, "{} / {}", current_block, highest_block),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn block_decodes_hex_fields_and_counts() {
        let block: Block = serde_json::from_value(json!({
            "number": "0x64",
            "hash": "0xabcdef",
            "miner": "0x0000000000000000000000000000000000000001",
            "gasUsed": "0x7a1200",
            "gasLimit": "0x7a1200",
            "difficulty": "0x15d3ef79800",
            "uncles": ["0x01"],
            "transactions": [{ "hash": "0x02" }, { "hash": "0x03" }],
            "timestamp": "0x5f5e100",
            "extraData": "0x"
        }))
        .unwrap();

        assert_eq!(block.number, 100);
        assert_eq!(block.gas_used, 8_000_000);
        assert_eq!(block.difficulty, 1_500_000_000_000);
        assert_eq!(block.uncle_count, 1);
        assert_eq!(block.transaction_count, 2);
        assert_eq!(block.timestamp, 100_000_000);
    }

    #[test]
    fn block_without_difficulty_defaults_to_zero() {
        let block: Block = serde_json::from_value(json!({
            "number": "0x1",
            "gasUsed": "0x0",
            "uncles": [],
            "transactions": ["0xaa"],
            "timestamp": "0x0"
        }))
        .unwrap();
        assert_eq!(block.difficulty, 0);
        assert_eq!(block.transaction_count, 1);
        assert_eq!(block.hash, None);
    }

    #[test]
    fn block_with_bad_quantity_fails() {
        let result = serde_json::from_value::<Block>(json!({
            "number": "0xnope",
            "gasUsed": "0x0",
            "uncles": [],
            "transactions": [],
            "timestamp": "0x0"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn sync_status_false_is_not_syncing() {
        let status = SyncStatus::from_value(&json!(false));
        assert_eq!(status, SyncStatus::NotSyncing);
        assert_eq!(status.to_string(), "No");
    }

    #[test]
    fn sync_status_progress() {
        let status = SyncStatus::from_value(&json!({
            "currentBlock": "0x5",
            "highestBlock": "0xa"
        }));
        assert_eq!(status.to_string(), "5 / 10");
    }

    #[test]
    fn sync_status_missing_highest_block() {
        let status = SyncStatus::from_value(&json!({ "currentBlock": "0x5" }));
        assert_eq!(
            status,
            SyncStatus::InProgress {
                current_block: 5,
                highest_block: 0
            }
        );
        assert_eq!(status.to_string(), "5 / 0");
    }

    #[test]
    fn sync_status_malformed_values() {
        assert_eq!(
            SyncStatus::from_value(&json!(true)),
            SyncStatus::NotSyncing
        );
        assert_eq!(
            SyncStatus::from_value(&json!({ "startingBlock": "0x0" })),
            SyncStatus::NotSyncing
        );
        assert_eq!(
            SyncStatus::from_value(&json!({ "currentBlock": 5 })),
            SyncStatus::NotSyncing
        );
    }
}
