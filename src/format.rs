//! Display formatting for chain quantities.

use crate::rpc::Block;
use chrono::DateTime;

const WEI_PER_GWEI: u128 = 1_000_000_000;
const HASHES_PER_GH: f64 = 1_000_000_000.0;

/// Formats a wei amount as Gwei, without trailing zeros: `21000000000` -> `"21"`.
pub fn wei_to_gwei(wei: u128) -> String {
    let whole = wei / WEI_PER_GWEI;
    let frac = wei % WEI_PER_GWEI;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{:09}", frac);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

pub fn hashes_to_gh(hashes_per_sec: f64) -> f64 {
    hashes_per_sec / HASHES_PER_GH
}

/// Network hash rate estimated from one block, in GH/s with two decimals.
pub fn format_hash_rate(block: &Block, block_time_secs: u64) -> String {
    let hashes_per_sec = block.difficulty as f64 / block_time_secs.max(1) as f64;
    format!("{:.2}", hashes_to_gh(hashes_per_sec))
}

/// Shortens a hash or address to `0x1234…abcd`.
pub fn short_hex(value: &str) -> String {
    if value.len() <= 14 {
        return value.to_string();
    }
    format!("{}…{}", &value[..6], &value[value.len() - 4..])
}

/// Renders a block timestamp as UTC.
pub fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Age of a block relative to `now` (both unix seconds), e.g. `"42s"` or `"3m 5s"`.
pub fn format_age(timestamp: u64, now: u64) -> String {
    let secs = now.saturating_sub(timestamp);
    if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}
