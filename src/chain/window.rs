use std::ops::RangeInclusive;

/// The run of `length` consecutive block numbers ending at `height`.
///
/// The lower bound is clamped at the genesis block, so heights below
/// `length - 1` yield `0..=height`. A zero length is treated as one.
pub fn block_window(height: u64, length: u64) -> RangeInclusive<u64> {
    let span = length.max(1) - 1;
    height.saturating_sub(span)..=height
}
