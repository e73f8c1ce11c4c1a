//! Chart series derived from a block window.
//!
//! Every mapper is a total function of one block; x is always the block number.

use crate::format::hashes_to_gh;
use crate::rpc::Block;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: u64,
    pub y: f64,
}

/// Estimated network hash rate in GH/s: difficulty spread over one block time.
pub fn hash_rate_point(block: &Block, block_time_secs: u64) -> ChartPoint {
    let hashes_per_sec = block.difficulty as f64 / block_time_secs.max(1) as f64;
    ChartPoint {
        x: block.number,
        y: hashes_to_gh(hashes_per_sec),
    }
}

/// Gas used, in millions.
pub fn gas_used_point(block: &Block) -> ChartPoint {
    ChartPoint {
        x: block.number,
        y: block.gas_used as f64 / 1_000_000.0,
    }
}

pub fn uncle_count_point(block: &Block) -> ChartPoint {
    ChartPoint {
        x: block.number,
        y: block.uncle_count as f64,
    }
}

pub fn transaction_count_point(block: &Block) -> ChartPoint {
    ChartPoint {
        x: block.number,
        y: block.transaction_count as f64,
    }
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Continuous estimate, drawn as a line.
    Line,
    /// Per-block count, one bar per block.
    Bar,
}

/// A titled series ready for a chart panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    pub unit: &'static str,
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    fn from_blocks(
        title: String,
        unit: &'static str,
        kind: ChartKind,
        blocks: &[Block],
        map: impl Fn(&Block) -> ChartPoint,
    ) -> Self {
        Self {
            title,
            unit,
            kind,
            points: blocks.iter().map(map).collect(),
        }
    }

    pub fn latest(&self) -> Option<ChartPoint> {
        self.points.last().copied()
    }

    pub fn max_y(&self) -> f64 {
        self.points.iter().map(|p| p.y).fold(0.0, f64::max)
    }
}

/// The four dashboard charts, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCharts {
    pub hash_rate: ChartSeries,
    pub transaction_count: ChartSeries,
    pub gas_used: ChartSeries,
    pub uncles: ChartSeries,
}

impl DashboardCharts {
    pub fn from_blocks(blocks: &[Block], block_time_secs: u64) -> Self {
        let n = blocks.len();
        Self {
            hash_rate: ChartSeries::from_blocks(
                format!("Hash Rate Last {} blocks", n),
                "GH/s",
                ChartKind::Line,
                blocks,
                |block| hash_rate_point(block, block_time_secs),
            ),
            transaction_count: ChartSeries::from_blocks(
                format!("Transaction count last {} blocks", n),
                "txs",
                ChartKind::Bar,
                blocks,
                transaction_count_point,
            ),
            gas_used: ChartSeries::from_blocks(
                format!("Gas Used Last {} blocks", n),
                "M gas",
                ChartKind::Bar,
                blocks,
                gas_used_point,
            ),
            uncles: ChartSeries::from_blocks(
                format!("Uncles Last {} blocks", n),
                "uncles",
                ChartKind::Bar,
                blocks,
                uncle_count_point,
            ),
        }
    }

    pub fn all(&self) -> [&ChartSeries; 4] {
        [
            &self.hash_rate,
            &self.transaction_count,
            &self.gas_used,
            &self.uncles,
        ]
    }
}
