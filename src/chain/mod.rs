//! Chain state as the dashboard sees it: block windows, snapshots and chart series.

pub mod series;
pub mod snapshot;
pub mod window;

pub use series::{ChartKind, ChartPoint, ChartSeries, DashboardCharts};
pub use snapshot::ChainSnapshot;
pub use window::block_window;
