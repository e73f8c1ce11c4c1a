//! Dashboard chart components
//!
//! Renders the four block-window series as a 2x2 grid. Hash rate is a line, the
//! per-block counts are bars.

use crate::chain::{ChartKind, ChartSeries, DashboardCharts};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType};

const SERIES_COLORS: [Color; 4] = [
    Color::LightMagenta,
    Color::LightBlue,
    Color::LightGreen,
    Color::LightYellow,
];

pub fn render_charts(f: &mut Frame, area: Rect, charts: &DashboardCharts) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut cells = Vec::with_capacity(4);
    for row in rows.iter() {
        cells.extend(
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row)
                .iter()
                .copied(),
        );
    }

    for ((series, cell), color) in charts.all().into_iter().zip(cells).zip(SERIES_COLORS) {
        render_series(f, cell, series, color);
    }
}

fn render_series(f: &mut Frame, area: Rect, series: &ChartSeries, color: Color) {
    let data: Vec<(f64, f64)> = series
        .points
        .iter()
        .map(|point| (point.x as f64, point.y))
        .collect();

    let (x_min, x_max) = match (series.points.first(), series.points.last()) {
        (Some(first), Some(last)) => (first.x as f64, (last.x as f64).max(first.x as f64 + 1.0)),
        _ => (0.0, 1.0),
    };
    let y_max = match series.max_y() {
        max if max > 0.0 => max * 1.1,
        _ => 1.0,
    };

    let latest = series
        .latest()
        .map(|point| format!(" {:.2} {}", point.y, series.unit))
        .unwrap_or_default();

    let (marker, graph_type) = match series.kind {
        ChartKind::Line => (Marker::Braille, GraphType::Line),
        ChartKind::Bar => (Marker::HalfBlock, GraphType::Bar),
    };

    let chart = Chart::new(vec![
        Dataset::default()
            .marker(marker)
            .graph_type(graph_type)
            .style(Style::default().fg(color))
            .data(&data),
    ])
    .block(
        Block::default()
            .title(format!("{}{}", series.title, latest))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .x_axis(
        Axis::default()
            .style(Style::default().fg(Color::DarkGray))
            .bounds([x_min, x_max])
            .labels(vec![format!("{}", x_min), format!("{}", x_max)]),
    )
    .y_axis(
        Axis::default()
            .style(Style::default().fg(Color::DarkGray))
            .bounds([0.0, y_max])
            .labels(vec!["0".to_string(), format!("{:.1}", y_max)]),
    );

    f.render_widget(chart, area);
}
